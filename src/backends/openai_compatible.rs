//! Client for OpenAI-compatible chat completion endpoints.
//!
//! Local inference servers such as LM Studio, llama.cpp or vLLM expose the
//! `/chat/completions` route with the OpenAI wire format; this client speaks
//! exactly that subset and nothing more.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    chat::{ChatProvider, ChatRequest, ChatResponse, Usage},
    error::LLMError,
};

/// Configuration for the OpenAI-compatible client.
#[derive(Debug)]
pub struct OpenAICompatibleConfig {
    /// Base URL, e.g. `http://127.0.0.1:1234/v1`.
    pub base_url: String,
    /// Bearer token. Local servers accept any non-empty value.
    pub api_key: SecretString,
    /// Sampling seed, only honoured by backends that support it.
    pub seed: Option<u64>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
    /// Whether `json_output` requests are sent with `response_format`.
    pub structured_output: bool,
}

/// Client for OpenAI-compatible endpoints.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct OpenAICompatible {
    pub config: Arc<OpenAICompatibleConfig>,
    pub client: Client,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionMessage {
    content: Option<String>,
}

impl std::fmt::Display for ChatCompletionResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "No response content"),
        }
    }
}

impl ChatResponse for ChatCompletionResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(|content| content.trim().to_string())
    }

    fn usage(&self) -> Option<Usage> {
        self.usage.clone()
    }
}

impl OpenAICompatible {
    pub fn new(config: OpenAICompatibleConfig) -> Result<Self, LLMError> {
        let mut builder = Client::builder();
        if let Some(sec) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a client around an existing HTTP client.
    pub fn with_client(client: Client, config: OpenAICompatibleConfig) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_body<'a>(&self, request: &'a ChatRequest<'a>) -> ChatCompletionRequest<'a> {
        let messages = request
            .messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect();
        // A token is at least one character, so a token cap equal to the
        // character budget never cuts the output short of that budget.
        let max_tokens = match request.max_output_chars {
            0 => None,
            chars => Some(u32::try_from(chars).unwrap_or(u32::MAX)),
        };
        let response_format = (request.json_output && self.config.structured_output)
            .then_some(ResponseFormat {
                format_type: "json_object",
            });
        ChatCompletionRequest {
            model: request.model,
            messages,
            temperature: request.temperature,
            stream: false,
            max_tokens,
            seed: self.config.seed,
            response_format,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAICompatible {
    async fn chat(&self, request: &ChatRequest<'_>) -> Result<Box<dyn ChatResponse>, LLMError> {
        if self.config.api_key.expose_secret().is_empty() {
            return Err(LLMError::AuthError("Missing API key".to_string()));
        }
        if request.messages.is_empty() {
            return Err(LLMError::InvalidRequest(
                "chat request without messages".to_string(),
            ));
        }

        let body = self.build_body(request);

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("chat completion payload: {json}");
            }
        }

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                LLMError::HttpError(format!(
                    "request failed (model={}, base_url={}): {err}",
                    request.model, self.config.base_url
                ))
            })?;

        log::debug!("chat completion HTTP status: {}", resp.status());

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(LLMError::ProviderError(format!(
                "endpoint returned {status} for model {}: {error_text}",
                request.model
            )));
        }

        let raw = resp.text().await?;
        let parsed: ChatCompletionResponse =
            serde_json::from_str(&raw).map_err(|err| LLMError::ResponseFormatError {
                message: format!("failed to decode chat completion: {err}"),
                raw_response: raw.clone(),
            })?;
        if parsed.choices.is_empty() {
            return Err(LLMError::ResponseFormatError {
                message: "response contained no choices".to_string(),
                raw_response: raw,
            });
        }

        Ok(Box::new(parsed))
    }
}
