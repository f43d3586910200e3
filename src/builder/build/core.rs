use secrecy::SecretString;

use crate::{
    backends::{OpenAICompatible, OpenAICompatibleConfig},
    chat::ChatProvider,
    error::LLMError,
    resilient_llm::{ResilienceConfig, ResilientLLM},
};

use super::llm_builder::LLMBuilder;
use super::state::BuilderState;

impl LLMBuilder {
    pub fn build(self) -> Result<Box<dyn ChatProvider>, LLMError> {
        self.state.build()
    }
}

impl BuilderState {
    pub(super) fn build(mut self) -> Result<Box<dyn ChatProvider>, LLMError> {
        let base_url = self
            .base_url
            .take()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| LLMError::InvalidRequest("No base URL specified".to_string()))?;
        log::debug!(
            "building completion client base_url={base_url} timeout={:?} seed={:?}",
            self.timeout_seconds,
            self.seed
        );

        let provider: Box<dyn ChatProvider> =
            Box::new(OpenAICompatible::new(OpenAICompatibleConfig {
                base_url,
                api_key: self
                    .api_key
                    .take()
                    .unwrap_or_else(|| SecretString::new(String::new())),
                seed: self.seed,
                timeout_seconds: self.timeout_seconds,
                structured_output: self.structured_output.unwrap_or(false),
            })?);
        Ok(self.wrap_with_resilience(provider))
    }

    fn wrap_with_resilience(&self, provider: Box<dyn ChatProvider>) -> Box<dyn ChatProvider> {
        if !self.resilient_enable.unwrap_or(false) {
            return provider;
        }
        let mut cfg = ResilienceConfig::defaults();
        if let Some(attempts) = self.resilient_attempts {
            cfg.max_attempts = attempts.max(1);
        }
        if let Some(base) = self.resilient_base_delay_ms {
            cfg.base_delay_ms = base;
        }
        if let Some(max) = self.resilient_max_delay_ms {
            cfg.max_delay_ms = max;
        }
        Box::new(ResilientLLM::new(provider, cfg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_base_url() {
        let err = LLMBuilder::new().api_key("k").build().err().expect("error");
        assert!(matches!(err, LLMError::InvalidRequest(_)));
    }

    #[test]
    fn build_with_resilience() {
        let client = LLMBuilder::new()
            .base_url("http://127.0.0.1:1234/v1")
            .api_key("lm-studio")
            .resilient(true)
            .resilient_attempts(2)
            .resilient_backoff(10, 100)
            .build();
        assert!(client.is_ok());
    }
}
