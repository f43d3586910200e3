use secrecy::SecretString;

use super::state::BuilderState;

/// Builder for configuring and instantiating the completion client.
pub struct LLMBuilder {
    pub(super) state: BuilderState,
}

impl Default for LLMBuilder {
    fn default() -> Self {
        Self {
            state: BuilderState::new(),
        }
    }
}

impl LLMBuilder {
    /// Creates a new empty builder instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.state.api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Sets the base URL for API requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.state.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.state.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Sets the sampling seed for backends that honour it.
    pub fn seed(mut self, seed: u64) -> Self {
        self.state.seed = Some(seed);
        self
    }

    /// Whether JSON-mode requests carry `response_format`.
    pub fn structured_output(mut self, enable: bool) -> Self {
        self.state.structured_output = Some(enable);
        self
    }
}
