use secrecy::SecretString;

#[derive(Default)]
pub(crate) struct BuilderState {
    pub(crate) api_key: Option<SecretString>,
    pub(crate) base_url: Option<String>,
    pub(crate) timeout_seconds: Option<u64>,
    pub(crate) seed: Option<u64>,
    pub(crate) structured_output: Option<bool>,
    pub(crate) resilient_enable: Option<bool>,
    pub(crate) resilient_attempts: Option<usize>,
    pub(crate) resilient_base_delay_ms: Option<u64>,
    pub(crate) resilient_max_delay_ms: Option<u64>,
}

impl BuilderState {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}
