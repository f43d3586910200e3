use super::message::ChatMessage;

/// One completion call: the messages plus the per-role sampling settings.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub model: &'a str,
    pub temperature: f32,
    /// Character budget of the calling role. Providers may use it as an
    /// upper bound for generation; the caller truncates after validation.
    pub max_output_chars: usize,
    /// Ask the endpoint for a JSON object when it supports structured output.
    pub json_output: bool,
}

impl<'a> ChatRequest<'a> {
    pub fn new(messages: &'a [ChatMessage], model: &'a str) -> Self {
        Self {
            messages,
            model,
            temperature: 0.2,
            max_output_chars: 0,
            json_output: false,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_output_chars(mut self, max_output_chars: usize) -> Self {
        self.max_output_chars = max_output_chars;
        self
    }

    pub fn json_output(mut self, json_output: bool) -> Self {
        self.json_output = json_output;
        self
    }
}
