use async_trait::async_trait;

use crate::{
    chat::{ChatProvider, ChatRequest, ChatResponse},
    error::LLMError,
};

use super::wrapper::ResilientLLM;

#[async_trait]
impl ChatProvider for ResilientLLM {
    async fn chat(&self, request: &ChatRequest<'_>) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.retry(|| self.inner.chat(request)).await
    }
}
