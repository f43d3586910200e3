use async_trait::async_trait;

use crate::error::LLMError;

use super::request::ChatRequest;
use super::usage::Usage;

pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn text(&self) -> Option<String>;
    fn usage(&self) -> Option<Usage> {
        None
    }
}

/// The completion client boundary.
///
/// One call sends one request and yields one completion. Implementations are
/// stateless between calls; any error they return is treated as fatal for
/// the current debate run.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat(&self, request: &ChatRequest<'_>) -> Result<Box<dyn ChatResponse>, LLMError>;
}

#[async_trait]
impl<T: ChatProvider + ?Sized> ChatProvider for Box<T> {
    async fn chat(&self, request: &ChatRequest<'_>) -> Result<Box<dyn ChatResponse>, LLMError> {
        (**self).chat(request).await
    }
}

#[async_trait]
impl<T: ChatProvider + ?Sized> ChatProvider for std::sync::Arc<T> {
    async fn chat(&self, request: &ChatRequest<'_>) -> Result<Box<dyn ChatResponse>, LLMError> {
        (**self).chat(request).await
    }
}
