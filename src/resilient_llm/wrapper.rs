use std::future::Future;

use tokio::time::sleep;

use crate::{chat::ChatProvider, error::LLMError};

use super::config::ResilienceConfig;

/// Retries transport failures of the wrapped provider.
///
/// Only the connection layer is retried. Output that reaches the debate
/// engine is never re-requested here; content problems are the turn
/// executor's business.
pub struct ResilientLLM {
    pub(super) inner: Box<dyn ChatProvider>,
    pub(super) cfg: ResilienceConfig,
}

impl ResilientLLM {
    pub fn new(inner: Box<dyn ChatProvider>, cfg: ResilienceConfig) -> Self {
        Self { inner, cfg }
    }

    /// Runs `op` until it succeeds, fails permanently, or the attempts run out.
    ///
    /// Exhausting the attempts on transient failures yields
    /// [`LLMError::RetryExceeded`]; anything else surfaces unchanged.
    pub(super) async fn retry<F, Fut, T>(&self, mut op: F) -> Result<T, LLMError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LLMError>>,
    {
        let max_attempts = self.cfg.max_attempts.max(1);
        let mut attempt = 1usize;
        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            if !err.is_transient() {
                return Err(err);
            }
            if attempt >= max_attempts {
                return Err(if attempt == 1 {
                    err
                } else {
                    LLMError::RetryExceeded {
                        attempts: attempt,
                        last_error: err.to_string(),
                    }
                });
            }
            let delay = self.cfg.delay_for(attempt as u32);
            log::warn!(
                "completion attempt {attempt}/{max_attempts} failed, retrying in {}ms: {err}",
                delay.as_millis()
            );
            sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::chat::{ChatMessage, ChatRequest, ChatResponse};

    #[derive(Debug)]
    struct Text(String);

    impl std::fmt::Display for Text {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl ChatResponse for Text {
        fn text(&self) -> Option<String> {
            Some(self.0.clone())
        }
    }

    struct Flaky {
        failures: usize,
        error: fn() -> LLMError,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ChatProvider for Flaky {
        async fn chat(
            &self,
            _request: &ChatRequest<'_>,
        ) -> Result<Box<dyn ChatResponse>, LLMError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err((self.error)())
            } else {
                Ok(Box::new(Text("ok".to_string())))
            }
        }
    }

    fn fast(attempts: usize) -> ResilienceConfig {
        ResilienceConfig {
            max_attempts: attempts,
            base_delay_ms: 1,
            max_delay_ms: 2,
            jitter: false,
        }
    }

    #[tokio::test]
    async fn retries_transport_errors_until_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let llm = ResilientLLM::new(
            Box::new(Flaky {
                failures: 2,
                error: || LLMError::HttpError("connection refused".into()),
                calls: calls.clone(),
            }),
            fast(3),
        );
        let messages = [ChatMessage::user().content("hi").build()];
        let response = llm
            .chat(&ChatRequest::new(&messages, "m"))
            .await
            .expect("third attempt succeeds");
        assert_eq!(response.text().as_deref(), Some("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn auth_errors_are_not_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let llm = ResilientLLM::new(
            Box::new(Flaky {
                failures: 5,
                error: || LLMError::AuthError("bad key".into()),
                calls: calls.clone(),
            }),
            fast(3),
        );
        let messages = [ChatMessage::user().content("hi").build()];
        let err = llm
            .chat(&ChatRequest::new(&messages, "m"))
            .await
            .expect_err("auth error surfaces");
        assert!(matches!(err, LLMError::AuthError(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn single_attempt_surfaces_first_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let llm = ResilientLLM::new(
            Box::new(Flaky {
                failures: 1,
                error: || LLMError::HttpError("timeout".into()),
                calls: calls.clone(),
            }),
            fast(1),
        );
        let messages = [ChatMessage::user().content("hi").build()];
        let err = llm
            .chat(&ChatRequest::new(&messages, "m"))
            .await
            .expect_err("no retry budget");
        assert!(matches!(err, LLMError::HttpError(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_report_the_attempt_count() {
        let calls = Arc::new(AtomicUsize::new(0));
        let llm = ResilientLLM::new(
            Box::new(Flaky {
                failures: 10,
                error: || LLMError::ProviderError("503 busy".into()),
                calls: calls.clone(),
            }),
            fast(3),
        );
        let messages = [ChatMessage::user().content("hi").build()];
        let err = llm
            .chat(&ChatRequest::new(&messages, "m"))
            .await
            .expect_err("always busy");
        match err {
            LLMError::RetryExceeded {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("503 busy"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
