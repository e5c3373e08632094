//! Completion gateway contract and the disabled fallback

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::features::conversation::Message;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("completion service is not configured (set OPENAI_API_KEY)")]
    NotConfigured,
    #[error("completion service did not answer within {0:?}")]
    Timeout(Duration),
    #[error("completion service error: {0}")]
    Service(String),
    #[error("completion service returned no text")]
    EmptyResponse,
}

impl CompletionError {
    /// Whether resubmitting the same message may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, CompletionError::NotConfigured)
    }
}

/// Sends a persona prompt plus history to a completion service
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Return the completion text for `history` conditioned on `system_prompt`
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[Message],
    ) -> Result<String, CompletionError>;

    /// Model identifier, for display
    fn model(&self) -> &str;
}

/// Gateway used when no credential is configured
#[derive(Debug, Default, Clone)]
pub struct DisabledGateway;

#[async_trait]
impl CompletionGateway for DisabledGateway {
    async fn complete(
        &self,
        _system_prompt: &str,
        _history: &[Message],
    ) -> Result<String, CompletionError> {
        Err(CompletionError::NotConfigured)
    }

    fn model(&self) -> &str {
        "disabled"
    }
}
