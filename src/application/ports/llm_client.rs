use async_trait::async_trait;

use crate::domain::GenerationRequest;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the text of the first generation produced for the request.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("request timed out")]
    Timeout,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
