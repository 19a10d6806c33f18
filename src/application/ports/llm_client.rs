use async_trait::async_trait;

use crate::domain::{ChatModel, InferenceResponse, Prompt, Temperature};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &Prompt,
        model: ChatModel,
        temperature: Temperature,
    ) -> Result<InferenceResponse, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
