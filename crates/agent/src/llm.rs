use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// One prompt plus the JSON schema the response must follow.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub response_schema: Value,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("llm transport failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("llm endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("llm response contained no candidates")]
    MissingContent,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model's JSON text. An empty string means a candidate was
    /// produced without text; no candidate at all is `MissingContent`.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}
