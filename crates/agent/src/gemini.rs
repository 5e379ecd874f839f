use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use salespulse_core::config::LlmConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};
use uuid::Uuid;

use crate::llm::{CompletionRequest, LlmClient, LlmError};

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

/// `generateContent` client for Gemini models. Constructed explicitly from
/// config and handed to whoever needs it.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(LlmError::Transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let correlation_id = Uuid::new_v4().to_string();
        let body = GenerateContentRequest::from_completion(request);

        debug!(
            event_name = "agent.gemini.request",
            correlation_id = %correlation_id,
            model = %self.model,
            "sending generateContent request"
        );

        // An empty key is sent as-is; the endpoint rejects it.
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|source| {
                error!(
                    event_name = "agent.gemini.transport_failed",
                    correlation_id = %correlation_id,
                    error = %source,
                    "gemini request failed"
                );
                LlmError::Transport(source)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(source) => {
                    debug!(
                        event_name = "agent.gemini.error_body_unreadable",
                        correlation_id = %correlation_id,
                        status = status.as_u16(),
                        error = %source,
                        "could not read error response body"
                    );
                    String::new()
                }
            };
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        let payload: GenerateContentResponse =
            response.json().await.map_err(LlmError::Transport)?;
        let text = payload.into_text()?;

        debug!(
            event_name = "agent.gemini.response",
            correlation_id = %correlation_id,
            response_chars = text.len(),
            "received generateContent response"
        );
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn from_completion(request: &CompletionRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(request.prompt.clone()) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE.to_string(),
                response_schema: request.response_schema.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate. A candidate without
    /// content yields an empty string.
    fn into_text(self) -> Result<String, LlmError> {
        let candidate = self.candidates.into_iter().next().ok_or(LlmError::MissingContent)?;
        Ok(candidate
            .content
            .map(|content| {
                content.parts.into_iter().filter_map(|part| part.text).collect::<String>()
            })
            .unwrap_or_default())
    }
}
