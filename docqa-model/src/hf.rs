//! Hugging Face chat model using the router's OpenAI-compatible API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::chat::ChatModel;
use crate::error::{ModelError, Result};
use crate::message::Message;

/// The Hugging Face router's OpenAI-compatible chat-completions endpoint.
const HF_CHAT_COMPLETIONS_URL: &str = "https://router.huggingface.co/v1/chat/completions";

/// The default chat model.
pub const DEFAULT_MODEL: &str = "HuggingFaceH4/zephyr-7b-beta";

/// Bound on any single completion request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A [`ChatModel`] backed by the Hugging Face Inference router.
///
/// # Configuration
///
/// - `model` – defaults to `HuggingFaceH4/zephyr-7b-beta`.
/// - `api_key` – a Hugging Face access token, from the constructor.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_model::{HfChatModel, Message};
///
/// let model = HfChatModel::new("hf_...")?;
/// let answer = model.complete(&[Message::user("hello")]).await?;
/// ```
pub struct HfChatModel {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl HfChatModel {
    /// Create a new client with the given API token and the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ModelError::Config("API key must not be empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ModelError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_key, model: DEFAULT_MODEL.into() })
    }

    /// Set the model name (e.g. `mistralai/Mistral-7B-Instruct-v0.3`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

// ── API request/response types ─────────────────────────────────────

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── ChatModel implementation ───────────────────────────────────────

#[async_trait]
impl ChatModel for HfChatModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[Message]) -> Result<String> {
        debug!(provider = "HuggingFace", model = %self.model, message_count = messages.len(), "requesting completion");

        let request_body = CompletionRequest { model: &self.model, messages };

        let response = self
            .client
            .post(HF_CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "HuggingFace", error = %e, "request failed");
                ModelError::Completion {
                    provider: "HuggingFace".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = "HuggingFace", %status, "API error");
            return Err(ModelError::Completion {
                provider: "HuggingFace".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            error!(provider = "HuggingFace", error = %e, "failed to parse response");
            ModelError::Completion {
                provider: "HuggingFace".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        completion.choices.into_iter().next().map(|c| c.message.content).ok_or_else(|| {
            ModelError::Completion {
                provider: "HuggingFace".into(),
                message: "API returned no choices".into(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(matches!(HfChatModel::new(""), Err(ModelError::Config(_))));
    }

    #[test]
    fn request_body_matches_wire_format() {
        let messages =
            vec![Message { role: Role::System, content: "ctx".into() }, Message::user("q")];
        let body = CompletionRequest { model: "m", messages: &messages };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "q");
    }

    #[test]
    fn response_parsing_takes_first_choice() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hi");
    }
}
