//! OpenAI-compatible chat-completions client for intent classification.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Chat-completions endpoint.
const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Model used for classification. Deterministic-ish settings: low
/// temperature, small responses.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Errors from the language-model client.
///
/// All of these are recovered by the deterministic classifier; none
/// reach the caller of `classify`.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The API key could not be used in an HTTP header.
    #[error("API key is not a valid header value")]
    InvalidKey,

    /// Network failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or error description.
        message: String,
    },

    /// The response carried no choices.
    #[error("Empty completion response")]
    EmptyResponse,

    /// The completion was not the expected JSON shape.
    #[error("Completion parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The model named an operation outside the supported set.
    #[error("Unknown operation from model: {0}")]
    UnknownOperation(String),
}

/// Minimal chat-completions client.
pub struct LlmClient {
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl LlmClient {
    /// Create a client authenticated with an API key.
    pub fn new(api_key: &str) -> Result<Self, LlmError> {
        Self::with_endpoint(OPENAI_ENDPOINT, api_key)
    }

    /// Create a client against a custom endpoint (used by tests and
    /// OpenAI-compatible gateways).
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: &str) -> Result<Self, LlmError> {
        use reqwest::header;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|_| LlmError::InvalidKey)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            endpoint: endpoint.into(),
        })
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Send a single-user-message completion and return the raw content.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.1,
        };

        debug!(model = %self.model, "sending classification request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "no body".to_string());
            return Err(LlmError::Api { status, message });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.1,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert!((json["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"operation_type\":\"bell_state\"}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content,
            "{\"operation_type\":\"bell_state\"}"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = LlmClient::new("sk-secret").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
