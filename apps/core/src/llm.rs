//! Optional external language-model client.
//!
//! When an endpoint is configured, every user turn is forwarded verbatim
//! with the fixed StudyMate system preamble, and the response text is used
//! as-is, bypassing the rule-based composer entirely. One request per
//! turn: no retry, no streaming. Any failure is mapped by the caller to
//! [`FALLBACK_APOLOGY`].

use std::time::Duration;

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Client;
use tracing::info;
use url::Url;

use crate::error::AppError;
use crate::models::SYSTEM_PREAMBLE;

/// Generic user-facing apology when the external call did not succeed.
pub const FALLBACK_APOLOGY: &str =
    "Sorry, I couldn't reach the assistant service right now. Please try again in a moment.";

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

/// Thin chat-completion client over an OpenAI-style endpoint.
pub struct LlmClient {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    model: String,
}

impl LlmClient {
    /// Build a client for `endpoint` (base URL; the chat-completions path
    /// is appended per request).
    pub fn new(endpoint: &str, api_key: Option<String>, model: String) -> Result<Self, AppError> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            api_key,
            model,
        })
    }

    fn completion_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.as_str().trim_end_matches('/')
        )
    }

    /// Send one completion request for the raw user message.
    pub async fn complete(&self, message: &str) -> Result<String, AppError> {
        info!("Forwarding turn to external model: {}", self.model);

        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PREAMBLE },
                { "role": "user", "content": message }
            ]
        });

        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key {
            let value = format!("Bearer {}", key)
                .parse()
                .map_err(|_| AppError::Config("API key is not a valid header value".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let request_future = self
            .client
            .post(self.completion_url())
            .headers(headers)
            .json(&payload)
            .send();

        let response = tokio::time::timeout(COMPLETION_TIMEOUT, request_future).await??;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Http(format!(
                "Completion request failed with status {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = response.json().await?;
        Ok(json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new(&server.uri(), Some("test-key".to_string()), "test-model".to_string())
            .expect("mock server uri parses")
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;
        let client = client_for(&mock_server).await;

        let body = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Here is your answer." } }
            ]
        });

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let result = client.complete("Explain photosynthesis").await;
        assert_eq!(result.unwrap(), "Here is your answer.");
    }

    #[tokio::test]
    async fn test_complete_server_error() {
        let mock_server = MockServer::start().await;
        let client = client_for(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let result = client.complete("hello").await;
        match result {
            Err(AppError::Http(msg)) => {
                assert!(msg.contains("status 500"));
                assert!(msg.contains("Internal Server Error"));
            }
            other => panic!("Expected AppError::Http, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_complete_malformed_body_degrades_to_empty() {
        let mock_server = MockServer::start().await;
        let client = client_for(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
            .mount(&mock_server)
            .await;

        let result = client.complete("hello").await;
        assert_eq!(result.unwrap(), "");
    }
}
