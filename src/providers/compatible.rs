//! Generic OpenAI-compatible provider.
//! Groq and OpenAI both speak the same `/chat/completions` format, so one
//! implementation serves both.

use super::scrub::sanitize_api_error;
use super::traits::Provider;
use crate::error::ProviderError;
use crate::prompt::PromptMessage;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

pub struct OpenAiCompatibleProvider {
    name: String,
    base_url: String,
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    /// Pre-computed chat completions URL (avoids `format!` per request).
    cached_chat_url: String,
    client: Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(name: &str, base_url: &str, api_key: Option<&str>, client: Client) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let cached_chat_url = if base_url.ends_with("chat/completions") {
            base_url.clone()
        } else {
            format!("{base_url}/chat/completions")
        };

        Self {
            name: name.to_string(),
            base_url,
            cached_auth_header: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| format!("Bearer {k}")),
            cached_chat_url,
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_completions_url(&self) -> &str {
        &self.cached_chat_url
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: ResponseMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// First choice's text, or empty when the provider sent nothing usable.
fn extract_chat_text(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default()
}

impl OpenAiCompatibleProvider {
    async fn call_chat_completions(
        &self,
        messages: &[PromptMessage],
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<String> {
        let Some(auth_header) = self.cached_auth_header.as_deref() else {
            return Err(ProviderError::MissingApiKey {
                provider: self.name.clone(),
            }
            .into());
        };

        let request = ChatRequest {
            model,
            messages: messages
                .iter()
                .map(|m| Message {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature,
        };

        let response = self
            .client
            .post(self.chat_completions_url())
            .header("Authorization", auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|error| ProviderError::Request {
                provider: self.name.clone(),
                message: sanitize_api_error(&error.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
            return Err(ProviderError::Api {
                provider: self.name.clone(),
                status: status.as_u16(),
                message: sanitize_api_error(&body),
            }
            .into());
        }

        let chat_response: ChatResponse =
            response.json().await.map_err(|error| ProviderError::Decode {
                provider: self.name.clone(),
                message: sanitize_api_error(&error.to_string()),
            })?;

        Ok(extract_chat_text(chat_response))
    }
}

impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete<'a>(
        &'a self,
        messages: &'a [PromptMessage],
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(self.call_chat_completions(messages, model, temperature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::assemble;
    use crate::providers::http_client::build_provider_client_with_timeout;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_provider(url: &str, key: Option<&str>) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(
            "MockProvider",
            url,
            key,
            build_provider_client_with_timeout(5),
        )
    }

    #[test]
    fn creates_with_key() {
        let p = make_provider("https://api.groq.com/openai/v1/", Some("gsk-key"));
        assert_eq!(p.base_url(), "https://api.groq.com/openai/v1");
        assert_eq!(p.cached_auth_header.as_deref(), Some("Bearer gsk-key"));
        assert_eq!(
            p.chat_completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn full_endpoint_url_is_kept() {
        let p = make_provider("https://example.com/v1/chat/completions", Some("k"));
        assert_eq!(
            p.chat_completions_url(),
            "https://example.com/v1/chat/completions"
        );
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let p = make_provider("https://example.com", Some("   "));
        assert!(p.cached_auth_header.is_none());
    }

    #[test]
    fn missing_choices_extract_as_empty() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(extract_chat_text(response), "");

        let response: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert_eq!(extract_chat_text(response), "");
    }

    #[tokio::test]
    async fn missing_key_fails_without_request() {
        let p = make_provider("http://127.0.0.1:9", None);
        let messages = assemble("sys", "", "oi");
        let err = p.complete(&messages, "m", 0.7).await.unwrap_err();
        assert!(err.to_string().contains("API key not set"));
    }

    #[tokio::test]
    async fn sends_messages_in_order_and_returns_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama-3.3-70b-versatile",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "Histórico resumido:\n"},
                    {"role": "user", "content": "Pergunta atual: oi"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Olá!"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let p = make_provider(&server.uri(), Some("test-key"));
        let messages = assemble("sys", "", "oi");
        let text = p
            .complete(&messages, "llama-3.3-70b-versatile", 0.7)
            .await
            .unwrap();
        assert_eq!(text, "Olá!");
    }

    #[tokio::test]
    async fn api_error_is_sanitized() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                "{\"error\":\"invalid credentials api_key=raw-secret-123\"}",
            ))
            .mount(&server)
            .await;

        let p = make_provider(&server.uri(), Some("key"));
        let messages = assemble("sys", "", "oi");
        let err = p.complete(&messages, "m", 0.7).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(!text.contains("raw-secret-123"));
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::Api { status: 401, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let p = make_provider(&server.uri(), Some("key"));
        let messages = assemble("sys", "", "oi");
        let err = p.complete(&messages, "m", 0.7).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::Decode { .. })
        ));
    }
}
