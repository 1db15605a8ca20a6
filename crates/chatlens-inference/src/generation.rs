//! Ollama response generation backend.
//!
//! Sends the conversation (role and content only; annotations are never
//! serialized onto the wire) to the Ollama `/api/chat` endpoint with a
//! fixed system instruction and fixed decoding options, and returns the
//! reply text.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use chatlens_core::{defaults, Error, ResponseBackend, Result, Turn};

use crate::config::GenerationConfig;

/// Wall-clock threshold above which a generation is logged as slow.
const SLOW_GENERATION_MS: u64 = 30_000;

/// Ollama chat backend for assistant replies.
pub struct OllamaResponder {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl OllamaResponder {
    /// Create a backend with default settings.
    pub fn new() -> Self {
        Self::with_config(&GenerationConfig::default())
    }

    /// Create a backend for the given configuration.
    pub fn with_config(config: &GenerationConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

impl Default for OllamaResponder {
    fn default() -> Self {
        Self::new()
    }
}

/// Chat API message for `/api/chat`.
#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Fixed decoding options sent with every generation request.
#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    num_predict: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: defaults::GEN_TEMPERATURE,
            top_p: defaults::GEN_TOP_P,
            top_k: defaults::GEN_TOP_K,
            num_predict: defaults::GEN_MAX_TOKENS,
        }
    }
}

/// Request payload for the Ollama `/api/chat` endpoint.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: ChatOptions,
}

/// Response from the Ollama `/api/chat` endpoint.
#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[async_trait]
impl ResponseBackend for OllamaResponder {
    #[instrument(skip(self, history), fields(subsystem = "inference", component = "responder", op = "respond", model = %self.model, history_len = history.len()))]
    async fn respond(&self, history: &[Turn]) -> Result<String> {
        let start = Instant::now();

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: defaults::SYSTEM_INSTRUCTION.to_string(),
        });
        for turn in history {
            messages.push(ChatMessage {
                role: turn.role.as_str().to_string(),
                content: turn.content.clone(),
            });
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
            options: ChatOptions::default(),
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Failed to parse response: {}", e)))?;

        let content = result.message.content;
        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            response_len = content.len(),
            duration_ms = elapsed,
            "Generation complete"
        );
        if elapsed > SLOW_GENERATION_MS {
            warn!(duration_ms = elapsed, slow = true, "Slow generation operation");
        }
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn responder_for(server: &MockServer) -> OllamaResponder {
        OllamaResponder::with_config(&GenerationConfig {
            base_url: server.uri(),
            model: "test-model".to_string(),
            timeout_secs: 5,
        })
    }

    #[tokio::test]
    async fn test_respond_returns_reply_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {"role": "assistant", "content": "Hello there!"}
            })))
            .mount(&server)
            .await;

        let responder = responder_for(&server);
        let reply = responder.respond(&[Turn::user("hi")]).await.unwrap();
        assert_eq!(reply, "Hello there!");
    }

    #[tokio::test]
    async fn test_respond_sends_system_instruction_and_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({
                "model": "test-model",
                "messages": [
                    {"role": "system", "content": defaults::SYSTEM_INSTRUCTION},
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello"},
                    {"role": "user", "content": "how are you?"}
                ],
                "stream": false,
                "options": {
                    "temperature": 0.7,
                    "top_p": 0.95,
                    "top_k": 40,
                    "num_predict": 1024
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {"role": "assistant", "content": "fine"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let responder = responder_for(&server);
        let history = vec![
            Turn::user("hi"),
            Turn::assistant("hello"),
            Turn::user("how are you?"),
        ];
        responder.respond(&history).await.unwrap();
    }

    #[tokio::test]
    async fn test_respond_strips_annotations_from_wire() {
        // The request body carries role and content only, even when a
        // turn holds an annotation.
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({
                "model": "test-model",
                "messages": [
                    {"role": "system", "content": defaults::SYSTEM_INSTRUCTION},
                    {"role": "user", "content": "tagged question"}
                ],
                "stream": false,
                "options": {
                    "temperature": 0.7,
                    "top_p": 0.95,
                    "top_k": 40,
                    "num_predict": 1024
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {"role": "assistant", "content": "ok"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut turn = Turn::user("tagged question");
        turn.annotation = Some(chatlens_core::Annotation::clean(
            "expanded",
            chatlens_core::Topic::new("Tech", "AI"),
        ));

        let responder = responder_for(&server);
        responder.respond(&[turn]).await.unwrap();
    }

    #[tokio::test]
    async fn test_respond_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let responder = responder_for(&server);
        let err = responder.respond(&[Turn::user("hi")]).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("overloaded"));
    }

    #[tokio::test]
    async fn test_respond_connection_failure() {
        let responder = OllamaResponder::with_config(&GenerationConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            model: "test-model".to_string(),
            timeout_secs: 1,
        });

        let err = responder.respond(&[Turn::user("hi")]).await.unwrap_err();
        assert!(err.to_string().contains("Generation error"));
    }

    #[test]
    fn test_model_name() {
        let responder = OllamaResponder::with_config(&GenerationConfig {
            base_url: "http://127.0.0.1:11434".to_string(),
            model: "qwen3:8b".to_string(),
            timeout_secs: 5,
        });
        assert_eq!(responder.model_name(), "qwen3:8b");
    }
}
