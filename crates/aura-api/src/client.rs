//! Completion client: the single outbound call to the model provider.
//!
//! The provider speaks the OpenAI-compatible chat-completions shape. Every
//! failure mode (transport error, non-200 status, unreadable body) comes
//! back as a `TransportFailure` whose user message is a plain sentence the
//! normalizer will classify as conversational text.

use aura_core::AuraError;
use serde::{Deserialize, Serialize};

/// Fixed stand-in reply when the provider answers 200 with no content.
pub const EMPTY_REPLY: &str = "Empty response from model provider";

#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl CompletionClient {
    pub fn new(url: String, api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            api_key,
            model,
        }
    }

    /// One completion round-trip: system prompt + user query in, raw reply
    /// text out.
    pub async fn complete(&self, system_prompt: &str, query: &str) -> Result<String, AuraError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: query,
                },
            ],
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AuraError::TransportFailure(format!("Error contacting model provider: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuraError::TransportFailure(format!(
                "Model provider error {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            AuraError::TransportFailure(format!("Model provider sent an unreadable reply: {}", e))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        let content = content.trim();

        if content.is_empty() {
            Ok(EMPTY_REPLY.to_string())
        } else {
            Ok(content.to_string())
        }
    }
}
