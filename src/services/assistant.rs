//! Chat assistant backed by a hosted language model
//!
//! The model is reached through an OpenAI-compatible chat completions
//! endpoint (OpenRouter by default). Only the text-in/text-out contract is
//! used: one system persona, one user prompt, one reply.
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const SYSTEM_PROMPT: &str = "You are ModHub AI, an expert in FiveM mods and gaming. \
Help users find, understand, and work with mods.";
const REFERER: &str = "https://modhub.example";
const APP_TITLE: &str = "ModHub Mods";

/// Text completion backend for the assistant endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Assistant: Send + Sync {
    /// Returns the model's reply to a single prompt
    async fn complete(&self, prompt: &str) -> AppResult<String>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Validates the prompt and forwards it to the backend
pub async fn ask(assistant: &dyn Assistant, prompt: &str) -> AppResult<String> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::InvalidInput("Prompt must not be empty".to_string()));
    }

    match assistant.complete(prompt).await {
        Ok(reply) => Ok(reply),
        Err(e) => {
            tracing::error!(backend = assistant.name(), error = %e, "Assistant request failed");
            Err(e)
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

impl ChatResponse {
    fn into_reply(self) -> AppResult<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::ExternalApi("Chat API returned no choices".to_string()))
    }
}

#[derive(Clone)]
pub struct OpenRouterAssistant {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenRouterAssistant {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        }
    }
}

#[async_trait::async_trait]
impl Assistant for OpenRouterAssistant {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_TITLE)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Chat API returned status {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response.json().await?;
        chat.into_reply()
    }

    fn name(&self) -> &'static str {
        "openrouter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn create_test_assistant() -> OpenRouterAssistant {
        OpenRouterAssistant::new(
            "test_key".to_string(),
            "https://openrouter.ai/api/v1/chat/completions".to_string(),
            "google/gemini-pro".to_string(),
        )
    }

    #[test]
    fn test_request_body_shape() {
        let assistant = create_test_assistant();
        let body = serde_json::to_value(assistant.request_body("best police mods?")).unwrap();
        assert_eq!(body["model"], "google/gemini-pro");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "best police mods?");
    }

    #[test]
    fn test_chat_response_takes_first_choice() {
        let json = r#"{
            "id": "gen-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Try the ELS pack."}},
                {"index": 1, "message": {"role": "assistant", "content": "Second"}}
            ]
        }"#;
        let chat: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(chat.into_reply().unwrap(), "Try the ELS pack.");
    }

    #[test]
    fn test_chat_response_without_choices() {
        let chat: ChatResponse = serde_json::from_str(r#"{"error": "rate limited"}"#).unwrap();
        assert!(matches!(chat.into_reply(), Err(AppError::ExternalApi(_))));
    }

    #[tokio::test]
    async fn test_ask_trims_and_delegates() {
        let mut mock = MockAssistant::new();
        mock.expect_complete()
            .with(eq("hello"))
            .times(1)
            .returning(|_| Ok("hi there".to_string()));

        let reply = ask(&mock, "  hello \n").await.unwrap();
        assert_eq!(reply, "hi there");
    }

    #[test]
    fn test_ask_rejects_blank_prompt() {
        let mut mock = MockAssistant::new();
        mock.expect_complete().never();

        let result = tokio_test::block_on(ask(&mock, "   "));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_ask_propagates_backend_error() {
        let mut mock = MockAssistant::new();
        mock.expect_complete()
            .returning(|_| Err(AppError::ExternalApi("boom".to_string())));
        mock.expect_name().return_const("mock");

        let result = ask(&mock, "hello").await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }
}
