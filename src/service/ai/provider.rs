//! Thin HTTP clients for chat-completion providers. Model inference is an
//! external collaborator; these clients only shape requests and surface
//! errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    service::ai::{ChatMessage, ChatRole},
};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_TEMPERATURE: f32 = 0.7;

/// A completed chat turn.
pub struct ChatCompletion {
    pub content: String,
    /// Total tokens charged for the turn; 0 when the provider omits usage.
    pub tokens_used: i32,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn model(&self) -> &str;

    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<ChatCompletion, AppError>;
}

fn role_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    }
}

/// Anthropic Messages API client.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct AnthropicUsage {
    input_tokens: i32,
    output_tokens: i32,
}

impl AnthropicProvider {
    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<ChatCompletion, AppError> {
        let request = AnthropicRequest {
            model: &self.model,
            max_tokens,
            system,
            messages: messages
                .iter()
                .map(|message| AnthropicMessage {
                    role: role_str(message.role),
                    content: &message.content,
                })
                .collect(),
        };

        tracing::debug!(model = %self.model, "sending request to Anthropic API");
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Anthropic API returned error");
            return Err(AppError::InternalError(format!(
                "Anthropic API error {}: {}",
                status, body
            )));
        }

        let response: AnthropicResponse = response.json().await?;
        let content = response
            .content
            .first()
            .map(|block| block.text.clone())
            .unwrap_or_default();

        Ok(ChatCompletion {
            content,
            tokens_used: response.usage.input_tokens + response.usage.output_tokens,
        })
    }
}

/// OpenAI chat-completions client.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct OpenAiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiChoiceMessage,
}

#[derive(Deserialize)]
struct OpenAiChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct OpenAiUsage {
    total_tokens: i32,
}

impl OpenAiProvider {
    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<ChatCompletion, AppError> {
        let mut request_messages = vec![OpenAiMessage {
            role: "system",
            content: system,
        }];
        request_messages.extend(messages.iter().map(|message| OpenAiMessage {
            role: role_str(message.role),
            content: &message.content,
        }));

        let request = OpenAiRequest {
            model: &self.model,
            messages: request_messages,
            max_tokens,
            temperature: OPENAI_TEMPERATURE,
        };

        tracing::debug!(model = %self.model, "sending request to OpenAI API");
        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "OpenAI API returned error");
            return Err(AppError::InternalError(format!(
                "OpenAI API error {}: {}",
                status, body
            )));
        }

        let response: OpenAiResponse = response.json().await?;
        let content = response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default();

        Ok(ChatCompletion {
            content,
            tokens_used: response.usage.map(|usage| usage.total_tokens).unwrap_or(0),
        })
    }
}
