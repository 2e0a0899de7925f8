//! AI chat: per-(user, channel) conversation bookkeeping over a
//! provider-agnostic completion seam. Providers are thin HTTP clients; the
//! window trimming and token accounting live here.

pub mod provider;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::{data::conversation::ConversationRepository, error::AppError};

use provider::ChatProvider;

const SYSTEM_PROMPT: &str = "You are a helpful Discord bot assistant.";
const MAX_TOKENS: u32 = 2000;

/// Stored windows longer than this are considered stale and restarted.
const HISTORY_REUSE_LIMIT: usize = 20;
/// Number of messages kept when saving.
const HISTORY_KEEP: usize = 10;

/// One role-tagged message in a conversation window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone)]
pub struct AiService {
    db: DatabaseConnection,
    provider: Option<Arc<dyn ChatProvider>>,
}

impl AiService {
    pub fn new(db: DatabaseConnection, provider: Option<Arc<dyn ChatProvider>>) -> Self {
        Self { db, provider }
    }

    pub fn available(&self) -> bool {
        self.provider.is_some()
    }

    /// Runs one chat turn: load the window, append the user message, call
    /// the provider, append the reply, save the trimmed window.
    pub async fn chat(
        &self,
        user_id: u64,
        channel_id: u64,
        guild_id: Option<u64>,
        content: &str,
    ) -> Result<String, AppError> {
        let Some(provider) = &self.provider else {
            return Err(AppError::BadRequest(
                "No AI provider is configured.".to_string(),
            ));
        };

        let repo = ConversationRepository::new(&self.db);
        let mut messages = match repo.find(user_id, channel_id).await? {
            Some(stored) => {
                let window: Vec<ChatMessage> = serde_json::from_value(stored.messages)?;
                if window.len() < HISTORY_REUSE_LIMIT {
                    window
                } else {
                    Vec::new()
                }
            }
            None => Vec::new(),
        };

        messages.push(ChatMessage {
            role: ChatRole::User,
            content: content.to_string(),
        });

        let completion = provider
            .complete(SYSTEM_PROMPT, &messages, MAX_TOKENS)
            .await?;

        messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: completion.content.clone(),
        });

        let trimmed = trim_window(&messages);
        repo.save(
            user_id,
            channel_id,
            guild_id,
            serde_json::to_value(trimmed)?,
            completion.tokens_used,
            provider.model(),
        )
        .await?;

        Ok(completion.content)
    }

    /// Forgets the conversation for (user, channel).
    pub async fn clear(&self, user_id: u64, channel_id: u64) -> Result<bool, AppError> {
        let removed = ConversationRepository::new(&self.db)
            .clear(user_id, channel_id)
            .await?;
        Ok(removed > 0)
    }
}

/// Keeps only the most recent `HISTORY_KEEP` messages.
pub fn trim_window(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    let start = messages.len().saturating_sub(HISTORY_KEEP);
    messages[start..].to_vec()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trims_to_last_ten() {
        let messages: Vec<ChatMessage> = (0..14)
            .map(|i| ChatMessage {
                role: if i % 2 == 0 {
                    ChatRole::User
                } else {
                    ChatRole::Assistant
                },
                content: format!("message {}", i),
            })
            .collect();

        let trimmed = trim_window(&messages);
        assert_eq!(trimmed.len(), 10);
        assert_eq!(trimmed[0].content, "message 4");
        assert_eq!(trimmed[9].content, "message 13");
    }

    #[test]
    fn short_windows_are_untouched() {
        let messages = vec![ChatMessage {
            role: ChatRole::User,
            content: "hi".to_string(),
        }];
        assert_eq!(trim_window(&messages), messages);
    }
}
