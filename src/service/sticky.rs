use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serenity::all::{Colour, CreateEmbed, CreateMessage, Message, MessageId};
use serenity::http::Http;

use crate::{data::sticky::StickyRepository, error::AppError};

/// Stored sticky embed shape, as edited on the dashboard.
#[derive(Debug, Deserialize)]
struct StickyEmbed {
    title: Option<String>,
    description: Option<String>,
    color: Option<String>,
}

/// Keeps a configured message pinned to the bottom of a channel by
/// deleting and reposting it on every new message.
pub struct StickyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StickyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reposts the channel's sticky below the given message, if one is
    /// configured and enabled. Bot messages are skipped by the caller.
    pub async fn handle_message(&self, http: &Http, message: &Message) -> Result<(), AppError> {
        let repo = StickyRepository::new(self.db);

        let Some(sticky) = repo.find_by_channel(message.channel_id.get()).await? else {
            return Ok(());
        };
        if !sticky.enabled {
            return Ok(());
        }

        // Drop the previous repost first; it may already be gone.
        if let Some(old_id) = sticky
            .message_id
            .as_deref()
            .and_then(|id| id.parse::<u64>().ok())
        {
            if let Err(err) = message
                .channel_id
                .delete_message(http, MessageId::new(old_id))
                .await
            {
                tracing::debug!("Old sticky message {} already gone: {}", old_id, err);
            }
        }

        let reposted = message
            .channel_id
            .send_message(http, self.build_message(&sticky)?)
            .await?;

        repo.set_message_id(message.channel_id.get(), reposted.id.get())
            .await?;

        Ok(())
    }

    fn build_message(
        &self,
        sticky: &entity::sticky_message::Model,
    ) -> Result<CreateMessage, AppError> {
        let mut message = CreateMessage::new();
        if !sticky.content.is_empty() {
            message = message.content(sticky.content.clone());
        }
        if let Some(stored) = &sticky.embed {
            let stored: StickyEmbed = serde_json::from_value(stored.clone())?;
            let mut embed = CreateEmbed::new();
            if let Some(title) = stored.title {
                embed = embed.title(title);
            }
            if let Some(description) = stored.description {
                embed = embed.description(description);
            }
            let colour = stored
                .color
                .as_deref()
                .and_then(|hex| u32::from_str_radix(hex.trim_start_matches('#'), 16).ok())
                .unwrap_or(0x5865F2);
            embed = embed.colour(Colour::new(colour));
            message = message.embed(embed);
        }
        Ok(message)
    }
}
