//! Sticky message factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for sticky message rows. Defaults to an enabled text sticky in a
/// unique channel.
pub struct StickyFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    channel_id: String,
    content: String,
    enabled: bool,
    message_id: Option<String>,
}

impl<'a> StickyFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: impl Into<String>) -> Self {
        Self {
            db,
            guild_id: guild_id.into(),
            channel_id: format!("{}", 600_000_000 + next_id()),
            content: "Please read the pinned rules.".to_string(),
            enabled: true,
            message_id: None,
        }
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub async fn build(self) -> Result<entity::sticky_message::Model, DbErr> {
        entity::sticky_message::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            content: ActiveValue::Set(self.content),
            message_id: ActiveValue::Set(self.message_id),
            enabled: ActiveValue::Set(self.enabled),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
