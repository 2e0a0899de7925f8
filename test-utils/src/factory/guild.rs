//! Guild factory for creating test guild settings rows.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for guild settings rows.
///
/// Defaults: unique `guild_id`, prefix `!`, empty module map, empty
/// settings blob, no welcome or ticket configuration.
pub struct GuildFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    prefix: String,
    modules_enabled: serde_json::Value,
    settings: serde_json::Value,
    welcome_channel: Option<String>,
    welcome_message: Option<String>,
}

impl<'a> GuildFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: format!("{}", 100_000_000 + next_id()),
            prefix: "!".to_string(),
            modules_enabled: serde_json::json!({}),
            settings: serde_json::json!({}),
            welcome_channel: None,
            welcome_message: None,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Enables or disables one module key.
    pub fn module(mut self, key: &str, enabled: bool) -> Self {
        if let Some(map) = self.modules_enabled.as_object_mut() {
            map.insert(key.to_string(), serde_json::Value::Bool(enabled));
        }
        self
    }

    pub fn settings(mut self, settings: serde_json::Value) -> Self {
        self.settings = settings;
        self
    }

    pub fn welcome(
        mut self,
        channel: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.welcome_channel = Some(channel.into());
        self.welcome_message = Some(message.into());
        self
    }

    pub async fn build(self) -> Result<entity::guild::Model, DbErr> {
        entity::guild::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            prefix: ActiveValue::Set(self.prefix),
            modules_enabled: ActiveValue::Set(self.modules_enabled),
            settings: ActiveValue::Set(self.settings),
            welcome_channel: ActiveValue::Set(self.welcome_channel),
            welcome_message: ActiveValue::Set(self.welcome_message),
            premium: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
