use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Guild settings as served to and edited by the dashboard.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GuildSettingsDto {
    pub guild_id: String,
    pub prefix: String,
    #[schema(value_type = Object)]
    pub modules_enabled: serde_json::Value,
    #[schema(value_type = Object)]
    pub settings: serde_json::Value,
    pub welcome_channel: Option<String>,
    pub welcome_message: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub welcome_embed: Option<serde_json::Value>,
    pub ticket_category: Option<String>,
    pub ticket_message: Option<String>,
    pub premium: bool,
}

impl GuildSettingsDto {
    pub fn from_model(model: entity::guild::Model) -> Self {
        Self {
            guild_id: model.guild_id,
            prefix: model.prefix,
            modules_enabled: model.modules_enabled,
            settings: model.settings,
            welcome_channel: model.welcome_channel,
            welcome_message: model.welcome_message,
            welcome_embed: model.welcome_embed,
            ticket_category: model.ticket_category,
            ticket_message: model.ticket_message,
            premium: model.premium,
        }
    }

    /// Empty settings body served for guilds with no stored row yet.
    pub fn empty(guild_id: u64) -> Self {
        Self {
            guild_id: guild_id.to_string(),
            prefix: String::new(),
            modules_enabled: serde_json::json!({}),
            settings: serde_json::json!({}),
            welcome_channel: None,
            welcome_message: None,
            welcome_embed: None,
            ticket_category: None,
            ticket_message: None,
            premium: false,
        }
    }
}

/// Payload for updating basic guild settings.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateGuildSettingsDto {
    pub prefix: Option<String>,
}

/// Payload for toggling a feature module.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ModuleToggleDto {
    pub module: String,
    pub enabled: bool,
}

/// Payload for the welcome configuration form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct WelcomeSettingsDto {
    pub welcome_channel: Option<String>,
    /// `text` or `embed`; decides which of the two bodies is stored.
    pub mode: String,
    pub welcome_message: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub welcome_embed: Option<serde_json::Value>,
}

/// Payload for creating or replacing a channel's sticky message.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StickySettingsDto {
    pub channel_id: String,
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub embed: Option<serde_json::Value>,
}

/// Payload for the ticket configuration form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TicketSettingsDto {
    pub ticket_category: Option<String>,
    pub ticket_message: Option<String>,
    pub support_roles: Option<Vec<String>>,
    pub ticket_types: Option<Vec<TicketTypeDto>>,
}

/// A ticket type offered on the ticket panel.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketTypeDto {
    pub label: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
}
