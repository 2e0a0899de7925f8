//! Discord bot integration: client construction, the gateway event handler
//! and the command implementations.
//!
//! The bot runs in its own tokio task next to the HTTP server; its REST
//! client, cache and shard manager are shared with the dashboard through
//! `AppState`.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - guild lifecycle events
//! - `GUILD_MESSAGES` + `MESSAGE_CONTENT` - sticky messages and the legacy
//!   prefix command surface (privileged intent)
//! - `GUILD_MEMBERS` - welcome messages (privileged intent)

pub mod commands;
pub mod handler;
pub mod start;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::prelude::TypeMapKey;

use crate::{dispatch::registry::CommandRegistry, realtime::Broadcaster, service::ai::AiService};

/// Shared dependencies handed to every command handler invocation.
/// Constructed once at startup; commands build the per-call services
/// (`ModerationService::new(&services.db, ..)` etc.) from these.
pub struct Services {
    pub db: DatabaseConnection,
    pub broadcaster: Broadcaster,
    pub ai: AiService,
    pub dashboard_url: String,
}

/// TypeMap key exposing the command registry to handlers that need to
/// enumerate commands (help).
pub struct RegistryKey;

impl TypeMapKey for RegistryKey {
    type Value = Arc<CommandRegistry>;
}
