use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public bot identity and aggregate reach, for the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BotInfoDto {
    pub username: String,
    pub avatar: Option<String>,
    pub id: Option<String>,
    pub guilds: u64,
    pub users: u64,
}

/// Live per-guild counts read from the shard cache.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuildStatsDto {
    pub member_count: u64,
    pub channel_count: u64,
    pub role_count: u64,
}

/// One gateway shard's connection state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShardDto {
    pub id: u32,
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShardStatusDto {
    pub shards: Vec<ShardDto>,
}

/// A registered command as listed on the public commands page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommandInfoDto {
    pub name: String,
    pub description: String,
    pub category: String,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommandListDto {
    pub commands: Vec<CommandInfoDto>,
    pub categories: Vec<String>,
}
