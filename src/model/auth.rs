use serde::{Deserialize, Serialize};
use serenity::all::Permissions;
use utoipa::ToSchema;

/// OAuth user cached in the session after login, including the guild list
/// used for dashboard authorization checks.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: u64,
    pub username: String,
    pub avatar: Option<String>,
    pub guilds: Vec<SessionGuild>,
}

/// One entry of the user's guild list as returned by Discord's
/// `/users/@me/guilds`, reduced to what authorization needs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionGuild {
    pub id: u64,
    pub name: String,
    pub owner: bool,
    /// Raw permission bits for the user in this guild.
    pub permissions: u64,
}

impl SessionUser {
    /// Whether the user can manage the given guild (MANAGE_GUILD, 0x20).
    pub fn manages(&self, guild_id: u64) -> bool {
        self.guilds.iter().any(|guild| {
            guild.id == guild_id
                && Permissions::from_bits_truncate(guild.permissions)
                    .contains(Permissions::MANAGE_GUILD)
        })
    }
}
