use sea_orm::{DatabaseConnection, DbErr};

use crate::data::guild::GuildRepository;

/// Feature category owning a command or service. Closed set so an
/// unregistered category is a compile error, not a silent string mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleCategory {
    Moderation,
    Music,
    Ai,
    Tickets,
    Welcome,
    Sticky,
    Utility,
    Config,
    Dev,
}

impl ModuleCategory {
    pub const ALL: [ModuleCategory; 9] = [
        Self::Moderation,
        Self::Music,
        Self::Ai,
        Self::Tickets,
        Self::Welcome,
        Self::Sticky,
        Self::Utility,
        Self::Config,
        Self::Dev,
    ];

    /// Key used in the stored `modules_enabled` map and by the dashboard.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Moderation => "moderation",
            Self::Music => "music",
            Self::Ai => "ai",
            Self::Tickets => "tickets",
            Self::Welcome => "welcome",
            Self::Sticky => "sticky",
            Self::Utility => "utility",
            Self::Config => "config",
            Self::Dev => "dev",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|category| category.key() == key)
    }

    /// Baseline categories that cannot be disabled per guild.
    pub fn always_enabled(&self) -> bool {
        matches!(self, Self::Music | Self::Utility | Self::Dev)
    }
}

impl std::fmt::Display for ModuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-guild feature toggle check.
///
/// A guild with no stored settings, or a settings row without the key,
/// has every toggleable module disabled (fail-closed default).
pub struct ModuleGate<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ModuleGate<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn enabled(
        &self,
        guild_id: u64,
        category: ModuleCategory,
    ) -> Result<bool, DbErr> {
        if category.always_enabled() {
            return Ok(true);
        }

        let Some(guild) = GuildRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?
        else {
            return Ok(false);
        };

        Ok(guild
            .modules_enabled
            .get(category.key())
            .and_then(|value| value.as_bool())
            .unwrap_or(false))
    }
}
