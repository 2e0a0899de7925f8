//! Moderation case record. Immutable once created except the `active` flip
//! when a temporary sanction expires.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "moderation_case")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    /// Per-guild sequential case number, unique with `guild_id`.
    pub case_id: i32,
    /// Subject of the sanction.
    pub user_id: String,
    pub moderator_id: String,
    pub kind: CaseKind,
    pub reason: Option<String>,
    /// Sanction duration in milliseconds for temporary bans/mutes.
    pub duration_ms: Option<i64>,
    pub active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum CaseKind {
    #[sea_orm(string_value = "warn")]
    Warn,
    #[sea_orm(string_value = "kick")]
    Kick,
    #[sea_orm(string_value = "mute")]
    Mute,
    #[sea_orm(string_value = "ban")]
    Ban,
}

impl CaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Kick => "kick",
            Self::Mute => "mute",
            Self::Ban => "ban",
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
