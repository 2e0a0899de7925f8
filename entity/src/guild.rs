//! Per-guild configuration row, created on first write.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guild")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Discord guild snowflake, stored as a string.
    #[sea_orm(unique)]
    pub guild_id: String,
    /// Prefix for legacy text commands.
    pub prefix: String,
    /// Module key -> enabled flag. Missing keys are treated as disabled.
    pub modules_enabled: Json,
    /// Free-form settings blob (ticket types, support roles, panel ids).
    pub settings: Json,
    pub welcome_channel: Option<String>,
    pub welcome_message: Option<String>,
    pub welcome_embed: Option<Json>,
    /// Parent channel (category) that ticket channels are created under.
    pub ticket_category: Option<String>,
    pub ticket_message: Option<String>,
    pub premium: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
