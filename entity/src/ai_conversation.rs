//! AI chat conversation window, keyed by (user, channel).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_conversation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub channel_id: String,
    pub guild_id: Option<String>,
    /// Role-tagged message window, trimmed to the most recent entries on
    /// every save.
    pub messages: Json,
    /// Cumulative token usage across the conversation's lifetime.
    pub tokens_used: i32,
    pub model: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
