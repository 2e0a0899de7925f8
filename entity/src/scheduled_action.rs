//! Durable timer row for temporary sanctions. Rows are written when a timed
//! ban/mute is issued and deleted by the scheduler sweep once executed, so
//! pending reversals survive process restarts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scheduled_action")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub user_id: String,
    pub kind: ScheduledActionKind,
    /// Per-guild case number of the sanction this reverses.
    pub case_id: i32,
    pub execute_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ScheduledActionKind {
    #[sea_orm(string_value = "unban")]
    Unban,
    #[sea_orm(string_value = "unmute")]
    Unmute,
}

impl ScheduledActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unban => "unban",
            Self::Unmute => "unmute",
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
