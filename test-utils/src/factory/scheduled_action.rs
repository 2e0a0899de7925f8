//! Scheduled action factory.

use chrono::{DateTime, Duration, Utc};
use entity::scheduled_action::ScheduledActionKind;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for scheduled sanction reversals. Defaults to an unban due an
/// hour ago (already due when swept).
pub struct ScheduledActionFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    kind: ScheduledActionKind,
    case_id: i32,
    execute_at: DateTime<Utc>,
}

impl<'a> ScheduledActionFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: impl Into<String>, case_id: i32) -> Self {
        Self {
            db,
            guild_id: guild_id.into(),
            user_id: format!("{}", 700_000_000 + next_id()),
            kind: ScheduledActionKind::Unban,
            case_id,
            execute_at: Utc::now() - Duration::hours(1),
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn kind(mut self, kind: ScheduledActionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn execute_at(mut self, execute_at: DateTime<Utc>) -> Self {
        self.execute_at = execute_at;
        self
    }

    pub async fn build(self) -> Result<entity::scheduled_action::Model, DbErr> {
        entity::scheduled_action::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            kind: ActiveValue::Set(self.kind),
            case_id: ActiveValue::Set(self.case_id),
            execute_at: ActiveValue::Set(self.execute_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
