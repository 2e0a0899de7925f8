use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use entity::scheduled_action::ScheduledActionKind;

/// Durable schedule of sanction reversals. Unlike an in-process timer, rows
/// written here survive restarts; the scheduler sweep executes whatever is
/// due, whenever the process happens to be running.
pub struct ScheduledActionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ScheduledActionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn schedule(
        &self,
        guild_id: u64,
        user_id: u64,
        kind: ScheduledActionKind,
        case_id: i32,
        execute_at: DateTime<Utc>,
    ) -> Result<entity::scheduled_action::Model, DbErr> {
        entity::scheduled_action::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            kind: ActiveValue::Set(kind),
            case_id: ActiveValue::Set(case_id),
            execute_at: ActiveValue::Set(execute_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Every action whose execution time has passed, oldest first.
    pub async fn due(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<entity::scheduled_action::Model>, DbErr> {
        entity::prelude::ScheduledAction::find()
            .filter(entity::scheduled_action::Column::ExecuteAt.lte(now))
            .order_by_asc(entity::scheduled_action::Column::ExecuteAt)
            .all(self.db)
            .await
    }

    /// Removes an executed (or abandoned) action.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::ScheduledAction::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}
