use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use entity::moderation_case::CaseKind;

pub struct CaseRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CaseRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a new case under an already-allocated per-guild case id.
    ///
    /// # Arguments
    /// - `case_id`: id from `CounterRepository::next_id`
    /// - `duration_ms`: sanction duration for temporary bans/mutes
    ///
    /// # Returns
    /// - `Ok(Model)`: The created case
    /// - `Err(DbErr)`: Database error, including unique-key violation if the
    ///   same (guild, case) pair is inserted twice
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        guild_id: u64,
        case_id: i32,
        user_id: u64,
        moderator_id: u64,
        kind: CaseKind,
        reason: Option<String>,
        duration_ms: Option<i64>,
    ) -> Result<entity::moderation_case::Model, DbErr> {
        entity::moderation_case::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            case_id: ActiveValue::Set(case_id),
            user_id: ActiveValue::Set(user_id.to_string()),
            moderator_id: ActiveValue::Set(moderator_id.to_string()),
            kind: ActiveValue::Set(kind),
            reason: ActiveValue::Set(reason),
            duration_ms: ActiveValue::Set(duration_ms),
            active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_case_id(
        &self,
        guild_id: u64,
        case_id: i32,
    ) -> Result<Option<entity::moderation_case::Model>, DbErr> {
        entity::prelude::ModerationCase::find()
            .filter(entity::moderation_case::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::moderation_case::Column::CaseId.eq(case_id))
            .one(self.db)
            .await
    }

    /// Most recent cases for a guild, newest first.
    pub async fn list_by_guild(
        &self,
        guild_id: u64,
        limit: u64,
    ) -> Result<Vec<entity::moderation_case::Model>, DbErr> {
        entity::prelude::ModerationCase::find()
            .filter(entity::moderation_case::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::moderation_case::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// All cases recorded against a user in a guild, newest first.
    pub async fn list_by_user(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Vec<entity::moderation_case::Model>, DbErr> {
        entity::prelude::ModerationCase::find()
            .filter(entity::moderation_case::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::moderation_case::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(entity::moderation_case::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Flips a case's `active` flag off, e.g. when a temporary sanction
    /// expires. Missing cases are a no-op.
    pub async fn deactivate(&self, guild_id: u64, case_id: i32) -> Result<(), DbErr> {
        if let Some(case) = self.find_by_case_id(guild_id, case_id).await? {
            let mut active: entity::moderation_case::ActiveModel = case.into();
            active.active = ActiveValue::Set(false);
            active.update(self.db).await?;
        }
        Ok(())
    }
}
