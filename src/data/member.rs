use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub struct MemberRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<entity::member::Model>, DbErr> {
        entity::prelude::Member::find()
            .filter(entity::member::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::member::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await
    }

    /// Bumps the warning tally and appends to the infraction history,
    /// creating the member row on first warn.
    pub async fn record_warning(
        &self,
        guild_id: u64,
        user_id: u64,
        case_id: i32,
        reason: Option<&str>,
    ) -> Result<entity::member::Model, DbErr> {
        let infraction = serde_json::json!({
            "case_id": case_id,
            "kind": "warn",
            "reason": reason,
            "date": Utc::now(),
        });

        match self.find(guild_id, user_id).await? {
            Some(existing) => {
                let mut infractions = existing.infractions.clone();
                if let Some(list) = infractions.as_array_mut() {
                    list.push(infraction);
                } else {
                    infractions = serde_json::json!([infraction]);
                }
                let warnings = existing.warnings + 1;
                let mut active: entity::member::ActiveModel = existing.into();
                active.warnings = ActiveValue::Set(warnings);
                active.infractions = ActiveValue::Set(infractions);
                active.update(self.db).await
            }
            None => {
                entity::member::ActiveModel {
                    user_id: ActiveValue::Set(user_id.to_string()),
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    warnings: ActiveValue::Set(1),
                    infractions: ActiveValue::Set(serde_json::json!([infraction])),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(self.db)
                .await
            }
        }
    }
}
