use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub struct ConversationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ConversationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        user_id: u64,
        channel_id: u64,
    ) -> Result<Option<entity::ai_conversation::Model>, DbErr> {
        entity::prelude::AiConversation::find()
            .filter(entity::ai_conversation::Column::UserId.eq(user_id.to_string()))
            .filter(entity::ai_conversation::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await
    }

    /// Stores the message window and adds `tokens_delta` to the cumulative
    /// counter. The caller is responsible for trimming the window.
    pub async fn save(
        &self,
        user_id: u64,
        channel_id: u64,
        guild_id: Option<u64>,
        messages: serde_json::Value,
        tokens_delta: i32,
        model: &str,
    ) -> Result<entity::ai_conversation::Model, DbErr> {
        match self.find(user_id, channel_id).await? {
            Some(existing) => {
                let tokens = existing.tokens_used + tokens_delta;
                let mut active: entity::ai_conversation::ActiveModel = existing.into();
                active.messages = ActiveValue::Set(messages);
                active.tokens_used = ActiveValue::Set(tokens);
                active.model = ActiveValue::Set(model.to_string());
                active.updated_at = ActiveValue::Set(Utc::now());
                active.update(self.db).await
            }
            None => {
                entity::ai_conversation::ActiveModel {
                    user_id: ActiveValue::Set(user_id.to_string()),
                    channel_id: ActiveValue::Set(channel_id.to_string()),
                    guild_id: ActiveValue::Set(guild_id.map(|id| id.to_string())),
                    messages: ActiveValue::Set(messages),
                    tokens_used: ActiveValue::Set(tokens_delta),
                    model: ActiveValue::Set(model.to_string()),
                    updated_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(self.db)
                .await
            }
        }
    }

    pub async fn clear(&self, user_id: u64, channel_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::AiConversation::delete_many()
            .filter(entity::ai_conversation::Column::UserId.eq(user_id.to_string()))
            .filter(entity::ai_conversation::Column::ChannelId.eq(channel_id.to_string()))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
