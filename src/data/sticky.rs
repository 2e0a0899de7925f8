use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter,
};

pub struct StickyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StickyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_channel(
        &self,
        channel_id: u64,
    ) -> Result<Option<entity::sticky_message::Model>, DbErr> {
        entity::prelude::StickyMessage::find()
            .filter(entity::sticky_message::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await
    }

    /// Creates or replaces the sticky for a channel, re-enabling it if it
    /// had been disabled.
    pub async fn upsert(
        &self,
        guild_id: u64,
        channel_id: u64,
        content: String,
        embed: Option<serde_json::Value>,
    ) -> Result<entity::sticky_message::Model, DbErr> {
        match self.find_by_channel(channel_id).await? {
            Some(existing) => {
                let mut active: entity::sticky_message::ActiveModel = existing.into();
                active.content = ActiveValue::Set(content);
                active.embed = ActiveValue::Set(embed);
                active.enabled = ActiveValue::Set(true);
                active.update(self.db).await
            }
            None => {
                entity::sticky_message::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    channel_id: ActiveValue::Set(channel_id.to_string()),
                    content: ActiveValue::Set(content),
                    embed: ActiveValue::Set(embed),
                    enabled: ActiveValue::Set(true),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(self.db)
                .await
            }
        }
    }

    /// Records the id of the latest repost so it can be deleted next time.
    pub async fn set_message_id(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<(), DbErr> {
        if let Some(sticky) = self.find_by_channel(channel_id).await? {
            let mut active: entity::sticky_message::ActiveModel = sticky.into();
            active.message_id = ActiveValue::Set(Some(message_id.to_string()));
            active.update(self.db).await?;
        }
        Ok(())
    }

    pub async fn delete(&self, channel_id: u64) -> Result<bool, DbErr> {
        let Some(sticky) = self.find_by_channel(channel_id).await? else {
            return Ok(false);
        };
        sticky.delete(self.db).await?;
        Ok(true)
    }
}
