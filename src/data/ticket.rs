use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use entity::ticket::TicketStatus;

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a new open ticket under an already-allocated ticket id.
    pub async fn create(
        &self,
        guild_id: u64,
        ticket_id: i32,
        channel_id: u64,
        user_id: u64,
        category: String,
    ) -> Result<entity::ticket::Model, DbErr> {
        entity::ticket::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            ticket_id: ActiveValue::Set(ticket_id),
            channel_id: ActiveValue::Set(channel_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            category: ActiveValue::Set(category),
            status: ActiveValue::Set(TicketStatus::Open),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_ticket_id(
        &self,
        guild_id: u64,
        ticket_id: i32,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket::Column::TicketId.eq(ticket_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_channel(
        &self,
        channel_id: u64,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await
    }

    /// A user's currently open ticket in a guild, if any. Used to block
    /// opening a second one.
    pub async fn find_open_by_user(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket::Column::UserId.eq(user_id.to_string()))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Open))
            .one(self.db)
            .await
    }

    /// Marks a ticket closed. Idempotent: an already-closed ticket is
    /// returned unchanged, keeping its original `closed_at`.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Ticket in closed state
    /// - `Ok(None)` - No such ticket
    pub async fn close(
        &self,
        guild_id: u64,
        ticket_id: i32,
        transcript: Option<String>,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        let Some(ticket) = self.find_by_ticket_id(guild_id, ticket_id).await? else {
            return Ok(None);
        };

        if ticket.status == TicketStatus::Closed {
            return Ok(Some(ticket));
        }

        let mut active: entity::ticket::ActiveModel = ticket.into();
        active.status = ActiveValue::Set(TicketStatus::Closed);
        active.closed_at = ActiveValue::Set(Some(Utc::now()));
        active.transcript = ActiveValue::Set(transcript);
        let updated = active.update(self.db).await?;

        Ok(Some(updated))
    }

    /// Most recent tickets for a guild, newest first.
    pub async fn list_by_guild(
        &self,
        guild_id: u64,
        limit: u64,
    ) -> Result<Vec<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::ticket::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await
    }
}
