//! Ticket factory.

use chrono::Utc;
use entity::ticket::TicketStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for ticket rows. Defaults to an open `general` ticket with a
/// unique channel and opener.
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    ticket_id: i32,
    channel_id: String,
    user_id: String,
    category: String,
    status: TicketStatus,
    closed_at: Option<chrono::DateTime<Utc>>,
}

impl<'a> TicketFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: impl Into<String>, ticket_id: i32) -> Self {
        Self {
            db,
            guild_id: guild_id.into(),
            ticket_id,
            channel_id: format!("{}", 400_000_000 + next_id()),
            user_id: format!("{}", 500_000_000 + next_id()),
            category: "general".to_string(),
            status: TicketStatus::Open,
            closed_at: None,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn closed(mut self) -> Self {
        self.status = TicketStatus::Closed;
        self.closed_at = Some(Utc::now());
        self
    }

    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        entity::ticket::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            ticket_id: ActiveValue::Set(self.ticket_id),
            channel_id: ActiveValue::Set(self.channel_id),
            user_id: ActiveValue::Set(self.user_id),
            category: ActiveValue::Set(self.category),
            status: ActiveValue::Set(self.status),
            closed_at: ActiveValue::Set(self.closed_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
