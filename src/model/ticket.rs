use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Ticket as listed on the dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct TicketDto {
    pub ticket_id: i32,
    pub channel_id: String,
    pub user_id: String,
    pub category: String,
    /// `open` or `closed`.
    pub status: String,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TicketDto {
    pub fn from_model(model: entity::ticket::Model) -> Self {
        Self {
            ticket_id: model.ticket_id,
            channel_id: model.channel_id,
            user_id: model.user_id,
            category: model.category,
            status: model.status.as_str().to_string(),
            closed_at: model.closed_at,
            created_at: model.created_at,
        }
    }
}
