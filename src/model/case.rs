use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Moderation case as listed on the dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct CaseDto {
    pub case_id: i32,
    pub user_id: String,
    pub moderator_id: String,
    /// `warn`, `kick`, `mute` or `ban`.
    pub kind: String,
    pub reason: Option<String>,
    pub duration_ms: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl CaseDto {
    pub fn from_model(model: entity::moderation_case::Model) -> Self {
        Self {
            case_id: model.case_id,
            user_id: model.user_id,
            moderator_id: model.moderator_id,
            kind: model.kind.as_str().to_string(),
            reason: model.reason,
            duration_ms: model.duration_ms,
            active: model.active,
            created_at: model.created_at,
        }
    }
}
