//! Moderation case factory.

use chrono::Utc;
use entity::moderation_case::CaseKind;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for case rows. Defaults to an active warn with a unique subject.
pub struct CaseFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    case_id: i32,
    user_id: String,
    moderator_id: String,
    kind: CaseKind,
    reason: Option<String>,
    duration_ms: Option<i64>,
    active: bool,
}

impl<'a> CaseFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: impl Into<String>, case_id: i32) -> Self {
        Self {
            db,
            guild_id: guild_id.into(),
            case_id,
            user_id: format!("{}", 200_000_000 + next_id()),
            moderator_id: format!("{}", 300_000_000 + next_id()),
            kind: CaseKind::Warn,
            reason: Some("Test case".to_string()),
            duration_ms: None,
            active: true,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn kind(mut self, kind: CaseKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    pub fn duration_ms(mut self, duration_ms: Option<i64>) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub async fn build(self) -> Result<entity::moderation_case::Model, DbErr> {
        entity::moderation_case::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            case_id: ActiveValue::Set(self.case_id),
            user_id: ActiveValue::Set(self.user_id),
            moderator_id: ActiveValue::Set(self.moderator_id),
            kind: ActiveValue::Set(self.kind),
            reason: ActiveValue::Set(self.reason),
            duration_ms: ActiveValue::Set(self.duration_ms),
            active: ActiveValue::Set(self.active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
