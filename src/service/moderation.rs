use std::time::Duration;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{
    Colour, CreateEmbed, CreateMessage, EditMember, GuildId, Timestamp, User,
};
use serenity::http::Http;

use entity::moderation_case::CaseKind;
use entity::scheduled_action::ScheduledActionKind;

use crate::{
    data::{
        case::CaseRepository, counter::CounterRepository, member::MemberRepository,
        scheduled_action::ScheduledActionRepository,
    },
    error::AppError,
    realtime::{Broadcaster, GuildUpdateKind},
    service::SecondaryResult,
    util::duration::format_duration,
};

use entity::guild_counter::CounterScope;

/// Result of a sanction: the persisted case plus the delivery status of the
/// subject's DM notification. The DM never fails the sanction itself.
pub struct SanctionOutcome {
    pub case: entity::moderation_case::Model,
    pub dm: SecondaryResult,
}

/// Applies sanctions and records the matching case rows.
///
/// Ordering contract: the case row is persisted first, then the subject is
/// notified, then the external action runs. An external failure therefore
/// leaves the case row in place and surfaces as an error to the caller.
pub struct ModerationService<'a> {
    db: &'a DatabaseConnection,
    broadcaster: &'a Broadcaster,
}

impl<'a> ModerationService<'a> {
    pub fn new(db: &'a DatabaseConnection, broadcaster: &'a Broadcaster) -> Self {
        Self { db, broadcaster }
    }

    /// Records a warning case and bumps the member's warning tally.
    pub async fn warn(
        &self,
        http: &Http,
        guild_id: GuildId,
        guild_name: &str,
        user: &User,
        moderator: &User,
        reason: Option<String>,
    ) -> Result<SanctionOutcome, AppError> {
        let case = self
            .create_case(guild_id, user, moderator, CaseKind::Warn, reason.clone(), None)
            .await?;

        MemberRepository::new(self.db)
            .record_warning(guild_id.get(), user.id.get(), case.case_id, reason.as_deref())
            .await?;

        let dm = self
            .notify_subject(http, user, guild_name, &case, "You have been warned in")
            .await;

        Ok(SanctionOutcome { case, dm })
    }

    /// Records a kick case and removes the member.
    pub async fn kick(
        &self,
        http: &Http,
        guild_id: GuildId,
        guild_name: &str,
        user: &User,
        moderator: &User,
        reason: Option<String>,
    ) -> Result<SanctionOutcome, AppError> {
        let case = self
            .create_case(guild_id, user, moderator, CaseKind::Kick, reason.clone(), None)
            .await?;

        // Notify before the kick; afterwards the DM channel may be gone.
        let dm = self
            .notify_subject(http, user, guild_name, &case, "You have been kicked from")
            .await;

        guild_id
            .kick_with_reason(http, user.id, reason.as_deref().unwrap_or(""))
            .await?;

        Ok(SanctionOutcome { case, dm })
    }

    /// Records a ban case, bans the user, and for temporary bans schedules
    /// the durable unban.
    pub async fn ban(
        &self,
        http: &Http,
        guild_id: GuildId,
        guild_name: &str,
        user: &User,
        moderator: &User,
        reason: Option<String>,
        duration: Option<Duration>,
    ) -> Result<SanctionOutcome, AppError> {
        let duration_ms = duration.map(|d| d.as_millis() as i64);
        let case = self
            .create_case(
                guild_id,
                user,
                moderator,
                CaseKind::Ban,
                reason.clone(),
                duration_ms,
            )
            .await?;

        let dm = self
            .notify_subject(http, user, guild_name, &case, "You have been banned from")
            .await;

        guild_id
            .ban_with_reason(http, user.id, 0, reason.as_deref().unwrap_or(""))
            .await?;

        if let Some(duration) = duration {
            self.schedule_reversal(guild_id, user, ScheduledActionKind::Unban, &case, duration)
                .await?;
        }

        Ok(SanctionOutcome { case, dm })
    }

    /// Records a mute case and times the member out for the duration.
    pub async fn mute(
        &self,
        http: &Http,
        guild_id: GuildId,
        guild_name: &str,
        user: &User,
        moderator: &User,
        reason: Option<String>,
        duration: Duration,
    ) -> Result<SanctionOutcome, AppError> {
        let case = self
            .create_case(
                guild_id,
                user,
                moderator,
                CaseKind::Mute,
                reason.clone(),
                Some(duration.as_millis() as i64),
            )
            .await?;

        let dm = self
            .notify_subject(http, user, guild_name, &case, "You have been muted in")
            .await;

        let until = Utc::now()
            + chrono::Duration::from_std(duration)
                .map_err(|_| AppError::BadRequest("Duration out of range".to_string()))?;
        let until = Timestamp::from_unix_timestamp(until.timestamp())
            .map_err(|_| AppError::BadRequest("Duration out of range".to_string()))?;

        guild_id
            .edit_member(
                http,
                user.id,
                EditMember::new().disable_communication_until_datetime(until),
            )
            .await?;

        self.schedule_reversal(guild_id, user, ScheduledActionKind::Unmute, &case, duration)
            .await?;

        Ok(SanctionOutcome { case, dm })
    }

    /// Lifts a ban and deactivates the user's active ban cases.
    pub async fn unban(
        &self,
        http: &Http,
        guild_id: GuildId,
        user_id: u64,
    ) -> Result<(), AppError> {
        guild_id.unban(http, user_id).await?;
        self.deactivate_cases(guild_id.get(), user_id, CaseKind::Ban)
            .await?;
        Ok(())
    }

    /// Clears a timeout and deactivates the user's active mute cases.
    pub async fn unmute(
        &self,
        http: &Http,
        guild_id: GuildId,
        user_id: u64,
    ) -> Result<(), AppError> {
        guild_id
            .edit_member(http, user_id, EditMember::new().enable_communication())
            .await?;
        self.deactivate_cases(guild_id.get(), user_id, CaseKind::Mute)
            .await?;
        Ok(())
    }

    pub async fn cases_for_user(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Vec<entity::moderation_case::Model>, AppError> {
        Ok(CaseRepository::new(self.db)
            .list_by_user(guild_id, user_id)
            .await?)
    }

    /// Allocates the next case id and persists the row.
    async fn create_case(
        &self,
        guild_id: GuildId,
        user: &User,
        moderator: &User,
        kind: CaseKind,
        reason: Option<String>,
        duration_ms: Option<i64>,
    ) -> Result<entity::moderation_case::Model, AppError> {
        let case_id = CounterRepository::new(self.db)
            .next_id(guild_id.get(), CounterScope::Case)
            .await?;

        let case = CaseRepository::new(self.db)
            .create(
                guild_id.get(),
                case_id,
                user.id.get(),
                moderator.id.get(),
                kind,
                reason,
                duration_ms,
            )
            .await?;

        self.broadcaster
            .guild_update(guild_id.get(), GuildUpdateKind::CaseCreated);

        Ok(case)
    }

    async fn schedule_reversal(
        &self,
        guild_id: GuildId,
        user: &User,
        kind: ScheduledActionKind,
        case: &entity::moderation_case::Model,
        duration: Duration,
    ) -> Result<(), AppError> {
        let execute_at = Utc::now()
            + chrono::Duration::from_std(duration)
                .map_err(|_| AppError::BadRequest("Duration out of range".to_string()))?;

        ScheduledActionRepository::new(self.db)
            .schedule(guild_id.get(), user.id.get(), kind, case.case_id, execute_at)
            .await?;

        Ok(())
    }

    async fn deactivate_cases(
        &self,
        guild_id: u64,
        user_id: u64,
        kind: CaseKind,
    ) -> Result<(), AppError> {
        let repo = CaseRepository::new(self.db);
        let cases = repo.list_by_user(guild_id, user_id).await?;
        for case in cases.into_iter().filter(|c| c.kind == kind && c.active) {
            repo.deactivate(guild_id, case.case_id).await?;
        }
        Ok(())
    }

    /// DMs the sanction notice to the subject. Failure is expected (closed
    /// DMs) and reported, never propagated.
    async fn notify_subject(
        &self,
        http: &Http,
        user: &User,
        guild_name: &str,
        case: &entity::moderation_case::Model,
        verb: &str,
    ) -> SecondaryResult {
        let mut embed = CreateEmbed::new()
            .colour(Colour::new(0xFEE75C))
            .title(format!(
                "Case #{} | {}",
                case.case_id,
                case.kind.as_str().to_uppercase()
            ))
            .description(format!("{} **{}**", verb, guild_name))
            .field(
                "Reason",
                case.reason.as_deref().unwrap_or("No reason provided"),
                false,
            )
            .timestamp(Timestamp::now());
        if let Some(duration_ms) = case.duration_ms {
            embed = embed.field(
                "Duration",
                format_duration(Duration::from_millis(duration_ms as u64)),
                true,
            );
        }

        match user.dm(http, CreateMessage::new().embed(embed)).await {
            Ok(_) => SecondaryResult::Delivered,
            Err(err) => {
                tracing::warn!(
                    "Case #{} DM to {} failed: {}",
                    case.case_id,
                    user.id,
                    err
                );
                SecondaryResult::Failed(err.to_string())
            }
        }
    }
}
