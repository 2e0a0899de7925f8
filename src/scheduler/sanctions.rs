use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{EditMember, GuildId};
use serenity::http::Http;
use tokio_cron_scheduler::Job;

use entity::scheduled_action::ScheduledActionKind;

use crate::{
    data::{case::CaseRepository, scheduled_action::ScheduledActionRepository},
    error::AppError,
    util::parse::parse_u64_from_string,
};

/// Every-minute sweep over due scheduled actions.
pub fn sweep_job(db: DatabaseConnection, discord_http: Arc<Http>) -> Result<Job, AppError> {
    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let http = discord_http.clone();

        Box::pin(async move {
            if let Err(err) = sweep(&db, &http).await {
                tracing::error!("Sanction sweep failed: {}", err);
            }
        })
    })?;

    Ok(job)
}

/// Executes every due reversal. Each action is handled independently so one
/// failure does not starve the rest of the queue.
pub async fn sweep(db: &DatabaseConnection, http: &Arc<Http>) -> Result<(), AppError> {
    let due = ScheduledActionRepository::new(db).due(Utc::now()).await?;

    for action in due {
        if let Err(err) = execute(db, http, &action).await {
            tracing::error!(
                "Scheduled {} for case #{} in guild {} failed: {}",
                action.kind.as_str(),
                action.case_id,
                action.guild_id,
                err
            );
        }
    }

    Ok(())
}

/// Reverses one sanction: lift the ban or timeout, flip the case inactive,
/// drop the schedule row.
///
/// The Discord call is best-effort: a moderator may have already lifted
/// the sanction by hand, or the bot may have lost access, so its failure
/// is logged and the bookkeeping still completes.
async fn execute(
    db: &DatabaseConnection,
    http: &Arc<Http>,
    action: &entity::scheduled_action::Model,
) -> Result<(), AppError> {
    let guild_id = GuildId::new(parse_u64_from_string(&action.guild_id)?);
    let user_id = parse_u64_from_string(&action.user_id)?;

    let reversal = match action.kind {
        ScheduledActionKind::Unban => guild_id
            .unban(http.as_ref(), user_id)
            .await
            .map_err(AppError::from),
        ScheduledActionKind::Unmute => guild_id
            .edit_member(
                http.as_ref(),
                user_id,
                EditMember::new().enable_communication(),
            )
            .await
            .map(|_| ())
            .map_err(AppError::from),
    };
    if let Err(err) = reversal {
        tracing::warn!(
            "Discord {} for user {} in guild {} failed (continuing): {}",
            action.kind.as_str(),
            user_id,
            guild_id,
            err
        );
    } else {
        tracing::info!(
            "Temporary sanction expired: {} user {} in guild {} (case #{})",
            action.kind.as_str(),
            user_id,
            guild_id,
            action.case_id
        );
    }

    CaseRepository::new(db)
        .deactivate(guild_id.get(), action.case_id)
        .await?;
    ScheduledActionRepository::new(db).delete(action.id).await?;

    Ok(())
}
