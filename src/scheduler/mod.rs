//! Cron jobs: the durable sanction sweep and the periodic stats broadcast.

pub mod sanctions;
pub mod stats_broadcast;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::http::Http;
use tokio_cron_scheduler::JobScheduler;

use crate::{error::AppError, realtime::Broadcaster, service::stats::StatsService};

/// Starts the shared job scheduler with both recurring jobs.
///
/// The sanction sweep also runs once immediately, so reversals that came
/// due while the process was down are executed right after startup instead
/// of waiting for the first cron tick.
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
    broadcaster: Broadcaster,
    stats: StatsService,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    if let Err(err) = sanctions::sweep(&db, &discord_http).await {
        tracing::error!("Startup sanction sweep failed: {}", err);
    }

    scheduler
        .add(sanctions::sweep_job(db, discord_http)?)
        .await?;
    scheduler
        .add(stats_broadcast::broadcast_job(broadcaster, stats)?)
        .await?;

    scheduler.start().await?;

    tracing::info!("Scheduler started");

    Ok(())
}
