use tokio_cron_scheduler::Job;

use crate::{error::AppError, realtime::Broadcaster, service::stats::StatsService};

/// Pushes aggregate stats to every realtime client twice a minute.
pub fn broadcast_job(broadcaster: Broadcaster, stats: StatsService) -> Result<Job, AppError> {
    let job = Job::new_async("*/30 * * * * *", move |_uuid, _lock| {
        let broadcaster = broadcaster.clone();
        let stats = stats.clone();

        Box::pin(async move {
            let event = stats.stats_event().await;
            broadcaster.publish(event);
        })
    })?;

    Ok(job)
}
