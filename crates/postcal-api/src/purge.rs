//! Retention purge job.
//!
//! Wraps `tokio-cron-scheduler`: the configured cadence (default daily)
//! triggers one purge sweep over both stores. The job runs off the
//! request path and holds nothing interactive requests wait on.

use tokio_cron_scheduler::{Job, JobScheduler};

use postcal_core::retention::{normalize_schedule, run_purge};

use crate::state::AppState;

/// Start the background purge job. The returned scheduler must be kept
/// alive for the server's lifetime.
pub async fn spawn_purge_job(state: &AppState, schedule: &str) -> anyhow::Result<JobScheduler> {
    let cron = normalize_schedule(schedule)
        .map_err(|e| anyhow::anyhow!("invalid retention schedule: {e}"))?;

    let scheduler = JobScheduler::new().await?;
    let policy = state.retention;
    let posts = state.posts.clone();
    let schedules = state.schedules.clone();

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let posts = posts.clone();
        let schedules = schedules.clone();
        Box::pin(async move {
            match run_purge(&policy, &posts, &schedules).await {
                Ok(report) => {
                    tracing::debug!(
                        posts = report.posts_deleted,
                        schedules = report.schedules_deleted,
                        "retention sweep finished"
                    );
                }
                Err(err) => {
                    tracing::error!(error = %err, "retention purge failed");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    tracing::info!(schedule = %cron, max_age_days = policy.max_age_days(), "retention purge scheduled");

    Ok(scheduler)
}
