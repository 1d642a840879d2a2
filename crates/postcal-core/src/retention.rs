//! Retention policy and the periodic purge.
//!
//! Posts older than the retention window (by creation timestamp) and
//! assignments whose calendar date has aged out are deleted. The purge
//! runs in its own statements against the repositories and never holds
//! anything an interactive request would block on.

use chrono::{DateTime, Days, NaiveDate, Utc};

use postcal_types::error::RepositoryError;

use crate::repository::post::PostRepository;
use crate::repository::schedule::ScheduleRepository;

/// Default retention window.
pub const DEFAULT_RETENTION_DAYS: u64 = 180;

/// Age limit for stored content.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    max_age_days: u64,
}

impl RetentionPolicy {
    /// A policy keeping records for `max_age_days` (at least one day).
    pub fn new(max_age_days: u64) -> Self {
        Self {
            max_age_days: max_age_days.max(1),
        }
    }

    pub fn max_age_days(&self) -> u64 {
        self.max_age_days
    }

    /// Posts created before this instant are purged.
    pub fn post_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - chrono::Duration::days(self.max_age_days as i64)
    }

    /// Assignments dated before this day are purged.
    pub fn date_cutoff(&self, today: NaiveDate) -> NaiveDate {
        today - Days::new(self.max_age_days)
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_DAYS)
    }
}

/// What one purge sweep removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub posts_deleted: u64,
    pub schedules_deleted: u64,
}

/// Run one purge sweep against both repositories.
///
/// Old posts go first (cascading to their assignments inside the
/// repository), then assignments whose own date aged out.
pub async fn run_purge<P: PostRepository, S: ScheduleRepository>(
    policy: &RetentionPolicy,
    posts: &P,
    schedules: &S,
) -> Result<PurgeReport, RepositoryError> {
    let now = Utc::now();
    let posts_deleted = posts.purge_older_than(policy.post_cutoff(now)).await?;
    let schedules_deleted = schedules
        .purge_older_than(policy.date_cutoff(now.date_naive()))
        .await?;

    let report = PurgeReport {
        posts_deleted,
        schedules_deleted,
    };
    if posts_deleted > 0 || schedules_deleted > 0 {
        tracing::info!(
            posts = posts_deleted,
            schedules = schedules_deleted,
            "retention purge removed aged records"
        );
    }
    Ok(report)
}

/// Normalize a human-readable schedule string to a 6-field cron expression.
///
/// Supported patterns (case-insensitive):
/// - "daily" / "every day"     -> "0 0 0 * * *"
/// - "hourly" / "every hour"   -> "0 0 * * * *"
/// - "every N minutes"         -> "0 */N * * * *"
/// - "every N hours"           -> "0 0 */N * * *"
/// - 5-field cron              -> "0" prepended for seconds
/// - 6-field cron              -> returned as-is
pub fn normalize_schedule(input: &str) -> Result<String, String> {
    let trimmed = input.trim();

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.len() == 5 {
        return Ok(format!("0 {trimmed}"));
    }
    if parts.len() == 6 {
        return Ok(trimmed.to_string());
    }

    let lower = trimmed.to_lowercase();
    if lower == "daily" || lower == "every day" {
        return Ok("0 0 0 * * *".to_string());
    }
    if lower == "hourly" || lower == "every hour" {
        return Ok("0 0 * * * *".to_string());
    }

    if let Some(rest) = lower.strip_prefix("every ") {
        let words: Vec<&str> = rest.split_whitespace().collect();
        if words.len() == 2 {
            let n: u32 = words[0]
                .parse()
                .map_err(|_| format!("unrecognized schedule: '{trimmed}'"))?;
            if n == 0 {
                return Err("interval must be > 0".to_string());
            }
            let unit = words[1].trim_end_matches('s');
            return match unit {
                "minute" => Ok(format!("0 */{n} * * * *")),
                "hour" => Ok(format!("0 0 */{n} * * *")),
                _ => Err(format!("unrecognized schedule: '{trimmed}'")),
            };
        }
    }

    Err(format!("unrecognized schedule: '{trimmed}'"))
}
