//! Workout history windows and calendar helpers.
//!
//! Calendar days are UTC dates of the log timestamps.

use crate::WorkoutLog;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::collections::BTreeSet;

/// Logs with `timestamp >= now - days`, newest first
///
/// A window reaching past the representable calendar has no lower bound.
pub fn recent_logs(logs: &[WorkoutLog], days: i64, now: DateTime<Utc>) -> Vec<&WorkoutLog> {
    let cutoff = Duration::try_days(days).and_then(|d| now.checked_sub_signed(d));
    let mut recent: Vec<_> = logs
        .iter()
        .filter(|l| cutoff.map_or(true, |c| l.timestamp >= c))
        .collect();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    tracing::debug!(
        "{} of {} logs fall within the last {} days",
        recent.len(),
        logs.len(),
        days
    );
    recent
}

/// The Monday..Sunday week containing `date`
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// First log recorded on `date`
pub fn log_for_date(logs: &[WorkoutLog], date: NaiveDate) -> Option<&WorkoutLog> {
    logs.iter().find(|l| l.day() == date)
}

/// Whether each day in `days` has at least one log
pub fn active_days(logs: &[WorkoutLog], days: &[NaiveDate]) -> Vec<(NaiveDate, bool)> {
    let logged: BTreeSet<NaiveDate> = logs.iter().map(WorkoutLog::day).collect();
    days.iter().map(|d| (*d, logged.contains(d))).collect()
}

/// Sorted, de-duplicated exercise names appearing in `logs`
pub fn logged_exercise_names<'a, I>(logs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a WorkoutLog>,
{
    logs.into_iter()
        .flat_map(|l| l.exercises.iter())
        .map(|e| e.exercise_id.as_str())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
