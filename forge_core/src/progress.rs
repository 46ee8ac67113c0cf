//! Progress aggregation over workout logs.
//!
//! Every function takes a read-only snapshot of the log collection; fetching
//! it is the caller's job. Only completed sets count toward volume, charts,
//! and records.

use crate::history::recent_logs;
use crate::{SetRecord, WorkoutLog};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Default window for [`weekly_stats`]
pub const WEEK_DAYS: i64 = 7;

/// Summary of the trailing week
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct WeeklyStats {
    pub workouts_completed: usize,
    /// Sum of weight × reps over completed sets
    pub total_volume: f64,
    /// Mean log duration in seconds, rounded
    pub avg_duration_seconds: u32,
}

/// Best set of one session for a charted exercise
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub weight: f64,
    pub reps: u32,
    pub volume: f64,
}

/// All-time bests for one exercise, each tracked independently
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct PersonalRecord {
    pub max_weight: f64,
    /// Timestamp of the log where `max_weight` was first reached
    pub max_weight_date: Option<DateTime<Utc>>,
    pub max_reps: u32,
    pub max_volume: f64,
}

/// Consecutive active days ending today, or yesterday if today has no log yet
///
/// Only today gets the grace: a gap on any earlier day ends the streak.
pub fn streak(logs: &[WorkoutLog], today: NaiveDate) -> u32 {
    let active: HashSet<NaiveDate> = logs.iter().map(WorkoutLog::day).collect();

    let mut current = today;
    if !active.contains(&current) {
        match current.pred_opt() {
            Some(yesterday) => current = yesterday,
            None => return 0,
        }
    }

    let mut count = 0;
    while active.contains(&current) {
        count += 1;
        match current.pred_opt() {
            Some(previous) => current = previous,
            None => break,
        }
    }

    tracing::debug!("Streak as of {}: {} day(s)", today, count);
    count
}

/// Stats over the last seven days
pub fn weekly_stats(logs: &[WorkoutLog], now: DateTime<Utc>) -> WeeklyStats {
    stats_for_window(logs, WEEK_DAYS, now)
}

/// Stats over logs from the last `days` days
pub fn stats_for_window(logs: &[WorkoutLog], days: i64, now: DateTime<Utc>) -> WeeklyStats {
    let recent = recent_logs(logs, days, now);
    if recent.is_empty() {
        return WeeklyStats::default();
    }

    let total_volume = recent
        .iter()
        .flat_map(|l| l.exercises.iter())
        .flat_map(|e| e.completed_sets())
        .map(SetRecord::volume)
        .sum();

    let total_duration: u64 = recent.iter().map(|l| u64::from(l.duration_seconds)).sum();
    let avg_duration_seconds = (total_duration as f64 / recent.len() as f64).round() as u32;

    WeeklyStats {
        workouts_completed: recent.len(),
        total_volume,
        avg_duration_seconds,
    }
}

/// Highest-volume completed set; ties keep the earliest
///
/// The comparison starts from an empty 0 x 0 set, so only a set with positive
/// volume can win. Bodyweight-only and zero-rep sessions have no best set.
pub fn best_set<'a, I>(sets: I) -> Option<&'a SetRecord>
where
    I: IntoIterator<Item = &'a SetRecord>,
{
    sets.into_iter()
        .filter(|s| s.completed)
        .fold(None::<&SetRecord>, |best, current| {
            let floor = best.map_or(0.0, SetRecord::volume);
            if current.volume() > floor {
                Some(current)
            } else {
                best
            }
        })
}

/// Per-session best set for `exercise` over the last `days` days, oldest first
///
/// Sessions without a positive-volume completed set are left out.
pub fn progress_chart(
    logs: &[WorkoutLog],
    exercise: &str,
    days: i64,
    now: DateTime<Utc>,
) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = recent_logs(logs, days, now)
        .into_iter()
        .filter_map(|log| {
            let entry = log.exercise(exercise)?;
            let best = best_set(&entry.sets)?;
            Some(ChartPoint {
                date: log.day(),
                weight: best.weight,
                reps: best.reps,
                volume: best.volume(),
            })
        })
        .collect();

    points.sort_by_key(|p| p.date);
    points
}

/// All-time records per exercise name
///
/// Exercises without a single completed set are absent from the result.
pub fn personal_records(logs: &[WorkoutLog]) -> BTreeMap<String, PersonalRecord> {
    let mut records: BTreeMap<String, PersonalRecord> = BTreeMap::new();

    for log in logs {
        for entry in &log.exercises {
            for set in entry.completed_sets() {
                let record = records.entry(entry.exercise_id.clone()).or_default();

                if set.weight > record.max_weight {
                    record.max_weight = set.weight;
                    record.max_weight_date = Some(log.timestamp);
                }
                record.max_reps = record.max_reps.max(set.reps);
                if set.volume() > record.max_volume {
                    record.max_volume = set.volume();
                }
            }
        }
    }

    tracing::debug!("Computed personal records for {} exercise(s)", records.len());
    records
}
