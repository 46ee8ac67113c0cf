//! Storage for workout session logs.
//!
//! A log is opened when a session starts and grows as sets are recorded.

use crate::history::recent_logs;
use crate::{Error, NewWorkoutLog, Result, SetInput, SetRecord, SetUpdate, WorkoutLog};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Workout log storage boundary
pub trait WorkoutLogStore {
    /// Open a new log; the store assigns id and timestamp
    fn create(&mut self, new_log: NewWorkoutLog, now: DateTime<Utc>) -> WorkoutLog;

    /// All logs, newest first
    fn get_all(&self) -> Vec<WorkoutLog>;

    fn get_by_id(&self, id: &str) -> Option<WorkoutLog>;

    fn get_by_workout_id(&self, workout_id: &str) -> Vec<WorkoutLog>;

    /// Logs from the last `days` days, newest first
    fn get_recent_logs(&self, days: i64, now: DateTime<Utc>) -> Vec<WorkoutLog>;

    /// Append a set to the exercise at `exercise_index`
    fn append_set(
        &mut self,
        log_id: &str,
        exercise_index: usize,
        input: SetInput,
        now: DateTime<Utc>,
    ) -> Result<WorkoutLog>;

    /// Edit an existing set in place; its timestamp is refreshed
    fn update_set(
        &mut self,
        log_id: &str,
        exercise_index: usize,
        set_index: usize,
        update: SetUpdate,
        now: DateTime<Utc>,
    ) -> Result<WorkoutLog>;

    /// Record the final session duration
    fn finish(&mut self, log_id: &str, duration_seconds: u32) -> Result<WorkoutLog>;

    /// Remove a log; returns whether it existed
    fn delete(&mut self, id: &str) -> bool;
}

/// Process-lifetime log store
#[derive(Clone, Debug, Default)]
pub struct InMemoryWorkoutLogStore {
    logs: Vec<WorkoutLog>,
}

impl InMemoryWorkoutLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with fixture logs
    pub fn seeded(logs: Vec<WorkoutLog>) -> Self {
        Self { logs }
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    fn log_mut(&mut self, log_id: &str) -> Result<&mut WorkoutLog> {
        self.logs
            .iter_mut()
            .find(|l| l.id == log_id)
            .ok_or_else(|| Error::not_found("workout log", log_id))
    }
}

impl WorkoutLogStore for InMemoryWorkoutLogStore {
    fn create(&mut self, new_log: NewWorkoutLog, now: DateTime<Utc>) -> WorkoutLog {
        let log = WorkoutLog {
            id: Uuid::new_v4().to_string(),
            timestamp: now,
            workout_id: new_log.workout_id,
            duration_seconds: new_log.duration_seconds,
            exercises: new_log.exercises,
        };

        tracing::debug!("Opened log {} for workout {}", log.id, log.workout_id);
        self.logs.push(log.clone());
        log
    }

    fn get_all(&self) -> Vec<WorkoutLog> {
        let mut logs = self.logs.clone();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        logs
    }

    fn get_by_id(&self, id: &str) -> Option<WorkoutLog> {
        self.logs.iter().find(|l| l.id == id).cloned()
    }

    fn get_by_workout_id(&self, workout_id: &str) -> Vec<WorkoutLog> {
        self.logs
            .iter()
            .filter(|l| l.workout_id == workout_id)
            .cloned()
            .collect()
    }

    fn get_recent_logs(&self, days: i64, now: DateTime<Utc>) -> Vec<WorkoutLog> {
        recent_logs(&self.logs, days, now)
            .into_iter()
            .cloned()
            .collect()
    }

    fn append_set(
        &mut self,
        log_id: &str,
        exercise_index: usize,
        input: SetInput,
        now: DateTime<Utc>,
    ) -> Result<WorkoutLog> {
        input.validate()?;

        let log = self.log_mut(log_id)?;
        let exercise = log
            .exercises
            .get_mut(exercise_index)
            .ok_or_else(|| Error::not_found("exercise", format!("{}[{}]", log_id, exercise_index)))?;

        exercise.sets.push(SetRecord {
            id: Uuid::new_v4().to_string(),
            reps: input.reps,
            weight: input.weight,
            completed: input.completed,
            timestamp: now,
        });

        tracing::debug!(
            "Logged set {}x{} for '{}' in {}",
            input.weight,
            input.reps,
            exercise.exercise_id,
            log_id
        );
        Ok(log.clone())
    }

    fn update_set(
        &mut self,
        log_id: &str,
        exercise_index: usize,
        set_index: usize,
        update: SetUpdate,
        now: DateTime<Utc>,
    ) -> Result<WorkoutLog> {
        update.validate()?;

        let log = self.log_mut(log_id)?;
        let set = log
            .exercises
            .get_mut(exercise_index)
            .and_then(|e| e.sets.get_mut(set_index))
            .ok_or_else(|| {
                Error::not_found(
                    "set",
                    format!("{}[{}][{}]", log_id, exercise_index, set_index),
                )
            })?;

        if let Some(reps) = update.reps {
            set.reps = reps;
        }
        if let Some(weight) = update.weight {
            set.weight = weight;
        }
        if let Some(completed) = update.completed {
            set.completed = completed;
        }
        set.timestamp = now;

        Ok(log.clone())
    }

    fn finish(&mut self, log_id: &str, duration_seconds: u32) -> Result<WorkoutLog> {
        let log = self.log_mut(log_id)?;
        log.duration_seconds = duration_seconds;
        Ok(log.clone())
    }

    fn delete(&mut self, id: &str) -> bool {
        let before = self.logs.len();
        self.logs.retain(|l| l.id != id);
        before != self.logs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExerciseLog;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    fn open_log(store: &mut InMemoryWorkoutLogStore, at: DateTime<Utc>) -> WorkoutLog {
        store.create(
            NewWorkoutLog {
                workout_id: "w1".into(),
                exercises: vec![ExerciseLog::new("Squats"), ExerciseLog::new("Push-ups")],
                duration_seconds: 0,
            },
            at,
        )
    }

    fn completed(reps: u32, weight: f64) -> SetInput {
        SetInput {
            reps,
            weight,
            completed: true,
        }
    }

    #[test]
    fn test_create_assigns_id_and_timestamp() {
        let mut store = InMemoryWorkoutLogStore::new();
        let a = open_log(&mut store, now());
        let b = open_log(&mut store, now());

        assert_ne!(a.id, b.id);
        assert_eq!(a.timestamp, now());
        assert_eq!(store.get_by_workout_id("w1").len(), 2);
        assert!(store.get_by_workout_id("w2").is_empty());
    }

    #[test]
    fn test_get_all_newest_first() {
        let mut store = InMemoryWorkoutLogStore::new();
        let old = open_log(&mut store, now() - Duration::days(3));
        let new = open_log(&mut store, now());

        let all = store.get_all();
        assert_eq!(all[0].id, new.id);
        assert_eq!(all[1].id, old.id);
    }

    #[test]
    fn test_recent_logs_window() {
        let mut store = InMemoryWorkoutLogStore::new();
        open_log(&mut store, now() - Duration::days(40));
        let recent = open_log(&mut store, now() - Duration::days(2));

        let logs = store.get_recent_logs(30, now());
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, recent.id);
    }

    #[test]
    fn test_append_set() {
        let mut store = InMemoryWorkoutLogStore::new();
        let log = open_log(&mut store, now());

        let updated = store.append_set(&log.id, 0, completed(5, 100.0), now()).unwrap();
        assert_eq!(updated.exercises[0].sets.len(), 1);
        assert!(updated.exercises[0].sets[0].completed);
        assert_eq!(store.get_by_id(&log.id).unwrap(), updated);
    }

    #[test]
    fn test_append_set_errors() {
        let mut store = InMemoryWorkoutLogStore::new();
        let log = open_log(&mut store, now());

        let missing_log = store.append_set("nope", 0, completed(5, 100.0), now());
        assert!(missing_log.unwrap_err().is_not_found());

        let missing_exercise = store.append_set(&log.id, 9, completed(5, 100.0), now());
        assert!(missing_exercise.unwrap_err().is_not_found());

        let negative = store.append_set(&log.id, 0, completed(5, -1.0), now());
        assert!(matches!(negative, Err(Error::Validation(_))));
        assert!(store.get_by_id(&log.id).unwrap().exercises[0].sets.is_empty());
    }

    #[test]
    fn test_update_set_merges_fields() {
        let mut store = InMemoryWorkoutLogStore::new();
        let log = open_log(&mut store, now());
        store
            .append_set(
                &log.id,
                1,
                SetInput {
                    reps: 10,
                    weight: 0.0,
                    completed: false,
                },
                now(),
            )
            .unwrap();

        let later = now() + Duration::minutes(3);
        let updated = store
            .update_set(
                &log.id,
                1,
                0,
                SetUpdate {
                    completed: Some(true),
                    ..Default::default()
                },
                later,
            )
            .unwrap();

        let set = &updated.exercises[1].sets[0];
        assert!(set.completed);
        assert_eq!(set.reps, 10);
        assert_eq!(set.timestamp, later);

        let missing = store.update_set(&log.id, 1, 5, SetUpdate::default(), later);
        assert!(missing.unwrap_err().is_not_found());
    }

    #[test]
    fn test_finish_and_delete() {
        let mut store = InMemoryWorkoutLogStore::new();
        let log = open_log(&mut store, now());

        assert_eq!(store.finish(&log.id, 1800).unwrap().duration_seconds, 1800);
        assert!(store.finish("nope", 1).is_err());

        assert!(store.delete(&log.id));
        assert!(!store.delete(&log.id));
        assert!(store.is_empty());
    }
}
