//! Storage for generated workouts.

use crate::{Error, Result, Workout};
use chrono::{DateTime, NaiveDate, Utc};

/// Workout storage boundary
pub trait WorkoutStore {
    /// Store a workout and return the stored copy
    fn create(&mut self, workout: Workout) -> Workout;

    fn get_all(&self) -> Vec<Workout>;

    fn get_by_id(&self, id: &str) -> Option<Workout>;

    /// First uncompleted workout dated `today`
    fn todays_workout(&self, today: NaiveDate) -> Option<Workout>;

    /// Mark a workout completed with its session duration
    fn complete(&mut self, id: &str, duration_seconds: u32, now: DateTime<Utc>) -> Result<Workout>;

    /// Remove a workout; returns whether it existed
    fn delete(&mut self, id: &str) -> bool;
}

/// Process-lifetime workout store
#[derive(Clone, Debug, Default)]
pub struct InMemoryWorkoutStore {
    workouts: Vec<Workout>,
}

impl InMemoryWorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with fixture workouts
    pub fn seeded(workouts: Vec<Workout>) -> Self {
        Self { workouts }
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

impl WorkoutStore for InMemoryWorkoutStore {
    fn create(&mut self, workout: Workout) -> Workout {
        tracing::debug!("Storing workout {}", workout.id);
        self.workouts.push(workout.clone());
        workout
    }

    fn get_all(&self) -> Vec<Workout> {
        self.workouts.clone()
    }

    fn get_by_id(&self, id: &str) -> Option<Workout> {
        self.workouts.iter().find(|w| w.id == id).cloned()
    }

    fn todays_workout(&self, today: NaiveDate) -> Option<Workout> {
        self.workouts
            .iter()
            .find(|w| w.day() == today && !w.completed)
            .cloned()
    }

    fn complete(&mut self, id: &str, duration_seconds: u32, now: DateTime<Utc>) -> Result<Workout> {
        let workout = self
            .workouts
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| Error::not_found("workout", id))?;

        workout.completed = true;
        workout.duration_seconds = duration_seconds;
        workout.completed_at = Some(now);

        tracing::info!("Completed workout {} in {}s", id, duration_seconds);
        Ok(workout.clone())
    }

    fn delete(&mut self, id: &str) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        before != self.workouts.len()
    }
}
