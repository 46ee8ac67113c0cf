//! Seed data for the in-memory stores.
//!
//! The default fixtures are compiled into the binary. A fixture directory may
//! replace any of the four files; files it does not contain keep the
//! embedded version.

use crate::library::ExerciseInfo;
use crate::{Result, UserProfile, Workout, WorkoutLog};
use serde::de::DeserializeOwned;
use std::path::Path;

const PROFILE_FILE: &str = "user_profile.json";
const WORKOUTS_FILE: &str = "workouts.json";
const LOGS_FILE: &str = "workout_logs.json";
const EXERCISES_FILE: &str = "exercises.json";

const EMBEDDED_PROFILE: &str = include_str!("../fixtures/user_profile.json");
const EMBEDDED_WORKOUTS: &str = include_str!("../fixtures/workouts.json");
const EMBEDDED_LOGS: &str = include_str!("../fixtures/workout_logs.json");
const EMBEDDED_EXERCISES: &str = include_str!("../fixtures/exercises.json");

/// Everything needed to seed a tracker
#[derive(Clone, Debug, Default)]
pub struct Fixtures {
    pub profile: UserProfile,
    pub workouts: Vec<Workout>,
    pub logs: Vec<WorkoutLog>,
    pub exercises: Vec<ExerciseInfo>,
}

impl Fixtures {
    /// Parse the fixtures compiled into the crate
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            profile: serde_json::from_str(EMBEDDED_PROFILE)?,
            workouts: serde_json::from_str(EMBEDDED_WORKOUTS)?,
            logs: serde_json::from_str(EMBEDDED_LOGS)?,
            exercises: serde_json::from_str(EMBEDDED_EXERCISES)?,
        })
    }

    /// Embedded fixtures, overridden by whichever files exist in `dir`
    ///
    /// A malformed file is an error; a missing one is not.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut fixtures = Self::embedded()?;

        if let Some(profile) = read_optional(&dir.join(PROFILE_FILE))? {
            fixtures.profile = profile;
        }
        if let Some(workouts) = read_optional(&dir.join(WORKOUTS_FILE))? {
            fixtures.workouts = workouts;
        }
        if let Some(logs) = read_optional(&dir.join(LOGS_FILE))? {
            fixtures.logs = logs;
        }
        if let Some(exercises) = read_optional(&dir.join(EXERCISES_FILE))? {
            fixtures.exercises = exercises;
        }

        tracing::info!(
            "Loaded fixtures from {:?}: {} workouts, {} logs, {} exercises",
            dir,
            fixtures.workouts.len(),
            fixtures.logs.len(),
            fixtures.exercises.len()
        );
        Ok(fixtures)
    }
}

fn read_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        tracing::debug!("No fixture at {:?}, keeping embedded data", path);
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&contents)?;
    Ok(Some(value))
}
