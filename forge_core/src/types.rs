//! Core domain types for FitForge.
//!
//! This module defines the records every other module passes around:
//! - The user profile gathered during onboarding
//! - Catalog templates and the workouts generated from them
//! - Workout logs with their per-exercise set records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Equipment tag meaning "no equipment needed"
pub const BODYWEIGHT: &str = "bodyweight";

/// Goal used when a profile has none, and the catalog fallback pool
pub const DEFAULT_GOAL: &str = "strength";

// ============================================================================
// Profile Types
// ============================================================================

/// Training experience level
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// Parse a stored experience string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(ExperienceLevel::Beginner),
            "intermediate" => Some(ExperienceLevel::Intermediate),
            "advanced" => Some(ExperienceLevel::Advanced),
            _ => None,
        }
    }

    /// Level used for generation; unset or unrecognized values count as beginner
    pub fn from_profile(experience: Option<&str>) -> Self {
        experience
            .and_then(Self::parse)
            .unwrap_or(ExperienceLevel::Beginner)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

/// Weekly training schedule
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u8,

    #[serde(default = "default_session_minutes")]
    pub session_duration_minutes: u32,

    /// Lowercase day names, e.g. "monday"
    #[serde(default)]
    pub preferred_days: Vec<String>,
}

fn default_days_per_week() -> u8 {
    3
}

fn default_session_minutes() -> u32 {
    60
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            days_per_week: default_days_per_week(),
            session_duration_minutes: default_session_minutes(),
            preferred_days: Vec::new(),
        }
    }
}

/// Free-form health questionnaire answers. Never read by the generator.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct HealthSurvey {
    #[serde(default)]
    pub answers: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// The single user of the application
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,

    /// Ordered; the first entry is the primary goal
    #[serde(default)]
    pub goals: Vec<String>,

    #[serde(default)]
    pub equipment: Vec<String>,

    #[serde(default)]
    pub experience: Option<String>,

    #[serde(default)]
    pub schedule: Schedule,

    #[serde(default)]
    pub health_survey: Option<HealthSurvey>,

    #[serde(default)]
    pub is_setup_complete: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// First goal, or "strength" when no goals are set
    pub fn primary_goal(&self) -> &str {
        self.goals
            .first()
            .map(String::as_str)
            .filter(|g| !g.is_empty())
            .unwrap_or(DEFAULT_GOAL)
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        ExperienceLevel::from_profile(self.experience.as_deref())
    }

    pub fn has_equipment(&self, tag: &str) -> bool {
        self.equipment.iter().any(|e| e == tag)
    }
}

/// Partial profile update; `None` fields keep their current value
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub goals: Option<Vec<String>>,
    pub equipment: Option<Vec<String>>,
    pub experience: Option<String>,
    pub schedule: Option<Schedule>,
}

impl ProfileUpdate {
    /// Apply this update on top of `profile` (shallow merge)
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(goals) = self.goals {
            profile.goals = goals;
        }
        if let Some(equipment) = self.equipment {
            profile.equipment = equipment;
        }
        if let Some(experience) = self.experience {
            profile.experience = Some(experience);
        }
        if let Some(schedule) = self.schedule {
            profile.schedule = schedule;
        }
    }
}

// ============================================================================
// Catalog and Workout Types
// ============================================================================

/// Static catalog entry the generator picks from
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseTemplate {
    pub name: String,
    pub category: String,
    /// "bodyweight" or a specific tool such as "barbell"
    pub equipment: String,
}

impl ExerciseTemplate {
    pub fn new(name: &str, category: &str, equipment: &str) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            equipment: equipment.into(),
        }
    }

    pub fn is_bodyweight(&self) -> bool {
        self.equipment == BODYWEIGHT
    }
}

/// One prescribed exercise inside a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseInstance {
    pub id: String,
    pub name: String,
    pub category: String,
    pub sets: u32,
    pub reps: u32,
    /// 0 for bodyweight movements
    pub weight: f64,
    pub rest_time_seconds: u32,
}

/// A generated workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: String,
    pub date: DateTime<Utc>,
    pub exercises: Vec<ExerciseInstance>,
    /// Seconds; filled in on completion
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Primary goal the workout was generated for
    #[serde(rename = "type")]
    pub workout_type: String,
    pub difficulty: String,
}

impl Workout {
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

// ============================================================================
// Log Types
// ============================================================================

/// A single performed set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetRecord {
    pub id: String,
    pub reps: u32,
    pub weight: f64,
    #[serde(default)]
    pub completed: bool,
    pub timestamp: DateTime<Utc>,
}

impl SetRecord {
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

/// Sets logged for one exercise of a session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseLog {
    /// Exercise display name; joined by name, not by a stable id
    pub exercise_id: String,
    #[serde(default)]
    pub sets: Vec<SetRecord>,
}

impl ExerciseLog {
    pub fn new(exercise_id: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            sets: Vec::new(),
        }
    }

    pub fn completed_sets(&self) -> impl Iterator<Item = &SetRecord> {
        self.sets.iter().filter(|s| s.completed)
    }
}

/// Record of one workout session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutLog {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub workout_id: String,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub exercises: Vec<ExerciseLog>,
}

impl WorkoutLog {
    /// Calendar day (UTC) the session happened on
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// First entry logged under `name`
    pub fn exercise(&self, name: &str) -> Option<&ExerciseLog> {
        self.exercises.iter().find(|e| e.exercise_id == name)
    }
}

/// Fields needed to open a new log; id and timestamp are assigned by the store
#[derive(Clone, Debug, Default)]
pub struct NewWorkoutLog {
    pub workout_id: String,
    pub exercises: Vec<ExerciseLog>,
    pub duration_seconds: u32,
}

/// A set as entered by the user
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetInput {
    pub reps: u32,
    pub weight: f64,
    pub completed: bool,
}

impl SetInput {
    pub fn validate(&self) -> crate::Result<()> {
        validate_weight(self.weight)
    }
}

/// Partial edit of an existing set
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SetUpdate {
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub completed: Option<bool>,
}

impl SetUpdate {
    pub fn validate(&self) -> crate::Result<()> {
        match self.weight {
            Some(weight) => validate_weight(weight),
            None => Ok(()),
        }
    }
}

fn validate_weight(weight: f64) -> crate::Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(crate::Error::Validation(format!(
            "weight must be a non-negative number, got {}",
            weight
        )));
    }
    Ok(())
}
