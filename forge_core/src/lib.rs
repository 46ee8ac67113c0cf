#![forbid(unsafe_code)]

//! Core domain model and business logic for FitForge.
//!
//! This crate provides:
//! - Domain types (profiles, workouts, logs, sets)
//! - Exercise catalog and reference library
//! - Workout generator
//! - Progress aggregation (streaks, weekly stats, charts, records)
//! - In-memory stores seeded from fixtures, and the `Tracker` facade

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod library;
pub mod fixtures;
pub mod history;
pub mod generator;
pub mod progress;
pub mod workout_store;
pub mod log_store;
pub mod profile_store;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, ExerciseCatalog};
pub use config::Config;
pub use fixtures::Fixtures;
pub use library::{ExerciseInfo, ExerciseLibrary};
pub use generator::{generate_workout, FixedJitter, RepJitter};
pub use progress::{
    personal_records, progress_chart, streak, weekly_stats, ChartPoint, PersonalRecord,
    WeeklyStats,
};
pub use workout_store::{InMemoryWorkoutStore, WorkoutStore};
pub use log_store::{InMemoryWorkoutLogStore, WorkoutLogStore};
pub use profile_store::{InMemoryProfileStore, UserProfileStore};
pub use tracker::{Dashboard, ProgressOverview, Session, Tracker};
