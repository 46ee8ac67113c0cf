//! Workout generation.
//!
//! A workout is built from the catalog pool for the profile's primary goal:
//! 1. Pick the pool (unknown goals use the "strength" pool)
//! 2. Keep exercises that are bodyweight or use equipment the user owns
//! 3. Walk the kept exercises cyclically until the exercise count is reached
//! 4. Prescribe sets/reps from the experience baseline, plus a small random
//!    rep bump drawn from a [`RepJitter`]

use crate::config::GeneratorConfig;
use crate::types::{
    ExerciseInstance, ExerciseTemplate, ExperienceLevel, UserProfile, Workout, DEFAULT_GOAL,
};
use crate::ExerciseCatalog;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of the random rep bump added to each exercise
///
/// Implemented for every `rand::Rng`; tests use [`FixedJitter`] or a seeded rng.
pub trait RepJitter {
    /// Return a value in `0..=max_inclusive`
    fn extra_reps(&mut self, max_inclusive: u32) -> u32;
}

impl<R: rand::Rng + ?Sized> RepJitter for R {
    fn extra_reps(&mut self, max_inclusive: u32) -> u32 {
        self.gen_range(0..=max_inclusive)
    }
}

/// Always adds the same number of reps (clamped to the allowed maximum)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedJitter(pub u32);

impl RepJitter for FixedJitter {
    fn extra_reps(&mut self, max_inclusive: u32) -> u32 {
        self.0.min(max_inclusive)
    }
}

/// Sets/reps prescription and workout size for an experience level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Baseline {
    pub sets: u32,
    pub base_reps: u32,
    pub max_exercises: usize,
}

impl Baseline {
    pub fn for_level(level: ExperienceLevel) -> Self {
        match level {
            ExperienceLevel::Beginner => Baseline {
                sets: 3,
                base_reps: 8,
                max_exercises: 4,
            },
            ExperienceLevel::Intermediate => Baseline {
                sets: 4,
                base_reps: 10,
                max_exercises: 6,
            },
            ExperienceLevel::Advanced => Baseline {
                sets: 4,
                base_reps: 12,
                max_exercises: 6,
            },
        }
    }
}

/// Number of exercises a workout gets
///
/// Capped by the goal pool's size and the experience cap. A pool with nothing
/// usable yields zero; otherwise the usable exercises are cycled to fill the
/// count.
///
/// The count uses the unfiltered pool length, so a beginner with no equipment
/// gets four strength exercises (Push-ups and Squats, twice each), not two.
pub fn exercise_count(pool_len: usize, usable_len: usize, baseline: &Baseline) -> usize {
    if usable_len == 0 {
        return 0;
    }
    pool_len.min(baseline.max_exercises)
}

/// Exercises from `pool` the profile can perform with its equipment
pub fn usable_exercises<'a>(
    pool: &'a [ExerciseTemplate],
    profile: &UserProfile,
) -> Vec<&'a ExerciseTemplate> {
    pool.iter()
        .filter(|t| t.is_bodyweight() || profile.has_equipment(&t.equipment))
        .collect()
}

/// Build the exercise list for `profile`
///
/// Never fails: a profile with no usable exercises gets an empty list.
pub fn generate_exercises<J: RepJitter + ?Sized>(
    catalog: &ExerciseCatalog,
    profile: &UserProfile,
    config: &GeneratorConfig,
    jitter: &mut J,
) -> Vec<ExerciseInstance> {
    let primary_goal = profile.primary_goal();
    let baseline = Baseline::for_level(profile.experience_level());
    let pool = catalog.pool_for(primary_goal);
    let usable = usable_exercises(pool, profile);
    let count = exercise_count(pool.len(), usable.len(), &baseline);

    if count == 0 {
        tracing::warn!(
            "No usable exercises for goal '{}' with equipment {:?}",
            primary_goal,
            profile.equipment
        );
        return Vec::new();
    }

    let rest_time_seconds = if primary_goal == DEFAULT_GOAL {
        config.strength_rest_seconds
    } else {
        config.default_rest_seconds
    };

    (0..count)
        .map(|i| {
            let template = usable[i % usable.len()];
            ExerciseInstance {
                id: Uuid::new_v4().to_string(),
                name: template.name.clone(),
                category: template.category.clone(),
                sets: baseline.sets,
                reps: baseline.base_reps + jitter.extra_reps(config.max_rep_jitter),
                weight: if template.is_bodyweight() {
                    0.0
                } else {
                    config.default_weight
                },
                rest_time_seconds,
            }
        })
        .collect()
}

/// Generate a new, not yet completed workout for `profile`
pub fn generate_workout<J: RepJitter + ?Sized>(
    catalog: &ExerciseCatalog,
    profile: &UserProfile,
    config: &GeneratorConfig,
    jitter: &mut J,
    now: DateTime<Utc>,
) -> Workout {
    let exercises = generate_exercises(catalog, profile, config, jitter);

    let difficulty = profile
        .experience
        .as_deref()
        .filter(|e| !e.is_empty())
        .unwrap_or(ExperienceLevel::Beginner.as_str())
        .to_string();

    tracing::info!(
        "Generated {} exercise(s) for goal '{}' ({})",
        exercises.len(),
        profile.primary_goal(),
        difficulty
    );

    Workout {
        id: Uuid::new_v4().to_string(),
        date: now,
        exercises,
        duration_seconds: 0,
        completed: false,
        completed_at: None,
        workout_type: profile.primary_goal().to_string(),
        difficulty,
    }
}
