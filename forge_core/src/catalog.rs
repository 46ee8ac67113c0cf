//! Default exercise pools for workout generation.
//!
//! Pools are keyed by goal name. Goals without a pool of their own fall back
//! to the "strength" pool.

use crate::types::{ExerciseTemplate, DEFAULT_GOAL};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashSet};

/// Goal-keyed pools of exercise templates
#[derive(Clone, Debug, Default)]
pub struct ExerciseCatalog {
    pub pools: BTreeMap<String, Vec<ExerciseTemplate>>,
}

/// Cached default catalog - built once and shared read-only
static DEFAULT_CATALOG: Lazy<ExerciseCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static ExerciseCatalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: prefer `get_default_catalog()` outside of tests.
pub fn build_default_catalog() -> ExerciseCatalog {
    let mut pools = BTreeMap::new();

    pools.insert(
        "strength".to_string(),
        vec![
            ExerciseTemplate::new("Push-ups", "chest", "bodyweight"),
            ExerciseTemplate::new("Squats", "legs", "bodyweight"),
            ExerciseTemplate::new("Deadlifts", "back", "barbell"),
            ExerciseTemplate::new("Bench Press", "chest", "barbell"),
            ExerciseTemplate::new("Overhead Press", "shoulders", "barbell"),
            ExerciseTemplate::new("Pull-ups", "back", "pull-up bar"),
        ],
    );

    pools.insert(
        "cardio".to_string(),
        vec![
            ExerciseTemplate::new("Jumping Jacks", "cardio", "bodyweight"),
            ExerciseTemplate::new("Burpees", "cardio", "bodyweight"),
            ExerciseTemplate::new("Mountain Climbers", "cardio", "bodyweight"),
            ExerciseTemplate::new("High Knees", "cardio", "bodyweight"),
        ],
    );

    ExerciseCatalog { pools }
}

impl ExerciseCatalog {
    pub fn has_pool(&self, goal: &str) -> bool {
        self.pools.contains_key(goal)
    }

    /// Pool for `goal`, falling back to the "strength" pool
    ///
    /// Returns an empty slice only if the catalog has neither.
    pub fn pool_for(&self, goal: &str) -> &[ExerciseTemplate] {
        if let Some(pool) = self.pools.get(goal) {
            return pool;
        }

        tracing::debug!(
            "No exercise pool for goal '{}', falling back to '{}'",
            goal,
            DEFAULT_GOAL
        );
        self.pools
            .get(DEFAULT_GOAL)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.pools.contains_key(DEFAULT_GOAL) {
            errors.push(format!("Catalog has no '{}' fallback pool", DEFAULT_GOAL));
        }

        for (goal, pool) in &self.pools {
            if goal.is_empty() {
                errors.push("Pool has empty goal key".to_string());
            }

            let mut seen = HashSet::new();
            for template in pool {
                if template.name.is_empty() {
                    errors.push(format!("Pool '{}' has an exercise with empty name", goal));
                }
                if template.equipment.is_empty() {
                    errors.push(format!(
                        "Exercise '{}' in pool '{}' has no equipment tag",
                        template.name, goal
                    ));
                }
                // Logs join on display name, so names must be unique per pool
                if !seen.insert(template.name.as_str()) {
                    errors.push(format!(
                        "Pool '{}' lists '{}' more than once",
                        goal, template.name
                    ));
                }
            }
        }

        errors
    }
}
