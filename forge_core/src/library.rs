//! Exercise reference library (descriptions and form tips).
//!
//! Separate from the generation catalog: this is what the user browses, and
//! it is seeded from fixtures rather than compiled in.

use serde::{Deserialize, Serialize};

/// A browsable exercise description
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseInfo {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub form_tips: Vec<String>,
}

/// Read-only collection of [`ExerciseInfo`]
#[derive(Clone, Debug, Default)]
pub struct ExerciseLibrary {
    entries: Vec<ExerciseInfo>,
}

impl ExerciseLibrary {
    pub fn new(entries: Vec<ExerciseInfo>) -> Self {
        Self { entries }
    }

    pub fn all(&self) -> &[ExerciseInfo] {
        &self.entries
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ExerciseInfo> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn by_category(&self, category: &str) -> Vec<&ExerciseInfo> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Case-insensitive substring match on the name
    pub fn search_by_name(&self, query: &str) -> Vec<&ExerciseInfo> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Form tips for `id`; empty when the exercise is unknown
    pub fn form_tips(&self, id: &str) -> &[String] {
        self.get_by_id(id)
            .map(|e| e.form_tips.as_slice())
            .unwrap_or(&[])
    }
}
