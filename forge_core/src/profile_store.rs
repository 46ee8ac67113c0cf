//! Single-record storage for the user profile.

use crate::{Error, HealthSurvey, ProfileUpdate, Result, UserProfile};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Profile storage boundary
pub trait UserProfileStore {
    fn get(&self) -> UserProfile;

    /// Merge `update` into the stored profile
    fn update(&mut self, update: ProfileUpdate) -> UserProfile;

    /// Finish onboarding: merge, validate, and mark setup complete
    fn setup(&mut self, update: ProfileUpdate, now: DateTime<Utc>) -> Result<UserProfile>;

    /// Store health questionnaire answers and mark the survey complete
    fn submit_health_survey(
        &mut self,
        answers: BTreeMap<String, serde_json::Value>,
        now: DateTime<Utc>,
    ) -> UserProfile;

    fn is_setup_complete(&self) -> bool;

    fn is_health_survey_complete(&self) -> bool;
}

/// Check the fields onboarding cannot proceed without
pub fn validate_setup(profile: &UserProfile) -> Result<()> {
    let mut missing = Vec::new();

    if profile.name.trim().is_empty() {
        missing.push("name");
    }
    if profile.goals.is_empty() {
        missing.push("goals");
    }
    if profile
        .experience
        .as_deref()
        .map_or(true, |e| e.trim().is_empty())
    {
        missing.push("experience");
    }
    if profile.equipment.is_empty() {
        missing.push("equipment");
    }
    if profile.schedule.days_per_week == 0 {
        missing.push("schedule.days_per_week");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "profile setup incomplete: {}",
            missing.join(", ")
        )))
    }
}

/// Process-lifetime profile store holding exactly one profile
#[derive(Clone, Debug, Default)]
pub struct InMemoryProfileStore {
    profile: UserProfile,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(profile: UserProfile) -> Self {
        Self { profile }
    }
}

impl UserProfileStore for InMemoryProfileStore {
    fn get(&self) -> UserProfile {
        self.profile.clone()
    }

    fn update(&mut self, update: ProfileUpdate) -> UserProfile {
        update.apply_to(&mut self.profile);
        tracing::debug!("Updated profile for '{}'", self.profile.name);
        self.profile.clone()
    }

    fn setup(&mut self, update: ProfileUpdate, now: DateTime<Utc>) -> Result<UserProfile> {
        let mut candidate = self.profile.clone();
        update.apply_to(&mut candidate);
        validate_setup(&candidate)?;

        candidate.is_setup_complete = true;
        candidate.created_at = Some(now);
        self.profile = candidate;

        tracing::info!("Completed setup for '{}'", self.profile.name);
        Ok(self.profile.clone())
    }

    fn submit_health_survey(
        &mut self,
        answers: BTreeMap<String, serde_json::Value>,
        now: DateTime<Utc>,
    ) -> UserProfile {
        self.profile.health_survey = Some(HealthSurvey {
            answers,
            completed_at: Some(now),
        });
        self.profile.clone()
    }

    fn is_setup_complete(&self) -> bool {
        self.profile.is_setup_complete
    }

    fn is_health_survey_complete(&self) -> bool {
        self.profile
            .health_survey
            .as_ref()
            .is_some_and(|s| s.completed_at.is_some())
    }
}
