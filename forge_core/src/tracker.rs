//! Application facade over the stores.
//!
//! A `Tracker` owns one instance of each store and is built once at startup,
//! then passed to whatever needs it. Tests build a fresh one per case.

use crate::generator::{generate_workout, RepJitter};
use crate::history::{logged_exercise_names, recent_logs};
use crate::library::ExerciseLibrary;
use crate::log_store::{InMemoryWorkoutLogStore, WorkoutLogStore};
use crate::profile_store::{InMemoryProfileStore, UserProfileStore};
use crate::progress::{self, ChartPoint, PersonalRecord, WeeklyStats};
use crate::workout_store::{InMemoryWorkoutStore, WorkoutStore};
use crate::{
    get_default_catalog, Config, Error, ExerciseCatalog, ExerciseLog, Fixtures, NewWorkoutLog,
    Result, SetInput, UserProfile, Workout, WorkoutLog,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// A started session: the workout being performed and its open log
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    pub workout: Workout,
    pub log: WorkoutLog,
}

/// Data for the "today" screen
#[derive(Clone, Debug, Serialize)]
pub struct Dashboard {
    pub profile: UserProfile,
    pub todays_workout: Option<Workout>,
    pub weekly_stats: WeeklyStats,
    pub streak: u32,
}

/// Data for the progress screen
#[derive(Clone, Debug, Serialize)]
pub struct ProgressOverview {
    pub weekly_stats: WeeklyStats,
    pub streak: u32,
    pub personal_records: BTreeMap<String, PersonalRecord>,
    /// Exercises logged within the overview window, sorted
    pub exercises: Vec<String>,
}

pub struct Tracker<W = InMemoryWorkoutStore, L = InMemoryWorkoutLogStore, P = InMemoryProfileStore>
{
    workouts: W,
    logs: L,
    profile: P,
    catalog: ExerciseCatalog,
    library: ExerciseLibrary,
    config: Config,
}

impl Tracker {
    /// In-memory tracker seeded from `fixtures`
    pub fn from_fixtures(fixtures: Fixtures, config: Config) -> Self {
        Tracker::new(
            InMemoryWorkoutStore::seeded(fixtures.workouts),
            InMemoryWorkoutLogStore::seeded(fixtures.logs),
            InMemoryProfileStore::seeded(fixtures.profile),
            config,
        )
        .with_library(ExerciseLibrary::new(fixtures.exercises))
    }

    /// Seed from the configured fixture directory, or the embedded fixtures
    pub fn from_config(config: Config) -> Result<Self> {
        let fixtures = match &config.fixtures.dir {
            Some(dir) => Fixtures::load_dir(dir)?,
            None => Fixtures::embedded()?,
        };
        Ok(Self::from_fixtures(fixtures, config))
    }
}

impl<W, L, P> Tracker<W, L, P>
where
    W: WorkoutStore,
    L: WorkoutLogStore,
    P: UserProfileStore,
{
    pub fn new(workouts: W, logs: L, profile: P, config: Config) -> Self {
        Self {
            workouts,
            logs,
            profile,
            catalog: get_default_catalog().clone(),
            library: ExerciseLibrary::default(),
            config,
        }
    }

    /// Replace the generation catalog; an invalid catalog is rejected
    pub fn with_catalog(mut self, catalog: ExerciseCatalog) -> Result<Self> {
        let errors = catalog.validate();
        if !errors.is_empty() {
            return Err(Error::CatalogValidation(errors.join("; ")));
        }
        self.catalog = catalog;
        Ok(self)
    }

    pub fn with_library(mut self, library: ExerciseLibrary) -> Self {
        self.library = library;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn library(&self) -> &ExerciseLibrary {
        &self.library
    }

    pub fn workouts(&self) -> &W {
        &self.workouts
    }

    pub fn workouts_mut(&mut self) -> &mut W {
        &mut self.workouts
    }

    pub fn logs(&self) -> &L {
        &self.logs
    }

    pub fn logs_mut(&mut self) -> &mut L {
        &mut self.logs
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut P {
        &mut self.profile
    }

    /// Generate a workout for the stored profile and keep it
    pub fn generate_workout<J: RepJitter + ?Sized>(
        &mut self,
        jitter: &mut J,
        now: DateTime<Utc>,
    ) -> Workout {
        let profile = self.profile.get();
        let workout = generate_workout(
            &self.catalog,
            &profile,
            &self.config.generator,
            jitter,
            now,
        );
        self.workouts.create(workout)
    }

    /// Open a log for `workout_id`, one entry per prescribed exercise
    ///
    /// Fails with `NotFound` when the workout does not exist.
    pub fn start_session(&mut self, workout_id: &str, now: DateTime<Utc>) -> Result<Session> {
        let workout = self
            .workouts
            .get_by_id(workout_id)
            .ok_or_else(|| Error::not_found("workout", workout_id))?;

        let log = self.logs.create(
            NewWorkoutLog {
                workout_id: workout.id.clone(),
                exercises: workout
                    .exercises
                    .iter()
                    .map(|e| ExerciseLog::new(e.name.clone()))
                    .collect(),
                duration_seconds: 0,
            },
            now,
        );

        tracing::info!("Started session {} for workout {}", log.id, workout.id);
        Ok(Session { workout, log })
    }

    pub fn record_set(
        &mut self,
        log_id: &str,
        exercise_index: usize,
        input: SetInput,
        now: DateTime<Utc>,
    ) -> Result<WorkoutLog> {
        self.logs.append_set(log_id, exercise_index, input, now)
    }

    /// Complete the workout and stamp the session log with the same duration
    pub fn complete_workout(
        &mut self,
        workout_id: &str,
        log_id: Option<&str>,
        duration_seconds: u32,
        now: DateTime<Utc>,
    ) -> Result<Workout> {
        if self.workouts.get_by_id(workout_id).is_none() {
            return Err(Error::not_found("workout", workout_id));
        }
        if let Some(log_id) = log_id {
            self.logs.finish(log_id, duration_seconds)?;
        }
        self.workouts.complete(workout_id, duration_seconds, now)
    }

    pub fn dashboard(&self, now: DateTime<Utc>) -> Dashboard {
        let logs = self.logs.get_all();
        Dashboard {
            profile: self.profile.get(),
            todays_workout: self.workouts.todays_workout(now.date_naive()),
            weekly_stats: progress::stats_for_window(
                &logs,
                self.config.progress.weekly_window_days,
                now,
            ),
            streak: progress::streak(&logs, now.date_naive()),
        }
    }

    pub fn progress_overview(&self, now: DateTime<Utc>) -> ProgressOverview {
        let logs = self.logs.get_all();
        let window = recent_logs(&logs, self.config.progress.overview_window_days, now);

        ProgressOverview {
            weekly_stats: progress::stats_for_window(
                &logs,
                self.config.progress.weekly_window_days,
                now,
            ),
            streak: progress::streak(&logs, now.date_naive()),
            personal_records: progress::personal_records(&logs),
            exercises: logged_exercise_names(window.iter().copied()),
        }
    }

    /// Chart for `exercise`; `days` defaults to the configured chart window
    pub fn progress_chart(
        &self,
        exercise: &str,
        days: Option<i64>,
        now: DateTime<Utc>,
    ) -> Vec<ChartPoint> {
        let days = days.unwrap_or(self.config.progress.chart_window_days);
        progress::progress_chart(&self.logs.get_all(), exercise, days, now)
    }

    pub fn personal_records(&self) -> BTreeMap<String, PersonalRecord> {
        progress::personal_records(&self.logs.get_all())
    }

    /// Logs shown on the history screen
    pub fn history(&self, now: DateTime<Utc>) -> Vec<WorkoutLog> {
        self.logs
            .get_recent_logs(self.config.progress.history_window_days, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::FixedJitter;
    use crate::ProfileUpdate;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    fn empty_tracker() -> Tracker {
        crate::logging::init_test();
        Tracker::from_fixtures(Fixtures::default(), Config::default())
    }

    fn beginner_tracker() -> Tracker {
        let mut tracker = empty_tracker();
        tracker.profile_mut().update(ProfileUpdate {
            name: Some("Test".into()),
            goals: Some(vec!["strength".into()]),
            equipment: Some(vec![]),
            experience: Some("beginner".into()),
            schedule: None,
        });
        tracker
    }

    fn squat_set() -> SetInput {
        SetInput {
            reps: 5,
            weight: 100.0,
            completed: true,
        }
    }

    #[test]
    fn test_generated_workout_is_todays_workout() {
        let mut tracker = beginner_tracker();
        let workout = tracker.generate_workout(&mut FixedJitter(0), now());

        assert_eq!(workout.exercises.len(), 4);
        let dashboard = tracker.dashboard(now());
        assert_eq!(dashboard.todays_workout.unwrap().id, workout.id);
        assert_eq!(dashboard.streak, 0);
        assert_eq!(dashboard.weekly_stats, WeeklyStats::default());
    }

    #[test]
    fn test_start_session_unknown_workout() {
        let mut tracker = empty_tracker();
        let err = tracker.start_session("missing", now()).unwrap_err();
        assert!(err.is_not_found());
        assert!(tracker.logs().get_all().is_empty());
    }

    #[test]
    fn test_full_session_flow() {
        let mut tracker = beginner_tracker();
        let workout = tracker.generate_workout(&mut FixedJitter(2), now());
        let session = tracker.start_session(&workout.id, now()).unwrap();

        let names: Vec<_> = session
            .log
            .exercises
            .iter()
            .map(|e| e.exercise_id.as_str())
            .collect();
        assert_eq!(names, vec!["Push-ups", "Squats", "Push-ups", "Squats"]);

        tracker
            .record_set(&session.log.id, 1, squat_set(), now())
            .unwrap();
        let done = tracker
            .complete_workout(&workout.id, Some(&session.log.id), 1500, now())
            .unwrap();
        assert!(done.completed);

        // Completed workouts are no longer offered for today
        let dashboard = tracker.dashboard(now());
        assert!(dashboard.todays_workout.is_none());
        assert_eq!(dashboard.streak, 1);
        assert_eq!(dashboard.weekly_stats.workouts_completed, 1);
        assert_eq!(dashboard.weekly_stats.total_volume, 500.0);
        assert_eq!(dashboard.weekly_stats.avg_duration_seconds, 1500);
    }

    #[test]
    fn test_complete_with_unknown_log_keeps_workout_open() {
        let mut tracker = beginner_tracker();
        let workout = tracker.generate_workout(&mut FixedJitter(0), now());

        let result = tracker.complete_workout(&workout.id, Some("nope"), 60, now());
        assert!(result.unwrap_err().is_not_found());
        assert!(!tracker.workouts().get_by_id(&workout.id).unwrap().completed);
    }

    #[test]
    fn test_complete_unknown_workout_leaves_log_untouched() {
        let mut tracker = beginner_tracker();
        let workout = tracker.generate_workout(&mut FixedJitter(0), now());
        let session = tracker.start_session(&workout.id, now()).unwrap();

        let result =
            tracker.complete_workout("no-such-workout", Some(&session.log.id), 999, now());
        assert!(result.unwrap_err().is_not_found());

        let log = tracker.logs().get_by_id(&session.log.id).unwrap();
        assert_eq!(log.duration_seconds, 0);
        assert!(!tracker.workouts().get_by_id(&workout.id).unwrap().completed);
    }

    #[test]
    fn test_progress_overview_after_three_days() {
        let mut tracker = beginner_tracker();
        let workout = tracker.generate_workout(&mut FixedJitter(0), now());

        for days_ago in [2, 1, 0] {
            let at = now() - Duration::days(days_ago);
            let session = tracker.start_session(&workout.id, at).unwrap();
            tracker.record_set(&session.log.id, 1, squat_set(), at).unwrap();
        }

        let overview = tracker.progress_overview(now());
        assert_eq!(overview.streak, 3);
        assert_eq!(
            overview.exercises,
            vec!["Push-ups".to_string(), "Squats".to_string()]
        );

        let squats = &overview.personal_records["Squats"];
        assert_eq!(squats.max_weight, 100.0);
        assert_eq!(squats.max_reps, 5);
        assert_eq!(squats.max_volume, 500.0);
        // Push-ups were opened but never had a completed set
        assert!(!overview.personal_records.contains_key("Push-ups"));

        let chart = tracker.progress_chart("Squats", None, now());
        assert_eq!(chart.len(), 3);
        assert!(chart.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(tracker.history(now()).len(), 3);
    }

    #[test]
    fn test_with_catalog_rejects_invalid() {
        let result = empty_tracker().with_catalog(ExerciseCatalog::default());
        assert!(matches!(result, Err(Error::CatalogValidation(_))));
    }

    #[test]
    fn test_from_config_uses_embedded_fixtures() {
        let tracker = Tracker::from_config(Config::default()).unwrap();
        assert_eq!(tracker.profile().get().name, "Jordan");
        assert_eq!(tracker.library().all().len(), 10);
        assert!(tracker.workouts().get_by_id("workout_2").is_some());
    }
}
