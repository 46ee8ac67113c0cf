use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use forge_core::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fitforge")]
#[command(about = "Workout generator and progress tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory of fixture JSON files to seed the stores with
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Seed for the rep randomizer (reproducible workouts)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show streak, weekly stats, and today's workout (default)
    Today,

    /// Generate a workout for the stored profile
    Generate,

    /// Best set per session for one exercise
    Progress {
        /// Exercise name as logged, e.g. "Squats"
        #[arg(long)]
        exercise: String,

        /// Window in days (defaults to the configured chart window)
        #[arg(long)]
        days: Option<i64>,
    },

    /// All-time personal records
    Records,

    /// Start a session for a workout
    Session {
        workout_id: String,

        /// Log every prescribed set as performed and complete the workout
        #[arg(long)]
        auto_complete: bool,
    },

    /// Browse the exercise library
    Exercises {
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        forge_core::logging::init_with_level("debug");
    } else {
        forge_core::logging::init();
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(dir) = cli.fixtures {
        config.fixtures.dir = Some(dir);
    }

    let mut tracker = Tracker::from_config(config)?;
    let now = Utc::now();
    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    match cli.command.unwrap_or(Commands::Today) {
        Commands::Today => cmd_today(&tracker, now, cli.json),
        Commands::Generate => {
            let workout = tracker.generate_workout(&mut rng, now);
            emit(&workout, cli.json, || display_workout(&workout))
        }
        Commands::Progress { exercise, days } => {
            let points = tracker.progress_chart(&exercise, days, now);
            emit(&points, cli.json, || display_chart(&exercise, &points))
        }
        Commands::Records => {
            let records = tracker.personal_records();
            emit(&records, cli.json, || {
                if records.is_empty() {
                    println!("No personal records yet.");
                }
                for (name, record) in &records {
                    println!(
                        "  {:<18} max {} lb  |  {} reps  |  {} volume",
                        name, record.max_weight, record.max_reps, record.max_volume
                    );
                }
            })
        }
        Commands::Session {
            workout_id,
            auto_complete,
        } => cmd_session(&mut tracker, &workout_id, auto_complete, now, cli.json),
        Commands::Exercises { search, category } => {
            let library = tracker.library();
            let mut entries: Vec<&ExerciseInfo> = match &search {
                Some(query) => library.search_by_name(query),
                None => library.all().iter().collect(),
            };
            if let Some(category) = &category {
                entries.retain(|e| &e.category == category);
            }
            emit(&entries, cli.json, || {
                for entry in &entries {
                    println!("  {} ({}, {})", entry.name, entry.category, entry.equipment);
                    for tip in &entry.form_tips {
                        println!("    - {}", tip);
                    }
                }
            })
        }
    }
}

fn cmd_today(tracker: &Tracker, now: DateTime<Utc>, json: bool) -> Result<()> {
    let dashboard = tracker.dashboard(now);
    emit(&dashboard, json, || {
        println!("\nHello, {}!", dashboard.profile.name);
        println!("  Streak: {} day(s)", dashboard.streak);
        println!(
            "  This week: {} workout(s), {} total volume, {}s average",
            dashboard.weekly_stats.workouts_completed,
            dashboard.weekly_stats.total_volume,
            dashboard.weekly_stats.avg_duration_seconds
        );
        match &dashboard.todays_workout {
            Some(workout) => display_workout(workout),
            None => println!("\n  No workout planned for today. Run `fitforge generate`."),
        }
    })
}

fn cmd_session(
    tracker: &mut Tracker,
    workout_id: &str,
    auto_complete: bool,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let session = tracker.start_session(workout_id, now)?;

    if !auto_complete {
        return emit(&session, json, || {
            println!("\nStarted session {}", session.log.id);
            display_workout(&session.workout);
        });
    }

    let mut duration = 0;
    for (index, exercise) in session.workout.exercises.iter().enumerate() {
        for _ in 0..exercise.sets {
            let input = SetInput {
                reps: exercise.reps,
                weight: exercise.weight,
                completed: true,
            };
            tracker.record_set(&session.log.id, index, input, now)?;
            duration += exercise.rest_time_seconds;
        }
    }

    let workout = tracker.complete_workout(workout_id, Some(&session.log.id), duration, now)?;
    tracing::debug!("Auto-completed workout {}", workout.id);
    let log = tracker
        .logs()
        .get_by_id(&session.log.id)
        .ok_or_else(|| Error::Other(format!("log {} vanished", session.log.id)))?;

    let volume = weekly_stats(std::slice::from_ref(&log), now).total_volume;
    emit(&log, json, || {
        println!("\n✓ Session logged!");
        println!("  Duration: {} min", duration / 60);
        println!("  Volume: {}", volume);
    })
}

/// Print `value` as JSON, or run the text renderer
fn emit<T: Serialize>(value: &T, json: bool, text: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text();
    }
    Ok(())
}

fn display_workout(workout: &Workout) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} WORKOUT ({})", workout.workout_type.to_uppercase(), workout.difficulty);
    println!("╰─────────────────────────────────────────╯");
    println!("  id: {}", workout.id);
    println!();

    if workout.exercises.is_empty() {
        println!("  No exercises match your equipment.");
    }
    for exercise in &workout.exercises {
        let load = if exercise.weight > 0.0 {
            format!(" @ {} lb", exercise.weight)
        } else {
            String::new()
        };
        println!(
            "  → {:<18} {} x {}{}  (rest {}s)",
            exercise.name, exercise.sets, exercise.reps, load, exercise.rest_time_seconds
        );
    }
    println!();
}

fn display_chart(exercise: &str, points: &[ChartPoint]) {
    if points.is_empty() {
        println!("No logged sets for {}.", exercise);
        return;
    }
    println!("\n{}:", exercise);
    for point in points {
        println!(
            "  {}  {} x {}  (volume {})",
            point.date, point.weight, point.reps, point.volume
        );
    }
}
