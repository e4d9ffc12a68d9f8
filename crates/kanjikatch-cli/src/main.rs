//! KanjiKatch CLI
//!
//! Command-line front end for the spaced repetition scheduler: preview grade
//! buttons, apply a review, inspect levels and streaks, and simulate how an
//! item's schedule evolves over a sequence of grades.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use kanjikatch_core::{
    AppConfig, ConfidenceLevel, Grade, LevelTier, MemoryState, Scheduler,
    progress::{calculate_level_with_config, update_streak_str},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// KanjiKatch - spaced repetition scheduler CLI
#[derive(Parser)]
#[command(name = "kanjikatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CLI for the KanjiKatch spaced repetition scheduler")]
#[command(long_about = "KanjiKatch schedules kanji and vocabulary reviews with a modified SM-2 algorithm.\n\nAll commands are pure calculations: nothing is stored.")]
struct Cli {
    /// JSON tuning file ({ "scheduler": {...}, "progress": {...} })
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Memory state flags shared by item-level commands
#[derive(clap::Args, Debug, Clone)]
struct StateArgs {
    /// Current interval in days
    #[arg(long, default_value = "1")]
    interval: u32,
    /// Current ease factor
    #[arg(long, default_value = "2.5")]
    ease: f64,
    /// Reviews applied so far
    #[arg(long, default_value = "0")]
    reviews: u32,
    /// Correct reviews so far
    #[arg(long, default_value = "0")]
    correct: u32,
    /// Current confidence level (derived from the counters when omitted)
    #[arg(long)]
    confidence: Option<String>,
}

impl StateArgs {
    fn to_state(&self, scheduler: &Scheduler) -> anyhow::Result<MemoryState> {
        let confidence_level = match &self.confidence {
            Some(name) => ConfidenceLevel::parse_name(name)
                .with_context(|| format!("unknown confidence level '{}'", name))?,
            None if self.reviews == 0 => ConfidenceLevel::New,
            None => ConfidenceLevel::Learning,
        };
        let state = MemoryState {
            interval_days: self.interval,
            ease_factor: self.ease,
            review_count: self.reviews,
            times_correct: self.correct,
            confidence_level,
        };
        state.validate_with_config(scheduler.config())?;
        Ok(state)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show what each grade button would schedule
    Preview {
        #[command(flatten)]
        state: StateArgs,
        /// Consecutive correct answers in the current session
        #[arg(long, default_value = "0")]
        streak_bonus: u32,
    },

    /// Apply one graded review
    Review {
        /// Grade: again, hard, good or easy
        grade: Grade,
        #[command(flatten)]
        state: StateArgs,
        /// Review instant (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// Show level, progress and title for an XP total
    Level {
        /// Total XP
        xp: u64,
    },

    /// Advance a daily streak
    Streak {
        /// Last review day (YYYY-MM-DD)
        #[arg(long)]
        last: Option<String>,
        /// Current streak
        #[arg(long, default_value = "0")]
        current: u32,
        /// Longest streak
        #[arg(long, default_value = "0")]
        longest: u32,
        /// Today (YYYY-MM-DD), defaults to the current UTC day
        #[arg(long)]
        today: Option<String>,
    },

    /// Walk a new item through a sequence of grades
    Simulate {
        /// Comma-separated grades, e.g. good,good,hard,easy
        #[arg(value_delimiter = ',')]
        grades: Vec<Grade>,
        /// Start instant (RFC 3339), defaults to now
        #[arg(long)]
        start: Option<DateTime<Utc>>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = load_config(cli.config.as_ref())?;
    let scheduler = Scheduler::with_config(config)?;

    match cli.command {
        Commands::Preview {
            state,
            streak_bonus,
        } => run_preview(&scheduler, &state, streak_bonus, cli.json),
        Commands::Review { grade, state, now } => {
            run_review(&scheduler, grade, &state, now.unwrap_or_else(Utc::now), cli.json)
        }
        Commands::Level { xp } => run_level(&scheduler, xp, cli.json),
        Commands::Streak {
            last,
            current,
            longest,
            today,
        } => run_streak(last, current, longest, today, cli.json),
        Commands::Simulate { grades, start } => {
            run_simulate(&scheduler, &grades, start.unwrap_or_else(Utc::now), cli.json)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = AppConfig::from_json_str(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!(path = %path.display(), "Loaded scheduler config");
    Ok(config)
}

/// Run preview command
fn run_preview(
    scheduler: &Scheduler,
    state: &StateArgs,
    streak_bonus: u32,
    json: bool,
) -> anyhow::Result<()> {
    let state = state.to_state(scheduler)?;
    let options = scheduler.grade_options(&state, streak_bonus);

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    println!("{}", "=== Grade Options ===".cyan().bold());
    for option in &options {
        let name = format!("{:<6}", option.grade.as_str());
        let name = if option.grade.is_hit() {
            name.green()
        } else {
            name.red()
        };
        println!(
            "{} {:>7}  +{} XP",
            name.bold(),
            option.label,
            option.xp.to_string().yellow()
        );
    }
    Ok(())
}

/// Run review command
fn run_review(
    scheduler: &Scheduler,
    grade: Grade,
    state: &StateArgs,
    now: DateTime<Utc>,
    json: bool,
) -> anyhow::Result<()> {
    let state = state.to_state(scheduler)?;
    let update = scheduler.review(grade, &state, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&update)?);
        return Ok(());
    }

    println!("{}", "=== Review Applied ===".cyan().bold());
    println!("{}: {}", "Grade".white().bold(), grade);
    println!(
        "{}: {} -> {} days",
        "Interval".white().bold(),
        state.interval_days,
        update.state.interval_days
    );
    println!(
        "{}: {:.2} -> {:.2}",
        "Ease".white().bold(),
        state.ease_factor,
        update.state.ease_factor
    );
    println!(
        "{}: {} -> {}",
        "Confidence".white().bold(),
        state.confidence_level,
        update.state.confidence_level
    );
    println!(
        "{}: {}/{}",
        "Correct".white().bold(),
        update.state.times_correct,
        update.state.review_count
    );
    println!(
        "{}: {}",
        "Next Review".white().bold(),
        update.next_review_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}

/// Run level command
fn run_level(scheduler: &Scheduler, xp: u64, json: bool) -> anyhow::Result<()> {
    let info = calculate_level_with_config(xp, scheduler.progress_config());
    let tier = LevelTier::for_level(info.level);

    if json {
        let value = serde_json::json!({
            "level": info.level,
            "xpInLevel": info.xp_in_level,
            "xpForNext": info.xp_for_next,
            "title": tier.label(),
            "titleJa": tier.japanese_label(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{} {} ({} {})",
        "Level".white().bold(),
        info.level.to_string().cyan().bold(),
        tier.label(),
        tier.japanese_label()
    );
    print_progress_bar(info.xp_in_level, info.xp_for_next);
    Ok(())
}

/// Run streak command
fn run_streak(
    last: Option<String>,
    current: u32,
    longest: u32,
    today: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let today = today.unwrap_or_else(|| kanjikatch_core::today_date_string(Utc::now()));
    let update = update_streak_str(last.as_deref(), current, longest, &today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&update)?);
        return Ok(());
    }

    println!(
        "{}: {} -> {}",
        "Current Streak".white().bold(),
        current,
        update.current_streak.to_string().green().bold()
    );
    println!(
        "{}: {}",
        "Longest Streak".white().bold(),
        update.longest_streak
    );
    Ok(())
}

/// Run simulate command
fn run_simulate(
    scheduler: &Scheduler,
    grades: &[Grade],
    start: DateTime<Utc>,
    json: bool,
) -> anyhow::Result<()> {
    let mut state = scheduler.new_item();
    let mut now = start;
    let mut updates = Vec::with_capacity(grades.len());

    for &grade in grades {
        let update = scheduler.review(grade, &state, now);
        debug!(grade = %grade, due = %update.next_review_at, "Simulated review");
        state = update.state;
        // The learner comes back exactly when the item is due
        now = update.next_review_at;
        updates.push((grade, update));
    }

    if json {
        let rows: Vec<_> = updates
            .iter()
            .map(|(grade, update)| serde_json::json!({ "grade": grade, "update": update }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", "=== Simulated Schedule ===".cyan().bold());
    for (i, (grade, update)) in updates.iter().enumerate() {
        println!(
            "{:>3}. {:<6} {:>5}d  ease {:.2}  {:<9}  due {}",
            i + 1,
            grade.as_str(),
            update.state.interval_days,
            update.state.ease_factor,
            update.state.confidence_level.as_str(),
            update.next_review_at.format("%Y-%m-%d")
        );
    }
    if updates.is_empty() {
        println!("{}", "No grades given.".dimmed());
    }
    Ok(())
}

fn print_progress_bar(value: u64, max: u64) {
    const WIDTH: u64 = 30;
    let filled = if max > 0 { value * WIDTH / max } else { 0 };
    let bar = format!(
        "{}{}",
        "#".repeat(filled as usize),
        "-".repeat((WIDTH - filled) as usize)
    );
    println!("[{}] {}/{} XP", bar.green(), value, max);
}
