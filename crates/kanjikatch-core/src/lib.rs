//! # KanjiKatch Core
//!
//! Spaced repetition scheduler for kanji and vocabulary learners.
//!
//! - **Modified SM-2**: two fixed learning steps, then ease-driven interval growth
//! - **Confidence levels**: new / learning / reviewing / known, recomputed per review
//! - **Grade previews**: what each of the four buttons would schedule, before grading
//! - **Gamification**: XP per review, flat 500 XP levels, tier titles, daily streaks
//! - **Queue and forecast**: due-item selection and a 7-day review load outlook
//!
//! Every function is pure. State comes in as a snapshot and goes out as a new
//! snapshot; storage, clocks and concurrency control belong to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use kanjikatch_core::{Grade, MemoryState, get_grade_options, process_review};
//!
//! let item = MemoryState::new();
//!
//! // Show the learner what each grade would do
//! for option in get_grade_options(&item, 0) {
//!     println!("{}: {} (+{} XP)", option.grade, option.label, option.xp);
//! }
//!
//! // Apply the chosen grade and persist the result
//! let update = process_review(Grade::Good, &item, Utc::now());
//! assert_eq!(update.state.review_count, 1);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod config;
pub mod error;
pub mod format;
pub mod proficiency;
pub mod progress;
pub mod queue;
pub mod session;
pub mod srs;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Scheduler
pub use srs::{
    add_days,
    calculate_next_interval,
    calculate_next_interval_with_config,
    compute_confidence,
    compute_confidence_with_config,
    get_grade_options,
    process_review,
    ConfidenceLevel,
    Grade,
    GradeOption,
    IntervalResult,
    MemoryState,
    ScheduleUpdate,
    Scheduler,
    LEARNING_STEPS,
    MIN_EASE_FACTOR,
    STARTING_EASE_FACTOR,
};

// Progress (XP, levels, streaks)
pub use progress::{
    calculate_level,
    calculate_xp,
    level_title,
    parse_review_date,
    session_completion_xp,
    today_date_string,
    update_streak,
    update_streak_str,
    LearnerProgress,
    LevelInfo,
    LevelTier,
    ProgressStats,
    StreakUpdate,
    SESSION_COMPLETION_XP,
    XP_PER_LEVEL,
};

// Sessions, queue, proficiency
pub use proficiency::{estimate_jlpt_level, ConfidenceBreakdown, ProficiencyProfile};
pub use queue::{
    build_queue, due_counts, forecast, is_due, DueCounts, ForecastDay, ItemKind, ReviewItem,
    Reviewable, DEFAULT_FORECAST_DAYS, DEFAULT_QUEUE_LIMIT, MAX_QUEUE_LIMIT,
};
pub use session::{ReviewSession, SessionSummary, SessionType};

// Configuration and errors
pub use config::{AppConfig, ProgressConfig, SchedulerConfig, XpRewards};
pub use error::{Result, SchedulerError};

pub use format::format_interval;

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        AppConfig, ConfidenceLevel, Grade, GradeOption, LearnerProgress, MemoryState,
        ReviewItem, ReviewSession, Result, ScheduleUpdate, Scheduler, SchedulerError,
        SessionType,
    };
}
