//! Learner Progress Module
//!
//! Gamification layered on top of the scheduler:
//! - XP per graded review, with a streak bonus on correct answers
//! - Flat 500 XP levels and five title tiers
//! - Daily review streaks on UTC calendar days
//! - The per-learner aggregate tying them together

pub mod learner;
pub mod streak;
pub mod xp;

pub use learner::{LearnerProgress, ProgressStats};
pub use streak::{
    parse_review_date, review_day, today_date_string, update_streak, update_streak_str,
    StreakUpdate, DATE_FORMAT,
};
pub use xp::{
    calculate_level, calculate_level_with_config, calculate_xp, calculate_xp_with_config,
    level_title, session_completion_xp, LevelInfo, LevelTier, SESSION_COMPLETION_XP, XP_PER_LEVEL,
};
