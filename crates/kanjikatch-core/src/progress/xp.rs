//! XP rewards and leveling
//!
//! Flat curve: every level costs the same XP. Titles come in five tiers.

use serde::{Deserialize, Serialize};

use crate::config::ProgressConfig;
use crate::srs::Grade;

/// XP needed per level in the reference tuning
pub const XP_PER_LEVEL: u64 = 500;

/// Bonus for finishing a review session
pub const SESSION_COMPLETION_XP: u32 = 25;

// ============================================================================
// XP
// ============================================================================

/// XP for a single graded review, using the default tuning
///
/// The streak bonus (`streak_bonus * 2`) only applies to hits.
pub fn calculate_xp(grade: Grade, streak_bonus: u32) -> u32 {
    calculate_xp_with_config(grade, streak_bonus, &ProgressConfig::default())
}

/// XP for a single graded review
pub fn calculate_xp_with_config(grade: Grade, streak_bonus: u32, config: &ProgressConfig) -> u32 {
    let base = config.xp_rewards.for_grade(grade);
    let bonus = if grade.is_hit() {
        streak_bonus.saturating_mul(config.streak_bonus_multiplier)
    } else {
        0
    };
    base.saturating_add(bonus)
}

/// Session completion bonus in the reference tuning
pub fn session_completion_xp() -> u32 {
    SESSION_COMPLETION_XP
}

// ============================================================================
// LEVELS
// ============================================================================

/// Level derived from total XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    /// 1-based level
    pub level: u32,
    /// XP earned inside the current level
    pub xp_in_level: u64,
    /// XP the current level spans
    pub xp_for_next: u64,
}

/// Level for a total XP amount, using the default tuning
pub fn calculate_level(total_xp: u64) -> LevelInfo {
    calculate_level_with_config(total_xp, &ProgressConfig::default())
}

/// Level for a total XP amount
pub fn calculate_level_with_config(total_xp: u64, config: &ProgressConfig) -> LevelInfo {
    let per_level = config.xp_per_level.max(1);
    let level = u32::try_from(total_xp / per_level)
        .unwrap_or(u32::MAX - 1)
        .saturating_add(1);
    LevelInfo {
        level,
        xp_in_level: total_xp % per_level,
        xp_for_next: per_level,
    }
}

// ============================================================================
// TITLES
// ============================================================================

/// Title tier for a level range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelTier {
    /// Levels 1-5
    Beginner,
    /// Levels 6-10
    Student,
    /// Levels 11-20
    Reader,
    /// Levels 21-35
    Expert,
    /// Level 36 and up
    Master,
}

impl LevelTier {
    /// Tier for a level
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=5 => LevelTier::Beginner,
            6..=10 => LevelTier::Student,
            11..=20 => LevelTier::Reader,
            21..=35 => LevelTier::Expert,
            _ => LevelTier::Master,
        }
    }

    /// English label
    pub fn label(&self) -> &'static str {
        match self {
            LevelTier::Beginner => "Beginner",
            LevelTier::Student => "Student",
            LevelTier::Reader => "Reader",
            LevelTier::Expert => "Expert",
            LevelTier::Master => "Master",
        }
    }

    /// Japanese label shown in the app
    pub fn japanese_label(&self) -> &'static str {
        match self {
            LevelTier::Beginner => "初心者",
            LevelTier::Student => "学生",
            LevelTier::Reader => "読者",
            LevelTier::Expert => "達人",
            LevelTier::Master => "先生",
        }
    }
}

impl std::fmt::Display for LevelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// English title for a level
pub fn level_title(level: u32) -> &'static str {
    LevelTier::for_level(level).label()
}
