//! Tuning configuration
//!
//! Every constant the scheduler and the progress tracker use lives here with
//! a default matching the reference tuning. Callers that never touch a config
//! get exactly those defaults through the free-function shortcuts.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::srs::Grade;

// ============================================================================
// SCHEDULER CONFIG
// ============================================================================

/// Interval, ease and confidence tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerConfig {
    /// Ease floor enforced after every branch
    pub min_ease_factor: f64,
    /// Ease of an item that was never reviewed
    pub starting_ease_factor: f64,
    /// Ease subtracted on a miss
    pub miss_ease_penalty: f64,
    /// Fixed intervals (days) for the first reviews of a new item
    pub learning_steps: Vec<u32>,
    /// Learning-step multiplier applied to `easy`
    pub easy_learning_multiplier: u32,
    /// Interval after the first graduated review of a one-day item
    pub graduation_interval: u32,
    /// Shrink factor applied to `hard` once graduated
    pub hard_interval_factor: f64,
    /// Boost factor applied to `easy` once graduated
    pub easy_interval_bonus: f64,
    /// Interval (days) an item must exceed to be classified as known
    pub known_min_interval: u32,
    /// Accuracy an item must reach to be classified as known
    pub known_min_accuracy: f64,
    /// Correct answers needed to reach reviewing
    pub reviewing_min_correct: u32,
    /// A miss at or below this review count drops the item to learning
    pub young_item_max_reviews: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_ease_factor: 1.3,
            starting_ease_factor: 2.5,
            miss_ease_penalty: 0.2,
            learning_steps: vec![1, 3],
            easy_learning_multiplier: 2,
            graduation_interval: 6,
            hard_interval_factor: 0.8,
            easy_interval_bonus: 1.3,
            known_min_interval: 21,
            known_min_accuracy: 0.85,
            reviewing_min_correct: 3,
            young_item_max_reviews: 2,
        }
    }
}

impl SchedulerConfig {
    /// Check that the values keep the algorithm's floors meaningful
    pub fn validate(&self) -> Result<()> {
        if !self.min_ease_factor.is_finite() || self.min_ease_factor <= 0.0 {
            return Err(invalid("minEaseFactor must be positive and finite"));
        }
        if !self.starting_ease_factor.is_finite()
            || self.starting_ease_factor < self.min_ease_factor
        {
            return Err(invalid("startingEaseFactor must not be below minEaseFactor"));
        }
        if !self.miss_ease_penalty.is_finite() || self.miss_ease_penalty < 0.0 {
            return Err(invalid("missEasePenalty must be finite and not negative"));
        }
        if self.learning_steps.iter().any(|&step| step == 0) {
            return Err(invalid("learningSteps must all be at least one day"));
        }
        if self.easy_learning_multiplier == 0 || self.graduation_interval == 0 {
            return Err(invalid("easyLearningMultiplier and graduationInterval must be positive"));
        }
        if self.hard_interval_factor.is_nan()
            || self.hard_interval_factor <= 0.0
            || self.hard_interval_factor > 1.0
        {
            return Err(invalid("hardIntervalFactor must be in (0, 1]"));
        }
        if !self.easy_interval_bonus.is_finite() || self.easy_interval_bonus < 1.0 {
            return Err(invalid("easyIntervalBonus must be finite and at least 1.0"));
        }
        if !(0.0..=1.0).contains(&self.known_min_accuracy) {
            return Err(invalid("knownMinAccuracy must be in [0, 1]"));
        }
        Ok(())
    }
}

// ============================================================================
// PROGRESS CONFIG
// ============================================================================

/// Base XP awarded per grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpRewards {
    pub again: u32,
    pub hard: u32,
    pub good: u32,
    pub easy: u32,
}

impl Default for XpRewards {
    fn default() -> Self {
        Self {
            again: 2,
            hard: 10,
            good: 10,
            easy: 15,
        }
    }
}

impl XpRewards {
    /// Base reward for a grade
    pub fn for_grade(&self, grade: Grade) -> u32 {
        match grade {
            Grade::Again => self.again,
            Grade::Hard => self.hard,
            Grade::Good => self.good,
            Grade::Easy => self.easy,
        }
    }
}

/// XP, leveling and daily goal tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressConfig {
    /// Base XP per grade
    pub xp_rewards: XpRewards,
    /// XP added per point of streak bonus on a hit
    pub streak_bonus_multiplier: u32,
    /// Flat XP threshold per level
    pub xp_per_level: u64,
    /// Bonus awarded once per completed session
    pub session_completion_xp: u32,
    /// Reviews per day a new learner aims for
    pub default_daily_goal: u32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            xp_rewards: XpRewards::default(),
            streak_bonus_multiplier: 2,
            xp_per_level: 500,
            session_completion_xp: 25,
            default_daily_goal: 10,
        }
    }
}

impl ProgressConfig {
    /// Check that leveling is well defined
    pub fn validate(&self) -> Result<()> {
        if self.xp_per_level == 0 {
            return Err(invalid("xpPerLevel must be positive"));
        }
        Ok(())
    }
}

// ============================================================================
// COMBINED CONFIG
// ============================================================================

/// Full tuning document, as loaded from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub scheduler: SchedulerConfig,
    pub progress: ProgressConfig,
}

impl AppConfig {
    /// Parse and validate a JSON config; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate both sections
    pub fn validate(&self) -> Result<()> {
        self.scheduler.validate()?;
        self.progress.validate()
    }
}

fn invalid(msg: &str) -> SchedulerError {
    SchedulerError::InvalidConfig(msg.to_string())
}
