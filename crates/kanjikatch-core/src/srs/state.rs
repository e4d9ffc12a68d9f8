//! Memory State - the per-item scheduling snapshot
//!
//! Each learnable item (kanji or vocabulary word) carries:
//! - Current interval and ease factor
//! - Review and correct-answer counters
//! - A coarse confidence classification derived from those counters
//!
//! The persistence layer owns these values. They change only through the
//! scheduler's pure functions, which take a snapshot and return a new one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::error::{Result, SchedulerError};
use crate::srs::algorithm::STARTING_EASE_FACTOR;

// ============================================================================
// GRADE
// ============================================================================

/// Learner's self-reported recall quality for one review
///
/// Maps onto the SM-2 quality scale:
///
/// | Grade | Quality | Meaning                   |
/// |-------|---------|---------------------------|
/// | Again | 1       | Wrong, reset              |
/// | Hard  | 3       | Correct but struggled     |
/// | Good  | 4       | Solid recall              |
/// | Easy  | 5       | Instant, effortless       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    /// Forgot the item
    Again,
    /// Recalled with serious difficulty
    Hard,
    /// Recalled after some hesitation
    Good,
    /// Recalled perfectly
    Easy,
}

impl Grade {
    /// All grades in button order (low to high recall quality)
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    /// SM-2 quality value for this grade
    #[inline]
    pub fn quality(&self) -> u8 {
        match self {
            Grade::Again => 1,
            Grade::Hard => 3,
            Grade::Good => 4,
            Grade::Easy => 5,
        }
    }

    /// Whether this grade counts as a correct answer (quality >= 3)
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.quality() >= 3
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "again" => Ok(Grade::Again),
            "hard" => Ok(Grade::Hard),
            "good" => Ok(Grade::Good),
            "easy" => Ok(Grade::Easy),
            other => Err(format!("unknown grade '{}' (expected again|hard|good|easy)", other)),
        }
    }
}

// ============================================================================
// CONFIDENCE LEVEL
// ============================================================================

/// Coarse mastery classification
///
/// Recomputed from the counters on every review rather than transitioned
/// incrementally, so it can step down as well as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// Never reviewed
    #[default]
    New,
    /// Early reviews or a recent miss on a young item
    Learning,
    /// Several correct answers, or a miss on a mature item
    Reviewing,
    /// Long interval with high historical accuracy
    Known,
}

impl ConfidenceLevel {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::New => "new",
            ConfidenceLevel::Learning => "learning",
            ConfidenceLevel::Reviewing => "reviewing",
            ConfidenceLevel::Known => "known",
        }
    }

    /// Parse from string name
    pub fn parse_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new" => Some(ConfidenceLevel::New),
            "learning" => Some(ConfidenceLevel::Learning),
            "reviewing" => Some(ConfidenceLevel::Reviewing),
            "known" => Some(ConfidenceLevel::Known),
            _ => None,
        }
    }

    /// Whether the item counts toward proficiency estimates
    #[inline]
    pub fn is_retained(&self) -> bool {
        matches!(self, ConfidenceLevel::Reviewing | ConfidenceLevel::Known)
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// MEMORY STATE
// ============================================================================

/// Scheduling state of a single learnable item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryState {
    /// Days until the next review after the last successful scheduling
    pub interval_days: u32,
    /// Interval growth multiplier (higher = easier item)
    pub ease_factor: f64,
    /// Total number of graded reviews ever applied
    pub review_count: u32,
    /// Reviews graded as correct (quality >= 3)
    pub times_correct: u32,
    /// Coarse classification derived from history
    pub confidence_level: ConfidenceLevel,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryState {
    /// State of an item that just entered the collection
    pub fn new() -> Self {
        Self {
            interval_days: 1,
            ease_factor: STARTING_EASE_FACTOR,
            review_count: 0,
            times_correct: 0,
            confidence_level: ConfidenceLevel::New,
        }
    }

    /// Historical accuracy in `0.0..=1.0`, `None` before the first review
    pub fn accuracy(&self) -> Option<f64> {
        if self.review_count == 0 {
            None
        } else {
            Some(self.times_correct as f64 / self.review_count as f64)
        }
    }

    /// Whether the item has passed the fixed learning steps
    pub fn is_graduated(&self, learning_steps: usize) -> bool {
        self.review_count as usize >= learning_steps
    }

    /// Check the snapshot invariants against the default tuning
    ///
    /// Intended for the boundary where snapshots come back from storage. The
    /// scheduler itself assumes validated input and panics otherwise.
    pub fn validate(&self) -> Result<()> {
        self.validate_with_config(&SchedulerConfig::default())
    }

    /// Check the snapshot invariants against a custom ease floor
    pub fn validate_with_config(&self, config: &SchedulerConfig) -> Result<()> {
        if !self.ease_factor.is_finite() || self.ease_factor < config.min_ease_factor {
            return Err(SchedulerError::InvalidState(format!(
                "ease factor {} is below the floor of {}",
                self.ease_factor, config.min_ease_factor
            )));
        }
        if self.times_correct > self.review_count {
            return Err(SchedulerError::InvalidState(format!(
                "times correct ({}) exceeds review count ({})",
                self.times_correct, self.review_count
            )));
        }
        let is_new = self.confidence_level == ConfidenceLevel::New;
        if is_new != (self.review_count == 0) {
            return Err(SchedulerError::InvalidState(format!(
                "confidence level '{}' is inconsistent with {} reviews",
                self.confidence_level, self.review_count
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SCHEDULE UPDATE
// ============================================================================

/// Result of applying one graded review to an item
///
/// Built fresh for every review and handed to the caller to persist verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUpdate {
    /// Updated scheduling state
    #[serde(flatten)]
    pub state: MemoryState,
    /// When the item becomes due again
    pub next_review_at: DateTime<Utc>,
    /// The review instant
    pub last_reviewed_at: DateTime<Utc>,
}

/// Interval/ease pair produced by the interval calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalResult {
    /// Days until the next review
    pub interval_days: u32,
    /// Updated ease factor
    pub ease_factor: f64,
}

/// One grade button with what choosing it would imply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOption {
    /// The grade
    pub grade: Grade,
    /// SM-2 quality for the grade
    pub quality: u8,
    /// Interval the grade would schedule
    pub next_interval_days: u32,
    /// XP the grade would award
    pub xp: u32,
    /// Human-readable interval
    pub label: String,
}
