//! Review Sessions
//!
//! A session groups the reviews a learner does in one sitting. It tallies
//! answers and XP, and closes with a summary that includes the completion
//! bonus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, SchedulerError};

/// Which items a session draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Kanji,
    Vocab,
    #[default]
    Mixed,
}

impl SessionType {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Kanji => "kanji",
            SessionType::Vocab => "vocab",
            SessionType::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kanji" => Ok(SessionType::Kanji),
            "vocab" => Ok(SessionType::Vocab),
            "mixed" => Ok(SessionType::Mixed),
            other => Err(format!("unknown session type '{}'", other)),
        }
    }
}

/// One sitting of reviews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSession {
    pub id: Uuid,
    pub session_type: SessionType,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub items_reviewed: u32,
    pub items_correct: u32,
    pub xp_earned: u64,
}

/// Closing summary of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub items_reviewed: u32,
    pub items_correct: u32,
    /// Rounded percentage, 0 for an empty session
    pub accuracy: u32,
    /// Including the completion bonus
    pub xp_earned: u64,
    pub duration_ms: i64,
    pub completed_at: DateTime<Utc>,
}

impl ReviewSession {
    /// Start a session
    pub fn start(session_type: SessionType, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_type,
            started_at: now,
            completed_at: None,
            items_reviewed: 0,
            items_correct: 0,
            xp_earned: 0,
        }
    }

    /// Whether the session has been closed
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Tally one answered item
    pub fn record_answer(&mut self, was_correct: bool, xp: u32) {
        self.items_reviewed = self.items_reviewed.saturating_add(1);
        self.items_correct += u32::from(was_correct);
        self.xp_earned = self.xp_earned.saturating_add(u64::from(xp));
    }

    /// Close the session, adding the completion bonus
    pub fn complete(&mut self, now: DateTime<Utc>, completion_xp: u32) -> Result<SessionSummary> {
        if self.is_completed() {
            return Err(SchedulerError::SessionAlreadyCompleted(self.id));
        }

        self.completed_at = Some(now);
        self.xp_earned = self.xp_earned.saturating_add(u64::from(completion_xp));

        let accuracy = if self.items_reviewed > 0 {
            (f64::from(self.items_correct) / f64::from(self.items_reviewed) * 100.0).round() as u32
        } else {
            0
        };
        let duration_ms = (now - self.started_at).num_milliseconds();

        debug!(
            session_id = %self.id,
            items_reviewed = self.items_reviewed,
            accuracy,
            xp_earned = self.xp_earned,
            "Session completed"
        );

        Ok(SessionSummary {
            session_id: self.id,
            items_reviewed: self.items_reviewed,
            items_correct: self.items_correct,
            accuracy,
            xp_earned: self.xp_earned,
            duration_ms,
            completed_at: now,
        })
    }
}
