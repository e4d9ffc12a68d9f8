//! Proficiency Profile
//!
//! Tallies confidence levels per item kind and maps retained counts onto an
//! approximate JLPT level.
//!
//! | Level | Kanji | Vocabulary |
//! |-------|-------|------------|
//! | N5    | 80    | 800        |
//! | N4    | 170   | 1500       |
//! | N3    | 370   | 3750       |
//! | N2    | 1000  | 6000       |
//! | N1    | 2000  | 10000      |

use serde::{Deserialize, Serialize};

use crate::queue::{ItemKind, Reviewable};
use crate::srs::ConfidenceLevel;

/// (level, kanji, vocabulary), hardest first
const JLPT_THRESHOLDS: [(u8, u64, u64); 5] = [
    (1, 2000, 10000),
    (2, 1000, 6000),
    (3, 370, 3750),
    (4, 170, 1500),
    (5, 80, 800),
];

/// Item counts per confidence level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub new: u64,
    pub learning: u64,
    pub reviewing: u64,
    pub known: u64,
}

impl ConfidenceBreakdown {
    /// Tally a sequence of levels
    pub fn from_levels<I: IntoIterator<Item = ConfidenceLevel>>(levels: I) -> Self {
        let mut breakdown = Self::default();
        for level in levels {
            breakdown.add(level);
        }
        breakdown
    }

    /// Count one item
    pub fn add(&mut self, level: ConfidenceLevel) {
        match level {
            ConfidenceLevel::New => self.new += 1,
            ConfidenceLevel::Learning => self.learning += 1,
            ConfidenceLevel::Reviewing => self.reviewing += 1,
            ConfidenceLevel::Known => self.known += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.new + self.learning + self.reviewing + self.known
    }

    /// Items at reviewing or known
    pub fn retained(&self) -> u64 {
        self.reviewing + self.known
    }
}

/// Learner's collection at a glance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProficiencyProfile {
    pub estimated_jlpt_level: Option<u8>,
    pub kanji: ConfidenceBreakdown,
    pub vocab: ConfidenceBreakdown,
    pub total_items: u64,
    pub total_known: u64,
}

impl ProficiencyProfile {
    /// Build from per-kind tallies
    pub fn from_breakdowns(kanji: ConfidenceBreakdown, vocab: ConfidenceBreakdown) -> Self {
        Self {
            estimated_jlpt_level: estimate_jlpt_level(kanji.retained(), vocab.retained()),
            kanji,
            vocab,
            total_items: kanji.total() + vocab.total(),
            total_known: kanji.retained() + vocab.retained(),
        }
    }

    /// Build from item snapshots
    pub fn from_items<T: Reviewable>(items: &[T]) -> Self {
        let mut kanji = ConfidenceBreakdown::default();
        let mut vocab = ConfidenceBreakdown::default();
        for item in items {
            match item.kind() {
                ItemKind::Kanji => kanji.add(item.confidence_level()),
                ItemKind::Vocab => vocab.add(item.confidence_level()),
            }
        }
        Self::from_breakdowns(kanji, vocab)
    }
}

/// Approximate JLPT level (5 = easiest, 1 = hardest) from retained counts
///
/// Both thresholds of a level must be met. Below N5, partial progress
/// (40 kanji or 400 words) still rounds up to N5.
pub fn estimate_jlpt_level(kanji_known: u64, vocab_known: u64) -> Option<u8> {
    if kanji_known == 0 && vocab_known == 0 {
        return None;
    }

    JLPT_THRESHOLDS
        .iter()
        .find(|&&(_, kanji, vocab)| kanji_known >= kanji && vocab_known >= vocab)
        .map(|&(level, _, _)| level)
        .or_else(|| (kanji_known >= 40 || vocab_known >= 400).then_some(5))
}
