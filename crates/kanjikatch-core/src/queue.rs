//! Review Queue and Forecast
//!
//! Selection and counting over item snapshots the caller already loaded.
//! Nothing here touches storage.
//!
//! An item is due when it was never scheduled or its `next_review_at` has
//! passed. Overdue items come first, oldest due date first; never-scheduled
//! items follow.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionType;
use crate::srs::{ConfidenceLevel, MemoryState, ScheduleUpdate};

/// Queue size when the caller does not ask for one
pub const DEFAULT_QUEUE_LIMIT: usize = 10;

/// Largest queue handed out at once
pub const MAX_QUEUE_LIMIT: usize = 50;

/// Days covered by the default forecast
pub const DEFAULT_FORECAST_DAYS: u32 = 7;

// ============================================================================
// ITEMS
// ============================================================================

/// Kind of learnable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Kanji,
    Vocab,
}

/// Anything the queue can schedule
pub trait Reviewable {
    /// Kanji or vocabulary
    fn kind(&self) -> ItemKind;
    /// When the item is due, `None` if never scheduled
    fn next_review_at(&self) -> Option<DateTime<Utc>>;
    /// Current confidence classification
    fn confidence_level(&self) -> ConfidenceLevel;
}

/// Minimal owned item snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub id: String,
    pub kind: ItemKind,
    pub state: MemoryState,
    pub next_review_at: Option<DateTime<Utc>>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl ReviewItem {
    /// A freshly captured item
    pub fn new(id: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            kind,
            state: MemoryState::new(),
            next_review_at: None,
            last_reviewed_at: None,
        }
    }

    /// Store a scheduler result on the item
    pub fn apply(&mut self, update: &ScheduleUpdate) {
        self.state = update.state;
        self.next_review_at = Some(update.next_review_at);
        self.last_reviewed_at = Some(update.last_reviewed_at);
    }
}

impl Reviewable for ReviewItem {
    fn kind(&self) -> ItemKind {
        self.kind
    }

    fn next_review_at(&self) -> Option<DateTime<Utc>> {
        self.next_review_at
    }

    fn confidence_level(&self) -> ConfidenceLevel {
        self.state.confidence_level
    }
}

/// Whether an item is due at `now`
pub fn is_due<T: Reviewable>(item: &T, now: DateTime<Utc>) -> bool {
    item.next_review_at().is_none_or(|at| at <= now)
}

// ============================================================================
// QUEUE
// ============================================================================

fn due_of_kind<T: Reviewable>(items: &[T], kind: ItemKind, now: DateTime<Utc>) -> Vec<&T> {
    let mut due: Vec<&T> = items
        .iter()
        .filter(|item| item.kind() == kind && is_due(*item, now))
        .collect();
    due.sort_by_key(|item| (item.next_review_at().is_none(), item.next_review_at()));
    due
}

/// Pick the next items to review
///
/// `limit` is clamped to `1..=50`. Mixed sessions split the queue between
/// kanji and vocabulary and alternate them.
pub fn build_queue<T: Reviewable>(
    items: &[T],
    session_type: SessionType,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<&T> {
    let limit = limit.clamp(1, MAX_QUEUE_LIMIT);
    let mixed = session_type == SessionType::Mixed;

    let mut kanji = Vec::new();
    if matches!(session_type, SessionType::Kanji | SessionType::Mixed) {
        let take = if mixed { limit.div_ceil(2) } else { limit };
        kanji = due_of_kind(items, ItemKind::Kanji, now);
        kanji.truncate(take);
    }

    let mut vocab = Vec::new();
    if matches!(session_type, SessionType::Vocab | SessionType::Mixed) {
        let take = if mixed {
            (limit - kanji.len()).max(limit / 2)
        } else {
            limit
        };
        vocab = due_of_kind(items, ItemKind::Vocab, now);
        vocab.truncate(take);
    }

    let mut queue = if mixed {
        interleave(kanji, vocab)
    } else {
        kanji.into_iter().chain(vocab).collect()
    };
    queue.truncate(limit);
    queue
}

fn interleave<T>(first: Vec<T>, second: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(first.len() + second.len());
    let mut first = first.into_iter();
    let mut second = second.into_iter();
    loop {
        match (first.next(), second.next()) {
            (None, None) => break,
            (a, b) => out.extend(a.into_iter().chain(b)),
        }
    }
    out
}

// ============================================================================
// COUNTS
// ============================================================================

/// Due item counts per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueCounts {
    pub kanji: usize,
    pub vocab: usize,
    pub total: usize,
}

impl DueCounts {
    fn add(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::Kanji => self.kanji += 1,
            ItemKind::Vocab => self.vocab += 1,
        }
        self.total += 1;
    }
}

/// Count items due at `now`
pub fn due_counts<T: Reviewable>(items: &[T], now: DateTime<Utc>) -> DueCounts {
    let mut counts = DueCounts::default();
    for item in items.iter().filter(|item| is_due(*item, now)) {
        counts.add(item.kind());
    }
    counts
}

/// Review load for one UTC calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub kanji: usize,
    pub vocab: usize,
    pub total: usize,
}

/// Upcoming review load for the next `days` UTC days, starting today
///
/// Today's bucket also holds everything overdue or never scheduled.
pub fn forecast<T: Reviewable>(items: &[T], now: DateTime<Utc>, days: u32) -> Vec<ForecastDay> {
    let today = now.date_naive();

    (0..days)
        .filter_map(|offset| {
            let date = today.checked_add_days(Days::new(u64::from(offset)))?;
            let day_start = date.and_time(NaiveTime::MIN).and_utc();
            let day_end = date.succ_opt()?.and_time(NaiveTime::MIN).and_utc();

            let mut counts = DueCounts::default();
            for item in items {
                let in_bucket = match item.next_review_at() {
                    None => offset == 0,
                    Some(at) if offset == 0 => at < day_end,
                    Some(at) => at >= day_start && at < day_end,
                };
                if in_bucket {
                    counts.add(item.kind());
                }
            }

            Some(ForecastDay {
                date,
                kanji: counts.kanji,
                vocab: counts.vocab,
                total: counts.total,
            })
        })
        .collect()
}
