//! Test Data Factory
//!
//! Builds realistic item snapshots without running reviews:
//! - Single items at any point of their history
//! - Batches spread over a range of due dates
//! - Pre-built scenarios for queue and forecast tests

use chrono::{DateTime, Duration, Utc};
use kanjikatch_core::{ConfidenceLevel, ItemKind, MemoryState, ReviewItem};

/// Factory for item snapshots
///
/// # Example
///
/// ```rust,ignore
/// let now = TestDeck::epoch();
///
/// // A mature kanji due tomorrow
/// let item = TestDataFactory::create_mature_item("木", ItemKind::Kanji, now + Duration::days(1));
///
/// // Twenty vocabulary items, one due per day
/// let items = TestDataFactory::create_batch(now, BatchConfig { count: 20, ..Default::default() });
/// ```
pub struct TestDataFactory;

/// Configuration for batch generation
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of items to create
    pub count: usize,
    /// Item kind (None = alternate kanji and vocab)
    pub kind: Option<ItemKind>,
    /// Id prefix
    pub id_prefix: String,
    /// Offset of the first due time from `now`, in hours (negative = overdue)
    pub first_due_hours: i64,
    /// Spacing between consecutive due times, in hours
    pub spacing_hours: i64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count: 10,
            kind: None,
            id_prefix: "item".to_string(),
            first_due_hours: 0,
            spacing_hours: 24,
        }
    }
}

/// Named set of items with the expectations a test checks
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub items: Vec<ReviewItem>,
    pub description: String,
    /// Items due at the scenario's `now`
    pub expected_due: usize,
}

impl TestDataFactory {
    /// A never-reviewed item
    pub fn create_new_item(id: &str, kind: ItemKind) -> ReviewItem {
        ReviewItem::new(id, kind)
    }

    /// An item with explicit counters, due at `due`
    pub fn create_item(
        id: &str,
        kind: ItemKind,
        state: MemoryState,
        due: DateTime<Utc>,
    ) -> ReviewItem {
        let mut item = ReviewItem::new(id, kind);
        item.state = state;
        item.next_review_at = Some(due);
        item.last_reviewed_at = Some(due - Duration::days(i64::from(state.interval_days)));
        item
    }

    /// Two reviews in, still on the learning track
    pub fn create_learning_item(id: &str, kind: ItemKind, due: DateTime<Utc>) -> ReviewItem {
        Self::create_item(
            id,
            kind,
            MemoryState {
                interval_days: 3,
                ease_factor: 2.5,
                review_count: 2,
                times_correct: 2,
                confidence_level: ConfidenceLevel::Learning,
            },
            due,
        )
    }

    /// Long interval, high accuracy
    pub fn create_mature_item(id: &str, kind: ItemKind, due: DateTime<Utc>) -> ReviewItem {
        Self::create_item(
            id,
            kind,
            MemoryState {
                interval_days: 45,
                ease_factor: 2.6,
                review_count: 8,
                times_correct: 8,
                confidence_level: ConfidenceLevel::Known,
            },
            due,
        )
    }

    /// Ten items, one due per day starting at `now`
    pub fn create_batch_default(now: DateTime<Utc>) -> Vec<ReviewItem> {
        Self::create_batch(now, BatchConfig::default())
    }

    /// Items due at evenly spaced instants
    pub fn create_batch(now: DateTime<Utc>, config: BatchConfig) -> Vec<ReviewItem> {
        (0..config.count)
            .map(|i| {
                let kind = config.kind.unwrap_or(if i % 2 == 0 {
                    ItemKind::Kanji
                } else {
                    ItemKind::Vocab
                });
                let due = now
                    + Duration::hours(config.first_due_hours)
                    + Duration::hours(config.spacing_hours * i as i64);
                Self::create_learning_item(&format!("{}-{}", config.id_prefix, i), kind, due)
            })
            .collect()
    }

    // ========================================================================
    // SCENARIOS
    // ========================================================================

    /// Overdue, due-now, future and never-scheduled items of both kinds
    pub fn create_queue_scenario(now: DateTime<Utc>) -> TestScenario {
        let mut items = vec![
            Self::create_learning_item("k-overdue", ItemKind::Kanji, now - Duration::days(2)),
            Self::create_learning_item("k-now", ItemKind::Kanji, now),
            Self::create_mature_item("k-future", ItemKind::Kanji, now + Duration::days(3)),
            Self::create_learning_item("v-overdue", ItemKind::Vocab, now - Duration::hours(5)),
            Self::create_mature_item("v-future", ItemKind::Vocab, now + Duration::hours(1)),
        ];
        items.push(Self::create_new_item("k-new", ItemKind::Kanji));
        items.push(Self::create_new_item("v-new", ItemKind::Vocab));

        TestScenario {
            items,
            description: "Mixed due states across both kinds".to_string(),
            expected_due: 5,
        }
    }

    /// More due items of each kind than one mixed session can take
    pub fn create_backlog_scenario(now: DateTime<Utc>, per_kind: usize) -> TestScenario {
        let mut items = Self::create_batch(
            now,
            BatchConfig {
                count: per_kind,
                kind: Some(ItemKind::Kanji),
                id_prefix: "k".to_string(),
                first_due_hours: -(per_kind as i64) - 1,
                spacing_hours: 1,
            },
        );
        items.extend(Self::create_batch(
            now,
            BatchConfig {
                count: per_kind,
                kind: Some(ItemKind::Vocab),
                id_prefix: "v".to_string(),
                first_due_hours: -(per_kind as i64) - 1,
                spacing_hours: 1,
            },
        ));

        TestScenario {
            items,
            description: format!("{per_kind} overdue items of each kind"),
            expected_due: per_kind * 2,
        }
    }
}
