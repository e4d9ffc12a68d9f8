//! Modified SM-2 core formulas
//!
//! Pure functions: same inputs always produce the same outputs, so they serve
//! both the committed update and the grade-button preview.
//!
//! ## Phases
//!
//! 1. **Miss** (`again`): interval resets to 1 day, ease drops by 0.2
//! 2. **Learning** (first two reviews): fixed steps of 1 and 3 days, doubled on `easy`
//! 3. **Graduated**: classic SM-2 growth, then `hard` shrinks and `easy` boosts
//!
//! Ease is rounded to two decimals whenever it changes and never drops below 1.3.
//! Intervals never drop below one day.

use chrono::{DateTime, Days, Utc};

use crate::config::SchedulerConfig;
use crate::srs::state::{ConfidenceLevel, Grade, IntervalResult, MemoryState};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Ease floor
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease of a brand-new item
pub const STARTING_EASE_FACTOR: f64 = 2.5;

/// Fixed learning intervals (days) for the first reviews
pub const LEARNING_STEPS: [u32; 2] = [1, 3];

// ============================================================================
// HELPERS
// ============================================================================

/// Round to two decimal places
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round an ease to two decimals and enforce the floor
#[inline]
pub fn clamp_ease(ease: f64, min_ease: f64) -> f64 {
    round2(ease).max(min_ease)
}

/// SM-2 ease delta for a quality value
///
/// `0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)`: +0.10 at q=5, 0.00 at q=4,
/// -0.14 at q=3.
#[inline]
pub fn ease_adjustment(quality: u8) -> f64 {
    let distance = 5.0 - f64::from(quality);
    0.1 - distance * (0.08 + distance * 0.02)
}

#[inline]
fn round_days(days: f64) -> u32 {
    // `as` saturates: negative -> 0, overflow -> u32::MAX
    days.round() as u32
}

/// Advance a timestamp by whole calendar days
///
/// Saturates at the largest representable instant instead of overflowing.
pub fn add_days(instant: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    instant
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

// ============================================================================
// INTERVAL / EASE
// ============================================================================

/// Next interval and ease for a grade, using the default tuning
pub fn calculate_next_interval(grade: Grade, current: &MemoryState) -> IntervalResult {
    calculate_next_interval_with_config(grade, current, &SchedulerConfig::default())
}

/// Next interval and ease for a grade
pub fn calculate_next_interval_with_config(
    grade: Grade,
    current: &MemoryState,
    config: &SchedulerConfig,
) -> IntervalResult {
    assert!(
        current.ease_factor >= config.min_ease_factor,
        "ease factor {} below floor {}",
        current.ease_factor,
        config.min_ease_factor
    );
    assert!(
        current.times_correct <= current.review_count,
        "times_correct ({}) exceeds review_count ({})",
        current.times_correct,
        current.review_count
    );

    if !grade.is_hit() {
        return IntervalResult {
            interval_days: 1,
            ease_factor: clamp_ease(
                current.ease_factor - config.miss_ease_penalty,
                config.min_ease_factor,
            ),
        };
    }

    let new_ease = clamp_ease(
        current.ease_factor + ease_adjustment(grade.quality()),
        config.min_ease_factor,
    );

    // Learning sequence for new/early items
    if let Some(&step) = config.learning_steps.get(current.review_count as usize) {
        let multiplier = if grade == Grade::Easy {
            config.easy_learning_multiplier
        } else {
            1
        };
        return IntervalResult {
            interval_days: step.saturating_mul(multiplier).max(1),
            ease_factor: new_ease,
        };
    }

    let mut interval = match current.interval_days {
        0 => 1,
        1 => config.graduation_interval,
        days => round_days(f64::from(days) * new_ease),
    };

    match grade {
        Grade::Hard => {
            // Always advance at least one day past the current interval
            interval = round_days(f64::from(interval) * config.hard_interval_factor)
                .max(current.interval_days.saturating_add(1));
        }
        Grade::Easy => {
            interval = round_days(f64::from(interval) * config.easy_interval_bonus);
        }
        Grade::Good | Grade::Again => {}
    }

    IntervalResult {
        interval_days: interval.max(1),
        ease_factor: new_ease,
    }
}

// ============================================================================
// CONFIDENCE
// ============================================================================

/// Classify an item from its post-review counters, using the default tuning
pub fn compute_confidence(
    review_count: u32,
    times_correct: u32,
    interval_days: u32,
    was_correct: bool,
) -> ConfidenceLevel {
    compute_confidence_with_config(
        review_count,
        times_correct,
        interval_days,
        was_correct,
        &SchedulerConfig::default(),
    )
}

/// Classify an item from its post-review counters
///
/// A miss on a young item drops it to learning; a miss on a mature item only
/// drops it to reviewing.
pub fn compute_confidence_with_config(
    review_count: u32,
    times_correct: u32,
    interval_days: u32,
    was_correct: bool,
    config: &SchedulerConfig,
) -> ConfidenceLevel {
    if review_count == 0 {
        return ConfidenceLevel::New;
    }

    if !was_correct {
        return if review_count <= config.young_item_max_reviews {
            ConfidenceLevel::Learning
        } else {
            ConfidenceLevel::Reviewing
        };
    }

    if interval_days > config.known_min_interval && times_correct > 0 {
        let accuracy = f64::from(times_correct) / f64::from(review_count);
        if accuracy >= config.known_min_accuracy {
            return ConfidenceLevel::Known;
        }
    }

    if times_correct >= config.reviewing_min_correct {
        ConfidenceLevel::Reviewing
    } else {
        ConfidenceLevel::Learning
    }
}
