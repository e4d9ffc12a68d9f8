//! Review processing and grade previews
//!
//! [`Scheduler`] bundles a tuning config with the pure review functions. It
//! holds no mutable state, so one instance can be shared freely across
//! request handlers. The free functions use the default tuning.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::{AppConfig, ProgressConfig, SchedulerConfig};
use crate::error::Result;
use crate::format::format_interval;
use crate::progress::xp::calculate_xp_with_config;
use crate::srs::algorithm::{
    add_days, calculate_next_interval_with_config, compute_confidence_with_config,
};
use crate::srs::state::{Grade, GradeOption, IntervalResult, MemoryState, ScheduleUpdate};

// ============================================================================
// SCHEDULER
// ============================================================================

/// Stateless review scheduler
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
    progress: ProgressConfig,
}

impl Scheduler {
    /// Create a scheduler with the reference tuning
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config, rejecting tuning that breaks the floors
    pub fn with_config(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.scheduler,
            progress: config.progress,
        })
    }

    /// Interval/ease tuning
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// XP tuning
    pub fn progress_config(&self) -> &ProgressConfig {
        &self.progress
    }

    /// State of an item that just entered the collection
    pub fn new_item(&self) -> MemoryState {
        MemoryState {
            ease_factor: self.config.starting_ease_factor,
            ..MemoryState::new()
        }
    }

    /// Next interval and ease for a grade, without applying it
    pub fn next_interval(&self, grade: Grade, current: &MemoryState) -> IntervalResult {
        calculate_next_interval_with_config(grade, current, &self.config)
    }

    /// Apply one graded review
    ///
    /// `now` is injected so the result depends only on the arguments.
    pub fn review(&self, grade: Grade, current: &MemoryState, now: DateTime<Utc>) -> ScheduleUpdate {
        let was_correct = grade.is_hit();
        let IntervalResult {
            interval_days,
            ease_factor,
        } = self.next_interval(grade, current);

        let review_count = current.review_count.saturating_add(1);
        let times_correct = current.times_correct.saturating_add(u32::from(was_correct));
        let confidence_level = compute_confidence_with_config(
            review_count,
            times_correct,
            interval_days,
            was_correct,
            &self.config,
        );

        debug!(
            grade = %grade,
            interval_days,
            ease_factor,
            review_count,
            confidence = %confidence_level,
            "Processed review"
        );

        ScheduleUpdate {
            state: MemoryState {
                interval_days,
                ease_factor,
                review_count,
                times_correct,
                confidence_level,
            },
            next_review_at: add_days(now, interval_days),
            last_reviewed_at: now,
        }
    }

    /// Preview all four grades in button order
    pub fn grade_options(&self, current: &MemoryState, streak_bonus: u32) -> [GradeOption; 4] {
        Grade::ALL.map(|grade| {
            let IntervalResult { interval_days, .. } = self.next_interval(grade, current);
            GradeOption {
                grade,
                quality: grade.quality(),
                next_interval_days: interval_days,
                xp: calculate_xp_with_config(grade, streak_bonus, &self.progress),
                label: format_interval(interval_days),
            }
        })
    }
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

/// Apply one graded review using the default tuning
pub fn process_review(grade: Grade, current: &MemoryState, now: DateTime<Utc>) -> ScheduleUpdate {
    Scheduler::new().review(grade, current, now)
}

/// Preview all four grades using the default tuning
pub fn get_grade_options(current: &MemoryState, streak_bonus: u32) -> [GradeOption; 4] {
    Scheduler::new().grade_options(current, streak_bonus)
}
