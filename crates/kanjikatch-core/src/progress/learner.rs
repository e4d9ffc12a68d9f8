//! Learner Progress - the per-learner aggregate
//!
//! XP, level, streaks and daily counters. Updated once per graded review and
//! once per completed session. Only the current streak ever goes down.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProgressConfig;
use crate::progress::streak::update_streak;
use crate::progress::xp::{LevelTier, calculate_level_with_config, calculate_xp_with_config};
use crate::srs::Grade;

/// Aggregate progress for one learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProgress {
    pub xp: u64,
    pub level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_review_date: Option<NaiveDate>,
    pub total_reviews: u64,
    pub total_correct: u64,
    pub daily_reviews_today: u32,
    pub daily_reviews_date: Option<NaiveDate>,
    pub daily_goal: u32,
}

impl Default for LearnerProgress {
    fn default() -> Self {
        Self::new(ProgressConfig::default().default_daily_goal)
    }
}

/// Read-only summary for dashboards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_reviews: u64,
    pub total_correct: u64,
    /// Rounded percentage, 0 before the first review
    pub accuracy: u32,
    pub xp: u64,
    pub level: u32,
    pub level_title: String,
    pub xp_in_level: u64,
    pub xp_for_next: u64,
    pub daily_goal: u32,
    pub daily_reviews_today: u32,
}

impl LearnerProgress {
    /// Progress of a learner who has never reviewed
    pub fn new(daily_goal: u32) -> Self {
        Self {
            xp: 0,
            level: 1,
            current_streak: 0,
            longest_streak: 0,
            last_review_date: None,
            total_reviews: 0,
            total_correct: 0,
            daily_reviews_today: 0,
            daily_reviews_date: None,
            daily_goal,
        }
    }

    /// Credit one graded review, returning the XP earned
    pub fn record_review(&mut self, grade: Grade, streak_bonus: u32, today: NaiveDate) -> u32 {
        self.record_review_with_config(grade, streak_bonus, today, &ProgressConfig::default())
    }

    /// Credit one graded review with custom tuning, returning the XP earned
    pub fn record_review_with_config(
        &mut self,
        grade: Grade,
        streak_bonus: u32,
        today: NaiveDate,
        config: &ProgressConfig,
    ) -> u32 {
        let earned = calculate_xp_with_config(grade, streak_bonus, config);

        self.add_xp(earned, config);
        self.advance_streak(today);
        self.total_reviews += 1;
        self.total_correct += u64::from(grade.is_hit());

        if self.daily_reviews_date == Some(today) {
            self.daily_reviews_today = self.daily_reviews_today.saturating_add(1);
        } else {
            self.daily_reviews_today = 1;
            self.daily_reviews_date = Some(today);
        }

        debug!(
            grade = %grade,
            xp_earned = earned,
            total_xp = self.xp,
            level = self.level,
            "Recorded review progress"
        );
        earned
    }

    /// Credit a completed session, returning the bonus XP
    pub fn complete_session(&mut self, today: NaiveDate) -> u32 {
        self.complete_session_with_config(today, &ProgressConfig::default())
    }

    /// Credit a completed session with custom tuning, returning the bonus XP
    pub fn complete_session_with_config(&mut self, today: NaiveDate, config: &ProgressConfig) -> u32 {
        let earned = config.session_completion_xp;
        self.add_xp(earned, config);
        self.advance_streak(today);
        debug!(xp_earned = earned, total_xp = self.xp, "Recorded session completion");
        earned
    }

    /// Dashboard summary as seen on `today`
    pub fn stats(&self, today: NaiveDate) -> ProgressStats {
        self.stats_with_config(today, &ProgressConfig::default())
    }

    /// Dashboard summary as seen on `today`, with custom tuning
    pub fn stats_with_config(&self, today: NaiveDate, config: &ProgressConfig) -> ProgressStats {
        let level_info = calculate_level_with_config(self.xp, config);
        let accuracy = if self.total_reviews > 0 {
            (self.total_correct as f64 / self.total_reviews as f64 * 100.0).round() as u32
        } else {
            0
        };
        let daily_reviews_today = if self.daily_reviews_date == Some(today) {
            self.daily_reviews_today
        } else {
            0
        };

        ProgressStats {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            total_reviews: self.total_reviews,
            total_correct: self.total_correct,
            accuracy,
            xp: self.xp,
            level: level_info.level,
            level_title: LevelTier::for_level(level_info.level).label().to_string(),
            xp_in_level: level_info.xp_in_level,
            xp_for_next: level_info.xp_for_next,
            daily_goal: self.daily_goal,
            daily_reviews_today,
        }
    }

    /// Whether today's review count has reached the daily goal
    pub fn daily_goal_met(&self, today: NaiveDate) -> bool {
        self.daily_reviews_date == Some(today) && self.daily_reviews_today >= self.daily_goal
    }

    fn add_xp(&mut self, amount: u32, config: &ProgressConfig) {
        self.xp = self.xp.saturating_add(u64::from(amount));
        self.level = calculate_level_with_config(self.xp, config).level;
    }

    fn advance_streak(&mut self, today: NaiveDate) {
        let update = update_streak(
            self.last_review_date,
            self.current_streak,
            self.longest_streak,
            today,
        );
        self.current_streak = update.current_streak;
        self.longest_streak = update.longest_streak;
        self.last_review_date = Some(today);
    }
}
