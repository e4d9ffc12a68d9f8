//! Property-Based Tests for the Scheduler
//!
//! Invariants checked over arbitrary item states:
//! - Floors: ease never below 1.3, interval never below one day
//! - Misses: `again` resets to one day and never raises ease
//! - Ordering: on graduated items, easy > good > hard
//! - Scheduling: the due date is `now + interval` and always in the future
//! - Counters: review count and correct count advance consistently
//! - Preview: every grade option matches the interval its review produces
//! - Progress: XP, levels and streaks keep their arithmetic identities

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use kanjikatch_core::{
    ConfidenceLevel, Grade, MIN_EASE_FACTOR, MemoryState, calculate_level,
    calculate_next_interval, calculate_xp, format_interval, get_grade_options, process_review,
    update_streak,
};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_grade() -> impl Strategy<Value = Grade> {
    prop_oneof![
        Just(Grade::Again),
        Just(Grade::Hard),
        Just(Grade::Good),
        Just(Grade::Easy),
    ]
}

/// Two-decimal eases between the floor and 3.5
fn arb_ease() -> impl Strategy<Value = f64> {
    (130u32..=350u32).prop_map(|v| f64::from(v) / 100.0)
}

fn arb_now() -> impl Strategy<Value = DateTime<Utc>> {
    (1_600_000_000i64..2_000_000_000i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn state_from(
    interval_days: u32,
    ease_factor: f64,
    review_count: u32,
) -> impl Strategy<Value = MemoryState> {
    (0..=review_count).prop_map(move |times_correct| MemoryState {
        interval_days,
        ease_factor,
        review_count,
        times_correct,
        confidence_level: if review_count == 0 {
            ConfidenceLevel::New
        } else {
            ConfidenceLevel::Learning
        },
    })
}

/// Any consistent item state
fn arb_state() -> impl Strategy<Value = MemoryState> {
    (0u32..=3650u32, arb_ease(), 0u32..=60u32)
        .prop_flat_map(|(interval, ease, count)| state_from(interval, ease, count))
}

/// Items past the learning steps, at a one-day interval or at least ten days
fn arb_graduated_state() -> impl Strategy<Value = MemoryState> {
    (
        prop_oneof![Just(1u32), 10u32..=3650u32],
        arb_ease(),
        2u32..=60u32,
    )
        .prop_flat_map(|(interval, ease, count)| state_from(interval, ease, count))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Ease and interval floors hold for every grade
    #[test]
    fn floors_hold_for_every_grade(state in arb_state(), grade in arb_grade()) {
        let result = calculate_next_interval(grade, &state);
        prop_assert!(result.ease_factor >= MIN_EASE_FACTOR);
        prop_assert!(result.interval_days >= 1);
    }

    /// A miss resets to one day and never raises ease
    #[test]
    fn again_resets_interval(state in arb_state()) {
        let result = calculate_next_interval(Grade::Again, &state);
        prop_assert_eq!(result.interval_days, 1);
        prop_assert!(result.ease_factor <= state.ease_factor);
        prop_assert!(
            result.ease_factor < state.ease_factor || result.ease_factor == MIN_EASE_FACTOR
        );
    }

    /// Graduated items order their intervals by grade
    #[test]
    fn graduated_intervals_ordered_by_grade(state in arb_graduated_state()) {
        let hard = calculate_next_interval(Grade::Hard, &state).interval_days;
        let good = calculate_next_interval(Grade::Good, &state).interval_days;
        let easy = calculate_next_interval(Grade::Easy, &state).interval_days;

        prop_assert!(easy > good, "easy {} good {} for {:?}", easy, good, state);
        prop_assert!(good > hard, "good {} hard {} for {:?}", good, hard, state);
    }

    /// Hard always moves a graduated item past its current interval
    #[test]
    fn hard_advances_graduated_items(state in arb_graduated_state()) {
        let hard = calculate_next_interval(Grade::Hard, &state).interval_days;
        prop_assert!(hard > state.interval_days);
    }

    /// The due date is exactly the interval away and in the future
    #[test]
    fn review_schedules_in_future(state in arb_state(), grade in arb_grade(), now in arb_now()) {
        let update = process_review(grade, &state, now);

        prop_assert!(update.next_review_at > now);
        prop_assert_eq!(update.last_reviewed_at, now);
        prop_assert_eq!(
            Some(update.next_review_at),
            now.checked_add_days(Days::new(u64::from(update.state.interval_days)))
        );
    }

    /// Counters advance by one review, and by one correct answer only on a hit
    #[test]
    fn review_counters_advance(state in arb_state(), grade in arb_grade(), now in arb_now()) {
        let update = process_review(grade, &state, now);

        prop_assert_eq!(update.state.review_count, state.review_count + 1);
        prop_assert_eq!(
            update.state.times_correct,
            state.times_correct + u32::from(grade.is_hit())
        );
        prop_assert!(update.state.times_correct <= update.state.review_count);
        prop_assert_ne!(update.state.confidence_level, ConfidenceLevel::New);
    }

    /// Known requires a correct answer and a long interval
    #[test]
    fn known_requires_long_correct_interval(state in arb_state(), grade in arb_grade(), now in arb_now()) {
        let update = process_review(grade, &state, now);
        if update.state.confidence_level == ConfidenceLevel::Known {
            prop_assert!(grade.is_hit());
            prop_assert!(update.state.interval_days > 21);
        }
    }

    /// Preview buttons agree with the calculator
    #[test]
    fn preview_matches_calculator(state in arb_state(), streak in 0u32..=100u32) {
        let options = get_grade_options(&state, streak);

        for (option, grade) in options.iter().zip(Grade::ALL) {
            let result = calculate_next_interval(grade, &state);
            prop_assert_eq!(option.grade, grade);
            prop_assert_eq!(option.next_interval_days, result.interval_days);
            prop_assert_eq!(&option.label, &format_interval(result.interval_days));
            prop_assert_eq!(option.xp, calculate_xp(grade, streak));
        }
    }

    /// Misses earn a flat two XP; hits gain two per streak point
    #[test]
    fn xp_streak_bonus(grade in arb_grade(), streak in 0u32..=1000u32) {
        let xp = calculate_xp(grade, streak);
        let base = calculate_xp(grade, 0);
        if grade.is_hit() {
            prop_assert_eq!(xp, base + 2 * streak);
        } else {
            prop_assert_eq!(xp, 2);
        }
    }

    /// Level and in-level XP recompose the total
    #[test]
    fn level_recomposes_total(xp in 0u64..=10_000_000u64) {
        let info = calculate_level(xp);
        prop_assert!(info.level >= 1);
        prop_assert!(info.xp_in_level < info.xp_for_next);
        prop_assert_eq!(u64::from(info.level - 1) * info.xp_for_next + info.xp_in_level, xp);
    }

    /// Consecutive days extend the streak and keep longest at or above current
    #[test]
    fn streak_consecutive_days(
        start in 0u64..=20_000u64,
        current in 1u32..=1000u32,
        extra in 0u32..=1000u32,
    ) {
        let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let last = base.checked_add_days(Days::new(start)).unwrap();
        let today = last.checked_add_days(Days::new(1)).unwrap();
        let longest = current + extra;

        let update = update_streak(Some(last), current, longest, today);
        prop_assert_eq!(update.current_streak, current + 1);
        prop_assert!(update.longest_streak >= update.current_streak);
        prop_assert!(update.longest_streak >= longest);
    }

    /// Gaps of two or more days restart the streak at one
    #[test]
    fn streak_gap_resets(current in 1u32..=1000u32, gap in 2u64..=400u64) {
        let last = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let today = last.checked_add_days(Days::new(gap)).unwrap();

        let update = update_streak(Some(last), current, current, today);
        prop_assert_eq!(update.current_streak, 1);
        prop_assert_eq!(update.longest_streak, current);
    }
}
