//! Spaced Repetition Scheduler
//!
//! Modified SM-2 tuned for kanji and vocabulary:
//! - Two fixed learning steps (1 day, 3 days) before SM-2 growth takes over
//! - `hard` shrinks the interval but always moves it forward
//! - `easy` boosts the interval on top of the ease increase
//! - Confidence level recomputed from counters on every review
//!
//! Grade mapping (button -> SM-2 quality): again 1, hard 3, good 4, easy 5.

mod algorithm;
mod scheduler;
mod state;

pub use algorithm::{
    add_days,
    calculate_next_interval,
    calculate_next_interval_with_config,
    clamp_ease,
    compute_confidence,
    compute_confidence_with_config,
    ease_adjustment,
    round2,
    // Constants
    LEARNING_STEPS,
    MIN_EASE_FACTOR,
    STARTING_EASE_FACTOR,
};

pub use scheduler::{get_grade_options, process_review, Scheduler};

pub use state::{ConfidenceLevel, Grade, GradeOption, IntervalResult, MemoryState, ScheduleUpdate};
