//! Human-readable formatting helpers

/// Render an interval for a grade button
///
/// `1d`, `29d`, `1mo` (rounded to 30-day months), `1.0y` (one decimal).
pub fn format_interval(days: u32) -> String {
    match days {
        0 => "<1d".to_string(),
        1 => "1d".to_string(),
        d if d < 30 => format!("{}d", d),
        d if d < 365 => format!("{}mo", (f64::from(d) / 30.0).round() as u32),
        d => format!("{:.1}y", f64::from(d) / 365.0),
    }
}
