//! Text and date formatting helpers for views.

use jiff::Timestamp;
use jiff::tz::TimeZone;

/// Shortens `text` to `max_chars` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_owned(),
    }
}

/// Formats a date in long US style, e.g. `March 5, 2024`. Dates are read in UTC.
pub fn format_date(timestamp: Timestamp) -> String {
    timestamp
        .to_zoned(TimeZone::UTC)
        .strftime("%B %-d, %Y")
        .to_string()
}

/// Formats a date as month and year, e.g. `March 2024`.
pub fn format_month_year(timestamp: Timestamp) -> String {
    timestamp
        .to_zoned(TimeZone::UTC)
        .strftime("%B %Y")
        .to_string()
}

/// Formats a tenure, e.g. `February 2021 - Present`.
///
/// A current position ends at `Present` regardless of its end date.
pub fn format_tenure(start: Option<Timestamp>, end: Option<Timestamp>, current: bool) -> String {
    let start = start.map(format_month_year).unwrap_or_default();
    let end = if current {
        "Present".to_owned()
    } else {
        end.map(format_month_year).unwrap_or_default()
    };

    format!("{start} - {end}").trim().to_owned()
}

/// Returns up to two uppercase initials of `name`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
