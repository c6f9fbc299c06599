//! Values derived from immutable record fields.
//!
//! Recomputed on every read; records never carry them.

use chrono::{DateTime, Utc};

use super::models::EventStatus;

pub const NOT_AVAILABLE: &str = "N/A";

pub fn event_status(
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> EventStatus {
    if end_date.is_some_and(|end| end < now) {
        return EventStatus::Completed;
    }

    match start_date {
        Some(start) if start <= now => EventStatus::Ongoing,
        _ => EventStatus::Upcoming,
    }
}

/// Percentage of decided games won, 0-100
pub fn win_percentage(wins: Option<u32>, losses: Option<u32>) -> Option<f64> {
    if wins.is_none() && losses.is_none() {
        return None;
    }

    let wins = wins.unwrap_or(0) as f64;
    let total = wins + losses.unwrap_or(0) as f64;
    if total > 0.0 {
        Some(wins / total * 100.0)
    } else {
        Some(0.0)
    }
}

pub fn registration_display(registered: u32, max: Option<u32>) -> String {
    match max {
        Some(max) if max > 0 => format!("{}/{}", registered, max),
        _ => format!("{}/∞", registered),
    }
}

/// Display form of a nullable score
pub fn or_na(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => NOT_AVAILABLE.to_string(),
    }
}
