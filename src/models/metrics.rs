// file: src/models/metrics.rs
// description: Durations derived from an incident's time window
// reference: response-time metrics shown in the postmortem

use super::incident::TimeWindow;
use serde::Serialize;

/// Whole-minute durations derived from a validated [`TimeWindow`].
///
/// The window invariants guarantee every value is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncidentMetrics {
    pub time_to_detect_minutes: i64,
    pub time_to_mitigate_minutes: i64,
    pub detect_to_mitigate_minutes: i64,
    pub window_minutes: i64,
}

impl IncidentMetrics {
    pub fn from_window(window: &TimeWindow) -> Self {
        Self {
            time_to_detect_minutes: window.start.minutes_until(&window.detected),
            time_to_mitigate_minutes: window.start.minutes_until(&window.mitigated),
            detect_to_mitigate_minutes: window.detected.minutes_until(&window.mitigated),
            window_minutes: window.start.minutes_until(&window.end),
        }
    }
}

/// Formats a minute count as `45m` or `2h 05m`.
pub fn format_minutes(minutes: i64) -> String {
    u64::try_from(minutes)
        .map(format_minute_count)
        .unwrap_or_else(|_| "UNKNOWN".to_string())
}

/// Like [`format_minutes`] for counts that are never negative.
pub fn format_minute_count(minutes: u64) -> String {
    let hours = minutes / 60;
    let rem = minutes % 60;
    if hours > 0 {
        format!("{hours}h {rem:02}m")
    } else {
        format!("{rem}m")
    }
}
