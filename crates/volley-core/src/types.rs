// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the volley crates.

use std::fmt;
use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a broadcast.
///
/// UUIDv7: time-sortable and collision-resistant, so broadcast listings
/// ordered by key come out in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BroadcastId(Uuid);

impl BroadcastId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Raw bytes, used as the persistence key.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for BroadcastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BroadcastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single recipient on a broadcast's contact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub number: String,
}

/// A recurring daily interval during which sending is permitted.
///
/// Both bounds are offsets from local midnight. Conceptually
/// `0 <= from < to <= 24h`, but this is not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: Duration,
    pub to: Duration,
}

impl TimeWindow {
    pub fn new(from: Duration, to: Duration) -> Self {
        Self { from, to }
    }

    /// Convenience constructor for whole-hour windows.
    pub fn from_hours(from: u64, to: u64) -> Self {
        Self {
            from: Duration::from_secs(from * 3600),
            to: Duration::from_secs(to * 3600),
        }
    }

    /// Whether `time_of_day` falls inside `[from, to)`.
    pub fn contains(&self, time_of_day: TimeDelta) -> bool {
        time_of_day >= self.from_delta() && time_of_day < self.to_delta()
    }

    pub fn from_delta(&self) -> TimeDelta {
        TimeDelta::seconds(self.from.as_secs() as i64)
    }

    pub fn to_delta(&self) -> TimeDelta {
        TimeDelta::seconds(self.to.as_secs() as i64)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.from.as_secs_f64() / 3600.0,
            self.to.as_secs_f64() / 3600.0
        )
    }
}

/// Render a window list the way the settings and detail views print it.
pub fn format_windows(windows: &[TimeWindow]) -> String {
    windows
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_ids_are_time_ordered() {
        let a = BroadcastId::new();
        std::thread::sleep(Duration::from_millis(2));
        let b = BroadcastId::new();
        // UUIDv7 encodes a millisecond timestamp in the high bits, so ids
        // from distinct milliseconds never sort backwards.
        assert!(a < b);
    }

    #[test]
    fn window_contains_is_half_open() {
        let w = TimeWindow::from_hours(9, 12);
        assert!(!w.contains(TimeDelta::hours(8)));
        assert!(w.contains(TimeDelta::hours(9)));
        assert!(w.contains(TimeDelta::hours(11) + TimeDelta::minutes(59)));
        assert!(!w.contains(TimeDelta::hours(12)));
    }

    #[test]
    fn window_display_prints_hours() {
        let w = TimeWindow::from_hours(9, 12);
        assert_eq!(w.to_string(), "9-12");

        let half = TimeWindow::new(
            Duration::from_secs(9 * 3600 + 1800),
            Duration::from_secs(12 * 3600),
        );
        assert_eq!(half.to_string(), "9.5-12");

        let both = vec![w, TimeWindow::from_hours(14, 18)];
        assert_eq!(format_windows(&both), "9-12 14-18");
    }

    #[test]
    fn window_roundtrips_through_json() {
        let w = TimeWindow::from_hours(14, 18);
        let json = serde_json::to_string(&w).unwrap();
        let back: TimeWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }
}
