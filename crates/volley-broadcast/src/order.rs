// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Urgency ordering: which broadcast's open window closes first?
//!
//! Ordering is by [`current_window_deadline`], not by the next eligible
//! instant: a broadcast with an open window sorts by how soon that
//! opportunity lapses. "Never" (no open window, or an unresolvable zone,
//! which a comparator cannot propagate) sorts as positive infinity.

use chrono::{DateTime, Utc};

use crate::broadcast::Broadcast;
use crate::eligibility::current_window_deadline;
use crate::settings::SendDefaults;

/// The current-window deadline, with errors and "never" collapsed to `None`.
pub fn window_deadline_or_never(
    broadcast: &Broadcast,
    defaults: &SendDefaults,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    current_window_deadline(broadcast, defaults, now)
        .ok()
        .flatten()
}

/// Stable ascending sort by current-window deadline; "never" sorts last and
/// ties keep their original relative order.
pub fn sort_by_urgency(broadcasts: &mut [Broadcast], defaults: &SendDefaults, now: DateTime<Utc>) {
    broadcasts.sort_by_cached_key(|b| {
        let deadline = window_deadline_or_never(b, defaults, now);
        (deadline.is_none(), deadline)
    });
}
