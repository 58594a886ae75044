// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure eligibility arithmetic: when may a broadcast transmit?
//!
//! Two related questions with distinct answers:
//! - [`current_window_deadline`]: if we are inside an eligible window right
//!   now, when does it close?
//! - [`next_eligible_instant`]: if not (or regardless), when does
//!   eligibility next begin?
//!
//! Both are pure functions of the broadcast, the resolved defaults, and an
//! explicit `now`, so results are reproducible under a frozen clock. All
//! returned instants are UTC; the window arithmetic happens in the
//! broadcast's resolved zone.

use chrono::{DateTime, Days, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use volley_core::{TimeWindow, VolleyError};

use crate::broadcast::Broadcast;
use crate::settings::SendDefaults;

/// How many days ahead [`next_eligible_instant`] scans. A broadcast whose
/// eligibility lies beyond this is reported "never" and re-evaluated later,
/// which bounds the scan cost.
const ELIGIBILITY_HORIZON_DAYS: u64 = 3;

/// The zone a broadcast's windows are evaluated in: its own, else the
/// configured default, else the system-local zone.
#[derive(Debug, Clone, Copy)]
enum SendZone {
    Named(Tz),
    Local,
}

impl SendZone {
    fn resolve(own: Option<&str>, default: Option<&str>) -> Result<Self, VolleyError> {
        let name = own
            .filter(|s| !s.is_empty())
            .or_else(|| default.filter(|s| !s.is_empty()));
        match name {
            Some(name) => name
                .parse::<Tz>()
                .map(SendZone::Named)
                .map_err(|_| VolleyError::InvalidTimezone {
                    name: name.to_string(),
                }),
            None => Ok(SendZone::Local),
        }
    }

    /// Local midnight of the day `days_ahead` days after `now`'s local date,
    /// as a UTC instant.
    fn midnight(&self, now: DateTime<Utc>, days_ahead: u64) -> DateTime<Utc> {
        match self {
            SendZone::Named(tz) => midnight_in(tz, now, days_ahead),
            SendZone::Local => midnight_in(&chrono::Local, now, days_ahead),
        }
    }
}

fn midnight_in<Z: TimeZone>(tz: &Z, now: DateTime<Utc>, days_ahead: u64) -> DateTime<Utc> {
    let date = now.with_timezone(tz).date_naive() + Days::new(days_ahead);
    let mut wall = date.and_time(NaiveTime::MIN);
    // A DST gap can swallow midnight; take the earliest valid wall-clock
    // time at or after 00:00.
    for _ in 0..48 {
        if let Some(dt) = tz.from_local_datetime(&wall).earliest() {
            return dt.with_timezone(&Utc);
        }
        wall += TimeDelta::minutes(30);
    }
    Utc.from_utc_datetime(&wall)
}

/// The broadcast's own windows if any, else the configured default.
fn effective_windows<'a>(broadcast: &'a Broadcast, defaults: &'a SendDefaults) -> &'a [TimeWindow] {
    if !broadcast.send_hours.is_empty() {
        &broadcast.send_hours
    } else {
        &defaults.send_hours
    }
}

/// Deadline of the currently open send window, if `now` is inside one.
///
/// Returns `Ok(None)` ("never") when `now` is outside the broadcast's date
/// bounds or no window contains the current time of day. With no windows
/// configured anywhere the whole day is one window and the deadline is the
/// next local midnight. The upper date bound carries a 24h grace period: a
/// campaign stays current for a day past its nominal end.
pub fn current_window_deadline(
    broadcast: &Broadcast,
    defaults: &SendDefaults,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, VolleyError> {
    let zone = SendZone::resolve(broadcast.timezone.as_deref(), defaults.timezone.as_deref())?;

    if let Some(from) = broadcast.send_date_from {
        if now < from {
            return Ok(None);
        }
    }
    if let Some(to) = broadcast.send_date_to {
        if now > to + TimeDelta::hours(24) {
            return Ok(None);
        }
    }

    let midnight = zone.midnight(now, 0);
    let time_of_day = now - midnight;

    let windows = effective_windows(broadcast, defaults);
    if windows.is_empty() {
        return Ok(Some(zone.midnight(now, 1)));
    }
    for window in windows {
        if window.contains(time_of_day) {
            return Ok(Some(midnight + window.to_delta()));
        }
    }
    Ok(None)
}

/// The next instant eligibility begins, scanning a 3-day horizon.
///
/// For today, the answer is the `from` of the first window whose `to` is
/// still in the future; that `from` may already be in the past when the
/// window is currently open. For a later day it is that day's first declared
/// window. Days outside `[send_date_from, send_date_to)` are skipped.
/// Exhausting the horizon returns `Ok(None)`; that is not an error.
pub fn next_eligible_instant(
    broadcast: &Broadcast,
    defaults: &SendDefaults,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, VolleyError> {
    let zone = SendZone::resolve(broadcast.timezone.as_deref(), defaults.timezone.as_deref())?;

    if let Some(to) = broadcast.send_date_to {
        if now > to + TimeDelta::hours(24) {
            return Ok(None);
        }
    }

    let time_of_day = now - zone.midnight(now, 0);
    let windows = effective_windows(broadcast, defaults);

    for day in 0..ELIGIBILITY_HORIZON_DAYS {
        let day_start = zone.midnight(now, day);
        if let Some(from) = broadcast.send_date_from {
            if day_start < from {
                continue;
            }
        }
        if let Some(to) = broadcast.send_date_to {
            if day_start >= to {
                continue;
            }
        }
        if windows.is_empty() {
            // Eligible all day; the qualifying day itself is the answer.
            return Ok(Some(day_start));
        }
        if day == 0 {
            for window in windows {
                if time_of_day < window.to_delta() {
                    return Ok(Some(day_start + window.from_delta()));
                }
            }
            continue;
        }
        return Ok(Some(day_start + windows[0].from_delta()));
    }
    Ok(None)
}
