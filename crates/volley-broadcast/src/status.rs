// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle status synthesis.
//!
//! Combines the run-progress record, the running-set, and the eligibility
//! calculator into one of five lifecycle states with a display string.
//! Status is always recomputed; it is never stored, so a stale cached value
//! cannot be observed.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use volley_core::VolleyError;
use volley_storage::{records, Database};

use crate::broadcast::Broadcast;
use crate::eligibility::next_eligible_instant;
use crate::run::{run_key, Run};
use crate::running::RunningSet;
use crate::settings::SendDefaults;

/// One of the five broadcast lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No run yet and no eligible instant within the horizon.
    NotStartable,
    /// No run yet and the eligible instant has already arrived.
    StartingNow,
    /// No run yet; eligibility begins after this much time.
    StartingIn(TimeDelta),
    /// A sender loop is actively working the broadcast.
    Running { sent: u32, total: u32 },
    /// The run processed every contact.
    Finished { sent: u32, total: u32 },
    /// A run exists with contacts remaining, but no sender loop is active.
    Paused { sent: u32, total: u32 },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NotStartable => write!(f, "not startable"),
            Status::StartingNow => write!(f, "starting now"),
            Status::StartingIn(d) => write!(f, "starting in {}", format_eta(*d)),
            Status::Running { sent, total } => write!(f, "{sent}/{total} sent - running"),
            Status::Finished { sent, total } => write!(f, "{sent}/{total} sent - finished"),
            Status::Paused { sent, total } => write!(f, "{sent}/{total} sent - paused"),
        }
    }
}

/// Sub-minute waits render rounded to seconds, everything else to minutes.
fn format_eta(d: TimeDelta) -> String {
    let secs = (d.num_milliseconds() + 500) / 1000;
    if secs < 60 {
        return format!("{secs}s");
    }
    let mins = (secs + 30) / 60;
    let hours = mins / 60;
    let mins = mins % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

/// Pure synthesis from pre-read inputs; `resolve_status` supplies them.
pub fn status_from_parts(
    broadcast: &Broadcast,
    run: Option<&Run>,
    defaults: &SendDefaults,
    running_now: bool,
    now: DateTime<Utc>,
) -> Result<Status, VolleyError> {
    let Some(run) = run else {
        return match next_eligible_instant(broadcast, defaults, now)? {
            None => Ok(Status::NotStartable),
            Some(at) => {
                let until = at - now;
                if until <= TimeDelta::zero() {
                    Ok(Status::StartingNow)
                } else {
                    Ok(Status::StartingIn(until))
                }
            }
        };
    };
    let (sent, total) = (run.next_index, run.length);
    if running_now {
        Ok(Status::Running { sent, total })
    } else if run.is_finished() {
        Ok(Status::Finished { sent, total })
    } else {
        Ok(Status::Paused { sent, total })
    }
}

/// Synthesize the lifecycle status of a broadcast.
///
/// The run record and the settings are read under one transaction so they
/// observe a consistent snapshot. The running-set check happens outside it,
/// under its own lock; the resulting one-tick skew between "running" and
/// recorded progress is an accepted property of an advisory display value.
pub async fn resolve_status(
    db: &Database,
    running: &RunningSet,
    broadcast: &Broadcast,
) -> Result<Status, VolleyError> {
    let key = run_key(broadcast.id);
    let (run, defaults) = db
        .connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let run = records::get_tx::<Run>(&tx, &key)?;
            let defaults = SendDefaults::read_tx(&tx)?;
            Ok((run, defaults))
        })
        .await
        .map_err(|e| VolleyError::Storage {
            source: format!("failed to read run and settings: {e}").into(),
        })?;

    let running_now = running.contains(broadcast.id);
    status_from_parts(broadcast, run.as_ref(), &defaults, running_now, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;
    use volley_core::{Contact, TimeWindow};

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, h, m, s).unwrap()
    }

    fn broadcast_with_windows(windows: &[(u64, u64)]) -> Broadcast {
        let mut b = Broadcast::new("s", "b");
        b.timezone = Some("UTC".into());
        b.send_hours = windows
            .iter()
            .map(|&(f, t)| TimeWindow::from_hours(f, t))
            .collect();
        b
    }

    fn run(b: &Broadcast, next: u32, len: u32) -> Run {
        Run {
            broadcast_id: b.id,
            next_index: next,
            length: len,
        }
    }

    #[test]
    fn no_run_and_no_window_is_not_startable() {
        let mut b = broadcast_with_windows(&[(9, 12)]);
        b.send_date_to = Some(utc(0, 0, 0) - TimeDelta::days(10));
        let status =
            status_from_parts(&b, None, &SendDefaults::default(), false, utc(10, 0, 0)).unwrap();
        assert_eq!(status, Status::NotStartable);
        assert_eq!(status.to_string(), "not startable");
    }

    #[test]
    fn due_broadcast_is_starting_now() {
        let b = broadcast_with_windows(&[(9, 12)]);
        let status =
            status_from_parts(&b, None, &SendDefaults::default(), false, utc(10, 0, 0)).unwrap();
        assert_eq!(status, Status::StartingNow);
        assert_eq!(status.to_string(), "starting now");
    }

    #[test]
    fn short_wait_renders_in_seconds() {
        let b = broadcast_with_windows(&[(9, 12)]);
        let status =
            status_from_parts(&b, None, &SendDefaults::default(), false, utc(8, 59, 15)).unwrap();
        assert_eq!(status.to_string(), "starting in 45s");
    }

    #[test]
    fn longer_wait_renders_in_minutes() {
        let b = broadcast_with_windows(&[(9, 12)]);
        let status =
            status_from_parts(&b, None, &SendDefaults::default(), false, utc(8, 35, 0)).unwrap();
        assert_eq!(status.to_string(), "starting in 25m");

        let status =
            status_from_parts(&b, None, &SendDefaults::default(), false, utc(7, 30, 0)).unwrap();
        assert_eq!(status.to_string(), "starting in 1h 30m");
    }

    #[test]
    fn wait_rounding_goes_to_the_nearest_minute() {
        let b = broadcast_with_windows(&[(9, 12)]);
        // 84.5 minutes away rounds to 85, not down to 84.
        let status =
            status_from_parts(&b, None, &SendDefaults::default(), false, utc(7, 35, 30)).unwrap();
        assert_eq!(status.to_string(), "starting in 1h 25m");
    }

    #[test]
    fn run_present_in_running_set_is_running() {
        let b = broadcast_with_windows(&[(9, 12)]);
        let r = run(&b, 3, 10);
        let status =
            status_from_parts(&b, Some(&r), &SendDefaults::default(), true, utc(10, 0, 0))
                .unwrap();
        assert_eq!(status.to_string(), "3/10 sent - running");
    }

    #[test]
    fn run_absent_from_running_set_is_paused() {
        let b = broadcast_with_windows(&[(9, 12)]);
        let r = run(&b, 3, 10);
        let status =
            status_from_parts(&b, Some(&r), &SendDefaults::default(), false, utc(10, 0, 0))
                .unwrap();
        assert_eq!(status.to_string(), "3/10 sent - paused");
    }

    #[test]
    fn complete_run_is_finished_regardless_of_eligibility() {
        let mut b = broadcast_with_windows(&[(9, 12)]);
        b.send_date_to = Some(utc(0, 0, 0) - TimeDelta::days(30));
        let r = run(&b, 10, 10);
        let status =
            status_from_parts(&b, Some(&r), &SendDefaults::default(), false, utc(10, 0, 0))
                .unwrap();
        assert_eq!(status.to_string(), "10/10 sent - finished");
    }

    #[test]
    fn timezone_failure_propagates_with_the_name() {
        let mut b = broadcast_with_windows(&[(9, 12)]);
        b.timezone = Some("Atlantis/Sunken".into());
        let err = status_from_parts(&b, None, &SendDefaults::default(), false, utc(10, 0, 0))
            .unwrap_err();
        assert!(err.to_string().contains("Atlantis/Sunken"));
    }

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("status.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn resolve_status_without_run_uses_eligibility() {
        let (db, _dir) = setup_db().await;
        let running = RunningSet::new();
        // All-day eligible: no windows, no bounds, so it is always due.
        let b = broadcast_with_windows(&[]);

        let status = resolve_status(&db, &running, &b).await.unwrap();
        assert_eq!(status, Status::StartingNow);
    }

    #[tokio::test]
    async fn resolve_status_reads_run_and_running_set() {
        let (db, _dir) = setup_db().await;
        let running = RunningSet::new();
        let mut b = broadcast_with_windows(&[]);
        for i in 0..4 {
            b.contacts.push(Contact {
                name: format!("c{i}"),
                number: format!("+1555000{i}"),
            });
        }
        let mut r = Run::new(&b);
        r.next_index = 2;
        crate::run::save_progress(&db, r).await.unwrap();

        let status = resolve_status(&db, &running, &b).await.unwrap();
        assert_eq!(status.to_string(), "2/4 sent - paused");

        let _guard = running.start(b.id).unwrap();
        let status = resolve_status(&db, &running, &b).await.unwrap();
        assert_eq!(status.to_string(), "2/4 sent - running");
    }

    #[tokio::test]
    async fn finished_status_is_stable_across_reads() {
        let (db, _dir) = setup_db().await;
        let running = RunningSet::new();
        let mut b = broadcast_with_windows(&[]);
        b.contacts.push(Contact {
            name: "only".into(),
            number: "+15550100".into(),
        });
        let mut r = Run::new(&b);
        r.next_index = r.length;
        crate::run::save_progress(&db, r).await.unwrap();

        for _ in 0..3 {
            let status = resolve_status(&db, &running, &b).await.unwrap();
            assert_eq!(status.to_string(), "1/1 sent - finished");
        }
    }
}
