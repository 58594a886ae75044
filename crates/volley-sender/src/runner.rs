// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The sender loop.
//!
//! One runner drives one broadcast: sleep until the next eligible instant,
//! mark the broadcast as running, work through the contact list while the
//! current window is open, persist progress after every delivery, and step
//! aside again when the window closes. The running-set entry is held by an
//! RAII guard, so pause, completion, gateway failure, and cancellation all
//! release it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use volley_broadcast::{
    current_window_deadline, next_eligible_instant, save_progress, Broadcast, Run, RunningSet,
    SendDefaults,
};
use volley_core::VolleyError;
use volley_storage::{records, Database};

use crate::gateway::Gateway;

/// How long to wait before re-evaluating eligibility when the calculator
/// says "due" but no window is actually open (boundary skew).
const RECHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Outcome of one burst of work inside an open window.
enum Burst {
    Finished,
    WindowClosed,
    Cancelled,
    AlreadyRunning,
    NoContacts,
}

/// Drives one broadcast's send run to completion.
pub struct SenderRunner {
    db: Database,
    running: RunningSet,
    gateway: Arc<dyn Gateway>,
    cancel: CancellationToken,
    pace: Duration,
    recheck: Duration,
}

impl SenderRunner {
    pub fn new(
        db: Database,
        running: RunningSet,
        gateway: Arc<dyn Gateway>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            db,
            running,
            gateway,
            cancel,
            pace: Duration::ZERO,
            recheck: RECHECK_INTERVAL,
        }
    }

    /// Delay between consecutive deliveries.
    pub fn with_pacing(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    /// Override the due-but-no-window re-evaluation interval.
    pub fn with_recheck(mut self, recheck: Duration) -> Self {
        self.recheck = recheck;
        self
    }

    /// Run the broadcast until finished, not startable, or cancelled.
    ///
    /// The gateway is closed on every exit path.
    pub async fn run(&self, broadcast: Broadcast) -> Result<(), VolleyError> {
        let result = self.drive(&broadcast).await;
        if let Err(e) = self.gateway.close().await {
            warn!(gateway = self.gateway.name(), error = %e, "gateway close failed");
        }
        result
    }

    async fn drive(&self, broadcast: &Broadcast) -> Result<(), VolleyError> {
        loop {
            if self.cancel.is_cancelled() {
                return Ok(());
            }
            let defaults = SendDefaults::read(&self.db).await?;
            let now = Utc::now();
            let Some(at) = next_eligible_instant(broadcast, &defaults, now)? else {
                info!(broadcast_id = %broadcast.id, "not startable, sender loop exiting");
                return Ok(());
            };
            if at > now {
                debug!(broadcast_id = %broadcast.id, eligible_at = %at, "waiting for send window");
                if !self.sleep_or_cancel(at, now).await {
                    return Ok(());
                }
                continue;
            }

            // Due: bound the burst by the open window's deadline.
            let Some(deadline) = current_window_deadline(broadcast, &defaults, Utc::now())?
            else {
                // Eligible on paper but the window just closed; re-evaluate.
                if !self.pause_or_cancel(self.recheck).await {
                    return Ok(());
                }
                continue;
            };

            match self.send_burst(broadcast, deadline).await? {
                Burst::Finished => {
                    info!(broadcast_id = %broadcast.id, "broadcast finished");
                    return Ok(());
                }
                Burst::NoContacts => {
                    info!(broadcast_id = %broadcast.id, "broadcast has no contacts");
                    return Ok(());
                }
                Burst::Cancelled | Burst::AlreadyRunning => return Ok(()),
                Burst::WindowClosed => continue,
            }
        }
    }

    async fn send_burst(
        &self,
        broadcast: &Broadcast,
        deadline: DateTime<Utc>,
    ) -> Result<Burst, VolleyError> {
        let Some(_guard) = self.running.start(broadcast.id) else {
            warn!(broadcast_id = %broadcast.id, "broadcast already being sent, refusing to start");
            return Ok(Burst::AlreadyRunning);
        };

        let mut run = records::get::<Run>(&self.db, &volley_broadcast::run_key(broadcast.id))
            .await?
            .unwrap_or_else(|| Run::new(broadcast));
        if run.length == 0 {
            save_progress(&self.db, run).await?;
            return Ok(Burst::NoContacts);
        }
        info!(
            broadcast_id = %broadcast.id,
            next = run.next_index,
            total = run.length,
            until = %deadline,
            "send burst started"
        );

        while !run.is_finished() {
            if self.cancel.is_cancelled() {
                info!(broadcast_id = %broadcast.id, sent = run.next_index, "send burst cancelled");
                return Ok(Burst::Cancelled);
            }
            if Utc::now() >= deadline {
                info!(broadcast_id = %broadcast.id, sent = run.next_index, "send window closed, pausing");
                return Ok(Burst::WindowClosed);
            }
            let Some(contact) = broadcast.contacts.get(run.next_index as usize) else {
                // Contact list shrank underneath a persisted run; stop at
                // the end of what exists.
                warn!(
                    broadcast_id = %broadcast.id,
                    next = run.next_index,
                    contacts = broadcast.contacts.len(),
                    "run index beyond contact list"
                );
                return Ok(Burst::Finished);
            };

            self.gateway.send(broadcast, contact).await?;
            run.next_index += 1;
            save_progress(&self.db, run).await?;

            if !self.pace.is_zero() && !run.is_finished() && !self.pause_or_cancel(self.pace).await
            {
                return Ok(Burst::Cancelled);
            }
        }
        Ok(Burst::Finished)
    }

    /// Sleep until `at`; returns `false` if cancelled first.
    async fn sleep_or_cancel(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let wait = (at - now).to_std().unwrap_or(Duration::ZERO);
        self.pause_or_cancel(wait).await
    }

    /// Sleep for `duration`; returns `false` if cancelled first.
    async fn pause_or_cancel(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(duration) => true,
        }
    }
}
