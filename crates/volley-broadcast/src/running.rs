// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory registry of broadcasts currently being worked by a sender loop.
//!
//! Volatile by design: membership does not survive a restart, and an absent
//! entry for a broadcast with an incomplete run record reads as "paused",
//! not "never started". One coarse lock guards all operations; they are
//! O(1) and rare relative to status-refresh cadence.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use volley_core::BroadcastId;

/// Shared, cloneable running-set. All clones observe the same membership.
///
/// Injected into sender loops and status readers by whatever wires them
/// together; there is intentionally no process-global instance.
#[derive(Debug, Clone, Default)]
pub struct RunningSet {
    inner: Arc<Mutex<HashSet<BroadcastId>>>,
}

impl RunningSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a broadcast. Returns `false` if it was already present.
    pub fn insert(&self, id: BroadcastId) -> bool {
        self.lock().insert(id)
    }

    /// Remove a broadcast. Returns `false` if it was not present.
    pub fn remove(&self, id: BroadcastId) -> bool {
        self.lock().remove(&id)
    }

    pub fn contains(&self, id: BroadcastId) -> bool {
        self.lock().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Mark a broadcast as actively running, returning a guard that removes
    /// it again on drop, whether the loop finished, paused, failed, or was
    /// cancelled. Returns `None` if the broadcast is already running.
    pub fn start(&self, id: BroadcastId) -> Option<RunningGuard> {
        if !self.insert(id) {
            return None;
        }
        Some(RunningGuard {
            set: self.clone(),
            id,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<BroadcastId>> {
        // A poisoned lock only means another sender panicked mid-operation;
        // membership itself is still a valid HashSet.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Removes its broadcast from the set when dropped.
#[must_use = "dropping the guard immediately unmarks the broadcast"]
pub struct RunningGuard {
    set: RunningSet,
    id: BroadcastId,
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.set.remove(self.id);
    }
}
