// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock gateway for deterministic testing.
//!
//! Captures every delivery for assertion, and can be configured to fail
//! after N sends or to delay each delivery.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use volley_broadcast::Broadcast;
use volley_core::{BroadcastId, Contact, VolleyError};
use volley_sender::Gateway;

/// One captured delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub broadcast_id: BroadcastId,
    pub number: String,
}

/// A mock transport that records sends instead of performing them.
#[derive(Debug, Clone, Default)]
pub struct MockGateway {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    fail_after: Option<usize>,
    delay: Option<Duration>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every send once `n` deliveries have been captured.
    pub fn with_fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Delay each delivery, to exercise pacing and cancellation paths.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// All deliveries captured so far.
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SentMessage>> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Gateway for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, broadcast: &Broadcast, contact: &Contact) -> Result<(), VolleyError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut sent = self.lock();
        if let Some(n) = self.fail_after {
            if sent.len() >= n {
                return Err(VolleyError::Gateway {
                    message: format!("mock gateway failing after {n} sends"),
                    source: None,
                });
            }
        }
        sent.push(SentMessage {
            broadcast_id: broadcast.id,
            number: contact.number.clone(),
        });
        Ok(())
    }
}
