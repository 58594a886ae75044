// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The transport seam.
//!
//! The scheduling core never sends anything itself; a [`Gateway`] does.
//! Real transports (phone-based SMS bridges and the like) live outside this
//! repository and plug in here.

use async_trait::async_trait;
use tracing::info;

use volley_broadcast::Broadcast;
use volley_core::{Contact, VolleyError};

/// A message transport capable of delivering one broadcast message to one
/// contact.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Human-readable transport name, for logs.
    fn name(&self) -> &str;

    /// Deliver the broadcast's message to a single contact.
    async fn send(&self, broadcast: &Broadcast, contact: &Contact) -> Result<(), VolleyError>;

    /// Release any transport-level connections. Called when the sender loop
    /// stops for any reason.
    async fn close(&self) -> Result<(), VolleyError> {
        Ok(())
    }
}

/// Gateway that logs instead of sending. Default transport for local
/// operation and rehearsal runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunGateway;

impl DryRunGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Gateway for DryRunGateway {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn send(&self, broadcast: &Broadcast, contact: &Contact) -> Result<(), VolleyError> {
        info!(
            broadcast_id = %broadcast.id,
            contact = %contact.number,
            subject = %broadcast.msg_subject,
            "dry-run send"
        );
        Ok(())
    }
}
