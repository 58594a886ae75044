// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The broadcast campaign entity.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use volley_core::{format_windows, BroadcastId, Contact, Record, TimeWindow};

/// A scheduled bulk-messaging campaign.
///
/// The message payload and gateway fields are opaque to the scheduling core;
/// only the contact list, date bounds, send hours, and timezone participate
/// in eligibility decisions. Lifecycle status is never stored on the entity:
/// it is recomputed on every read via [`crate::status::resolve_status`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    pub id: BroadcastId,
    pub contacts: Vec<Contact>,
    pub msg_subject: String,
    pub msg_body: String,
    /// Optional attachment reference (a file name; contents live elsewhere).
    pub msg_attachment: Option<String>,
    pub gateway_type: String,
    pub gateway_key: Vec<u8>,
    /// Inclusive lower date bound; `None` means unbounded.
    pub send_date_from: Option<DateTime<Utc>>,
    /// Soft-inclusive upper date bound; a campaign stays current for 24h
    /// past it. `None` means unbounded.
    pub send_date_to: Option<DateTime<Utc>>,
    /// Per-broadcast recurring windows; empty means "use the default".
    pub send_hours: Vec<TimeWindow>,
    /// IANA zone name; `None` means "use the default, else local".
    pub timezone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Broadcast {
    /// Create an empty broadcast with a fresh id.
    pub fn new(msg_subject: impl Into<String>, msg_body: impl Into<String>) -> Self {
        Self {
            id: BroadcastId::new(),
            contacts: Vec::new(),
            msg_subject: msg_subject.into(),
            msg_body: msg_body.into(),
            msg_attachment: None,
            gateway_type: String::new(),
            gateway_key: Vec::new(),
            send_date_from: None,
            send_date_to: None,
            send_hours: Vec::new(),
            timezone: None,
            created_at: Utc::now(),
        }
    }

    /// Multi-line summary of the static fields, for detail views.
    pub fn details(&self) -> String {
        let mut buf = String::new();
        let _ = writeln!(buf, "ID: {}", self.id);
        let _ = writeln!(buf, "Contacts: {}", self.contacts.len());
        let _ = writeln!(buf, "Message subject: {}", self.msg_subject);
        let _ = writeln!(buf, "Message body: {}", self.msg_body);
        if let Some(attachment) = &self.msg_attachment {
            let _ = writeln!(buf, "Attachment: {attachment}");
        }
        let _ = writeln!(buf, "Gateway: {}", self.gateway_type);
        if let Some(from) = self.send_date_from {
            let _ = writeln!(buf, "Send date from: {from}");
        }
        if let Some(to) = self.send_date_to {
            let _ = writeln!(buf, "Send date to: {to}");
        }
        let _ = writeln!(buf, "Send hours: {}", format_windows(&self.send_hours));
        buf
    }
}

impl Record for Broadcast {
    const TYPE: &'static str = "broadcast";

    fn key(&self) -> Vec<u8> {
        self.id.as_bytes().to_vec()
    }
}
