// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Global default settings and their resolver.
//!
//! Two independent singleton records: default send hours and default
//! timezone. Absence of either is a valid state meaning "no default
//! configured": lookups return `None`, never an error.

use serde::{Deserialize, Serialize};

use volley_core::{Record, TimeWindow, VolleyError};
use volley_storage::{records, Database};

/// Singleton record: the default send-hours applied to broadcasts that do
/// not declare their own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingSendHours(pub Vec<TimeWindow>);

impl Record for SettingSendHours {
    const TYPE: &'static str = "setting";

    fn key(&self) -> Vec<u8> {
        SEND_HOURS_KEY.to_vec()
    }
}

/// Singleton record: the default IANA timezone name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingTimezone(pub String);

impl Record for SettingTimezone {
    const TYPE: &'static str = "setting";

    fn key(&self) -> Vec<u8> {
        TIMEZONE_KEY.to_vec()
    }
}

const SEND_HOURS_KEY: &[u8] = b"send-hours";
const TIMEZONE_KEY: &[u8] = b"timezone";

/// Resolved defaults handed to the eligibility calculators.
#[derive(Debug, Clone, Default)]
pub struct SendDefaults {
    pub send_hours: Vec<TimeWindow>,
    pub timezone: Option<String>,
}

impl SendDefaults {
    /// Read both settings within the caller's connection or transaction.
    pub fn read_tx(conn: &rusqlite::Connection) -> Result<Self, tokio_rusqlite::Error> {
        let hours = records::get_tx::<SettingSendHours>(conn, SEND_HOURS_KEY)?;
        let timezone = records::get_tx::<SettingTimezone>(conn, TIMEZONE_KEY)?;
        Ok(Self {
            send_hours: hours.map(|h| h.0).unwrap_or_default(),
            timezone: timezone.map(|t| t.0).filter(|name| !name.is_empty()),
        })
    }

    /// Read both settings under one transaction for a consistent snapshot.
    pub async fn read(db: &Database) -> Result<Self, VolleyError> {
        db.connection()
            .call(|conn| {
                let tx = conn.transaction()?;
                Self::read_tx(&tx)
            })
            .await
            .map_err(|e| VolleyError::Storage {
                source: format!("failed to read send settings: {e}").into(),
            })
    }
}
