// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Strict parsing: unknown fields are rejected so a typo'd key fails loudly
//! instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level volley configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VolleyConfig {
    pub storage: StorageConfig,
    pub sender: SenderConfig,
}

/// Storage section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "volley.db".to_string(),
        }
    }
}

/// Sender-loop section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SenderConfig {
    /// Delay between consecutive deliveries, in milliseconds.
    pub pace_ms: u64,
    /// How often a due-but-windowless loop re-evaluates eligibility, in seconds.
    pub recheck_secs: u64,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            pace_ms: 250,
            recheck_secs: 30,
        }
    }
}
