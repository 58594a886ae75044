// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the volley broadcast engine.

use thiserror::Error;

/// The primary error type used across all volley crates.
///
/// Absence of a record is not an error: typed lookups return `Ok(None)`
/// instead, so "no run yet" and "no default configured" never surface here.
#[derive(Debug, Error)]
pub enum VolleyError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A broadcast or settings timezone name that does not resolve to a known
    /// IANA zone. Carries the offending name; callers report the broadcast as
    /// not computable rather than guessing a zone.
    #[error("unknown timezone {name:?}")]
    InvalidTimezone { name: String },

    /// Storage backend errors (connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Transport gateway errors reported while sending a broadcast.
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
