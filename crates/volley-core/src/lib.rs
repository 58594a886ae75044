// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the volley broadcast scheduling engine.
//!
//! This crate provides the error taxonomy, the persistence record contract,
//! and the small shared types used throughout the volley workspace.

pub mod error;
pub mod record;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VolleyError;
pub use record::Record;
pub use types::{format_windows, BroadcastId, Contact, TimeWindow};
