// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the volley broadcast engine.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed CRUD over
//! a generic record table keyed by the [`volley_core::Record`] contract.

pub mod database;
pub mod migrations;
pub mod records;

pub use database::Database;
