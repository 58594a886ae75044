// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities shared by volley integration tests: a mock gateway with
//! captured deliveries, temp-database setup, and broadcast fixtures.

pub mod fixtures;
pub mod gateway;

pub use fixtures::{all_day_broadcast, contacts, temp_db};
pub use gateway::{MockGateway, SentMessage};
