// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sender loop for the volley broadcast engine.
//!
//! The scheduling core (volley-broadcast) answers "when may this broadcast
//! send?"; this crate acts on the answer. A [`SenderRunner`] per broadcast
//! waits for eligibility, marks the broadcast as running, delivers through
//! a [`Gateway`], and persists progress so an interrupted run resumes where
//! it stopped.

pub mod gateway;
pub mod runner;
pub mod shutdown;

pub use gateway::{DryRunGateway, Gateway};
pub use runner::SenderRunner;
pub use shutdown::install_signal_handler;
