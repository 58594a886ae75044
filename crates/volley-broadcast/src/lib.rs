// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Broadcast scheduling core.
//!
//! Decides whether and when a broadcast may begin transmitting (recurring
//! daily send windows, date bounds, timezone resolution), tracks persisted
//! run progress, and synthesizes a human-readable lifecycle status. The
//! actual dispatch is done by a sender loop elsewhere; this crate only
//! answers the scheduling questions and keeps the books.

pub mod broadcast;
pub mod eligibility;
pub mod order;
pub mod run;
pub mod running;
pub mod settings;
pub mod status;

pub use broadcast::Broadcast;
pub use eligibility::{current_window_deadline, next_eligible_instant};
pub use order::sort_by_urgency;
pub use run::{run_key, save_progress, Run};
pub use running::{RunningGuard, RunningSet};
pub use settings::{SendDefaults, SettingSendHours, SettingTimezone};
pub use status::{resolve_status, status_from_parts, Status};
