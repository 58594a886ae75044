// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `volley status` command implementation.
//!
//! Lists stored broadcasts sorted by current-window urgency, each with its
//! synthesized lifecycle status.

use chrono::Utc;

use volley_broadcast::{resolve_status, sort_by_urgency, Broadcast, RunningSet, SendDefaults};
use volley_config::VolleyConfig;
use volley_core::VolleyError;
use volley_storage::{records, Database};

/// Run the `volley status` command.
pub async fn run_status(config: &VolleyConfig) -> Result<(), VolleyError> {
    let db = Database::open(&config.storage.database_path).await?;
    let defaults = SendDefaults::read(&db).await?;
    let mut broadcasts: Vec<Broadcast> = records::list(&db).await?;
    if broadcasts.is_empty() {
        println!("no broadcasts");
        return Ok(());
    }
    sort_by_urgency(&mut broadcasts, &defaults, Utc::now());

    // The running-set is per-process; a broadcast being actively worked by
    // a serve process elsewhere shows as paused here.
    let running = RunningSet::new();

    println!("{:<36}  {:>8}  STATUS", "ID", "CONTACTS");
    for broadcast in &broadcasts {
        let status = resolve_status(&db, &running, broadcast).await?;
        println!(
            "{:<36}  {:>8}  {}",
            broadcast.id.to_string(),
            broadcast.contacts.len(),
            status
        );
    }
    Ok(())
}
