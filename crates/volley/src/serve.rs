// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `volley serve` command implementation.
//!
//! Spawns one sender loop per stored broadcast, sharing a single
//! running-set and shutdown token. Loops park themselves between send
//! windows; SIGINT/SIGTERM stops them all promptly.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{info, warn};

use volley_broadcast::{Broadcast, RunningSet};
use volley_config::VolleyConfig;
use volley_core::VolleyError;
use volley_sender::{install_signal_handler, DryRunGateway, SenderRunner};
use volley_storage::{records, Database};

/// Run the `volley serve` command.
pub async fn run_serve(config: &VolleyConfig) -> Result<(), VolleyError> {
    let db = Database::open(&config.storage.database_path).await?;
    let broadcasts: Vec<Broadcast> = records::list(&db).await?;
    if broadcasts.is_empty() {
        info!("no broadcasts to send");
        return Ok(());
    }

    let cancel = install_signal_handler();
    let running = RunningSet::new();
    let pace = Duration::from_millis(config.sender.pace_ms);
    let recheck = Duration::from_secs(config.sender.recheck_secs);

    info!(count = broadcasts.len(), "starting sender loops");
    let mut loops = JoinSet::new();
    for broadcast in broadcasts {
        let runner = SenderRunner::new(
            db.clone(),
            running.clone(),
            Arc::new(DryRunGateway::new()),
            cancel.clone(),
        )
        .with_pacing(pace)
        .with_recheck(recheck);
        loops.spawn(async move {
            let id = broadcast.id;
            if let Err(e) = runner.run(broadcast).await {
                warn!(broadcast_id = %id, error = %e, "sender loop failed");
            }
        });
    }
    while loops.join_next().await.is_some() {}

    db.close().await?;
    info!("all sender loops stopped");
    Ok(())
}
