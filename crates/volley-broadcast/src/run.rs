// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable send-run progress records.
//!
//! One record per broadcast, keyed by broadcast id. Created the first time a
//! sender loop begins processing; never deleted. Absence means "not
//! started"; `next_index == length` means "finished".

use serde::{Deserialize, Serialize};
use tracing::debug;

use volley_core::{BroadcastId, Record, VolleyError};
use volley_storage::{records, Database};

use crate::broadcast::Broadcast;

/// Progress of one broadcast's send run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub broadcast_id: BroadcastId,
    /// Index into the contact list of the next recipient to process.
    pub next_index: u32,
    /// Contact count frozen when the run was created.
    pub length: u32,
}

impl Run {
    /// Fresh run for a broadcast, freezing its current contact count.
    pub fn new(broadcast: &Broadcast) -> Self {
        Self {
            broadcast_id: broadcast.id,
            next_index: 0,
            length: broadcast.contacts.len() as u32,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.next_index >= self.length
    }

    /// Load the run record for a broadcast, if one exists.
    pub async fn load(db: &Database, id: BroadcastId) -> Result<Option<Self>, VolleyError> {
        records::get(db, &run_key(id)).await
    }
}

impl Record for Run {
    const TYPE: &'static str = "run";

    fn key(&self) -> Vec<u8> {
        run_key(self.broadcast_id)
    }
}

/// Persistence key for a broadcast's run record.
pub fn run_key(id: BroadcastId) -> Vec<u8> {
    id.as_bytes().to_vec()
}

/// Persist run progress, enforcing monotonic non-decreasing `next_index`.
///
/// The read and the conditional write happen under one transaction, so a
/// stale writer can never move progress backwards; its write is dropped.
pub async fn save_progress(db: &Database, run: Run) -> Result<(), VolleyError> {
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            if let Some(current) = records::get_tx::<Run>(&tx, &run.key())? {
                if current.next_index > run.next_index {
                    debug!(
                        broadcast_id = %run.broadcast_id,
                        current = current.next_index,
                        stale = run.next_index,
                        "dropping stale run progress write"
                    );
                    return Ok(());
                }
            }
            records::put_tx(&tx, &run)?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(|e| VolleyError::Storage {
            source: format!("failed to persist run progress: {e}").into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use volley_core::Contact;

    async fn setup() -> (Database, Broadcast, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("runs.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        let mut b = Broadcast::new("s", "b");
        for i in 0..5 {
            b.contacts.push(Contact {
                name: format!("c{i}"),
                number: format!("+1555000{i}"),
            });
        }
        (db, b, dir)
    }

    #[tokio::test]
    async fn new_run_freezes_contact_count() {
        let (_db, b, _dir) = setup().await;
        let run = Run::new(&b);
        assert_eq!(run.next_index, 0);
        assert_eq!(run.length, 5);
        assert!(!run.is_finished());
    }

    #[tokio::test]
    async fn absent_run_loads_as_none() {
        let (db, b, _dir) = setup().await;
        assert!(Run::load(&db, b.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn progress_persists_and_advances() {
        let (db, b, _dir) = setup().await;
        let mut run = Run::new(&b);
        save_progress(&db, run).await.unwrap();

        run.next_index = 3;
        save_progress(&db, run).await.unwrap();

        let loaded = Run::load(&db, b.id).await.unwrap().unwrap();
        assert_eq!(loaded.next_index, 3);
        assert_eq!(loaded.length, 5);
    }

    #[tokio::test]
    async fn stale_progress_write_is_dropped() {
        let (db, b, _dir) = setup().await;
        let mut run = Run::new(&b);
        run.next_index = 4;
        save_progress(&db, run).await.unwrap();

        run.next_index = 2;
        save_progress(&db, run).await.unwrap();

        let loaded = Run::load(&db, b.id).await.unwrap().unwrap();
        assert_eq!(loaded.next_index, 4, "progress must never move backwards");
    }

    #[tokio::test]
    async fn finished_when_index_reaches_length() {
        let (db, b, _dir) = setup().await;
        let mut run = Run::new(&b);
        run.next_index = run.length;
        save_progress(&db, run).await.unwrap();

        let loaded = Run::load(&db, b.id).await.unwrap().unwrap();
        assert!(loaded.is_finished());
    }
}
