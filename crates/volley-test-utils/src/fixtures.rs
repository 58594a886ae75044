// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database and broadcast fixtures.

use tempfile::TempDir;

use volley_broadcast::Broadcast;
use volley_core::Contact;
use volley_storage::Database;

/// Open a migrated database in a fresh temp directory.
///
/// Keep the returned `TempDir` alive for the duration of the test; dropping
/// it deletes the database file.
pub async fn temp_db() -> (Database, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("volley-test.db");
    let db = Database::open(path.to_str().expect("utf-8 temp path"))
        .await
        .expect("open test database");
    (db, dir)
}

/// Numbered test contacts.
pub fn contacts(n: usize) -> Vec<Contact> {
    (0..n)
        .map(|i| Contact {
            name: format!("contact-{i}"),
            number: format!("+1555000{i:04}"),
        })
        .collect()
}

/// A UTC broadcast with `n` contacts, no windows and no date bounds: always
/// eligible, so sender loops start immediately.
pub fn all_day_broadcast(n: usize) -> Broadcast {
    let mut b = Broadcast::new("test subject", "test body");
    b.timezone = Some("UTC".into());
    b.contacts = contacts(n);
    b
}
