// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed CRUD over the generic `records` table.
//!
//! Every entity implementing [`Record`] is stored as a JSON value under
//! `(record_type, key)`. Lookups return `Ok(None)` when the record does not
//! exist; absence is never an error.
//!
//! The `*_tx` functions are synchronous and run against a borrowed
//! connection or transaction, so callers that need several lookups to
//! observe one consistent snapshot can issue them inside a single
//! `connection().call(...)` closure with an open transaction.

use rusqlite::params;

use volley_core::{Record, VolleyError};

use crate::database::{map_tr_err, Database};

/// Fetch a record by key within the caller's connection or transaction.
pub fn get_tx<T: Record>(
    conn: &rusqlite::Connection,
    key: &[u8],
) -> Result<Option<T>, tokio_rusqlite::Error> {
    let mut stmt = conn.prepare("SELECT value FROM records WHERE record_type = ?1 AND key = ?2")?;
    let raw: Option<Vec<u8>> = match stmt.query_row(params![T::TYPE, key], |row| row.get(0)) {
        Ok(value) => Some(value),
        Err(rusqlite::Error::QueryReturnedNoRows) => None,
        Err(e) => return Err(e.into()),
    };
    raw.map(|bytes| serde_json::from_slice(&bytes))
        .transpose()
        .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
}

/// Insert or overwrite a record within the caller's connection or transaction.
pub fn put_tx<T: Record>(
    conn: &rusqlite::Connection,
    record: &T,
) -> Result<(), tokio_rusqlite::Error> {
    let value =
        serde_json::to_vec(record).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
    conn.execute(
        "INSERT INTO records (record_type, key, value) VALUES (?1, ?2, ?3)
         ON CONFLICT (record_type, key) DO UPDATE SET value = excluded.value",
        params![T::TYPE, record.key(), value],
    )?;
    Ok(())
}

/// List all records of a type, ordered by key.
pub fn list_tx<T: Record>(conn: &rusqlite::Connection) -> Result<Vec<T>, tokio_rusqlite::Error> {
    let mut stmt =
        conn.prepare("SELECT value FROM records WHERE record_type = ?1 ORDER BY key")?;
    let rows = stmt.query_map(params![T::TYPE], |row| row.get::<_, Vec<u8>>(0))?;
    let mut records = Vec::new();
    for row in rows {
        let bytes = row?;
        let record = serde_json::from_slice(&bytes)
            .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
        records.push(record);
    }
    Ok(records)
}

/// Delete a record by key. Returns whether a record was removed.
pub fn delete_tx<T: Record>(
    conn: &rusqlite::Connection,
    key: &[u8],
) -> Result<bool, tokio_rusqlite::Error> {
    let removed = conn.execute(
        "DELETE FROM records WHERE record_type = ?1 AND key = ?2",
        params![T::TYPE, key],
    )?;
    Ok(removed > 0)
}

/// Fetch a record by key.
pub async fn get<T: Record>(db: &Database, key: &[u8]) -> Result<Option<T>, VolleyError> {
    let key = key.to_vec();
    db.connection()
        .call(move |conn| get_tx::<T>(conn, &key))
        .await
        .map_err(map_tr_err)
}

/// Insert or overwrite a record.
pub async fn put<T: Record>(db: &Database, record: &T) -> Result<(), VolleyError> {
    let rtype = T::TYPE;
    let key = record.key();
    let value = serde_json::to_vec(record).map_err(|e| VolleyError::Storage {
        source: Box::new(e),
    })?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO records (record_type, key, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT (record_type, key) DO UPDATE SET value = excluded.value",
                params![rtype, key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// List all records of a type, ordered by key.
pub async fn list<T: Record>(db: &Database) -> Result<Vec<T>, VolleyError> {
    db.connection()
        .call(move |conn| list_tx::<T>(conn))
        .await
        .map_err(map_tr_err)
}

/// Delete a record by key. Returns whether a record was removed.
pub async fn delete<T: Record>(db: &Database, key: &[u8]) -> Result<bool, VolleyError> {
    let key = key.to_vec();
    db.connection()
        .call(move |conn| delete_tx::<T>(conn, &key))
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        body: String,
    }

    impl Record for Note {
        const TYPE: &'static str = "note";

        fn key(&self) -> Vec<u8> {
            self.id.clone().into_bytes()
        }
    }

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn put_and_get_roundtrips() {
        let (db, _dir) = setup_db().await;
        let note = Note {
            id: "n1".into(),
            body: "hello".into(),
        };
        put(&db, &note).await.unwrap();

        let loaded: Option<Note> = get(&db, b"n1").await.unwrap();
        assert_eq!(loaded, Some(note));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let (db, _dir) = setup_db().await;
        let loaded: Option<Note> = get(&db, b"absent").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn put_overwrites_existing_value() {
        let (db, _dir) = setup_db().await;
        let mut note = Note {
            id: "n1".into(),
            body: "first".into(),
        };
        put(&db, &note).await.unwrap();
        note.body = "second".into();
        put(&db, &note).await.unwrap();

        let loaded: Note = get(&db, b"n1").await.unwrap().unwrap();
        assert_eq!(loaded.body, "second");
    }

    #[tokio::test]
    async fn list_returns_records_in_key_order() {
        let (db, _dir) = setup_db().await;
        for id in ["c", "a", "b"] {
            let note = Note {
                id: id.into(),
                body: String::new(),
            };
            put(&db, &note).await.unwrap();
        }

        let notes: Vec<Note> = list(&db).await.unwrap();
        let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let (db, _dir) = setup_db().await;
        let note = Note {
            id: "n1".into(),
            body: String::new(),
        };
        put(&db, &note).await.unwrap();

        assert!(delete::<Note>(&db, b"n1").await.unwrap());
        assert!(!delete::<Note>(&db, b"n1").await.unwrap());
        let loaded: Option<Note> = get(&db, b"n1").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn tx_variants_observe_one_snapshot() {
        let (db, _dir) = setup_db().await;
        let a = Note {
            id: "a".into(),
            body: "x".into(),
        };
        let b = Note {
            id: "b".into(),
            body: "y".into(),
        };
        put(&db, &a).await.unwrap();
        put(&db, &b).await.unwrap();

        let (got_a, got_b) = db
            .connection()
            .call(|conn| {
                let tx = conn.transaction()?;
                let got_a = get_tx::<Note>(&tx, b"a")?;
                let got_b = get_tx::<Note>(&tx, b"b")?;
                Ok((got_a, got_b))
            })
            .await
            .unwrap();
        assert_eq!(got_a.unwrap().body, "x");
        assert_eq!(got_b.unwrap().body, "y");
    }
}
