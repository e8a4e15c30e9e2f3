//! Durable snapshot persistence for the entity store.
//!
//! The whole store state is one JSON document in a SQLite key-value table,
//! written under a fixed store name. Loading tolerates a missing row and
//! missing snapshot fields; unparseable JSON is reported as a corrupt
//! snapshot so the caller can fall back to defaults and warn the user.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{Error, Result};
use crate::store::StoreSnapshot;

/// Fixed key the snapshot is stored under.
const STORE_KEY: &str = "flashcards-storage";

pub struct SnapshotStore {
    conn: Connection,
}

impl SnapshotStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS snapshots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            (),
        )?;
        Ok(Self { conn })
    }

    /// Serializes the snapshot and upserts it under the store key.
    pub fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO snapshots (key, value) VALUES (?1, ?2)",
            params![STORE_KEY, json],
        )?;
        Ok(())
    }

    /// Loads the persisted snapshot. A missing row yields defaults; fields
    /// absent from the stored JSON (an older snapshot shape) default
    /// individually, so e.g. a snapshot without `reviews` loads with an
    /// empty review list.
    pub fn load(&self) -> Result<StoreSnapshot> {
        let row: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1",
                params![STORE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match row {
            None => Ok(StoreSnapshot::default()),
            Some(json) => serde_json::from_str(&json).map_err(|err| {
                log::warn!("snapshot under {STORE_KEY:?} failed to parse: {err}");
                Error::CorruptSnapshot(err.to_string())
            }),
        }
    }

    /// Removes the persisted snapshot entirely.
    pub fn clear(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM snapshots WHERE key = ?1", params![STORE_KEY])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Flashcard;

    fn snapshot_with_one_card() -> StoreSnapshot {
        StoreSnapshot {
            flashcards: vec![Flashcard::new(1, 7, "q".into(), "a".into())],
            ..Default::default()
        }
    }

    #[test]
    fn test_load_without_saved_snapshot_returns_defaults() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let snapshot = store.load().unwrap();

        assert!(snapshot.flashcards.is_empty());
        assert!(snapshot.reviews.is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let store = SnapshotStore::open_in_memory().unwrap();
        store.save(&snapshot_with_one_card()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.flashcards.len(), 1);
        assert_eq!(loaded.flashcards[0].question, "q");
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let store = SnapshotStore::open_in_memory().unwrap();
        store.save(&snapshot_with_one_card()).unwrap();
        store.save(&StoreSnapshot::default()).unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.flashcards.is_empty());
    }

    #[test]
    fn test_snapshot_missing_reviews_field_loads_empty() {
        let store = SnapshotStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO snapshots (key, value) VALUES (?1, ?2)",
                params![STORE_KEY, r#"{"flashcards": [], "flashcardSets": []}"#],
            )
            .unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.reviews.is_empty());
        assert_eq!(loaded.generation_settings.count, 15);
    }

    #[test]
    fn test_corrupt_snapshot_is_reported_not_panicked() {
        let store = SnapshotStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO snapshots (key, value) VALUES (?1, ?2)",
                params![STORE_KEY, "{ not json"],
            )
            .unwrap();

        assert!(matches!(store.load(), Err(Error::CorruptSnapshot(_))));
    }

    #[test]
    fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scheduler.sqlite3");

        {
            let store = SnapshotStore::open(&path).unwrap();
            store.save(&snapshot_with_one_card()).unwrap();
        }

        let reopened = SnapshotStore::open(&path).unwrap();
        assert_eq!(reopened.load().unwrap().flashcards.len(), 1);
    }

    #[test]
    fn test_clear_removes_snapshot() {
        let store = SnapshotStore::open_in_memory().unwrap();
        store.save(&snapshot_with_one_card()).unwrap();
        store.clear().unwrap();

        assert!(store.load().unwrap().flashcards.is_empty());
    }
}
