//! # JsonFileStore
//!
//! Durable `CollectionStore` over a directory of JSON files, one file per
//! storage slot. Writes go through a temp file + rename so a crashed write
//! never leaves a half-written slot behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domains::error::StoreError;
use domains::traits::{CollectionStore, Record};
use tokio::fs;
use tracing::warn;

/// ENOSPC; the one I/O failure the caller is told to treat as "make room".
const CODE_NO_SPACE: i32 = 28;

pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.root.join(format!("{slot}.json"))
    }
}

fn classify_write_error(slot: &str, err: std::io::Error) -> StoreError {
    if err.raw_os_error() == Some(CODE_NO_SPACE) {
        StoreError::QuotaExceeded(slot.to_string())
    } else {
        StoreError::Io(err)
    }
}

#[async_trait]
impl<R: Record> CollectionStore<R> for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<R>, StoreError> {
        let path = self.slot_path(R::SLOT);
        let raw = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };

        match serde_json::from_slice(&raw) {
            Ok(records) => Ok(records),
            Err(err) => {
                // An unreadable slot is recoverable: report it and start
                // from an empty collection rather than failing every read.
                warn!(slot = R::SLOT, %err, "discarding unreadable collection payload");
                Ok(Vec::new())
            }
        }
    }

    async fn save_all(&self, records: &[R]) -> Result<(), StoreError> {
        let path = self.slot_path(R::SLOT);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| classify_write_error(R::SLOT, err))?;
        }

        let payload = serde_json::to_vec_pretty(records)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &payload)
            .await
            .map_err(|err| classify_write_error(R::SLOT, err))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|err| classify_write_error(R::SLOT, err))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::models::Note;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn note(owner: Uuid, title: &str) -> Note {
        let now = Utc::now();
        Note {
            id: Uuid::now_v7(),
            owner_id: owner,
            title: title.into(),
            content: "ten characters at minimum here".into(),
            course: None,
            tags: vec![],
            is_favorite: false,
            is_public: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn missing_slot_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let notes: Vec<Note> = store.load_all().await.unwrap();
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let owner = Uuid::now_v7();
        let notes = vec![note(owner, "first"), note(owner, "second")];

        store.save_all(&notes).await.unwrap();
        let loaded: Vec<Note> = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "first");
        assert!(dir.path().join("notes.json").exists());
    }

    #[tokio::test]
    async fn corrupt_slot_recovers_as_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("notes.json"), b"{not json").unwrap();

        let store = JsonFileStore::new(dir.path());
        let notes: Vec<Note> = store.load_all().await.unwrap();
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn no_temp_file_survives_a_save() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save_all(&[note(Uuid::now_v7(), "only")]).await.unwrap();
        assert!(!dir.path().join("notes.json.tmp").exists());
    }

    #[tokio::test]
    async fn scoped_save_preserves_other_owners() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let alice = Uuid::now_v7();
        let bob = Uuid::now_v7();
        store
            .save_all(&[note(alice, "a1"), note(bob, "b1"), note(bob, "b2")])
            .await
            .unwrap();

        store
            .save_scoped(alice, vec![note(alice, "a2")])
            .await
            .unwrap();

        let all: Vec<Note> = store.load_all().await.unwrap();
        let bobs: Vec<_> = all.iter().filter(|n| n.owner_id == bob).collect();
        let alices: Vec<_> = all.iter().filter(|n| n.owner_id == alice).collect();
        assert_eq!(bobs.len(), 2);
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].title, "a2");
    }
}
