//! # MemoryStore
//!
//! In-memory slot map mirroring the origin-scoped key-value storage the
//! portal originally persisted to: one string payload per slot, replaced
//! wholesale on every write, with an optional byte quota so callers can
//! exercise the write-rejected path.

use async_trait::async_trait;
use dashmap::DashMap;
use domains::error::StoreError;
use domains::traits::{CollectionStore, Record};
use tracing::warn;

#[derive(Default)]
pub struct MemoryStore {
    slots: DashMap<&'static str, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once the sum of all slot payloads would
    /// exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: DashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Raw payload of a slot, for inspection in tests.
    pub fn raw_slot(&self, slot: &str) -> Option<String> {
        self.slots.get(slot).map(|entry| entry.value().clone())
    }

    /// Injects a raw payload, bypassing serialization. Lets tests plant a
    /// corrupt slot.
    pub fn put_raw(&self, slot: &'static str, payload: impl Into<String>) {
        self.slots.insert(slot, payload.into());
    }

    fn bytes_excluding(&self, slot: &str) -> usize {
        self.slots
            .iter()
            .filter(|entry| *entry.key() != slot)
            .map(|entry| entry.value().len())
            .sum()
    }
}

#[async_trait]
impl<R: Record> CollectionStore<R> for MemoryStore {
    async fn load_all(&self) -> Result<Vec<R>, StoreError> {
        let Some(payload) = self.raw_slot(R::SLOT) else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&payload) {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(slot = R::SLOT, %err, "discarding unreadable collection payload");
                Ok(Vec::new())
            }
        }
    }

    async fn save_all(&self, records: &[R]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(records)?;
        if let Some(quota) = self.quota_bytes {
            if self.bytes_excluding(R::SLOT) + payload.len() > quota {
                return Err(StoreError::QuotaExceeded(R::SLOT.to_string()));
            }
        }
        self.slots.insert(R::SLOT, payload);
        Ok(())
    }
}
