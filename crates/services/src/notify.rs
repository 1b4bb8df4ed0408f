//! # Notification Side-Channel
//!
//! An append-only, separately-persisted log of user-facing events. The log
//! holds every user's entries; per-user views are filters over it. Entries
//! carry no reference back to the record that produced them.

use std::sync::Arc;

use chrono::Utc;
use domains::error::Result;
use domains::models::{Notification, NotificationKind};
use domains::traits::CollectionStore;
use tracing::warn;
use uuid::Uuid;

/// Entries kept per user; the oldest beyond this are pruned on append.
pub const DEFAULT_RETENTION: usize = 200;

#[derive(Clone)]
pub struct Notifier {
    store: Arc<dyn CollectionStore<Notification>>,
    retention: usize,
}

impl Notifier {
    pub fn new(store: Arc<dyn CollectionStore<Notification>>) -> Self {
        Self {
            store,
            retention: DEFAULT_RETENTION,
        }
    }

    pub fn with_retention(store: Arc<dyn CollectionStore<Notification>>, retention: usize) -> Self {
        Self { store, retention }
    }

    /// Appends an unread entry for `target`, prepending it to the log, then
    /// prunes the target's entries to the retention cap.
    pub async fn append(
        &self,
        target: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        subject_status: Option<String>,
    ) -> Result<Notification> {
        let entry = Notification {
            id: Uuid::now_v7(),
            user_id: target,
            kind,
            title: title.into(),
            message: message.into(),
            subject_status,
            read: false,
            created_at: Utc::now(),
        };

        let mut log = self.store.load_all().await?;
        log.insert(0, entry.clone());

        let mut kept = 0usize;
        log.retain(|n| {
            if n.user_id != target {
                return true;
            }
            kept += 1;
            kept <= self.retention
        });

        self.store.save_all(&log).await?;
        Ok(entry)
    }

    /// Best-effort append: a lifecycle outcome must not fail because the
    /// side-channel write did.
    pub async fn try_append(
        &self,
        target: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        subject_status: Option<String>,
    ) {
        if let Err(err) = self
            .append(target, kind, title, message, subject_status)
            .await
        {
            warn!(%err, "notification append failed");
        }
    }

    /// Marks one entry read. Already-read and unknown ids are no-ops.
    pub async fn mark_read(&self, id: Uuid) -> Result<()> {
        let mut log = self.store.load_all().await?;
        match log.iter_mut().find(|n| n.id == id && !n.read) {
            Some(entry) => {
                entry.read = true;
                self.store.save_all(&log).await?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Marks every entry for `target` read. Idempotent; skips the write
    /// when nothing is unread.
    pub async fn mark_all_read(&self, target: Uuid) -> Result<()> {
        let mut log = self.store.load_all().await?;
        let mut dirty = false;
        for entry in log.iter_mut().filter(|n| n.user_id == target && !n.read) {
            entry.read = true;
            dirty = true;
        }
        if dirty {
            self.store.save_all(&log).await?;
        }
        Ok(())
    }

    /// The target's entries, newest first.
    pub async fn list_for(&self, target: Uuid) -> Result<Vec<Notification>> {
        let mut entries: Vec<Notification> = self
            .store
            .load_all()
            .await?
            .into_iter()
            .filter(|n| n.user_id == target)
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(entries)
    }

    /// The badge counter.
    pub async fn unread_count(&self, target: Uuid) -> Result<usize> {
        Ok(self
            .store
            .load_all()
            .await?
            .iter()
            .filter(|n| n.user_id == target && !n.read)
            .count())
    }
}
