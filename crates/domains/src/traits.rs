//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be used by the services.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

use crate::error::StoreError;
use crate::models::UserProfile;

/// Implemented by every persisted record type.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Stable storage slot name, one per entity type.
    const SLOT: &'static str;

    fn id(&self) -> Uuid;

    /// The creating user, when the record type has one.
    fn owner_id(&self) -> Option<Uuid>;

    fn created_at(&self) -> DateTime<Utc>;
}

/// Data persistence contract for one entity type's full collection.
///
/// A persisted collection is always the complete set for all users; scoped
/// views are filters over it. The provided `save_scoped` carries the
/// read-merge-write discipline so adapters only implement whole-collection
/// load and replace.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait CollectionStore<R: Record>: Send + Sync {
    /// The entire persisted collection, or empty if none exists. An
    /// unreadable payload is an adapter-level recoverable condition and is
    /// reported as empty, not as an error.
    async fn load_all(&self) -> Result<Vec<R>, StoreError>;

    /// Serializes and persists the *entire* collection, replacing any prior
    /// value in a single write. On failure the in-memory state the caller
    /// was editing is untouched and may be retried.
    async fn save_all(&self, records: &[R]) -> Result<(), StoreError>;

    /// `load_all` filtered to one owner.
    async fn load_scoped(&self, owner: Uuid) -> Result<Vec<R>, StoreError> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .filter(|r| r.owner_id() == Some(owner))
            .collect())
    }

    /// Merges a scoped subset back into the full collection: the owner's
    /// prior records are removed, the provided set re-inserted, and the
    /// whole collection saved. Skipping the merge would silently drop every
    /// other owner's records.
    async fn save_scoped(&self, owner: Uuid, scoped: Vec<R>) -> Result<(), StoreError> {
        let mut full: Vec<R> = self
            .load_all()
            .await?
            .into_iter()
            .filter(|r| r.owner_id() != Some(owner))
            .collect();
        full.extend(scoped);
        self.save_all(&full).await
    }
}

/// Identity contract. Supplies the signed-in user the services scope
/// ownership by, or `None` when unauthenticated.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self) -> Option<UserProfile>;
}

impl Record for crate::models::Complaint {
    const SLOT: &'static str = "complaints";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.owner_id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for crate::models::Note {
    const SLOT: &'static str = "notes";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.owner_id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for crate::models::VolunteerEvent {
    const SLOT: &'static str = "volunteer_events";

    fn id(&self) -> Uuid {
        self.id
    }

    // Events are administered records, not owned ones.
    fn owner_id(&self) -> Option<Uuid> {
        None
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for crate::models::VolunteerRegistration {
    const SLOT: &'static str = "volunteer_registrations";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.owner_id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for crate::models::LostFoundItem {
    const SLOT: &'static str = "lost_found_items";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.owner_id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for crate::models::Notification {
    const SLOT: &'static str = "notifications";

    fn id(&self) -> Uuid {
        self.id
    }

    // The target user owns their slice of the log.
    fn owner_id(&self) -> Option<Uuid> {
        Some(self.user_id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
