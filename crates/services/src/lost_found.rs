//! # Lost & Found Service
//!
//! Item reports in a shared collection every user can browse. The reporter
//! closes out their own item once a claim has been arranged off-channel.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{AppError, Result};
use domains::models::{ItemStatus, LostFoundItem, NotificationKind};
use domains::query::{view, ItemFilter, SortKey};
use domains::traits::{CollectionStore, IdentityProvider};
use domains::validate::LostFoundDraft;
use domains::workflow::{can_transition_item, Workflow};
use uuid::Uuid;

use crate::notify::Notifier;
use crate::require_user;

pub struct LostFoundService {
    store: Arc<dyn CollectionStore<LostFoundItem>>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Notifier,
}

impl LostFoundService {
    pub fn new(
        store: Arc<dyn CollectionStore<LostFoundItem>>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Notifier,
    ) -> Self {
        Self {
            store,
            identity,
            notifier,
        }
    }

    pub async fn report(&self, draft: LostFoundDraft) -> Result<LostFoundItem> {
        let user = require_user(self.identity.as_ref()).await?;
        draft.validate().map_err(AppError::Validation)?;

        let now = Utc::now();
        let item = LostFoundItem {
            id: Uuid::now_v7(),
            owner_id: user.id,
            report_kind: draft.report_kind,
            item_name: draft.item_name,
            description: draft.description,
            category: draft.category,
            location: draft.location,
            occurred_on: draft.occurred_on,
            contact: draft.contact,
            status: ItemStatus::Open,
            created_at: now,
            updated_at: now,
        };

        let mut all = self.store.load_all().await?;
        all.push(item.clone());
        self.store.save_all(&all).await?;

        self.notifier
            .try_append(
                user.id,
                NotificationKind::LostFound,
                "Report filed",
                format!(
                    "Your {} report for '{}' is now visible to everyone",
                    item.report_kind.as_str(),
                    item.item_name
                ),
                Some(item.status.as_str().to_string()),
            )
            .await;
        Ok(item)
    }

    /// Marks an open item claimed (reporter only).
    pub async fn claim(&self, id: Uuid) -> Result<LostFoundItem> {
        let user = require_user(self.identity.as_ref()).await?;

        let mut all = self.store.load_all().await?;
        let item = all
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(AppError::NotFound("lost & found item", id))?;

        if !can_transition_item(&user, item, ItemStatus::Claimed) {
            return Err(AppError::Unauthorized(
                "only the reporter may close this item".into(),
            ));
        }
        if !item.status.can_move_to(ItemStatus::Claimed) {
            return Err(AppError::IllegalTransition {
                from: item.status.as_str(),
                to: ItemStatus::Claimed.as_str(),
            });
        }

        item.status = ItemStatus::Claimed;
        item.updated_at = Utc::now();
        let updated = item.clone();
        self.store.save_all(&all).await?;

        self.notifier
            .try_append(
                updated.owner_id,
                NotificationKind::LostFound,
                "Item claimed",
                format!("'{}' has been marked claimed", updated.item_name),
                Some(updated.status.as_str().to_string()),
            )
            .await;
        Ok(updated)
    }

    /// Idempotent hard delete (reporter only).
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let user = require_user(self.identity.as_ref()).await?;

        let mut all = self.store.load_all().await?;
        match all.iter().find(|i| i.id == id) {
            Some(item) if item.owner_id != user.id && !user.is_admin() => {
                return Err(AppError::Unauthorized(
                    "only the reporter may delete this item".into(),
                ));
            }
            Some(_) => {}
            None => return Ok(()),
        }

        all.retain(|i| i.id != id);
        self.store.save_all(&all).await?;
        Ok(())
    }

    pub async fn list(
        &self,
        term: &str,
        filter: ItemFilter,
        sort: SortKey,
    ) -> Result<Vec<LostFoundItem>> {
        let user = require_user(self.identity.as_ref()).await?;
        let all = self.store.load_all().await?;
        Ok(view(&all, term, |i| filter.matches(i, user.id), sort))
    }
}
