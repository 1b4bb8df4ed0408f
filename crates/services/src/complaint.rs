//! # Complaint Service
//!
//! Submission, status workflow, edits, and list views for complaints. The
//! collection is shared across all users; mutation rights stay with the
//! reporter.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{AppError, FieldError, Result};
use domains::models::{Complaint, ComplaintStatus, NotificationKind};
use domains::query::{view, ComplaintFilter, SortKey};
use domains::traits::{CollectionStore, IdentityProvider};
use domains::validate::ComplaintDraft;
use domains::workflow::{can_transition_complaint, Workflow};
use tracing::info;
use uuid::Uuid;

use crate::notify::Notifier;
use crate::require_user;

/// Per-status tallies for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplaintCounts {
    pub submitted: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub rejected: usize,
}

impl ComplaintCounts {
    pub fn total(&self) -> usize {
        self.submitted + self.in_progress + self.resolved + self.rejected
    }
}

pub struct ComplaintService {
    store: Arc<dyn CollectionStore<Complaint>>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Notifier,
}

impl ComplaintService {
    pub fn new(
        store: Arc<dyn CollectionStore<Complaint>>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Notifier,
    ) -> Self {
        Self {
            store,
            identity,
            notifier,
        }
    }

    /// Validates every form step, stamps identity and timestamps, and
    /// appends the complaint to the full collection.
    pub async fn submit(&self, draft: ComplaintDraft) -> Result<Complaint> {
        let user = require_user(self.identity.as_ref()).await?;
        draft.validate().map_err(AppError::Validation)?;
        let category = draft
            .category
            .ok_or_else(|| AppError::Validation(vec![FieldError::new("category", "category is required")]))?;

        let now = Utc::now();
        let complaint = Complaint {
            id: Uuid::now_v7(),
            owner_id: user.id,
            title: draft.title,
            description: draft.description,
            category,
            location: draft.location,
            priority: draft.priority,
            status: ComplaintStatus::Submitted,
            reporter_name: draft.reporter_name,
            contact: draft.contact,
            created_at: now,
            updated_at: now,
        };

        let mut all = self.store.load_all().await?;
        all.push(complaint.clone());
        self.store.save_all(&all).await?;

        info!(complaint = %complaint.id, "complaint submitted");
        self.notifier
            .try_append(
                user.id,
                NotificationKind::Complaint,
                "Complaint submitted",
                format!(
                    "'{}' was filed under {}",
                    complaint.title,
                    complaint.category.as_str()
                ),
                Some(complaint.status.as_str().to_string()),
            )
            .await;
        Ok(complaint)
    }

    /// Moves a complaint along its workflow. Transitions outside the graph
    /// are rejected and leave the store untouched.
    pub async fn transition(&self, id: Uuid, target: ComplaintStatus) -> Result<Complaint> {
        let user = require_user(self.identity.as_ref()).await?;

        let mut all = self.store.load_all().await?;
        let complaint = all
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound("complaint", id))?;

        if !can_transition_complaint(&user, complaint, target) {
            return Err(AppError::Unauthorized(
                "only the reporter may update this complaint".into(),
            ));
        }
        if !complaint.status.can_move_to(target) {
            return Err(AppError::IllegalTransition {
                from: complaint.status.as_str(),
                to: target.as_str(),
            });
        }

        complaint.status = target;
        complaint.updated_at = Utc::now();
        let updated = complaint.clone();
        self.store.save_all(&all).await?;

        self.notifier
            .try_append(
                updated.owner_id,
                NotificationKind::Complaint,
                "Complaint updated",
                format!("'{}' is now {}", updated.title, target.as_str()),
                Some(target.as_str().to_string()),
            )
            .await;
        Ok(updated)
    }

    /// Replaces the payload fields of an existing complaint (owner only).
    /// Status and creation metadata are untouched.
    pub async fn update(&self, id: Uuid, draft: ComplaintDraft) -> Result<Complaint> {
        let user = require_user(self.identity.as_ref()).await?;
        draft.validate().map_err(AppError::Validation)?;
        let category = draft
            .category
            .ok_or_else(|| AppError::Validation(vec![FieldError::new("category", "category is required")]))?;

        let mut all = self.store.load_all().await?;
        let complaint = all
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound("complaint", id))?;
        if complaint.owner_id != user.id {
            return Err(AppError::Unauthorized(
                "only the reporter may edit this complaint".into(),
            ));
        }

        complaint.title = draft.title;
        complaint.description = draft.description;
        complaint.category = category;
        complaint.location = draft.location;
        complaint.priority = draft.priority;
        complaint.reporter_name = draft.reporter_name;
        complaint.contact = draft.contact;
        complaint.updated_at = Utc::now();

        let updated = complaint.clone();
        self.store.save_all(&all).await?;
        Ok(updated)
    }

    /// Hard delete. Deleting an id that is already gone is a no-op, which
    /// keeps double-submitted deletes harmless.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let user = require_user(self.identity.as_ref()).await?;

        let mut all = self.store.load_all().await?;
        match all.iter().find(|c| c.id == id) {
            Some(c) if c.owner_id != user.id && !user.is_admin() => {
                return Err(AppError::Unauthorized(
                    "only the reporter may delete this complaint".into(),
                ));
            }
            Some(_) => {}
            None => return Ok(()),
        }

        all.retain(|c| c.id != id);
        self.store.save_all(&all).await?;
        Ok(())
    }

    /// The filtered, searched, deterministically sorted list view.
    pub async fn list(
        &self,
        term: &str,
        filter: ComplaintFilter,
        sort: SortKey,
    ) -> Result<Vec<Complaint>> {
        let user = require_user(self.identity.as_ref()).await?;
        let all = self.store.load_all().await?;
        Ok(view(&all, term, |c| filter.matches(c, user.id), sort))
    }

    /// Status tallies over the whole collection, for dashboard counters.
    pub async fn counts(&self) -> Result<ComplaintCounts> {
        let mut counts = ComplaintCounts::default();
        for complaint in self.store.load_all().await? {
            match complaint.status {
                ComplaintStatus::Submitted => counts.submitted += 1,
                ComplaintStatus::InProgress => counts.in_progress += 1,
                ComplaintStatus::Resolved => counts.resolved += 1,
                ComplaintStatus::Rejected => counts.rejected += 1,
            }
        }
        Ok(counts)
    }
}
