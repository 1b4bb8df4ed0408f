//! # Volunteer Service
//!
//! Opportunities (administered events) and registrations against them.
//! Capacity is checked before anything is written; a registration holds a
//! seat until it is rejected or cancelled. Events and registrations live in
//! separate slots, so the seat counter and the registration row are written
//! in two steps with no atomicity between them.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{AppError, Result};
use domains::models::{
    NotificationKind, RegistrationStatus, VolunteerEvent, VolunteerRegistration,
};
use domains::query::{view, RegistrationFilter, SortKey};
use domains::traits::{CollectionStore, IdentityProvider};
use domains::validate::{EventDraft, RegistrationDraft};
use domains::workflow::{can_transition_registration, Workflow};
use tracing::info;
use uuid::Uuid;

use crate::notify::Notifier;
use crate::require_user;

pub struct VolunteerService {
    events: Arc<dyn CollectionStore<VolunteerEvent>>,
    registrations: Arc<dyn CollectionStore<VolunteerRegistration>>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Notifier,
}

impl VolunteerService {
    pub fn new(
        events: Arc<dyn CollectionStore<VolunteerEvent>>,
        registrations: Arc<dyn CollectionStore<VolunteerRegistration>>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Notifier,
    ) -> Self {
        Self {
            events,
            registrations,
            identity,
            notifier,
        }
    }

    /// Upcoming-first event catalogue.
    pub async fn events(&self) -> Result<Vec<VolunteerEvent>> {
        let mut events = self.events.load_all().await?;
        events.sort_by(|a, b| a.event_date.cmp(&b.event_date).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }

    /// Administrators publish new opportunities.
    pub async fn create_event(&self, draft: EventDraft) -> Result<VolunteerEvent> {
        let user = require_user(self.identity.as_ref()).await?;
        if !user.is_admin() {
            return Err(AppError::Unauthorized(
                "only an administrator may publish events".into(),
            ));
        }
        draft.validate().map_err(AppError::Validation)?;

        let now = Utc::now();
        let event = VolunteerEvent {
            id: Uuid::now_v7(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            location: draft.location,
            event_date: draft.event_date,
            max_volunteers: draft.max_volunteers,
            current_volunteers: 0,
            skills_required: draft.skills_required,
            created_at: now,
            updated_at: now,
        };

        let mut all = self.events.load_all().await?;
        all.push(event.clone());
        self.events.save_all(&all).await?;
        info!(event = %event.id, "volunteer event published");
        Ok(event)
    }

    /// Registers the acting user for an event. The capacity check and the
    /// duplicate check both run before any store write.
    pub async fn register(&self, draft: RegistrationDraft) -> Result<VolunteerRegistration> {
        let user = require_user(self.identity.as_ref()).await?;
        draft.validate().map_err(AppError::Validation)?;

        let mut events = self.events.load_all().await?;
        let event = events
            .iter_mut()
            .find(|e| e.id == draft.event_id)
            .ok_or(AppError::NotFound("volunteer event", draft.event_id))?;
        if event.spots_left() == 0 {
            return Err(AppError::Conflict(format!(
                "'{}' has no volunteer spots left",
                event.title
            )));
        }

        let mut registrations = self.registrations.load_all().await?;
        let already = registrations
            .iter()
            .any(|r| r.owner_id == user.id && r.event_id == event.id && r.status.holds_seat());
        if already {
            return Err(AppError::Conflict(format!(
                "already registered for '{}'",
                event.title
            )));
        }

        let now = Utc::now();
        let registration = VolunteerRegistration {
            id: Uuid::now_v7(),
            owner_id: user.id,
            event_id: event.id,
            availability: draft.availability,
            skills: draft.skills,
            motivation: draft.motivation,
            status: RegistrationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        registrations.push(registration.clone());
        self.registrations.save_all(&registrations).await?;

        // Seat is held from registration, not approval.
        event.current_volunteers += 1;
        event.updated_at = now;
        let event_title = event.title.clone();
        self.events.save_all(&events).await?;

        self.notifier
            .try_append(
                user.id,
                NotificationKind::Volunteer,
                "Registration received",
                format!("Your registration for '{event_title}' is pending review"),
                Some(registration.status.as_str().to_string()),
            )
            .await;
        Ok(registration)
    }

    /// Administrator decision on a pending registration. Rejection releases
    /// the held seat.
    pub async fn set_status(
        &self,
        id: Uuid,
        target: RegistrationStatus,
    ) -> Result<VolunteerRegistration> {
        let user = require_user(self.identity.as_ref()).await?;

        let mut registrations = self.registrations.load_all().await?;
        let registration = registrations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound("registration", id))?;

        if !can_transition_registration(&user, registration, target) {
            return Err(AppError::Unauthorized(
                "only an administrator may decide registrations".into(),
            ));
        }
        if !registration.status.can_move_to(target) {
            return Err(AppError::IllegalTransition {
                from: registration.status.as_str(),
                to: target.as_str(),
            });
        }

        registration.status = target;
        registration.updated_at = Utc::now();
        let updated = registration.clone();
        self.registrations.save_all(&registrations).await?;

        if target == RegistrationStatus::Rejected {
            self.release_seat(updated.event_id).await?;
        }

        let title = match target {
            RegistrationStatus::Approved => "Registration approved",
            _ => "Registration update",
        };
        self.notifier
            .try_append(
                updated.owner_id,
                NotificationKind::Volunteer,
                title,
                format!("Your volunteer registration is now {}", target.as_str()),
                Some(target.as_str().to_string()),
            )
            .await;
        Ok(updated)
    }

    /// The registrant withdraws. Idempotent; releases the seat when the
    /// registration was still holding one.
    pub async fn cancel(&self, id: Uuid) -> Result<()> {
        let user = require_user(self.identity.as_ref()).await?;

        let mut registrations = self.registrations.load_all().await?;
        let Some(registration) = registrations.iter().find(|r| r.id == id).cloned() else {
            return Ok(());
        };
        if registration.owner_id != user.id {
            return Err(AppError::Unauthorized(
                "only the registrant may cancel this registration".into(),
            ));
        }

        registrations.retain(|r| r.id != id);
        self.registrations.save_all(&registrations).await?;

        if registration.status.holds_seat() {
            self.release_seat(registration.event_id).await?;
        }
        Ok(())
    }

    pub async fn list_registrations(
        &self,
        term: &str,
        filter: RegistrationFilter,
        sort: SortKey,
    ) -> Result<Vec<VolunteerRegistration>> {
        let user = require_user(self.identity.as_ref()).await?;
        let all = self.registrations.load_all().await?;
        Ok(view(&all, term, |r| filter.matches(r, user.id), sort))
    }

    /// Registrations of the acting user, paired with their events where the
    /// event still exists.
    pub async fn my_registrations(
        &self,
    ) -> Result<Vec<(VolunteerRegistration, Option<VolunteerEvent>)>> {
        let user = require_user(self.identity.as_ref()).await?;
        let events = self.events.load_all().await?;
        let mine = self.registrations.load_scoped(user.id).await?;
        Ok(mine
            .into_iter()
            .map(|r| {
                let event = events.iter().find(|e| e.id == r.event_id).cloned();
                (r, event)
            })
            .collect())
    }

    async fn release_seat(&self, event_id: Uuid) -> Result<()> {
        let mut events = self.events.load_all().await?;
        // The event may have been deleted since; a missing row is fine.
        if let Some(event) = events.iter_mut().find(|e| e.id == event_id) {
            event.current_volunteers = event.current_volunteers.saturating_sub(1);
            event.updated_at = Utc::now();
            self.events.save_all(&events).await?;
        }
        Ok(())
    }

    /// Remaining capacity for one event.
    pub async fn spots_left(&self, event_id: Uuid) -> Result<u32> {
        let events = self.events.load_all().await?;
        let event = events
            .iter()
            .find(|e| e.id == event_id)
            .ok_or(AppError::NotFound("volunteer event", event_id))?;
        Ok(event.spots_left())
    }
}
