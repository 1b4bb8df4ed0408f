//! Volunteering: capacity gating, the admin-only decision workflow, and
//! seat accounting.

use std::sync::Arc;

use auth_adapters::{ProfileBuilder, StaticIdentity};
use chrono::{Duration, Utc};
use domains::error::AppError;
use domains::models::{RegistrationStatus, Role, UserProfile};
use domains::validate::{EventDraft, RegistrationDraft};
use services::{Notifier, VolunteerService};
use storage_adapters::MemoryStore;
use uuid::Uuid;

fn student(email: &str, name: &str) -> UserProfile {
    ProfileBuilder::new(email, name).role(Role::Student).build()
}

fn admin() -> UserProfile {
    ProfileBuilder::new("warden@campus.test", "Hostel Warden")
        .role(Role::Admin)
        .build()
}

fn wire(user: &UserProfile, store: Arc<MemoryStore>) -> VolunteerService {
    let identity = Arc::new(StaticIdentity::signed_in(user.clone()));
    VolunteerService::new(store.clone(), store.clone(), identity, Notifier::new(store))
}

fn event_draft(max_volunteers: u32) -> EventDraft {
    EventDraft {
        title: "Campus cleanup drive".into(),
        description: "Sunday morning sweep of the lake perimeter".into(),
        category: "environment".into(),
        location: "Lake side".into(),
        event_date: Utc::now() + Duration::days(7),
        max_volunteers,
        skills_required: vec![],
    }
}

fn registration(event_id: Uuid) -> RegistrationDraft {
    RegistrationDraft {
        availability: "Sunday mornings".into(),
        skills: vec!["gardening".into()],
        motivation: None,
        ..RegistrationDraft::for_event(event_id)
    }
}

#[tokio::test]
async fn full_event_rejects_registration_before_any_write() {
    use domains::models::VolunteerEvent;
    use domains::traits::CollectionStore;

    let store = Arc::new(MemoryStore::new());

    // An event already at capacity: 20 of 20 seats taken.
    let now = Utc::now();
    let event = VolunteerEvent {
        id: Uuid::now_v7(),
        title: "Marathon water station".into(),
        description: "Hand out water along the city marathon route".into(),
        category: "sports".into(),
        location: "Main gate".into(),
        event_date: now + Duration::days(3),
        max_volunteers: 20,
        current_volunteers: 20,
        skills_required: vec![],
        created_at: now,
        updated_at: now,
    };
    store.save_all(std::slice::from_ref(&event)).await.unwrap();

    let user = student("a@campus.test", "A");
    let err = wire(&user, store.clone())
        .register(registration(event.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The rejection happened before any store write: no registration slot
    // was ever created and the event payload is untouched.
    assert!(store.raw_slot("volunteer_registrations").is_none());
    let service = wire(&user, store);
    assert_eq!(service.spots_left(event.id).await.unwrap(), 0);
}

#[tokio::test]
async fn double_registration_is_a_conflict() {
    let store = Arc::new(MemoryStore::new());
    let event = wire(&admin(), store.clone())
        .create_event(event_draft(20))
        .await
        .unwrap();

    let user = student("a@campus.test", "A");
    let service = wire(&user, store);
    service.register(registration(event.id)).await.unwrap();
    let err = service.register(registration(event.id)).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn only_an_admin_decides_registrations() {
    let store = Arc::new(MemoryStore::new());
    let event = wire(&admin(), store.clone())
        .create_event(event_draft(20))
        .await
        .unwrap();

    let user = student("a@campus.test", "A");
    let reg = wire(&user, store.clone())
        .register(registration(event.id))
        .await
        .unwrap();

    // The registrant cannot approve their own registration.
    let err = wire(&user, store.clone())
        .set_status(reg.id, RegistrationStatus::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let approved = wire(&admin(), store.clone())
        .set_status(reg.id, RegistrationStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, RegistrationStatus::Approved);

    // Approved is terminal.
    let err = wire(&admin(), store)
        .set_status(reg.id, RegistrationStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::IllegalTransition { .. }));
}

#[tokio::test]
async fn rejection_releases_the_seat() {
    let store = Arc::new(MemoryStore::new());
    let event = wire(&admin(), store.clone())
        .create_event(event_draft(1))
        .await
        .unwrap();

    let user = student("a@campus.test", "A");
    let reg = wire(&user, store.clone())
        .register(registration(event.id))
        .await
        .unwrap();

    let service = wire(&admin(), store.clone());
    assert_eq!(service.spots_left(event.id).await.unwrap(), 0);

    service
        .set_status(reg.id, RegistrationStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(service.spots_left(event.id).await.unwrap(), 1);

    // The freed seat is usable again.
    let next = student("b@campus.test", "B");
    wire(&next, store)
        .register(registration(event.id))
        .await
        .unwrap();
}

#[tokio::test]
async fn cancel_is_idempotent_and_frees_the_seat() {
    let store = Arc::new(MemoryStore::new());
    let event = wire(&admin(), store.clone())
        .create_event(event_draft(5))
        .await
        .unwrap();

    let user = student("a@campus.test", "A");
    let service = wire(&user, store);
    let reg = service.register(registration(event.id)).await.unwrap();
    assert_eq!(service.spots_left(event.id).await.unwrap(), 4);

    service.cancel(reg.id).await.unwrap();
    assert_eq!(service.spots_left(event.id).await.unwrap(), 5);

    // A second cancel finds nothing and changes nothing.
    service.cancel(reg.id).await.unwrap();
    assert_eq!(service.spots_left(event.id).await.unwrap(), 5);
}

#[tokio::test]
async fn students_cannot_publish_events() {
    let store = Arc::new(MemoryStore::new());
    let user = student("a@campus.test", "A");
    let err = wire(&user, store)
        .create_event(event_draft(10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}
