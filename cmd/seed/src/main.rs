//! # Seed Binary
//!
//! Populates a data directory with demo records through the service layer,
//! so a fresh checkout has something to browse. Running against an already
//! seeded directory is a no-op.

use std::sync::Arc;

use anyhow::Result;
use auth_adapters::{ProfileBuilder, StaticIdentity};
use chrono::{Duration, Utc};
use configs::Settings;
use domains::models::{ComplaintCategory, ComplaintStatus, Priority, ReportKind, Role};
use domains::validate::{ComplaintDraft, EventDraft, LostFoundDraft, NoteDraft, RegistrationDraft};
use services::{ComplaintService, LostFoundService, NotesService, Notifier, VolunteerService};
use storage_adapters::JsonFileStore;
use tracing::info;

fn parse_role(raw: &str) -> Role {
    if raw.eq_ignore_ascii_case("admin") {
        Role::Admin
    } else {
        Role::Student
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load()?;
    let store = Arc::new(JsonFileStore::new(&settings.data_dir));

    let mut student_builder = ProfileBuilder::new(
        settings.profile.email.clone(),
        settings.profile.full_name.clone(),
    )
    .role(parse_role(&settings.profile.role));
    if let Some(roll_no) = &settings.profile.roll_no {
        student_builder = student_builder.roll_no(roll_no.clone());
    }
    if let Some(course) = &settings.profile.course {
        student_builder = student_builder.course(course.clone());
    }
    let student = student_builder.build();

    let admin = ProfileBuilder::new("warden@campus.test", "Hostel Warden")
        .role(Role::Admin)
        .build();

    let student_identity: Arc<StaticIdentity> = Arc::new(StaticIdentity::signed_in(student.clone()));
    let admin_identity: Arc<StaticIdentity> = Arc::new(StaticIdentity::signed_in(admin));

    let notifier = Notifier::with_retention(store.clone(), settings.notifications.retention);

    let complaints = ComplaintService::new(
        store.clone(),
        student_identity.clone(),
        notifier.clone(),
    );
    if complaints.counts().await?.total() > 0 {
        info!(data_dir = %settings.data_dir, "data directory already seeded, nothing to do");
        return Ok(());
    }

    let notes = NotesService::new(store.clone(), student_identity.clone());
    let lost_found = LostFoundService::new(store.clone(), student_identity.clone(), notifier.clone());
    let volunteering = VolunteerService::new(
        store.clone(),
        store.clone(),
        student_identity.clone(),
        notifier.clone(),
    );
    let volunteering_admin = VolunteerService::new(
        store.clone(),
        store.clone(),
        admin_identity.clone(),
        notifier.clone(),
    );

    // Complaints: one fresh, one already being worked on.
    let fan = complaints
        .submit(ComplaintDraft {
            title: "Ceiling fan not working".into(),
            description: "The fan in room 214 hums but never spins up".into(),
            category: Some(ComplaintCategory::Hostel),
            location: "Hostel Block B, room 214".into(),
            priority: Priority::High,
            ..ComplaintDraft::prefill(&student)
        })
        .await?;
    complaints.transition(fan.id, ComplaintStatus::InProgress).await?;

    complaints
        .submit(ComplaintDraft {
            title: "Mess menu repeats daily".into(),
            description: "The same dal and rice have been served for two weeks".into(),
            category: Some(ComplaintCategory::Mess),
            location: "North mess hall".into(),
            ..ComplaintDraft::prefill(&student)
        })
        .await?;

    // Notes.
    let dsa = notes
        .create(NoteDraft {
            title: "Graph traversal cheatsheet".into(),
            content: "BFS for shortest unweighted paths, DFS for components and ordering".into(),
            tags: vec!["dsa".into(), "exams".into()],
            ..NoteDraft::prefill(&student)
        })
        .await?;
    notes.toggle_favorite(dsa.id).await?;

    // Volunteering: the admin publishes, the student registers.
    let camp = volunteering_admin
        .create_event(EventDraft {
            title: "Blood donation camp".into(),
            description: "Annual camp run with the city hospital".into(),
            category: "health".into(),
            location: "Sports complex".into(),
            event_date: Utc::now() + Duration::days(14),
            max_volunteers: 20,
            skills_required: vec!["first aid".into()],
        })
        .await?;

    volunteering
        .register(RegistrationDraft {
            availability: "weekends".into(),
            skills: vec!["first aid".into(), "crowd management".into()],
            motivation: Some("Helped run the camp last year as well".into()),
            ..RegistrationDraft::for_event(camp.id)
        })
        .await?;

    // Lost & found.
    lost_found
        .report(LostFoundDraft {
            item_name: "Black umbrella".into(),
            description: "Left behind in lecture hall 3 after the morning class".into(),
            category: "accessories".into(),
            location: "Lecture hall 3".into(),
            ..LostFoundDraft::prefill(&student, ReportKind::Lost)
        })
        .await?;

    let unread = notifier.unread_count(student.id).await?;
    info!(
        data_dir = %settings.data_dir,
        unread_notifications = unread,
        "demo data seeded"
    );
    Ok(())
}
