//! Notes: validation gating and merge safety of the per-user scoped save.

use std::sync::Arc;

use auth_adapters::{ProfileBuilder, StaticIdentity};
use domains::error::AppError;
use domains::models::{Note, Role, UserProfile};
use domains::query::{NoteFilter, SortKey};
use domains::traits::CollectionStore;
use domains::validate::NoteDraft;
use services::NotesService;
use storage_adapters::MemoryStore;

fn student(email: &str, name: &str) -> UserProfile {
    ProfileBuilder::new(email, name).role(Role::Student).build()
}

fn wire(user: &UserProfile, store: Arc<MemoryStore>) -> NotesService {
    NotesService::new(store, Arc::new(StaticIdentity::signed_in(user.clone())))
}

fn draft(title: &str) -> NoteDraft {
    NoteDraft {
        title: title.into(),
        content: "a body comfortably past the ten character floor".into(),
        course: None,
        tags: vec!["exams".into()],
    }
}

#[tokio::test]
async fn short_content_fails_validation_and_writes_nothing() {
    let user = student("asha@campus.test", "Asha Verma");
    let store = Arc::new(MemoryStore::new());
    let service = wire(&user, store.clone());

    let err = service
        .create(NoteDraft {
            title: "Too short".into(),
            content: "nope!".into(),
            course: None,
            tags: vec![],
        })
        .await
        .unwrap_err();

    let fields = err.field_errors();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field, "content");
    assert!(fields[0].reason.contains("at least 10"));

    // The slot was never written.
    assert!(store.raw_slot("notes").is_none());
}

#[tokio::test]
async fn scoped_saves_never_touch_other_owners() {
    let alice = student("alice@campus.test", "Alice");
    let bob = student("bob@campus.test", "Bob");
    let store = Arc::new(MemoryStore::new());

    let alice_notes = wire(&alice, store.clone());
    let bob_notes = wire(&bob, store.clone());

    bob_notes.create(draft("Bob one")).await.unwrap();
    let bob_two = bob_notes.create(draft("Bob two")).await.unwrap();
    let alice_one = alice_notes.create(draft("Alice one")).await.unwrap();

    // Alice mutating and deleting within her scope...
    alice_notes.toggle_favorite(alice_one.id).await.unwrap();
    alice_notes.delete(alice_one.id).await.unwrap();

    // ...leaves Bob's records byte-for-byte intact.
    let all: Vec<Note> = store.load_all().await.unwrap();
    let bobs: Vec<&Note> = all.iter().filter(|n| n.owner_id == bob.id).collect();
    assert_eq!(bobs.len(), 2);
    assert!(bobs.iter().any(|n| n.id == bob_two.id));
    assert!(all.iter().all(|n| n.owner_id != alice.id));
}

#[tokio::test]
async fn one_user_cannot_see_or_edit_anothers_notes() {
    let alice = student("alice@campus.test", "Alice");
    let bob = student("bob@campus.test", "Bob");
    let store = Arc::new(MemoryStore::new());

    let secret = wire(&alice, store.clone()).create(draft("Private")).await.unwrap();

    let bob_notes = wire(&bob, store);
    let visible = bob_notes
        .list("", NoteFilter::All, SortKey::Newest)
        .await
        .unwrap();
    assert!(visible.is_empty());

    let err = bob_notes.update(secret.id, draft("Hijack")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_, _)));
}

#[tokio::test]
async fn favorites_filter_and_toggles() {
    let user = student("asha@campus.test", "Asha Verma");
    let store = Arc::new(MemoryStore::new());
    let service = wire(&user, store);

    let plain = service.create(draft("Plain")).await.unwrap();
    let starred = service.create(draft("Starred")).await.unwrap();
    service.toggle_favorite(starred.id).await.unwrap();

    let favorites = service
        .list("", NoteFilter::Favorites, SortKey::Newest)
        .await
        .unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, starred.id);

    // Toggling twice lands back where it started.
    service.toggle_favorite(starred.id).await.unwrap();
    let favorites = service
        .list("", NoteFilter::Favorites, SortKey::Newest)
        .await
        .unwrap();
    assert!(favorites.is_empty());

    let all = service.list("", NoteFilter::All, SortKey::Oldest).await.unwrap();
    assert_eq!(all[0].id, plain.id);
}
