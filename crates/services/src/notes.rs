//! # Notes Service
//!
//! Personal study notes: an intentionally per-user collection. Every write
//! goes through the scoped-save merge so one user's edits never clobber
//! another's records in the shared slot.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{AppError, Result};
use domains::models::Note;
use domains::query::{view, NoteFilter, SortKey};
use domains::traits::{CollectionStore, IdentityProvider};
use domains::validate::NoteDraft;
use uuid::Uuid;

use crate::require_user;

pub struct NotesService {
    store: Arc<dyn CollectionStore<Note>>,
    identity: Arc<dyn IdentityProvider>,
}

impl NotesService {
    pub fn new(store: Arc<dyn CollectionStore<Note>>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { store, identity }
    }

    pub async fn create(&self, draft: NoteDraft) -> Result<Note> {
        let user = require_user(self.identity.as_ref()).await?;
        draft.validate().map_err(AppError::Validation)?;

        let now = Utc::now();
        let note = Note {
            id: Uuid::now_v7(),
            owner_id: user.id,
            title: draft.title,
            content: draft.content,
            course: draft.course,
            tags: draft.tags,
            is_favorite: false,
            is_public: false,
            created_at: now,
            updated_at: now,
        };

        let mut mine = self.store.load_scoped(user.id).await?;
        mine.push(note.clone());
        self.store.save_scoped(user.id, mine).await?;
        Ok(note)
    }

    pub async fn update(&self, id: Uuid, draft: NoteDraft) -> Result<Note> {
        let user = require_user(self.identity.as_ref()).await?;
        draft.validate().map_err(AppError::Validation)?;

        let mut mine = self.store.load_scoped(user.id).await?;
        let note = mine
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(AppError::NotFound("note", id))?;

        note.title = draft.title;
        note.content = draft.content;
        note.course = draft.course;
        note.tags = draft.tags;
        note.updated_at = Utc::now();

        let updated = note.clone();
        self.store.save_scoped(user.id, mine).await?;
        Ok(updated)
    }

    pub async fn toggle_favorite(&self, id: Uuid) -> Result<Note> {
        self.toggle(id, |note| note.is_favorite = !note.is_favorite)
            .await
    }

    pub async fn toggle_public(&self, id: Uuid) -> Result<Note> {
        self.toggle(id, |note| note.is_public = !note.is_public).await
    }

    async fn toggle(&self, id: Uuid, flip: impl FnOnce(&mut Note)) -> Result<Note> {
        let user = require_user(self.identity.as_ref()).await?;
        let mut mine = self.store.load_scoped(user.id).await?;
        let note = mine
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(AppError::NotFound("note", id))?;
        flip(note);
        note.updated_at = Utc::now();
        let updated = note.clone();
        self.store.save_scoped(user.id, mine).await?;
        Ok(updated)
    }

    /// Idempotent hard delete within the user's scope.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let user = require_user(self.identity.as_ref()).await?;
        let mut mine = self.store.load_scoped(user.id).await?;
        let before = mine.len();
        mine.retain(|n| n.id != id);
        if mine.len() == before {
            return Ok(());
        }
        self.store.save_scoped(user.id, mine).await?;
        Ok(())
    }

    pub async fn list(&self, term: &str, filter: NoteFilter, sort: SortKey) -> Result<Vec<Note>> {
        let user = require_user(self.identity.as_ref()).await?;
        let mine = self.store.load_scoped(user.id).await?;
        Ok(view(&mine, term, |n| filter.matches(n), sort))
    }
}
