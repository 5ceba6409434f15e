//! Note/tag use-case service.
//!
//! # Responsibility
//! - Own the in-memory note and tag collections for one session.
//! - Apply create/update/delete use-cases and persist each changed collection.
//! - Serve joined, display-ready notes recomputed from current state.
//!
//! # Invariants
//! - Note ids and tag ids stay unique within their collections.
//! - Updates replace in place; collection order is otherwise preserved.
//! - An unknown id is never an error: the call is ignored and reported as
//!   `MutationOutcome::Ignored`.
//! - Tag deletion never modifies raw notes.
//! - In-memory state changes only after the store write succeeds.

use crate::model::note::{Note, NoteData, RawNote};
use crate::model::tag::Tag;
use crate::relation::filter::{filter_notes, NoteFilter};
use crate::relation::join::{list_notes_with_tags, resolve_note};
use crate::repo::collection_repo::CollectionRepository;
use crate::store::StoreError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for note/tag use-cases.
///
/// Only persistence failures surface here; missing ids are not errors.
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "failed to persist collection: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result of an id-targeted mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The collection changed and was persisted.
    Applied,
    /// No record matched (or a create would duplicate an id); nothing changed.
    Ignored,
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "ok",
            Self::Ignored => "ignored",
        }
    }
}

/// Note/tag service facade over a collection repository.
pub struct NoteService<R: CollectionRepository> {
    repo: R,
    notes: Vec<RawNote>,
    tags: Vec<Tag>,
}

impl<R: CollectionRepository> NoteService<R> {
    /// Loads both collections (empty when absent or unreadable).
    pub fn open(repo: R) -> Self {
        let notes = repo.load_notes();
        let tags = repo.load_tags();
        info!(
            "event=service_open module=service status=ok notes={} tags={}",
            notes.len(),
            tags.len()
        );
        Self { repo, notes, tags }
    }

    /// Raw note snapshot in persisted order.
    pub fn raw_notes(&self) -> &[RawNote] {
        &self.notes
    }

    /// Tag snapshot in persisted order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Joined view of every note.
    pub fn notes_with_tags(&self) -> Vec<Note> {
        list_notes_with_tags(&self.notes, &self.tags)
    }

    /// Joined view of one note, if it exists.
    pub fn note(&self, id: &str) -> Option<Note> {
        self.notes
            .iter()
            .find(|note| note.id == id)
            .map(|raw| resolve_note(raw, &self.tags))
    }

    /// Joined notes narrowed by `filter`.
    pub fn find_notes(&self, filter: &NoteFilter) -> Vec<Note> {
        let notes = self.notes_with_tags();
        filter_notes(&notes, filter).into_iter().cloned().collect()
    }

    /// Creates one note with a fresh id and appends it.
    ///
    /// Titles may repeat; referenced tags are not required to exist.
    pub fn create_note(&mut self, data: &NoteData) -> ServiceResult<RawNote> {
        let created = RawNote::from_data(data);
        let mut next = self.notes.clone();
        next.push(created.clone());
        self.commit_notes(next)?;
        info!(
            "event=note_create module=service status=ok note_id={} tag_refs={}",
            created.id,
            created.tag_ids.len()
        );
        Ok(created)
    }

    /// Replaces title, markdown and tag references of the note `id`.
    pub fn update_note(&mut self, id: &str, data: &NoteData) -> ServiceResult<MutationOutcome> {
        let Some(position) = self.notes.iter().position(|note| note.id == id) else {
            return Ok(ignored("note_update", "note_id", id));
        };

        let mut next = self.notes.clone();
        next[position] = next[position].replaced_with(data);
        self.commit_notes(next)?;
        Ok(applied("note_update", "note_id", id))
    }

    /// Removes the note `id`.
    pub fn delete_note(&mut self, id: &str) -> ServiceResult<MutationOutcome> {
        if !self.notes.iter().any(|note| note.id == id) {
            return Ok(ignored("note_delete", "note_id", id));
        }

        let next = self
            .notes
            .iter()
            .filter(|note| note.id != id)
            .cloned()
            .collect();
        self.commit_notes(next)?;
        Ok(applied("note_delete", "note_id", id))
    }

    /// Appends a caller-built tag.
    ///
    /// A tag whose id is already present is ignored.
    pub fn create_tag(&mut self, tag: Tag) -> ServiceResult<MutationOutcome> {
        if self.tags.iter().any(|existing| existing.id == tag.id) {
            return Ok(ignored("tag_create", "tag_id", &tag.id));
        }

        let id = tag.id.clone();
        let mut next = self.tags.clone();
        next.push(tag);
        self.commit_tags(next)?;
        Ok(applied("tag_create", "tag_id", &id))
    }

    /// Replaces the label of tag `id`.
    ///
    /// Every note referencing the tag sees the new label on its next read.
    pub fn update_tag(&mut self, id: &str, label: &str) -> ServiceResult<MutationOutcome> {
        let Some(position) = self.tags.iter().position(|tag| tag.id == id) else {
            return Ok(ignored("tag_update", "tag_id", id));
        };

        let mut next = self.tags.clone();
        next[position].label = label.to_string();
        self.commit_tags(next)?;
        Ok(applied("tag_update", "tag_id", id))
    }

    /// Removes tag `id`. Notes keep their reference; the join drops it.
    pub fn delete_tag(&mut self, id: &str) -> ServiceResult<MutationOutcome> {
        if !self.tags.iter().any(|tag| tag.id == id) {
            return Ok(ignored("tag_delete", "tag_id", id));
        }

        let next = self
            .tags
            .iter()
            .filter(|tag| tag.id != id)
            .cloned()
            .collect();
        self.commit_tags(next)?;
        Ok(applied("tag_delete", "tag_id", id))
    }

    /// Releases the repository.
    pub fn into_repository(self) -> R {
        self.repo
    }

    fn commit_notes(&mut self, next: Vec<RawNote>) -> ServiceResult<()> {
        self.repo.save_notes(&next)?;
        self.notes = next;
        Ok(())
    }

    fn commit_tags(&mut self, next: Vec<Tag>) -> ServiceResult<()> {
        self.repo.save_tags(&next)?;
        self.tags = next;
        Ok(())
    }
}

fn applied(event: &str, id_field: &str, id: &str) -> MutationOutcome {
    let outcome = MutationOutcome::Applied;
    info!(
        "event={} module=service status={} {}={}",
        event,
        outcome.as_str(),
        id_field,
        id
    );
    outcome
}

fn ignored(event: &str, id_field: &str, id: &str) -> MutationOutcome {
    let outcome = MutationOutcome::Ignored;
    warn!(
        "event={} module=service status={} {}={}",
        event,
        outcome.as_str(),
        id_field,
        id
    );
    outcome
}
