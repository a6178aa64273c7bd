//! Note use-case service.
//!
//! # Responsibility
//! - Provide the single create/get/list/update/delete entry points consumed
//!   by both front-ends.
//! - Convert repository `get` misses into semantic not-found errors.
//! - Emit metadata-only mutation logs.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - The service layer remains storage-agnostic.

use crate::model::note::{Note, NoteDraft, NoteId, NotePatch, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Input failed the shared name rule.
    Validation(NoteValidationError),
    /// Target note does not exist.
    NotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, NoteServiceError>;

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note and returns the full persisted record.
    pub fn create_note(&self, draft: &NoteDraft) -> ServiceResult<Note> {
        let note = self.repo.create_note(draft)?;
        info!(
            "event=note_create module=service status=ok id={}",
            note.id
        );
        Ok(note)
    }

    /// Applies a partial update and returns the record post-update.
    ///
    /// An empty patch is a no-op: the record is returned unchanged and
    /// `updated_at` is not refreshed.
    pub fn update_note(&self, id: NoteId, patch: &NotePatch) -> ServiceResult<Note> {
        let note = self.repo.update_note(id, patch)?;
        info!("event=note_update module=service status=ok id={id}");
        Ok(note)
    }

    /// Gets one note by id, or `NotFound` if absent.
    pub fn get_note(&self, id: NoteId) -> ServiceResult<Note> {
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::NotFound(id))
    }

    /// Lists all notes ordered by `updated_at` descending.
    pub fn list_notes(&self) -> ServiceResult<Vec<Note>> {
        Ok(self.repo.list_notes()?)
    }

    /// Permanently removes one note by id.
    pub fn delete_note(&self, id: NoteId) -> ServiceResult<()> {
        self.repo.delete_note(id)?;
        info!("event=note_delete module=service status=ok id={id}");
        Ok(())
    }
}
