//! Core domain logic for NoteDesk.
//! This crate is the single source of truth for the note record lifecycle
//! and persistence contract shared by the API and dashboard front-ends.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteDraft, NoteId, NotePatch, NoteValidationError, DEFAULT_ACTOR};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{NoteService, NoteServiceError, ServiceResult};
