//! Shared API state and per-request service construction.
//!
//! # Responsibility
//! - Carry the database location across stateless handlers.
//! - Open one connection per request, run the operation, close on drop.
//!
//! # Invariants
//! - No connection or other mutable state is shared across requests; the
//!   store's own transactional behavior is the only isolation.

use crate::error::{ApiError, ApiResult};
use notedesk_core::db::open_db;
use notedesk_core::{NoteService, NoteServiceError, SqliteNoteRepository};
use std::path::{Path, PathBuf};

/// Per-process API state.
#[derive(Debug, Clone)]
pub struct ApiState {
    db_path: PathBuf,
}

impl ApiState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs one operation against a fresh connection-backed service.
    pub fn with_service<T>(
        &self,
        op: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> Result<T, NoteServiceError>,
    ) -> ApiResult<T> {
        let conn = open_db(&self.db_path)?;
        let repo = SqliteNoteRepository::try_new(&conn)?;
        let service = NoteService::new(repo);
        op(&service).map_err(ApiError::from)
    }
}
