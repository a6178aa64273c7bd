//! Dashboard session state machine.
//!
//! # Responsibility
//! - Track selection/edit mode, the form buffer and the two-step delete
//!   confirmation as explicit state values.
//! - Cache the listing and invalidate it after every successful mutation.
//!
//! # Invariants
//! - `PendingDelete::Armed` survives only until the next action; any
//!   non-delete action (or a delete request for a different id) disarms it.
//! - A successful submit always returns the session to create mode with an
//!   empty form.
//! - Deleting the currently selected id resets the session to create mode.

use notedesk_core::{
    Note, NoteDraft, NoteId, NotePatch, NoteRepository, NoteService, NoteServiceError,
};

/// Edit/create mode for the form area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No selection; submit creates a new note.
    #[default]
    Create,
    /// A record is selected; submit updates it.
    Editing(NoteId),
}

/// Two-step delete confirmation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingDelete {
    #[default]
    Unarmed,
    /// First delete request seen for this id; the next one executes.
    Armed(NoteId),
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Confirmation armed; a second request for the same id will delete.
    Armed(NoteId),
    /// The record was permanently removed.
    Deleted(NoteId),
}

/// Text buffer backing the four form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBuffer {
    pub name: String,
    pub description: String,
    pub url: String,
    pub comment: String,
}

impl FormBuffer {
    /// Populates the buffer from a stored record.
    pub fn from_note(note: &Note) -> Self {
        Self {
            name: note.name.clone(),
            description: note.description.clone(),
            url: note.url.clone(),
            comment: note.comment.clone(),
        }
    }

    /// Create input carrying the full buffer.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            comment: self.comment.clone(),
        }
    }

    /// Update input carrying the full buffer: the dashboard form always
    /// submits all four fields.
    pub fn to_patch(&self) -> NotePatch {
        NotePatch {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            url: Some(self.url.clone()),
            comment: Some(self.comment.clone()),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One dashboard user session.
///
/// All state is process-local and single-user; persistence goes through the
/// shared note service passed into each operation.
#[derive(Debug, Default)]
pub struct Session {
    mode: Mode,
    pending_delete: PendingDelete,
    form: FormBuffer,
    listing: Option<Vec<Note>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending_delete(&self) -> PendingDelete {
        self.pending_delete
    }

    pub fn form(&self) -> &FormBuffer {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormBuffer {
        &mut self.form
    }

    /// Returns the cached listing, reloading it when invalidated.
    pub fn notes<R: NoteRepository>(
        &mut self,
        service: &NoteService<R>,
    ) -> Result<&[Note], NoteServiceError> {
        if self.listing.is_none() {
            self.listing = Some(service.list_notes()?);
        }
        Ok(self.listing.as_deref().unwrap_or_default())
    }

    /// Clears a pending delete confirmation. Called for every action that is
    /// not a delete request.
    pub fn disarm_delete(&mut self) {
        self.pending_delete = PendingDelete::Unarmed;
    }

    /// Selects a record for editing, populating the form from storage.
    pub fn select<R: NoteRepository>(
        &mut self,
        service: &NoteService<R>,
        id: NoteId,
    ) -> Result<(), NoteServiceError> {
        self.disarm_delete();
        let note = service.get_note(id)?;
        self.form = FormBuffer::from_note(&note);
        self.mode = Mode::Editing(id);
        Ok(())
    }

    /// Submits the form buffer: create in create mode, update in edit mode.
    ///
    /// On success the session returns to create mode with an empty form and
    /// the cached listing is invalidated. On failure (for example an empty
    /// name) the mode and buffer are kept so the user can correct the input.
    pub fn submit<R: NoteRepository>(
        &mut self,
        service: &NoteService<R>,
    ) -> Result<Note, NoteServiceError> {
        self.disarm_delete();
        let note = match self.mode {
            Mode::Create => service.create_note(&self.form.to_draft())?,
            Mode::Editing(id) => service.update_note(id, &self.form.to_patch())?,
        };
        self.reset_form();
        self.invalidate_listing();
        Ok(note)
    }

    /// Two-step delete: the first request arms the confirmation, a second
    /// request for the same id executes it.
    pub fn request_delete<R: NoteRepository>(
        &mut self,
        service: &NoteService<R>,
        id: NoteId,
    ) -> Result<DeleteOutcome, NoteServiceError> {
        match self.pending_delete {
            PendingDelete::Armed(armed) if armed == id => {
                service.delete_note(id)?;
                self.pending_delete = PendingDelete::Unarmed;
                if self.mode == Mode::Editing(id) {
                    self.reset_form();
                }
                self.invalidate_listing();
                Ok(DeleteOutcome::Deleted(id))
            }
            _ => {
                self.pending_delete = PendingDelete::Armed(id);
                Ok(DeleteOutcome::Armed(id))
            }
        }
    }

    /// Abandons the current selection and form content.
    pub fn reset(&mut self) {
        self.disarm_delete();
        self.reset_form();
    }

    /// Drops the cached listing; the next read recomputes it.
    pub fn invalidate_listing(&mut self) {
        self.listing = None;
    }

    fn reset_form(&mut self) {
        self.mode = Mode::Create;
        self.form.clear();
    }
}
