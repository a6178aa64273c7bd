//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record returned by every read path.
//! - Define `NoteDraft` (create input) and `NotePatch` (partial update).
//! - Enforce the one authoritative validation rule: `name` must contain
//!   non-whitespace text.
//!
//! # Invariants
//! - `id` is assigned by storage and immutable for the record's lifetime.
//! - `created_at` is set once; `updated_at >= created_at` always.
//! - `NotePatch` fields left as `None` preserve the stored value.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable storage-assigned identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = i64;

/// Static actor label recorded in `created_by` / `updated_by`.
///
/// There is no identity tracking in this system; the label is fixed.
pub const DEFAULT_ACTOR: &str = "user";

/// Validation error for note input shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// `name` is required and must contain non-whitespace text.
    EmptyName,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "note name must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned autoincrement id.
    pub id: NoteId,
    /// Required display name. Never empty for a persisted record.
    pub name: String,
    /// Free-form description. Defaults to empty.
    pub description: String,
    /// Optional link. No format validation is applied.
    pub url: String,
    /// Free-form comment. Defaults to empty.
    pub comment: String,
    /// Unix epoch milliseconds, set once at insert.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every successful mutation.
    pub updated_at: i64,
    /// Fixed actor label, see [`DEFAULT_ACTOR`].
    pub created_by: String,
    /// Fixed actor label, see [`DEFAULT_ACTOR`].
    pub updated_by: String,
}

/// Input shape for creating a note.
///
/// Optional text fields default to empty strings, matching the stored
/// column defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub comment: String,
}

impl NoteDraft {
    /// Creates a draft with the given name and empty optional fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Applies the shared name rule.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.name.trim().is_empty() {
            return Err(NoteValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Partial mutation for an existing note.
///
/// `None` means "preserve the stored value"; `Some` overwrites it. A patch
/// with every field `None` is a no-op and must not refresh `updated_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub comment: Option<String>,
}

impl NotePatch {
    /// Returns whether the patch supplies no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.url.is_none()
            && self.comment.is_none()
    }

    /// Applies the shared name rule to a supplied name.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if let Some(name) = self.name.as_deref() {
            if name.trim().is_empty() {
                return Err(NoteValidationError::EmptyName);
            }
        }
        Ok(())
    }

    /// Overwrites supplied fields on `note`, leaving the rest untouched.
    ///
    /// Timestamps and actor labels are storage concerns and are not part of
    /// the patch surface.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(name) = &self.name {
            note.name = name.clone();
        }
        if let Some(description) = &self.description {
            note.description = description.clone();
        }
        if let Some(url) = &self.url {
            note.url = url.clone();
        }
        if let Some(comment) = &self.comment {
            note.comment = comment.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteDraft, NotePatch, NoteValidationError};

    fn sample_note() -> Note {
        Note {
            id: 1,
            name: "Buy milk".to_string(),
            description: String::new(),
            url: String::new(),
            comment: String::new(),
            created_at: 1_000,
            updated_at: 1_000,
            created_by: "user".to_string(),
            updated_by: "user".to_string(),
        }
    }

    #[test]
    fn draft_rejects_whitespace_only_name() {
        assert_eq!(
            NoteDraft::new("   ").validate(),
            Err(NoteValidationError::EmptyName)
        );
        assert!(NoteDraft::new("ok").validate().is_ok());
    }

    #[test]
    fn patch_validates_only_supplied_name() {
        let absent = NotePatch::default();
        assert!(absent.validate().is_ok());

        let empty = NotePatch {
            name: Some("  ".to_string()),
            ..NotePatch::default()
        };
        assert_eq!(empty.validate(), Err(NoteValidationError::EmptyName));
    }

    #[test]
    fn patch_apply_preserves_unsupplied_fields() {
        let mut note = sample_note();
        let patch = NotePatch {
            comment: Some("urgent".to_string()),
            ..NotePatch::default()
        };

        patch.apply_to(&mut note);
        assert_eq!(note.name, "Buy milk");
        assert_eq!(note.comment, "urgent");
        assert_eq!(note.description, "");
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(NotePatch::default().is_empty());
        assert!(!NotePatch {
            url: Some(String::new()),
            ..NotePatch::default()
        }
        .is_empty());
    }
}
