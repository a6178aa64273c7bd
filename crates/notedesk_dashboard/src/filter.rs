//! Listing filters and summary stats for the dashboard table.
//!
//! # Responsibility
//! - Narrow the cached listing by search term and URL presence.
//! - Compute the headline counters rendered above the table.

use notedesk_core::Note;

/// Filter options applied to the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Case-insensitive substring matched against name, description and
    /// comment. Blank terms match everything.
    pub search: Option<String>,
    /// Keep only notes with a non-empty url.
    pub with_url_only: bool,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        if self.with_url_only && note.url.is_empty() {
            return false;
        }

        let Some(term) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if term.is_empty() {
            return true;
        }

        let term = term.to_lowercase();
        [&note.name, &note.description, &note.comment]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    /// Returns the filtered subset, preserving the input order.
    pub fn apply<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        notes.iter().filter(|note| self.matches(note)).collect()
    }
}

/// Aggregate counters for the current listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingStats {
    pub total: usize,
    pub with_url: usize,
    pub with_description: usize,
    /// Most recent `updated_at` across the listing, if any.
    pub last_updated: Option<i64>,
}

impl ListingStats {
    pub fn compute(notes: &[Note]) -> Self {
        Self {
            total: notes.len(),
            with_url: notes.iter().filter(|note| !note.url.is_empty()).count(),
            with_description: notes
                .iter()
                .filter(|note| !note.description.is_empty())
                .count(),
            last_updated: notes.iter().map(|note| note.updated_at).max(),
        }
    }
}
