//! CSV export of the currently filtered record set.
//!
//! # Responsibility
//! - Render all columns of the given records as CSV text.
//! - Produce timestamp-suffixed filenames and write exports on demand.
//!
//! # Invariants
//! - The header row always lists every column, in storage order.
//! - Fields containing separators, quotes or newlines are quoted.

use chrono::{DateTime, Local};
use notedesk_core::Note;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const EXPORT_HEADER: &str =
    "id,name,description,url,comment,created_at,updated_at,created_by,updated_by";

/// Renders the records as CSV text, header included.
pub fn render_csv<'a>(notes: impl IntoIterator<Item = &'a Note>) -> String {
    let mut out = String::from(EXPORT_HEADER);
    out.push('\n');
    for note in notes {
        let fields = [
            note.id.to_string(),
            escape_field(&note.name),
            escape_field(&note.description),
            escape_field(&note.url),
            escape_field(&note.comment),
            note.created_at.to_string(),
            note.updated_at.to_string(),
            escape_field(&note.created_by),
            escape_field(&note.updated_by),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Returns the generated export filename for the given moment.
pub fn export_filename(at: DateTime<Local>) -> String {
    format!("notes_export_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Writes the records to `<dir>/notes_export_<timestamp>.csv`.
///
/// Returns the full path of the written file.
pub fn write_export<'a>(
    dir: &Path,
    notes: impl IntoIterator<Item = &'a Note>,
) -> io::Result<PathBuf> {
    let path = dir.join(export_filename(Local::now()));
    fs::write(&path, render_csv(notes))?;
    Ok(path)
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
