//! Interactive dashboard front-end for NoteDesk.
//! Holds the session state machine, listing filters/stats and CSV export;
//! all persistence goes through the shared core service.

pub mod export;
pub mod filter;
pub mod session;

pub use export::{export_filename, render_csv, write_export};
pub use filter::{ListingStats, NoteFilter};
pub use session::{DeleteOutcome, FormBuffer, Mode, PendingDelete, Session};
