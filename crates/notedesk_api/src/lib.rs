//! REST front-end for NoteDesk.
//! Translates HTTP verbs into shared note-service calls 1:1.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::ApiState;
