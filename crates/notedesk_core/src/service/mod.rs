//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep HTTP/dashboard layers decoupled from storage details.

pub mod note_service;
