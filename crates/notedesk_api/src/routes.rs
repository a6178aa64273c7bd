//! Note CRUD handlers.
//!
//! ```text
//! GET    /api/notes
//! POST   /api/notes
//! GET    /api/notes/{id}
//! PUT    /api/notes/{id}
//! DELETE /api/notes/{id}
//! ```
//!
//! Handlers map 1:1 onto the shared note service; request/response bodies
//! are the core model shapes.

use crate::error::ApiResult;
use crate::state::ApiState;
use actix_web::{delete, get, post, put, web, HttpResponse};
use notedesk_core::{Note, NoteDraft, NoteId, NotePatch};
use serde::Serialize;

/// Confirmation body returned by the delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

#[get("/api/notes")]
pub async fn list_notes(state: web::Data<ApiState>) -> ApiResult<web::Json<Vec<Note>>> {
    let notes = state.with_service(|service| service.list_notes())?;
    Ok(web::Json(notes))
}

#[get("/api/notes/{id}")]
pub async fn get_note(
    state: web::Data<ApiState>,
    path: web::Path<NoteId>,
) -> ApiResult<web::Json<Note>> {
    let id = path.into_inner();
    let note = state.with_service(|service| service.get_note(id))?;
    Ok(web::Json(note))
}

#[post("/api/notes")]
pub async fn create_note(
    state: web::Data<ApiState>,
    payload: web::Json<NoteDraft>,
) -> ApiResult<HttpResponse> {
    let note = state.with_service(|service| service.create_note(&payload))?;
    Ok(HttpResponse::Created().json(note))
}

#[put("/api/notes/{id}")]
pub async fn update_note(
    state: web::Data<ApiState>,
    path: web::Path<NoteId>,
    payload: web::Json<NotePatch>,
) -> ApiResult<web::Json<Note>> {
    let id = path.into_inner();
    let note = state.with_service(|service| service.update_note(id, &payload))?;
    Ok(web::Json(note))
}

#[delete("/api/notes/{id}")]
pub async fn delete_note(
    state: web::Data<ApiState>,
    path: web::Path<NoteId>,
) -> ApiResult<web::Json<DeleteConfirmation>> {
    let id = path.into_inner();
    state.with_service(|service| service.delete_note(id))?;
    Ok(web::Json(DeleteConfirmation {
        message: format!("note {id} deleted"),
    }))
}

/// Mounts all note handlers onto an app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_notes)
        .service(get_note)
        .service(create_note)
        .service(update_note)
        .service(delete_note);
}
