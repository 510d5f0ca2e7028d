// handlers/notes/list.rs - GET /notes handler

use axum::http::StatusCode;
use serde_json::json;

use crate::handlers::NoteResponse;
use crate::store::{NoteStore, StoreError};

/// GET /notes - All of the caller's notes, newest first
///
/// Ties on `createdAt` keep the order the store returned. An owner with no
/// notes gets an empty `items` list.
pub async fn list(store: &dyn NoteStore, owner_id: &str) -> Result<NoteResponse, StoreError> {
    let mut notes = store.query_by_owner(owner_id).await?;
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(NoteResponse::new(StatusCode::OK, json!({ "items": notes })))
}
