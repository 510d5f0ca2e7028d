// handlers/notes/update.rs - PUT /notes/{id} handler

use axum::http::StatusCode;
use serde_json::json;

use super::utils::parse_content;
use crate::error::ApiError;
use crate::handlers::{Clock, NoteResponse};
use crate::models::NoteKey;
use crate::store::{NoteStore, StoreError};

/// PUT /notes/{id} - Replace the content of an existing note
///
/// The key always carries the caller's owner id, so a note owned by someone
/// else looks exactly like a missing one: 404.
pub async fn update(
    store: &dyn NoteStore,
    clock: &dyn Clock,
    owner_id: &str,
    note_id: &str,
    body: Option<&[u8]>,
) -> Result<NoteResponse, StoreError> {
    let content = match parse_content(body) {
        Ok(content) => content,
        Err(err) => return Ok(err.into()),
    };

    let key = NoteKey::new(owner_id, note_id);
    match store.conditional_update(&key, &content, clock.now()).await {
        Ok(note) => Ok(NoteResponse::new(StatusCode::OK, json!({ "item": note }))),
        Err(StoreError::ConditionalCheckFailed(_)) => Ok(ApiError::not_found().into()),
        Err(err) => Err(err),
    }
}
