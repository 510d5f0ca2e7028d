// handlers/notes/create.rs - POST /notes handler

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::utils::parse_content;
use crate::handlers::{Clock, NoteResponse};
use crate::models::Note;
use crate::store::{NoteStore, StoreError};

/// POST /notes - Create a note for the caller
///
/// Expected Input:
/// ```json
/// { "content": "string" }
/// ```
///
/// The id is freshly generated, so the write needs no existence check.
pub async fn create(
    store: &dyn NoteStore,
    clock: &dyn Clock,
    owner_id: &str,
    body: Option<&[u8]>,
) -> Result<NoteResponse, StoreError> {
    let content = match parse_content(body) {
        Ok(content) => content,
        Err(err) => return Ok(err.into()),
    };

    let note = Note::new(owner_id, Uuid::new_v4().to_string(), content, clock.now());
    store.put_item(&note).await?;

    tracing::debug!("Created note {} for owner {}", note.note_id, owner_id);
    Ok(NoteResponse::new(StatusCode::CREATED, json!({ "item": note })))
}
