// handlers/notes/delete.rs - DELETE /notes/{id} handler

use crate::handlers::NoteResponse;
use crate::models::NoteKey;
use crate::store::{NoteStore, StoreError};

/// DELETE /notes/{id} - Remove a note; 204 whether or not it existed
pub async fn delete(
    store: &dyn NoteStore,
    owner_id: &str,
    note_id: &str,
) -> Result<NoteResponse, StoreError> {
    store.delete_item(&NoteKey::new(owner_id, note_id)).await?;
    Ok(NoteResponse::no_content())
}
