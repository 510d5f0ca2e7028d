use std::collections::BTreeMap;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use tokio::sync::RwLock;

use super::{NoteStore, StoreError};
use crate::models::{Note, NoteKey};

/// In-process store for local runs and tests.
///
/// Queries return an owner's notes in key order.
#[derive(Default)]
pub struct MemoryNoteStore {
    notes: RwLock<BTreeMap<NoteKey, Note>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }

    pub async fn get(&self, key: &NoteKey) -> Option<Note> {
        self.notes.read().await.get(key).cloned()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn query_by_owner(&self, owner_id: &str) -> Result<Vec<Note>, StoreError> {
        let notes = self.notes.read().await;
        Ok(notes
            .values()
            .filter(|note| note.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn put_item(&self, note: &Note) -> Result<(), StoreError> {
        self.notes.write().await.insert(note.key(), note.clone());
        Ok(())
    }

    async fn conditional_update(
        &self,
        key: &NoteKey,
        content: &str,
        updated_at: i64,
    ) -> Result<Note, StoreError> {
        let mut notes = self.notes.write().await;
        let note = notes
            .get_mut(key)
            .ok_or_else(|| StoreError::ConditionalCheckFailed(key.note_id.clone()))?;

        note.content = content.to_string();
        note.updated_at = BigDecimal::from(updated_at);
        Ok(note.clone())
    }

    async fn delete_item(&self, key: &NoteKey) -> Result<(), StoreError> {
        self.notes.write().await.remove(key);
        Ok(())
    }
}
