use bigdecimal::BigDecimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::api::format::serialize_decimal;

/// A user-owned text note as held by the store.
///
/// Timestamps keep the store's decimal representation and are normalized to
/// plain JSON numbers when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub note_id: String,
    pub content: String,
    #[serde(serialize_with = "serialize_decimal")]
    pub created_at: BigDecimal,
    #[serde(serialize_with = "serialize_decimal")]
    pub updated_at: BigDecimal,
}

impl Note {
    /// Fresh note with both timestamps set to `now` (unix seconds)
    pub fn new(
        owner_id: impl Into<String>,
        note_id: impl Into<String>,
        content: impl Into<String>,
        now: i64,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            note_id: note_id.into(),
            content: content.into(),
            created_at: BigDecimal::from(now),
            updated_at: BigDecimal::from(now),
        }
    }

    pub fn key(&self) -> NoteKey {
        NoteKey::new(&self.owner_id, &self.note_id)
    }
}

/// Composite primary key of a note
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteKey {
    pub owner_id: String,
    pub note_id: String,
}

impl NoteKey {
    pub fn new(owner_id: impl Into<String>, note_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            note_id: note_id.into(),
        }
    }
}
