// store/mod.rs - Note store collaborator
//
// The handler talks to storage only through `NoteStore`. Implementations are
// constructed once at process start and injected as `SharedStore`.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};
use crate::models::{Note, NoteKey};

pub mod memory;
pub mod postgres;

pub use memory::MemoryNoteStore;
pub use postgres::PgNoteStore;

/// Errors from note store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The existence precondition of a conditional write did not hold
    #[error("Conditional check failed for note {0}")]
    ConditionalCheckFailed(String),

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_conditional_check_failed(&self) -> bool {
        matches!(self, StoreError::ConditionalCheckFailed(_))
    }
}

/// Key-value/document store addressed by `(owner_id, note_id)`
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes stored under `owner_id`, in store order
    async fn query_by_owner(&self, owner_id: &str) -> Result<Vec<Note>, StoreError>;

    /// Unconditional overwrite-or-create
    async fn put_item(&self, note: &Note) -> Result<(), StoreError>;

    /// Set `content` and `updated_at` on an existing note and return the new
    /// state. Fails with `ConditionalCheckFailed` when the key is absent.
    async fn conditional_update(
        &self,
        key: &NoteKey,
        content: &str,
        updated_at: i64,
    ) -> Result<Note, StoreError>;

    /// Remove the note if present; absent keys are not an error
    async fn delete_item(&self, key: &NoteKey) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn NoteStore>;

/// Build the configured store. Called once per process; opens no connection.
pub fn connect(config: &StoreConfig) -> Result<SharedStore, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory note store");
            Ok(Arc::new(MemoryNoteStore::new()))
        }
        StoreBackend::Postgres => {
            let store = PgNoteStore::connect(config)?;
            Ok(Arc::new(store))
        }
    }
}
