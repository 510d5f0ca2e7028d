use std::time::Duration;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{debug, info};

use super::{NoteStore, StoreError};
use crate::config::StoreConfig;
use crate::models::{Note, NoteKey};

const NOTE_COLUMNS: &str = "owner_id, note_id, content, created_at, updated_at";

/// PostgreSQL table keyed by `(owner_id, note_id)`.
///
/// Timestamps live in `NUMERIC` columns and come back as `BigDecimal`.
#[derive(Clone)]
pub struct PgNoteStore {
    pool: PgPool,
    table: String,
}

impl PgNoteStore {
    /// Validate configuration and build the pool.
    ///
    /// No connection is opened here; the first query does that, so requests
    /// that never reach the store never wait on it.
    pub fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let table_name = config
            .table_name
            .as_deref()
            .ok_or(StoreError::ConfigMissing("TABLE_NAME"))?;
        let table = Self::quoted_table(table_name)?;

        let database_url = config
            .database_url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(database_url)?;

        info!("Configured note store for table {}", table_name);
        Ok(Self { pool, table })
    }

    /// Wrap an existing pool (the table name is still validated)
    pub fn with_pool(pool: PgPool, table_name: &str) -> Result<Self, StoreError> {
        Ok(Self {
            pool,
            table: Self::quoted_table(table_name)?,
        })
    }

    /// Pings the store to ensure connectivity
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Provision the notes table if it does not exist yet
    pub async fn create_table(&self) -> Result<(), StoreError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                owner_id TEXT NOT NULL,
                note_id TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at NUMERIC NOT NULL,
                updated_at NUMERIC NOT NULL,
                PRIMARY KEY (owner_id, note_id)
            )",
            self.table
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        info!("Ensured note table {} exists", self.table);
        Ok(())
    }

    fn quoted_table(name: &str) -> Result<String, StoreError> {
        if !Self::is_valid_table_name(name) {
            return Err(StoreError::InvalidTableName(name.to_string()));
        }
        Ok(Self::quote_identifier(name))
    }

    /// Plain identifiers only: a letter or underscore, then [A-Za-z0-9_]
    fn is_valid_table_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Quote SQL identifier to prevent injection
    fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn query_by_owner(&self, owner_id: &str) -> Result<Vec<Note>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE owner_id = $1",
            NOTE_COLUMNS, self.table
        );
        let notes = sqlx::query_as::<_, Note>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(notes)
    }

    async fn put_item(&self, note: &Note) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (owner_id, note_id) DO UPDATE SET
                content = EXCLUDED.content,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at",
            self.table, NOTE_COLUMNS
        );
        sqlx::query(&sql)
            .bind(&note.owner_id)
            .bind(&note.note_id)
            .bind(&note.content)
            .bind(&note.created_at)
            .bind(&note.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn conditional_update(
        &self,
        key: &NoteKey,
        content: &str,
        updated_at: i64,
    ) -> Result<Note, StoreError> {
        let sql = format!(
            "UPDATE {} SET content = $3, updated_at = $4
             WHERE owner_id = $1 AND note_id = $2
             RETURNING {}",
            self.table, NOTE_COLUMNS
        );
        let updated = sqlx::query_as::<_, Note>(&sql)
            .bind(&key.owner_id)
            .bind(&key.note_id)
            .bind(content)
            .bind(BigDecimal::from(updated_at))
            .fetch_optional(&self.pool)
            .await?;

        updated.ok_or_else(|| {
            debug!("Conditional update matched no row for note {}", key.note_id);
            StoreError::ConditionalCheckFailed(key.note_id.clone())
        })
    }

    async fn delete_item(&self, key: &NoteKey) -> Result<(), StoreError> {
        let sql = format!(
            "DELETE FROM {} WHERE owner_id = $1 AND note_id = $2",
            self.table
        );
        sqlx::query(&sql)
            .bind(&key.owner_id)
            .bind(&key.note_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_table_names() {
        assert!(PgNoteStore::is_valid_table_name("FlowNotes"));
        assert!(PgNoteStore::is_valid_table_name("_notes_v2"));
        assert!(!PgNoteStore::is_valid_table_name(""));
        assert!(!PgNoteStore::is_valid_table_name("2notes"));
        assert!(!PgNoteStore::is_valid_table_name("notes-table"));
        assert!(!PgNoteStore::is_valid_table_name("notes; DROP TABLE users"));
    }

    #[test]
    fn quotes_valid_names() {
        assert_eq!(PgNoteStore::quoted_table("FlowNotes").unwrap(), "\"FlowNotes\"");
        assert!(matches!(
            PgNoteStore::quoted_table("bad name"),
            Err(StoreError::InvalidTableName(_))
        ));
    }

    /// Runs against a live database when `DATABASE_URL` is set; skipped otherwise.
    #[tokio::test]
    async fn round_trips_against_live_database() {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping live note store test");
            return;
        };
        let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap();
        let table = format!("notes_test_{}", uuid::Uuid::new_v4().simple());
        let store = PgNoteStore::with_pool(pool.clone(), &table).unwrap();
        store.health_check().await.unwrap();
        store.create_table().await.unwrap();

        let note = Note::new("user-123", "n-1", "hello", 1_700_000_000);
        store.put_item(&note).await.unwrap();

        let listed = store.query_by_owner("user-123").await.unwrap();
        assert_eq!(listed, vec![note.clone()]);
        assert_eq!(listed[0].created_at, BigDecimal::from(1_700_000_000));
        assert!(store.query_by_owner("someone-else").await.unwrap().is_empty());

        let missing = store
            .conditional_update(&NoteKey::new("user-123", "nope"), "x", 1_700_000_100)
            .await
            .unwrap_err();
        assert!(missing.is_conditional_check_failed());

        let cross_owner = store
            .conditional_update(&NoteKey::new("intruder", "n-1"), "stolen", 1_700_000_100)
            .await
            .unwrap_err();
        assert!(cross_owner.is_conditional_check_failed());
        assert_eq!(store.query_by_owner("user-123").await.unwrap()[0].content, "hello");

        let updated = store
            .conditional_update(&note.key(), "updated", 1_700_000_100)
            .await
            .unwrap();
        assert_eq!(updated.content, "updated");
        assert_eq!(updated.created_at, BigDecimal::from(1_700_000_000));
        assert_eq!(updated.updated_at, BigDecimal::from(1_700_000_100));

        store.delete_item(&note.key()).await.unwrap();
        store.delete_item(&note.key()).await.unwrap();
        assert!(store.query_by_owner("user-123").await.unwrap().is_empty());

        sqlx::query(&format!("DROP TABLE {}", PgNoteStore::quote_identifier(&table)))
            .execute(&pool)
            .await
            .unwrap();
    }
}
