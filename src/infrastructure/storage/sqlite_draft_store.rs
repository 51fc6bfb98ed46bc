use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

use crate::application::ports::DraftStore;
use crate::domain::entities::DraftRecord;
use crate::domain::value_objects::DraftKey;
use crate::infrastructure::database::DbPool;
use crate::shared::error::Result;

/// Durable draft storage backed by the local SQLite database.
pub struct SqliteDraftStore {
    pool: DbPool,
}

impl SqliteDraftStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftStore for SqliteDraftStore {
    async fn load(&self, key: &DraftKey) -> Result<Option<DraftRecord>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT record FROM recipe_drafts WHERE draft_key = ?1")
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await?;

        let raw = match row {
            Some((raw,)) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str::<DraftRecord>(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                // An unparseable record is treated as no draft at all.
                warn!(%key, "discarding corrupt draft record: {err}");
                self.remove(key).await?;
                Ok(None)
            }
        }
    }

    async fn save(&self, key: &DraftKey, record: &DraftRecord) -> Result<()> {
        let raw = serde_json::to_string(record)?;
        sqlx::query(
            r#"
            INSERT INTO recipe_drafts (draft_key, record, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(draft_key) DO UPDATE
                SET record = excluded.record, updated_at = excluded.updated_at
            "#,
        )
        .bind(key.as_str())
        .bind(&raw)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &DraftKey) -> Result<()> {
        sqlx::query("DELETE FROM recipe_drafts WHERE draft_key = ?1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
