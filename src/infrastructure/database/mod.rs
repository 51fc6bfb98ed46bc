use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tracing::debug;

use crate::shared::error::Result;

pub type DbPool = Pool<Sqlite>;

pub struct Database;

impl Database {
    /// Connect and make sure the schema exists. The draft table is a plain
    /// key/value slot: one row per draft key, overwritten wholesale.
    pub async fn initialize(database_url: &str) -> Result<DbPool> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Self::create_schema(&pool).await?;
        debug!(%database_url, "database initialized");
        Ok(pool)
    }

    async fn create_schema(pool: &DbPool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS recipe_drafts (
                draft_key TEXT PRIMARY KEY,
                record TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}
