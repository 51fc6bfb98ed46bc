use std::sync::Arc;

use crate::application::ports::{ConfirmIntent, DraftStore, NavigationHost, NoticePublisher};
use crate::application::services::{AutosaveService, DraftService, NavigationGuard};
use crate::domain::value_objects::DraftKey;
use crate::infrastructure::database::{Database, DbPool};
use crate::infrastructure::notify::TracingNoticePublisher;
use crate::infrastructure::storage::SqliteDraftStore;
use crate::presentation::handlers::DraftHandler;
use crate::shared::AppConfig;

/// Composition root. Owns the wiring from config to handler so embedders and
/// tests can each build fully isolated instances.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub drafts: Arc<DraftService>,
    pub autosave: Arc<AutosaveService>,
    pub draft_handler: Arc<DraftHandler>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        Self::with_notice_publisher(config, Arc::new(TracingNoticePublisher)).await
    }

    /// Same wiring, but with an embedder-supplied notice surface.
    pub async fn with_notice_publisher(
        config: AppConfig,
        notices: Arc<dyn NoticePublisher>,
    ) -> anyhow::Result<Self> {
        config.validate().map_err(anyhow::Error::msg)?;
        std::fs::create_dir_all(&config.storage.data_dir)?;

        let db_pool = Database::initialize(&config.storage.database_url()).await?;
        let store: Arc<dyn DraftStore> = Arc::new(SqliteDraftStore::new(db_pool.clone()));
        let key = DraftKey::new(config.storage.draft_key.clone()).map_err(anyhow::Error::msg)?;

        let drafts = Arc::new(DraftService::new(store, key));
        let autosave = Arc::new(AutosaveService::new(
            drafts.clone(),
            notices,
            &config.autosave,
        ));
        let draft_handler = Arc::new(DraftHandler::new(autosave.clone(), drafts.clone()));

        Ok(Self {
            config,
            db_pool,
            drafts,
            autosave,
            draft_handler,
        })
    }

    /// Build a navigation guard over this state's draft slice with the
    /// embedder's host and confirm capabilities. Not started automatically.
    pub fn navigation_guard(
        &self,
        host: Arc<dyn NavigationHost>,
        confirm: Arc<dyn ConfirmIntent>,
    ) -> NavigationGuard {
        NavigationGuard::new(self.drafts.clone(), host, confirm)
    }
}
