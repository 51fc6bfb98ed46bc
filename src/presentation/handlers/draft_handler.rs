use std::sync::Arc;

use crate::application::services::{AutosaveService, DraftService};
use crate::presentation::dto::draft::{
    DraftRecordResponse, DraftSnapshotRequest, DraftStatusResponse, ManualSaveRequest,
    RestoreDraftRequest, RestoreDraftResponse, UpdateAutosaveSettingsRequest,
};
use crate::presentation::dto::Validate;
use crate::shared::error::{AppError, Result};

/// Boundary the editing surface calls. Validates requests, maps DTOs, and
/// delegates to the autosave coordinator and draft state slice.
pub struct DraftHandler {
    autosave: Arc<AutosaveService>,
    drafts: Arc<DraftService>,
}

impl DraftHandler {
    pub fn new(autosave: Arc<AutosaveService>, drafts: Arc<DraftService>) -> Self {
        Self { autosave, drafts }
    }

    /// Called on every form change event.
    pub fn submit_snapshot(&self, request: DraftSnapshotRequest) -> Result<()> {
        request.validate().map_err(AppError::Validation)?;
        self.autosave.on_snapshot(request.into());
        Ok(())
    }

    /// Explicit "Save Draft" action.
    pub async fn manual_save(&self, request: ManualSaveRequest) -> Result<DraftRecordResponse> {
        request.validate().map_err(AppError::Validation)?;
        let snapshot = request.snapshot.map(Into::into);
        let record = self.autosave.manual_save(snapshot).await?;
        Ok(record.into())
    }

    /// Mount-time restore. The durable record is only applied over in-memory
    /// state when the caller asks for it.
    pub async fn restore_draft(&self, request: RestoreDraftRequest) -> Result<RestoreDraftResponse> {
        let record = match self.autosave.restore().await? {
            Some(record) => record,
            None => {
                return Ok(RestoreDraftResponse {
                    restored: false,
                    draft: None,
                })
            }
        };
        if request.apply {
            self.autosave.adopt(record.clone())?;
        }
        Ok(RestoreDraftResponse {
            restored: true,
            draft: Some(record.into()),
        })
    }

    /// Drop the draft from memory and durable storage.
    pub async fn discard_draft(&self) -> Result<()> {
        self.autosave.discard().await
    }

    /// Fire a pending debounced commit early, e.g. before the page hides.
    pub async fn flush_pending(&self) -> Result<bool> {
        self.autosave.flush_now().await
    }

    pub fn draft_status(&self) -> DraftStatusResponse {
        DraftStatusResponse {
            is_dirty: self.drafts.is_dirty(),
            last_saved: self.drafts.last_saved().map(|ts| ts.to_rfc3339()),
            phase: self.autosave.phase().as_str().to_string(),
        }
    }

    pub fn update_settings(&self, request: UpdateAutosaveSettingsRequest) -> Result<()> {
        request.validate().map_err(AppError::Validation)?;
        if let Some(enabled) = request.enabled {
            self.autosave.set_enabled(enabled);
        }
        if let Some(interval_ms) = request.interval_ms {
            self.autosave.set_interval_ms(interval_ms);
        }
        Ok(())
    }
}
