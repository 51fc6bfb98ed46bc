use serde::{Deserialize, Serialize};

use crate::domain::entities::{DraftFields, DraftRecord};
use crate::presentation::dto::Validate;

const MAX_SHORT_FIELD: usize = 200;
const MAX_TEXT_FIELD: usize = 50_000;
const MAX_URL_FIELD: usize = 2_000;

/// A full form snapshot, exactly as the editing surface emits it on every
/// change event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshotRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub servings: String,
    #[serde(default)]
    pub image_url: String,
}

impl Validate for DraftSnapshotRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.len() > MAX_SHORT_FIELD {
            return Err(format!("Name is too long (max {MAX_SHORT_FIELD} bytes)"));
        }
        if self.category.len() > MAX_SHORT_FIELD {
            return Err(format!("Category is too long (max {MAX_SHORT_FIELD} bytes)"));
        }
        if self.prep_time.len() > MAX_SHORT_FIELD
            || self.cook_time.len() > MAX_SHORT_FIELD
            || self.servings.len() > MAX_SHORT_FIELD
        {
            return Err(format!("Time/servings fields are limited to {MAX_SHORT_FIELD} bytes"));
        }
        if self.ingredients.len() > MAX_TEXT_FIELD {
            return Err(format!("Ingredients are too large (max {MAX_TEXT_FIELD} bytes)"));
        }
        if self.instructions.len() > MAX_TEXT_FIELD {
            return Err(format!("Instructions are too large (max {MAX_TEXT_FIELD} bytes)"));
        }
        if self.image_url.len() > MAX_URL_FIELD {
            return Err(format!("Image URL is too long (max {MAX_URL_FIELD} bytes)"));
        }
        Ok(())
    }
}

impl From<DraftSnapshotRequest> for DraftFields {
    fn from(request: DraftSnapshotRequest) -> Self {
        Self {
            name: request.name,
            ingredients: request.ingredients,
            instructions: request.instructions,
            category: request.category,
            prep_time: request.prep_time,
            cook_time: request.cook_time,
            servings: request.servings,
            image_url: request.image_url,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualSaveRequest {
    /// Omitted snapshot means "save whatever is currently in memory".
    pub snapshot: Option<DraftSnapshotRequest>,
}

impl Validate for ManualSaveRequest {
    fn validate(&self) -> Result<(), String> {
        match &self.snapshot {
            Some(snapshot) => snapshot.validate(),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreDraftRequest {
    /// Apply the restored record over in-memory state, or just report it.
    #[serde(default = "default_apply")]
    pub apply: bool,
}

fn default_apply() -> bool {
    true
}

impl Default for RestoreDraftRequest {
    fn default() -> Self {
        Self { apply: true }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAutosaveSettingsRequest {
    pub enabled: Option<bool>,
    pub interval_ms: Option<u64>,
}

impl Validate for UpdateAutosaveSettingsRequest {
    fn validate(&self) -> Result<(), String> {
        if self.interval_ms == Some(0) {
            return Err("Autosave interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecordResponse {
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub image_url: String,
    pub last_saved: Option<String>,
    pub is_dirty: bool,
}

impl From<DraftRecord> for DraftRecordResponse {
    fn from(record: DraftRecord) -> Self {
        Self {
            name: record.fields.name,
            ingredients: record.fields.ingredients,
            instructions: record.fields.instructions,
            category: record.fields.category,
            prep_time: record.fields.prep_time,
            cook_time: record.fields.cook_time,
            servings: record.fields.servings,
            image_url: record.fields.image_url,
            last_saved: record.last_saved.map(|ts| ts.to_rfc3339()),
            is_dirty: record.is_dirty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreDraftResponse {
    pub restored: bool,
    pub draft: Option<DraftRecordResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftStatusResponse {
    pub is_dirty: bool,
    pub last_saved: Option<String>,
    pub phase: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_request_rejects_oversized_instructions() {
        let request = DraftSnapshotRequest {
            instructions: "x".repeat(MAX_TEXT_FIELD + 1),
            ..DraftSnapshotRequest::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn snapshot_request_accepts_ordinary_draft() {
        let request = DraftSnapshotRequest {
            name: "Tomato Soup".to_string(),
            ingredients: "tomatoes\nwater\nsalt".to_string(),
            servings: "4".to_string(),
            ..DraftSnapshotRequest::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn settings_request_rejects_zero_interval() {
        let request = UpdateAutosaveSettingsRequest {
            enabled: None,
            interval_ms: Some(0),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn restore_request_applies_by_default() {
        let request: RestoreDraftRequest = serde_json::from_str("{}").unwrap();
        assert!(request.apply);
    }
}
