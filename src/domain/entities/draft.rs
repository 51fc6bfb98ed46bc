use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::{AppError, Result};

/// The editable fields of a recipe draft, exactly as the form surface
/// produces them. The camelCase serialized form is the unit of change
/// detection and the durable wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftFields {
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub image_url: String,
}

impl DraftFields {
    /// Canonical serialization used for commit comparison and persistence.
    pub fn serialized(&self) -> Result<String> {
        serde_json::to_string(self).map_err(AppError::from)
    }

    pub fn is_empty(&self) -> bool {
        self == &DraftFields::default()
    }
}

/// A partial update to the draft. Only the present fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPatch {
    pub name: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub category: Option<String>,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub servings: Option<String>,
    pub image_url: Option<String>,
}

impl DraftPatch {
    pub fn merge_into(&self, fields: &mut DraftFields) {
        if let Some(value) = &self.name {
            fields.name = value.clone();
        }
        if let Some(value) = &self.ingredients {
            fields.ingredients = value.clone();
        }
        if let Some(value) = &self.instructions {
            fields.instructions = value.clone();
        }
        if let Some(value) = &self.category {
            fields.category = value.clone();
        }
        if let Some(value) = &self.prep_time {
            fields.prep_time = value.clone();
        }
        if let Some(value) = &self.cook_time {
            fields.cook_time = value.clone();
        }
        if let Some(value) = &self.servings {
            fields.servings = value.clone();
        }
        if let Some(value) = &self.image_url {
            fields.image_url = value.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &DraftPatch::default()
    }
}

impl From<DraftFields> for DraftPatch {
    /// A full form snapshot is a patch with every field present.
    fn from(fields: DraftFields) -> Self {
        Self {
            name: Some(fields.name),
            ingredients: Some(fields.ingredients),
            instructions: Some(fields.instructions),
            category: Some(fields.category),
            prep_time: Some(fields.prep_time),
            cook_time: Some(fields.cook_time),
            servings: Some(fields.servings),
            image_url: Some(fields.image_url),
        }
    }
}

/// The draft plus its control fields. Records written to the durable store
/// always carry `is_dirty == false`; only in-memory state is ever dirty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    #[serde(flatten)]
    pub fields: DraftFields,
    pub last_saved: Option<DateTime<Utc>>,
    pub is_dirty: bool,
}

impl DraftRecord {
    pub fn empty() -> Self {
        Self {
            fields: DraftFields::default(),
            last_saved: None,
            is_dirty: false,
        }
    }

    pub fn committed(fields: DraftFields, saved_at: DateTime<Utc>) -> Self {
        Self {
            fields,
            last_saved: Some(saved_at),
            is_dirty: false,
        }
    }
}

impl Default for DraftRecord {
    fn default() -> Self {
        Self::empty()
    }
}
