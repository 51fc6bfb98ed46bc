use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the durable slot a draft is stored under. One key holds at most
/// one serialized draft record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftKey(String);

impl DraftKey {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Draft key cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for DraftKey {
    fn default() -> Self {
        Self("recipeDraft".to_string())
    }
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DraftKey> for String {
    fn from(value: DraftKey) -> Self {
        value.0
    }
}
