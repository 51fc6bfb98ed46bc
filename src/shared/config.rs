use serde::{Deserialize, Serialize};

/// Floor for the autosave interval. Anything below this is clamped to avoid
/// hammering the draft store on every keystroke burst.
pub const MIN_AUTOSAVE_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub autosave: AutosaveConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveConfig {
    pub enabled: bool,
    pub interval_ms: u64,
    pub notice_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    pub database_file: String,
    pub draft_key: String,
}

impl StorageConfig {
    pub fn database_url(&self) -> String {
        format!("sqlite://{}/{}?mode=rwc", self.data_dir, self.database_file)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            autosave: AutosaveConfig {
                enabled: true,
                interval_ms: 30_000, // 30 seconds
                notice_duration_ms: 2_000,
            },
            storage: StorageConfig {
                data_dir: default_data_dir(),
                database_file: "forkful.db".to_string(),
                draft_key: "recipeDraft".to_string(),
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("FORKFUL_AUTOSAVE_ENABLED") {
            cfg.autosave.enabled = parse_bool(&v, cfg.autosave.enabled);
        }
        if let Ok(v) = std::env::var("FORKFUL_AUTOSAVE_INTERVAL_MS") {
            if let Some(value) = parse_u64(&v) {
                cfg.autosave.interval_ms = value;
            }
        }
        if let Ok(v) = std::env::var("FORKFUL_NOTICE_DURATION_MS") {
            if let Some(value) = parse_u64(&v) {
                cfg.autosave.notice_duration_ms = value;
            }
        }
        if let Ok(v) = std::env::var("FORKFUL_DATA_DIR") {
            if !v.trim().is_empty() {
                cfg.storage.data_dir = v;
            }
        }
        if let Ok(v) = std::env::var("FORKFUL_DATABASE_FILE") {
            if !v.trim().is_empty() {
                cfg.storage.database_file = v;
            }
        }
        if let Ok(v) = std::env::var("FORKFUL_DRAFT_KEY") {
            if !v.trim().is_empty() {
                cfg.storage.draft_key = v;
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.autosave.interval_ms < MIN_AUTOSAVE_INTERVAL_MS {
            return Err(format!(
                "Autosave interval_ms must be at least {MIN_AUTOSAVE_INTERVAL_MS}"
            ));
        }
        if self.autosave.notice_duration_ms == 0 {
            return Err("Notice duration_ms must be greater than 0".to_string());
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err("Data dir must not be empty".to_string());
        }
        if self.storage.database_file.trim().is_empty() {
            return Err("Database file must not be empty".to_string());
        }
        if self.storage.draft_key.trim().is_empty() {
            return Err("Draft key must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("forkful").to_string_lossy().into_owned())
        .unwrap_or_else(|| "./data".to_string())
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_storming_interval() {
        let mut cfg = AppConfig::default();
        cfg.autosave.interval_ms = 50;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_draft_key() {
        let mut cfg = AppConfig::default();
        cfg.storage.draft_key = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn database_url_points_into_data_dir() {
        let mut cfg = AppConfig::default();
        cfg.storage.data_dir = "/tmp/forkful-test".to_string();
        assert_eq!(
            cfg.storage.database_url(),
            "sqlite:///tmp/forkful-test/forkful.db?mode=rwc"
        );
    }

    #[test]
    fn parse_bool_falls_back_to_default() {
        assert!(parse_bool("definitely", true));
        assert!(!parse_bool("off", true));
        assert!(parse_bool("YES", false));
    }
}
