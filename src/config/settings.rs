//! User settings
//!
//! Stored as `config.json` in the base directory. Every field has a default
//! so older or hand-edited files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::CardPaths;
use crate::error::CardError;
use crate::models::DEFAULT_CARD_TYPE;

/// Which card store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Nothing survives the process
    Memory,
    /// `data/cards.json`
    #[default]
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub storage: StorageBackend,

    /// Card type given to requests that leave it blank
    #[serde(default = "default_card_type")]
    pub default_card_type: String,

    /// Whether mutations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Diagnostic log filter, e.g. `info` or `card_services=debug`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_card_type() -> String {
    DEFAULT_CARD_TYPE.to_string()
}

fn default_audit_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            storage: StorageBackend::default(),
            default_card_type: default_card_type(),
            audit_enabled: default_audit_enabled(),
            log_level: default_log_level(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &CardPaths) -> Result<Self, CardError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Caller decides when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| CardError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| CardError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CardPaths) -> Result<(), CardError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CardError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CardError::Io(format!("Failed to write settings file: {}", e)))
    }
}
