//! Path management
//!
//! ## Path Resolution Order
//!
//! 1. `CARD_SERVICES_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `card-services`
//!    (`~/.config/card-services` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CardError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "CARD_SERVICES_DATA_DIR";

/// Manages all paths used by card services
#[derive(Debug, Clone)]
pub struct CardPaths {
    base_dir: PathBuf,
}

impl CardPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CardError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "card-services")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    CardError::Config("Could not determine a config directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn cards_file(&self) -> PathBuf {
        self.data_dir().join("cards.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), CardError> {
        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CardError::Io(format!("Failed to create data directory: {}", e)))
    }

    /// Whether `init` has been run here (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
