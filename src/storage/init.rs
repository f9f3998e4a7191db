//! Storage initialization
//!
//! First-run setup: directories, a settings file and an empty card file.

use crate::config::{CardPaths, Settings, StorageBackend};
use crate::error::CardError;

use super::cards::JsonCardStore;

/// Prepare `paths` for use; existing settings and cards are left alone
pub fn initialize_storage(paths: &CardPaths, settings: &Settings) -> Result<(), CardError> {
    paths.ensure_directories()?;

    if !paths.is_initialized() {
        settings.save(paths)?;
    }

    if settings.storage == StorageBackend::Json && !paths.cards_file().exists() {
        JsonCardStore::new(paths.cards_file()).save()?;
    }

    Ok(())
}
