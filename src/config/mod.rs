//! Configuration module
//!
//! - Path resolution for the data directory, settings file and audit log
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::CardPaths;
pub use settings::{Settings, StorageBackend};
