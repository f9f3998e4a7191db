//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod card;

pub use card::{handle_card_command, handle_history_command, CardCommands};
