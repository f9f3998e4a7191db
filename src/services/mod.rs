//! Business logic layer
//!
//! Services validate input and coordinate the storage layer.

pub mod card;

pub use card::CardService;
