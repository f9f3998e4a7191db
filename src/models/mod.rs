//! Core data models
//!
//! The card entity, the request payload used to create or edit one, and the
//! value types they are built from.

pub mod card;
pub mod expiry;
pub mod ids;
pub mod money;
pub mod request;

pub use card::{Card, DEFAULT_CARD_TYPE};
pub use expiry::{ExpiryDate, ExpiryParseError};
pub use ids::{CardId, UserId};
pub use money::Money;
pub use request::CardRequest;
