//! Display formatting for terminal output

pub mod card;

pub use card::{format_card_details, format_card_list};
