//! Card request payload
//!
//! The transient input used to create a card or change its details.

use serde::{Deserialize, Serialize};

use super::ids::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    #[serde(default)]
    pub card_number: String,

    /// Expiry as `MM/YY`
    #[serde(default)]
    pub expiry_date: String,

    #[serde(default)]
    pub card_holder_name: String,

    pub user_id: UserId,

    /// Falls back to the configured default type when absent or blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
}

impl CardRequest {
    pub fn new(
        card_number: impl Into<String>,
        expiry_date: impl Into<String>,
        card_holder_name: impl Into<String>,
        user_id: UserId,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            expiry_date: expiry_date.into(),
            card_holder_name: card_holder_name.into(),
            user_id,
            card_type: None,
        }
    }

    pub fn with_card_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = Some(card_type.into());
        self
    }

    /// The requested card type, if one was given and is not blank
    pub fn requested_card_type(&self) -> Option<&str> {
        self.card_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
