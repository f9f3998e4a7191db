//! Card model
//!
//! A payment card record owned by exactly one user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expiry::ExpiryDate;
use super::ids::{CardId, UserId};
use super::money::Money;

/// Card type assigned when a request does not name one
pub const DEFAULT_CARD_TYPE: &str = "Default";

/// A payment card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier, never changes after creation
    #[serde(rename = "cardId")]
    pub id: CardId,

    pub card_number: String,

    pub card_holder_name: String,

    pub expiry_date: ExpiryDate,

    /// Current balance, two decimal places
    #[serde(default)]
    pub balance: Money,

    /// Free-form type label (e.g. "Credit", "Debit")
    pub card_type: String,

    pub is_active: bool,

    /// Owning user
    pub user_id: UserId,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Create a new, inactive card with a zero balance
    pub fn new(
        card_number: impl Into<String>,
        card_holder_name: impl Into<String>,
        expiry_date: ExpiryDate,
        card_type: impl Into<String>,
        user_id: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CardId::new(),
            card_number: card_number.into(),
            card_holder_name: card_holder_name.into(),
            expiry_date,
            balance: Money::zero(),
            card_type: card_type.into(),
            is_active: false,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Overwrite the editable details of the card
    pub fn apply_details(
        &mut self,
        card_number: impl Into<String>,
        card_holder_name: impl Into<String>,
        expiry_date: ExpiryDate,
    ) {
        self.card_number = card_number.into();
        self.card_holder_name = card_holder_name.into();
        self.expiry_date = expiry_date;
        self.updated_at = Utc::now();
    }

    /// Card number with everything but the last four digits hidden
    pub fn masked_number(&self) -> String {
        let chars: Vec<char> = self.card_number.chars().collect();
        if chars.len() <= 4 {
            return self.card_number.clone();
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }

    pub fn is_expired_on(&self, date: NaiveDate) -> bool {
        self.expiry_date.is_expired_on(date)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.card_type,
            self.masked_number(),
            self.card_holder_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> Card {
        Card::new(
            "4111111111111111",
            "A B",
            ExpiryDate::parse("09/27").unwrap(),
            DEFAULT_CARD_TYPE,
            UserId::new(),
        )
    }

    #[test]
    fn test_new_card_is_inactive() {
        let card = sample_card();
        assert!(!card.is_active);
        assert_eq!(card.balance, Money::zero());
        assert_eq!(card.card_type, "Default");
        assert!(!card.id.is_nil());
    }

    #[test]
    fn test_activate_deactivate() {
        let mut card = sample_card();
        card.activate();
        assert!(card.is_active);
        card.activate();
        assert!(card.is_active);
        card.deactivate();
        assert!(!card.is_active);
    }

    #[test]
    fn test_apply_details_keeps_identity() {
        let mut card = sample_card();
        let id = card.id;
        let owner = card.user_id;
        card.apply_details("5500000000000004", "C D", ExpiryDate::parse("12/30").unwrap());
        assert_eq!(card.id, id);
        assert_eq!(card.user_id, owner);
        assert_eq!(card.card_number, "5500000000000004");
        assert_eq!(card.expiry_date.to_string(), "12/30");
    }

    #[test]
    fn test_masked_number() {
        let card = sample_card();
        assert_eq!(card.masked_number(), "************1111");

        let mut short = sample_card();
        short.card_number = "123".into();
        assert_eq!(short.masked_number(), "123");
    }

    #[test]
    fn test_wire_field_names() {
        let card = sample_card();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["cardId"], card.id.to_string());
        assert_eq!(json["cardNumber"], "4111111111111111");
        assert_eq!(json["expiryDate"], "09/27");
        assert_eq!(json["isActive"], false);
        assert_eq!(json["balance"], 0);

        let back: Card = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn test_display() {
        assert_eq!(sample_card().to_string(), "Default ************1111 (A B)");
    }
}
