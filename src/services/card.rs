//! Card service
//!
//! Validates input, enforces the card rules and drives the store. Every
//! failure comes back as a [`CardError`] whose kind tells the caller whether
//! the input was bad, the card was missing, or something else went wrong.

use tracing::{debug, info};

use crate::error::{CardError, CardResult};
use crate::models::{Card, CardId, CardRequest, ExpiryDate, UserId, DEFAULT_CARD_TYPE};
use crate::storage::{CardStore, Storage};

/// Service for card management
pub struct CardService<'a> {
    storage: &'a Storage,
    default_card_type: String,
}

impl<'a> CardService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            default_card_type: DEFAULT_CARD_TYPE.to_string(),
        }
    }

    /// Use a different type for requests that leave the card type blank
    pub fn with_default_card_type(mut self, card_type: impl Into<String>) -> Self {
        let card_type = card_type.into();
        if !card_type.trim().is_empty() {
            self.default_card_type = card_type.trim().to_string();
        }
        self
    }

    /// Create a new, inactive card from a request
    pub fn create(&self, request: Option<&CardRequest>) -> CardResult<Card> {
        let request = require_request(request)?;
        let expiry = parse_expiry(&request.expiry_date)?;

        let card_type = request
            .requested_card_type()
            .unwrap_or(self.default_card_type.as_str());

        let card = Card::new(
            request.card_number.clone(),
            request.card_holder_name.clone(),
            expiry,
            card_type,
            request.user_id,
        );

        self.storage.cards.add(card.clone())?;
        self.storage.log_create(&card);

        info!(card_id = %card.id, user_id = %card.user_id, card_type = %card.card_type, "Created card");
        Ok(card)
    }

    /// Get a card by ID
    pub fn get(&self, id: CardId) -> CardResult<Card> {
        require_id(id)?;
        self.find(id)
    }

    /// All cards owned by a user
    ///
    /// A user with no cards is reported as not found rather than as an empty
    /// list.
    pub fn list_for_user(&self, user_id: UserId) -> CardResult<Vec<Card>> {
        let cards = self.storage.cards.find_by_owner(user_id)?;
        if cards.is_empty() {
            return Err(CardError::user_cards_not_found(user_id.to_string()));
        }

        debug!(user_id = %user_id, count = cards.len(), "Listed cards for user");
        Ok(cards)
    }

    /// Every stored card
    pub fn list_all(&self) -> CardResult<Vec<Card>> {
        self.storage.cards.all()
    }

    /// Overwrite a card's number, holder name and expiry
    ///
    /// Balance, type, active flag and owner are left as they are. The expiry
    /// must be `MM/YY`, as on creation.
    pub fn update(&self, id: CardId, request: Option<&CardRequest>) -> CardResult<Card> {
        let request = require_request(request)?;
        let mut card = self.find(id)?;
        let expiry = parse_expiry(&request.expiry_date)?;

        let before = card.clone();
        card.apply_details(
            request.card_number.clone(),
            request.card_holder_name.clone(),
            expiry,
        );

        self.save(&before, card)
    }

    /// Delete a card
    pub fn delete(&self, id: CardId) -> CardResult<bool> {
        require_id(id)?;
        let card = self.find(id)?;

        if !self.storage.cards.remove(card.id)? {
            return Err(CardError::card_not_found(id.to_string()));
        }
        self.storage.log_delete(&card);

        info!(card_id = %card.id, user_id = %card.user_id, "Deleted card");
        Ok(true)
    }

    /// Mark a card active; activating an active card is not an error
    pub fn activate(&self, id: CardId) -> CardResult<Card> {
        self.set_active(id, true)
    }

    /// Mark a card inactive; deactivating an inactive card is not an error
    pub fn deactivate(&self, id: CardId) -> CardResult<Card> {
        self.set_active(id, false)
    }

    fn set_active(&self, id: CardId, active: bool) -> CardResult<Card> {
        require_id(id)?;
        let mut card = self.find(id)?;

        let before = card.clone();
        if active {
            card.activate();
        } else {
            card.deactivate();
        }

        self.save(&before, card)
    }

    fn find(&self, id: CardId) -> CardResult<Card> {
        self.storage
            .cards
            .find_by_id(id)?
            .ok_or_else(|| CardError::card_not_found(id.to_string()))
    }

    fn save(&self, before: &Card, card: Card) -> CardResult<Card> {
        if !self.storage.cards.update(card.clone())? {
            return Err(CardError::card_not_found(card.id.to_string()));
        }
        self.storage.log_update(before, &card);

        debug!(card_id = %card.id, is_active = card.is_active, "Updated card");
        Ok(card)
    }
}

fn require_request(request: Option<&CardRequest>) -> CardResult<&CardRequest> {
    request.ok_or_else(|| CardError::Validation("Card request cannot be empty".into()))
}

fn require_id(id: CardId) -> CardResult<()> {
    if id.is_nil() {
        return Err(CardError::Validation("Card ID cannot be empty".into()));
    }
    Ok(())
}

fn parse_expiry(s: &str) -> CardResult<ExpiryDate> {
    ExpiryDate::parse(s).map_err(|e| CardError::Validation(e.to_string()))
}
