//! In-memory card store
//!
//! Cards live in a `Vec` so lookups by owner come back in insertion order.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{CardError, CardResult};
use crate::models::{Card, CardId, UserId};

use super::CardStore;

/// Card store backed by a lock-protected vector
#[derive(Debug, Default)]
pub struct MemoryCardStore {
    data: RwLock<Vec<Card>>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection
    pub fn replace_all(&self, cards: Vec<Card>) -> CardResult<()> {
        let mut data = self.write()?;
        *data = cards;
        Ok(())
    }

    /// Apply `change` to a copy of the collection and hand the result to
    /// `persist`; the copy replaces the live collection only if `persist`
    /// succeeds
    ///
    /// The write lock is held throughout, so commits are serialized and a
    /// failed commit leaves the collection exactly as it was.
    pub fn commit<R>(
        &self,
        change: impl FnOnce(&mut Vec<Card>) -> R,
        persist: impl FnOnce(&[Card], &R) -> CardResult<()>,
    ) -> CardResult<R> {
        let mut data = self.write()?;
        let mut staged = data.clone();
        let outcome = change(&mut staged);
        persist(&staged, &outcome)?;
        *data = staged;
        Ok(outcome)
    }

    fn read(&self) -> CardResult<RwLockReadGuard<'_, Vec<Card>>> {
        self.data
            .read()
            .map_err(|e| CardError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> CardResult<RwLockWriteGuard<'_, Vec<Card>>> {
        self.data
            .write()
            .map_err(|e| CardError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl CardStore for MemoryCardStore {
    fn add(&self, card: Card) -> CardResult<()> {
        debug!(card_id = %card.id, user_id = %card.user_id, "Adding card");
        insert(&mut *self.write()?, card);
        Ok(())
    }

    fn find_by_id(&self, id: CardId) -> CardResult<Option<Card>> {
        Ok(self.read()?.iter().find(|c| c.id == id).cloned())
    }

    fn find_by_owner(&self, user_id: UserId) -> CardResult<Vec<Card>> {
        Ok(self
            .read()?
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    fn update(&self, card: Card) -> CardResult<bool> {
        Ok(replace(&mut self.write()?, card))
    }

    fn remove(&self, id: CardId) -> CardResult<bool> {
        Ok(delete(&mut *self.write()?, id))
    }

    fn all(&self) -> CardResult<Vec<Card>> {
        Ok(self.read()?.clone())
    }

    fn count(&self) -> CardResult<usize> {
        Ok(self.read()?.len())
    }
}

pub(crate) fn insert(cards: &mut Vec<Card>, card: Card) {
    cards.push(card);
}

/// Swap in `card` over the entry with the same ID
pub(crate) fn replace(cards: &mut [Card], card: Card) -> bool {
    match cards.iter_mut().find(|c| c.id == card.id) {
        Some(slot) => {
            *slot = card;
            true
        }
        None => false,
    }
}

pub(crate) fn delete(cards: &mut Vec<Card>, id: CardId) -> bool {
    let before = cards.len();
    cards.retain(|c| c.id != id);
    cards.len() != before
}
