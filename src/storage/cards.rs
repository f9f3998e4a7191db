//! JSON-backed card store
//!
//! Keeps the working set in memory and rewrites `cards.json` on every
//! mutation. A change becomes visible to readers only once the file write has
//! succeeded.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CardResult;
use crate::models::{Card, CardId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::memory::{self, MemoryCardStore};
use super::CardStore;

/// On-disk layout of `cards.json`
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CardData {
    cards: Vec<Card>,
}

/// Card store persisted to a JSON file
pub struct JsonCardStore {
    path: PathBuf,
    cards: MemoryCardStore,
}

impl JsonCardStore {
    /// Create a store for `path`; nothing is read until [`load`](Self::load)
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cards: MemoryCardStore::new(),
        }
    }

    /// Create a store and load whatever is already on disk
    pub fn open(path: PathBuf) -> CardResult<Self> {
        let store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load cards from disk; a missing file is an empty collection
    pub fn load(&self) -> CardResult<()> {
        let file_data: CardData = read_json(&self.path)?;
        debug!(
            path = %self.path.display(),
            cards = file_data.cards.len(),
            "Loaded card file"
        );
        self.cards.replace_all(file_data.cards)
    }

    /// Save the current cards to disk
    pub fn save(&self) -> CardResult<()> {
        self.cards.commit(|_| (), |cards, _| self.write(cards))
    }

    fn write(&self, cards: &[Card]) -> CardResult<()> {
        let file_data = CardData {
            cards: cards.to_vec(),
        };
        write_json_atomic(&self.path, &file_data)
    }
}

impl CardStore for JsonCardStore {
    fn add(&self, card: Card) -> CardResult<()> {
        debug!(card_id = %card.id, user_id = %card.user_id, "Adding card");
        self.cards
            .commit(|cards| memory::insert(cards, card), |cards, _| self.write(cards))
    }

    fn find_by_id(&self, id: CardId) -> CardResult<Option<Card>> {
        self.cards.find_by_id(id)
    }

    fn find_by_owner(&self, user_id: UserId) -> CardResult<Vec<Card>> {
        self.cards.find_by_owner(user_id)
    }

    fn update(&self, card: Card) -> CardResult<bool> {
        self.cards.commit(
            |cards| memory::replace(cards, card),
            |cards, &updated| if updated { self.write(cards) } else { Ok(()) },
        )
    }

    fn remove(&self, id: CardId) -> CardResult<bool> {
        self.cards.commit(
            |cards| memory::delete(cards, id),
            |cards, &removed| if removed { self.write(cards) } else { Ok(()) },
        )
    }

    fn all(&self) -> CardResult<Vec<Card>> {
        self.cards.all()
    }

    fn count(&self) -> CardResult<usize> {
        self.cards.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpiryDate;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonCardStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonCardStore::open(temp_dir.path().join("cards.json")).unwrap();
        (temp_dir, store)
    }

    fn sample_card(user_id: UserId) -> Card {
        Card::new(
            "4111111111111111",
            "A B",
            ExpiryDate::parse("09/27").unwrap(),
            "Credit",
            user_id,
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, store) = create_test_store();
        assert_eq!(store.count().unwrap(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_add_persists_and_reloads() {
        let (temp_dir, store) = create_test_store();
        let user = UserId::new();
        let card = sample_card(user);
        let id = card.id;

        store.add(card).unwrap();

        let reopened = JsonCardStore::open(temp_dir.path().join("cards.json")).unwrap();
        let found = reopened.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.card_holder_name, "A B");
        assert_eq!(found.expiry_date.to_string(), "09/27");
        assert_eq!(reopened.find_by_owner(user).unwrap().len(), 1);
    }

    #[test]
    fn test_update_and_remove_persist() {
        let (temp_dir, store) = create_test_store();
        let mut card = sample_card(UserId::new());
        let id = card.id;
        store.add(card.clone()).unwrap();

        card.activate();
        store.update(card).unwrap();
        let reopened = JsonCardStore::open(temp_dir.path().join("cards.json")).unwrap();
        assert!(reopened.find_by_id(id).unwrap().unwrap().is_active);

        store.remove(id).unwrap();
        let reopened = JsonCardStore::open(temp_dir.path().join("cards.json")).unwrap();
        assert!(reopened.find_by_id(id).unwrap().is_none());
    }

    #[test]
    fn test_failed_add_is_not_visible() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = JsonCardStore::new(blocker.join("cards.json"));
        let card = sample_card(UserId::new());
        let id = card.id;

        assert!(store.add(card).is_err());

        assert!(store.find_by_id(id).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_failed_update_and_remove_roll_back() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        let store = JsonCardStore::open(data_dir.join("cards.json")).unwrap();
        let mut card = sample_card(UserId::new());
        let id = card.id;
        store.add(card.clone()).unwrap();

        // swap the data directory for a plain file so every save fails
        fs::remove_dir_all(&data_dir).unwrap();
        fs::write(&data_dir, "").unwrap();

        card.activate();
        assert!(store.update(card).is_err());
        assert!(!store.find_by_id(id).unwrap().unwrap().is_active);

        assert!(store.remove(id).is_err());
        assert!(store.find_by_id(id).unwrap().is_some());
    }

    #[test]
    fn test_concurrent_adds_all_reach_disk() {
        let (temp_dir, store) = create_test_store();
        let store = Arc::new(store);
        let user = UserId::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.add(sample_card(user)).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let reopened = JsonCardStore::open(temp_dir.path().join("cards.json")).unwrap();
        assert_eq!(reopened.find_by_owner(user).unwrap().len(), 8);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }
}
