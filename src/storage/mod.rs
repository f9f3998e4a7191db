//! Storage layer
//!
//! [`CardStore`] is the seam between the service and whatever holds the
//! cards. [`Storage`] bundles a store with the optional audit logger and is
//! what services are constructed from.

pub mod cards;
pub mod file_io;
pub mod init;
pub mod memory;

pub use cards::JsonCardStore;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use memory::MemoryCardStore;

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{CardPaths, Settings, StorageBackend};
use crate::error::CardResult;
use crate::models::{Card, CardId, UserId};

/// Owner of the card collection
///
/// Implementations do no validation; callers are expected to generate
/// unique identifiers and look a card up before removing it.
pub trait CardStore: Send + Sync {
    /// Insert a card
    fn add(&self, card: Card) -> CardResult<()>;

    fn find_by_id(&self, id: CardId) -> CardResult<Option<Card>>;

    /// All cards owned by `user_id`, in insertion order
    fn find_by_owner(&self, user_id: UserId) -> CardResult<Vec<Card>>;

    /// Replace the stored card with the same ID; `false` if there was none
    fn update(&self, card: Card) -> CardResult<bool>;

    /// Remove a card; `false` if there was none
    fn remove(&self, id: CardId) -> CardResult<bool>;

    fn all(&self) -> CardResult<Vec<Card>>;

    fn count(&self) -> CardResult<usize> {
        Ok(self.all()?.len())
    }
}

/// A card store plus the audit log its mutations are recorded in
pub struct Storage {
    pub cards: Box<dyn CardStore>,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Wrap any store, without auditing
    pub fn new(cards: Box<dyn CardStore>) -> Self {
        Self { cards, audit: None }
    }

    /// A fresh in-memory store, without auditing
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryCardStore::new()))
    }

    /// Open the store described by `settings` under `paths`
    pub fn open(paths: &CardPaths, settings: &Settings) -> CardResult<Self> {
        paths.ensure_directories()?;

        let cards: Box<dyn CardStore> = match settings.storage {
            StorageBackend::Memory => Box::new(MemoryCardStore::new()),
            StorageBackend::Json => Box::new(JsonCardStore::open(paths.cards_file())?),
        };

        let mut storage = Self::new(cards);
        if settings.audit_enabled {
            storage = storage.with_audit(AuditLogger::new(paths.audit_log()));
        }
        Ok(storage)
    }

    /// Record mutations in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record a creation
    ///
    /// The log_* methods run after the store has committed the change, which
    /// stands either way; a failed audit write is logged and swallowed.
    pub fn log_create(&self, card: &Card) {
        self.log(AuditEntry::create(card))
    }

    pub fn log_update(&self, before: &Card, after: &Card) {
        self.log(AuditEntry::update(before, after))
    }

    pub fn log_delete(&self, card: &Card) {
        self.log(AuditEntry::delete(card))
    }

    fn log(&self, entry: AuditEntry) {
        let Some(logger) = &self.audit else {
            return;
        };
        if let Err(e) = logger.log(&entry) {
            warn!(
                card_id = %entry.card_id,
                operation = %entry.operation,
                error = %e,
                "Failed to write audit entry"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::ExpiryDate;
    use tempfile::TempDir;

    fn sample_card() -> Card {
        Card::new(
            "4111111111111111",
            "A B",
            ExpiryDate::parse("09/27").unwrap(),
            "Credit",
            UserId::new(),
        )
    }

    #[test]
    fn test_open_json_backend() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        let storage = Storage::open(&paths, &settings).unwrap();
        let card = sample_card();
        storage.cards.add(card.clone()).unwrap();
        storage.log_create(&card);

        assert!(paths.cards_file().exists());
        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);

        let reopened = Storage::open(&paths, &settings).unwrap();
        assert_eq!(reopened.cards.count().unwrap(), 1);
    }

    #[test]
    fn test_audit_failure_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let storage = Storage::in_memory().with_audit(AuditLogger::new(blocker.join("audit.log")));

        let card = sample_card();
        storage.cards.add(card.clone()).unwrap();
        storage.log_create(&card);
        storage.log_delete(&card);

        assert_eq!(storage.cards.count().unwrap(), 1);
        assert!(storage.audit().unwrap().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_open_memory_backend_without_audit() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            storage: StorageBackend::Memory,
            audit_enabled: false,
            ..Settings::default()
        };

        let storage = Storage::open(&paths, &settings).unwrap();
        let card = sample_card();
        storage.cards.add(card.clone()).unwrap();
        storage.log_create(&card);

        assert!(!paths.cards_file().exists());
        assert!(storage.audit().is_none());
        assert!(!paths.audit_log().exists());
    }
}
