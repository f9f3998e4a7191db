//! Append-only audit log writer
//!
//! Each entry is one JSON line, flushed as soon as it is written.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{CardError, CardResult};

use super::entry::AuditEntry;

pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry to the log
    pub fn log(&self, entry: &AuditEntry) -> CardResult<()> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CardError::Io(format!("Failed to create audit directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| CardError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| CardError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| CardError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| CardError::Io(format!("Failed to flush audit log: {}", e)))
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> CardResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| CardError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                CardError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                CardError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The most recent `count` entries, optionally only those for one card
    pub fn read_recent(
        &self,
        count: usize,
        card_id: Option<&str>,
    ) -> CardResult<Vec<AuditEntry>> {
        let mut entries = match card_id {
            Some(card_id) => self.read_for_card(card_id)?,
            None => self.read_all()?,
        };
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Entries that touch a single card
    pub fn read_for_card(&self, card_id: &str) -> CardResult<Vec<AuditEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.card_id == card_id)
            .collect())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Card, ExpiryDate, UserId};
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn sample_card(number: &str) -> Card {
        Card::new(
            number,
            "A B",
            ExpiryDate::parse("09/27").unwrap(),
            "Credit",
            UserId::new(),
        )
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(!logger.path().exists());
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        let card = sample_card("4111111111111111");

        logger.log(&AuditEntry::create(&card)).unwrap();
        logger.log(&AuditEntry::delete(&card)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].operation, Operation::Delete);
    }

    #[test]
    fn test_read_recent_and_for_card() {
        let (logger, _temp) = create_test_logger();
        let cards: Vec<_> = (0..5).map(|i| sample_card(&format!("000{}", i))).collect();
        for card in &cards {
            logger.log(&AuditEntry::create(card)).unwrap();
        }

        let recent = logger.read_recent(2, None).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].card_id, cards[4].id.to_string());

        logger.log(&AuditEntry::delete(&cards[1])).unwrap();
        let card_id = cards[1].id.to_string();
        let recent = logger.read_recent(1, Some(&card_id)).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].operation, Operation::Delete);

        let for_card = logger.read_for_card(&cards[2].id.to_string()).unwrap();
        assert_eq!(for_card.len(), 1);
    }

    #[test]
    fn test_corrupt_line_is_json_error() {
        let (logger, _temp) = create_test_logger();
        std::fs::write(logger.path(), "{not json}\n").unwrap();

        assert!(matches!(logger.read_all(), Err(CardError::Json(_))));
    }
}
