//! Audit logging
//!
//! Records every card create, update and delete with before/after snapshots
//! in an append-only JSONL file.
//!
//! # Example
//!
//! ```rust,ignore
//! use card_services::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&card))?;
//! logger.log(&AuditEntry::update(&before, &card))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
