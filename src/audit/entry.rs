//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Card;

use super::diff::generate_diff;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
///
/// Snapshots are stored with the card number masked so the log never holds
/// full card numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// ID of the affected card
    pub card_id: String,

    /// Owner of the affected card
    pub user_id: String,

    /// Card state before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Card state after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

fn snapshot(card: &Card) -> Option<serde_json::Value> {
    let mut value = serde_json::to_value(card).ok()?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert(
            "cardNumber".to_string(),
            serde_json::Value::String(card.masked_number()),
        );
    }
    Some(value)
}

impl AuditEntry {
    fn new(operation: Operation, card: &Card) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            card_id: card.id.to_string(),
            user_id: card.user_id.to_string(),
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create(card: &Card) -> Self {
        Self {
            after: snapshot(card),
            ..Self::new(Operation::Create, card)
        }
    }

    /// Record an update; the diff summary is computed from the snapshots
    pub fn update(before: &Card, after: &Card) -> Self {
        let before_value = snapshot(before);
        let after_value = snapshot(after);
        let diff_summary = match (&before_value, &after_value) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            before: before_value,
            after: after_value,
            diff_summary,
            ..Self::new(Operation::Update, after)
        }
    }

    pub fn delete(card: &Card) -> Self {
        Self {
            before: snapshot(card),
            ..Self::new(Operation::Delete, card)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} card {} (user {})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.card_id,
            self.user_id
        );

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
