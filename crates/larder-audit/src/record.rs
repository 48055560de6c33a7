//! Audit record types and the operation/severity taxonomy.
//!
//! Every successful mutation of an audited endpoint is recorded as exactly
//! one [`AuditRecord`]. Records are immutable once written; the mechanism
//! that produces them never updates, deletes, or reads them back.

use larder_core::{ActorId, AuditEntryId, RecordId, RecordKind, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of mutation an audit record describes.
///
/// The set is closed by construction: the three interceptor hooks are the
/// only producers, so no out-of-range operation code can ever reach the
/// store or the log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// A new record was persisted.
    Created,
    /// An existing record was replaced with validated input.
    Updated,
    /// An existing record was removed.
    Deleted,
}

impl Operation {
    /// Past-tense verb used when composing audit messages.
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// Leveled classification of a log emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Diagnostic detail.
    Debug,
    /// Routine operation.
    Info,
    /// Notable change.
    Warning,
    /// Failure requiring operator attention.
    Error,
    /// The most operationally significant events.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Mapping from operation kind to log severity.
///
/// Read-only after interceptor construction. The default maps Created to
/// Info, Updated to Warning, and Deleted to Critical; configuration that
/// does not keep `deleted` strictly highest is rejected at validation time
/// (see [`AuditConfig::validate`](crate::AuditConfig::validate)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityMap {
    /// Severity for [`Operation::Created`].
    pub created: Severity,
    /// Severity for [`Operation::Updated`].
    pub updated: Severity,
    /// Severity for [`Operation::Deleted`].
    pub deleted: Severity,
}

impl Default for SeverityMap {
    fn default() -> Self {
        Self {
            created: Severity::Info,
            updated: Severity::Warning,
            deleted: Severity::Critical,
        }
    }
}

impl SeverityMap {
    /// Look up the severity for an operation kind.
    #[must_use]
    pub fn severity_for(&self, operation: Operation) -> Severity {
        match operation {
            Operation::Created => self.created,
            Operation::Updated => self.updated,
            Operation::Deleted => self.deleted,
        }
    }
}

/// One durable entry describing a single mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique entry identifier.
    pub id: AuditEntryId,
    /// When this entry was written.
    pub timestamp: Timestamp,
    /// The mutation kind.
    pub operation: Operation,
    /// The authenticated principal that performed the mutation.
    pub actor_id: ActorId,
    /// Stable identifier of the mutated record's type.
    pub target_kind: RecordKind,
    /// Primary key of the mutated record at operation time.
    pub target_id: RecordId,
    /// String form of the record, captured at operation time.
    ///
    /// For deletions this is the pre-image rendering, taken before the
    /// record was removed.
    pub display_text: String,
    /// Composed summary: `"{verb} {display_text}"`.
    pub message: String,
}

impl AuditRecord {
    /// Build the record for one mutation.
    ///
    /// The message is composed here from the operation verb and the display
    /// text; callers never supply it.
    #[must_use]
    pub fn new(
        operation: Operation,
        actor_id: ActorId,
        target_kind: RecordKind,
        target_id: RecordId,
        display_text: impl Into<String>,
    ) -> Self {
        let display_text = display_text.into();
        let message = format!("{} {display_text}", operation.verb());

        Self {
            id: AuditEntryId::new(),
            timestamp: Timestamp::now(),
            operation,
            actor_id,
            target_kind,
            target_id,
            display_text,
            message,
        }
    }
}
