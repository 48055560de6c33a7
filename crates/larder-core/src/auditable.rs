//! The `Auditable` trait - how domain records describe themselves to the
//! audit trail.

use crate::types::{RecordId, RecordKind};

/// Implemented by domain records whose mutations are audited.
///
/// The audit mechanism captures three things from a record: its type
/// identifier, its primary key, and a human-readable rendering. The type
/// identifier is an associated function so it stays stable for the lifetime
/// of the type regardless of instance state.
pub trait Auditable {
    /// Stable identifier of this record type.
    fn kind() -> RecordKind;

    /// Primary key of this record.
    fn record_id(&self) -> RecordId;

    /// Human-readable rendering of this record, captured at operation time.
    ///
    /// For deletions this is read from the pre-image, before the record is
    /// removed from the underlying store.
    fn display_text(&self) -> String;
}
