//! Prelude module - commonly used types for convenient import.
//!
//! Use `use larder_core::prelude::*;` to import all essential types.

// Auditable trait
pub use crate::Auditable;

// Common types
pub use crate::{ActorId, AuditEntryId, RecordId, RecordKind, Timestamp};
