//! Larder Core - Foundation types for the Larder record service.
//!
//! This crate provides:
//! - Identifier newtypes used throughout the workspace
//! - The [`Auditable`] trait bridging domain records and the audit trail
//! - A UTC [`Timestamp`] wrapper

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod auditable;
pub mod types;

pub use auditable::Auditable;
pub use types::{ActorId, AuditEntryId, RecordId, RecordKind, Timestamp};
