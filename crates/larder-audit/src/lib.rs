//! Larder Audit - mutation audit trail for record endpoints.
//!
//! This crate provides:
//! - A structured [`AuditRecord`] written once per successful mutation
//! - The [`AuditInterceptor`] wrapping create/update/delete delegates
//! - Append-only storage backends (in-memory and JSON-lines)
//! - A severity-leveled log side channel over `tracing`
//!
//! # Model
//!
//! A host endpoint composes with the interceptor explicitly: it performs
//! its mutation through the hook matching the operation, passing its own
//! persistence routine as a closure. Create and update capture the audit
//! record from the *persisted* instance the delegate returns; destroy
//! captures from the pre-image and appends *before* the delete delegate
//! runs, since the record's string form and key are gone afterwards.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use larder_audit::prelude::*;
//!
//! struct Tag {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Auditable for Tag {
//!     fn kind() -> RecordKind {
//!         RecordKind::new("tag")
//!     }
//!
//!     fn record_id(&self) -> RecordId {
//!         RecordId::new(self.id)
//!     }
//!
//!     fn display_text(&self) -> String {
//!         self.name.clone()
//!     }
//! }
//!
//! let store = Arc::new(MemoryAuditStore::new());
//! let audit = AuditInterceptor::new(Arc::clone(&store) as Arc<dyn AuditStore>);
//!
//! let tag = audit
//!     .on_create(ActorId::new(7), || {
//!         Ok::<_, std::io::Error>(Tag {
//!             id: 1,
//!             name: "Dessert".to_string(),
//!         })
//!     })
//!     .unwrap();
//!
//! assert_eq!(tag.name, "Dessert");
//! assert_eq!(store.records()[0].message, "Created Dessert");
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod config;
mod error;
mod interceptor;
mod record;
mod sink;
mod store;

pub use config::{AuditConfig, ConfigError};
pub use error::{AuditError, AuditResult, HookError};
pub use interceptor::{AuditFailurePolicy, AuditInterceptor, AuditInterceptorBuilder};
pub use record::{AuditRecord, Operation, Severity, SeverityMap};
pub use sink::{LogSink, TracingLogSink};
pub use store::{AuditStore, JsonlAuditStore, MemoryAuditStore};
