//! Prelude module - commonly used types for convenient import.
//!
//! Use `use larder_audit::prelude::*;` to import all essential types.

// Errors
pub use crate::{AuditError, AuditResult, HookError};

// Record types
pub use crate::{AuditRecord, Operation, Severity, SeverityMap};

// Interceptor
pub use crate::{AuditFailurePolicy, AuditInterceptor, AuditInterceptorBuilder};

// Storage
pub use crate::{AuditStore, JsonlAuditStore, MemoryAuditStore};

// Log sink
pub use crate::{LogSink, TracingLogSink};

// Configuration
pub use crate::{AuditConfig, ConfigError};

// Re-exports from larder-core
pub use larder_core::{ActorId, AuditEntryId, Auditable, RecordId, RecordKind, Timestamp};
