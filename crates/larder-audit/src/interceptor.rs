//! The audit interceptor - wraps the create/update/delete path of a host
//! endpoint.
//!
//! A host composes with the interceptor explicitly: it holds one and calls
//! the hook matching the operation, passing its own persistence routine as
//! a closure. The interceptor runs the delegate, then records exactly one
//! [`AuditRecord`] and emits one log line for the mutation. For deletions
//! the capture happens first, from the pre-image.

use larder_core::{ActorId, Auditable};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AuditResult, HookError};
use crate::record::{AuditRecord, Operation, Severity, SeverityMap};
use crate::sink::{LogSink, TracingLogSink};
use crate::store::AuditStore;

/// What the interceptor does when the audit append fails after a
/// successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditFailurePolicy {
    /// Surface the audit failure to the caller, even though the mutation
    /// already committed. The reference behavior.
    #[default]
    Propagate,
    /// Report the failure through the log sink at [`Severity::Error`] and
    /// return the successful mutation to the caller.
    LogAndContinue,
}

/// Records an audit trail around the mutating operations of a host
/// endpoint.
///
/// Stateless between requests: the severity map, store handle, sink
/// handle, and failure policy are fixed at construction and read-only
/// afterwards. The interceptor performs no retries and adds no ordering
/// beyond what the host's delegates and the store provide.
pub struct AuditInterceptor {
    store: Arc<dyn AuditStore>,
    sink: Arc<dyn LogSink>,
    severities: SeverityMap,
    failure_policy: AuditFailurePolicy,
}

impl AuditInterceptor {
    /// Create an interceptor over `store` with default sink, severities,
    /// and failure policy.
    #[must_use]
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self::builder(store).build()
    }

    /// Start building an interceptor over `store`.
    #[must_use]
    pub fn builder(store: Arc<dyn AuditStore>) -> AuditInterceptorBuilder {
        AuditInterceptorBuilder {
            store,
            sink: None,
            severities: SeverityMap::default(),
            failure_policy: AuditFailurePolicy::default(),
        }
    }

    /// Persist a new record through the host's delegate and audit it.
    ///
    /// The delegate runs first; generated fields such as the primary key
    /// are read off the persisted instance it returns.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Mutation`] if the delegate fails (nothing is
    /// audited), or [`HookError::Audit`] if the audit append fails under
    /// [`AuditFailurePolicy::Propagate`].
    pub fn on_create<T, E, F>(&self, actor: ActorId, persist: F) -> Result<T, HookError<E>>
    where
        T: Auditable,
        E: std::error::Error,
        F: FnOnce() -> Result<T, E>,
    {
        self.after_persist(Operation::Created, actor, persist)
    }

    /// Persist an update through the host's delegate and audit it.
    ///
    /// Audit capture happens only after the delegate returns successfully,
    /// using the updated instance.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Mutation`] if the delegate fails (nothing is
    /// audited), or [`HookError::Audit`] if the audit append fails under
    /// [`AuditFailurePolicy::Propagate`].
    pub fn on_update<T, E, F>(&self, actor: ActorId, persist: F) -> Result<T, HookError<E>>
    where
        T: Auditable,
        E: std::error::Error,
        F: FnOnce() -> Result<T, E>,
    {
        self.after_persist(Operation::Updated, actor, persist)
    }

    /// Audit a deletion from its pre-image, then run the host's delete
    /// delegate.
    ///
    /// The record and log line are produced *before* the delegate runs:
    /// once the host deletes the record, its string form and key may no
    /// longer be reconstructible.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Audit`] if the audit append fails under
    /// [`AuditFailurePolicy::Propagate`] (the delegate is then never
    /// invoked), or [`HookError::Mutation`] if the delegate fails.
    pub fn on_destroy<T, E, F>(
        &self,
        actor: ActorId,
        record: &T,
        delete: F,
    ) -> Result<(), HookError<E>>
    where
        T: Auditable,
        E: std::error::Error,
        F: FnOnce() -> Result<(), E>,
    {
        self.capture(Operation::Deleted, actor, record)?;
        delete().map_err(HookError::Mutation)
    }

    fn after_persist<T, E, F>(
        &self,
        operation: Operation,
        actor: ActorId,
        persist: F,
    ) -> Result<T, HookError<E>>
    where
        T: Auditable,
        E: std::error::Error,
        F: FnOnce() -> Result<T, E>,
    {
        let instance = persist().map_err(HookError::Mutation)?;
        self.capture(operation, actor, &instance)?;
        Ok(instance)
    }

    fn capture<T>(&self, operation: Operation, actor: ActorId, instance: &T) -> AuditResult<()>
    where
        T: Auditable,
    {
        let record = AuditRecord::new(
            operation,
            actor,
            T::kind(),
            instance.record_id(),
            instance.display_text(),
        );
        let severity = self.severities.severity_for(operation);
        let line = format!(
            "{} {}: {}",
            record.target_kind, record.target_id, record.message
        );

        // Emitted before the append: the line must exist even when the
        // store is unreachable.
        self.sink.emit(severity, &line);

        match self.store.append(&record) {
            Ok(()) => Ok(()),
            Err(e) => match self.failure_policy {
                AuditFailurePolicy::Propagate => Err(e),
                AuditFailurePolicy::LogAndContinue => {
                    self.sink
                        .emit(Severity::Error, &format!("audit append failed: {e} ({line})"));
                    Ok(())
                },
            },
        }
    }
}

impl std::fmt::Debug for AuditInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditInterceptor")
            .field("severities", &self.severities)
            .field("failure_policy", &self.failure_policy)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AuditInterceptor`].
pub struct AuditInterceptorBuilder {
    store: Arc<dyn AuditStore>,
    sink: Option<Arc<dyn LogSink>>,
    severities: SeverityMap,
    failure_policy: AuditFailurePolicy,
}

impl AuditInterceptorBuilder {
    /// Use a custom log sink instead of [`TracingLogSink`].
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Use a custom operation-to-severity mapping.
    #[must_use]
    pub fn severities(mut self, severities: SeverityMap) -> Self {
        self.severities = severities;
        self
    }

    /// Set the behavior for audit append failures.
    #[must_use]
    pub fn failure_policy(mut self, policy: AuditFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Finish building the interceptor.
    #[must_use]
    pub fn build(self) -> AuditInterceptor {
        AuditInterceptor {
            store: self.store,
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingLogSink)),
            severities: self.severities,
            failure_policy: self.failure_policy,
        }
    }
}
