//! Audit-related error types.

use thiserror::Error;

/// Errors that can occur on the audit side of a mutation.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The audit store failed to append a record.
    #[error("audit store error: {0}")]
    Store(String),

    /// A record could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// Error returned by an interceptor hook.
///
/// Separates the two failure modes of an audited mutation: the host
/// delegate failing (in which case no audit record or log line exists),
/// and the audit append failing after the mutation already committed.
#[derive(Debug, Error)]
pub enum HookError<E>
where
    E: std::error::Error,
{
    /// The host's mutation delegate failed. The delegate's error is
    /// carried unchanged; nothing was audited for this operation.
    #[error("mutation failed: {0}")]
    Mutation(E),

    /// The mutation succeeded but the audit record could not be written.
    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl<E> HookError<E>
where
    E: std::error::Error,
{
    /// The host delegate's error, if this was a mutation failure.
    pub fn into_mutation(self) -> Option<E> {
        match self {
            Self::Mutation(e) => Some(e),
            Self::Audit(_) => None,
        }
    }
}
