//! Audit configuration.
//!
//! TOML-loadable settings for the interceptor. Every field defaults, so an
//! empty `[audit]` table yields a working configuration; validation runs
//! after parsing and rejects cross-field violations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::interceptor::{AuditFailurePolicy, AuditInterceptor};
use crate::record::SeverityMap;
use crate::store::{AuditStore, JsonlAuditStore, MemoryAuditStore};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not valid TOML for this schema.
    #[error("config parse error: {0}")]
    Parse(String),

    /// A field failed validation.
    #[error("invalid config field {field}: {message}")]
    Validation {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The configured store could not be opened.
    #[error("audit store error: {0}")]
    Store(String),
}

/// Settings for the audit trail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Operation-to-severity mapping for the log side channel.
    pub severities: SeverityMap,
    /// Behavior when an audit append fails after a successful mutation.
    pub failure_policy: AuditFailurePolicy,
    /// Append-only JSONL file for the trail; in-memory when unset.
    pub log_path: Option<PathBuf>,
}

impl AuditConfig {
    /// Parse and validate a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input and
    /// [`ConfigError::Validation`] when a parsed value is rejected.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate a parsed configuration.
    ///
    /// Deletions must map to the strictly highest severity of the three
    /// operations; a mapping that inverts that ordering would silently
    /// demote the most operationally significant event.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.severities;

        if s.deleted <= s.created || s.deleted <= s.updated {
            return Err(ConfigError::Validation {
                field: "severities.deleted".to_owned(),
                message: "deletions must map to the strictly highest severity".to_owned(),
            });
        }

        Ok(())
    }

    /// Build an interceptor from this configuration.
    ///
    /// Uses a [`JsonlAuditStore`] when `log_path` is set and a
    /// [`MemoryAuditStore`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an invalid configuration or
    /// [`ConfigError::Store`] when the log file cannot be opened.
    pub fn build_interceptor(&self) -> Result<AuditInterceptor, ConfigError> {
        self.validate()?;

        let store: Arc<dyn AuditStore> = match &self.log_path {
            Some(path) => Arc::new(
                JsonlAuditStore::open(path).map_err(|e| ConfigError::Store(e.to_string()))?,
            ),
            None => Arc::new(MemoryAuditStore::new()),
        };

        Ok(AuditInterceptor::builder(store)
            .severities(self.severities)
            .failure_policy(self.failure_policy)
            .build())
    }
}
