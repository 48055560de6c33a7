//! Audit store trait and the built-in backends.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{AuditError, AuditResult};
use crate::record::AuditRecord;

/// Durable, append-only destination for audit records.
///
/// Implementations must be thread-safe. The interceptor only ever appends;
/// no read or query interface is required of a backend.
pub trait AuditStore: Send + Sync {
    /// Append one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    fn append(&self, record: &AuditRecord) -> AuditResult<()>;
}

/// In-memory backend for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far, in append order.
    #[must_use]
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of records appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no record has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditStore for MemoryAuditStore {
    fn append(&self, record: &AuditRecord) -> AuditResult<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }
}

/// Append-only JSON-lines backend.
///
/// One record per line, flushed before `append` returns. The file is only
/// ever opened in append mode, so restarts extend the existing trail.
pub struct JsonlAuditStore {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlAuditStore {
    /// Open or create the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened for appending.
    pub fn open(path: impl AsRef<Path>) -> AuditResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| AuditError::Store(e.to_string()))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Path of the underlying log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditStore for JsonlAuditStore {
    fn append(&self, record: &AuditRecord) -> AuditResult<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| AuditError::Serialization(e.to_string()))?;

        let mut file = self
            .file
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{line}").map_err(|e| AuditError::Store(e.to_string()))?;
        file.flush().map_err(|e| AuditError::Store(e.to_string()))
    }
}

impl std::fmt::Debug for JsonlAuditStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlAuditStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Operation;
    use larder_core::{ActorId, RecordId, RecordKind};

    fn sample(operation: Operation, title: &str) -> AuditRecord {
        AuditRecord::new(
            operation,
            ActorId::new(1),
            RecordKind::new("recipe"),
            RecordId::new(5),
            title,
        )
    }

    #[test]
    fn test_memory_store_preserves_append_order() {
        let store = MemoryAuditStore::new();
        assert!(store.is_empty());

        store.append(&sample(Operation::Created, "Borscht")).unwrap();
        store.append(&sample(Operation::Updated, "Beet Borscht")).unwrap();

        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "Created Borscht");
        assert_eq!(records[1].message, "Updated Beet Borscht");
    }

    #[test]
    fn test_jsonl_store_appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        let store = JsonlAuditStore::open(&path).unwrap();
        store.append(&sample(Operation::Created, "Borscht")).unwrap();
        store.append(&sample(Operation::Deleted, "Borscht")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let records: Vec<AuditRecord> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].operation, Operation::Created);
        assert_eq!(records[1].operation, Operation::Deleted);
    }

    #[test]
    fn test_jsonl_store_reopen_extends_trail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        {
            let store = JsonlAuditStore::open(&path).unwrap();
            store.append(&sample(Operation::Created, "Borscht")).unwrap();
        }
        {
            let store = JsonlAuditStore::open(&path).unwrap();
            store.append(&sample(Operation::Updated, "Borscht")).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
