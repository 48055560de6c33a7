//! End-to-end flow of a record endpoint composed with the audit trail.
//!
//! Models the host side of the contract: an endpoint that owns its own
//! table and persistence routines, holds an [`AuditInterceptor`], and calls
//! the hook matching each mutating operation.

use std::collections::HashMap;
use std::sync::Arc;

use larder_audit::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
enum RecipeStoreError {
    #[error("recipe {0} not found")]
    NotFound(i64),

    #[error("duplicate title: {0}")]
    DuplicateTitle(String),
}

#[derive(Debug, Clone)]
struct Recipe {
    id: i64,
    title: String,
}

impl Auditable for Recipe {
    fn kind() -> RecordKind {
        RecordKind::new("recipe")
    }

    fn record_id(&self) -> RecordId {
        RecordId::new(self.id)
    }

    fn display_text(&self) -> String {
        self.title.clone()
    }
}

#[derive(Default)]
struct RecipeTable {
    rows: HashMap<i64, Recipe>,
    next_id: i64,
}

impl RecipeTable {
    fn insert(&mut self, title: &str) -> Result<Recipe, RecipeStoreError> {
        if self.rows.values().any(|r| r.title == title) {
            return Err(RecipeStoreError::DuplicateTitle(title.to_string()));
        }

        self.next_id = self.next_id.saturating_add(1);
        let recipe = Recipe {
            id: self.next_id,
            title: title.to_string(),
        };
        self.rows.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    fn update_title(&mut self, id: i64, title: &str) -> Result<Recipe, RecipeStoreError> {
        let row = self
            .rows
            .get_mut(&id)
            .ok_or(RecipeStoreError::NotFound(id))?;
        row.title = title.to_string();
        Ok(row.clone())
    }

    fn delete(&mut self, id: i64) -> Result<(), RecipeStoreError> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RecipeStoreError::NotFound(id))
    }

    fn get(&self, id: i64) -> Option<Recipe> {
        self.rows.get(&id).cloned()
    }
}

/// A record endpoint composed with the interceptor: every mutation goes
/// through the matching hook, with the endpoint's own persistence routine
/// passed as the delegate.
struct RecipeEndpoint {
    table: RecipeTable,
    audit: AuditInterceptor,
}

impl RecipeEndpoint {
    fn new(audit: AuditInterceptor) -> Self {
        Self {
            table: RecipeTable::default(),
            audit,
        }
    }

    fn create(
        &mut self,
        actor: ActorId,
        title: &str,
    ) -> Result<Recipe, HookError<RecipeStoreError>> {
        let table = &mut self.table;
        self.audit.on_create(actor, || table.insert(title))
    }

    fn rename(
        &mut self,
        actor: ActorId,
        id: i64,
        title: &str,
    ) -> Result<Recipe, HookError<RecipeStoreError>> {
        let table = &mut self.table;
        self.audit.on_update(actor, || table.update_title(id, title))
    }

    fn remove(&mut self, actor: ActorId, id: i64) -> Result<(), HookError<RecipeStoreError>> {
        let recipe = self
            .table
            .get(id)
            .ok_or(HookError::Mutation(RecipeStoreError::NotFound(id)))?;
        let table = &mut self.table;
        self.audit.on_destroy(actor, &recipe, || table.delete(id))
    }
}

#[test]
fn crud_flow_writes_one_record_per_mutation() {
    let store = Arc::new(MemoryAuditStore::new());
    let mut endpoint = RecipeEndpoint::new(AuditInterceptor::new(
        Arc::clone(&store) as Arc<dyn AuditStore>
    ));
    let actor = ActorId::new(7);

    let soup = endpoint.create(actor, "Chicken Soup").unwrap();
    let pancakes = endpoint.create(actor, "Pancakes").unwrap();
    endpoint.rename(actor, soup.id, "Chicken Noodle Soup").unwrap();
    endpoint.remove(actor, pancakes.id).unwrap();

    let records = store.records();
    assert_eq!(records.len(), 4);

    let operations: Vec<Operation> = records.iter().map(|r| r.operation).collect();
    assert_eq!(
        operations,
        vec![
            Operation::Created,
            Operation::Created,
            Operation::Updated,
            Operation::Deleted,
        ]
    );

    assert_eq!(records[0].message, "Created Chicken Soup");
    assert_eq!(records[2].message, "Updated Chicken Noodle Soup");
    // Deletion captured the pre-image even though the row is gone now.
    assert_eq!(records[3].message, "Deleted Pancakes");
    assert_eq!(records[3].target_id, RecordId::new(pancakes.id));
    assert!(endpoint.table.get(pancakes.id).is_none());

    assert!(records.iter().all(|r| r.actor_id == actor));
    assert!(records.iter().all(|r| r.target_kind == RecordKind::new("recipe")));
}

#[test]
fn failed_mutations_leave_no_trail() {
    let store = Arc::new(MemoryAuditStore::new());
    let mut endpoint = RecipeEndpoint::new(AuditInterceptor::new(
        Arc::clone(&store) as Arc<dyn AuditStore>
    ));
    let actor = ActorId::new(7);

    endpoint.create(actor, "Chicken Soup").unwrap();

    let err = endpoint.create(actor, "Chicken Soup").unwrap_err();
    assert!(matches!(
        err,
        HookError::Mutation(RecipeStoreError::DuplicateTitle(_))
    ));

    let err = endpoint.remove(actor, 99).unwrap_err();
    assert!(matches!(
        err,
        HookError::Mutation(RecipeStoreError::NotFound(99))
    ));

    assert_eq!(store.len(), 1);
}

#[test]
fn config_built_interceptor_writes_jsonl_trail() {
    // Exercise the default tracing sink alongside the file store.
    let _ = tracing_subscriber::fmt().try_init();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");

    let config = AuditConfig {
        log_path: Some(path.clone()),
        ..AuditConfig::default()
    };

    let mut endpoint = RecipeEndpoint::new(config.build_interceptor().unwrap());
    let actor = ActorId::new(3);

    let soup = endpoint.create(actor, "Chicken Soup").unwrap();
    endpoint.remove(actor, soup.id).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let records: Vec<AuditRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].operation, Operation::Created);
    assert_eq!(records[1].operation, Operation::Deleted);
    assert_eq!(records[1].display_text, "Chicken Soup");
    assert_ne!(records[0].id, records[1].id);
}
