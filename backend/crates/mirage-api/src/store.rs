//! Backing graph store.
//!
//! The router only ever reads: counts, id lookups, indexed equality scans,
//! and association element access. [`GraphStore`] is the seam those reads go
//! through; [`MemoryStore`] is the bundled implementation, loaded once from a
//! JSON seed document.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use mirage_commons::ObjectStub;

/// Errors raised while loading or reading the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid seed document: {0}")]
    InvalidSeed(String),
}

/// One object as the store keeps it: scalar field values plus association
/// targets by stub. Plural association elements live here in full — the wire
/// layer is what reduces them to counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    pub id: u64,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub has_one: HashMap<String, Option<ObjectStub>>,
    #[serde(default)]
    pub has_many: HashMap<String, Vec<ObjectStub>>,
}

impl StoredObject {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            fields: Map::new(),
            has_one: HashMap::new(),
            has_many: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_one(mut self, name: impl Into<String>, stub: Option<ObjectStub>) -> Self {
        self.has_one.insert(name.into(), stub);
        self
    }

    pub fn with_many(mut self, name: impl Into<String>, stubs: Vec<ObjectStub>) -> Self {
        self.has_many.insert(name.into(), stubs);
        self
    }
}

/// Read access to the object graph the router serves.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Number of stored objects of `resource`.
    async fn count(&self, resource: &str) -> Result<u64, StoreError>;

    /// Fetch one object by id.
    async fn get(&self, resource: &str, id: u64) -> Result<Option<StoredObject>, StoreError>;

    /// All objects whose `property` equals `value` in string form.
    async fn find_by(
        &self,
        resource: &str,
        property: &str,
        value: &str,
    ) -> Result<Vec<StoredObject>, StoreError>;

    /// Current length of a plural association, `None` when the owner does
    /// not exist.
    async fn association_len(
        &self,
        resource: &str,
        id: u64,
        association: &str,
    ) -> Result<Option<u64>, StoreError>;

    /// Stub of the `index`-th element of a plural association.
    async fn association_stub(
        &self,
        resource: &str,
        id: u64,
        association: &str,
        index: u64,
    ) -> Result<Option<ObjectStub>, StoreError>;
}

/// In-memory graph store keyed by resource name and object id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: HashMap<String, BTreeMap<u64, StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a seed document: a JSON object mapping resource names to arrays
    /// of stored objects.
    pub fn from_seed(seed: &str) -> Result<Self, StoreError> {
        let entries: HashMap<String, Vec<StoredObject>> =
            serde_json::from_str(seed).map_err(|e| StoreError::InvalidSeed(e.to_string()))?;
        let mut store = Self::new();
        for (resource, objects) in entries {
            for object in objects {
                store.insert(&resource, object);
            }
        }
        Ok(store)
    }

    pub fn insert(&mut self, resource: &str, object: StoredObject) {
        self.objects
            .entry(resource.to_string())
            .or_default()
            .insert(object.id, object);
    }

    fn of(&self, resource: &str) -> Option<&BTreeMap<u64, StoredObject>> {
        self.objects.get(resource)
    }
}

/// Scalar comparison against the query-string form of a value. Stored
/// strings compare directly; other scalars compare via their JSON rendering.
fn matches_value(stored: &Value, value: &str) -> bool {
    match stored {
        Value::String(s) => s == value,
        other => other.to_string() == value,
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn count(&self, resource: &str) -> Result<u64, StoreError> {
        Ok(self.of(resource).map_or(0, |objects| objects.len() as u64))
    }

    async fn get(&self, resource: &str, id: u64) -> Result<Option<StoredObject>, StoreError> {
        Ok(self.of(resource).and_then(|objects| objects.get(&id)).cloned())
    }

    async fn find_by(
        &self,
        resource: &str,
        property: &str,
        value: &str,
    ) -> Result<Vec<StoredObject>, StoreError> {
        let Some(objects) = self.of(resource) else {
            return Ok(Vec::new());
        };
        Ok(objects
            .values()
            .filter(|object| {
                object
                    .fields
                    .get(property)
                    .is_some_and(|stored| matches_value(stored, value))
            })
            .cloned()
            .collect())
    }

    async fn association_len(
        &self,
        resource: &str,
        id: u64,
        association: &str,
    ) -> Result<Option<u64>, StoreError> {
        let Some(object) = self.of(resource).and_then(|objects| objects.get(&id)) else {
            return Ok(None);
        };
        // Declared but never written associations read as empty.
        Ok(Some(
            object.has_many.get(association).map_or(0, |stubs| stubs.len() as u64),
        ))
    }

    async fn association_stub(
        &self,
        resource: &str,
        id: u64,
        association: &str,
        index: u64,
    ) -> Result<Option<ObjectStub>, StoreError> {
        let Some(object) = self.of(resource).and_then(|objects| objects.get(&id)) else {
            return Ok(None);
        };
        Ok(object
            .has_many
            .get(association)
            .and_then(|stubs| stubs.get(index as usize))
            .cloned())
    }
}
