//! Client-side reconstruction of a remote object.
//!
//! A proxy is built from one wire record and validated against the resource's
//! declared metadata at construction. Scalar fields are copied verbatim;
//! associations stay unresolved until first access — a singular association
//! keeps its raw stub, a plural association keeps only its declared count.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use serde_json::{Map, Value};
use tokio::sync::OnceCell;

use mirage_commons::{ObjectStub, ResourceMetadata};

use crate::client::MirageClient;
use crate::collection_proxy::CollectionProxy;
use crate::error::{MirageLinkError, Result};

/// Deferred singular association: the raw stub from the record, and the
/// memoized resolution. Resolved at most once, never invalidated.
struct SingularSlot {
    stub: Option<Value>,
    resolved: OnceCell<Option<Arc<Proxy>>>,
}

/// Deferred plural association: the count declared by the record (trusted,
/// never re-validated) and the lazily-built collection view.
struct PluralSlot {
    count: u64,
    collection: OnceLock<Arc<CollectionProxy>>,
}

/// One remote object, identified by `(id, type)` for its whole lifetime.
pub struct Proxy {
    id: u64,
    kind: String,
    fields: Map<String, Value>,
    singular: HashMap<String, SingularSlot>,
    plural: HashMap<String, PluralSlot>,
}

impl Proxy {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The resource type name.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn stub(&self) -> ObjectStub {
        ObjectStub::new(self.id, self.kind.clone())
    }

    /// Value of a declared field, copied verbatim from the record.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Resolve a singular association, fetching through the client on first
    /// access and memoizing the result. A null stub resolves to `None`
    /// without any request.
    pub async fn singular(&self, name: &str, client: &MirageClient) -> Result<Option<Arc<Proxy>>> {
        let slot = self.singular.get(name).ok_or_else(|| {
            MirageLinkError::Api(format!("{} has no singular association '{name}'", self.kind))
        })?;
        let resolved = slot
            .resolved
            .get_or_try_init(|| async {
                match &slot.stub {
                    None => Ok(None),
                    Some(stub) => client.fetch_object(stub).await.map(Some),
                }
            })
            .await?;
        Ok(resolved.clone())
    }

    /// The collection view over a plural association, constructed once with
    /// the count the record declared.
    pub fn plural(&self, name: &str) -> Result<Arc<CollectionProxy>> {
        let slot = self.plural.get(name).ok_or_else(|| {
            MirageLinkError::Api(format!("{} has no plural association '{name}'", self.kind))
        })?;
        let collection = slot.collection.get_or_init(|| {
            Arc::new(CollectionProxy::new(self.stub(), name.to_string(), slot.count))
        });
        Ok(Arc::clone(collection))
    }
}

impl std::fmt::Debug for Proxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proxy")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Builds proxies of one resource type, validating records against that
/// type's metadata.
pub struct ProxyBuilder {
    metadata: Arc<ResourceMetadata>,
}

impl ProxyBuilder {
    pub fn new(metadata: Arc<ResourceMetadata>) -> Self {
        Self { metadata }
    }

    /// Construct a proxy from a decoded wire record. Every declared
    /// property must be present with the right shape.
    pub fn build(&self, record: &Value) -> Result<Proxy> {
        let record = record.as_object().ok_or_else(|| {
            MirageLinkError::InvalidData(format!("the record is not an object: {record:?}"))
        })?;
        let id = record
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| missing_key("id", record))?;

        let mut fields = Map::new();
        for field in self.metadata.fields() {
            let value = record
                .get(field.name())
                .ok_or_else(|| missing_key(field.name(), record))?;
            fields.insert(field.name().to_string(), value.clone());
        }

        let mut singular = HashMap::new();
        for association in self.metadata.singular_associations() {
            let value = record
                .get(association.name())
                .ok_or_else(|| missing_key(association.name(), record))?;
            let stub = match value {
                Value::Null => None,
                Value::Object(_) => Some(value.clone()),
                other => {
                    return Err(MirageLinkError::InvalidData(format!(
                        "the association '{}' is not a nested record: {other}",
                        association.name()
                    )))
                }
            };
            singular.insert(
                association.name().to_string(),
                SingularSlot {
                    stub,
                    resolved: OnceCell::new(),
                },
            );
        }

        let mut plural = HashMap::new();
        for association in self.metadata.plural_associations() {
            let value = record
                .get(association.name())
                .ok_or_else(|| missing_key(association.name(), record))?;
            let count = value
                .as_object()
                .and_then(|shape| shape.get("count"))
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    MirageLinkError::InvalidData(format!(
                        "the association '{}' is not a count: {value}",
                        association.name()
                    ))
                })?;
            plural.insert(
                association.name().to_string(),
                PluralSlot {
                    count,
                    collection: OnceLock::new(),
                },
            );
        }

        Ok(Proxy {
            id,
            kind: self.metadata.name().to_string(),
            fields,
            singular,
            plural,
        })
    }
}

fn missing_key(key: &str, record: &Map<String, Value>) -> MirageLinkError {
    MirageLinkError::InvalidData(format!(
        "the key '{key}' is missing in the record: {}",
        Value::Object(record.clone())
    ))
}
