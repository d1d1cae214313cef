//! Wire record shapes shared by the server serializer and the client.
//!
//! A full object record is dynamic (its keys depend on the resource schema)
//! and travels as a plain JSON object; only the two fixed shapes that appear
//! inside it are typed here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Minimal identity of an object: the `{id, type}` pair.
///
/// This is the shape a singular association carries on the wire, and the key
/// the proxy cache deduplicates on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ObjectStub {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ObjectStub {
    pub fn new(id: u64, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }

    /// Read a stub out of a raw JSON value, if both keys are present and
    /// well-typed.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = object.get("id")?.as_u64()?;
        let kind = object.get("type")?.as_str()?;
        Some(Self::new(id, kind))
    }
}

/// The shape a plural association takes in an object record: a count, never
/// inlined elements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssociationCount {
    pub count: u64,
}
