//! Metadata of a single field or association.

use serde::{Deserialize, Serialize};

use crate::errors::SchemaError;

/// Describes one property of a resource: its name and whether an equality
/// index exists for it. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyMetadata {
    name: String,
    #[serde(default, rename = "index", skip_serializing_if = "is_false")]
    indexed: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl PropertyMetadata {
    /// Create property metadata. Fails when `name` is empty.
    pub fn new(name: impl Into<String>, indexed: bool) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::EmptyPropertyName);
        }
        Ok(Self { name, indexed })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the property carries an equality index, i.e. the resource
    /// answers `?{name}={value}` queries for it.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Validate a deserialized description. Serde fills the struct directly,
    /// so the empty-name check has to run after decoding.
    pub(crate) fn validated(self) -> Result<Self, SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::EmptyPropertyName);
        }
        Ok(self)
    }
}
