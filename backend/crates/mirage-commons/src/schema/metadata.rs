//! Parsed schema description: the ordered set of resources.

use serde_json::{Map, Value};

use crate::errors::SchemaError;
use crate::schema::{ResourceMetadata, resource::ResourceDescription};
use crate::SYSTEM_KEY;

/// The full schema of a served object graph.
///
/// Parsed once from a JSON description mapping resource names to their
/// property descriptions; entries under the reserved [`SYSTEM_KEY`] are
/// skipped. Resource order follows the description's own iteration order and
/// is not guaranteed sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    resources: Vec<ResourceMetadata>,
}

impl Metadata {
    /// Parse a textual schema description.
    pub fn parse(description: &str) -> Result<Self, SchemaError> {
        let entries: Map<String, Value> = serde_json::from_str(description)
            .map_err(|e| SchemaError::InvalidData(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Build metadata from an already-decoded description, e.g. the body of
    /// a `/metadata` response.
    pub fn from_value(description: Value) -> Result<Self, SchemaError> {
        match description {
            Value::Object(entries) => Self::from_entries(entries),
            other => Err(SchemaError::InvalidData(format!(
                "schema description must be an object, got {other}"
            ))),
        }
    }

    fn from_entries(entries: Map<String, Value>) -> Result<Self, SchemaError> {
        let mut resources = Vec::with_capacity(entries.len());
        for (name, description) in entries {
            if name == SYSTEM_KEY {
                continue;
            }
            resources.push(ResourceMetadata::new(name, &description)?);
        }
        Ok(Self { resources })
    }

    pub fn resources(&self) -> &[ResourceMetadata] {
        &self.resources
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceMetadata> {
        self.resources.iter().find(|r| r.name() == name)
    }

    /// Serialize the schema back into the description format `parse` accepts.
    /// Served verbatim by the metadata endpoint.
    pub fn dump(&self) -> String {
        serde_json::to_string(&self.to_value()).unwrap_or_else(|_| "{}".to_string())
    }

    /// The description as a JSON value.
    pub fn to_value(&self) -> Value {
        let mut entries = Map::new();
        for resource in &self.resources {
            let description: ResourceDescription = resource.description();
            entries.insert(
                resource.name().to_string(),
                serde_json::to_value(description).unwrap_or(Value::Null),
            );
        }
        Value::Object(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTION: &str = r#"{
        "Car": {
            "fields": [{"name": "brand", "index": true}],
            "has_one": [{"name": "owner"}],
            "has_many": [{"name": "drivers"}]
        },
        "Person": {
            "fields": [{"name": "name", "index": true}, {"name": "surname", "index": true}]
        },
        "Mirage": {"fields": [{"name": "version"}]}
    }"#;

    #[test]
    fn parses_resources_and_skips_system_entry() {
        let metadata = Metadata::parse(DESCRIPTION).unwrap();
        assert_eq!(metadata.resources().len(), 2);
        assert!(metadata.resource("Car").is_some());
        assert!(metadata.resource("Person").is_some());
        assert!(metadata.resource("Mirage").is_none());
    }

    #[test]
    fn unparseable_description_is_invalid_data() {
        assert!(matches!(
            Metadata::parse("not json at all"),
            Err(SchemaError::InvalidData(_))
        ));
        assert!(matches!(
            Metadata::parse(r#"["a list"]"#),
            Err(SchemaError::InvalidData(_))
        ));
    }

    #[test]
    fn dump_round_trips() {
        let metadata = Metadata::parse(DESCRIPTION).unwrap();
        let reparsed = Metadata::parse(&metadata.dump()).unwrap();
        assert_eq!(reparsed, metadata);
    }
}
