//! Metadata of one resource type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SchemaError;
use crate::schema::PropertyMetadata;

/// Raw shape of one resource entry in a schema description. Absent categories
/// mean "none declared".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ResourceDescription {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<PropertyMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub has_one: Vec<PropertyMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub has_many: Vec<PropertyMetadata>,
}

/// Describes one resource type: its scalar fields, singular associations and
/// plural associations. Built once from a schema description entry; immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMetadata {
    name: String,
    fields: Vec<PropertyMetadata>,
    singular_associations: Vec<PropertyMetadata>,
    plural_associations: Vec<PropertyMetadata>,
}

impl ResourceMetadata {
    /// Build resource metadata from the JSON description of one schema entry.
    pub fn new(name: impl Into<String>, description: &Value) -> Result<Self, SchemaError> {
        let description: ResourceDescription = serde_json::from_value(description.clone())
            .map_err(|e| SchemaError::InvalidData(e.to_string()))?;
        Self::from_description(name, description)
    }

    pub(crate) fn from_description(
        name: impl Into<String>,
        description: ResourceDescription,
    ) -> Result<Self, SchemaError> {
        let validate = |properties: Vec<PropertyMetadata>| {
            properties
                .into_iter()
                .map(PropertyMetadata::validated)
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(Self {
            name: name.into(),
            fields: validate(description.fields)?,
            singular_associations: validate(description.has_one)?,
            plural_associations: validate(description.has_many)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[PropertyMetadata] {
        &self.fields
    }

    pub fn singular_associations(&self) -> &[PropertyMetadata] {
        &self.singular_associations
    }

    pub fn plural_associations(&self) -> &[PropertyMetadata] {
        &self.plural_associations
    }

    /// All properties, in category order: fields, then singular, then plural
    /// associations.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyMetadata> {
        self.fields
            .iter()
            .chain(self.singular_associations.iter())
            .chain(self.plural_associations.iter())
    }

    /// Properties an equality index exists for, across all three categories.
    pub fn indexed_properties(&self) -> impl Iterator<Item = &PropertyMetadata> {
        self.properties().filter(|p| p.is_indexed())
    }

    pub fn field(&self, name: &str) -> Option<&PropertyMetadata> {
        self.fields.iter().find(|p| p.name() == name)
    }

    pub fn singular(&self, name: &str) -> Option<&PropertyMetadata> {
        self.singular_associations.iter().find(|p| p.name() == name)
    }

    pub fn plural(&self, name: &str) -> Option<&PropertyMetadata> {
        self.plural_associations.iter().find(|p| p.name() == name)
    }

    pub(crate) fn description(&self) -> ResourceDescription {
        ResourceDescription {
            fields: self.fields.clone(),
            has_one: self.singular_associations.clone(),
            has_many: self.plural_associations.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn car() -> ResourceMetadata {
        ResourceMetadata::new(
            "Car",
            &json!({
                "fields": [{"name": "brand", "index": true}],
                "has_one": [{"name": "owner"}],
                "has_many": [{"name": "drivers"}],
            }),
        )
        .unwrap()
    }

    #[test]
    fn splits_properties_into_categories() {
        let car = car();
        assert_eq!(car.fields().len(), 1);
        assert_eq!(car.singular_associations().len(), 1);
        assert_eq!(car.plural_associations().len(), 1);
        let names: Vec<_> = car.properties().map(|p| p.name()).collect();
        assert_eq!(names, ["brand", "owner", "drivers"]);
    }

    #[test]
    fn indexed_properties_filter_all_categories() {
        let indexed: Vec<_> = car().indexed_properties().map(|p| p.name().to_string()).collect();
        assert_eq!(indexed, ["brand"]);
    }

    #[test]
    fn absent_categories_are_empty() {
        let person =
            ResourceMetadata::new("Person", &json!({"fields": [{"name": "name"}]})).unwrap();
        assert!(person.singular_associations().is_empty());
        assert!(person.plural_associations().is_empty());
    }

    #[test]
    fn empty_property_name_is_rejected() {
        let result = ResourceMetadata::new("Car", &json!({"fields": [{"name": ""}]}));
        assert_eq!(result.unwrap_err(), SchemaError::EmptyPropertyName);
    }

    #[test]
    fn malformed_description_is_invalid_data() {
        let result = ResourceMetadata::new("Car", &json!({"fields": "not-a-list"}));
        assert!(matches!(result, Err(SchemaError::InvalidData(_))));
    }
}
