//! The generated method surface.
//!
//! Instead of materializing per-resource methods at runtime, the client
//! builds one dispatch table from the schema when it is configured: resource
//! name → the operations that exist for it (primary finder, per-indexed-
//! property finders, per-plural-association accessors). Callers look
//! operations up by name; a miss is an API error, mirroring a call to a
//! method that was never generated.

use std::collections::{HashMap, HashSet};

use url::form_urlencoded;

use mirage_commons::{naming, Metadata, Selector};

use crate::error::{MirageLinkError, Result};

/// Operations available for one resource.
#[derive(Debug, Clone)]
struct ResourceOps {
    /// Path segment the resource is served under, e.g. `cars` for `Car`.
    segment: String,
    /// Properties with an equality finder.
    indexed: HashSet<String>,
    /// Plural associations with count/element accessors.
    plural: HashSet<String>,
}

/// The full dispatch table, built once from metadata.
#[derive(Debug, Clone)]
pub struct Surface {
    resources: HashMap<String, ResourceOps>,
}

impl Surface {
    pub fn new(metadata: &Metadata) -> Self {
        let resources = metadata
            .resources()
            .iter()
            .map(|resource| {
                let ops = ResourceOps {
                    segment: naming::segment(resource.name()),
                    indexed: resource
                        .indexed_properties()
                        .map(|p| p.name().to_string())
                        .collect(),
                    plural: resource
                        .plural_associations()
                        .iter()
                        .map(|p| p.name().to_string())
                        .collect(),
                };
                (resource.name().to_string(), ops)
            })
            .collect();
        Self { resources }
    }

    fn ops(&self, resource: &str) -> Result<&ResourceOps> {
        self.resources
            .get(resource)
            .ok_or_else(|| MirageLinkError::Api(format!("the API has no resource '{resource}'")))
    }

    /// Validate the primary finder exists and build its path.
    pub fn finder_path(&self, resource: &str, selector: &Selector) -> Result<String> {
        let ops = self.ops(resource)?;
        Ok(format!("/{}/{selector}", ops.segment))
    }

    /// Validate the count accessor exists and build its path.
    pub fn count_path(&self, resource: &str) -> Result<String> {
        let ops = self.ops(resource)?;
        Ok(format!("/{}", ops.segment))
    }

    /// Validate an indexed-property finder exists and build its path.
    pub fn property_finder_path(&self, resource: &str, property: &str, value: &str) -> Result<String> {
        let ops = self.ops(resource)?;
        if !ops.indexed.contains(property) {
            return Err(MirageLinkError::Api(format!(
                "the API has no finder for '{resource}' by '{property}'"
            )));
        }
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair(property, value)
            .finish();
        Ok(format!("/{}?{query}", ops.segment))
    }

    fn check_association(&self, resource: &str, association: &str) -> Result<&ResourceOps> {
        let ops = self.ops(resource)?;
        if !ops.plural.contains(association) {
            return Err(MirageLinkError::Api(format!(
                "the API has no association accessor '{resource}.{association}'"
            )));
        }
        Ok(ops)
    }

    /// Validate the association count accessor exists and build its path.
    pub fn association_count_path(&self, resource: &str, id: u64, association: &str) -> Result<String> {
        let ops = self.check_association(resource, association)?;
        Ok(format!("/{}/{id}/{association}", ops.segment))
    }

    /// Validate the association element accessor exists and build its path.
    pub fn association_path(
        &self,
        resource: &str,
        id: u64,
        association: &str,
        selector: &Selector,
    ) -> Result<String> {
        let ops = self.check_association(resource, association)?;
        Ok(format!("/{}/{id}/{association}/{selector}", ops.segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Surface {
        let metadata = Metadata::parse(
            r#"{
                "Car": {
                    "fields": [{"name": "brand", "index": true}],
                    "has_one": [{"name": "owner"}],
                    "has_many": [{"name": "drivers"}]
                }
            }"#,
        )
        .unwrap();
        Surface::new(&metadata)
    }

    #[test]
    fn builds_paths_under_derived_segments() {
        let surface = surface();
        assert_eq!(surface.count_path("Car").unwrap(), "/cars");
        assert_eq!(
            surface.finder_path("Car", &Selector::Single(1)).unwrap(),
            "/cars/1"
        );
        assert_eq!(
            surface
                .finder_path("Car", &Selector::range(1, 4).unwrap())
                .unwrap(),
            "/cars/1..4"
        );
        assert_eq!(
            surface.association_count_path("Car", 1, "drivers").unwrap(),
            "/cars/1/drivers"
        );
        assert_eq!(
            surface
                .association_path("Car", 1, "drivers", &Selector::list([1, 0]))
                .unwrap(),
            "/cars/1/drivers/1,0"
        );
    }

    #[test]
    fn url_encodes_finder_values() {
        let path = surface()
            .property_finder_path("Car", "brand", "Mercedes 300")
            .unwrap();
        assert_eq!(path, "/cars?brand=Mercedes+300");
    }

    #[test]
    fn missing_operations_are_api_errors() {
        let surface = surface();
        assert!(matches!(
            surface.count_path("Spaceship"),
            Err(MirageLinkError::Api(_))
        ));
        // owner is declared but not indexed
        assert!(matches!(
            surface.property_finder_path("Car", "owner", "1"),
            Err(MirageLinkError::Api(_))
        ));
        // owner is singular, not a collection
        assert!(matches!(
            surface.association_count_path("Car", 1, "owner"),
            Err(MirageLinkError::Api(_))
        ));
    }
}
