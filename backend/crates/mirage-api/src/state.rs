//! Shared application state for the REST layer.

use std::collections::HashMap;
use std::sync::Arc;

use mirage_commons::{naming, Metadata, ResourceMetadata};

use crate::store::GraphStore;

/// State shared across all handlers.
///
/// The dispatch table is built once from the schema: handlers look a resource
/// up by the derived path segment (`Car` is served at `/cars`) instead of
/// relying on per-resource generated routes, so an unknown segment is just a
/// table miss answered with 404.
pub struct AppState {
    metadata: Arc<Metadata>,
    resources: HashMap<String, ResourceMetadata>,
    store: Arc<dyn GraphStore>,
}

impl AppState {
    pub fn new(metadata: Arc<Metadata>, store: Arc<dyn GraphStore>) -> Self {
        let resources = metadata
            .resources()
            .iter()
            .map(|resource| (naming::segment(resource.name()), resource.clone()))
            .collect();
        Self {
            metadata,
            resources,
            store,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Resource metadata by path segment, e.g. `cars`.
    pub fn resource(&self, segment: &str) -> Option<&ResourceMetadata> {
        self.resources.get(segment)
    }

    /// Resource metadata by type name, e.g. `Car`; association element stubs
    /// carry type names, not segments.
    pub fn resource_by_name(&self, name: &str) -> Option<&ResourceMetadata> {
        self.metadata.resource(name)
    }

    pub fn store(&self) -> &dyn GraphStore {
        self.store.as_ref()
    }
}
