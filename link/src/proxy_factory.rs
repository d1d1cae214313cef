//! Dispatches record construction by declared type.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use mirage_commons::Metadata;

use crate::error::{MirageLinkError, Result};
use crate::proxy::{Proxy, ProxyBuilder};
use crate::proxy_cache::ProxyCache;

/// Builds typed proxies from wire records, one builder per resource.
///
/// When a cache is configured the factory owns its population: a record
/// whose `(id, type)` is already cached comes back as the existing instance
/// without re-construction, and every newly built proxy is registered before
/// it is returned.
pub struct ProxyFactory {
    builders: HashMap<String, ProxyBuilder>,
    cache: Option<ProxyCache>,
}

impl ProxyFactory {
    pub fn new(metadata: &Metadata) -> Self {
        Self::with_cache(metadata, Some(ProxyCache::new()))
    }

    pub fn without_cache(metadata: &Metadata) -> Self {
        Self::with_cache(metadata, None)
    }

    fn with_cache(metadata: &Metadata, cache: Option<ProxyCache>) -> Self {
        let builders = metadata
            .resources()
            .iter()
            .map(|resource| {
                (
                    resource.name().to_string(),
                    ProxyBuilder::new(Arc::new(resource.clone())),
                )
            })
            .collect();
        Self { builders, cache }
    }

    /// Build (or reuse) the proxy for one decoded record.
    pub fn build(&self, record: &Value) -> Result<Arc<Proxy>> {
        if let Some(cache) = &self.cache {
            if cache.contains(record)? {
                return cache.get(record);
            }
        }
        let kind = record.get("type").and_then(Value::as_str).unwrap_or_default();
        let builder = self
            .builders
            .get(kind)
            .ok_or_else(|| MirageLinkError::UnknownResource(kind.to_string()))?;
        let proxy = Arc::new(builder.build(record)?);
        if let Some(cache) = &self.cache {
            cache.store(&proxy);
        }
        Ok(proxy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn factory() -> ProxyFactory {
        let metadata = Metadata::parse(
            r#"{
                "Person": {"fields": [{"name": "name", "index": true}]}
            }"#,
        )
        .unwrap();
        ProxyFactory::new(&metadata)
    }

    #[test]
    fn caches_by_identity() {
        let factory = factory();
        let record = json!({"id": 1, "type": "Person", "name": "Robert"});
        let first = factory.build(&record).unwrap();
        // second build of the same identity returns the cached instance,
        // even from a record with different field values
        let second = factory
            .build(&json!({"id": 1, "type": "Person", "name": "changed"}))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.field("name"), Some(&json!("Robert")));
    }

    #[test]
    fn distinct_identities_get_distinct_proxies() {
        let factory = factory();
        let first = factory
            .build(&json!({"id": 1, "type": "Person", "name": "a"}))
            .unwrap();
        let second = factory
            .build(&json!({"id": 2, "type": "Person", "name": "b"}))
            .unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let factory = ProxyFactory::without_cache(
            &Metadata::parse(r#"{"Person": {"fields": [{"name": "name"}]}}"#).unwrap(),
        );
        let result = factory.build(&json!({"id": 1, "type": "Spaceship"}));
        assert!(matches!(result, Err(MirageLinkError::UnknownResource(t)) if t == "Spaceship"));
    }
}
