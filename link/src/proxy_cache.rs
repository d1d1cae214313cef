//! Identity map for proxy instances.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use mirage_commons::ObjectStub;

use crate::error::{MirageLinkError, Result};
use crate::proxy::Proxy;

/// Cache keyed by `(id, type)`.
///
/// A given identity is constructed once and reused everywhere it appears in
/// the graph. Entries are added explicitly and never evicted; cached
/// instances stay valid for the owning client's lifetime.
#[derive(Default)]
pub struct ProxyCache {
    entries: Mutex<HashMap<(u64, String), Arc<Proxy>>>,
}

impl ProxyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `(id, type)` signature out of a record or stub. Both keys
    /// must be present and well-typed.
    fn signature(description: &Value) -> Result<(u64, String)> {
        ObjectStub::from_value(description)
            .map(|stub| (stub.id, stub.kind))
            .ok_or_else(|| {
                MirageLinkError::InvalidData(format!(
                    "the description of the object is invalid: {description}"
                ))
            })
    }

    /// Whether the described object is cached.
    pub fn contains(&self, description: &Value) -> Result<bool> {
        let signature = Self::signature(description)?;
        Ok(self.entries.lock().expect("proxy cache poisoned").contains_key(&signature))
    }

    /// The cached instance for a description. Absence is a programmer error
    /// (`contains` first), signaled as `CacheMissed`.
    pub fn get(&self, description: &Value) -> Result<Arc<Proxy>> {
        let signature = Self::signature(description)?;
        self.entries
            .lock()
            .expect("proxy cache poisoned")
            .get(&signature)
            .cloned()
            .ok_or_else(|| {
                MirageLinkError::CacheMissed(format!(
                    "no entry for object id:{} type:{}",
                    signature.0, signature.1
                ))
            })
    }

    /// Store a proxy under its identity.
    pub fn store(&self, proxy: &Arc<Proxy>) {
        self.entries
            .lock()
            .expect("proxy cache poisoned")
            .insert((proxy.id(), proxy.kind().to_string()), Arc::clone(proxy));
    }
}
