//! Lazy, index-addressable view over one plural association.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use mirage_commons::{ObjectStub, Selector};

use crate::client::MirageClient;
use crate::error::{MirageLinkError, Result};
use crate::proxy::Proxy;

/// Collection view with a fixed size and a per-index cache.
///
/// The size is whatever the owning record declared; it is trusted, not
/// re-validated against the association's real length. Cache entries live as
/// long as the collection; there is no eviction.
pub struct CollectionProxy {
    owner: ObjectStub,
    association: String,
    size: u64,
    // None = the server answered 404 for this index; indistinguishable from
    // out-of-range at this layer.
    cache: Mutex<HashMap<u64, Option<Arc<Proxy>>>>,
}

impl CollectionProxy {
    pub fn new(owner: ObjectStub, association: String, size: u64) -> Self {
        Self {
            owner,
            association,
            size,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn association(&self) -> &str {
        &self.association
    }

    /// The `index`-th element. Fetches through the client on first access;
    /// a missing element caches and returns `None` rather than erroring.
    pub async fn at(&self, index: u64, client: &MirageClient) -> Result<Option<Arc<Proxy>>> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.get(&index) {
            return Ok(cached.clone());
        }
        let fetched = match client
            .fetch_related_object(&self.owner, &self.association, index)
            .await
        {
            Ok(proxy) => Some(proxy),
            Err(MirageLinkError::MissingResource(_)) => None,
            Err(err) => return Err(err),
        };
        cache.insert(index, fetched.clone());
        Ok(fetched)
    }

    /// Fetch a batch of elements in one request, in request order. The
    /// server drops misses silently, so the result can be shorter than the
    /// selector; elements are cached per index only when nothing was
    /// dropped (otherwise the index correspondence is unknown).
    pub async fn slice(&self, selector: &Selector, client: &MirageClient) -> Result<Vec<Arc<Proxy>>> {
        let elements = client
            .fetch_related_objects(&self.owner, &self.association, selector)
            .await?;
        let indices = selector.indices();
        if elements.len() == indices.len() {
            let mut cache = self.cache.lock().await;
            for (index, element) in indices.into_iter().zip(elements.iter()) {
                cache.insert(index, Some(Arc::clone(element)));
            }
        }
        Ok(elements)
    }

    /// The first element, or `None` for an empty collection.
    pub async fn first(&self, client: &MirageClient) -> Result<Option<Arc<Proxy>>> {
        if self.size == 0 {
            return Ok(None);
        }
        self.at(0, client).await
    }

    /// The last element, or `None` for an empty collection.
    pub async fn last(&self, client: &MirageClient) -> Result<Option<Arc<Proxy>>> {
        if self.size == 0 {
            return Ok(None);
        }
        self.at(self.size - 1, client).await
    }

    /// All elements via a single batch request. An empty collection yields
    /// an empty vector with no request at all.
    pub async fn to_vec(&self, client: &MirageClient) -> Result<Vec<Arc<Proxy>>> {
        if self.size == 0 {
            return Ok(Vec::new());
        }
        let all = Selector::range(0, self.size - 1)
            .map_err(MirageLinkError::Selector)?;
        self.slice(&all, client).await
    }
}
