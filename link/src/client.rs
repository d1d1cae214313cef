//! Main MirageDB client with builder pattern.
//!
//! The client's operation surface is generated from schema metadata: either
//! supplied up front, or fetched from the server's `/metadata` endpoint on
//! first use. Configuration happens exactly once and is permanent for the
//! client's lifetime, and so is everything derived from it — the dispatch
//! surface, the proxy factory, and the identity cache.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use serde_json::Value;
use tokio::sync::OnceCell;

use mirage_commons::{AssociationCount, Metadata, ObjectStub, Selector, METADATA_PATH};

use crate::error::{MirageLinkError, Result};
use crate::proxy::Proxy;
use crate::proxy_factory::ProxyFactory;
use crate::surface::Surface;
use crate::transport::{HttpTransport, Transport};

/// Everything derived from the schema, built once at configuration time.
struct ClientCore {
    metadata: Metadata,
    surface: Surface,
    factory: ProxyFactory,
}

impl ClientCore {
    fn new(metadata: Metadata, use_cache: bool) -> Self {
        let surface = Surface::new(&metadata);
        let factory = if use_cache {
            ProxyFactory::new(&metadata)
        } else {
            ProxyFactory::without_cache(&metadata)
        };
        Self {
            metadata,
            surface,
            factory,
        }
    }

    /// Map a decoded body through the factory: arrays element-wise, a single
    /// record directly.
    fn build_many(&self, body: Value) -> Result<Vec<Arc<Proxy>>> {
        match body {
            Value::Array(records) => records
                .iter()
                .map(|record| self.factory.build(record))
                .collect(),
            single => Ok(vec![self.factory.build(&single)?]),
        }
    }
}

/// MirageDB client.
///
/// Use [`MirageClient::builder`] to construct instances.
///
/// # Examples
///
/// ```rust,no_run
/// use mirage_link::MirageClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MirageClient::builder()
///     .base_url("http://localhost:4567")
///     .timeout(std::time::Duration::from_secs(30))
///     .build()?;
///
/// let mercedes = &client.find_by("Car", "brand", "Mercedes 300").await?[0];
/// let drivers = mercedes.plural("drivers")?;
/// if let Some(first) = drivers.first(&client).await? {
///     println!("first driver: {:?}", first.field("name"));
/// }
/// # Ok(())
/// # }
/// ```
pub struct MirageClient {
    transport: Arc<dyn Transport>,
    core: OnceCell<ClientCore>,
    use_cache: bool,
}

impl MirageClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> MirageClientBuilder {
        MirageClientBuilder::new()
    }

    /// The schema the client is configured with, fetching it from the
    /// metadata endpoint first if necessary.
    pub async fn metadata(&self) -> Result<&Metadata> {
        Ok(&self.ensure_configured().await?.metadata)
    }

    /// Configure the client from the metadata endpoint if it was not
    /// configured up front. At most one fetch ever happens; afterwards the
    /// surface is permanent.
    async fn ensure_configured(&self) -> Result<&ClientCore> {
        self.core
            .get_or_try_init(|| async {
                debug!("[LINK] fetching schema from {METADATA_PATH}");
                let body = self.get_parsed(METADATA_PATH).await?;
                let metadata = Metadata::from_value(body)?;
                info!(
                    "[LINK] configured from metadata endpoint: {} resources",
                    metadata.resources().len()
                );
                Ok(ClientCore::new(metadata, self.use_cache))
            })
            .await
    }

    /// Issue one GET and apply the uniform status mapping: 200 decodes,
    /// 404 is a missing resource, anything else is an API error.
    async fn get_parsed(&self, path: &str) -> Result<Value> {
        let response = self.transport.get(path).await?;
        match response.status {
            200 => Ok(serde_json::from_str(&response.body)?),
            404 => Err(MirageLinkError::MissingResource(path.to_string())),
            status => Err(MirageLinkError::Api(format!(
                "{path} answered with status {status}"
            ))),
        }
    }

    /// Number of stored objects of a resource.
    pub async fn count(&self, resource: &str) -> Result<u64> {
        let core = self.ensure_configured().await?;
        let path = core.surface.count_path(resource)?;
        let body = self.get_parsed(&path).await?;
        let count: AssociationCount = serde_json::from_value(body)?;
        Ok(count.count)
    }

    /// Primary finder: one object by id.
    pub async fn find(&self, resource: &str, id: u64) -> Result<Arc<Proxy>> {
        let core = self.ensure_configured().await?;
        let path = core.surface.finder_path(resource, &Selector::Single(id))?;
        let body = self.get_parsed(&path).await?;
        core.factory.build(&body)
    }

    /// Batch finder: a range or explicit list of ids. Misses are dropped by
    /// the server, so the result can be shorter than the selector.
    pub async fn find_batch(&self, resource: &str, selector: &Selector) -> Result<Vec<Arc<Proxy>>> {
        let core = self.ensure_configured().await?;
        let path = core.surface.finder_path(resource, selector)?;
        let body = self.get_parsed(&path).await?;
        core.build_many(body)
    }

    /// Finder by indexed property value. Empty result is an empty list.
    pub async fn find_by(&self, resource: &str, property: &str, value: &str) -> Result<Vec<Arc<Proxy>>> {
        let core = self.ensure_configured().await?;
        let path = core.surface.property_finder_path(resource, property, value)?;
        let body = self.get_parsed(&path).await?;
        core.build_many(body)
    }

    /// Current length of a plural association.
    pub async fn association_count(&self, resource: &str, id: u64, association: &str) -> Result<u64> {
        let core = self.ensure_configured().await?;
        let path = core.surface.association_count_path(resource, id, association)?;
        let body = self.get_parsed(&path).await?;
        let count: AssociationCount = serde_json::from_value(body)?;
        Ok(count.count)
    }

    /// Fetch the object a raw stub points at. The stub must carry both `id`
    /// and `type`, and a finder must exist for the type.
    pub async fn fetch_object(&self, stub: &Value) -> Result<Arc<Proxy>> {
        let Some(ObjectStub { id, kind }) = ObjectStub::from_value(stub) else {
            return Err(MirageLinkError::Api(format!("the object stub is invalid: {stub}")));
        };
        self.find(&kind, id).await
    }

    /// Fetch the `index`-th element of an association of `owner`.
    pub async fn fetch_related_object(
        &self,
        owner: &ObjectStub,
        association: &str,
        index: u64,
    ) -> Result<Arc<Proxy>> {
        let core = self.ensure_configured().await?;
        let path = core
            .surface
            .association_path(&owner.kind, owner.id, association, &Selector::Single(index))?;
        let body = self.get_parsed(&path).await?;
        core.factory.build(&body)
    }

    /// Fetch a batch of association elements in one request.
    pub async fn fetch_related_objects(
        &self,
        owner: &ObjectStub,
        association: &str,
        selector: &Selector,
    ) -> Result<Vec<Arc<Proxy>>> {
        let core = self.ensure_configured().await?;
        let path = core
            .surface
            .association_path(&owner.kind, owner.id, association, selector)?;
        let body = self.get_parsed(&path).await?;
        core.build_many(body)
    }
}

/// Builder for [`MirageClient`].
pub struct MirageClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    metadata: Option<Metadata>,
    transport: Option<Arc<dyn Transport>>,
    use_cache: bool,
}

impl MirageClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            metadata: None,
            transport: None,
            use_cache: true,
        }
    }

    /// Server root, e.g. `http://localhost:4567`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-request timeout for the built-in HTTP transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Supply the schema up front instead of fetching it lazily from the
    /// metadata endpoint.
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Replace the HTTP transport, e.g. with a test fake.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Disable the identity cache; every build constructs a fresh proxy.
    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }

    pub fn build(self) -> Result<MirageClient> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let base_url = self
                    .base_url
                    .ok_or_else(|| MirageLinkError::InvalidUrl("base_url is required".to_string()))?;
                Arc::new(HttpTransport::new(&base_url, self.timeout)?)
            }
        };
        let use_cache = self.use_cache;
        let core = match self.metadata {
            Some(metadata) => OnceCell::new_with(Some(ClientCore::new(metadata, use_cache))),
            None => OnceCell::new(),
        };
        Ok(MirageClient {
            transport,
            core,
            use_cache,
        })
    }
}

impl Default for MirageClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
