//! # mirage-link: MirageDB Client Library
//!
//! Reconstructs a navigable, lazily-resolved mirror of a server-side object
//! graph from REST responses.
//!
//! ## Features
//!
//! - **Generated surface**: finders, counts, and association accessors are
//!   derived from schema metadata — supplied up front or fetched once from
//!   the server's `/metadata` endpoint
//! - **Lazy association resolution**: singular associations resolve on first
//!   access and memoize; plural associations are sized, index-addressable
//!   collections that fetch per element or per batch
//! - **Batch addressing**: single index, inclusive range (`0..9`), or
//!   explicit list (`4,2,7`) in one request, misses dropped silently
//! - **Identity dedup**: one proxy instance per `(id, type)` for the
//!   client's lifetime
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mirage_link::MirageClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MirageClient::builder()
//!         .base_url("http://localhost:4567")
//!         .build()?;
//!
//!     let car = client.find("Car", 1).await?;
//!     if let Some(owner) = car.singular("owner", &client).await? {
//!         println!("owner: {:?}", owner.field("name"));
//!     }
//!     for driver in car.plural("drivers")?.to_vec(&client).await? {
//!         println!("driver: {:?}", driver.field("name"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod collection_proxy;
pub mod error;
pub mod proxy;
pub mod proxy_cache;
pub mod proxy_factory;
pub mod surface;
pub mod transport;

// Re-export main types for convenience
pub use client::{MirageClient, MirageClientBuilder};
pub use collection_proxy::CollectionProxy;
pub use error::{MirageLinkError, Result};
pub use proxy::{Proxy, ProxyBuilder};
pub use proxy_cache::ProxyCache;
pub use proxy_factory::ProxyFactory;
pub use surface::Surface;
pub use transport::{HttpTransport, Transport, TransportResponse};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
