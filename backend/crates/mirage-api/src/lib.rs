//! # mirage-api
//!
//! The REST layer of MirageDB. The endpoint set is generated from schema
//! metadata at startup: a dispatch table maps resource names to their
//! [`mirage_commons::ResourceMetadata`], and parameterized routes consult it
//! per request. The same selector grammar the client uses addresses single
//! ids, inclusive ranges, and explicit id lists.
//!
//! Protocol answers use exactly two statuses: 200 with a JSON body, or 404
//! with a JSON `null` body (absent object, unsupported query shape, unknown
//! association, malformed selector). A backing-store failure is the one
//! exception and answers 500.

pub mod handlers;
pub mod routes;
pub mod serializer;
pub mod state;
pub mod store;

pub use routes::configure_routes;
pub use state::AppState;
pub use store::{GraphStore, MemoryStore, StoreError, StoredObject};
