//! # mirage-commons
//!
//! Shared types for MirageDB: the schema metadata model, the wire record
//! shapes, and the batch selector grammar.
//!
//! Both sides of the protocol depend on this crate — `mirage-api` generates
//! its endpoint set from [`schema::Metadata`], and `mirage-link` builds its
//! client surface from the same description served at `/metadata`. Keeping
//! the grammar and record shapes in one place is what guarantees the two
//! sides agree on addressing and payloads.

pub mod errors;
pub mod naming;
pub mod records;
pub mod schema;
pub mod selector;

pub use errors::{SchemaError, SelectorError};
pub use records::{AssociationCount, ObjectStub};
pub use schema::{Metadata, PropertyMetadata, ResourceMetadata};
pub use selector::{Selector, MAX_BATCH_LEN};

/// Reserved key in a schema description that carries system bookkeeping
/// rather than a resource. Entries under this key are never exposed.
pub const SYSTEM_KEY: &str = "Mirage";

/// Path of the schema description endpoint, independent of resource routes.
pub const METADATA_PATH: &str = "/metadata";
