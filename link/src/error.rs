//! Error types for the mirage-link client library.

use thiserror::Error;

use mirage_commons::{SchemaError, SelectorError};

/// Errors surfaced by the client and the proxy graph.
///
/// Protocol-level 404 and non-200 map to `MissingResource` and `Api`;
/// transport failures (timeouts, connection errors) stay distinct and are
/// never mistaken for either.
#[derive(Error, Debug)]
pub enum MirageLinkError {
    /// A single-object or single-index fetch answered 404. Recoverable;
    /// collection access maps it to `None`.
    #[error("missing resource: {0}")]
    MissingResource(String),

    /// A non-200/non-404 status, a malformed object stub, or an operation
    /// that is not part of the generated surface.
    #[error("API error: {0}")]
    Api(String),

    /// A decoded wire record does not match the schema: a required key is
    /// missing or an association value has the wrong shape. Fatal at the
    /// point of construction.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The proxy factory received a type with no registered builder.
    #[error("unknown resource type: {0}")]
    UnknownResource(String),

    /// A cache lookup was performed without first checking existence.
    /// Distinguishes "not in cache" (programmer error) from "resolved to
    /// null" (legitimate absence).
    #[error("cache missed: {0}")]
    CacheMissed(String),

    /// Failure below the protocol: connection, timeout, TLS. Cancellation
    /// and timeout semantics belong entirely to the transport.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("selector error: {0}")]
    Selector(#[from] SelectorError),

    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

/// Result type for mirage-link operations.
pub type Result<T> = std::result::Result<T, MirageLinkError>;
