//! Shared error types for the schema and selector layers.

use thiserror::Error;

/// Errors raised while parsing or validating a schema description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The description could not be structurally parsed.
    #[error("invalid schema description: {0}")]
    InvalidData(String),

    /// A property description carried an empty name.
    #[error("property name cannot be empty")]
    EmptyPropertyName,
}

/// Errors raised by the batch selector grammar.
///
/// The grammar itself (`a..b` range, comma list, single integer) leaves the
/// handling of malformed numeric text open; MirageDB rejects it with a typed
/// error instead of guessing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// A segment was not a non-negative integer.
    #[error("invalid index '{0}'")]
    InvalidIndex(String),

    /// A range had its bounds reversed, e.g. `9..3`.
    #[error("reversed range {start}..{end}")]
    ReversedRange { start: u64, end: u64 },

    /// A range addressed more elements than one request may carry.
    #[error("range {start}..{end} exceeds the batch limit of {limit}")]
    OversizedRange { start: u64, end: u64, limit: u64 },
}
