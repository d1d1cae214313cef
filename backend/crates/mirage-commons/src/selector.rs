//! Batch addressing grammar.
//!
//! One textual convention addresses one or more elements in a single request,
//! and it applies identically to top-level object ids and to association
//! indices:
//!
//! * `a..b` — inclusive ascending range (both bounds all digits),
//! * anything containing `,` — explicit ordered list, duplicates preserved,
//! * otherwise — a single non-negative integer.

use std::fmt;
use std::str::FromStr;

use crate::errors::SelectorError;

/// Upper bound on the number of elements one selector may address. A range
/// is rejected at construction when it spans more; lists are naturally
/// bounded by the request line.
pub const MAX_BATCH_LEN: u64 = 4096;

/// A parsed id/index selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// One element.
    Single(u64),
    /// Inclusive range `start..end`.
    Range { start: u64, end: u64 },
    /// Explicit list in request order; duplicates and arbitrary order kept.
    List(Vec<u64>),
}

impl Selector {
    /// Inclusive ascending range. Reversed bounds are rejected, and so are
    /// ranges spanning more than [`MAX_BATCH_LEN`] elements.
    pub fn range(start: u64, end: u64) -> Result<Self, SelectorError> {
        if start > end {
            return Err(SelectorError::ReversedRange { start, end });
        }
        if end - start >= MAX_BATCH_LEN {
            return Err(SelectorError::OversizedRange {
                start,
                end,
                limit: MAX_BATCH_LEN,
            });
        }
        Ok(Self::Range { start, end })
    }

    pub fn list(indices: impl Into<Vec<u64>>) -> Self {
        Self::List(indices.into())
    }

    /// True for range and list selectors, whose responses are arrays.
    pub fn is_batch(&self) -> bool {
        !matches!(self, Self::Single(_))
    }

    /// The addressed sequence, in request order, never longer than
    /// [`MAX_BATCH_LEN`].
    pub fn indices(&self) -> Vec<u64> {
        match self {
            Self::Single(index) => vec![*index],
            Self::Range { start, end } => {
                (*start..=*end).take(MAX_BATCH_LEN as usize).collect()
            }
            Self::List(indices) => indices.clone(),
        }
    }

    /// Number of addressed elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Range { start, end } => {
                end.saturating_sub(*start).saturating_add(1).min(MAX_BATCH_LEN) as usize
            }
            Self::List(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::List(indices) if indices.is_empty())
    }
}

fn parse_index(text: &str) -> Result<u64, SelectorError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SelectorError::InvalidIndex(text.to_string()));
    }
    text.parse()
        .map_err(|_| SelectorError::InvalidIndex(text.to_string()))
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if let Some((start, end)) = text.split_once("..") {
            let start = parse_index(start)?;
            let end = parse_index(end)?;
            return Self::range(start, end);
        }
        if text.contains(',') {
            let indices = text
                .split(',')
                .map(parse_index)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::List(indices));
        }
        Ok(Self::Single(parse_index(text)?))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(index) => write!(f, "{index}"),
            Self::Range { start, end } => write!(f, "{start}..{end}"),
            Self::List(indices) => {
                let mut first = true;
                for index in indices {
                    if !first {
                        write!(f, ",")?;
                    }
                    write!(f, "{index}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl From<u64> for Selector {
    fn from(index: u64) -> Self {
        Self::Single(index)
    }
}
