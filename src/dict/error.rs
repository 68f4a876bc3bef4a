//! Error types for dictionary operations.
//!
//! Every fallible operation returns a typed error; nothing is retried or
//! recovered internally. The narrow errors ([`MissingKeyError`],
//! [`IndexingError`]) convert into the crate-wide [`DictError`] so that
//! callers chaining several operations can use `?` throughout.
//!
//! # Examples
//!
//! ```rust
//! use tupdict::dict::{Dict, DictError, Key, Value};
//!
//! fn pick(dict: &Dict) -> Result<Dict, DictError> {
//!     Ok(dict.filter(["a", "z"])?)
//! }
//!
//! let dict: Dict = [("a", 1)].into_iter().map(|(k, v)| (Key::from(k), Value::from(v))).collect();
//! let error = pick(&dict).unwrap_err();
//! assert!(matches!(error, DictError::MissingKey(_)));
//! ```

use super::key::Key;
use thiserror::Error;

/// Raised by [`SuperDict::filter`](super::SuperDict::filter) when requested
/// keys are absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("following elements not in keys: {missing:?}")]
pub struct MissingKeyError<K> {
    /// Every requested key that the dictionary does not contain, in request order.
    pub missing: Vec<K>,
}

impl<K> MissingKeyError<K> {
    /// Creates a new `MissingKeyError`.
    #[must_use]
    pub const fn new(missing: Vec<K>) -> Self {
        Self { missing }
    }
}

/// Raised by the `index_by_*` regrouping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexingError {
    /// The dictionary has no entry to probe.
    #[error("cannot index an empty dictionary")]
    Empty,
    /// The first entry does not carry the property used for grouping.
    #[error("property {property} is not present in element {key}")]
    MissingProperty {
        /// The property that was requested.
        property: Key,
        /// The key of the probed entry.
        key: Key,
    },
    /// A key is too short for the requested tuple position.
    #[error("length of key {key} is smaller than position {position}")]
    PositionOutOfRange {
        /// The requested position.
        position: usize,
        /// The key that is too short.
        key: Key,
    },
}

/// Unified error for the dynamic operations on [`Dict`](super::Dict).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictError {
    /// See [`MissingKeyError`].
    #[error(transparent)]
    MissingKey(#[from] MissingKeyError<Key>),
    /// See [`IndexingError`].
    #[error(transparent)]
    Indexing(#[from] IndexingError),
    /// A merge received both a mapping and individual overrides.
    #[error("a mapping and individual overrides cannot be merged in the same call")]
    ArgumentConflict,
    /// A value does not have the shape the operation needs.
    #[error("value under key {key} is {found}, expected {expected}")]
    TypeMismatch {
        /// Key of the offending entry.
        key: Key,
        /// What the operation needed.
        expected: &'static str,
        /// What it found.
        found: &'static str,
    },
    /// A value had to become a key but is not hashable.
    #[error("{found} value cannot be used as a key")]
    Unhashable {
        /// Type of the offending value.
        found: &'static str,
    },
    /// A tuple row is shorter than the requested key.
    #[error("row of length {row_len} is too short for a key of length {key_len}")]
    RowTooShort {
        /// Length of the offending row.
        row_len: usize,
        /// Requested key length.
        key_len: usize,
    },
}
