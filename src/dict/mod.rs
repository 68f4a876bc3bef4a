//! Insertion-ordered dictionaries with data-reshaping operations.
//!
//! This module provides [`SuperDict`], an insertion-ordered map with a set of
//! one-call reshaping operations, and the dynamic value model used when the
//! shape of the data is only known at runtime:
//!
//! - [`SuperDict<K, V>`]: the map itself; the generic operations (filtering,
//!   cleaning, defaults, mapping, sorting, list inversion) work for any
//!   hashable `K`
//! - [`Key`] / [`Scalar`]: hashable scalar or tuple keys
//! - [`Value`]: scalars, tuples, lists and nested dictionaries
//! - [`Dict`]: `SuperDict<Key, Value>`, the dynamic dictionary on which the
//!   nesting, path and regrouping operations are defined
//!
//! # Examples
//!
//! ## Flattening and nesting
//!
//! ```rust
//! use tupdict::dict::{Dict, Key, Value};
//!
//! let flat: Dict = [
//!     (Key::from(("a", "b")), Value::from(1)),
//!     (Key::from(("b", "c")), Value::from(0)),
//!     (Key::from("c"), Value::from(1)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let nested = flat.to_nested();
//! assert_eq!(nested.to_string(), "{a: {b: 1}, b: {c: 0}, c: 1}");
//!
//! let again = nested.flatten_to_tuples();
//! assert_eq!(again.get(&Key::from(("a", "b"))), Some(&Value::from(1)));
//! assert_eq!(again.get(&Key::tuple(["c"])), Some(&Value::from(1)));
//! ```
//!
//! ## Generic operations
//!
//! ```rust
//! use tupdict::dict::SuperDict;
//!
//! let dict: SuperDict<&str, i32> = [("a", 1), ("b", 0), ("c", 1)].into_iter().collect();
//!
//! assert_eq!(dict.clean(&0).keys_list(), vec!["a", "c"]);
//! assert_eq!(dict.filter(["a", "b"]).unwrap().values_list(), vec![1, 0]);
//! assert!(dict.filter(["z"]).is_err());
//! ```
//!
//! # Index Hasher
//!
//! Dictionaries with more than a handful of entries keep a hash index next to
//! their entries. The hasher is chosen at compile time:
//!
//! - `fxhash` feature: `rustc_hash::FxBuildHasher`
//! - `ahash` feature: `ahash::RandomState`
//! - otherwise: the standard library `RandomState`

// =============================================================================
// Index Hasher Type Alias
// =============================================================================

/// Build hasher of the key index.
#[cfg(feature = "fxhash")]
pub(crate) type IndexHasher = rustc_hash::FxBuildHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub(crate) type IndexHasher = ahash::RandomState;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub(crate) type IndexHasher = std::collections::hash_map::RandomState;

mod error;
mod key;
mod nested;
mod reshape;
#[cfg(feature = "serde")]
mod serde_impl;
mod super_dict;
mod value;

pub use error::DictError;
pub use error::IndexingError;
pub use error::MissingKeyError;
pub use key::HashableFloat;
pub use key::Key;
pub use key::Scalar;
pub use key::TUPLE_INLINE_CAPACITY;
pub use key::TupleKey;
pub use super_dict::SortOrder;
pub use super_dict::SuperDict;
pub use super_dict::SuperDictIntoIterator;
pub use super_dict::SuperDictIterator;
pub use value::Value;

/// The dynamic dictionary: [`Key`] keys, [`Value`] values.
pub type Dict = SuperDict<Key, Value>;

// Dictionaries cross threads and sit behind caller-owned locks.
static_assertions::assert_impl_all!(Dict: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(SuperDict<String, Vec<i64>>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
