//! # tupdict
//!
//! Insertion-ordered dictionaries with one-call data reshaping.
//!
//! ## Overview
//!
//! Data-preparation code keeps rewriting the same loops: drop the entries
//! holding a default value, pick a subset of keys, regroup records by one of
//! their fields, turn `(a, b) => v` into `a => {b => v}` and back. This crate
//! packages those loops as methods on an insertion-ordered map:
//!
//! - **[`SuperDict<K, V>`](dict::SuperDict)**: generic operations (filter,
//!   clean, defaults, sort, map, list inversion) for any hashable key
//! - **[`Dict`](dict::Dict)**: `SuperDict<Key, Value>`, dynamic keys and
//!   values, with nesting, path access, deep merge and regrouping
//! - **[`TupleList`](tuple_list::TupleList)**: the flat row form a
//!   dictionary spreads into
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for every public data type
//! - `fxhash`: use `rustc-hash` for the key index
//! - `ahash`: use `ahash` for the key index
//! - `full`: Enable all features except the hasher choice
//!
//! ## Example
//!
//! ```rust
//! use tupdict::prelude::*;
//! use tupdict::dict;
//!
//! let mut config = dict! { "db" => dict! { "host" => "localhost", "port" => 5432 } };
//! config.merge_update(&dict! { "db" => dict! { "port" => 6543 } });
//!
//! let port = config.get_path(&[Key::from("db"), Key::from("port")]);
//! assert_eq!(port, Some(&Value::from(6543)));
//! assert_eq!(
//!     config.get_path(&[Key::from("db"), Key::from("host")]),
//!     Some(&Value::from("localhost"))
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use tupdict::prelude::*;
/// ```
pub mod prelude {
    pub use crate::dict::*;
    pub use crate::tuple_list::*;
}

pub mod dict;
pub mod tuple_list;
