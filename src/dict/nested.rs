//! Nesting, path and merge operations on [`Dict`](super::Dict).
//!
//! A tuple key `(a, b, c)` and the nested form `{a: {b: {c: value}}}` carry
//! the same information. [`SuperDict::to_nested`] and
//! [`SuperDict::flatten_to_tuples`] convert between the two, and
//! [`SuperDict::set_path`] / [`SuperDict::get_path`] address a single leaf
//! through a path of keys.
//!
//! `set_path` and the `merge_update` family mutate the dictionary in place and
//! return `&mut Self` so calls can be chained. The dictionary performs no
//! synchronisation of its own: concurrent callers must hold an exclusive lock.
//!
//! # Examples
//!
//! ```rust
//! use tupdict::dict::{Dict, Key, Value};
//! use tupdict::key;
//!
//! let mut dict = Dict::new();
//! dict.set_path(&[key!("a"), key!("b")], Value::from(1))
//!     .set_path(&[key!("a"), key!("c")], Value::from(2));
//!
//! assert_eq!(dict.get_path(&[key!("a"), key!("c")]), Some(&Value::from(2)));
//! assert_eq!(dict.get_path(&[key!("a"), key!("z")]), None);
//!
//! let mut other = Dict::new();
//! other.set_path(&[key!("a"), key!("b")], Value::from(10));
//! dict.merge_update(&other);
//!
//! assert_eq!(dict.get_path(&[key!("a"), key!("b")]), Some(&Value::from(10)));
//! assert_eq!(dict.get_path(&[key!("a"), key!("c")]), Some(&Value::from(2)));
//! ```

use super::error::DictError;
use super::key::{Key, TupleKey};
use super::value::Value;
use super::SuperDict;

impl SuperDict<Key, Value> {
    /// Wraps a plain, possibly nested mapping into dictionaries at every level.
    ///
    /// Nested `BTreeMap`, `HashMap` and `SuperDict` values become dictionaries;
    /// other values are converted leaf by leaf. Applying it to an existing
    /// `Dict` yields an equal dictionary.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use tupdict::dict::{Dict, Key, Value};
    ///
    /// let plain = BTreeMap::from([("a", BTreeMap::from([("b", 1), ("c", 2)]))]);
    /// let dict = Dict::from_nested(plain);
    ///
    /// let flat = dict.flatten_to_tuples();
    /// assert_eq!(flat.get(&Key::from(("a", "c"))), Some(&Value::from(2)));
    /// assert_eq!(Dict::from_nested(dict.clone()), dict);
    /// ```
    pub fn from_nested<I, K, V>(data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        data.into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect()
    }

    /// Reads every tuple key as a path and builds the nested dictionary.
    ///
    /// Scalar keys stay top-level entries. When two paths collide the later
    /// entry wins, exactly as repeated [`set_path`](Self::set_path) calls.
    /// An empty tuple key addresses nothing and is dropped.
    #[must_use]
    pub fn to_nested(&self) -> Self {
        let mut nested = Self::new();
        for (key, value) in self {
            nested.set_path(&key.path(), value.clone());
        }
        nested
    }

    /// Assigns `value` at the end of `path`, creating nested dictionaries on
    /// the way.
    ///
    /// A missing intermediate key, or one holding anything other than a
    /// dictionary, is replaced by a new empty dictionary. An empty path leaves
    /// the dictionary unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::{Dict, Key, Value};
    /// use tupdict::key;
    ///
    /// let flat: Dict = [
    ///     (key!("a", "b"), Value::from(1)),
    ///     (key!("b", "c"), Value::from(0)),
    ///     (key!("c"), Value::from(1)),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let mut nested = flat.to_nested();
    /// nested.set_path(&[key!("c"), key!("d"), key!("a")], Value::from(1));
    /// assert_eq!(nested.to_string(), "{a: {b: 1}, b: {c: 0}, c: {d: {a: 1}}}");
    /// ```
    pub fn set_path(&mut self, path: &[Key], value: Value) -> &mut Self {
        match path {
            [] => {
                tracing::debug!("set_path called with an empty path");
            }
            [last] => {
                self.insert(last.clone(), value);
            }
            [head, rest @ ..] => {
                let mut child = match self.get_mut(head).map(std::mem::take) {
                    Some(Value::Dict(child)) => child,
                    Some(replaced) => {
                        tracing::trace!(
                            key = %head,
                            replaced = replaced.type_name(),
                            "set_path replaces a non-dictionary value"
                        );
                        Self::new()
                    }
                    None => Self::new(),
                };
                child.set_path(rest, value);
                self.insert(head.clone(), Value::Dict(child));
            }
        }
        self
    }

    /// Flattens nested dictionaries into one level keyed by full-path tuples.
    ///
    /// Leaves are all values that are not dictionaries. A tuple key met
    /// during the walk contributes all of its elements to the path; an empty
    /// nested dictionary contributes nothing.
    #[must_use]
    pub fn flatten_to_tuples(&self) -> Self {
        let mut flat = Self::new();
        let mut path = TupleKey::new();
        self.collect_leaves(&mut path, &mut flat);
        flat
    }

    fn collect_leaves(&self, path: &mut TupleKey, flat: &mut Self) {
        for (key, value) in self {
            let depth = path.len();
            key.extend_path(path);
            match value {
                Value::Dict(child) => child.collect_leaves(path, flat),
                leaf => {
                    flat.insert(Key::Tuple(path.clone()), leaf.clone());
                }
            }
            path.truncate(depth);
        }
    }

    /// Follows `path` through nested values.
    ///
    /// Dictionaries are indexed by key and lists or tuples by a non-negative
    /// integer. Returns `None` when a step is missing or the current value is
    /// not indexable.
    ///
    /// An empty path also gives `None`. The dictionary itself is not a
    /// [`Value`], so it is not returned for an empty path; a `None` here
    /// does not always mean a missing step.
    #[must_use]
    pub fn get_path(&self, path: &[Key]) -> Option<&Value> {
        let (head, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.get(head)?, |current, key| current.get(key))
    }

    /// Deep-merges `other` into `self`.
    ///
    /// When both sides hold a dictionary under the same key they are merged
    /// recursively; otherwise the value from `other` replaces the one in
    /// `self`, whatever their kinds.
    pub fn merge_update(&mut self, other: &Self) -> &mut Self {
        for (key, incoming) in other {
            self.merge_entry(key, incoming);
        }
        self
    }

    /// Deep-merges individual `key => value` overrides into `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::{Dict, Value};
    ///
    /// let mut dict = Dict::new();
    /// dict.merge_update_entries([("a", Value::from(1)), ("b", Value::from(2))]);
    /// assert_eq!(dict.len(), 2);
    /// ```
    pub fn merge_update_entries<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        for (key, incoming) in entries {
            self.merge_entry(&key.into(), &incoming.into());
        }
        self
    }

    /// Deep-merges either a whole mapping or individual overrides.
    ///
    /// # Errors
    ///
    /// Returns [`DictError::ArgumentConflict`] when `mapping` is given together
    /// with a non-empty list of overrides. Nothing is merged in that case.
    pub fn merge_update_with<I, K, V>(
        &mut self,
        mapping: Option<&Self>,
        overrides: I,
    ) -> Result<&mut Self, DictError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        let overrides: Vec<(Key, Value)> = overrides
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        match mapping {
            Some(_) if !overrides.is_empty() => {
                tracing::debug!(
                    overrides = overrides.len(),
                    "merge received a mapping and individual overrides"
                );
                Err(DictError::ArgumentConflict)
            }
            Some(mapping) => Ok(self.merge_update(mapping)),
            None => Ok(self.merge_update_entries(overrides)),
        }
    }

    /// Returns a deep copy of `self` with `other` merged in. `self` is untouched.
    #[must_use]
    pub fn merged_copy(&self, other: &Self) -> Self {
        let mut copy = self.clone();
        copy.merge_update(other);
        copy
    }

    fn merge_entry(&mut self, key: &Key, incoming: &Value) {
        if let (Some(Value::Dict(existing)), Value::Dict(nested)) = (self.get_mut(key), incoming) {
            existing.merge_update(nested);
            return;
        }
        self.insert(key.clone(), incoming.clone());
    }
}

/// Convenience for building a [`Dict`](crate::dict::Dict) from `key => value` pairs.
///
/// Keys go through `Key::from` and values through `Value::from`.
///
/// # Examples
///
/// ```rust
/// use tupdict::dict::{Key, Value};
/// use tupdict::dict;
///
/// let dict = dict! { "a" => 1, ("b", "c") => "x" };
/// assert_eq!(dict.get(&Key::from(("b", "c"))), Some(&Value::from("x")));
/// ```
#[macro_export]
macro_rules! dict {
    () => {
        $crate::dict::Dict::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut dict = $crate::dict::Dict::new();
        $(
            dict.insert($crate::dict::Key::from($key), $crate::dict::Value::from($value));
        )+
        dict
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::Dict;
    use crate::key;
    use rstest::rstest;

    #[rstest]
    fn test_set_path_replaces_leaf_on_the_way() {
        let mut dict = dict! { "a" => 1 };
        dict.set_path(&[key!("a"), key!("b")], Value::from(2));
        assert_eq!(dict.get_path(&[key!("a"), key!("b")]), Some(&Value::from(2)));
    }

    #[rstest]
    fn test_set_path_keeps_siblings_and_position() {
        let mut dict = dict! { "x" => 0, "a" => dict! { "keep" => 1 }, "z" => 0 };
        dict.set_path(&[key!("a"), key!("new")], Value::from(2));
        assert_eq!(dict.keys_list(), vec![key!("x"), key!("a"), key!("z")]);
        assert_eq!(dict.get_path(&[key!("a"), key!("keep")]), Some(&Value::from(1)));
    }

    #[rstest]
    fn test_set_path_empty_is_noop() {
        let mut dict = dict! { "a" => 1 };
        dict.set_path(&[], Value::from(2));
        assert_eq!(dict, dict! { "a" => 1 });
    }

    #[rstest]
    fn test_flatten_splices_tuple_keys() {
        let dict = dict! { ("a", "b") => dict! { "c" => 1 } };
        let flat = dict.flatten_to_tuples();
        assert_eq!(flat.get(&key!("a", "b", "c")), Some(&Value::from(1)));
    }

    #[rstest]
    fn test_flatten_skips_empty_dicts() {
        let dict = dict! { "a" => Dict::new(), "b" => 1 };
        let flat = dict.flatten_to_tuples();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get(&Key::tuple(["b"])), Some(&Value::from(1)));
    }

    #[rstest]
    fn test_get_path_through_list() {
        let dict = dict! { "a" => vec![dict! { "b" => 3 }] };
        assert_eq!(
            dict.get_path(&[key!("a"), key!(0), key!("b")]),
            Some(&Value::from(3))
        );
        assert_eq!(dict.get_path(&[]), None);
        assert_eq!(dict.get_path(&[key!("a"), key!("b")]), None);
    }

    #[rstest]
    fn test_merge_replaces_dict_with_leaf_and_back() {
        let mut dict = dict! { "a" => dict! { "b" => 1 }, "c" => 1 };
        dict.merge_update(&dict! { "a" => 5, "c" => dict! { "d" => 2 } });
        assert_eq!(dict, dict! { "a" => 5, "c" => dict! { "d" => 2 } });
    }

    #[rstest]
    fn test_merge_update_with_conflict() {
        let mut dict = dict! { "a" => 1 };
        let other = dict! { "b" => 2 };
        let result = dict
            .merge_update_with(Some(&other), [("c", 3)])
            .map(|merged| merged.len());
        assert_eq!(result, Err(DictError::ArgumentConflict));
        assert_eq!(dict, dict! { "a" => 1 });
    }

    #[rstest]
    fn test_merge_update_with_either_source() {
        let mut dict = dict! { "a" => 1 };
        dict.merge_update_with(Some(&dict! { "b" => 2 }), Vec::<(Key, Value)>::new())
            .unwrap();
        dict.merge_update_with(None, [("c", 3)]).unwrap();
        assert_eq!(dict, dict! { "a" => 1, "b" => 2, "c" => 3 });
    }
}
