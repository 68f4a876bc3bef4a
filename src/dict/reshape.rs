//! Regrouping and projection operations.
//!
//! These operations look inside the values (or the tuple keys) of a
//! dictionary and reshape it: projecting one property out of every record,
//! regrouping records by a property or by a key position, measuring values,
//! inverting a dictionary of lists, and spreading a dictionary into a
//! [`TupleList`].
//!
//! The regrouping operations only probe the first entry before starting;
//! anomalies in later entries are reported as they are met.
//!
//! # Examples
//!
//! ```rust
//! use tupdict::dict::{Key, Value};
//! use tupdict::dict;
//!
//! let records = dict! {
//!     "alice" => dict! { "team" => "red", "age" => 31 },
//!     "bob" => dict! { "team" => "blue", "age" => 27 },
//!     "carol" => dict! { "team" => "red" },
//! };
//!
//! let ages = records.get_property(&Key::from("age"));
//! assert_eq!(ages.keys_list(), vec![Key::from("alice"), Key::from("bob")]);
//!
//! let teams = records.index_by_property(&Key::from("team")).unwrap();
//! assert_eq!(teams[&Key::from("red")].len(), 2);
//! assert_eq!(teams[&Key::from("blue")].len(), 1);
//! ```

use super::error::{DictError, IndexingError};
use super::key::Key;
use super::value::Value;
use super::{Dict, SuperDict};
use crate::tuple_list::TupleList;
use std::hash::Hash;

impl<K: Eq + Hash + Clone> SuperDict<K, Value> {
    /// Projects `property` out of every value exposing it.
    ///
    /// Dictionaries expose their keys, lists and tuples their positions (see
    /// [`Value::get`]). Entries whose value does not expose the property are
    /// skipped.
    #[must_use]
    pub fn get_property(&self, property: &Key) -> SuperDict<K, Value> {
        self.iter()
            .filter_map(|(key, value)| {
                value
                    .get(property)
                    .map(|projected| (key.clone(), projected.clone()))
            })
            .collect()
    }
}

impl SuperDict<Key, Value> {
    /// Maps every key to the length of its value.
    ///
    /// # Errors
    ///
    /// Returns [`DictError::TypeMismatch`] for the first value without a
    /// length (anything but strings, lists, tuples and dictionaries).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::Key;
    /// use tupdict::dict;
    ///
    /// let lengths = dict! { "a" => vec![1, 2, 3], "b" => "xy" }.to_length_dict().unwrap();
    /// assert_eq!(lengths.values_list(), vec![3, 2]);
    /// ```
    pub fn to_length_dict(&self) -> Result<SuperDict<Key, usize>, DictError> {
        self.iter()
            .map(|(key, value)| {
                value
                    .len()
                    .map(|length| (key.clone(), length))
                    .ok_or_else(|| DictError::TypeMismatch {
                        key: key.clone(),
                        expected: "a value with a length",
                        found: value.type_name(),
                    })
            })
            .collect()
    }

    /// Regroups the entries by the value of `property` inside each value.
    ///
    /// Properties are looked up as in [`get_property`](Self::get_property).
    /// Each group maps back to the original `key => value` entries sharing
    /// that property value. Groups appear in first-appearance order.
    ///
    /// # Errors
    ///
    /// - [`IndexingError::Empty`] for an empty dictionary
    /// - [`IndexingError::MissingProperty`] if the first value lacks `property`
    /// - [`DictError::TypeMismatch`] if a later value lacks `property`
    /// - [`DictError::Unhashable`] if a property value cannot be a key
    pub fn index_by_property(
        &self,
        property: &Key,
    ) -> Result<SuperDict<Key, Dict>, DictError> {
        let (first_key, first_value) = self.first().ok_or_else(|| {
            tracing::debug!(%property, "index_by_property on an empty dictionary");
            IndexingError::Empty
        })?;
        if !first_value.has_property(property) {
            tracing::debug!(%property, key = %first_key, "first entry lacks the indexed property");
            return Err(IndexingError::MissingProperty {
                property: property.clone(),
                key: first_key.clone(),
            }
            .into());
        }

        let mut groups: SuperDict<Key, Dict> = SuperDict::new();
        for (key, value) in self {
            let group_value = value.get(property).ok_or_else(|| DictError::TypeMismatch {
                key: key.clone(),
                expected: "a value with the indexed property",
                found: value.type_name(),
            })?;
            groups
                .get_or_insert_with(Key::try_from(group_value)?, Dict::new)
                .insert(key.clone(), value.clone());
        }
        Ok(groups)
    }

    /// Same as [`index_by_property`](Self::index_by_property), keeping only
    /// the groups.
    ///
    /// # Errors
    ///
    /// Same as [`index_by_property`](Self::index_by_property).
    pub fn index_by_property_list(&self, property: &Key) -> Result<Vec<Dict>, DictError> {
        self.index_by_property(property).map(SuperDict::into_values)
    }

    /// Inverts a dictionary whose values are lists (or tuples) of hashable
    /// values.
    ///
    /// See [`SuperDict::invert_list_values`] for the typed variant. The
    /// result maps every element to a [`Value::List`] of the keys whose list
    /// contains it.
    ///
    /// # Errors
    ///
    /// - [`DictError::TypeMismatch`] if a value is not a list or tuple
    /// - [`DictError::Unhashable`] if an element cannot be a key
    pub fn try_invert_list_values(&self) -> Result<Self, DictError> {
        let typed: SuperDict<Key, Vec<Key>> = self
            .iter()
            .map(|(key, value)| {
                let elements = value.as_sequence().ok_or_else(|| DictError::TypeMismatch {
                    key: key.clone(),
                    expected: "a list",
                    found: value.type_name(),
                })?;
                let elements = elements
                    .iter()
                    .map(Key::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((key.clone(), elements))
            })
            .collect::<Result<_, DictError>>()?;

        Ok(typed
            .invert_list_values()
            .into_iter()
            .map(|(element, keys)| {
                let keys = keys.into_iter().map(Value::from).collect();
                (element, Value::List(keys))
            })
            .collect())
    }

    /// Spreads the dictionary into a flat list of tuples.
    ///
    /// For each entry the key becomes a tuple (a scalar is wrapped), the value
    /// a list (a non-list is wrapped), and every element of that list a tuple
    /// (a non-tuple is wrapped). One row `key ++ element` is emitted per
    /// element, in entry order then element order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::Value;
    /// use tupdict::dict;
    ///
    /// let rows = dict! {
    ///     ("a", 1) => vec![Value::from("x"), Value::from(("y", 2))],
    ///     "b" => 3,
    /// }
    /// .to_tuple_list();
    ///
    /// assert_eq!(rows.to_string(), "[(a, 1, x), (a, 1, y, 2), (b, 3)]");
    /// ```
    #[must_use]
    pub fn to_tuple_list(&self) -> TupleList<Vec<Value>> {
        let mut rows = TupleList::new();
        for (key, value) in self {
            let key_part: Vec<Value> = key.path().into_iter().map(Value::from).collect();
            let elements = match value {
                Value::List(items) => items.as_slice(),
                single => std::slice::from_ref(single),
            };
            for element in elements {
                let mut row = key_part.clone();
                match element {
                    Value::Tuple(parts) => row.extend(parts.iter().cloned()),
                    scalar => row.push(scalar.clone()),
                }
                rows.push(row);
            }
        }
        rows
    }
}

impl<V: Clone> SuperDict<Key, V> {
    /// Regroups the entries by the element at `position` of their tuple keys.
    ///
    /// Scalar keys count as 1-tuples. Groups appear in first-appearance
    /// order.
    ///
    /// # Errors
    ///
    /// - [`IndexingError::Empty`] for an empty dictionary
    /// - [`IndexingError::PositionOutOfRange`] for the first key too short
    ///   for `position`, checked before any grouping
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::{Key, SuperDict};
    ///
    /// let dict: SuperDict<Key, i32> = [
    ///     (Key::from(("a", 1)), 10),
    ///     (Key::from(("b", 1)), 20),
    ///     (Key::from(("a", 2)), 30),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let by_second = dict.index_by_tuple_position(1).unwrap();
    /// assert_eq!(by_second[&Key::from(1)].values_list(), vec![10, 20]);
    /// assert_eq!(by_second[&Key::from(2)].values_list(), vec![30]);
    /// ```
    pub fn index_by_tuple_position(
        &self,
        position: usize,
    ) -> Result<SuperDict<Key, Self>, IndexingError> {
        let (first_key, _) = self.first().ok_or_else(|| {
            tracing::debug!(position, "index_by_tuple_position on an empty dictionary");
            IndexingError::Empty
        })?;
        if first_key.arity() <= position {
            tracing::debug!(position, key = %first_key, "first key is too short for the position");
            return Err(IndexingError::PositionOutOfRange {
                position,
                key: first_key.clone(),
            });
        }

        let mut groups: SuperDict<Key, Self> = SuperDict::new();
        for (key, value) in self {
            let group_key = key.position(position).ok_or_else(|| {
                tracing::debug!(position, %key, "key is too short for the position");
                IndexingError::PositionOutOfRange {
                    position,
                    key: key.clone(),
                }
            })?;
            groups
                .get_or_insert_with(group_key, Self::new)
                .insert(key.clone(), value.clone());
        }
        Ok(groups)
    }

    /// Same as [`index_by_tuple_position`](Self::index_by_tuple_position),
    /// keeping only the groups.
    ///
    /// # Errors
    ///
    /// Same as [`index_by_tuple_position`](Self::index_by_tuple_position).
    pub fn index_by_tuple_position_list(&self, position: usize) -> Result<Vec<Self>, IndexingError> {
        self.index_by_tuple_position(position)
            .map(SuperDict::into_values)
    }
}
