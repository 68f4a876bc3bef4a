//! Dynamically typed dictionary values.
//!
//! [`Value`] is the tagged variant every dynamic operation of
//! [`Dict`] pattern-matches on: a leaf (`None`, bool, number, string), a
//! sequence (tuple or list), or a nested [`Dict`].
//!
//! Plain nested containers (`BTreeMap`, `HashMap`, `Vec`) convert into
//! `Value` recursively, wrapping every mapping level into a [`Dict`]. This is
//! what [`SuperDict::from_nested`](super::SuperDict::from_nested) relies on.
//!
//! # Examples
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use tupdict::dict::{Key, Value};
//!
//! let inner = BTreeMap::from([("b", 1)]);
//! let outer = BTreeMap::from([("a", inner)]);
//! let value = Value::from(outer);
//!
//! let nested = value.as_dict().unwrap().get(&Key::from("a")).unwrap();
//! assert!(nested.is_dict());
//! assert_eq!(nested.get(&Key::from("b")), Some(&Value::Int(1)));
//! ```

use super::error::DictError;
use super::key::{Key, Scalar};
use super::{Dict, SuperDict};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// A dynamically typed value stored in a [`Dict`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A fixed-size tuple. Expanded in place by
    /// [`SuperDict::to_tuple_list`](super::SuperDict::to_tuple_list).
    Tuple(Vec<Value>),
    /// A list.
    List(Vec<Value>),
    /// A nested dictionary.
    Dict(Dict),
}

impl Value {
    /// Returns the name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Tuple(_) => "tuple",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
        }
    }

    /// Returns `true` if this value is [`Value::None`].
    #[inline]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` if this value is a nested dictionary.
    #[inline]
    #[must_use]
    pub const fn is_dict(&self) -> bool {
        matches!(self, Self::Dict(_))
    }

    /// Returns the nested dictionary, if any.
    #[must_use]
    pub const fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Returns the nested dictionary mutably, if any.
    #[must_use]
    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Returns the elements of a list or tuple.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the boolean, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(boolean) => Some(*boolean),
            _ => None,
        }
    }

    /// Returns the integer, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(integer) => Some(*integer),
            _ => None,
        }
    }

    /// Returns the number as a float; integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(float) => Some(*float),
            Self::Int(integer) => Some(*integer as f64),
            _ => None,
        }
    }

    /// Returns the string slice, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(string) => Some(string),
            _ => None,
        }
    }

    /// Length of the value: characters of a string, elements of a list or
    /// tuple, entries of a dictionary. Other values have no length.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Str(string) => Some(string.chars().count()),
            Self::List(items) | Self::Tuple(items) => Some(items.len()),
            Self::Dict(dict) => Some(dict.len()),
            Self::None | Self::Bool(_) | Self::Int(_) | Self::Float(_) => None,
        }
    }

    /// Looks up one step of a path inside this value.
    ///
    /// Dictionaries are indexed by key; lists and tuples by a non-negative
    /// integer key. Everything else is not indexable and yields `None`.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Self> {
        match self {
            Self::Dict(dict) => dict.get(key),
            Self::List(items) | Self::Tuple(items) => key
                .as_scalar()
                .and_then(Scalar::as_int)
                .and_then(|index| usize::try_from(index).ok())
                .and_then(|index| items.get(index)),
            _ => None,
        }
    }

    /// Returns `true` if [`get`](Self::get) finds `property` in this value.
    #[must_use]
    pub fn has_property(&self, property: &Key) -> bool {
        self.get(property).is_some()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(formatter, "None"),
            Self::Bool(boolean) => write!(formatter, "{boolean}"),
            Self::Int(integer) => write!(formatter, "{integer}"),
            Self::Float(float) => write!(formatter, "{float:?}"),
            Self::Str(string) => write!(formatter, "{string}"),
            Self::Tuple(items) => write_sequence(formatter, items, "(", ")"),
            Self::List(items) => write_sequence(formatter, items, "[", "]"),
            Self::Dict(dict) => write!(formatter, "{dict}"),
        }
    }
}

fn write_sequence(
    formatter: &mut fmt::Formatter<'_>,
    items: &[Value],
    open: &str,
    close: &str,
) -> fmt::Result {
    write!(formatter, "{open}")?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(formatter, ", ")?;
        }
        write!(formatter, "{item}")?;
    }
    if open == "(" && items.len() == 1 {
        write!(formatter, ",")?;
    }
    write!(formatter, "{close}")
}

// =============================================================================
// Conversions into Value
// =============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::None => Self::None,
            Scalar::Bool(boolean) => Self::Bool(boolean),
            Scalar::Int(integer) => Self::Int(integer),
            Scalar::Float(float) => Self::Float(float.get()),
            Scalar::Str(string) => Self::Str(string),
        }
    }
}

impl From<Key> for Value {
    fn from(value: Key) -> Self {
        match value {
            Key::Scalar(scalar) => Self::from(scalar),
            Key::Tuple(elements) => Self::Tuple(elements.into_iter().map(Self::from).collect()),
        }
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Self>, B: Into<Self>> From<(A, B)> for Value {
    fn from((first, second): (A, B)) -> Self {
        Self::Tuple(vec![first.into(), second.into()])
    }
}

impl<A: Into<Self>, B: Into<Self>, C: Into<Self>> From<(A, B, C)> for Value {
    fn from((first, second, third): (A, B, C)) -> Self {
        Self::Tuple(vec![first.into(), second.into(), third.into()])
    }
}

impl<K: Into<Key>, V: Into<Self>> From<SuperDict<K, V>> for Value {
    fn from(value: SuperDict<K, V>) -> Self {
        Self::Dict(Dict::from_nested(value))
    }
}

impl<K: Into<Key>, V: Into<Self>> From<BTreeMap<K, V>> for Value {
    fn from(value: BTreeMap<K, V>) -> Self {
        Self::Dict(Dict::from_nested(value))
    }
}

impl<K, V, S> From<HashMap<K, V, S>> for Value
where
    K: Into<Key> + Eq + Hash,
    V: Into<Self>,
    S: BuildHasher,
{
    fn from(value: HashMap<K, V, S>) -> Self {
        Self::Dict(Dict::from_nested(value))
    }
}

// =============================================================================
// Conversions out of Value
// =============================================================================

impl TryFrom<&Value> for Scalar {
    type Error = DictError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::None => Ok(Self::None),
            Value::Bool(boolean) => Ok(Self::Bool(*boolean)),
            Value::Int(integer) => Ok(Self::Int(*integer)),
            Value::Float(float) => Ok(Self::from(*float)),
            Value::Str(string) => Ok(Self::Str(string.clone())),
            other => Err(DictError::Unhashable {
                found: other.type_name(),
            }),
        }
    }
}

impl TryFrom<&Value> for Key {
    type Error = DictError;

    /// Converts a hashable value into a key. Tuples must hold scalars only.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Tuple(items) => items
                .iter()
                .map(Scalar::try_from)
                .collect::<Result<_, _>>()
                .map(Self::Tuple),
            other => Scalar::try_from(other).map(Self::Scalar),
        }
    }
}

impl TryFrom<Value> for Key {
    type Error = DictError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}
