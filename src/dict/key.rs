//! Hashable keys for dynamic dictionaries.
//!
//! A [`Key`] is either a single [`Scalar`] or a fixed-size tuple of scalars.
//! Tuple keys are what [`SuperDict::to_nested`](crate::dict::SuperDict::to_nested)
//! reads as paths and what
//! [`SuperDict::flatten_to_tuples`](crate::dict::SuperDict::flatten_to_tuples)
//! produces.
//!
//! # Examples
//!
//! ```rust
//! use tupdict::dict::{Key, Scalar};
//! use tupdict::key;
//!
//! let scalar = Key::from("a");
//! let tuple = key!("a", 1);
//!
//! assert!(!scalar.is_tuple());
//! assert_eq!(tuple.arity(), 2);
//! assert_eq!(tuple.position(1), Some(Key::from(1)));
//! assert_eq!(tuple.path(), vec![Key::from("a"), Key::from(1)]);
//! assert_eq!(Key::Scalar(Scalar::from("a")), scalar);
//! ```

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Number of tuple elements stored inline before a tuple key spills to the heap.
pub const TUPLE_INLINE_CAPACITY: usize = 3;

/// Storage of the elements of a tuple key.
pub type TupleKey = SmallVec<[Scalar; TUPLE_INLINE_CAPACITY]>;

// =============================================================================
// HashableFloat
// =============================================================================

/// An `f64` usable as a key: equality, hashing and ordering all follow the
/// bit pattern under [`f64::total_cmp`].
///
/// `-0.0` is stored as `0.0` and every NaN as the canonical NaN, so equal
/// floats always hash equally.
#[derive(Debug, Clone, Copy)]
pub struct HashableFloat(f64);

impl HashableFloat {
    /// Wraps `value`, normalising signed zero and NaN payloads.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub const fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(f64::NAN)
        } else if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }

    /// Returns the wrapped float.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for HashableFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for HashableFloat {}

impl Hash for HashableFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for HashableFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HashableFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for HashableFloat {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for HashableFloat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:?}", self.0)
    }
}

// =============================================================================
// Scalar
// =============================================================================

/// A hashable scalar: the building block of every [`Key`].
///
/// Integers and floats are distinct: `Int(1)` and `Float(1.0)` are different
/// keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scalar {
    /// The absent value.
    None,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A float.
    Float(HashableFloat),
    /// A string.
    Str(String),
}

impl Scalar {
    /// Returns the name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
        }
    }

    /// Returns the string slice if this scalar is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(string) => Some(string),
            _ => None,
        }
    }

    /// Returns the integer if this scalar is an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(integer) => Some(*integer),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(formatter, "None"),
            Self::Bool(boolean) => write!(formatter, "{boolean}"),
            Self::Int(integer) => write!(formatter, "{integer}"),
            Self::Float(float) => write!(formatter, "{float}"),
            Self::Str(string) => write!(formatter, "{string}"),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(HashableFloat::new(value))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

/// A dictionary key: a scalar or a tuple of scalars.
///
/// Keys are totally ordered (scalars before tuples, then by content) so that
/// [`SuperDict::sorted_keys`](crate::dict::SuperDict::sorted_keys) works on
/// heterogeneous dictionaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A single scalar key.
    Scalar(Scalar),
    /// A tuple of scalars, read as a path by the nesting operations.
    Tuple(TupleKey),
}

impl Key {
    /// Builds a tuple key from its elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::Key;
    ///
    /// let key = Key::tuple(["a", "b"]);
    /// assert_eq!(key.arity(), 2);
    /// ```
    pub fn tuple<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        Self::Tuple(elements.into_iter().map(Into::into).collect())
    }

    /// Returns `true` for tuple keys.
    #[inline]
    #[must_use]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(_))
    }

    /// Returns the scalar if this is a scalar key.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            Self::Tuple(_) => None,
        }
    }

    /// Returns the elements of a tuple key.
    #[must_use]
    pub fn as_tuple(&self) -> Option<&[Scalar]> {
        match self {
            Self::Scalar(_) => None,
            Self::Tuple(elements) => Some(elements),
        }
    }

    /// Number of elements once normalised to a tuple: 1 for a scalar key.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Tuple(elements) => elements.len(),
        }
    }

    /// Element at `position` of the tuple form of this key, as a scalar key.
    ///
    /// A scalar key behaves as a 1-tuple.
    #[must_use]
    pub fn position(&self, position: usize) -> Option<Self> {
        match self {
            Self::Scalar(scalar) => (position == 0).then(|| Self::Scalar(scalar.clone())),
            Self::Tuple(elements) => elements.get(position).cloned().map(Self::Scalar),
        }
    }

    /// The elements of the tuple form of this key, each as a scalar key.
    #[must_use]
    pub fn path(&self) -> Vec<Self> {
        match self {
            Self::Scalar(scalar) => vec![Self::Scalar(scalar.clone())],
            Self::Tuple(elements) => elements.iter().cloned().map(Self::Scalar).collect(),
        }
    }

    /// Appends the scalars of this key to `buffer`.
    pub(crate) fn extend_path(&self, buffer: &mut TupleKey) {
        match self {
            Self::Scalar(scalar) => buffer.push(scalar.clone()),
            Self::Tuple(elements) => buffer.extend(elements.iter().cloned()),
        }
    }

    /// Returns the name of the key kind, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(scalar) => scalar.type_name(),
            Self::Tuple(_) => "tuple",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(formatter, "{scalar}"),
            Self::Tuple(elements) => {
                write!(formatter, "(")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{element}")?;
                }
                if elements.len() == 1 {
                    write!(formatter, ",")?;
                }
                write!(formatter, ")")
            }
        }
    }
}

impl From<Scalar> for Key {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

macro_rules! impl_key_from_scalar {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for Key {
                fn from(value: $source) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )+
    };
}

impl_key_from_scalar!(bool, i64, i32, u32, f64, &str, String, &String);

macro_rules! impl_key_from_tuple {
    ($(($($element:ident $binding:ident),+)),+ $(,)?) => {
        $(
            impl<$($element: Into<Scalar>),+> From<($($element,)+)> for Key {
                fn from(($($binding,)+): ($($element,)+)) -> Self {
                    Self::Tuple(smallvec::smallvec![$($binding.into()),+])
                }
            }
        )+
    };
}

impl_key_from_tuple!(
    (A a, B b),
    (A a, B b, C c),
    (A a, B b, C c, D d),
    (A a, B b, C c, D d, E e),
);

/// Builds a [`Key`]: one argument gives a scalar key, several give a tuple key.
///
/// # Examples
///
/// ```rust
/// use tupdict::dict::Key;
/// use tupdict::key;
///
/// assert_eq!(key!("a"), Key::from("a"));
/// assert_eq!(key!("a", "b", 3), Key::from(("a", "b", 3)));
/// ```
#[macro_export]
macro_rules! key {
    ($element:expr $(,)?) => {
        $crate::dict::Key::from($element)
    };
    ($($element:expr),+ $(,)?) => {
        $crate::dict::Key::tuple([$($crate::dict::Scalar::from($element)),+])
    };
}
