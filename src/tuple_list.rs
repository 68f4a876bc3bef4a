//! An ordered list of tuples.
//!
//! [`TupleList`] is the flat counterpart of [`Dict`]:
//! [`Dict::to_tuple_list`] spreads a dictionary into rows and
//! [`TupleList::to_dict`] folds rows back into a dictionary.
//!
//! # Examples
//!
//! ```rust
//! use tupdict::dict::{Key, Value};
//! use tupdict::tuple_list::TupleList;
//!
//! let rows: TupleList<Vec<Value>> = vec![
//!     vec![Value::from("a"), Value::from(1), Value::from(10)],
//!     vec![Value::from("b"), Value::from(2), Value::from(20)],
//! ]
//! .into_iter()
//! .collect();
//!
//! let dict = rows.to_dict(2).unwrap();
//! assert_eq!(dict.get(&Key::from(("a", 1))), Some(&Value::from(10)));
//! ```

use crate::dict::{Dict, DictError, Key, Value};
use std::fmt;

/// An ordered sequence of tuples.
///
/// Rows are usually `Vec<Value>`; any element type is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TupleList<T> {
    rows: Vec<T>,
}

impl<T> TupleList<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Appends a row and returns the list for chaining.
    pub fn push(&mut self, row: T) -> &mut Self {
        self.rows.push(row);
        self
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the list holds no row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }

    /// Iterates over the rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    /// Consumes the list and returns its rows.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.rows
    }
}

impl TupleList<Vec<Value>> {
    /// Folds the rows into a dictionary.
    ///
    /// The first `key_len` elements of a row form the key (a single element
    /// gives a scalar key, several a tuple key). The remaining elements form
    /// the value: none gives [`Value::None`], one gives that value, several a
    /// [`Value::Tuple`]. Later rows overwrite earlier ones.
    ///
    /// # Errors
    ///
    /// - [`DictError::RowTooShort`] if `key_len` is zero or exceeds a row
    /// - [`DictError::Unhashable`] if a key element cannot be a key
    pub fn to_dict(&self, key_len: usize) -> Result<Dict, DictError> {
        let mut dict = Dict::with_capacity(self.len());
        for row in self {
            if key_len == 0 || row.len() < key_len {
                tracing::debug!(row_len = row.len(), key_len, "row too short for key");
                return Err(DictError::RowTooShort {
                    row_len: row.len(),
                    key_len,
                });
            }
            let (key_part, value_part) = row.split_at(key_len);
            let key = match key_part {
                [single] => Key::try_from(single)?,
                several => Key::try_from(&Value::Tuple(several.to_vec()))?,
            };
            let value = match value_part {
                [] => Value::None,
                [single] => single.clone(),
                several => Value::Tuple(several.to_vec()),
            };
            dict.insert(key, value);
        }
        Ok(dict)
    }
}

// =============================================================================
// Iteration
// =============================================================================

impl<T> FromIterator<T> for TupleList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for TupleList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl<T> IntoIterator for TupleList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a TupleList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<T> From<Vec<T>> for TupleList<T> {
    fn from(rows: Vec<T>) -> Self {
        Self { rows }
    }
}

impl fmt::Display for TupleList<Vec<Value>> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (row_index, row) in self.rows.iter().enumerate() {
            if row_index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{}", Value::Tuple(row.clone()))?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for TupleList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for row in self {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct TupleListVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> TupleListVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for TupleListVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = TupleList<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of rows")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut rows = Vec::with_capacity(capacity);
        while let Some(row) = seq.next_element()? {
            rows.push(row);
        }
        Ok(TupleList { rows })
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for TupleList<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(TupleListVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::Scalar;
    use crate::{dict, key};
    use rstest::rstest;

    fn row(elements: &[Value]) -> Vec<Value> {
        elements.to_vec()
    }

    #[rstest]
    fn test_push_chains() {
        let mut list = TupleList::new();
        list.push(1).push(2);
        assert_eq!(list.into_vec(), vec![1, 2]);
    }

    #[rstest]
    fn test_display() {
        let list: TupleList<Vec<Value>> = vec![
            row(&[Value::from("a"), Value::from(1)]),
            row(&[Value::from("b")]),
        ]
        .into();
        assert_eq!(list.to_string(), "[(a, 1), (b,)]");
    }

    #[rstest]
    #[case(1, dict! { "a" => (1, 2) })]
    #[case(2, dict! { ("a", 1) => 2 })]
    #[case(3, dict! { ("a", 1, 2) => Value::None })]
    fn test_to_dict_key_lengths(#[case] key_len: usize, #[case] expected: Dict) {
        let list: TupleList<Vec<Value>> =
            vec![row(&[Value::from("a"), Value::from(1), Value::from(2)])].into();
        assert_eq!(list.to_dict(key_len), Ok(expected));
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    fn test_to_dict_rejects_bad_key_length(#[case] key_len: usize) {
        let list: TupleList<Vec<Value>> =
            vec![row(&[Value::from("a"), Value::from(1), Value::from(2)])].into();
        assert_eq!(
            list.to_dict(key_len),
            Err(DictError::RowTooShort {
                row_len: 3,
                key_len,
            })
        );
    }

    #[rstest]
    fn test_to_dict_later_rows_overwrite() {
        let list: TupleList<Vec<Value>> = vec![
            row(&[Value::from("a"), Value::from(1)]),
            row(&[Value::from("a"), Value::from(2)]),
        ]
        .into();
        let dict = list.to_dict(1).unwrap();
        assert_eq!(dict.get(&key!("a")), Some(&Value::from(2)));
        assert_eq!(dict.len(), 1);
    }

    #[rstest]
    fn test_to_dict_unhashable_key() {
        let list: TupleList<Vec<Value>> =
            vec![row(&[Value::from(vec![1]), Value::from(1)])].into();
        assert_eq!(
            list.to_dict(1),
            Err(DictError::Unhashable { found: "list" })
        );
    }

    #[rstest]
    fn test_to_dict_float_and_none_key_columns() {
        let list: TupleList<Vec<Value>> = vec![
            row(&[Value::from(0.5), Value::None, Value::from("x")]),
            row(&[Value::from(1.5), Value::from("b"), Value::from("y")]),
        ]
        .into();
        let dict = list.to_dict(2).unwrap();
        assert_eq!(
            dict.get(&Key::tuple([Scalar::from(0.5), Scalar::None])),
            Some(&Value::from("x"))
        );
        assert_eq!(dict.get(&key!(1.5, "b")), Some(&Value::from("y")));
    }
}
