//! Insertion-ordered dictionary with generic reshaping operations.
//!
//! This module provides [`SuperDict`], a mutable map that remembers insertion
//! order and offers one-call versions of recurring reshaping loops.
//!
//! # Overview
//!
//! Entries are stored in a `Vec` in insertion order. Small dictionaries are
//! searched linearly; once a dictionary grows past 8 entries a hash index is
//! built next to the entries and kept up to date:
//!
//! | Operation      | Small (n <= 8)    | Large (n > 8)       |
//! |----------------|-------------------|---------------------|
//! | `get`          | O(n)              | O(1) average        |
//! | `insert`       | O(n)              | O(1) average        |
//! | `remove`       | O(n)              | O(n)                |
//! | `len`          | O(1)              | O(1)                |
//! | `iter`         | O(n)              | O(n)                |
//!
//! Re-inserting an existing key replaces the value and keeps the position.
//! Removing a key shifts the later entries down, preserving their order.
//!
//! # Transformations
//!
//! Every reshaping method (`clean`, `filter`, `fill_with_default`,
//! `map_values`, ...) returns a new dictionary and leaves `self` untouched.
//!
//! # Examples
//!
//! ```rust
//! use tupdict::dict::{SortOrder, SuperDict};
//!
//! let dict: SuperDict<&str, i32> = [("b", 2), ("a", 5)].into_iter().collect();
//!
//! let filled = dict.fill_with_default(["a", "c"], 0);
//! assert_eq!(filled.keys_list(), vec!["a", "c", "b"]);
//! assert_eq!(filled.values_list(), vec![5, 0, 2]);
//!
//! assert_eq!(dict.sorted_keys(SortOrder::Ascending), vec!["a", "b"]);
//! ```

use super::error::MissingKeyError;
use super::IndexHasher;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Index;

/// The threshold above which a hash index is maintained.
const SMALL_THRESHOLD: usize = 8;

/// Direction of [`SuperDict::sorted_keys`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first. Equal elements keep their original relative order.
    Descending,
}

impl SortOrder {
    #[inline]
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// An insertion-ordered dictionary.
///
/// # Type Parameters
///
/// * `K` - The key type. Most operations need `Eq + Hash + Clone`.
/// * `V` - The value type.
///
/// # Examples
///
/// ```rust
/// use tupdict::dict::SuperDict;
///
/// let mut dict = SuperDict::new();
/// dict.insert("one", 1);
/// dict.insert("two", 2);
///
/// assert_eq!(dict.size(), 2);
/// assert_eq!(dict.get("one"), Some(&1));
/// assert_eq!(dict["two"], 2);
/// ```
#[derive(Clone)]
pub struct SuperDict<K, V> {
    entries: Vec<(K, V)>,
    index: Option<HashMap<K, usize, IndexHasher>>,
}

impl<K, V> SuperDict<K, V> {
    /// Creates a new empty dictionary.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: None,
        }
    }

    /// Creates an empty dictionary with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: None,
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of entries. Same as [`len`](Self::len).
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the dictionary has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries in insertion order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> SuperDictIterator<'_, K, V> {
        SuperDictIterator {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    /// Consumes the dictionary, returning its keys in insertion order.
    #[must_use]
    pub fn into_keys(self) -> Vec<K> {
        self.entries.into_iter().map(|(key, _)| key).collect()
    }

    /// Consumes the dictionary, returning its values in insertion order.
    #[must_use]
    pub fn into_values(self) -> Vec<V> {
        self.entries.into_iter().map(|(_, value)| value).collect()
    }

    /// Returns the first entry, if any.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|(key, value)| (key, value))
    }

    /// Returns the keys as a `Vec`, in iteration order.
    #[must_use]
    pub fn keys_list(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys().cloned().collect()
    }

    /// Returns the values as a `Vec`, in iteration order.
    #[must_use]
    pub fn values_list(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values().cloned().collect()
    }
}

impl<K: Eq + Hash + Clone, V> SuperDict<K, V> {
    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match &self.index {
            Some(index) => index.get(key).copied(),
            None => self
                .entries
                .iter()
                .position(|(candidate, _)| candidate.borrow() == key),
        }
    }

    fn rebuild_index(&mut self) {
        self.index = (self.entries.len() > SMALL_THRESHOLD).then(|| {
            let mut index =
                HashMap::with_capacity_and_hasher(self.entries.len(), IndexHasher::default());
            for (position, (key, _)) in self.entries.iter().enumerate() {
                index.insert(key.clone(), position);
            }
            index
        });
    }

    /// Appends an entry whose key is known to be absent.
    fn push_new(&mut self, key: K, value: V) -> usize {
        let position = self.entries.len();
        if let Some(index) = self.index.as_mut() {
            index.insert(key.clone(), position);
        }
        self.entries.push((key, value));
        if self.index.is_none() && self.entries.len() > SMALL_THRESHOLD {
            self.rebuild_index();
        }
        position
    }

    /// Returns a reference to the value under `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.position(key).map(|position| &self.entries[position].1)
    }

    /// Returns a mutable reference to the value under `key`.
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.position(key)
            .map(|position| &mut self.entries[position].1)
    }

    /// Returns `true` if the dictionary contains `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.position(key).is_some()
    }

    /// Inserts an entry, returning the previous value under `key`.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.push_new(key, value);
                None
            }
        }
    }

    /// Returns the value under `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let position = match self.position(&key) {
            Some(position) => position,
            None => self.push_new(key, default()),
        };
        &mut self.entries[position].1
    }

    /// Removes `key`, returning its value. Later entries keep their order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let position = self.position(key)?;
        let (_, value) = self.entries.remove(position);
        self.rebuild_index();
        Some(value)
    }

    /// New dictionary without the entries equal to `default_value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::SuperDict;
    ///
    /// let dict: SuperDict<&str, i32> = [("a", 1), ("b", 0), ("c", 1)].into_iter().collect();
    /// let cleaned = dict.clean(&0);
    /// assert_eq!(cleaned.keys_list(), vec!["a", "c"]);
    /// assert_eq!(dict.len(), 3);
    /// ```
    #[must_use]
    pub fn clean(&self, default_value: &V) -> Self
    where
        V: PartialEq + Clone,
    {
        self.clean_by(|value| value != default_value)
    }

    /// New dictionary with the entries whose value satisfies `predicate`.
    #[must_use]
    pub fn clean_by<F>(&self, mut predicate: F) -> Self
    where
        V: Clone,
        F: FnMut(&V) -> bool,
    {
        self.iter()
            .filter(|(_, value)| predicate(value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// New dictionary restricted to `keys`, failing if any of them is absent.
    ///
    /// A single key is passed as a one-element array. The result follows the
    /// requested order; a key requested twice appears once.
    ///
    /// # Errors
    ///
    /// Returns [`MissingKeyError`] listing every requested key the dictionary
    /// does not contain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::SuperDict;
    ///
    /// let dict: SuperDict<&str, i32> = [("a", 1), ("b", 0), ("c", 1)].into_iter().collect();
    ///
    /// let filtered = dict.filter(["a", "b"]).unwrap();
    /// assert_eq!(filtered.keys_list(), vec!["a", "b"]);
    ///
    /// let error = dict.filter(["z", "a", "y"]).unwrap_err();
    /// assert_eq!(error.missing, vec!["z", "y"]);
    /// ```
    pub fn filter<I, Q>(&self, keys: I) -> Result<Self, MissingKeyError<K>>
    where
        I: IntoIterator<Item = Q>,
        Q: Into<K>,
        V: Clone,
    {
        let requested: Vec<K> = keys.into_iter().map(Into::into).collect();
        let mut missing: Vec<K> = Vec::new();
        for key in &requested {
            if !self.contains_key(key) && !missing.contains(key) {
                missing.push(key.clone());
            }
        }
        if !missing.is_empty() {
            tracing::debug!(
                requested = requested.len(),
                missing = missing.len(),
                "filter requested keys absent from the dictionary"
            );
            return Err(MissingKeyError::new(missing));
        }
        Ok(self.filter_existing(requested))
    }

    /// New dictionary restricted to those of `keys` that are present.
    #[must_use]
    pub fn filter_existing<I, Q>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<K>,
        V: Clone,
    {
        let mut filtered = Self::new();
        for key in keys.into_iter().map(Into::into) {
            if let Some(value) = self.get(&key) {
                filtered.insert(key, value.clone());
            }
        }
        filtered
    }

    /// New dictionary containing at least `keys`.
    ///
    /// Missing keys get `default`; values already present win. The requested
    /// keys come first, followed by the remaining entries of `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::SuperDict;
    ///
    /// let dict: SuperDict<&str, i32> = [("a", 5)].into_iter().collect();
    /// let filled = dict.fill_with_default(["a", "b", "c"], 0);
    /// assert_eq!(filled.values_list(), vec![5, 0, 0]);
    /// ```
    #[must_use]
    pub fn fill_with_default<I, Q>(&self, keys: I, default: V) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<K>,
        V: Clone,
    {
        let mut filled: Self = keys
            .into_iter()
            .map(|key| (key.into(), default.clone()))
            .collect();
        filled.extend(self.iter().map(|(key, value)| (key.clone(), value.clone())));
        filled
    }

    /// New dictionary with `function(key, value)` as values.
    ///
    /// Extra arguments are captured by the closure.
    #[must_use]
    pub fn map_items<W, F>(&self, mut function: F) -> SuperDict<K, W>
    where
        F: FnMut(&K, &V) -> W,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), function(key, value)))
            .collect()
    }

    /// New dictionary with `function(value)` as values. Keys are unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::SuperDict;
    ///
    /// let dict: SuperDict<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    /// let offset = 10;
    /// let shifted = dict.map_values(|value| value + offset);
    /// assert_eq!(shifted.values_list(), vec![11, 12]);
    /// ```
    #[must_use]
    pub fn map_values<W, F>(&self, mut function: F) -> SuperDict<K, W>
    where
        F: FnMut(&V) -> W,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), function(value)))
            .collect()
    }

    /// Keys sorted by their natural order. The sort is stable.
    #[must_use]
    pub fn sorted_keys(&self, order: SortOrder) -> Vec<K>
    where
        K: Ord,
    {
        self.sorted_keys_by(|left, right| order.apply(left.cmp(right)))
    }

    /// Keys sorted by an extracted sort key. The sort is stable, also in
    /// [`SortOrder::Descending`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::{SortOrder, SuperDict};
    ///
    /// let dict: SuperDict<&str, i32> = [("ccc", 0), ("a", 0), ("bb", 0), ("d", 0)]
    ///     .into_iter()
    ///     .collect();
    /// let keys = dict.sorted_keys_by_key(|key| key.len(), SortOrder::Descending);
    /// assert_eq!(keys, vec!["ccc", "bb", "a", "d"]);
    /// ```
    #[must_use]
    pub fn sorted_keys_by_key<T, F>(&self, mut extract: F, order: SortOrder) -> Vec<K>
    where
        T: Ord,
        F: FnMut(&K) -> T,
    {
        self.sorted_keys_by(|left, right| order.apply(extract(left).cmp(&extract(right))))
    }

    /// Keys sorted with a comparator. The sort is stable.
    #[must_use]
    pub fn sorted_keys_by<F>(&self, compare: F) -> Vec<K>
    where
        F: FnMut(&K, &K) -> Ordering,
    {
        let mut keys = self.keys_list();
        keys.sort_by(compare);
        keys
    }
}

impl<K, E> SuperDict<K, Vec<E>>
where
    K: Eq + Hash + Clone,
    E: Eq + Hash + Clone,
{
    /// Inverts a dictionary of lists.
    ///
    /// Every element of every list becomes a key, mapped to the keys whose
    /// list contains it. Elements appear in first-appearance order; the key
    /// lists follow the iteration order of `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tupdict::dict::SuperDict;
    ///
    /// let dict: SuperDict<&str, Vec<&str>> =
    ///     [("x", vec!["a", "b"]), ("y", vec!["b"])].into_iter().collect();
    /// let inverted = dict.invert_list_values();
    ///
    /// assert_eq!(inverted.get("a"), Some(&vec!["x"]));
    /// assert_eq!(inverted.get("b"), Some(&vec!["x", "y"]));
    /// ```
    #[must_use]
    pub fn invert_list_values(&self) -> SuperDict<E, Vec<K>> {
        let mut inverted: SuperDict<E, Vec<K>> = SuperDict::new();
        for (key, elements) in self {
            for element in elements {
                inverted
                    .get_or_insert_with(element.clone(), Vec::new)
                    .push(key.clone());
            }
        }
        inverted
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over the entries of a [`SuperDict`].
pub struct SuperDictIterator<'a, K, V> {
    inner: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for SuperDictIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for SuperDictIterator<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key, value))
    }
}

impl<K, V> ExactSizeIterator for SuperDictIterator<'_, K, V> {}

/// Owning iterator over the entries of a [`SuperDict`].
pub struct SuperDictIntoIterator<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for SuperDictIntoIterator<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for SuperDictIntoIterator<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for SuperDictIntoIterator<K, V> {}

impl<K, V> IntoIterator for SuperDict<K, V> {
    type Item = (K, V);
    type IntoIter = SuperDictIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        SuperDictIntoIterator {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a SuperDict<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = SuperDictIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for SuperDict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut dict = Self::with_capacity(iter.size_hint().0);
        dict.extend(iter);
        dict
    }
}

impl<K: Eq + Hash + Clone, V> Extend<(K, V)> for SuperDict<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for SuperDict<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, Q, V> Index<&Q> for SuperDict<K, V>
where
    K: Eq + Hash + Clone + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("key not found in SuperDict")
    }
}

/// Equality ignores insertion order.
impl<K: Eq + Hash + Clone, V: PartialEq> PartialEq for SuperDict<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|other_value| value == other_value))
    }
}

impl<K: Eq + Hash + Clone, V: Eq> Eq for SuperDict<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SuperDict<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for SuperDict<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
