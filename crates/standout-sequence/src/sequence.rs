//! The [`QueryableSequence`] container and its query operations.
//!
//! Every query operation is eager: it walks the receiver once (or sorts a
//! copy of it) and materializes a new sequence, scalar, or [`OrderedMap`].
//! The receiver is never modified by a query.

use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;
use std::hash::Hash;
use std::iter::Sum;
use std::ops::Index;

use crate::error::{Result, SequenceError};
use crate::number::CheckedAdd;
use crate::ordered_map::OrderedMap;
use crate::ordering::{compare_by_keys, SortKey};

/// An ordered, append-only collection with LINQ-style query operations.
///
/// # Example
///
/// ```
/// use standout_sequence::QueryableSequence;
///
/// let words: QueryableSequence<&str> = vec!["pear", "fig", "apple", "kiwi"].into();
///
/// let short = words
///     .filter(|w| w.len() <= 4)
///     .order_by(|w| w.len())
///     .select(|w| w.to_uppercase());
///
/// assert_eq!(short.as_slice(), ["FIG", "PEAR", "KIWI"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryableSequence<T> {
    items: Vec<T>,
}

impl<T> QueryableSequence<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        QueryableSequence { items: Vec::new() }
    }

    /// Creates an empty sequence with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        QueryableSequence {
            items: Vec::with_capacity(capacity),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Appends an element to the end.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Inserts an element at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the element at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consumes the sequence, returning the backing vector.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    // ========================================================================
    // Projection
    // ========================================================================

    /// Maps every element through `projector`, preserving order and length.
    pub fn select<R, F>(&self, projector: F) -> QueryableSequence<R>
    where
        F: FnMut(&T) -> R,
    {
        self.items.iter().map(projector).collect()
    }

    /// Maps every element to a sub-sequence and concatenates the results in
    /// source order.
    pub fn select_many<R, I, F>(&self, projector: F) -> QueryableSequence<R>
    where
        I: IntoIterator<Item = R>,
        F: FnMut(&T) -> I,
    {
        self.items.iter().flat_map(projector).collect()
    }

    // ========================================================================
    // Scalar queries
    // ========================================================================

    /// Counts all elements. Same as [`len`](Self::len).
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Counts the elements for which `predicate` holds.
    pub fn count_where<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).count()
    }

    /// Returns `true` if any element satisfies `predicate`.
    pub fn any<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().any(predicate)
    }

    /// Returns `true` if every element satisfies `predicate`.
    ///
    /// An empty sequence trivially satisfies any predicate.
    pub fn all<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().all(predicate)
    }

    /// Returns the index of the first element satisfying `predicate`.
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().position(predicate)
    }

    /// Returns the first element satisfying `predicate`.
    pub fn first<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    /// Returns the first element satisfying `predicate`, or `default`.
    pub fn first_or<'a, P>(&'a self, predicate: P, default: &'a T) -> &'a T
    where
        P: FnMut(&T) -> bool,
    {
        self.first(predicate).unwrap_or(default)
    }

    /// Returns the last element satisfying `predicate`, scanning from the back.
    pub fn last<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().rev().find(|item| predicate(item))
    }

    /// Returns the last element satisfying `predicate`, or `default`.
    pub fn last_or<'a, P>(&'a self, predicate: P, default: &'a T) -> &'a T
    where
        P: FnMut(&T) -> bool,
    {
        self.last(predicate).unwrap_or(default)
    }

    /// Returns the only element satisfying `predicate`.
    ///
    /// Fails with [`SequenceError::NoMatch`] when nothing matches and with
    /// [`SequenceError::MultipleMatches`] when more than one element does.
    pub fn single<P>(&self, mut predicate: P) -> Result<&T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut matches = self.items.iter().filter(|item| predicate(item));
        let found = matches.next().ok_or(SequenceError::NoMatch)?;
        let extra = matches.count();
        if extra > 0 {
            return Err(SequenceError::MultipleMatches { count: extra + 1 });
        }
        Ok(found)
    }

    /// Returns the element with the smallest key (the first one on ties).
    pub fn min_by_key<K, F>(&self, mut key: F) -> Option<&T>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.items.iter().min_by_key(|item| key(item))
    }

    /// Returns the element with the largest key (the last one on ties).
    pub fn max_by_key<K, F>(&self, mut key: F) -> Option<&T>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.items.iter().max_by_key(|item| key(item))
    }

    // ========================================================================
    // Aggregation
    // ========================================================================

    /// Sums the elements themselves. An empty sequence sums to zero.
    pub fn sum(&self) -> T
    where
        T: for<'a> Sum<&'a T>,
    {
        self.items.iter().sum()
    }

    /// Sums `projector` over all elements. An empty sequence sums to zero.
    ///
    /// Integer overflow behaves like the standard library's `Sum`; use
    /// [`checked_sum_of`](Self::checked_sum_of) to detect it.
    pub fn sum_of<S, F>(&self, projector: F) -> S
    where
        S: Sum<S>,
        F: FnMut(&T) -> S,
    {
        self.items.iter().map(projector).sum()
    }

    /// Sums `projector` over all elements, failing with
    /// [`SequenceError::Overflow`] instead of wrapping or panicking.
    pub fn checked_sum_of<S, F>(&self, mut projector: F) -> Result<S>
    where
        S: CheckedAdd,
        F: FnMut(&T) -> S,
    {
        self.items.iter().try_fold(S::ZERO, |acc, item| {
            acc.checked_add(projector(item)).ok_or(SequenceError::Overflow)
        })
    }

    // ========================================================================
    // Keyed results
    // ========================================================================

    /// Counts occurrences per element, in first-occurrence order.
    pub fn distinct_count(&self) -> OrderedMap<T, usize>
    where
        T: Eq + Hash + Clone,
    {
        self.distinct_count_by(T::clone)
    }

    /// Counts occurrences per projected key, in first-occurrence order.
    pub fn distinct_count_by<K, F>(&self, mut key: F) -> OrderedMap<K, usize>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&T) -> K,
    {
        let mut counts = OrderedMap::new();
        for item in &self.items {
            *counts.get_or_insert_with(key(item), || 0) += 1;
        }
        counts
    }

    /// Projects every element to a `(key, value)` pair.
    ///
    /// When two elements share a key the later value wins; the key keeps the
    /// position of its first occurrence.
    pub fn to_dict<K, V, FK, FV>(&self, mut key: FK, mut value: FV) -> OrderedMap<K, V>
    where
        K: Eq + Hash + Clone,
        FK: FnMut(&T) -> K,
        FV: FnMut(&T) -> V,
    {
        let mut dict = OrderedMap::with_capacity(self.items.len());
        for item in &self.items {
            dict.insert(key(item), value(item));
        }
        dict
    }
}

impl<T: Clone> QueryableSequence<T> {
    /// Keeps the elements for which `predicate` holds, in source order.
    ///
    /// This is the `where` operation; `where` is reserved in Rust.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        self.items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    /// Returns a new sequence with the elements of `other` appended.
    pub fn concat(&self, other: &Self) -> Self {
        self.items.iter().chain(other.items.iter()).cloned().collect()
    }

    /// Returns the elements in reverse order.
    pub fn reversed(&self) -> Self {
        self.items.iter().rev().cloned().collect()
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Stable ascending sort by `key`.
    ///
    /// Return a tuple to sort by several components left to right. Elements
    /// with equal keys keep their original relative order.
    ///
    /// ```
    /// use standout_sequence::QueryableSequence;
    ///
    /// let pairs: QueryableSequence<(i32, &str)> = vec![(2, "x"), (1, "b"), (1, "a")].into();
    /// assert_eq!(pairs.order_by(|p| p.0), vec![(1, "b"), (1, "a"), (2, "x")]);
    /// assert_eq!(pairs.order_by(|p| (p.0, p.1)), vec![(1, "a"), (1, "b"), (2, "x")]);
    /// ```
    pub fn order_by<K, F>(&self, mut key: F) -> Self
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let mut items = self.items.clone();
        items.sort_by_key(|item| key(item));
        QueryableSequence { items }
    }

    /// Stable descending sort by `key`.
    ///
    /// Elements with equal keys keep their original relative order.
    pub fn order_by_desc<K, F>(&self, mut key: F) -> Self
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let mut items = self.items.clone();
        items.sort_by_key(|item| Reverse(key(item)));
        QueryableSequence { items }
    }

    /// Stable sort by a list of keys, each with its own type and direction.
    ///
    /// An empty key list leaves the order unchanged.
    pub fn order_by_keys(&self, keys: &[SortKey<'_, T>]) -> Self {
        let mut items = self.items.clone();
        if !keys.is_empty() {
            items.sort_by(|a, b| compare_by_keys(a, b, keys));
        }
        QueryableSequence { items }
    }

    /// Stable ascending sort by a partially ordered key such as `f64`.
    ///
    /// Fails with [`SequenceError::Incomparable`] naming the source positions
    /// of a pair of keys with no ordering, such as a NaN and any other float.
    /// Apart from such values the keys must be totally ordered.
    pub fn try_order_by_partial<K, F>(&self, key: F) -> Result<Self>
    where
        K: PartialOrd,
        F: FnMut(&T) -> K,
    {
        let keys: Vec<K> = self.items.iter().map(key).collect();

        if let Some((left, right)) = find_incomparable(&keys) {
            log::debug!("partial sort failed: keys at {} and {} are incomparable", left, right);
            return Err(SequenceError::Incomparable { left, right });
        }

        // No NaN-like keys remain, so `partial_cmp` is total from here on.
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| keys[a].partial_cmp(&keys[b]).unwrap_or(Ordering::Equal));

        Ok(order.into_iter().map(|i| self.items[i].clone()).collect())
    }

    // ========================================================================
    // Deduplication and grouping
    // ========================================================================

    /// Keeps the first occurrence of each element, in source order.
    pub fn distinct(&self) -> Self
    where
        T: Eq + Hash,
    {
        let mut seen: HashSet<&T> = HashSet::with_capacity(self.items.len());
        self.items
            .iter()
            .filter(|item| seen.insert(*item))
            .cloned()
            .collect()
    }

    /// Keeps the first element for each distinct key, in source order.
    pub fn distinct_by<K, F>(&self, mut key: F) -> Self
    where
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|item| seen.insert(key(item)))
            .cloned()
            .collect()
    }

    /// Partitions the elements by key.
    ///
    /// Groups appear in first-occurrence order of their key, and members keep
    /// their source order.
    pub fn group_by<K, F>(&self, mut key: F) -> OrderedMap<K, QueryableSequence<T>>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&T) -> K,
    {
        let mut groups: OrderedMap<K, QueryableSequence<T>> = OrderedMap::new();
        for item in &self.items {
            groups
                .get_or_insert_with(key(item), QueryableSequence::new)
                .push(item.clone());
        }
        groups
    }

    /// Like [`to_dict`](Self::to_dict) with the element itself as the value.
    pub fn to_dict_by_key<K, F>(&self, key: F) -> OrderedMap<K, T>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&T) -> K,
    {
        self.to_dict(key, T::clone)
    }

    // ========================================================================
    // Slicing
    // ========================================================================

    /// Drops the first `n` elements. Skipping past the end yields an empty
    /// sequence.
    pub fn skip(&self, n: usize) -> Self {
        if n > self.items.len() {
            log::trace!("skip({}) clamped to length {}", n, self.items.len());
        }
        self.items.iter().skip(n).cloned().collect()
    }

    /// Keeps the first `n` elements. Taking past the end yields every element.
    pub fn take(&self, n: usize) -> Self {
        if n > self.items.len() {
            log::trace!("take({}) clamped to length {}", n, self.items.len());
        }
        self.items.iter().take(n).cloned().collect()
    }

    /// Rotates left by `n` positions: `skip(n)` followed by `take(n)`.
    ///
    /// `n` is taken modulo the length, so any value is a true circular
    /// rotation. Negative values rotate right.
    ///
    /// ```
    /// use standout_sequence::QueryableSequence;
    ///
    /// let seq: QueryableSequence<i32> = vec![1, 2, 3, 4, 5].into();
    /// assert_eq!(seq.shift(2), vec![3, 4, 5, 1, 2]);
    /// assert_eq!(seq.shift(7), vec![3, 4, 5, 1, 2]);
    /// assert_eq!(seq.shift(-1), vec![5, 1, 2, 3, 4]);
    /// ```
    pub fn shift(&self, n: isize) -> Self {
        let mut items = self.items.clone();
        let len = items.len();
        if len == 0 {
            return QueryableSequence { items };
        }

        let magnitude = n.unsigned_abs() % len;
        let amount = if n >= 0 {
            magnitude
        } else {
            (len - magnitude) % len
        };
        log::trace!("shift({}) normalized to left rotation by {}", n, amount);

        items.rotate_left(amount);
        QueryableSequence { items }
    }
}

/// Finds a pair of keys with no ordering.
///
/// The first key that compares with itself becomes the reference; every
/// other key must compare with it. A sequence where no key compares with
/// itself reports its first two positions.
fn find_incomparable<K: PartialOrd>(keys: &[K]) -> Option<(usize, usize)> {
    let pair = |a: usize, b: usize| (a.min(b), a.max(b));

    let Some(reference) = keys.iter().position(|k| k.partial_cmp(k).is_some()) else {
        return (keys.len() >= 2).then_some((0, 1));
    };

    keys.iter()
        .position(|k| k.partial_cmp(&keys[reference]).is_none())
        .map(|other| pair(reference, other))
}

impl<T> Default for QueryableSequence<T> {
    fn default() -> Self {
        QueryableSequence::new()
    }
}

impl<T> From<Vec<T>> for QueryableSequence<T> {
    fn from(items: Vec<T>) -> Self {
        QueryableSequence { items }
    }
}

impl<T: Clone> From<&[T]> for QueryableSequence<T> {
    fn from(items: &[T]) -> Self {
        QueryableSequence {
            items: items.to_vec(),
        }
    }
}

impl<T> From<QueryableSequence<T>> for Vec<T> {
    fn from(seq: QueryableSequence<T>) -> Self {
        seq.items
    }
}

impl<T> FromIterator<T> for QueryableSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        QueryableSequence {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for QueryableSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for QueryableSequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a QueryableSequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for QueryableSequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> AsRef<[T]> for QueryableSequence<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for QueryableSequence<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        &self.items == other
    }
}

impl<T: PartialEq> PartialEq<[T]> for QueryableSequence<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items.as_slice() == other
    }
}
