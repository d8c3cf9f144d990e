//! Ordering types for sequence sorting.
//!
//! Provides [`Dir`] for sort direction and [`SortKey`] for key-based ordering
//! of elements whose keys do not share a single type.

use std::cmp::Ordering;
use std::fmt;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

type Comparator<'a, T> = Box<dyn Fn(&T, &T) -> Ordering + 'a>;

/// A single sort key: a projection of the element plus a direction.
///
/// Each key may project to a different type, which is what lets
/// [`QueryableSequence::order_by_keys`](crate::QueryableSequence::order_by_keys)
/// sort by a string first and a number second.
pub struct SortKey<'a, T> {
    compare: Comparator<'a, T>,
    dir: Dir,
}

impl<'a, T> SortKey<'a, T> {
    /// Creates a key ordered by `key` in the given direction.
    pub fn new<K, F>(key: F, dir: Dir) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        SortKey {
            compare: Box::new(move |a, b| key(a).cmp(&key(b))),
            dir,
        }
    }

    /// Creates an ascending key.
    pub fn asc<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        SortKey::new(key, Dir::Asc)
    }

    /// Creates a descending key.
    pub fn desc<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        SortKey::new(key, Dir::Desc)
    }

    /// Returns the direction of this key.
    pub fn dir(&self) -> Dir {
        self.dir
    }

    /// Compares two elements by this key, honouring its direction.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        self.dir.apply((self.compare)(a, b))
    }
}

impl<T> fmt::Debug for SortKey<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortKey").field("dir", &self.dir).finish()
    }
}

/// Compares two elements using a list of sort keys.
///
/// Uses the first key as the primary sort key, the second to break ties, etc.
/// If all keys compare equal, returns `Equal`.
pub fn compare_by_keys<T>(a: &T, b: &T, keys: &[SortKey<'_, T>]) -> Ordering {
    for key in keys {
        let ordering = key.compare(a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
