//! Reusable query plans.
//!
//! The [`Query`] struct provides a fluent builder for a filter + sort + page
//! plan that can be run against any number of sequences.

use std::fmt;

use crate::ordering::{compare_by_keys, Dir, SortKey};
use crate::sequence::QueryableSequence;

type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// A query for filtering, ordering and paging sequences.
///
/// Queries consist of three predicate groups:
/// - **AND**: All predicates must hold
/// - **OR**: At least one predicate must hold (or none if empty)
/// - **NOT**: No predicate may hold
///
/// The overall match logic is:
/// ```text
/// match = (all AND predicates hold)
///       ∧ (at least one OR predicate holds, OR no OR predicates exist)
///       ∧ (no NOT predicate holds)
/// ```
///
/// # Example
///
/// ```
/// use standout_sequence::{Query, QueryableSequence};
///
/// let numbers: QueryableSequence<i32> = (1..=20).collect();
///
/// let query = Query::new()
///     .and(|n: &i32| *n > 4)
///     .or(|n: &i32| n % 3 == 0)
///     .or(|n: &i32| n % 5 == 0)
///     .not(|n: &i32| n % 2 == 0)
///     .order_desc(|n: &i32| *n)
///     .limit(3)
///     .build();
///
/// assert_eq!(query.apply(&numbers), vec![15, 9, 5]);
/// ```
pub struct Query<'a, T> {
    and_predicates: Vec<Predicate<'a, T>>,
    or_predicates: Vec<Predicate<'a, T>>,
    not_predicates: Vec<Predicate<'a, T>>,
    keys: Vec<SortKey<'a, T>>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl<'a, T> Query<'a, T> {
    /// Creates a new empty query.
    ///
    /// An empty query matches all items.
    pub fn new() -> Self {
        Query {
            and_predicates: Vec::new(),
            or_predicates: Vec::new(),
            not_predicates: Vec::new(),
            keys: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    // ========================================================================
    // Predicate builders
    // ========================================================================

    /// Adds an AND predicate.
    ///
    /// All AND predicates must hold for an item to be included.
    pub fn and<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'a,
    {
        self.and_predicates.push(Box::new(predicate));
        self
    }

    /// Adds an OR predicate.
    ///
    /// At least one OR predicate must hold (unless there are none).
    pub fn or<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'a,
    {
        self.or_predicates.push(Box::new(predicate));
        self
    }

    /// Adds a NOT predicate.
    ///
    /// No NOT predicate may hold for an item to be included.
    pub fn not<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'a,
    {
        self.not_predicates.push(Box::new(predicate));
        self
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Adds a sort key with the given direction.
    ///
    /// Keys are applied in the order they were added.
    pub fn order_by<K, F>(mut self, key: F, dir: Dir) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        self.keys.push(SortKey::new(key, dir));
        self
    }

    /// Adds an ascending sort key.
    pub fn order_asc<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        self.order_by(key, Dir::Asc)
    }

    /// Adds a descending sort key.
    pub fn order_desc<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        self.order_by(key, Dir::Desc)
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Sets the maximum number of results.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the number of results to skip.
    pub fn offset(mut self, n: usize) -> Self {
        self.offset = Some(n);
        self
    }

    /// Finalizes the query.
    ///
    /// This is a no-op that returns self, provided for API clarity.
    pub fn build(self) -> Self {
        self
    }

    /// Returns `true` if the query has no predicates.
    pub fn is_empty(&self) -> bool {
        self.and_predicates.is_empty()
            && self.or_predicates.is_empty()
            && self.not_predicates.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single item matches this query.
    pub fn matches(&self, item: &T) -> bool {
        if !self.and_predicates.iter().all(|p| p(item)) {
            return false;
        }

        let or_pass =
            self.or_predicates.is_empty() || self.or_predicates.iter().any(|p| p(item));
        if !or_pass {
            return false;
        }

        !self.not_predicates.iter().any(|p| p(item))
    }

    /// Runs the query, returning a new sequence.
    ///
    /// Matching items are stably sorted by the query's keys, then offset and
    /// limit are applied.
    pub fn apply(&self, items: &QueryableSequence<T>) -> QueryableSequence<T>
    where
        T: Clone,
    {
        let mut results: Vec<&T> = items.iter().filter(|item| self.matches(item)).collect();

        if !self.keys.is_empty() {
            results.sort_by(|a, b| compare_by_keys(*a, *b, &self.keys));
        }

        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(usize::MAX);
        results.into_iter().skip(offset).take(limit).cloned().collect()
    }

    /// Counts matching items.
    pub fn count(&self, items: &QueryableSequence<T>) -> usize {
        items.count_where(|item| self.matches(item))
    }

    /// Returns `true` if any item matches.
    pub fn any(&self, items: &QueryableSequence<T>) -> bool {
        items.any(|item| self.matches(item))
    }

    /// Returns `true` if all items match.
    pub fn all(&self, items: &QueryableSequence<T>) -> bool {
        items.all(|item| self.matches(item))
    }

    /// Finds the first matching item in source order.
    pub fn find<'s>(&self, items: &'s QueryableSequence<T>) -> Option<&'s T> {
        items.first(|item| self.matches(item))
    }

    /// Finds the index of the first matching item.
    pub fn position(&self, items: &QueryableSequence<T>) -> Option<usize> {
        items.position(|item| self.matches(item))
    }
}

impl<T> Default for Query<'_, T> {
    fn default() -> Self {
        Query::new()
    }
}

impl<T> fmt::Debug for Query<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("and", &self.and_predicates.len())
            .field("or", &self.or_predicates.len())
            .field("not", &self.not_predicates.len())
            .field("keys", &self.keys)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Task {
        name: String,
        priority: i64,
        status: u32,
        archived: bool,
    }

    fn sample_tasks() -> QueryableSequence<Task> {
        vec![
            Task {
                name: "Task A".to_string(),
                priority: 1,
                status: 0,
                archived: false,
            },
            Task {
                name: "Task B".to_string(),
                priority: 2,
                status: 1,
                archived: false,
            },
            Task {
                name: "Urgent Task".to_string(),
                priority: 5,
                status: 1,
                archived: false,
            },
            Task {
                name: "Critical Task".to_string(),
                priority: 5,
                status: 2,
                archived: true,
            },
            Task {
                name: "Done Task".to_string(),
                priority: 3,
                status: 2,
                archived: true,
            },
        ]
        .into()
    }

    fn names(tasks: &QueryableSequence<Task>) -> Vec<&str> {
        tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn empty_query_matches_all() {
        let tasks = sample_tasks();
        let query = Query::new().build();

        assert!(query.is_empty());
        assert_eq!(query.apply(&tasks), tasks);
    }

    #[test]
    fn and_multiple_predicates() {
        let tasks = sample_tasks();
        let query = Query::new()
            .and(|t: &Task| t.priority >= 2)
            .and(|t: &Task| !t.archived)
            .build();

        assert_eq!(names(&query.apply(&tasks)), vec!["Task B", "Urgent Task"]);
    }

    #[test]
    fn or_predicates() {
        let tasks = sample_tasks();
        let query = Query::new()
            .or(|t: &Task| t.status == 0)
            .or(|t: &Task| t.status == 2)
            .build();

        assert_eq!(query.count(&tasks), 3);
    }

    #[test]
    fn not_predicates() {
        let tasks = sample_tasks();
        let query = Query::new().not(|t: &Task| t.archived).build();

        assert_eq!(query.count(&tasks), 3);
        assert!(query.apply(&tasks).all(|t| !t.archived));
    }

    #[test]
    fn combined_and_or_not() {
        let tasks = sample_tasks();
        let query = Query::new()
            .and(|t: &Task| t.priority >= 2)
            .or(|t: &Task| t.name.contains("Urgent"))
            .or(|t: &Task| t.name.contains("Critical"))
            .not(|t: &Task| t.archived)
            .build();

        assert_eq!(names(&query.apply(&tasks)), vec!["Urgent Task"]);
    }

    #[test]
    fn ordering_multiple_keys() {
        let tasks = sample_tasks();
        let query = Query::new()
            .order_desc(|t: &Task| t.priority)
            .order_asc(|t: &Task| t.name.clone())
            .build();

        assert_eq!(
            names(&query.apply(&tasks)),
            vec!["Critical Task", "Urgent Task", "Done Task", "Task B", "Task A"]
        );
    }

    #[test]
    fn ordering_keeps_ties_stable() {
        let tasks = sample_tasks();
        let query = Query::new().order_desc(|t: &Task| t.priority).build();

        let results = query.apply(&tasks);
        assert_eq!(results[0].name, "Urgent Task");
        assert_eq!(results[1].name, "Critical Task");
    }

    #[test]
    fn offset_and_limit() {
        let tasks = sample_tasks();
        let query = Query::new()
            .order_asc(|t: &Task| t.priority)
            .offset(1)
            .limit(2)
            .build();

        assert_eq!(names(&query.apply(&tasks)), vec!["Task B", "Done Task"]);
    }

    #[test]
    fn offset_beyond_results() {
        let tasks = sample_tasks();
        let query = Query::new().offset(100).build();

        assert!(query.apply(&tasks).is_empty());
    }

    #[test]
    fn any_all_find_position() {
        let tasks = sample_tasks();
        let urgent = Query::new().and(|t: &Task| t.priority == 5).build();

        assert!(urgent.any(&tasks));
        assert!(!urgent.all(&tasks));
        assert_eq!(urgent.find(&tasks).unwrap().name, "Urgent Task");
        assert_eq!(urgent.position(&tasks), Some(2));

        let none = Query::new().and(|t: &Task| t.priority > 10).build();
        assert!(none.find(&tasks).is_none());
        assert_eq!(none.position(&tasks), None);
    }

    #[test]
    fn is_empty_ignores_ordering_and_paging() {
        let paged: Query<'_, Task> = Query::new()
            .order_desc(|t: &Task| t.priority)
            .limit(10)
            .offset(5)
            .build();
        assert!(paged.is_empty());

        let filtered: Query<'_, Task> = Query::new().not(|t: &Task| t.archived).build();
        assert!(!filtered.is_empty());
    }

    #[test]
    fn borrows_from_environment() {
        let tasks = sample_tasks();
        let threshold = 3;
        let query = Query::new().and(|t: &Task| t.priority >= threshold).build();

        assert_eq!(query.count(&tasks), 3);
    }
}
