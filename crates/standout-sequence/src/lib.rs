//! Sequence - LINQ-style query operations for in-memory collections.
//!
//! Sequence provides [`QueryableSequence`], an ordered container with eager,
//! chainable query operations. It supports:
//!
//! - Projection: `select`, `select_many`
//! - Filtering and searching: `filter`, `first`, `last`, `single`, `any`, `all`
//! - Stable ordering by one key, a tuple of keys, or a list of [`SortKey`]s
//! - Deduplication, grouping and dictionary projection into [`OrderedMap`]
//! - Slicing and rotation: `skip`, `take`, `shift`
//! - Aggregation: `count`, `sum`, `sum_of`, `checked_sum_of`
//! - Reusable filter + sort + page plans via [`Query`]
//!
//! # Quick Start
//!
//! ```rust
//! use standout_sequence::QueryableSequence;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Order {
//!     customer: &'static str,
//!     total: u32,
//! }
//!
//! let orders: QueryableSequence<Order> = vec![
//!     Order { customer: "ada", total: 30 },
//!     Order { customer: "bob", total: 12 },
//!     Order { customer: "ada", total: 5 },
//! ]
//! .into();
//!
//! let by_customer = orders.group_by(|o| o.customer);
//! assert_eq!(by_customer["ada"].sum_of(|o| o.total), 35);
//!
//! let big = orders.filter(|o| o.total > 10).order_by(|o| o.total);
//! assert_eq!(big.select(|o| o.customer), vec!["bob", "ada"]);
//! ```
//!
//! # Semantics
//!
//! Every query is eager and returns a new value; the receiver is never
//! modified. Keyed results ([`group_by`], [`distinct_count`], [`to_dict`])
//! iterate in the order each key was first seen. `to_dict` keeps the last
//! value written for a repeated key.
//!
//! Operations that would take a default in a dynamic language come in
//! pairs: `count()` counts every element while `count_where(p)` applies a
//! predicate, `distinct()` keys by the element while `distinct_by(k)` uses a
//! projection, and so on.
//!
//! [`group_by`]: QueryableSequence::group_by
//! [`distinct_count`]: QueryableSequence::distinct_count
//! [`to_dict`]: QueryableSequence::to_dict

mod error;
mod number;
mod ordered_map;
mod ordering;
mod query;
mod sequence;

// Re-export public API
pub use error::{Result, SequenceError};
pub use number::CheckedAdd;
pub use ordered_map::{Iter, OrderedMap};
pub use ordering::{compare_by_keys, Dir, SortKey};
pub use query::Query;
pub use sequence::QueryableSequence;
