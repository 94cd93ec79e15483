//! Sequent - eager collections and lazy sequence queries
//!
//! This library provides:
//! - A single query contract ([`Queryable`]) derived from two primitives
//! - Lazy, restartable sequence pipelines (filter, select, sort, distinct, ...)
//! - Array-backed collections with direct-access fast paths
//! - List, Stack and Dictionary collections
//!
//! # Example
//!
//! ```rust
//! use sequent::{List, Queryable};
//!
//! let list = List::from_vec(vec![3, 1, 2]);
//! let sorted = list.order_by(|x| *x);
//! assert_eq!(sorted.to_array(), vec![1, 2, 3]);
//!
//! let page = list.skip(1).take(1);
//! assert_eq!(page.to_array(), vec![1]);
//! ```

/// Sequent version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod collections;
pub mod comparer;
pub mod error;
pub mod queryable;
pub mod sequence;

// Re-export commonly used types
pub use collections::{ArrayQueryable, Dictionary, KeyValuePair, List, Stack};
pub use comparer::{create_comparer, natural_order, then_comparer, Comparer};
pub use error::{QueryError, QueryResult};
pub use queryable::Queryable;
pub use sequence::{Enumerable, IntoSequence, OrderedSequence, Sequence, SequenceIter};
pub use sequent_config::CollectionsConfig;
