//! Eager collections
//!
//! All three collections own their elements and implement [`Queryable`]:
//! - [`List`] - ordered, random access, push/pop at both ends
//! - [`Stack`] - LIFO view over the same backing store shape
//! - [`Dictionary`] - insertion-ordered, key-unique map
//!
//! [`Queryable`]: crate::Queryable

pub mod array;
pub mod dictionary;
pub mod list;
pub mod stack;

pub use array::ArrayQueryable;
pub use dictionary::{Dictionary, KeyValuePair};
pub use list::List;
pub use stack::Stack;
