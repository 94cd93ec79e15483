//! Ordered list - random access, insert/remove anywhere, push/pop at both ends

use super::array::{forward_queryable, ArrayQueryable};
use crate::error::{checked_index, QueryError, QueryResult};
use crate::queryable::Queryable;
use crate::sequence::IntoSequence;
use sequent_config::CollectionsConfig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::Ref;
use std::fmt;

/// Mutable, 0-indexed ordered list with the full query surface.
///
/// # Example
/// ```rust
/// use sequent::{List, Queryable};
///
/// let mut list = List::from_vec(vec![1, 2, 3, 4]);
/// list.push(5);
/// let evens = list.filter(|x| x % 2 == 0).select(|x| x * 10);
/// assert_eq!(evens.to_array(), vec![20, 40]);
/// ```
pub struct List<T> {
    inner: ArrayQueryable<T>,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self {
            inner: ArrayQueryable::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: ArrayQueryable::with_capacity(capacity),
        }
    }

    /// Empty list sized by the `[list]` section of a loaded configuration
    pub fn with_config(config: &CollectionsConfig) -> Self {
        Self::with_capacity(config.list_capacity())
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: ArrayQueryable::from_vec(items),
        }
    }

    /// Read guard over the live elements
    pub fn as_slice(&self) -> Ref<'_, [T]> {
        self.inner.as_slice()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Append to the end, returning the new length
    pub fn push(&mut self, value: T) -> usize {
        let mut store = self.inner.store_mut();
        store.push(value);
        store.len()
    }

    /// Prepend to the front, returning the new length
    pub fn push_front(&mut self, value: T) -> usize {
        let mut store = self.inner.store_mut();
        store.insert(0, value);
        store.len()
    }

    pub fn pop(&mut self) -> Option<T> {
        self.inner.store_mut().pop()
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let mut store = self.inner.store_mut();
        if store.is_empty() {
            None
        } else {
            Some(store.remove(0))
        }
    }

    /// Replace the element at `index`.
    ///
    /// # Errors
    /// `NegativeIndex` for negative indices, `OutOfBounds` unless
    /// `index < len`.
    pub fn set(&mut self, index: isize, value: T) -> QueryResult<()> {
        let index = checked_index(index)?;
        let mut store = self.inner.store_mut();
        let len = store.len();
        match store.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(QueryError::OutOfBounds { index, len }),
        }
    }

    /// Insert before `index`; `index == len` appends.
    pub fn insert(&mut self, index: isize, value: T) -> QueryResult<()> {
        let index = checked_index(index)?;
        let mut store = self.inner.store_mut();
        if index > store.len() {
            return Err(QueryError::OutOfBounds {
                index,
                len: store.len(),
            });
        }
        store.insert(index, value);
        Ok(())
    }

    /// Remove and return the element at `index`
    pub fn remove_at(&mut self, index: isize) -> QueryResult<T> {
        let index = checked_index(index)?;
        let mut store = self.inner.store_mut();
        if index >= store.len() {
            return Err(QueryError::OutOfBounds {
                index,
                len: store.len(),
            });
        }
        Ok(store.remove(index))
    }
}

impl<T: Clone + 'static> List<T> {
    /// Build a list from any sequence; the elements are copied in
    pub fn from_sequence(items: impl IntoSequence<T>) -> Self {
        Self::from_vec(items.into_sequence().to_array())
    }

    /// Element at `index`, `None` past the end.
    ///
    /// # Errors
    /// `NegativeIndex` for negative indices.
    pub fn get(&self, index: isize) -> QueryResult<Option<T>> {
        self.inner.element_at_or_default(index)
    }

    /// Append every element of `items`, returning the new length.
    ///
    /// `items` is fully materialized before the list is touched, so a live
    /// view of this same list can be passed.
    pub fn push_range(&mut self, items: impl IntoSequence<T>) -> usize {
        let items = items.into_sequence().to_array();
        let mut store = self.inner.store_mut();
        store.extend(items);
        store.len()
    }

    /// Independent list with the same elements
    pub fn copy(&self) -> Self {
        Self {
            inner: self.inner.copy(),
        }
    }
}

impl<T: PartialEq> List<T> {
    /// Remove every element equal to `element`, returning how many went
    pub fn remove(&mut self, element: &T) -> usize {
        let mut store = self.inner.store_mut();
        let before = store.len();
        store.retain(|item| item != element);
        before - store.len()
    }

    /// Position of the first element equal to `element`
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.as_slice().iter().position(|item| item == element)
    }
}

forward_queryable!(List);

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List")?;
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl<T: Serialize> Serialize for List<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice().iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for List<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::deserialize(deserializer).map(Self::from_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> List<i32> {
        List::from_vec(vec![10, 20, 30])
    }

    #[test]
    fn test_push_returns_new_length() {
        let mut list = list();
        assert_eq!(list.push(40), 4);
        assert_eq!(list.push_front(0), 5);
        assert_eq!(list.to_array(), vec![0, 10, 20, 30, 40]);
    }

    #[test]
    fn test_pop_both_ends() {
        let mut list = list();
        assert_eq!(list.pop(), Some(30));
        assert_eq!(list.pop_front(), Some(10));
        assert_eq!(list.to_array(), vec![20]);

        let mut empty: List<i32> = List::new();
        assert_eq!(empty.pop(), None);
        assert_eq!(empty.pop_front(), None);
    }

    #[test]
    fn test_get() {
        let list = list();
        assert_eq!(list.get(1), Ok(Some(20)));
        assert_eq!(list.get(3), Ok(None));
        assert_eq!(list.get(-1), Err(QueryError::NegativeIndex { index: -1 }));
    }

    #[test]
    fn test_set_requires_existing_index() {
        let mut list = list();
        assert_eq!(list.set(0, 11), Ok(()));
        assert_eq!(
            list.set(3, 40),
            Err(QueryError::OutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(list.set(-2, 0), Err(QueryError::NegativeIndex { index: -2 }));
        assert_eq!(list.to_array(), vec![11, 20, 30]);
    }

    #[test]
    fn test_insert_accepts_end_position() {
        let mut list = list();
        assert_eq!(list.insert(3, 40), Ok(()));
        assert_eq!(list.insert(0, 0), Ok(()));
        assert_eq!(
            list.insert(6, 99),
            Err(QueryError::OutOfBounds { index: 6, len: 5 })
        );
        assert_eq!(
            list.insert(-1, 5),
            Err(QueryError::NegativeIndex { index: -1 })
        );
        assert_eq!(list.to_array(), vec![0, 10, 20, 30, 40]);
    }

    #[test]
    fn test_remove_at() {
        let mut list = list();
        assert_eq!(list.remove_at(1), Ok(20));
        assert_eq!(
            list.remove_at(2),
            Err(QueryError::OutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(
            list.remove_at(-1),
            Err(QueryError::NegativeIndex { index: -1 })
        );
        assert_eq!(list.to_array(), vec![10, 30]);
    }

    #[test]
    fn test_remove_is_exhaustive() {
        let mut list = List::from_vec(vec![1, 2, 1, 3, 1]);
        assert_eq!(list.remove(&1), 3);
        assert_eq!(list.remove(&9), 0);
        assert_eq!(list.to_array(), vec![2, 3]);
    }

    #[test]
    fn test_index_of() {
        let list = List::from_vec(vec!["a", "b", "a"]);
        assert_eq!(list.index_of(&"a"), Some(0));
        assert_eq!(list.index_of(&"b"), Some(1));
        assert_eq!(list.index_of(&"z"), None);
    }

    #[test]
    fn test_push_range_from_own_view() {
        let mut list = list();
        let view = list.as_sequence();
        assert_eq!(list.push_range(view), 6);
        assert_eq!(list.to_array(), vec![10, 20, 30, 10, 20, 30]);
    }

    #[test]
    fn test_clear_and_copy() {
        let mut list = list();
        let copy = list.copy();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(copy.len(), 3);
    }

    #[test]
    fn test_with_config_capacity() {
        let config = CollectionsConfig::from_toml_str("[list]\ninitial_capacity = 64\n")
            .expect("valid config");
        let list: List<u8> = List::with_config(&config);
        assert!(list.is_empty());
        assert!(list.as_slice().is_empty());
    }

    #[test]
    fn test_debug_output() {
        assert_eq!(format!("{:?}", list()), "List[10, 20, 30]");
    }
}
