//! Array-backed collection base
//!
//! [`ArrayQueryable`] owns an ordered, 0-indexed backing store and answers the
//! hot terminal operations by scanning it directly instead of building a lazy
//! chain. Everything it does not override goes through [`ArraySource`], a live
//! view of the same store.

use crate::error::{checked_index, QueryError, QueryResult};
use crate::queryable::Queryable;
use crate::sequence::{ArraySource, Sequence};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Ordered, mutable backing store with direct-access query fast paths.
///
/// The store is shared with every lazy sequence built from this collection,
/// so those sequences observe later mutations. `to_array` and `copy` always
/// hand out independent storage.
pub struct ArrayQueryable<T> {
    store: Rc<RefCell<Vec<T>>>,
}

impl<T> ArrayQueryable<T> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Take ownership of `items` as the backing store
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            store: Rc::new(RefCell::new(items)),
        }
    }

    /// Read guard over the live backing store
    pub fn as_slice(&self) -> Ref<'_, [T]> {
        Ref::map(self.store.borrow(), Vec::as_slice)
    }

    pub(crate) fn store_mut(&mut self) -> RefMut<'_, Vec<T>> {
        self.store.borrow_mut()
    }

    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.borrow().is_empty()
    }

    pub fn clear(&mut self) {
        self.store_mut().clear();
    }
}

impl<T: Clone> ArrayQueryable<T> {
    /// New collection with its own copy of the backing store
    pub fn copy(&self) -> Self {
        Self::from_vec(self.store.borrow().clone())
    }
}

impl<T: Clone + 'static> Queryable<T> for ArrayQueryable<T> {
    fn as_sequence(&self) -> Sequence<T> {
        Sequence::new(ArraySource::new(Rc::clone(&self.store)))
    }

    fn to_array(&self) -> Vec<T> {
        self.store.borrow().clone()
    }

    fn any(&self) -> bool {
        !self.is_empty()
    }

    fn any_where<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.as_slice().iter().any(predicate)
    }

    fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.as_slice().iter().all(predicate)
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.as_slice().iter().filter(|item| predicate(item)).count()
    }

    fn average<F>(&self, selector: F) -> QueryResult<f64>
    where
        F: Fn(T) -> f64,
    {
        let items = self.as_slice();
        if items.is_empty() {
            return Err(QueryError::NoElements);
        }
        let total: f64 = items.iter().map(|item| selector(item.clone())).sum();
        Ok(total / items.len() as f64)
    }

    fn element_at_or_default(&self, index: isize) -> QueryResult<Option<T>> {
        let index = checked_index(index)?;
        Ok(self.as_slice().get(index).cloned())
    }

    fn element_at(&self, index: isize) -> QueryResult<T> {
        let position = checked_index(index)?;
        let items = self.as_slice();
        items.get(position).cloned().ok_or(QueryError::OutOfBounds {
            index: position,
            len: items.len(),
        })
    }

    fn first_or_default(&self) -> Option<T> {
        self.as_slice().first().cloned()
    }

    fn first_or_default_where<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.as_slice().iter().find(|item| predicate(item)).cloned()
    }

    fn last_or_default(&self) -> Option<T> {
        self.as_slice().last().cloned()
    }

    fn last_or_default_where<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.as_slice().iter().rev().find(|item| predicate(item)).cloned()
    }

    fn aggregate<F>(&self, mut aggregator: F) -> QueryResult<T>
    where
        F: FnMut(T, T) -> T,
    {
        let items = self.as_slice();
        let (seed, rest) = items.split_first().ok_or(QueryError::NoElements)?;
        Ok(rest
            .iter()
            .fold(seed.clone(), |acc, item| aggregator(acc, item.clone())))
    }

    fn fold<A, F>(&self, seed: A, mut aggregator: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        self.as_slice()
            .iter()
            .fold(seed, |acc, item| aggregator(acc, item.clone()))
    }

    fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(T),
    {
        for item in self.as_slice().iter() {
            action(item.clone());
        }
    }

    fn for_each_indexed<F>(&self, mut action: F)
    where
        F: FnMut(T, usize),
    {
        for (index, item) in self.as_slice().iter().enumerate() {
            action(item.clone(), index);
        }
    }
}

/// Implement [`Queryable`] for a collection wrapping an `ArrayQueryable` in
/// a field named `inner`, forwarding the primitives and every fast path.
macro_rules! forward_queryable {
    ($collection:ident) => {
        impl<T: Clone + 'static> $crate::queryable::Queryable<T> for $collection<T> {
            fn as_sequence(&self) -> $crate::sequence::Sequence<T> {
                self.inner.as_sequence()
            }

            fn to_array(&self) -> Vec<T> {
                self.inner.to_array()
            }

            fn any(&self) -> bool {
                self.inner.any()
            }

            fn any_where<P>(&self, predicate: P) -> bool
            where
                P: Fn(&T) -> bool,
            {
                self.inner.any_where(predicate)
            }

            fn all<P>(&self, predicate: P) -> bool
            where
                P: Fn(&T) -> bool,
            {
                self.inner.all(predicate)
            }

            fn count(&self) -> usize {
                self.inner.count()
            }

            fn count_where<P>(&self, predicate: P) -> usize
            where
                P: Fn(&T) -> bool,
            {
                self.inner.count_where(predicate)
            }

            fn average<F>(&self, selector: F) -> $crate::error::QueryResult<f64>
            where
                F: Fn(T) -> f64,
            {
                self.inner.average(selector)
            }

            fn element_at_or_default(
                &self,
                index: isize,
            ) -> $crate::error::QueryResult<Option<T>> {
                self.inner.element_at_or_default(index)
            }

            fn element_at(&self, index: isize) -> $crate::error::QueryResult<T> {
                self.inner.element_at(index)
            }

            fn first_or_default(&self) -> Option<T> {
                self.inner.first_or_default()
            }

            fn first_or_default_where<P>(&self, predicate: P) -> Option<T>
            where
                P: Fn(&T) -> bool,
            {
                self.inner.first_or_default_where(predicate)
            }

            fn last_or_default(&self) -> Option<T> {
                self.inner.last_or_default()
            }

            fn last_or_default_where<P>(&self, predicate: P) -> Option<T>
            where
                P: Fn(&T) -> bool,
            {
                self.inner.last_or_default_where(predicate)
            }

            fn aggregate<F>(&self, aggregator: F) -> $crate::error::QueryResult<T>
            where
                F: FnMut(T, T) -> T,
            {
                self.inner.aggregate(aggregator)
            }

            fn fold<A, F>(&self, seed: A, aggregator: F) -> A
            where
                F: FnMut(A, T) -> A,
            {
                self.inner.fold(seed, aggregator)
            }

            fn for_each<F>(&self, action: F)
            where
                F: FnMut(T),
            {
                self.inner.for_each(action)
            }

            fn for_each_indexed<F>(&self, action: F)
            where
                F: FnMut(T, usize),
            {
                self.inner.for_each_indexed(action)
            }
        }
    };
}

pub(crate) use forward_queryable;

impl<T: Clone> Clone for ArrayQueryable<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T> Default for ArrayQueryable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ArrayQueryable<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for ArrayQueryable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: PartialEq> PartialEq for ArrayQueryable<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.as_slice() == *other.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayQueryable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> ArrayQueryable<i32> {
        ArrayQueryable::from_vec(vec![5, 1, 4, 2])
    }

    #[test]
    fn test_to_array_is_a_snapshot() {
        let array = numbers();
        let mut snapshot = array.to_array();
        snapshot.push(99);
        assert_eq!(array.len(), 4);
    }

    #[test]
    fn test_copy_owns_its_store() {
        let original = numbers();
        let mut copy = original.copy();
        copy.store_mut().push(7);
        assert_eq!(original.len(), 4);
        assert_eq!(copy.len(), 5);
    }

    #[test]
    fn test_sequence_sees_later_mutation() {
        let mut array = numbers();
        let evens = array.filter(|x| x % 2 == 0);
        array.store_mut().push(8);
        assert_eq!(evens.to_array(), vec![4, 2, 8]);
    }

    #[test]
    fn test_fast_paths() {
        let array = numbers();
        assert!(array.any());
        assert_eq!(array.count(), 4);
        assert_eq!(array.count_where(|x| *x > 2), 2);
        assert_eq!(array.first_or_default_where(|x| *x < 3), Some(1));
        assert_eq!(array.last_or_default_where(|x| *x > 3), Some(4));
        assert_eq!(array.element_at_or_default(3), Ok(Some(2)));
        assert_eq!(array.element_at(2), Ok(4));
        assert_eq!(
            array.element_at(4),
            Err(QueryError::OutOfBounds { index: 4, len: 4 })
        );
        assert_eq!(array.aggregate(|a, b| a.max(b)), Ok(5));
        assert_eq!(array.average(|x| x as f64), Ok(3.0));
    }

    #[test]
    fn test_empty_fast_paths() {
        let array: ArrayQueryable<i32> = ArrayQueryable::new();
        assert!(!array.any());
        assert_eq!(array.first_or_default(), None);
        assert_eq!(array.last_or_default(), None);
        assert_eq!(array.aggregate(|a, b| a + b), Err(QueryError::NoElements));
        assert_eq!(array.average(|x| x as f64), Err(QueryError::NoElements));
        assert_eq!(array.fold(10, |acc, x| acc + x), 10);
    }

    #[test]
    fn test_for_each_indexed_visits_in_order() {
        let mut visited = Vec::new();
        numbers().for_each_indexed(|item, index| visited.push((index, item)));
        assert_eq!(visited, vec![(0, 5), (1, 1), (2, 4), (3, 2)]);
    }

    #[test]
    fn test_debug_lists_elements() {
        assert_eq!(format!("{:?}", numbers()), "[5, 1, 4, 2]");
    }
}
