//! Sorted sequences with `then_by` chaining

use super::nodes::Materialize;
use super::{Enumerable, Sequence, SequenceIter};
use crate::comparer::{create_comparer, key_comparer, then_comparer, Comparer};
use crate::queryable::Queryable;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Sort node: yields upstream elements in comparer order.
///
/// The sort is stable, so elements with equal keys keep their upstream
/// relative order. Further keys are added with `then_by*`, which wrap the
/// original upstream with a chained comparer instead of sorting twice.
pub struct OrderedSequence<T> {
    source: Sequence<T>,
    comparer: Comparer<T>,
}

impl<T> Clone for OrderedSequence<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            comparer: Rc::clone(&self.comparer),
        }
    }
}

impl<T: Clone + 'static> OrderedSequence<T> {
    pub fn new(source: Sequence<T>, comparer: Comparer<T>) -> Self {
        Self { source, comparer }
    }

    fn then(&self, next: Comparer<T>) -> Self {
        Self {
            source: self.source.clone(),
            comparer: then_comparer(Rc::clone(&self.comparer), next),
        }
    }

    /// Break ties by an ascending secondary key
    pub fn then_by<K, F>(&self, key_selector: F) -> Self
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.then(create_comparer(key_selector, true, None))
    }

    /// Break ties by an ascending secondary key using a custom key comparison
    pub fn then_by_with<K, F, C>(&self, key_selector: F, compare: C) -> Self
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        self.then(key_comparer(key_selector, true, compare))
    }

    /// Break ties by a descending secondary key
    pub fn then_by_descending<K, F>(&self, key_selector: F) -> Self
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.then(create_comparer(key_selector, false, None))
    }

    /// Break ties by a descending secondary key using a custom key comparison
    pub fn then_by_descending_with<K, F, C>(&self, key_selector: F, compare: C) -> Self
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        self.then(key_comparer(key_selector, false, compare))
    }
}

impl<T: Clone + 'static> Enumerable<T> for OrderedSequence<T> {
    fn iterate(&self) -> SequenceIter<T> {
        let source = self.source.clone();
        let comparer = Rc::clone(&self.comparer);
        Box::new(Materialize::new(move || {
            let mut items: Vec<T> = source.iter().collect();
            // slice::sort_by is stable
            items.sort_by(|a, b| comparer(a, b));
            items
        }))
    }

    fn kind(&self) -> &'static str {
        "ordered"
    }
}

impl<T: Clone + 'static> Queryable<T> for OrderedSequence<T> {
    fn as_sequence(&self) -> Sequence<T> {
        Sequence::new(self.clone())
    }

    fn to_array(&self) -> Vec<T> {
        self.iterate().collect()
    }
}

impl<T> fmt::Debug for OrderedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedSequence")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
