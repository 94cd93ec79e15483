//! The query capability contract
//!
//! [`Queryable`] needs two primitives from an implementor, [`as_sequence`]
//! and [`to_array`], and derives the whole operation surface from them.
//! Derived operations are written in terms of other operations rather than
//! re-implementing iteration, so a type that supplies only the primitives
//! behaves exactly like one that overrides the hot paths.
//!
//! Transformations return a new lazy [`Sequence`] immediately and touch no
//! elements. Terminal operations pull the whole chain once per call.
//!
//! Overloads are spelled as separate methods: `first` / `first_where`,
//! `min` / `min_of`, `aggregate` / `fold`, `order_by` / `order_by_with`.
//!
//! [`as_sequence`]: Queryable::as_sequence
//! [`to_array`]: Queryable::to_array

use crate::collections::{Dictionary, List, Stack};
use crate::comparer::{create_comparer, key_comparer};
use crate::error::{checked_index, QueryError, QueryResult};
use crate::sequence::{
    ConcatNode, ConditionalNode, ExceptNode, FlattenNode, IntoSequence, OrderedSequence,
    RangeNode, ReverseNode, Sequence, TransformNode, UniqueNode,
};
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::Hash;

/// Read-only query operations over a sequence of `T`.
pub trait Queryable<T: Clone + 'static> {
    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    /// View the elements as a lazy sequence
    fn as_sequence(&self) -> Sequence<T>;

    /// Materialize the elements into an owned snapshot
    fn to_array(&self) -> Vec<T>;

    // ------------------------------------------------------------------
    // Conversion
    // ------------------------------------------------------------------

    /// Copy the elements into a new [`List`]
    fn to_list(&self) -> List<T> {
        List::from_vec(self.to_array())
    }

    /// Copy the elements into a new [`Stack`], last element on top
    fn to_stack(&self) -> Stack<T> {
        Stack::from_vec(self.to_array())
    }

    /// Build a [`Dictionary`] from two projections.
    ///
    /// # Errors
    /// `KeyExists` if two elements project to the same key.
    fn to_dictionary<K, V, KS, VS>(
        &self,
        key_selector: KS,
        value_selector: VS,
    ) -> QueryResult<Dictionary<K, V>>
    where
        K: Display,
        KS: Fn(&T) -> K,
        VS: Fn(&T) -> V,
    {
        Dictionary::from_array(self.to_array(), key_selector, value_selector)
    }

    // ------------------------------------------------------------------
    // Transformations (lazy)
    // ------------------------------------------------------------------

    /// Elements matching `predicate`
    fn filter<P>(&self, predicate: P) -> Sequence<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        Sequence::new(ConditionalNode::new(self.as_sequence(), predicate))
    }

    /// Project every element through `selector`
    fn select<U, F>(&self, selector: F) -> Sequence<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + 'static,
    {
        Sequence::new(TransformNode::new(self.as_sequence(), selector))
    }

    /// Project every element to a sequence and concatenate the results.
    ///
    /// The selector may return anything convertible into a sequence: a
    /// `Vec`, an array, another `Sequence`. Outer order is kept and each
    /// group keeps its own order.
    fn select_many<U, S, F>(&self, selector: F) -> Sequence<U>
    where
        U: Clone + 'static,
        S: IntoSequence<U>,
        F: Fn(T) -> S + 'static,
    {
        Sequence::new(FlattenNode::new(self.as_sequence(), move |item| {
            selector(item).into_sequence()
        }))
    }

    /// First occurrence of each element
    fn distinct(&self) -> Sequence<T>
    where
        T: Eq + Hash,
    {
        self.distinct_by(|item: &T| item.clone())
    }

    /// First element for each distinct key
    fn distinct_by<K, F>(&self, key_selector: F) -> Sequence<T>
    where
        K: Eq + Hash + 'static,
        F: Fn(&T) -> K + 'static,
    {
        Sequence::new(UniqueNode::new(self.as_sequence(), key_selector))
    }

    /// This sequence followed by `other`
    fn concat<S>(&self, other: S) -> Sequence<T>
    where
        S: IntoSequence<T>,
    {
        Sequence::new(ConcatNode::new(self.as_sequence(), other.into_sequence()))
    }

    /// Elements in reverse order
    fn reverse(&self) -> Sequence<T> {
        Sequence::new(ReverseNode::new(self.as_sequence()))
    }

    /// Drop the first `amount` elements
    fn skip(&self, amount: usize) -> Sequence<T> {
        Sequence::new(RangeNode::new(self.as_sequence(), Some(amount), None))
    }

    /// At most the first `amount` elements
    fn take(&self, amount: usize) -> Sequence<T> {
        Sequence::new(RangeNode::new(self.as_sequence(), None, Some(amount)))
    }

    /// `distinct(concat(other))`
    fn union<S>(&self, other: S) -> Sequence<T>
    where
        T: Eq + Hash,
        S: IntoSequence<T>,
    {
        self.concat(other).distinct()
    }

    /// Distinct elements of `self` that do not occur in `other`
    fn except<S>(&self, other: S) -> Sequence<T>
    where
        T: Eq + Hash,
        S: IntoSequence<T>,
    {
        Sequence::new(ExceptNode::new(self.as_sequence(), other.into_sequence()))
    }

    /// Stable ascending sort by key, deferred until enumerated
    fn order_by<K, F>(&self, key_selector: F) -> OrderedSequence<T>
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        OrderedSequence::new(
            self.as_sequence(),
            create_comparer(key_selector, true, None),
        )
    }

    /// Like `order_by`, comparing keys with `compare`
    fn order_by_with<K, F, C>(&self, key_selector: F, compare: C) -> OrderedSequence<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        OrderedSequence::new(self.as_sequence(), key_comparer(key_selector, true, compare))
    }

    /// Stable descending sort by key
    fn order_by_descending<K, F>(&self, key_selector: F) -> OrderedSequence<T>
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        OrderedSequence::new(
            self.as_sequence(),
            create_comparer(key_selector, false, None),
        )
    }

    /// Like `order_by_descending`, comparing keys with `compare`
    fn order_by_descending_with<K, F, C>(&self, key_selector: F, compare: C) -> OrderedSequence<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        OrderedSequence::new(
            self.as_sequence(),
            key_comparer(key_selector, false, compare),
        )
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    /// First element, `None` when empty
    fn first_or_default(&self) -> Option<T> {
        self.as_sequence().iter().next()
    }

    /// First element matching `predicate`, if any
    fn first_or_default_where<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.as_sequence().iter().find(|item| predicate(item))
    }

    /// First element.
    ///
    /// # Errors
    /// `NoElements` on an empty sequence.
    fn first(&self) -> QueryResult<T> {
        self.first_or_default().ok_or(QueryError::NoElements)
    }

    /// First element matching `predicate`.
    ///
    /// # Errors
    /// `NoElements` if nothing matches.
    fn first_where<P>(&self, predicate: P) -> QueryResult<T>
    where
        P: Fn(&T) -> bool,
    {
        self.first_or_default_where(predicate)
            .ok_or(QueryError::NoElements)
    }

    /// Last element, `None` when empty
    fn last_or_default(&self) -> Option<T> {
        self.as_sequence().iter().last()
    }

    /// Last element matching `predicate`, if any
    fn last_or_default_where<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.as_sequence()
            .iter()
            .filter(|item| predicate(item))
            .last()
    }

    /// Last element, `NoElements` when empty
    fn last(&self) -> QueryResult<T> {
        self.last_or_default().ok_or(QueryError::NoElements)
    }

    /// Last element matching `predicate`
    fn last_where<P>(&self, predicate: P) -> QueryResult<T>
    where
        P: Fn(&T) -> bool,
    {
        self.last_or_default_where(predicate)
            .ok_or(QueryError::NoElements)
    }

    /// The only element, or `None` when empty.
    ///
    /// # Errors
    /// `MoreThanOneElement` if a second element exists.
    fn single_or_default(&self) -> QueryResult<Option<T>> {
        single_of(self.as_sequence().iter())
    }

    /// The only element matching `predicate`, if any
    fn single_or_default_where<P>(&self, predicate: P) -> QueryResult<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        single_of(self.as_sequence().iter().filter(|item| predicate(item)))
    }

    /// The only element. Errors when there are zero or several.
    fn single(&self) -> QueryResult<T> {
        self.single_or_default()?.ok_or(QueryError::NoElements)
    }

    /// The only element matching `predicate`
    fn single_where<P>(&self, predicate: P) -> QueryResult<T>
    where
        P: Fn(&T) -> bool,
    {
        self.single_or_default_where(predicate)?
            .ok_or(QueryError::NoElements)
    }

    /// Element at `index`, `None` past the end.
    ///
    /// # Errors
    /// `NegativeIndex` for any negative index.
    fn element_at_or_default(&self, index: isize) -> QueryResult<Option<T>> {
        let index = checked_index(index)?;
        Ok(self.as_sequence().iter().nth(index))
    }

    /// # Errors
    /// `NegativeIndex` for a negative index, `OutOfBounds` past the end.
    fn element_at(&self, index: isize) -> QueryResult<T> {
        let position = checked_index(index)?;
        let mut len = 0;
        for element in self.as_sequence().iter() {
            if len == position {
                return Ok(element);
            }
            len += 1;
        }
        Err(QueryError::OutOfBounds {
            index: position,
            len,
        })
    }

    // ------------------------------------------------------------------
    // Aggregation
    // ------------------------------------------------------------------

    /// Fold without a seed: the first element seeds the accumulator.
    ///
    /// # Errors
    /// `NoElements` on an empty sequence.
    fn aggregate<F>(&self, aggregator: F) -> QueryResult<T>
    where
        F: FnMut(T, T) -> T,
    {
        let mut iter = self.as_sequence().iter();
        let seed = iter.next().ok_or(QueryError::NoElements)?;
        Ok(iter.fold(seed, aggregator))
    }

    /// Fold from an explicit seed
    fn fold<A, F>(&self, seed: A, aggregator: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        self.as_sequence().iter().fold(seed, aggregator)
    }

    /// Smallest element, `NoElements` when empty
    fn min(&self) -> QueryResult<T>
    where
        T: PartialOrd,
    {
        self.aggregate(|previous, current| {
            if previous < current {
                previous
            } else {
                current
            }
        })
    }

    /// Minimum of the projected values (not of the source elements)
    fn min_of<U, F>(&self, selector: F) -> QueryResult<U>
    where
        U: Clone + PartialOrd + 'static,
        F: Fn(T) -> U + 'static,
    {
        self.select(selector).min()
    }

    /// Largest element, `NoElements` when empty
    fn max(&self) -> QueryResult<T>
    where
        T: PartialOrd,
    {
        self.aggregate(|previous, current| {
            if previous > current {
                previous
            } else {
                current
            }
        })
    }

    /// Maximum of the projected values (not of the source elements)
    fn max_of<U, F>(&self, selector: F) -> QueryResult<U>
    where
        U: Clone + PartialOrd + 'static,
        F: Fn(T) -> U + 'static,
    {
        self.select(selector).max()
    }

    /// Sum of the projected values, `0.0` when empty
    fn sum<F>(&self, selector: F) -> f64
    where
        F: Fn(T) -> f64,
    {
        self.fold(0.0, |total, item| total + selector(item))
    }

    /// Mean of the projected values.
    ///
    /// # Errors
    /// `NoElements` on an empty sequence.
    fn average<F>(&self, selector: F) -> QueryResult<f64>
    where
        F: Fn(T) -> f64,
    {
        let (total, count) = self.fold((0.0, 0usize), |(total, count), item| {
            (total + selector(item), count + 1)
        });
        if count == 0 {
            return Err(QueryError::NoElements);
        }
        Ok(total / count as f64)
    }

    // ------------------------------------------------------------------
    // Predicates and counting
    // ------------------------------------------------------------------

    /// `true` if there is at least one element
    fn any(&self) -> bool {
        self.as_sequence().iter().next().is_some()
    }

    /// `true` if any element matches `predicate`
    fn any_where<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.as_sequence().iter().any(|item| predicate(&item))
    }

    /// `true` if every element matches; vacuously true when empty
    fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.as_sequence().iter().all(|item| predicate(&item))
    }

    /// Whether an equal element occurs
    fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.any_where(|item| item == element)
    }

    /// Number of elements
    fn count(&self) -> usize {
        self.as_sequence().iter().count()
    }

    /// Number of elements matching `predicate`
    fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.as_sequence()
            .iter()
            .filter(|item| predicate(item))
            .count()
    }

    // ------------------------------------------------------------------
    // Side effects
    // ------------------------------------------------------------------

    /// Run `action` once per element, in order
    fn for_each<F>(&self, action: F)
    where
        F: FnMut(T),
    {
        self.as_sequence().iter().for_each(action)
    }

    /// Like `for_each`, also passing the element's position
    fn for_each_indexed<F>(&self, mut action: F)
    where
        F: FnMut(T, usize),
    {
        for (index, item) in self.as_sequence().iter().enumerate() {
            action(item, index);
        }
    }
}

fn single_of<T>(mut iter: impl Iterator<Item = T>) -> QueryResult<Option<T>> {
    match (iter.next(), iter.next()) {
        (None, _) => Ok(None),
        (Some(only), None) => Ok(Some(only)),
        (Some(_), Some(_)) => Err(QueryError::MoreThanOneElement),
    }
}
