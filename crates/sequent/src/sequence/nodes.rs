//! Lazy pipeline nodes
//!
//! Each node owns handles to its upstream sequence(s) plus one immutable
//! operation. `iterate` clones those handles into the returned cursor, so the
//! cursor owns everything it pulls from.

use super::{Enumerable, Sequence, SequenceIter};
use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

// ============================================================================
// Sources
// ============================================================================

/// Yields nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySource;

impl<T: 'static> Enumerable<T> for EmptySource {
    fn iterate(&self) -> SequenceIter<T> {
        Box::new(std::iter::empty())
    }

    fn kind(&self) -> &'static str {
        "empty"
    }
}

/// Yields an owned snapshot in index order
pub struct VecSource<T> {
    items: Rc<Vec<T>>,
}

impl<T> VecSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(items),
        }
    }
}

impl<T: Clone + 'static> Enumerable<T> for VecSource<T> {
    fn iterate(&self) -> SequenceIter<T> {
        let items = Rc::clone(&self.items);
        let mut index = 0;
        Box::new(std::iter::from_fn(move || {
            let item = items.get(index).cloned();
            index += 1;
            item
        }))
    }

    fn kind(&self) -> &'static str {
        "vec"
    }
}

/// Yields the live backing store of an array-backed collection.
///
/// The store is re-borrowed on every pull, so elements pushed after the
/// sequence was built are observed and no borrow outlives a single `next`.
pub struct ArraySource<T> {
    store: Rc<RefCell<Vec<T>>>,
}

impl<T> ArraySource<T> {
    pub fn new(store: Rc<RefCell<Vec<T>>>) -> Self {
        Self { store }
    }
}

impl<T: Clone + 'static> Enumerable<T> for ArraySource<T> {
    fn iterate(&self) -> SequenceIter<T> {
        let store = Rc::clone(&self.store);
        let mut index = 0;
        Box::new(std::iter::from_fn(move || {
            let item = store.borrow().get(index).cloned();
            index += 1;
            item
        }))
    }

    fn kind(&self) -> &'static str {
        "array"
    }
}

// ============================================================================
// Streaming nodes
// ============================================================================

/// Projects every element (`select`)
pub struct TransformNode<T, U> {
    source: Sequence<T>,
    selector: Rc<dyn Fn(T) -> U>,
}

impl<T, U> TransformNode<T, U> {
    pub fn new(source: Sequence<T>, selector: impl Fn(T) -> U + 'static) -> Self {
        Self {
            source,
            selector: Rc::new(selector),
        }
    }
}

impl<T: Clone + 'static, U: 'static> Enumerable<U> for TransformNode<T, U> {
    fn iterate(&self) -> SequenceIter<U> {
        let selector = Rc::clone(&self.selector);
        Box::new(self.source.iter().map(move |item| selector(item)))
    }

    fn kind(&self) -> &'static str {
        "transform"
    }
}

/// Keeps elements matching a predicate (`filter`)
pub struct ConditionalNode<T> {
    source: Sequence<T>,
    predicate: Rc<dyn Fn(&T) -> bool>,
}

impl<T> ConditionalNode<T> {
    pub fn new(source: Sequence<T>, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Self {
            source,
            predicate: Rc::new(predicate),
        }
    }
}

impl<T: Clone + 'static> Enumerable<T> for ConditionalNode<T> {
    fn iterate(&self) -> SequenceIter<T> {
        let predicate = Rc::clone(&self.predicate);
        Box::new(self.source.iter().filter(move |item| predicate(item)))
    }

    fn kind(&self) -> &'static str {
        "conditional"
    }
}

/// Contiguous window: skip `skip` elements, then yield at most `take`.
///
/// `None` bounds mean "from the start" and "to the end" respectively.
pub struct RangeNode<T> {
    source: Sequence<T>,
    skip: Option<usize>,
    take: Option<usize>,
}

impl<T> RangeNode<T> {
    pub fn new(source: Sequence<T>, skip: Option<usize>, take: Option<usize>) -> Self {
        Self { source, skip, take }
    }
}

impl<T: Clone + 'static> Enumerable<T> for RangeNode<T> {
    fn iterate(&self) -> SequenceIter<T> {
        let iter = self.source.iter().skip(self.skip.unwrap_or(0));
        match self.take {
            Some(take) => Box::new(iter.take(take)),
            None => Box::new(iter),
        }
    }

    fn kind(&self) -> &'static str {
        "range"
    }
}

/// First occurrence per key, in first-seen order (`distinct`)
pub struct UniqueNode<T, K> {
    source: Sequence<T>,
    key_selector: Rc<dyn Fn(&T) -> K>,
}

impl<T, K> UniqueNode<T, K> {
    pub fn new(source: Sequence<T>, key_selector: impl Fn(&T) -> K + 'static) -> Self {
        Self {
            source,
            key_selector: Rc::new(key_selector),
        }
    }
}

impl<T: Clone + 'static, K: Eq + Hash + 'static> Enumerable<T> for UniqueNode<T, K> {
    fn iterate(&self) -> SequenceIter<T> {
        let key_selector = Rc::clone(&self.key_selector);
        let mut seen = HashSet::new();
        Box::new(
            self.source
                .iter()
                .filter(move |item| seen.insert(key_selector(item))),
        )
    }

    fn kind(&self) -> &'static str {
        "unique"
    }
}

/// Left sequence, then right sequence
pub struct ConcatNode<T> {
    left: Sequence<T>,
    right: Sequence<T>,
}

impl<T> ConcatNode<T> {
    pub fn new(left: Sequence<T>, right: Sequence<T>) -> Self {
        Self { left, right }
    }
}

impl<T: Clone + 'static> Enumerable<T> for ConcatNode<T> {
    fn iterate(&self) -> SequenceIter<T> {
        Box::new(self.left.iter().chain(self.right.iter()))
    }

    fn kind(&self) -> &'static str {
        "concat"
    }
}

/// Concatenation of the inner sequence produced for every outer element
/// (`select_many`). Outer order and inner order are both preserved.
pub struct FlattenNode<T, U> {
    source: Sequence<T>,
    selector: Rc<dyn Fn(T) -> Sequence<U>>,
}

impl<T, U> FlattenNode<T, U> {
    pub fn new(source: Sequence<T>, selector: impl Fn(T) -> Sequence<U> + 'static) -> Self {
        Self {
            source,
            selector: Rc::new(selector),
        }
    }
}

impl<T: Clone + 'static, U: Clone + 'static> Enumerable<U> for FlattenNode<T, U> {
    fn iterate(&self) -> SequenceIter<U> {
        let selector = Rc::clone(&self.selector);
        Box::new(self.source.iter().flat_map(move |item| selector(item).iter()))
    }

    fn kind(&self) -> &'static str {
        "flatten"
    }
}

/// Distinct elements of `source` that never occur in `excluded`
pub struct ExceptNode<T> {
    source: Sequence<T>,
    excluded: Sequence<T>,
}

impl<T> ExceptNode<T> {
    pub fn new(source: Sequence<T>, excluded: Sequence<T>) -> Self {
        Self { source, excluded }
    }
}

impl<T: Clone + Eq + Hash + 'static> Enumerable<T> for ExceptNode<T> {
    fn iterate(&self) -> SequenceIter<T> {
        let excluded = self.excluded.clone();
        let mut blocked: Option<HashSet<T>> = None;
        Box::new(self.source.iter().filter(move |item| {
            let blocked = blocked.get_or_insert_with(|| excluded.iter().collect());
            blocked.insert(item.clone())
        }))
    }

    fn kind(&self) -> &'static str {
        "except"
    }
}

// ============================================================================
// Materializing nodes
// ============================================================================

/// Cursor that builds its buffer on the first `next` call
pub(crate) struct Materialize<T, F> {
    build: Option<F>,
    items: std::vec::IntoIter<T>,
}

impl<T, F: FnOnce() -> Vec<T>> Materialize<T, F> {
    pub(crate) fn new(build: F) -> Self {
        Self {
            build: Some(build),
            items: Vec::new().into_iter(),
        }
    }
}

impl<T, F: FnOnce() -> Vec<T>> Iterator for Materialize<T, F> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(build) = self.build.take() {
            self.items = build().into_iter();
        }
        self.items.next()
    }
}

/// Upstream elements in reverse order; pulls the whole upstream first
pub struct ReverseNode<T> {
    source: Sequence<T>,
}

impl<T> ReverseNode<T> {
    pub fn new(source: Sequence<T>) -> Self {
        Self { source }
    }
}

impl<T: Clone + 'static> Enumerable<T> for ReverseNode<T> {
    fn iterate(&self) -> SequenceIter<T> {
        let source = self.source.clone();
        Box::new(Materialize::new(move || {
            let mut items: Vec<T> = source.iter().collect();
            items.reverse();
            items
        }))
    }

    fn kind(&self) -> &'static str {
        "reverse"
    }
}
