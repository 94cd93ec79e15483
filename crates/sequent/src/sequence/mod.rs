//! Lazy sequences
//!
//! A [`Sequence`] is a cheap, cloneable handle to an immutable node graph.
//! Every node implements [`Enumerable`]: each call to `iterate` starts a fresh
//! pull cycle from the outermost node down to the source, so a sequence can be
//! consumed any number of times. Nodes hold their upstreams, never their
//! output, and results always reflect the live state of the source.
//!
//! Mutating an eager collection while one of its sequences is being pulled is
//! unspecified: the source re-reads the backing store on every pull and never
//! panics, but the elements observed may be inconsistent.

mod nodes;
mod ordered;

pub use nodes::{
    ArraySource, ConcatNode, ConditionalNode, EmptySource, ExceptNode, FlattenNode, RangeNode,
    ReverseNode, TransformNode, UniqueNode, VecSource,
};
pub use ordered::OrderedSequence;

use crate::queryable::Queryable;
use std::fmt;
use std::rc::Rc;

/// Owning cursor produced by one pull cycle
pub type SequenceIter<T> = Box<dyn Iterator<Item = T>>;

/// A restartable, lazily evaluated source of elements.
///
/// Implement this to plug a custom source into the query pipeline through
/// [`Sequence::new`].
pub trait Enumerable<T> {
    /// Start a new pull cycle. No upstream work happens until the returned
    /// iterator is advanced.
    fn iterate(&self) -> SequenceIter<T>;

    /// Short node name used by `Debug` output
    fn kind(&self) -> &'static str {
        "custom"
    }
}

/// Handle to a lazy node chain
pub struct Sequence<T> {
    node: Rc<dyn Enumerable<T>>,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Wrap a node
    pub fn new(node: impl Enumerable<T> + 'static) -> Self {
        Self {
            node: Rc::new(node),
        }
    }

    /// Sequence that yields nothing
    pub fn empty() -> Self {
        Self::new(EmptySource)
    }

    /// Sequence over an owned snapshot of `items`
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::new(VecSource::new(items))
    }

    /// Start a pull cycle over this sequence
    pub fn iter(&self) -> SequenceIter<T> {
        self.node.iterate()
    }
}

impl<T> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("node", &self.node.kind())
            .finish()
    }
}

impl<T: Clone + 'static> Default for Sequence<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone + 'static> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone + 'static> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = SequenceIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + 'static> IntoIterator for &Sequence<T> {
    type Item = T;
    type IntoIter = SequenceIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + 'static> Queryable<T> for Sequence<T> {
    fn as_sequence(&self) -> Sequence<T> {
        self.clone()
    }

    fn to_array(&self) -> Vec<T> {
        self.iter().collect()
    }
}

/// Anything that can be viewed as a lazy [`Sequence`]: owned vectors and
/// arrays (snapshotted), sequences themselves, and references to any
/// [`Queryable`] (viewed live).
pub trait IntoSequence<T> {
    fn into_sequence(self) -> Sequence<T>;
}

impl<T: Clone + 'static> IntoSequence<T> for Sequence<T> {
    fn into_sequence(self) -> Sequence<T> {
        self
    }
}

impl<T: Clone + 'static> IntoSequence<T> for Vec<T> {
    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_vec(self)
    }
}

impl<T: Clone + 'static, const N: usize> IntoSequence<T> for [T; N] {
    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_vec(Vec::from(self))
    }
}

impl<T, Q> IntoSequence<T> for &Q
where
    T: Clone + 'static,
    Q: Queryable<T> + ?Sized,
{
    fn into_sequence(self) -> Sequence<T> {
        self.as_sequence()
    }
}
