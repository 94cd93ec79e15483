//! Stack collection - LIFO (Last-In-First-Out)
//!
//! Same backing store as [`List`](super::List), with mutation narrowed to the
//! tail. Queries enumerate from the bottom of the stack to the top.

use super::array::{forward_queryable, ArrayQueryable};
use crate::queryable::Queryable;
use sequent_config::CollectionsConfig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::Ref;
use std::fmt;

/// LIFO collection with O(1) push/pop
pub struct Stack<T> {
    inner: ArrayQueryable<T>,
}

impl<T> Stack<T> {
    /// Create new empty stack
    ///
    /// # Example
    /// ```rust
    /// # use sequent::Stack;
    /// let stack: Stack<i32> = Stack::new();
    /// assert!(stack.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            inner: ArrayQueryable::new(),
        }
    }

    /// Create stack with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: ArrayQueryable::with_capacity(capacity),
        }
    }

    /// Create stack sized by the `[stack]` section of a loaded configuration
    pub fn with_config(config: &CollectionsConfig) -> Self {
        Self::with_capacity(config.stack_capacity())
    }

    /// Create stack from elements; the last element is the top
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: ArrayQueryable::from_vec(items),
        }
    }

    /// Push element onto top of stack, returning the new length
    ///
    /// # Example
    /// ```rust
    /// # use sequent::Stack;
    /// let mut stack = Stack::new();
    /// assert_eq!(stack.push(1), 1);
    /// assert_eq!(stack.push(2), 2);
    /// ```
    pub fn push(&mut self, value: T) -> usize {
        let mut store = self.inner.store_mut();
        store.push(value);
        store.len()
    }

    /// Pop element from top of stack
    ///
    /// Returns `None` if stack is empty.
    ///
    /// # Example
    /// ```rust
    /// # use sequent::Stack;
    /// let mut stack = Stack::new();
    /// stack.push(1);
    /// assert_eq!(stack.pop(), Some(1));
    /// assert_eq!(stack.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        self.inner.store_mut().pop()
    }

    /// Get number of elements in stack
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove all elements from stack
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Read guard over the elements, bottom first
    pub fn as_slice(&self) -> Ref<'_, [T]> {
        self.inner.as_slice()
    }
}

impl<T: Clone> Stack<T> {
    /// View top element without removing
    ///
    /// # Example
    /// ```rust
    /// # use sequent::Stack;
    /// let mut stack = Stack::new();
    /// stack.push(42);
    /// assert_eq!(stack.peek(), Some(42));
    /// assert_eq!(stack.len(), 1);
    /// ```
    pub fn peek(&self) -> Option<T> {
        self.as_slice().last().cloned()
    }

    /// Independent stack with the same elements
    pub fn copy(&self) -> Self {
        Self {
            inner: self.inner.copy(),
        }
    }
}

forward_queryable!(Stack);

impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Stack<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: PartialEq> PartialEq for Stack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stack")?;
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl<T: Serialize> Serialize for Stack<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice().iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Stack<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::deserialize(deserializer).map(Self::from_vec)
    }
}
