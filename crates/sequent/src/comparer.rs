//! Comparer construction for ordered sequences
//!
//! Builds total-order comparison functions from a key selector, a direction
//! and an optional custom key comparer. Sort nodes only ever call the result
//! pairwise.

use std::cmp::Ordering;
use std::rc::Rc;

/// Pairwise comparison function over elements
pub type Comparer<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Natural comparison for keys: `PartialOrd`, with incomparable pairs
/// (e.g. NaN) treated as equal so the sort stays total.
pub fn natural_order<K: PartialOrd>(a: &K, b: &K) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Build a comparer over `T` that compares `key_selector` results.
///
/// Uses `custom` to compare keys when given, natural order otherwise.
/// `ascending = false` inverts the result.
pub fn create_comparer<T, K, S>(
    key_selector: S,
    ascending: bool,
    custom: Option<Comparer<K>>,
) -> Comparer<T>
where
    T: 'static,
    K: PartialOrd + 'static,
    S: Fn(&T) -> K + 'static,
{
    match custom {
        Some(compare) => key_comparer(key_selector, ascending, move |a: &K, b: &K| compare(a, b)),
        None => key_comparer(key_selector, ascending, natural_order::<K>),
    }
}

/// Build a comparer from a key selector and an explicit key comparison.
///
/// Unlike [`create_comparer`] the key type needs no ordering of its own.
pub fn key_comparer<T, K, S, C>(key_selector: S, ascending: bool, compare: C) -> Comparer<T>
where
    T: 'static,
    K: 'static,
    S: Fn(&T) -> K + 'static,
    C: Fn(&K, &K) -> Ordering + 'static,
{
    Rc::new(move |a: &T, b: &T| {
        let ordering = compare(&key_selector(a), &key_selector(b));
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    })
}

/// Chain two comparers: `secondary` only breaks ties left by `primary`.
pub fn then_comparer<T: 'static>(primary: Comparer<T>, secondary: Comparer<T>) -> Comparer<T> {
    Rc::new(move |a: &T, b: &T| primary(a, b).then_with(|| secondary(a, b)))
}
