//! queries.rs - end-to-end query behavior over eager and lazy sources

use pretty_assertions::assert_eq;
use rstest::rstest;
use sequent::{Dictionary, List, QueryError, Queryable, Sequence, Stack};

// ============================================================================
// Helpers
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Source {
    Eager,
    Lazy,
}

/// Run `check` against a list and against a plain lazy sequence holding the
/// same elements.
fn with_source<R>(source: Source, items: Vec<i32>, check: impl FnOnce(&dyn QuerySurface) -> R) -> R {
    match source {
        Source::Eager => check(&List::from_vec(items)),
        Source::Lazy => check(&Sequence::from_vec(items)),
    }
}

/// Object-safe slice of the query surface used by the parameterized tests
trait QuerySurface {
    fn head(&self) -> Result<i32, QueryError>;
    fn head_or_none(&self) -> Option<i32>;
    fn last_even(&self) -> Result<i32, QueryError>;
    fn only(&self) -> Result<i32, QueryError>;
    fn at(&self, index: isize) -> Result<i32, QueryError>;
    fn count_over(&self, floor: i32) -> usize;
    fn total(&self) -> f64;
    fn mean(&self) -> Result<f64, QueryError>;
    fn product(&self) -> Result<i32, QueryError>;
    fn smallest(&self) -> Result<i32, QueryError>;
    fn largest(&self) -> Result<i32, QueryError>;
    fn non_empty(&self) -> bool;
    fn all_positive(&self) -> bool;
    fn visited(&self) -> Vec<i32>;
}

impl<Q: Queryable<i32>> QuerySurface for Q {
    fn head(&self) -> Result<i32, QueryError> {
        self.first()
    }
    fn head_or_none(&self) -> Option<i32> {
        self.first_or_default()
    }
    fn last_even(&self) -> Result<i32, QueryError> {
        self.last_where(|x| x % 2 == 0)
    }
    fn only(&self) -> Result<i32, QueryError> {
        self.single()
    }
    fn at(&self, index: isize) -> Result<i32, QueryError> {
        self.element_at(index)
    }
    fn count_over(&self, floor: i32) -> usize {
        self.count_where(|x| *x > floor)
    }
    fn total(&self) -> f64 {
        self.sum(f64::from)
    }
    fn mean(&self) -> Result<f64, QueryError> {
        self.average(f64::from)
    }
    fn product(&self) -> Result<i32, QueryError> {
        self.aggregate(|a, b| a * b)
    }
    fn smallest(&self) -> Result<i32, QueryError> {
        self.min()
    }
    fn largest(&self) -> Result<i32, QueryError> {
        self.max()
    }
    fn non_empty(&self) -> bool {
        self.any()
    }
    fn all_positive(&self) -> bool {
        self.all(|x| *x > 0)
    }
    fn visited(&self) -> Vec<i32> {
        let mut seen = Vec::new();
        self.for_each(|x| seen.push(x));
        seen
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_order_by_identity() {
    let list = List::from_vec(vec![3, 1, 2]);
    assert_eq!(list.order_by(|x| *x).to_array(), vec![1, 2, 3]);
}

#[test]
fn test_filter_then_select() {
    let list = List::from_vec(vec![1, 2, 3, 4]);
    let result = list.filter(|x| x % 2 == 0).select(|x| x * 10);
    assert_eq!(result.to_array(), vec![20, 40]);
}

#[test]
fn test_empty_list_first() {
    let list: List<i32> = List::new();
    assert_eq!(list.first(), Err(QueryError::NoElements));
    assert_eq!(list.first_or_default(), None);
}

#[test]
fn test_dictionary_set_versus_set_or_update() {
    let mut map = Dictionary::new();
    map.set("a", 1).expect("fresh key");
    assert_eq!(
        map.set("a", 2),
        Err(QueryError::KeyExists { key: "a".into() })
    );
    map.set_or_update("a", 2);
    assert_eq!(map.get("a"), Some(2));
}

#[test]
fn test_skip_then_take() {
    let list = List::from_vec(vec![1, 2, 3, 4, 5]);
    assert_eq!(list.skip(1).take(2).to_array(), vec![2, 3]);
}

#[test]
fn test_stack_pop_then_peek() {
    let mut stack = Stack::new();
    stack.push(1);
    stack.push(2);
    stack.push(3);
    assert_eq!(stack.pop(), Some(3));
    assert_eq!(stack.peek(), Some(2));
}

#[test]
fn test_numeric_dictionary_keys_are_strings() {
    let map = Dictionary::from_pairs(vec![(1, "one"), (20, "twenty")]).expect("unique keys");
    let keys: Vec<String> = map.select(|pair| pair.key().clone()).to_array();
    assert_eq!(keys, vec!["1".to_string(), "20".to_string()]);
}

// ============================================================================
// Eager and lazy paths agree
// ============================================================================

#[rstest]
#[case::eager(Source::Eager)]
#[case::lazy(Source::Lazy)]
fn test_access_on_populated(#[case] source: Source) {
    with_source(source, vec![4, 7, 2, 9], |query| {
        assert_eq!(query.head(), Ok(4));
        assert_eq!(query.head_or_none(), Some(4));
        assert_eq!(query.last_even(), Ok(2));
        assert_eq!(query.only(), Err(QueryError::MoreThanOneElement));
        assert_eq!(query.at(3), Ok(9));
        assert_eq!(
            query.at(4),
            Err(QueryError::OutOfBounds { index: 4, len: 4 })
        );
        assert_eq!(
            query.at(-1),
            Err(QueryError::NegativeIndex { index: -1 })
        );
    });
}

#[rstest]
#[case::eager(Source::Eager)]
#[case::lazy(Source::Lazy)]
fn test_aggregates_on_populated(#[case] source: Source) {
    with_source(source, vec![4, 7, 2, 9], |query| {
        assert_eq!(query.count_over(3), 3);
        assert_eq!(query.total(), 22.0);
        assert_eq!(query.mean(), Ok(5.5));
        assert_eq!(query.product(), Ok(504));
        assert_eq!(query.smallest(), Ok(2));
        assert_eq!(query.largest(), Ok(9));
        assert!(query.non_empty());
        assert!(query.all_positive());
        assert_eq!(query.visited(), vec![4, 7, 2, 9]);
    });
}

#[rstest]
#[case::eager(Source::Eager)]
#[case::lazy(Source::Lazy)]
fn test_empty_source(#[case] source: Source) {
    with_source(source, vec![], |query| {
        assert_eq!(query.head(), Err(QueryError::NoElements));
        assert_eq!(query.head_or_none(), None);
        assert_eq!(query.last_even(), Err(QueryError::NoElements));
        assert_eq!(query.only(), Err(QueryError::NoElements));
        assert_eq!(query.total(), 0.0);
        assert_eq!(query.mean(), Err(QueryError::NoElements));
        assert_eq!(query.product(), Err(QueryError::NoElements));
        assert!(!query.non_empty());
        assert!(query.all_positive());
        assert_eq!(
            query.at(0),
            Err(QueryError::OutOfBounds { index: 0, len: 0 })
        );
    });
}

// ============================================================================
// Laziness and liveness
// ============================================================================

#[test]
fn test_chain_reflects_later_mutation() {
    let mut list = List::from_vec(vec![1, 2]);
    let doubled = list.select(|x| x * 2);
    list.push(3);
    assert_eq!(doubled.to_array(), vec![2, 4, 6]);
}

#[test]
fn test_selector_runs_only_when_consumed() {
    use std::cell::Cell;
    use std::rc::Rc;

    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let list = List::from_vec(vec![1, 2, 3]);
    let mapped = list.select(move |x| {
        counter.set(counter.get() + 1);
        x + 1
    });
    assert_eq!(calls.get(), 0);

    assert_eq!(mapped.first(), Ok(2));
    assert_eq!(calls.get(), 1);

    assert_eq!(mapped.to_array(), vec![2, 3, 4]);
    assert_eq!(calls.get(), 4);
}

#[test]
fn test_sort_deferred_until_first_pull() {
    use std::cell::Cell;
    use std::rc::Rc;

    let calls = Rc::new(Cell::new(0));
    let primary = Rc::clone(&calls);
    let secondary = Rc::clone(&calls);
    let list = List::from_vec(vec![(2, 'b'), (1, 'z'), (2, 'a')]);
    let sorted = list
        .order_by(move |pair| {
            primary.set(primary.get() + 1);
            pair.0
        })
        .then_by(move |pair| {
            secondary.set(secondary.get() + 1);
            pair.1
        });
    assert_eq!(calls.get(), 0);

    let mut iter = sorted.as_sequence().iter();
    assert_eq!(calls.get(), 0);
    assert_eq!(iter.next(), Some((1, 'z')));
    assert!(calls.get() > 0);
    assert_eq!(iter.collect::<Vec<_>>(), vec![(2, 'a'), (2, 'b')]);
}

#[test]
fn test_sequences_are_restartable() {
    let list = List::from_vec(vec![5, 3, 5, 1]);
    let chain = list.distinct().order_by_descending(|x| *x).reverse();
    assert_eq!(chain.to_array(), vec![1, 3, 5]);
    assert_eq!(chain.to_array(), vec![1, 3, 5]);
}

// ============================================================================
// Composite operations
// ============================================================================

#[test]
fn test_multi_key_sort_is_stable() {
    let people = List::from_vec(vec![
        ("ann", 30, 'b'),
        ("bo", 25, 'a'),
        ("cy", 30, 'a'),
        ("di", 25, 'a'),
        ("ed", 30, 'b'),
    ]);
    let ordered = people
        .order_by(|p| p.1)
        .then_by_descending(|p| p.2)
        .select(|p| p.0);
    assert_eq!(ordered.to_array(), vec!["bo", "di", "ann", "ed", "cy"]);
}

#[test]
fn test_order_by_with_custom_compare() {
    let words = List::from_vec(vec!["pear", "fig", "banana", "kiwi"]);
    let by_length = words.order_by_with(|w| w.len(), |a: &usize, b: &usize| a.cmp(b));
    assert_eq!(by_length.to_array(), vec!["fig", "pear", "kiwi", "banana"]);

    let longest_first =
        words.order_by_descending_with(|w| w.len(), |a: &usize, b: &usize| a.cmp(b));
    assert_eq!(longest_first.first(), Ok("banana"));
}

#[test]
fn test_select_many_accepts_collections() {
    let groups = List::from_vec(vec![1, 2, 3]);
    let inner = List::from_vec(vec![0, 1]);
    let expanded = groups.select_many(move |x| inner.select(move |y| x * 10 + y));
    assert_eq!(expanded.to_array(), vec![10, 11, 20, 21, 30, 31]);
}

#[test]
fn test_select_many_long_outer() {
    let outer = List::from_vec((0..50_000).collect());
    let flat = outer.select_many(|x| [x]);
    assert_eq!(flat.count(), 50_000);
}

#[test]
fn test_union_and_except() {
    let left = List::from_vec(vec![1, 2, 2, 3]);
    let right = List::from_vec(vec![3, 4]);
    assert_eq!(left.union(&right).to_array(), vec![1, 2, 3, 4]);
    assert_eq!(left.except(&right).to_array(), vec![1, 2]);
    assert_eq!(left.concat([9]).to_array(), vec![1, 2, 2, 3, 9]);
}

#[test]
fn test_min_of_projects_first() {
    let words = List::from_vec(vec!["ccc", "a", "bb"]);
    assert_eq!(words.min_of(|w| w.len()), Ok(1));
    assert_eq!(words.max_of(|w| w.len()), Ok(3));
    assert_eq!(words.min(), Ok("a"));
}

#[test]
fn test_single_variants() {
    let list = List::from_vec(vec![1, 2, 3]);
    assert_eq!(list.single_where(|x| *x == 2), Ok(2));
    assert_eq!(list.single_or_default_where(|x| *x > 5), Ok(None));
    assert_eq!(
        list.single_or_default_where(|x| *x > 1),
        Err(QueryError::MoreThanOneElement)
    );
    assert_eq!(List::from_vec(vec![7]).single(), Ok(7));
}

#[test]
fn test_conversions() {
    let list = List::from_vec(vec![("a", 1), ("b", 2)]);
    let map = list
        .to_dictionary(|p| p.0, |p| p.1)
        .expect("unique keys");
    assert_eq!(map.get("b"), Some(2));

    let stack = list.select(|p| p.1).to_stack();
    assert_eq!(stack.peek(), Some(2));

    let copy = list.filter(|p| p.1 > 1).to_list();
    assert_eq!(copy.to_array(), vec![("b", 2)]);
}

#[test]
fn test_to_array_snapshots_are_independent() {
    let list = List::from_vec(vec![1, 2, 3]);
    let mut first = list.to_array();
    let second = list.to_array();
    first[0] = 100;
    assert_eq!(second, vec![1, 2, 3]);
    assert_eq!(list.to_array(), vec![1, 2, 3]);
}

#[test]
fn test_push_range_then_copy() {
    let mut list = List::from_vec(vec![1, 2]);
    list.push_range(list.to_array());
    let mut copy = list.copy();
    assert_eq!(copy, list);

    copy.push(3);
    assert_eq!(list.len(), 4);
    assert_eq!(copy.len(), 5);
}

#[test]
fn test_for_each_indexed_on_list() {
    let list = List::from_vec(vec!['x', 'y']);
    let mut seen = Vec::new();
    list.for_each_indexed(|item, index| seen.push(format!("{}{}", index, item)));
    assert_eq!(seen, vec!["0x", "1y"]);
}
