//! Key-unique map
//!
//! Keys are identified by their external string form (`Display`), so `1` and
//! `"1"` name the same slot and a numeric-keyed dictionary enumerates its keys
//! as decimal strings. The typed keys are kept alongside and are available
//! through [`Dictionary::keys`] and [`Dictionary::entries`]. Entries keep
//! insertion order.

use crate::error::{QueryError, QueryResult};
use crate::queryable::Queryable;
use crate::sequence::{ArraySource, Sequence};
use sequent_config::CollectionsConfig;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::rc::Rc;

/// Immutable key/value record produced by dictionary enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyValuePair<K, V> {
    key: K,
    value: V,
}

impl<K, V> KeyValuePair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Insertion-ordered map with insert-once and insert-or-update semantics.
///
/// ```rust
/// use sequent::{Dictionary, Queryable, QueryError};
///
/// let mut scores = Dictionary::new();
/// scores.set("a", 1).unwrap();
/// assert_eq!(scores.set("a", 2), Err(QueryError::KeyExists { key: "a".into() }));
/// scores.set_or_update("a", 2);
/// assert_eq!(scores.get("a"), Some(2));
/// assert_eq!(scores.first().unwrap().key(), "a");
/// ```
pub struct Dictionary<K, V> {
    entries: Rc<RefCell<Vec<(K, V)>>>,
    slots: HashMap<String, usize>,
}

impl<K, V> Dictionary<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::with_capacity(capacity))),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Empty dictionary sized by the `[dictionary]` section of a loaded
    /// configuration
    pub fn with_config(config: &CollectionsConfig) -> Self {
        Self::with_capacity(config.dictionary_capacity())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.borrow_mut().clear();
        self.slots.clear();
    }

    fn entries_ref(&self) -> Ref<'_, Vec<(K, V)>> {
        self.entries.borrow()
    }
}

impl<K: Display, V> Dictionary<K, V> {
    /// Build from key/value pairs.
    ///
    /// # Errors
    /// `KeyExists` on the first repeated key.
    pub fn from_pairs<I>(pairs: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut dictionary = Self::new();
        for (key, value) in pairs {
            dictionary.set(key, value)?;
        }
        Ok(dictionary)
    }

    /// Build by projecting each item to a key and a value.
    ///
    /// # Errors
    /// `KeyExists` if two items project to the same key.
    pub fn from_array<T, KS, VS>(
        items: Vec<T>,
        key_selector: KS,
        value_selector: VS,
    ) -> QueryResult<Self>
    where
        KS: Fn(&T) -> K,
        VS: Fn(&T) -> V,
    {
        let mut dictionary = Self::with_capacity(items.len());
        for item in &items {
            dictionary.set(key_selector(item), value_selector(item))?;
        }
        Ok(dictionary)
    }

    /// Insert a new key.
    ///
    /// # Errors
    /// `KeyExists` if the key is already present; the dictionary is left
    /// untouched.
    pub fn set(&mut self, key: K, value: V) -> QueryResult<()> {
        let name = key.to_string();
        if self.slots.contains_key(&name) {
            return Err(QueryError::KeyExists { key: name });
        }
        let mut entries = self.entries.borrow_mut();
        self.slots.insert(name, entries.len());
        entries.push((key, value));
        Ok(())
    }

    /// Insert or overwrite, returning the previous value if there was one
    pub fn set_or_update(&mut self, key: K, value: V) -> Option<V> {
        let name = key.to_string();
        let mut entries = self.entries.borrow_mut();
        match self.slots.get(&name).copied() {
            Some(slot) => {
                let previous = std::mem::replace(&mut entries[slot], (key, value));
                Some(previous.1)
            }
            None => {
                self.slots.insert(name, entries.len());
                entries.push((key, value));
                None
            }
        }
    }

    pub fn contains_key<Q: Display + ?Sized>(&self, key: &Q) -> bool {
        self.slots.contains_key(&key.to_string())
    }

    /// Remove a key, returning its value; absent keys are a no-op
    pub fn remove<Q: Display + ?Sized>(&mut self, key: &Q) -> Option<V> {
        let slot = self.slots.remove(&key.to_string())?;
        let (_, value) = self.entries.borrow_mut().remove(slot);
        for position in self.slots.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        Some(value)
    }
}

impl<K: Display, V: Clone> Dictionary<K, V> {
    pub fn get<Q: Display + ?Sized>(&self, key: &Q) -> Option<V> {
        let slot = *self.slots.get(&key.to_string())?;
        self.entries_ref().get(slot).map(|(_, value)| value.clone())
    }
}

impl<K, V: PartialEq> Dictionary<K, V> {
    pub fn contains_value(&self, value: &V) -> bool {
        self.entries_ref().iter().any(|(_, candidate)| candidate == value)
    }
}

impl<K: Clone, V: Clone> Dictionary<K, V> {
    /// Typed keys in insertion order
    pub fn keys(&self) -> Vec<K> {
        self.entries_ref().iter().map(|(key, _)| key.clone()).collect()
    }

    pub fn values(&self) -> Vec<V> {
        self.entries_ref()
            .iter()
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Typed entries in insertion order
    pub fn entries(&self) -> Vec<(K, V)> {
        self.entries_ref().clone()
    }

    /// Independent dictionary with the same entries
    pub fn copy(&self) -> Self {
        Self {
            entries: Rc::new(RefCell::new(self.entries())),
            slots: self.slots.clone(),
        }
    }
}

impl<K, V> Queryable<KeyValuePair<String, V>> for Dictionary<K, V>
where
    K: Display + Clone + 'static,
    V: Clone + 'static,
{
    fn as_sequence(&self) -> Sequence<KeyValuePair<String, V>> {
        Sequence::new(ArraySource::new(Rc::clone(&self.entries)))
            .select(|(key, value): (K, V)| KeyValuePair::new(key.to_string(), value))
    }

    fn to_array(&self) -> Vec<KeyValuePair<String, V>> {
        self.entries_ref()
            .iter()
            .map(|(key, value)| KeyValuePair::new(key.to_string(), value.clone()))
            .collect()
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn any(&self) -> bool {
        !self.is_empty()
    }
}

impl<K: Clone, V: Clone> Clone for Dictionary<K, V> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<K, V> Default for Dictionary<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Display, V: PartialEq> PartialEq for Dictionary<K, V> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let theirs = other.entries_ref();
        self.entries_ref().iter().all(|(key, value)| {
            other
                .slots
                .get(&key.to_string())
                .and_then(|&slot| theirs.get(slot))
                .is_some_and(|(_, candidate)| candidate == value)
        })
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Dictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries_ref().iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

impl<K: Display, V: Serialize> Serialize for Dictionary<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.entries_ref()
                .iter()
                .map(|(key, value)| (key.to_string(), value)),
        )
    }
}

struct DictionaryVisitor<V> {
    marker: PhantomData<fn() -> V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for DictionaryVisitor<V> {
    type Value = Dictionary<String, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map with unique string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut dictionary = Dictionary::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            dictionary
                .set(key, value)
                .map_err(<A::Error as de::Error>::custom)?;
        }
        Ok(dictionary)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Dictionary<String, V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DictionaryVisitor {
            marker: PhantomData,
        })
    }
}
