//! KeyedCollection Module
//!
//! One access contract over two keyed shapes.
//!
//! ## Shapes
//! - `Mapping`: unique keys, no iteration order
//! - `PairSequence`: ordered pairs, keys may repeat, first match wins
//!
//! ## put vs try_replace on a PairSequence
//! `put` removes every occurrence of the key and prepends a single pair.
//! `try_replace` rewrites each occurrence in place, keeping positions and
//! occurrence count. The two must stay different.
//!
//! Every modifying operation consumes the collection and returns the new
//! value; clone first to keep the old one.

mod pairs;

use std::borrow::Borrow;
use std::collections::{hash_map, HashMap};
use std::fmt;
use std::hash::Hash;
use std::slice;

use crate::error::{FieldkitError, Result};

/// An immutable `(key, value)` tuple
pub type Pair<K, V> = (K, V);

/// A keyed collection in one of two shapes
#[derive(Debug, Clone)]
pub enum KeyedCollection<K, V> {
    /// Unique keys; inserting an existing key overwrites
    Mapping(HashMap<K, V>),

    /// Insertion-ordered pairs; duplicate keys allowed
    PairSequence(Vec<Pair<K, V>>),
}

use KeyedCollection::{Mapping, PairSequence};

impl<K, V> KeyedCollection<K, V> {
    /// Create an empty Mapping
    pub fn mapping() -> Self {
        Mapping(HashMap::new())
    }

    /// Create an empty PairSequence
    pub fn pair_sequence() -> Self {
        PairSequence(Vec::new())
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Mapping(_))
    }

    /// Number of pairs, duplicates included
    pub fn len(&self) -> usize {
        match self {
            Mapping(map) => map.len(),
            PairSequence(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over pairs (sequence order for a PairSequence)
    pub fn iter(&self) -> Iter<'_, K, V> {
        match self {
            Mapping(map) => Iter::Mapping(map.iter()),
            PairSequence(pairs) => Iter::PairSequence(pairs.iter()),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Consume into a list of pairs
    pub fn into_pairs(self) -> Vec<Pair<K, V>> {
        match self {
            Mapping(map) => map.into_iter().collect(),
            PairSequence(pairs) => pairs,
        }
    }
}

impl<K: Eq + Hash, V> KeyedCollection<K, V> {
    // =========================================================================
    // Lookup
    // =========================================================================

    /// Look up a value; first match wins on a PairSequence
    pub fn fetch<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.fetch_entry(key).map(|(_, v)| v)
    }

    /// Like `fetch`, failing with `KeyNotFound` when absent
    pub fn try_fetch<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Display + ?Sized,
    {
        self.fetch(key)
            .ok_or_else(|| FieldkitError::key_not_found(key))
    }

    /// Lookup with the absent sentinel (`None`) as default
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.fetch(key)
    }

    /// Lookup falling back to `default`
    pub fn get_or<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.fetch(key).unwrap_or(default)
    }

    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.fetch_entry(key).is_some()
    }

    /// All values for `key` in order. A Mapping yields at most one.
    pub fn get_all<Q>(&self, key: &Q) -> Vec<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self {
            Mapping(map) => map.get(key).into_iter().collect(),
            PairSequence(pairs) => pairs::all(pairs, key),
        }
    }

    fn fetch_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self {
            Mapping(map) => map.get_key_value(key),
            PairSequence(pairs) => pairs::first_entry(pairs, key),
        }
    }

    // =========================================================================
    // Modification
    // =========================================================================

    /// Set `key` to `value`.
    ///
    /// On a PairSequence every prior occurrence is removed and the new pair
    /// becomes the first one.
    pub fn put(self, key: K, value: V) -> Self {
        match self {
            Mapping(mut map) => {
                map.insert(key, value);
                Mapping(map)
            }
            PairSequence(pairs) => PairSequence(pairs::put(pairs, key, value)),
        }
    }

    /// Remove every occurrence of `key`; unchanged if absent
    pub fn delete<Q>(self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self {
            Mapping(mut map) => {
                map.remove(key);
                Mapping(map)
            }
            PairSequence(pairs) => PairSequence(pairs::delete(pairs, key)),
        }
    }

    /// Update an existing key, failing with `KeyNotFound` when absent.
    ///
    /// On a PairSequence every occurrence takes `value` in place.
    pub fn try_replace<Q>(self, key: &Q, value: V) -> Result<Self>
    where
        K: Borrow<Q>,
        V: Clone,
        Q: Hash + Eq + fmt::Display + ?Sized,
    {
        if !self.has_key(key) {
            return Err(FieldkitError::key_not_found(key));
        }

        Ok(match self {
            Mapping(mut map) => {
                if let Some(slot) = map.get_mut(key) {
                    *slot = value;
                }
                Mapping(map)
            }
            PairSequence(pairs) => PairSequence(pairs::replace_all(pairs, key, value)),
        })
    }

    /// Copy `key` from `source` with `put` semantics; unchanged if absent
    pub fn put_copy<Q>(self, source: &Self, key: &Q) -> Self
    where
        K: Borrow<Q> + Clone,
        V: Clone,
        Q: Hash + Eq + ?Sized,
    {
        match source.fetch_entry(key) {
            Some((k, v)) => self.put(k.clone(), v.clone()),
            None => self,
        }
    }

    /// Like `put_copy`, failing with `KeyNotFound` when absent from `source`
    pub fn try_put_copy<Q>(self, source: &Self, key: &Q) -> Result<Self>
    where
        K: Borrow<Q> + Clone,
        V: Clone,
        Q: Hash + Eq + fmt::Display + ?Sized,
    {
        match source.fetch_entry(key) {
            Some((k, v)) => Ok(self.put(k.clone(), v.clone())),
            None => Err(FieldkitError::key_not_found(key)),
        }
    }

    /// Last-write-wins union with no validation.
    ///
    /// The result keeps `self`'s shape. A PairSequence drops its own
    /// occurrences of incoming keys and appends the incoming pairs. When
    /// `other` is a PairSequence merged into a Mapping, its first occurrence
    /// of a key wins, matching `fetch`.
    pub fn merge(self, other: Self) -> Self {
        match self {
            Mapping(mut map) => {
                match other {
                    Mapping(incoming) => map.extend(incoming),
                    PairSequence(incoming) => {
                        for (k, v) in incoming.into_iter().rev() {
                            map.insert(k, v);
                        }
                    }
                }
                Mapping(map)
            }
            PairSequence(pairs) => PairSequence(pairs::merge(pairs, other.into_pairs())),
        }
    }

    /// Collapse into a unique-key map; first occurrence wins
    pub fn into_mapping(self) -> HashMap<K, V> {
        match self {
            Mapping(map) => map,
            PairSequence(pairs) => {
                let mut map = HashMap::with_capacity(pairs.len());
                for (k, v) in pairs {
                    map.entry(k).or_insert(v);
                }
                map
            }
        }
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for KeyedCollection<K, V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Mapping(a), Mapping(b)) => a == b,
            (PairSequence(a), PairSequence(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Eq + Hash, V: Eq> Eq for KeyedCollection<K, V> {}

impl<K, V> Default for KeyedCollection<K, V> {
    fn default() -> Self {
        Self::mapping()
    }
}

impl<K, V> From<HashMap<K, V>> for KeyedCollection<K, V> {
    fn from(map: HashMap<K, V>) -> Self {
        Mapping(map)
    }
}

impl<K, V> From<Vec<Pair<K, V>>> for KeyedCollection<K, V> {
    fn from(pairs: Vec<Pair<K, V>>) -> Self {
        PairSequence(pairs)
    }
}

/// Iterator over a KeyedCollection's pairs
pub enum Iter<'a, K, V> {
    Mapping(hash_map::Iter<'a, K, V>),
    PairSequence(slice::Iter<'a, Pair<K, V>>),
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Mapping(it) => it.next(),
            Iter::PairSequence(it) => it.next().map(|(k, v)| (k, v)),
        }
    }
}
