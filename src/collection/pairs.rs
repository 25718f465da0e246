//! PairSequence operations
//!
//! Ordered `(key, value)` lists where keys may repeat. Lookups are
//! first-match-wins; order of untouched pairs is always preserved.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

use super::Pair;

fn matches<K, Q>(k: &K, key: &Q) -> bool
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    key.eq(k.borrow())
}

/// First pair whose key matches
pub(super) fn first_entry<'a, K, V, Q>(pairs: &'a [Pair<K, V>], key: &Q) -> Option<(&'a K, &'a V)>
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    pairs
        .iter()
        .find(|(k, _)| matches(k, key))
        .map(|(k, v)| (k, v))
}

/// Every value for `key`, in sequence order
pub(super) fn all<'a, K, V, Q>(pairs: &'a [Pair<K, V>], key: &Q) -> Vec<&'a V>
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    pairs
        .iter()
        .filter(|(k, _)| matches(k, key))
        .map(|(_, v)| v)
        .collect()
}

/// Collapse all occurrences of `key` into one pair at the front
pub(super) fn put<K: Eq, V>(mut pairs: Vec<Pair<K, V>>, key: K, value: V) -> Vec<Pair<K, V>> {
    pairs.retain(|(k, _)| *k != key);
    pairs.insert(0, (key, value));
    pairs
}

pub(super) fn delete<K, V, Q>(mut pairs: Vec<Pair<K, V>>, key: &Q) -> Vec<Pair<K, V>>
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    pairs.retain(|(k, _)| !matches(k, key));
    pairs
}

/// Overwrite each occurrence of `key` in place.
/// Position and occurrence count are unchanged.
pub(super) fn replace_all<K, V, Q>(mut pairs: Vec<Pair<K, V>>, key: &Q, value: V) -> Vec<Pair<K, V>>
where
    K: Borrow<Q>,
    V: Clone,
    Q: Eq + ?Sized,
{
    for (k, v) in pairs.iter_mut() {
        if matches(k, key) {
            *v = value.clone();
        }
    }
    pairs
}

/// Drop our occurrences of every incoming key, then append the incoming
/// pairs in their own order (duplicates included).
pub(super) fn merge<K: Eq + Hash, V>(
    mut pairs: Vec<Pair<K, V>>,
    incoming: Vec<Pair<K, V>>,
) -> Vec<Pair<K, V>> {
    {
        let incoming_keys: HashSet<&K> = incoming.iter().map(|(k, _)| k).collect();
        pairs.retain(|(k, _)| !incoming_keys.contains(k));
    }
    pairs.extend(incoming);
    pairs
}
