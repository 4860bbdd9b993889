//! `BrandedChainedHashMap` - a separate-chaining hash map with token-gated values.
//!
//! Keys are stored plainly so lookups and removals need no token; values sit in
//! `GhostCell`s and are read or written through the brand's token.
//!
//! - **Buckets**: a power-of-two `Vec` of chains; the bucket index is the 64-bit
//!   hash masked to the bucket count, so equal hashes always share a chain.
//! - **Growth**: when the average chain length would exceed [`MAX_LOAD_FACTOR`]
//!   the bucket array doubles and every entry is redistributed.
//! - **Duplicates**: [`insert`](BrandedChainedHashMap::insert) always appends. A
//!   caller that wants upsert semantics checks [`contains_key`] first.
//!
//! - **Lookups**: any `Q: Hash + Equivalent<K>` works as a lookup key, so a borrowed
//!   view of a key can be used without building an owned key.
//!
//! [`contains_key`]: BrandedChainedHashMap::contains_key

use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

use hashbrown::Equivalent;

use crate::macros::log_event;
use crate::{GhostCell, GhostToken};

/// Average chain length above which the bucket array doubles.
pub const MAX_LOAD_FACTOR: f32 = 0.75;

const MIN_BUCKETS: usize = 8;

struct Entry<'brand, K, V> {
    key: K,
    value: GhostCell<'brand, V>,
}

/// Hash map with chained buckets and token-gated values.
pub struct BrandedChainedHashMap<'brand, K, V, S = RandomState> {
    buckets: Vec<Vec<Entry<'brand, K, V>>>,
    len: usize,
    hash_builder: S,
}

impl<'brand, K, V> BrandedChainedHashMap<'brand, K, V, RandomState>
where
    K: Eq + Hash,
{
    /// Creates an empty map with the minimum bucket count.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty map that holds `capacity` entries without rehashing.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<'brand, K, V, S> BrandedChainedHashMap<'brand, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Creates an empty map with capacity and hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let buckets = Self::buckets_for(capacity);
        Self {
            buckets: (0..buckets).map(|_| Vec::new()).collect(),
            len: 0,
            hash_builder,
        }
    }

    /// Smallest power-of-two bucket count keeping `entries` under the load bound.
    fn buckets_for(entries: usize) -> usize {
        let needed = (entries as f32 / MAX_LOAD_FACTOR).ceil() as usize;
        needed.next_power_of_two().max(MIN_BUCKETS)
    }

    /// Returns the number of entries in the map.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map contains no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets (always a power of two).
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Average chain length.
    #[inline]
    pub fn load_factor(&self) -> f32 {
        self.len as f32 / self.buckets.len() as f32
    }

    #[inline(always)]
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hash_builder.hash_one(key) as usize) & (self.buckets.len() - 1)
    }

    fn find_entry<Q>(&self, key: &Q) -> Option<&Entry<'brand, K, V>>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|entry| key.equivalent(&entry.key))
    }

    /// Appends an entry for `key`.
    ///
    /// An existing entry with an equal key is left in place; lookups then see
    /// whichever of the two entries comes first in the chain.
    pub fn insert(&mut self, key: K, value: V) {
        if (self.len + 1) as f32 > self.buckets.len() as f32 * MAX_LOAD_FACTOR {
            self.rehash(self.buckets.len() * 2);
        }
        let idx = self.bucket_index(&key);
        self.buckets[idx].push(Entry {
            key,
            value: GhostCell::new(value),
        });
        self.len += 1;
    }

    /// Redistributes every entry over `new_buckets` chains.
    fn rehash(&mut self, new_buckets: usize) {
        log_event!(
            trace,
            from = self.buckets.len(),
            to = new_buckets,
            entries = self.len,
            "rehashing chained map"
        );
        let old = core::mem::replace(
            &mut self.buckets,
            (0..new_buckets).map(|_| Vec::new()).collect(),
        );
        for entry in old.into_iter().flatten() {
            let idx = self.bucket_index(&entry.key);
            self.buckets[idx].push(entry);
        }
    }

    /// Returns `true` if some entry has a key equal to `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.find_entry(key).is_some()
    }

    /// Returns a shared reference to the value for `key`.
    pub fn get<'a, Q>(&'a self, token: &'a GhostToken<'brand>, key: &Q) -> Option<&'a V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.find_entry(key).map(|entry| entry.value.borrow(token))
    }

    /// Returns the stored key and its value.
    pub fn get_key_value<'a, Q>(&'a self, token: &'a GhostToken<'brand>, key: &Q) -> Option<(&'a K, &'a V)>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.find_entry(key)
            .map(|entry| (&entry.key, entry.value.borrow(token)))
    }

    /// Returns an exclusive reference to the value for `key`.
    pub fn get_mut<'a, Q>(&'a self, token: &'a mut GhostToken<'brand>, key: &Q) -> Option<&'a mut V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.find_entry(key).map(|entry| entry.value.borrow_mut(token))
    }

    /// Removes one entry whose key equals `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let idx = self.bucket_index(key);
        let chain = &mut self.buckets[idx];
        let pos = chain.iter().position(|entry| key.equivalent(&entry.key))?;
        let entry = chain.swap_remove(pos);
        self.len -= 1;
        Some(entry.value.into_inner())
    }

    /// Removes every entry, keeping the bucket array.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
    }

    /// Iterates over `(key, value)` pairs in bucket order.
    pub fn iter<'a>(&'a self, token: &'a GhostToken<'brand>) -> Iter<'a, 'brand, K, V> {
        Iter {
            entries: Entries::new(&self.buckets),
            token,
        }
    }

    /// Iterates over the keys in bucket order.
    pub fn keys(&self) -> Keys<'_, 'brand, K, V> {
        Keys {
            entries: Entries::new(&self.buckets),
        }
    }

    /// Length of the longest chain. Useful to judge a hasher's spread.
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Walks every entry, chain by chain.
struct Entries<'a, 'brand, K, V> {
    buckets: core::slice::Iter<'a, Vec<Entry<'brand, K, V>>>,
    chain: core::slice::Iter<'a, Entry<'brand, K, V>>,
}

impl<'a, 'brand, K, V> Entries<'a, 'brand, K, V> {
    fn new(buckets: &'a [Vec<Entry<'brand, K, V>>]) -> Self {
        Self {
            buckets: buckets.iter(),
            chain: Default::default(),
        }
    }
}

impl<'a, 'brand, K, V> Iterator for Entries<'a, 'brand, K, V> {
    type Item = &'a Entry<'brand, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                return Some(entry);
            }
            self.chain = self.buckets.next()?.iter();
        }
    }
}

/// Iterator over `(key, value)` pairs of a [`BrandedChainedHashMap`].
pub struct Iter<'a, 'brand, K, V> {
    entries: Entries<'a, 'brand, K, V>,
    token: &'a GhostToken<'brand>,
}

impl<'a, 'brand, K, V> Iterator for Iter<'a, 'brand, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        Some((&entry.key, entry.value.borrow(self.token)))
    }
}

/// Iterator over the keys of a [`BrandedChainedHashMap`].
pub struct Keys<'a, 'brand, K, V> {
    entries: Entries<'a, 'brand, K, V>,
}

impl<'a, 'brand, K, V> Iterator for Keys<'a, 'brand, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|entry| &entry.key)
    }
}

impl<'brand, K, V> Default for BrandedChainedHashMap<'brand, K, V, RandomState>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'brand, K, V, S> fmt::Debug for BrandedChainedHashMap<'brand, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrandedChainedHashMap")
            .field("len", &self.len)
            .field("buckets", &self.buckets.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::{BuildHasherDefault, Hasher};

    /// Sends every key to the same bucket.
    #[derive(Default)]
    struct CollidingHasher;

    impl Hasher for CollidingHasher {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    #[test]
    fn insert_get_remove() {
        GhostToken::new(|mut token| {
            let mut map = BrandedChainedHashMap::new();
            map.insert("a", 1);
            map.insert("b", 2);

            assert_eq!(map.len(), 2);
            assert_eq!(map.get(&token, "a"), Some(&1));
            *map.get_mut(&mut token, "b").unwrap() += 40;
            assert_eq!(map.get_key_value(&token, "b"), Some((&"b", &42)));

            assert_eq!(map.remove("a"), Some(1));
            assert_eq!(map.remove("a"), None);
            assert!(!map.contains_key("a"));
            assert_eq!(map.len(), 1);
        });
    }

    #[test]
    fn insert_does_not_replace() {
        GhostToken::new(|token| {
            let mut map = BrandedChainedHashMap::new();
            map.insert(7u32, "first");
            map.insert(7u32, "second");
            assert_eq!(map.len(), 2);

            let first = map.remove(&7u32).unwrap();
            let second = map.remove(&7u32).unwrap();
            let mut removed = [first, second];
            removed.sort_unstable();
            assert_eq!(removed, ["first", "second"]);
            assert!(map.get(&token, &7u32).is_none());
        });
    }

    #[test]
    fn grows_past_load_factor() {
        GhostToken::new(|token| {
            let mut map = BrandedChainedHashMap::new();
            let initial = map.bucket_count();
            for i in 0..1000u32 {
                map.insert(i, i * 2);
            }
            assert!(map.bucket_count() > initial);
            assert!(map.bucket_count().is_power_of_two());
            assert!(map.load_factor() <= MAX_LOAD_FACTOR);
            assert!((0..1000u32).all(|i| map.get(&token, &i) == Some(&(i * 2))));
            assert_eq!(map.iter(&token).count(), 1000);
        });
    }

    #[test]
    fn with_capacity_avoids_rehash() {
        let map: BrandedChainedHashMap<'_, u64, ()> = BrandedChainedHashMap::with_capacity(100);
        assert!(map.bucket_count() as f32 * MAX_LOAD_FACTOR >= 100.0);
    }

    #[test]
    fn colliding_keys_share_one_chain() {
        GhostToken::new(|token| {
            let mut map: BrandedChainedHashMap<'_, u32, u32, BuildHasherDefault<CollidingHasher>> =
                BrandedChainedHashMap::with_capacity_and_hasher(0, BuildHasherDefault::default());
            for i in 0..20 {
                map.insert(i, i + 100);
            }
            assert_eq!(map.longest_chain(), 20);
            assert_eq!(map.get(&token, &13u32), Some(&113));
            assert_eq!(map.remove(&5u32), Some(105));
            assert_eq!(map.get(&token, &5u32), None);
            assert_eq!(map.keys().count(), 19);
        });
    }

    #[test]
    fn clear_keeps_buckets() {
        let mut map = BrandedChainedHashMap::new();
        for i in 0..50 {
            map.insert(i, ());
        }
        let buckets = map.bucket_count();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.bucket_count(), buckets);
    }
}
