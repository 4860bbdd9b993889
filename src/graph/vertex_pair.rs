//! Order-independent vertex pair used as the edge index key.
//!
//! `UnorderedPair::new(u, v)` and `UnorderedPair::new(v, u)` compare equal and
//! hash identically. Each component is hashed on its own with `FxHasher`; the
//! two results are written to the outer hasher smaller first, so the key type
//! needs `Hash + Eq` but no ordering.
//!
//! [`PairView`] borrows two keys and looks up an index keyed by
//! `UnorderedPair<K>` without cloning them.

use core::hash::{Hash, Hasher};

use hashbrown::Equivalent;
use rustc_hash::FxHasher;

/// An unordered pair of vertex keys.
#[derive(Debug, Clone, Copy)]
pub struct UnorderedPair<K> {
    first: K,
    second: K,
}

impl<K> UnorderedPair<K> {
    /// Creates a pair. The argument order is remembered but never observed
    /// by `==` or `hash`.
    #[inline]
    pub fn new(first: K, second: K) -> Self {
        Self { first, second }
    }
}

impl<K: PartialEq> PartialEq for UnorderedPair<K> {
    fn eq(&self, other: &Self) -> bool {
        same_endpoints(&self.first, &self.second, &other.first, &other.second)
    }
}

impl<K: Eq> Eq for UnorderedPair<K> {}

impl<K: Hash> Hash for UnorderedPair<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_endpoints(&self.first, &self.second, state);
    }
}

/// Borrowed lookup key for an index keyed by [`UnorderedPair<K>`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct PairView<'a, K> {
    first: &'a K,
    second: &'a K,
}

impl<'a, K> PairView<'a, K> {
    #[inline]
    pub(crate) fn new(first: &'a K, second: &'a K) -> Self {
        Self { first, second }
    }
}

impl<K: Hash> Hash for PairView<'_, K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_endpoints(self.first, self.second, state);
    }
}

impl<K: PartialEq> Equivalent<UnorderedPair<K>> for PairView<'_, K> {
    fn equivalent(&self, key: &UnorderedPair<K>) -> bool {
        same_endpoints(self.first, self.second, &key.first, &key.second)
    }
}

fn same_endpoints<K: PartialEq>(a: &K, b: &K, c: &K, d: &K) -> bool {
    (a == c && b == d) || (a == d && b == c)
}

fn component_hash<K: Hash>(key: &K) -> u64 {
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

fn hash_endpoints<K: Hash, H: Hasher>(first: &K, second: &K, state: &mut H) {
    let (h1, h2) = (component_hash(first), component_hash(second));
    let (lo, hi) = if h1 <= h2 { (h1, h2) } else { (h2, h1) };
    state.write_u64(lo);
    state.write_u64(hi);
}
