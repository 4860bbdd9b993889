//! Disjoint Set (Union-Find) with token-gated storage.
//!
//! Path compression mutates parent pointers during `find`, which is logically
//! a read. Parents are `Cell<usize>` inside a `BrandedVec`, so compression
//! works with a shared `&GhostToken`.
//!
//! # Performance
//!
//! - Union by size: the smaller tree is attached under the larger root, which
//!   bounds tree height by `log2(n)` even without compression.
//! - Path compression on every `find` makes repeated queries amortize to
//!   near-constant time.

use crate::collections::BrandedVec;
use crate::GhostToken;
use std::cell::Cell;

/// A Disjoint Set (Union-Find) data structure over labels `0..len()`.
pub struct BrandedDisjointSet<'brand> {
    /// Parent pointers; a root is its own parent.
    parent: BrandedVec<'brand, Cell<usize>>,
    /// Element count of the tree rooted here. Only meaningful at roots.
    size: BrandedVec<'brand, usize>,
    sets: usize,
}

impl<'brand> BrandedDisjointSet<'brand> {
    /// Creates a forest over the empty universe.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty forest with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            parent: BrandedVec::with_capacity(capacity),
            size: BrandedVec::with_capacity(capacity),
            sets: 0,
        }
    }

    /// Creates the universe `{0, .., len - 1}`, every element in its own set.
    pub fn with_len(len: usize) -> Self {
        Self {
            parent: (0..len).map(Cell::new).collect(),
            size: core::iter::repeat(1).take(len).collect(),
            sets: len,
        }
    }

    /// Adds a singleton set and returns its label, which is the previous `len()`.
    pub fn make_set(&mut self, _token: &mut GhostToken<'brand>) -> usize {
        let label = self.parent.len();
        self.parent.push(Cell::new(label));
        self.size.push(1);
        self.sets += 1;
        label
    }

    /// Representative of the set containing `x`.
    ///
    /// Every node visited on the way up is re-pointed straight at the root.
    ///
    /// # Panics
    /// Panics if `x >= self.len()`.
    pub fn find(&self, token: &GhostToken<'brand>, x: usize) -> usize {
        // 1. Find root
        let mut root = x;
        loop {
            let parent = self.parent.borrow(token, root).get();
            if parent == root {
                break;
            }
            root = parent;
        }

        // 2. Compress path
        let mut curr = x;
        while curr != root {
            let cell = self.parent.borrow(token, curr);
            let next = cell.get();
            cell.set(root);
            curr = next;
        }

        root
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `false`, changing nothing, if they already share a set. The root
    /// of the smaller set is attached under the root of the larger one;
    /// on a tie `a`'s root stays the representative.
    pub fn union(&mut self, token: &mut GhostToken<'brand>, a: usize, b: usize) -> bool {
        let root1 = self.find(token, a);
        let root2 = self.find(token, b);

        if root1 == root2 {
            return false;
        }

        let size1 = *self.size.borrow(token, root1);
        let size2 = *self.size.borrow(token, root2);
        let (big, small) = if size1 < size2 { (root2, root1) } else { (root1, root2) };

        self.parent.borrow(token, small).set(big);
        *self.size.borrow_mut(token, big) = size1 + size2;
        self.sets -= 1;

        true
    }

    /// Returns `true` if `a` and `b` share a representative.
    pub fn same_set(&self, token: &GhostToken<'brand>, a: usize, b: usize) -> bool {
        self.find(token, a) == self.find(token, b)
    }

    /// Number of elements in the set containing `x`.
    pub fn set_size(&self, token: &GhostToken<'brand>, x: usize) -> usize {
        *self.size.borrow(token, self.find(token, x))
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Size of the universe.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

impl<'brand> Default for BrandedDisjointSet<'brand> {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`BrandedDisjointSet`] paired with its token, so call sites inside
/// closures do not thread the token through every call.
pub struct ActiveDisjointSet<'a, 'brand> {
    inner: &'a mut BrandedDisjointSet<'brand>,
    token: &'a mut GhostToken<'brand>,
}

impl<'a, 'brand> ActiveDisjointSet<'a, 'brand> {
    /// Pairs `inner` with `token` for the lifetime `'a`.
    pub fn new(
        inner: &'a mut BrandedDisjointSet<'brand>,
        token: &'a mut GhostToken<'brand>,
    ) -> Self {
        Self { inner, token }
    }

    /// See [`BrandedDisjointSet::make_set`].
    pub fn make_set(&mut self) -> usize {
        self.inner.make_set(self.token)
    }

    /// See [`BrandedDisjointSet::find`].
    pub fn find(&self, x: usize) -> usize {
        self.inner.find(self.token, x)
    }

    /// See [`BrandedDisjointSet::union`].
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        self.inner.union(self.token, a, b)
    }

    /// Returns `true` if both elements are in the same set.
    pub fn same_set(&self, a: usize, b: usize) -> bool {
        self.inner.same_set(self.token, a, b)
    }

    /// Size of the set containing `x`.
    pub fn set_size(&self, x: usize) -> usize {
        self.inner.set_size(self.token, x)
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.inner.set_count()
    }

    /// Size of the universe.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_detects_cycles() {
        GhostToken::new(|mut token| {
            let mut ds = BrandedDisjointSet::new();
            let labels: Vec<usize> = (0..4).map(|_| ds.make_set(&mut token)).collect();
            assert_eq!(labels, vec![0, 1, 2, 3]);

            // Square 0-1-2-3-0: the closing edge must be rejected.
            assert!(ds.union(&mut token, 0, 1));
            assert!(ds.union(&mut token, 1, 2));
            assert!(ds.union(&mut token, 2, 3));
            assert!(!ds.union(&mut token, 3, 0));
            assert!(!ds.union(&mut token, 2, 2));

            assert!(ds.same_set(&token, 0, 3));
            assert_eq!(ds.set_count(), 1);
            assert_eq!(ds.set_size(&token, 1), 4);
        });
    }

    #[test]
    fn test_union_by_size() {
        GhostToken::new(|mut token| {
            let mut ds = BrandedDisjointSet::with_len(5);
            assert_eq!(ds.set_count(), 5);

            // {0, 1, 2} under 0
            ds.union(&mut token, 0, 1);
            ds.union(&mut token, 0, 2);
            assert_eq!(ds.set_size(&token, 2), 3);

            // The singleton joins the larger set even when passed first.
            assert!(ds.union(&mut token, 3, 1));
            assert_eq!(ds.find(&token, 3), 0);
            assert_eq!(ds.set_size(&token, 3), 4);
            assert_eq!(ds.set_size(&token, 4), 1);
            assert_eq!(ds.set_count(), 2);
        });
    }

    #[test]
    fn test_path_compression_flattens() {
        GhostToken::new(|mut token| {
            let mut ds = BrandedDisjointSet::with_len(4);
            // Equal sizes keep the first root, so this builds 0 <- 2 and 0 <- {1 <- 3}.
            ds.union(&mut token, 1, 3);
            ds.union(&mut token, 0, 2);
            ds.union(&mut token, 0, 1);
            let root = ds.find(&token, 3);
            assert_eq!(root, 0);
            assert!((0..4).all(|i| ds.parent.borrow(&token, i).get() == 0));
        });
    }

    #[test]
    fn test_active_disjoint_set() {
        GhostToken::new(|mut token| {
            let mut ds = BrandedDisjointSet::with_len(3);
            let mut active = ActiveDisjointSet::new(&mut ds, &mut token);

            let extra = active.make_set();
            assert_eq!(extra, 3);
            assert!(active.union(extra, 0));
            assert!(active.same_set(0, 3));
            assert!(!active.same_set(1, 2));
            assert_eq!(active.set_size(0), 2);
            assert_eq!(active.set_count(), 3);
            assert_eq!(active.len(), 4);
        });
    }
}
