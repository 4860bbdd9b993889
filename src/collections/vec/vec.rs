//! `BrandedVec` - a vector of token-gated cells.
//!
//! Growing or shrinking the vector needs `&mut self`. Reading or writing an
//! element only needs `&self` plus the token of the same brand.
//!
//! Linked-list slots and disjoint-set parents both live in a `BrandedVec`.

use crate::{GhostCell, GhostToken};

/// A vector of token-gated elements.
pub struct BrandedVec<'brand, T> {
    pub(crate) inner: Vec<GhostCell<'brand, T>>,
}

impl<'brand, T> BrandedVec<'brand, T> {
    /// Creates an empty vector.
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Creates an empty vector able to hold `capacity` elements before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Appends `value` at index `len()`.
    pub fn push(&mut self, value: T) {
        self.inner.push(GhostCell::new(value));
    }

    /// Removes and returns the element at index `len() - 1`.
    pub fn pop(&mut self) -> Option<T> {
        self.inner.pop().map(GhostCell::into_inner)
    }

    /// Clears the vector, keeping its allocation.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Returns a token-gated shared reference to element `idx`, if in bounds.
    #[inline(always)]
    pub fn get<'a>(&'a self, token: &'a GhostToken<'brand>, idx: usize) -> Option<&'a T> {
        self.inner.get(idx).map(|c| c.borrow(token))
    }

    /// Returns a token-gated exclusive reference to element `idx`, if in bounds.
    #[inline(always)]
    pub fn get_mut<'a>(
        &'a self,
        token: &'a mut GhostToken<'brand>,
        idx: usize,
    ) -> Option<&'a mut T> {
        self.inner.get(idx).map(|c| c.borrow_mut(token))
    }

    /// Returns a token-gated shared reference to element `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of bounds.
    #[inline(always)]
    pub fn borrow<'a>(&'a self, token: &'a GhostToken<'brand>, idx: usize) -> &'a T {
        match self.get(token, idx) {
            Some(value) => value,
            None => panic!("index {idx} out of bounds for length {}", self.inner.len()),
        }
    }

    /// Returns a token-gated exclusive reference to element `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of bounds.
    #[inline(always)]
    pub fn borrow_mut<'a>(&'a self, token: &'a mut GhostToken<'brand>, idx: usize) -> &'a mut T {
        let len = self.inner.len();
        match self.get_mut(token, idx) {
            Some(value) => value,
            None => panic!("index {idx} out of bounds for length {len}"),
        }
    }

    /// Elements in index order.
    pub fn iter<'a>(&'a self, token: &'a GhostToken<'brand>) -> Iter<'a, 'brand, T> {
        Iter {
            cells: self.inner.iter(),
            token,
        }
    }
}

/// Token-gated iterator over a [`BrandedVec`].
pub struct Iter<'a, 'brand, T> {
    cells: core::slice::Iter<'a, GhostCell<'brand, T>>,
    token: &'a GhostToken<'brand>,
}

impl<'a, 'brand, T> Iterator for Iter<'a, 'brand, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.cells.next().map(|cell| cell.borrow(self.token))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl<'a, 'brand, T> ExactSizeIterator for Iter<'a, 'brand, T> {}

impl<'brand, T> Default for BrandedVec<'brand, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'brand, T> FromIterator<T> for BrandedVec<'brand, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(GhostCell::new).collect(),
        }
    }
}

impl<'brand, T> core::fmt::Debug for BrandedVec<'brand, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BrandedVec").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_get_and_mutate() {
        GhostToken::new(|mut token| {
            let mut v = BrandedVec::new();
            v.push(1);
            v.push(2);
            *v.borrow_mut(&mut token, 0) += 10;
            assert_eq!(v.get(&token, 0), Some(&11));
            assert_eq!(v.get(&token, 2), None);
            assert_eq!(v.iter(&token).copied().collect::<Vec<_>>(), vec![11, 2]);
        });
    }

    #[test]
    fn collect_and_pop() {
        GhostToken::new(|mut token| {
            let mut v: BrandedVec<'_, i32> = (1..=3).collect();
            *v.get_mut(&mut token, 2).unwrap() *= 2;
            assert_eq!(v.pop(), Some(6));
            assert_eq!(v.iter(&token).sum::<i32>(), 3);
            v.clear();
            assert!(v.is_empty());
            assert_eq!(v.pop(), None);
        });
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn borrow_out_of_bounds_panics() {
        GhostToken::new(|token| {
            let v: BrandedVec<'_, u8> = BrandedVec::new();
            let _ = v.borrow(&token, 0);
        });
    }
}
