//! `GhostToken` - the permission controller for branded storage.
//!
//! The token is a zero-sized type that controls access to every `GhostCell`
//! created under the same brand. Rank-2 polymorphism (`for<'new_brand>`) makes
//! each call to [`GhostToken::new`] mint a brand that cannot be named, and
//! therefore cannot be mixed, outside of its closure.
//!
//! ## Core invariant (linearity)
//!
//! `GhostToken<'brand>` is **not** `Copy`/`Clone`. Any safe API that can produce
//! `&mut T` requires `&mut GhostToken<'brand>`, and Rust guarantees you cannot
//! have two live mutable borrows of the same token simultaneously.

/// Invariant lifetime marker used for branding.
pub mod invariant;

pub use invariant::InvariantLifetime;

/// A zero-sized token that controls access to `GhostCell`s of one brand.
#[derive(Debug)]
pub struct GhostToken<'brand>(InvariantLifetime<'brand>);

impl<'brand> GhostToken<'brand> {
    /// Creates a new token and executes a closure with it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ghostgraph::{GhostCell, GhostToken};
    ///
    /// let result = GhostToken::new(|mut token| {
    ///     let cell = GhostCell::new(42);
    ///     *cell.borrow_mut(&mut token) = 100;
    ///     *cell.borrow(&token)
    /// });
    /// assert_eq!(result, 100);
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(GhostToken<'new_brand>) -> R,
    {
        f(GhostToken(InvariantLifetime::new()))
    }

    /// Creates a new branded scope nested within the current one.
    ///
    /// Functionally equivalent to [`GhostToken::new`]. Read-only algorithms use it
    /// to keep scratch structures under a brand of their own while the caller's
    /// token stays borrowed.
    #[inline(always)]
    pub fn with_scoped<F, R>(&self, f: F) -> R
    where
        F: for<'sub> FnOnce(GhostToken<'sub>) -> R,
    {
        Self::new(f)
    }
}

// `GhostToken` carries no data. Sharing `&GhostToken<'brand>` only enables
// token-gated reads, which are constrained by the `Sync` bounds on the cells.
unsafe impl<'brand> Sync for GhostToken<'brand> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GhostCell;

    #[test]
    fn token_is_zero_sized() {
        assert_eq!(core::mem::size_of::<GhostToken<'static>>(), 0);
    }

    #[test]
    fn scoped_token_is_independent() {
        GhostToken::new(|mut token| {
            let outer = GhostCell::new(1);
            let inner_sum = token.with_scoped(|mut sub| {
                let inner = GhostCell::new(10);
                *inner.borrow_mut(&mut sub) += 5;
                *inner.borrow(&sub)
            });
            *outer.borrow_mut(&mut token) += inner_sum;
            assert_eq!(*outer.borrow(&token), 16);
        });
    }
}
