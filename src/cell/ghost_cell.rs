//! `GhostCell` - safe interior mutability via branded tokens.
//!
//! ## Safety invariant
//!
//! For a fixed brand `'brand`, every safe method that can produce `&mut T`
//! requires `&mut GhostToken<'brand>`. Since the token is linear, safe code
//! cannot create overlapping mutable borrows of the same cell. Methods that
//! skip the token (`get_mut`, `into_inner`) take the cell itself by `&mut` or
//! by value, which is exclusive on its own.

use core::cell::UnsafeCell;
use core::marker::PhantomData;

use crate::token::InvariantLifetime;
use crate::GhostToken;

/// A branded cell that can only be accessed using a token of the same brand.
#[repr(transparent)]
pub struct GhostCell<'brand, T: ?Sized> {
    _brand: PhantomData<InvariantLifetime<'brand>>,
    value: UnsafeCell<T>,
}

impl<'brand, T> GhostCell<'brand, T> {
    /// Creates a new `GhostCell`.
    pub const fn new(value: T) -> Self {
        Self {
            _brand: PhantomData,
            value: UnsafeCell::new(value),
        }
    }

    /// Consumes the cell, returning the wrapped value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    /// Replaces the contained value, returning the old value.
    #[inline]
    pub fn replace(&self, token: &mut GhostToken<'brand>, value: T) -> T {
        core::mem::replace(self.borrow_mut(token), value)
    }
}

impl<'brand, T: ?Sized> GhostCell<'brand, T> {
    /// Borrows the cell immutably.
    #[inline(always)]
    pub fn borrow<'a>(&'a self, _token: &'a GhostToken<'brand>) -> &'a T {
        // SAFETY: safe code cannot obtain `&mut T` without `&mut GhostToken<'brand>`,
        // and that borrow cannot coexist with the shared one held here.
        unsafe { &*self.value.get() }
    }

    /// Borrows the cell mutably.
    #[inline(always)]
    #[allow(clippy::mut_from_ref)]
    pub fn borrow_mut<'a>(&'a self, _token: &'a mut GhostToken<'brand>) -> &'a mut T {
        // SAFETY: the caller proves exclusivity via `&mut GhostToken<'brand>`.
        unsafe { &mut *self.value.get() }
    }

    /// Returns a mutable reference without a token; `&mut self` is already exclusive.
    #[inline(always)]
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }
}

impl<'brand, T: Copy> GhostCell<'brand, T> {
    /// Copies the contained value.
    #[inline(always)]
    pub fn get(&self, token: &GhostToken<'brand>) -> T {
        *self.borrow(token)
    }

    /// Overwrites the contained value.
    #[inline(always)]
    pub fn set(&self, token: &mut GhostToken<'brand>, value: T) {
        *self.borrow_mut(token) = value;
    }
}

impl<'brand, T: Default> Default for GhostCell<'brand, T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<'brand, T> From<T> for GhostCell<'brand, T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

// SAFETY: access is token-gated; sending the cell sends its value.
unsafe impl<'brand, T: ?Sized + Send> Send for GhostCell<'brand, T> {}
// SAFETY: shared access yields `&T` only through `&GhostToken`, so `T: Sync` suffices
// for reads; writes need `&mut GhostToken`, which cannot be shared.
unsafe impl<'brand, T: ?Sized + Send + Sync> Sync for GhostCell<'brand, T> {}
