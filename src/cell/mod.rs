//! Token-branded interior mutability.
//!
//! `GhostCell` is the only cell the containers need: every element of a
//! [`BrandedVec`](crate::collections::BrandedVec) and every value of a
//! [`BrandedChainedHashMap`](crate::collections::BrandedChainedHashMap) sits in one.

pub mod ghost_cell;

pub use ghost_cell::GhostCell;
