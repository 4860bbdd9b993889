//! Vector-based storage for branded collections.

pub mod vec;

pub use vec::BrandedVec;
