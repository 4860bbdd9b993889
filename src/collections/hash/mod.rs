//! Hash-based collections.
//!
//! Values are branded; keys are plain so lookups need no token.

pub mod chained_map;

pub use chained_map::{BrandedChainedHashMap, MAX_LOAD_FACTOR};
