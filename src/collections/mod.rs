//! Token-gated containers the graph is assembled from.
//!
//! Collections are organized by data structure type:
//! - `vec`: the branded vector every arena is built on
//! - `hash`: the separate-chaining map used for vertex and edge indices
//! - `other`: linked lists with stable handles and the disjoint-set forest

pub mod hash;
pub mod other;
pub mod vec;

// Re-export commonly used types from submodules
pub use hash::{BrandedChainedHashMap, MAX_LOAD_FACTOR};
pub use other::{ActiveDisjointSet, BrandedDisjointSet, BrandedDoublyLinkedList, NodeHandle};
pub use vec::BrandedVec;
