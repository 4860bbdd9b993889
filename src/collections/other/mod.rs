//! Handle-addressed lists and the union-find forest.

pub mod disjoint_set;
pub mod doubly_linked_list;

pub use disjoint_set::{ActiveDisjointSet, BrandedDisjointSet};
pub use doubly_linked_list::{BrandedDoublyLinkedList, NodeHandle};
