//! # `ghostgraph` - Weighted Graphs on Ghost Tokens
//!
//! A weighted undirected graph with O(1) vertex and edge mutation, and
//! Kruskal's minimum spanning forest on top of it. All state lives in
//! token-branded storage: reads take `&GhostToken<'brand>`, writes take
//! `&mut GhostToken<'brand>`, and the borrow checker enforces exclusivity with
//! no runtime borrow flags.
//!
//! ## Architecture
//!
//! 1. **Ghost Tokens** (`GhostToken<'brand>`):
//!    - Zero-sized linear capabilities
//!    - Branded with an invariant lifetime minted by [`GhostToken::new`]
//!
//! 2. **Ghost Cells** (`GhostCell<'brand, T>`):
//!    - Interior mutability gated by the token of the same brand
//!
//! 3. **Branded Collections**:
//!    - [`BrandedVec`]: the arena every other container is built from
//!    - [`BrandedDoublyLinkedList`]: O(1) removal through generational handles
//!    - [`BrandedChainedHashMap`]: separate chaining, doubling past a 0.75 load factor
//!    - [`BrandedDisjointSet`]: union by size with path compression
//!
//! 4. **Graph** ([`WeightedGraph`]):
//!    - Per-vertex adjacency lists whose nodes are referenced by the edge that owns them
//!    - Vertex and [`UnorderedPair`] edge indices
//!    - [`minimum_spanning_tree`], [`connected_components`]
//!
//! ## Example
//!
//! ```rust
//! use ghostgraph::{minimum_spanning_tree, GhostToken, WeightedGraph};
//!
//! GhostToken::new(|mut token| {
//!     let mut graph = WeightedGraph::new();
//!     for city in ["oslo", "bergen", "trondheim"] {
//!         graph.add_vertex(&mut token, city);
//!     }
//!     graph.add_edge(&mut token, &"oslo", &"bergen", 463).unwrap();
//!     graph.add_edge(&mut token, &"oslo", &"trondheim", 494).unwrap();
//!     graph.add_edge(&mut token, &"bergen", &"trondheim", 700).unwrap();
//!
//!     assert_eq!(graph.degree(&token, &"oslo"), 2);
//!     assert_eq!(graph.weight(&token, &"trondheim", &"bergen"), 700);
//!
//!     let tree = minimum_spanning_tree(&graph, &mut token);
//!     assert_eq!(tree.total_weight(&token), 957);
//! });
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): emits `tracing` events on hash-map rehash, cascading
//!   vertex removal and spanning-forest construction.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#![allow(clippy::missing_panics_doc)]

mod macros;

pub mod cell;
pub mod collections;
pub mod graph;
pub mod token;

pub use cell::GhostCell;
pub use collections::{
    ActiveDisjointSet,
    BrandedChainedHashMap,
    BrandedDisjointSet,
    BrandedDoublyLinkedList,
    BrandedVec,
    NodeHandle,
};
pub use graph::{
    component_count,
    connected_components,
    minimum_spanning_tree,
    GraphError,
    Neighbors,
    UnorderedPair,
    WeightedGraph,
};
pub use token::GhostToken;

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Tokens are ZSTs.
    assert!(mem::size_of::<GhostToken<'static>>() == 0);

    // `GhostCell` is `repr(transparent)` over `UnsafeCell<T>`.
    assert!(mem::size_of::<GhostCell<'static, i32>>() == mem::size_of::<core::cell::UnsafeCell<i32>>());
    assert!(mem::align_of::<GhostCell<'static, i32>>() == mem::align_of::<core::cell::UnsafeCell<i32>>());

    // Handles stay two words so edge records remain compact.
    assert!(mem::size_of::<NodeHandle>() <= 2 * mem::size_of::<usize>());
};
