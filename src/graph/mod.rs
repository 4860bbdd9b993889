//! The weighted undirected graph and the algorithms built on it.
//!
//! - `weighted_graph`: the graph itself, assembled from branded lists and maps
//! - `vertex_pair`: the order-independent key of the edge index
//! - `kruskal`: minimum spanning forest
//! - `components`: connected components via a disjoint set

pub mod components;
pub mod error;
pub mod kruskal;
pub mod vertex_pair;
pub mod weighted_graph;

pub use components::{component_count, connected_components};
pub use error::GraphError;
pub use kruskal::minimum_spanning_tree;
pub use vertex_pair::UnorderedPair;
pub use weighted_graph::{Neighbors, WeightedGraph};
