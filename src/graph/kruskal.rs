//! Kruskal's minimum spanning forest.
//!
//! The input graph is read only through its public enumeration API
//! (`vertices` + `neighbors`), so every undirected edge is discovered twice and
//! a self-edge once. The duplicate discovery is harmless: after the first copy
//! has merged the two components the second one is rejected as a cycle.

use core::hash::Hash;

use crate::collections::{BrandedChainedHashMap, BrandedDisjointSet};
use crate::graph::WeightedGraph;
use crate::macros::log_event;
use crate::GhostToken;

/// Computes a minimum spanning forest of `graph`.
///
/// The result holds every vertex of `graph` (same enumeration order) and
/// `vertex_count - c` edges, where `c` is the number of connected components.
/// Among all spanning forests with the same components its total weight is
/// minimal. Self-edges are never part of the result.
///
/// Edges are considered in ascending weight order with a stable sort, so ties
/// are broken by discovery order (vertex order, then adjacency order).
///
/// # Example
///
/// ```rust
/// use ghostgraph::{minimum_spanning_tree, GhostToken, WeightedGraph};
///
/// GhostToken::new(|mut token| {
///     let mut graph = WeightedGraph::new();
///     for v in ["a", "b", "c"] {
///         graph.add_vertex(&mut token, v);
///     }
///     graph.add_edge(&mut token, &"a", &"b", 5).unwrap();
///     graph.add_edge(&mut token, &"b", &"c", 3).unwrap();
///     graph.add_edge(&mut token, &"a", &"c", 10).unwrap();
///
///     let tree = minimum_spanning_tree(&graph, &mut token);
///     assert_eq!(tree.edge_count(), 2);
///     assert_eq!(tree.total_weight(&token), 8);
///     assert!(!tree.is_edge(&token, &"a", &"c"));
/// });
/// ```
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn minimum_spanning_tree<'brand, K>(
    graph: &WeightedGraph<'brand, K>,
    token: &mut GhostToken<'brand>,
) -> WeightedGraph<'brand, K>
where
    K: Eq + Hash + Clone,
{
    let vertices = graph.vertices(token);
    let mut tree = WeightedGraph::with_capacity(vertices.len(), vertices.len().saturating_sub(1));

    // Dense labels 0..n for the disjoint-set universe.
    let mut labels = BrandedChainedHashMap::with_capacity(vertices.len());
    for (label, key) in vertices.iter().enumerate() {
        tree.add_vertex(token, key.clone());
        labels.insert(key.clone(), label);
    }

    let mut candidates: Vec<(i32, K, K)> = Vec::with_capacity(2 * graph.edge_count());
    for key in &vertices {
        if let Some(neighbors) = graph.neighbors(token, key) {
            candidates.extend(
                neighbors
                    .iter()
                    .map(|(other, weight)| (weight, key.clone(), other.clone())),
            );
        }
    }
    candidates.shrink_to_fit();
    candidates.sort_by_key(|&(weight, _, _)| weight);
    let discovered = candidates.len();

    let accepted = GhostToken::new(|mut forest_token| {
        let mut forest = BrandedDisjointSet::with_len(vertices.len());
        let mut accepted = 0usize;

        for (weight, a, b) in candidates {
            let (Some(&la), Some(&lb)) = (labels.get(token, &a), labels.get(token, &b)) else {
                unreachable!("neighbor of an enumerated vertex has no label");
            };
            if !forest.union(&mut forest_token, la, lb) {
                continue;
            }
            if tree.add_edge(token, &a, &b, weight).is_err() {
                unreachable!("spanning forest is missing an endpoint");
            }
            accepted += 1;
        }
        accepted
    });

    log_event!(
        debug,
        vertices = vertices.len(),
        candidates = discovered,
        accepted,
        "minimum spanning forest built"
    );
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build<'brand>(
        token: &mut GhostToken<'brand>,
        vertices: &[u32],
        edges: &[(u32, u32, i32)],
    ) -> WeightedGraph<'brand, u32> {
        let mut graph = WeightedGraph::new();
        for &v in vertices {
            graph.add_vertex(token, v);
        }
        for &(u, v, w) in edges {
            graph.add_edge(token, &u, &v, w).unwrap();
        }
        graph
    }

    #[test]
    fn empty_graph() {
        GhostToken::new(|mut token| {
            let graph: WeightedGraph<'_, u32> = WeightedGraph::new();
            let tree = minimum_spanning_tree(&graph, &mut token);
            assert!(tree.is_empty());
            assert_eq!(tree.edge_count(), 0);
        });
    }

    #[test]
    fn picks_lightest_edges() {
        GhostToken::new(|mut token| {
            let graph = build(
                &mut token,
                &[0, 1, 2, 3],
                &[(0, 1, 4), (0, 2, 2), (0, 3, 3), (1, 2, 6), (1, 3, 8), (2, 3, 1), (1, 1, 0)],
            );
            let tree = minimum_spanning_tree(&graph, &mut token);

            assert_eq!(tree.vertices(&token), vec![0, 1, 2, 3]);
            assert_eq!(tree.edge_count(), 3);
            assert_eq!(tree.total_weight(&token), 7);
            assert!(tree.is_edge(&token, &2, &3));
            assert!(tree.is_edge(&token, &0, &2));
            assert!(tree.is_edge(&token, &0, &1));
            assert!(!tree.is_edge(&token, &1, &1));

            // The input is untouched.
            assert_eq!(graph.edge_count(), 7);
        });
    }

    #[test]
    fn negative_and_zero_weights_are_kept() {
        GhostToken::new(|mut token| {
            let graph = build(&mut token, &[0, 1, 2], &[(0, 1, -3), (1, 2, 0), (0, 2, 1)]);
            let tree = minimum_spanning_tree(&graph, &mut token);
            assert_eq!(tree.edge_count(), 2);
            assert_eq!(tree.edge_weight(&token, &0, &1), Some(-3));
            assert_eq!(tree.edge_weight(&token, &1, &2), Some(0));
            assert_eq!(tree.total_weight(&token), -3);
        });
    }

    #[test]
    fn isolated_vertices_survive() {
        GhostToken::new(|mut token| {
            let graph = build(&mut token, &[7, 8, 9], &[(7, 8, 2)]);
            let tree = minimum_spanning_tree(&graph, &mut token);
            assert_eq!(tree.vertex_count(), 3);
            assert_eq!(tree.edges(&token).len(), 1);
            assert_eq!(tree.degree(&token, &9), 0);
        });
    }
}
