//! Connected components of a [`WeightedGraph`].
//!
//! Like the spanning-forest builder, these helpers label vertices densely,
//! run a disjoint set in a nested token scope and union across every edge.

use core::hash::Hash;

use crate::collections::{ActiveDisjointSet, BrandedChainedHashMap, BrandedDisjointSet};
use crate::graph::WeightedGraph;
use crate::GhostToken;

/// Groups the vertices of `graph` by connected component.
///
/// Components are ordered by their first vertex in enumeration order, and each
/// group lists its vertices in enumeration order.
pub fn connected_components<'brand, K>(
    graph: &WeightedGraph<'brand, K>,
    token: &GhostToken<'brand>,
) -> Vec<Vec<K>>
where
    K: Eq + Hash + Clone,
{
    let vertices = graph.vertices(token);
    let len = vertices.len();

    let mut labels = BrandedChainedHashMap::with_capacity(len);
    for (label, key) in vertices.iter().enumerate() {
        labels.insert(key.clone(), label);
    }
    let label_of = |key: &K| match labels.get(token, key) {
        Some(&label) => label,
        None => unreachable!("neighbor of an enumerated vertex has no label"),
    };

    // Create a new branded scope for the disjoint set
    let roots: Vec<usize> = token.with_scoped(|mut ds_token| {
        let mut ds = BrandedDisjointSet::with_capacity(len);
        let mut active_ds = ActiveDisjointSet::new(&mut ds, &mut ds_token);
        for _ in 0..len {
            active_ds.make_set();
        }

        for (u, key) in vertices.iter().enumerate() {
            if let Some(neighbors) = graph.neighbors(token, key) {
                for other in &neighbors.keys {
                    active_ds.union(u, label_of(other));
                }
            }
        }

        (0..len).map(|u| active_ds.find(u)).collect()
    });

    // Root label -> position of its group in the output.
    let mut group_of = vec![usize::MAX; len];
    let mut groups: Vec<Vec<K>> = Vec::new();
    for (key, root) in vertices.into_iter().zip(roots) {
        if group_of[root] == usize::MAX {
            group_of[root] = groups.len();
            groups.push(Vec::new());
        }
        groups[group_of[root]].push(key);
    }
    groups
}

/// Number of connected components of `graph`. An isolated vertex is its own
/// component; the empty graph has none.
pub fn component_count<'brand, K>(graph: &WeightedGraph<'brand, K>, token: &GhostToken<'brand>) -> usize
where
    K: Eq + Hash + Clone,
{
    connected_components(graph, token).len()
}
