//! Weighted undirected graph with O(1) edge removal.
//!
//! # Layout
//!
//! - `vertices`: a [`BrandedDoublyLinkedList`] of keys. Its order is the vertex
//!   enumeration order and its node handles identify vertices internally.
//! - `adjacency`: one list of edge ends per vertex slot, stored densely and
//!   indexed by the vertex handle's slot index (structure-of-arrays).
//! - `edges`: the edge arena. Each record keeps, for both endpoints, the vertex
//!   handle and the handle of the adjacency node that represents the edge in
//!   that vertex's list.
//! - `vertex_index` / `edge_index`: chained hash maps from a key, or an
//!   [`UnorderedPair`] of keys, to the arena handle.
//!
//! An adjacency node stores the handle of its edge, so traversal reaches the
//! other endpoint in O(1), and removing an edge unlinks both of its nodes by
//! handle without scanning either list. A self-edge owns a single node.
//!
//! Absent keys never panic: every operation reports them through `bool`,
//! `Option` or [`GraphError`].

use core::fmt;
use core::hash::Hash;

use crate::collections::{BrandedChainedHashMap, BrandedDoublyLinkedList, NodeHandle};
use crate::graph::vertex_pair::PairView;
use crate::graph::{GraphError, UnorderedPair};
use crate::macros::log_event;
use crate::GhostToken;

/// One endpoint of an edge: the vertex and the edge's node in its adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EdgeEndRef {
    vertex: NodeHandle,
    node: NodeHandle,
}

#[derive(Debug, Clone, Copy)]
struct EdgeRecord {
    ends: [EdgeEndRef; 2],
    weight: i32,
}

impl EdgeRecord {
    #[inline]
    fn other_end(&self, vertex: NodeHandle) -> NodeHandle {
        if self.ends[0].vertex == vertex {
            self.ends[1].vertex
        } else {
            self.ends[0].vertex
        }
    }
}

/// Adjacency list entry.
#[derive(Debug, Clone, Copy)]
struct EdgeEnd {
    edge: NodeHandle,
}

/// Neighbor snapshot of one vertex: parallel key and weight vectors in
/// adjacency order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbors<K> {
    /// Neighbor keys. A vertex with a self-edge lists itself once.
    pub keys: Vec<K>,
    /// `weights[i]` is the weight of the edge to `keys[i]`.
    pub weights: Vec<i32>,
}

impl<K> Neighbors<K> {
    /// Number of neighbors.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if there are no neighbors.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates over `(neighbor, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&K, i32)> + '_ {
        self.keys.iter().zip(self.weights.iter().copied())
    }
}

/// A weighted undirected graph over application keys.
///
/// Each unordered pair of vertices carries at most one edge; adding it again
/// overwrites the weight.
pub struct WeightedGraph<'brand, K> {
    vertices: BrandedDoublyLinkedList<'brand, K>,
    adjacency: Vec<BrandedDoublyLinkedList<'brand, EdgeEnd>>,
    vertex_index: BrandedChainedHashMap<'brand, K, NodeHandle>,
    edges: BrandedDoublyLinkedList<'brand, EdgeRecord>,
    edge_index: BrandedChainedHashMap<'brand, UnorderedPair<K>, NodeHandle>,
}

fn endpoint_key<'a, 'brand, K>(
    vertices: &'a BrandedDoublyLinkedList<'brand, K>,
    token: &'a GhostToken<'brand>,
    vertex: NodeHandle,
) -> &'a K {
    match vertices.get(token, vertex) {
        Some(key) => key,
        None => panic!("Corrupted graph: edge references freed vertex slot {}", vertex.index()),
    }
}

impl<'brand, K> WeightedGraph<'brand, K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Creates an empty graph sized for `vertices` vertices and `edges` edges.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: BrandedDoublyLinkedList::with_capacity(vertices),
            adjacency: Vec::with_capacity(vertices),
            vertex_index: BrandedChainedHashMap::with_capacity(vertices),
            edges: BrandedDoublyLinkedList::with_capacity(edges),
            edge_index: BrandedChainedHashMap::with_capacity(edges),
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges. A self-edge counts once.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    fn vertex_handle(&self, token: &GhostToken<'brand>, key: &K) -> Option<NodeHandle> {
        self.vertex_index.get(token, key).copied()
    }

    fn key_of<'a>(&'a self, token: &'a GhostToken<'brand>, vertex: NodeHandle) -> &'a K {
        endpoint_key(&self.vertices, token, vertex)
    }

    fn edge_record<'a>(&'a self, token: &'a GhostToken<'brand>, edge: NodeHandle) -> &'a EdgeRecord {
        match self.edges.get(token, edge) {
            Some(record) => record,
            None => panic!("Corrupted graph: dangling edge handle for slot {}", edge.index()),
        }
    }

    fn edge_record_mut<'a>(
        &'a self,
        token: &'a mut GhostToken<'brand>,
        edge: NodeHandle,
    ) -> &'a mut EdgeRecord {
        let slot = edge.index();
        match self.edges.get_mut(token, edge) {
            Some(record) => record,
            None => panic!("Corrupted graph: dangling edge handle for slot {slot}"),
        }
    }

    fn find_edge(&self, token: &GhostToken<'brand>, u: &K, v: &K) -> Option<NodeHandle> {
        self.edge_index
            .get(token, &PairView::new(u, v))
            .copied()
    }

    /// Adds `key` as an isolated vertex.
    ///
    /// Returns `false`, leaving the graph unchanged, if it is already a vertex.
    pub fn add_vertex(&mut self, token: &mut GhostToken<'brand>, key: K) -> bool {
        if self.vertex_index.contains_key(&key) {
            return false;
        }

        let vertex = self.vertices.push_back(token, key.clone());
        let slot = vertex.index();
        if slot >= self.adjacency.len() {
            self.adjacency.resize_with(slot + 1, BrandedDoublyLinkedList::new);
        }
        debug_assert!(self.adjacency[slot].is_empty());

        self.vertex_index.insert(key, vertex);
        true
    }

    /// Removes `key` and every edge incident to it, self-edges included.
    ///
    /// Returns the stored key, or `None` if `key` is not a vertex.
    pub fn remove_vertex(&mut self, token: &mut GhostToken<'brand>, key: &K) -> Option<K> {
        let vertex = self.vertex_handle(token, key)?;

        let incident: Vec<NodeHandle> = self.adjacency[vertex.index()]
            .iter(token)
            .map(|end| end.edge)
            .collect();
        log_event!(
            trace,
            slot = vertex.index(),
            incident = incident.len(),
            "removing vertex with its incident edges"
        );
        for edge in incident {
            self.detach_edge(token, edge);
        }
        debug_assert!(self.adjacency[vertex.index()].is_empty());

        self.vertex_index.remove(key);
        self.vertices.remove(token, vertex)
    }

    /// Returns `true` if `key` is a vertex.
    #[inline]
    pub fn is_vertex(&self, _token: &GhostToken<'brand>, key: &K) -> bool {
        self.vertex_index.contains_key(key)
    }

    /// Number of edges incident to `key`; 0 if it is not a vertex.
    ///
    /// A self-edge contributes 1.
    pub fn degree(&self, token: &GhostToken<'brand>, key: &K) -> usize {
        self.vertex_handle(token, key)
            .map_or(0, |vertex| self.adjacency[vertex.index()].len())
    }

    /// Snapshot of all vertex keys in insertion order.
    pub fn vertices(&self, token: &GhostToken<'brand>) -> Vec<K> {
        self.vertices.iter(token).cloned().collect()
    }

    /// Neighbors of `key` with the connecting weights, in adjacency order.
    ///
    /// Returns `None` if `key` is not a vertex or has no incident edges.
    pub fn neighbors(&self, token: &GhostToken<'brand>, key: &K) -> Option<Neighbors<K>> {
        let vertex = self.vertex_handle(token, key)?;
        let adjacency = &self.adjacency[vertex.index()];
        if adjacency.is_empty() {
            return None;
        }

        let mut keys = Vec::with_capacity(adjacency.len());
        let mut weights = Vec::with_capacity(adjacency.len());
        for end in adjacency.iter(token) {
            let record = self.edge_record(token, end.edge);
            keys.push(self.key_of(token, record.other_end(vertex)).clone());
            weights.push(record.weight);
        }

        debug_assert!(
            {
                let mut seen = std::collections::HashSet::with_capacity(keys.len());
                keys.iter().all(|k| seen.insert(k))
            },
            "adjacency list holds two edges to the same neighbor"
        );
        Some(Neighbors { keys, weights })
    }

    /// Adds an edge between `u` and `v`, or overwrites the weight of the
    /// existing one.
    ///
    /// Returns `Ok(None)` for a new edge and `Ok(Some(previous_weight))` for an
    /// update. Fails with [`GraphError::UnknownVertex`] if either endpoint is
    /// missing.
    pub fn add_edge(
        &mut self,
        token: &mut GhostToken<'brand>,
        u: &K,
        v: &K,
        weight: i32,
    ) -> Result<Option<i32>, GraphError> {
        let (Some(from), Some(to)) = (self.vertex_handle(token, u), self.vertex_handle(token, v))
        else {
            return Err(GraphError::UnknownVertex);
        };

        if let Some(edge) = self.find_edge(token, u, v) {
            let record = self.edge_record_mut(token, edge);
            return Ok(Some(core::mem::replace(&mut record.weight, weight)));
        }

        // Node handles are filled in once the adjacency nodes exist.
        let edge = self.edges.push_back(
            token,
            EdgeRecord {
                ends: [
                    EdgeEndRef {
                        vertex: from,
                        node: NodeHandle::dangling(),
                    },
                    EdgeEndRef {
                        vertex: to,
                        node: NodeHandle::dangling(),
                    },
                ],
                weight,
            },
        );
        let from_node = self.adjacency[from.index()].push_back(token, EdgeEnd { edge });
        let to_node = if from == to {
            from_node
        } else {
            self.adjacency[to.index()].push_back(token, EdgeEnd { edge })
        };

        let record = self.edge_record_mut(token, edge);
        record.ends[0].node = from_node;
        record.ends[1].node = to_node;

        self.edge_index
            .insert(UnorderedPair::new(u.clone(), v.clone()), edge);
        Ok(None)
    }

    /// Removes the edge between `u` and `v`, returning its weight.
    ///
    /// Returns `None` if there is no such edge.
    pub fn remove_edge(&mut self, token: &mut GhostToken<'brand>, u: &K, v: &K) -> Option<i32> {
        let edge = self.find_edge(token, u, v)?;
        Some(self.detach_edge(token, edge))
    }

    /// Unlinks both adjacency nodes of `edge`, then drops it from the arena and the index.
    fn detach_edge(&mut self, token: &mut GhostToken<'brand>, edge: NodeHandle) -> i32 {
        let Some(record) = self.edges.remove(token, edge) else {
            panic!("Corrupted graph: edge index points at freed slot {}", edge.index());
        };

        let [first, second] = record.ends;
        self.adjacency[first.vertex.index()].remove(token, first.node);
        if second != first {
            self.adjacency[second.vertex.index()].remove(token, second.node);
        }

        let token: &GhostToken<'brand> = token;
        let pair = PairView::new(
            endpoint_key(&self.vertices, token, first.vertex),
            endpoint_key(&self.vertices, token, second.vertex),
        );
        self.edge_index.remove(&pair);
        record.weight
    }

    /// Returns `true` if `u` and `v` are joined by an edge.
    #[inline]
    pub fn is_edge(&self, _token: &GhostToken<'brand>, u: &K, v: &K) -> bool {
        self.edge_index.contains_key(&PairView::new(u, v))
    }

    /// Weight of the edge between `u` and `v`, or `None` if there is none.
    pub fn edge_weight(&self, token: &GhostToken<'brand>, u: &K, v: &K) -> Option<i32> {
        let edge = self.find_edge(token, u, v)?;
        Some(self.edge_record(token, edge).weight)
    }

    /// Weight of the edge between `u` and `v`, or 0 if there is none.
    ///
    /// Use [`edge_weight`](Self::edge_weight) or [`is_edge`](Self::is_edge) to
    /// tell a zero-weight edge from a missing one.
    #[inline]
    pub fn weight(&self, token: &GhostToken<'brand>, u: &K, v: &K) -> i32 {
        self.edge_weight(token, u, v).unwrap_or(0)
    }

    /// Snapshot of all edges as `(u, v, weight)` in edge insertion order.
    ///
    /// Endpoints appear in the order of the `add_edge` call that created the edge.
    pub fn edges(&self, token: &GhostToken<'brand>) -> Vec<(K, K, i32)> {
        self.edges
            .iter(token)
            .map(|record| {
                (
                    self.key_of(token, record.ends[0].vertex).clone(),
                    self.key_of(token, record.ends[1].vertex).clone(),
                    record.weight,
                )
            })
            .collect()
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self, token: &GhostToken<'brand>) -> i64 {
        self.edges
            .iter(token)
            .map(|record| i64::from(record.weight))
            .sum()
    }

    /// Removes every vertex and edge.
    pub fn clear(&mut self, token: &mut GhostToken<'brand>) {
        self.edges.clear(token);
        self.vertices.clear(token);
        self.adjacency.clear();
        self.vertex_index.clear();
        self.edge_index.clear();
    }
}

impl<'brand, K> Default for WeightedGraph<'brand, K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'brand, K> fmt::Debug for WeightedGraph<'brand, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedGraph")
            .field("vertex_count", &self.vertices.len())
            .field("edge_count", &self.edges.len())
            .finish()
    }
}
