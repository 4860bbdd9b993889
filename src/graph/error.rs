//! Errors reported by graph mutations.

use core::fmt;

/// Error returned when a graph operation cannot be applied.
///
/// The graph is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphError {
    /// An endpoint passed to [`add_edge`](crate::graph::WeightedGraph::add_edge)
    /// is not a vertex of the graph.
    UnknownVertex,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::UnknownVertex => write!(f, "endpoint is not a vertex of the graph"),
        }
    }
}

impl std::error::Error for GraphError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(GraphError::UnknownVertex);
        assert_eq!(err.to_string(), "endpoint is not a vertex of the graph");
    }
}
