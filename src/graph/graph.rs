use serde::{Deserialize, Serialize};

use crate::error::{EnsembleError, Result, ensure_config};

/// Unit adjacency in compressed sparse row format.
///
/// Nodes are 0-based unit indices. The graph is what the partition sampler
/// walks; this crate only stores it and hands it back in the result bundle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<u32>>", try_from = "Vec<Vec<u32>>")]
pub struct Graph {
    offsets: Vec<u32>,
    edges: Vec<u32>,
}

impl Graph {
    /// Construct a graph from per-node neighbor lists.
    pub fn from_adjacency(adjacency: &[Vec<u32>]) -> Result<Self> {
        let num_nodes = adjacency.len();
        for (node, neighbors) in adjacency.iter().enumerate() {
            for &v in neighbors {
                ensure_config!((v as usize) < num_nodes,
                    "adjacency[{node}] refers to unit {v}, but there are only {num_nodes} units");
                ensure_config!(v as usize != node, "adjacency[{node}] lists itself as a neighbor");
            }
        }

        Ok(Self {
            offsets: std::iter::once(0u32).chain(
                adjacency.iter()
                    .map(|v| v.len() as u32)
                    .scan(0u32, |acc, len| {*acc += len; Some(*acc)})
            ).collect::<Vec<u32>>(),
            edges: adjacency.iter().flatten().copied().collect(),
        })
    }

    /// Get the number of nodes in the graph.
    #[inline] pub fn node_count(&self) -> usize { self.offsets.len() - 1 }

    /// Get the number of directed edge entries in the graph.
    #[inline] pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Get the range of edges for a given node.
    #[inline]
    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Get the degree (number of neighbors) of a given node.
    #[inline] pub fn degree(&self, node: usize) -> usize { self.range(node).len() }

    /// Get an iterator over the neighbors of a given node.
    #[inline]
    pub fn edges(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.range(node).map(move |v| self.edges[v] as usize)
    }

    /// Expand back into per-node neighbor lists.
    pub fn to_adjacency(&self) -> Vec<Vec<u32>> {
        (0..self.node_count())
            .map(|node| self.edges[self.range(node)].to_vec())
            .collect()
    }
}

impl From<Graph> for Vec<Vec<u32>> {
    fn from(graph: Graph) -> Self { graph.to_adjacency() }
}

impl TryFrom<Vec<Vec<u32>>> for Graph {
    type Error = EnsembleError;

    fn try_from(adjacency: Vec<Vec<u32>>) -> Result<Self> { Graph::from_adjacency(&adjacency) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_graph() -> Graph {
        Graph::from_adjacency(&[
            vec![1, 2],       // 0
            vec![0, 2],       // 1
            vec![0, 1, 3],    // 2
            vec![2],          // 3
        ]).unwrap()
    }

    #[test]
    fn csr_graph_construction() {
        let graph = make_test_graph();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 8);

        // Offsets are cumulative neighbor counts, len = nodes + 1
        assert_eq!(graph.offsets, vec![0, 2, 4, 7, 8]);
        assert_eq!(graph.edges, vec![1, 2, 0, 2, 0, 1, 3, 2]);
        assert_eq!(*graph.offsets.last().unwrap() as usize, graph.edges.len());
    }

    #[test]
    fn degree_and_neighbors() {
        let graph = make_test_graph();

        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.degree(2), 3);
        assert_eq!(graph.degree(3), 1);
        assert_eq!(graph.edges(2).collect::<Vec<_>>(), vec![0, 1, 3]);
    }

    #[test]
    fn empty_graph_is_valid() {
        let graph = Graph::from_adjacency(&[]).unwrap();

        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.offsets, vec![0]);
    }

    #[test]
    fn isolated_nodes_have_zero_degree() {
        let graph = Graph::from_adjacency(&[vec![], vec![], vec![]]).unwrap();

        assert_eq!(graph.offsets, vec![0, 0, 0, 0]);
        for n in 0..3 {
            assert_eq!(graph.degree(n), 0);
            assert!(graph.edges(n).next().is_none());
        }
    }

    #[test]
    fn rejects_out_of_range_neighbor() {
        let err = Graph::from_adjacency(&[vec![1], vec![5]]).unwrap_err();
        assert!(matches!(err, EnsembleError::Config(_)));
    }

    #[test]
    fn rejects_self_loop() {
        assert!(Graph::from_adjacency(&[vec![0]]).is_err());
    }

    #[test]
    fn adjacency_survives_json() {
        let graph = make_test_graph();
        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(json, "[[1,2],[0,2],[0,1,3],[2]]");
        assert_eq!(serde_json::from_str::<Graph>(&json).unwrap(), graph);
    }

    #[test]
    #[should_panic]
    fn degree_panics_for_out_of_bounds_node() {
        let graph = make_test_graph();
        graph.degree(graph.node_count());
    }
}
