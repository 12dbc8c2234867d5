use std::sync::Arc;

use crate::{
    error::{Result, ensure_config},
    graph::Graph,
};

/// The fixed inputs of a run: adjacency, unit populations and optional county
/// labels. Unit `i` is node `i` of the graph.
#[derive(Clone, Debug)]
pub struct DistrictMap {
    graph: Arc<Graph>,
    pop: Vec<u64>,
    counties: Option<Vec<u32>>,
}

impl DistrictMap {
    pub fn new(graph: impl Into<Arc<Graph>>, pop: Vec<u64>) -> Result<Self> {
        let graph: Arc<Graph> = graph.into();
        ensure_config!(!pop.is_empty(), "map has no units");
        ensure_config!(graph.node_count() == pop.len(),
            "adjacency has {} units but population has {}", graph.node_count(), pop.len());
        ensure_config!(pop.iter().sum::<u64>() > 0, "total population must be positive");

        Ok(Self { graph, pop, counties: None })
    }

    /// Attach county labels. They are checked when the run normalizes them.
    pub fn with_counties(mut self, counties: Vec<u32>) -> Self {
        self.counties = Some(counties);
        self
    }

    #[inline] pub fn num_units(&self) -> usize { self.pop.len() }

    #[inline] pub fn graph(&self) -> &Arc<Graph> { &self.graph }

    #[inline] pub fn pop(&self) -> &[u64] { &self.pop }

    #[inline] pub fn counties(&self) -> Option<&[u32]> { self.counties.as_deref() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: u32) -> Graph {
        let adj = (0..n)
            .map(|i| [i.checked_sub(1), (i + 1 < n).then_some(i + 1)].into_iter().flatten().collect())
            .collect::<Vec<Vec<u32>>>();
        Graph::from_adjacency(&adj).unwrap()
    }

    #[test]
    fn builds_from_matching_inputs() {
        let map = DistrictMap::new(path(3), vec![5, 5, 10]).unwrap().with_counties(vec![1, 1, 2]);
        assert_eq!(map.num_units(), 3);
        assert_eq!(map.pop(), &[5, 5, 10]);
        assert_eq!(map.counties(), Some(&[1, 1, 2][..]));
    }

    #[test]
    fn rejects_size_mismatch() {
        assert!(DistrictMap::new(path(3), vec![1, 1]).is_err());
    }

    #[test]
    fn rejects_zero_population() {
        assert!(DistrictMap::new(path(2), vec![0, 0]).is_err());
    }
}
