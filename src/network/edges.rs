//! Sparse network representation of a transition matrix

use super::matrix::{TransitionMatrix, Weight};
use serde::{Deserialize, Serialize};

/// An observed transition type: `source -> destination` seen `weight` times
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge<W = u32> {
    pub source: usize,
    pub destination: usize,
    pub weight: W,
}

impl<W> Edge<W> {
    pub fn new(source: usize, destination: usize, weight: W) -> Self {
        Self {
            source,
            destination,
            weight,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }
}

impl<W: Copy> Edge<W> {
    pub fn as_tuple(&self) -> (usize, usize, W) {
        (self.source, self.destination, self.weight)
    }
}

impl<W> From<(usize, usize, W)> for Edge<W> {
    fn from((source, destination, weight): (usize, usize, W)) -> Self {
        Self::new(source, destination, weight)
    }
}

/// One edge per non-zero cell, ordered by source then destination
pub fn extract_network<W: Weight>(matrix: &TransitionMatrix<W>) -> Vec<Edge<W>> {
    matrix
        .rows()
        .iter()
        .enumerate()
        .flat_map(|(source, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, weight)| !weight.is_zero())
                .map(move |(destination, &weight)| Edge::new(source, destination, weight))
        })
        .collect()
}

/// Like [`extract_network`], with weights truncated to integral counts.
///
/// Edges are selected on the original cell values, so a probability matrix
/// may yield edges whose count weight is 0.
pub fn extract_count_network<W: Weight>(matrix: &TransitionMatrix<W>) -> Vec<Edge<u32>> {
    extract_network(matrix)
        .into_iter()
        .map(|e| Edge::new(e.source, e.destination, e.weight.to_count()))
        .collect()
}

/// Sum of edge weights (number of counted transitions for a count network)
pub fn total_weight(edges: &[Edge<u32>]) -> u64 {
    edges.iter().map(|e| u64::from(e.weight)).sum()
}
