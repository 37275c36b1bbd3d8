//! Network topology analyzer
//!
//! Classifies the shape of a syllable network: a linear chain, a branching
//! song, or one that loops back on itself.

use super::SyllableGraph;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SequencePattern {
    /// a -> b -> c -> *
    Linear,

    /// a -> b
    ///   -> c
    Branching,

    /// a -> b -> a
    Cyclic,

    /// No transitions observed
    Empty,
}

impl SequencePattern {
    pub fn display_name(&self) -> &'static str {
        match self {
            SequencePattern::Linear => "Linear",
            SequencePattern::Branching => "Branching",
            SequencePattern::Cyclic => "Cyclic",
            SequencePattern::Empty => "Empty",
        }
    }
}

/// Shape summary of a syllable network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyReport {
    pub pattern: SequencePattern,
    /// Mean out-degree over states that have at least one exit
    pub branching_factor: f64,
    pub max_out_degree: usize,
    pub has_cycles: bool,
    /// Symbols with a self-transition
    pub repeated_syllables: Vec<String>,
}

/// Detect the pattern of a syllable graph
pub fn detect_pattern(graph: &SyllableGraph) -> TopologyReport {
    let sources: Vec<usize> = (0..graph.node_index.len())
        .map(|i| graph.out_degree(i))
        .filter(|&d| d > 0)
        .collect();

    if sources.is_empty() {
        return TopologyReport {
            pattern: SequencePattern::Empty,
            branching_factor: 0.0,
            max_out_degree: 0,
            has_cycles: false,
            repeated_syllables: Vec::new(),
        };
    }

    let repeated_syllables: Vec<String> = (0..graph.node_index.len())
        .filter(|&i| graph.outgoing(i).iter().any(|&(dst, _)| dst == i))
        .filter_map(|i| graph.node(i).map(|n| n.symbol.clone()))
        .collect();

    // Self-loops count as cycles for petgraph; repeats are reported separately
    let has_cycles = petgraph::algo::is_cyclic_directed(&graph.graph);

    let branching_factor = sources.iter().sum::<usize>() as f64 / sources.len() as f64;
    let max_out_degree = sources.iter().copied().max().unwrap_or(0);

    let pattern = if has_cycles {
        SequencePattern::Cyclic
    } else if max_out_degree <= 1 {
        SequencePattern::Linear
    } else {
        SequencePattern::Branching
    };

    TopologyReport {
        pattern,
        branching_factor,
        max_out_degree,
        has_cycles,
        repeated_syllables,
    }
}
