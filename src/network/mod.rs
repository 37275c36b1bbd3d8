//! Network module - Transition matrices, syllable networks and their metrics

use crate::Result;
use crate::sequence::Alphabet;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

pub mod edges;
pub mod graph;
pub mod matrix;
pub mod metrics;
pub mod topology;

// Re-export key types
pub use edges::{Edge, extract_count_network, extract_network, total_weight};
pub use graph::{GraphStats, SyllableGraph};
pub use matrix::{
    CountMatrix, ProbabilityMatrix, SequenceStats, TransitionMatrix, Transitions, Weight,
    build_transition_matrix,
};
pub use metrics::{
    StereotypyMetrics, sequence_consistency, sequence_linearity, song_stereotypy,
    transition_entropy,
};
pub use topology::{SequencePattern, TopologyReport, detect_pattern};

/// Everything derived from one sequence
#[derive(Debug, Clone, Serialize)]
pub struct NetworkAnalysis {
    pub alphabet: Vec<String>,
    pub stats: SequenceStats,
    pub matrix: CountMatrix,
    pub edges: Vec<Edge<u32>>,
    pub metrics: StereotypyMetrics,
}

/// Run the full pipeline: sequence -> matrix -> network -> metrics
pub fn analyze<S>(sequence: &[S], alphabet: &Alphabet<S>) -> Result<NetworkAnalysis>
where
    S: Eq + Hash + Clone + fmt::Debug + fmt::Display,
{
    let (matrix, stats) = CountMatrix::count(sequence, alphabet);
    tracing::debug!(
        "Counted {} transition(s) over {} symbols",
        stats.counted_pairs,
        stats.length
    );

    let edges = extract_network(&matrix);
    tracing::debug!("Network has {} edge(s)", edges.len());

    let metrics = StereotypyMetrics::compute(alphabet, &matrix, &edges)?;

    Ok(NetworkAnalysis {
        alphabet: alphabet.symbols().map(ToString::to_string).collect(),
        stats,
        matrix,
        edges,
        metrics,
    })
}
