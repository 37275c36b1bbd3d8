//! Stereotypy metrics
//!
//! Each metric fails with [`Error::DegenerateInput`] instead of dividing by
//! zero, so a genuine `0.0` is never confused with "nothing observed".

use super::edges::Edge;
use super::matrix::{TransitionMatrix, Weight};
use crate::error::DegenerateReason;
use crate::sequence::Alphabet;
use crate::{Error, Result};
use serde::Serialize;

/// The four summary statistics of a transition network
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StereotypyMetrics {
    pub transition_entropy: f64,
    pub sequence_linearity: f64,
    pub sequence_consistency: f64,
    pub song_stereotypy: f64,
}

/// Shannon entropy in bits of a non-negative weight vector, normalized by its sum.
///
/// Zero weights contribute nothing (`0 * log2(0) = 0`). Returns `None` for a
/// vector summing to zero.
pub fn shannon_entropy_bits<W: Weight>(weights: &[W]) -> Option<f64> {
    let sum: f64 = weights.iter().map(|w| w.as_f64()).sum();
    if sum == 0.0 {
        return None;
    }

    let entropy = weights
        .iter()
        .map(|w| w.as_f64() / sum)
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum::<f64>();
    Some(entropy)
}

/// Mean per-row transition entropy in bits.
///
/// Rows that never act as a source (sum zero) are left out of the mean.
pub fn transition_entropy<W: Weight>(matrix: &TransitionMatrix<W>) -> Result<f64> {
    let entropies: Vec<f64> = matrix
        .rows()
        .iter()
        .filter_map(|row| shannon_entropy_bits(row))
        .collect();

    if entropies.is_empty() {
        return Err(Error::degenerate(
            "transition_entropy",
            DegenerateReason::EmptyMatrix,
        ));
    }

    Ok(entropies.iter().sum::<f64>() / entropies.len() as f64)
}

/// Non-terminal symbols per distinct transition type.
///
/// 1.0 for a strictly linear song; lower as the song branches.
pub fn sequence_linearity<S, W>(alphabet: &Alphabet<S>, edges: &[Edge<W>]) -> Result<f64> {
    if edges.is_empty() {
        return Err(Error::degenerate(
            "sequence_linearity",
            DegenerateReason::EmptyNetwork,
        ));
    }

    Ok(alphabet.non_terminal_len() as f64 / edges.len() as f64)
}

/// `(source, destination)` of every row whose maximum is unique and non-zero
pub fn typical_transitions<W: Weight>(matrix: &TransitionMatrix<W>) -> Vec<(usize, usize)> {
    matrix
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(source, row)| {
            let max = row
                .iter()
                .copied()
                .fold(None, |acc: Option<W>, w| match acc {
                    Some(m) if m >= w => Some(m),
                    _ => Some(w),
                })?;
            if max.is_zero() {
                return None;
            }

            let mut at_max = row.iter().enumerate().filter(|&(_, w)| *w == max);
            match (at_max.next(), at_max.next()) {
                (Some((destination, _)), None) => Some((source, destination)),
                _ => None,
            }
        })
        .collect()
}

/// Share of transition types that are the single most likely exit of their source.
///
/// Numerator: rows with a unique, non-zero maximum. Denominator: every
/// non-zero cell of the matrix.
pub fn sequence_consistency<S, W>(alphabet: &Alphabet<S>, matrix: &TransitionMatrix<W>) -> Result<f64>
where
    S: std::fmt::Debug,
    W: Weight,
{
    if alphabet.len() != matrix.size() {
        return Err(Error::custom(format!(
            "Alphabet has {} symbols but the matrix is {}x{}",
            alphabet.len(),
            matrix.size(),
            matrix.size()
        )));
    }

    let total_transitions = matrix.non_zero_count();
    if total_transitions == 0 {
        return Err(Error::degenerate(
            "sequence_consistency",
            DegenerateReason::EmptyMatrix,
        ));
    }

    let typical = typical_transitions(matrix);
    for &(source, destination) in &typical {
        if let (Some(from), Some(to)) = (alphabet.symbol(source), alphabet.symbol(destination)) {
            tracing::trace!("Typical transition {:?} -> {:?}", from, to);
        }
    }

    Ok(typical.len() as f64 / total_transitions as f64)
}

/// Mean of linearity and consistency
pub fn song_stereotypy(linearity: f64, consistency: f64) -> f64 {
    (linearity + consistency) / 2.0
}

impl StereotypyMetrics {
    /// Compute all four metrics from a matrix and its network
    pub fn compute<S, W>(
        alphabet: &Alphabet<S>,
        matrix: &TransitionMatrix<W>,
        edges: &[Edge<W>],
    ) -> Result<Self>
    where
        S: std::fmt::Debug,
        W: Weight,
    {
        let transition_entropy = transition_entropy(matrix)?;
        let sequence_linearity = sequence_linearity(alphabet, edges)?;
        let sequence_consistency = sequence_consistency(alphabet, matrix)?;

        Ok(Self {
            transition_entropy,
            sequence_linearity,
            sequence_consistency,
            song_stereotypy: song_stereotypy(sequence_linearity, sequence_consistency),
        })
    }
}
