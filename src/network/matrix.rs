//! Transition matrix construction
//!
//! Rows are source states, columns destination states, both indexed by
//! alphabet position.

use crate::error::DegenerateReason;
use crate::sequence::Alphabet;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

/// Numeric cell type of a transition matrix
pub trait Weight: Copy + PartialEq + PartialOrd + Default + fmt::Debug + fmt::Display {
    fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    fn as_f64(self) -> f64;

    /// Value as an integral count, truncating toward zero
    fn to_count(self) -> u32;
}

impl Weight for u32 {
    fn as_f64(self) -> f64 {
        self as f64
    }

    fn to_count(self) -> u32 {
        self
    }
}

impl Weight for f64 {
    fn as_f64(self) -> f64 {
        self
    }

    fn to_count(self) -> u32 {
        self as u32
    }
}

/// Square matrix of transition weights
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionMatrix<W = u32> {
    rows: Vec<Vec<W>>,
}

/// Occurrence counts
pub type CountMatrix = TransitionMatrix<u32>;

/// Joint probabilities (counts divided by the grand total)
pub type ProbabilityMatrix = TransitionMatrix<f64>;

/// What happened to the adjacent pairs of a sequence while counting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SequenceStats {
    pub length: usize,
    /// Pairs that incremented a cell
    pub counted_pairs: usize,
    /// Pairs with at least one symbol outside the alphabet
    pub unknown_pairs: usize,
    /// Pairs leaving the terminal state
    pub terminal_pairs: usize,
}

impl<W: Weight> TransitionMatrix<W> {
    pub fn zeros(size: usize) -> Self {
        Self {
            rows: vec![vec![W::default(); size]; size],
        }
    }

    pub fn from_rows(rows: Vec<Vec<W>>) -> Result<Self> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(Error::custom(format!(
                "Transition matrix must be square: {} rows but a row of length {}",
                size,
                row.len()
            )));
        }
        Ok(Self { rows })
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, source: usize, destination: usize) -> W {
        self.rows[source][destination]
    }

    pub fn row(&self, source: usize) -> &[W] {
        &self.rows[source]
    }

    pub fn rows(&self) -> &[Vec<W>] {
        &self.rows
    }

    pub fn row_sum(&self, source: usize) -> f64 {
        self.rows[source].iter().map(|w| w.as_f64()).sum()
    }

    /// Grand total of all cells
    pub fn total(&self) -> f64 {
        (0..self.size()).map(|r| self.row_sum(r)).sum()
    }

    pub fn non_zero_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|w| !w.is_zero())
            .count()
    }

    pub fn is_zero(&self) -> bool {
        self.non_zero_count() == 0
    }
}

impl CountMatrix {
    /// Count first-order transitions of `sequence` over `alphabet`.
    ///
    /// Pairs touching an unknown symbol are skipped without breaking the scan;
    /// pairs leaving the terminal state are never counted.
    pub fn from_sequence<S>(sequence: &[S], alphabet: &Alphabet<S>) -> Self
    where
        S: Eq + Hash + Clone + fmt::Debug,
    {
        Self::count(sequence, alphabet).0
    }

    /// Same as [`CountMatrix::from_sequence`], also reporting skipped pairs
    pub fn count<S>(sequence: &[S], alphabet: &Alphabet<S>) -> (Self, SequenceStats)
    where
        S: Eq + Hash + Clone + fmt::Debug,
    {
        let mut matrix = Self::zeros(alphabet.len());
        let mut stats = SequenceStats {
            length: sequence.len(),
            ..Default::default()
        };

        for pair in sequence.windows(2) {
            let (Some(source), Some(destination)) =
                (alphabet.index_of(&pair[0]), alphabet.index_of(&pair[1]))
            else {
                tracing::trace!("Skipping pair {:?} -> {:?}: not in alphabet", pair[0], pair[1]);
                stats.unknown_pairs += 1;
                continue;
            };

            if alphabet.is_terminal(source) {
                stats.terminal_pairs += 1;
                continue;
            }

            matrix.rows[source][destination] += 1;
            stats.counted_pairs += 1;
        }

        if stats.unknown_pairs > 0 {
            tracing::debug!(
                "Skipped {} pair(s) with symbols outside the alphabet",
                stats.unknown_pairs
            );
        }

        (matrix, stats)
    }

    pub fn total_count(&self) -> u64 {
        self.rows.iter().flatten().map(|&c| u64::from(c)).sum()
    }

    /// Divide every cell by the grand total
    pub fn normalize(&self) -> Result<ProbabilityMatrix> {
        let total = self.total_count();
        if total == 0 {
            return Err(Error::degenerate("normalize", DegenerateReason::EmptyMatrix));
        }

        let total = total as f64;
        Ok(TransitionMatrix {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|&c| c as f64 / total).collect())
                .collect(),
        })
    }
}

/// Output of [`build_transition_matrix`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "matrix", rename_all = "snake_case")]
pub enum Transitions {
    Counts(CountMatrix),
    Probabilities(ProbabilityMatrix),
}

/// Build the transition matrix of `sequence`, optionally normalized by its grand total
pub fn build_transition_matrix<S>(
    sequence: &[S],
    alphabet: &Alphabet<S>,
    normalize: bool,
) -> Result<Transitions>
where
    S: Eq + Hash + Clone + fmt::Debug,
{
    let counts = CountMatrix::from_sequence(sequence, alphabet);
    if normalize {
        Ok(Transitions::Probabilities(counts.normalize()?))
    } else {
        Ok(Transitions::Counts(counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_build_cyclic_matrix() {
        let alphabet = Alphabet::from_chars("abc").unwrap();
        let matrix = CountMatrix::from_sequence(&chars("abcabc"), &alphabet);

        // 'c' is terminal, so c -> a is not counted
        assert_eq!(
            matrix.rows(),
            &[vec![0, 2, 0], vec![0, 0, 2], vec![0, 0, 0]]
        );
        assert_eq!(matrix.total_count(), 4);
    }

    #[test]
    fn test_cyclic_matrix_with_stop_symbol() {
        let alphabet = Alphabet::from_chars("abc*").unwrap();
        let matrix = CountMatrix::from_sequence(&chars("abcabc*"), &alphabet);

        assert_eq!(matrix.row(0), &[0, 2, 0, 0]);
        assert_eq!(matrix.row(1), &[0, 0, 2, 0]);
        assert_eq!(matrix.row(2), &[1, 0, 0, 1]);
        assert_eq!(matrix.row(3), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_unknown_symbols_are_skipped() {
        let alphabet = Alphabet::from_chars("ab*").unwrap();
        let (matrix, stats) = CountMatrix::count(&chars("axb ab*a"), &alphabet);

        // a->x, x->b, b->' ', ' '->a skipped; a->b, b->*, *->a (terminal) remain
        assert_eq!(matrix.rows(), &[vec![0, 1, 0], vec![0, 0, 1], vec![0, 0, 0]]);
        assert_eq!(stats.length, 8);
        assert_eq!(stats.unknown_pairs, 4);
        assert_eq!(stats.terminal_pairs, 1);
        assert_eq!(stats.counted_pairs, 2);
    }

    #[test]
    fn test_short_sequences() {
        let alphabet = Alphabet::from_chars("ab*").unwrap();
        assert!(CountMatrix::from_sequence(&[], &alphabet).is_zero());
        assert!(CountMatrix::from_sequence(&['a'], &alphabet).is_zero());
    }

    #[test]
    fn test_duplicate_alphabet_uses_first_index() {
        let alphabet = Alphabet::from_chars("aba*").unwrap();
        let matrix = CountMatrix::from_sequence(&chars("aba"), &alphabet);
        assert_eq!(matrix.get(0, 1), 1);
        assert_eq!(matrix.get(1, 0), 1);
        assert_eq!(matrix.row(2), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_normalize() {
        let alphabet = Alphabet::from_chars("abc*").unwrap();
        let counts = CountMatrix::from_sequence(&chars("abcab"), &alphabet);
        let probs = counts.normalize().unwrap();

        assert_eq!(probs.get(0, 1), 0.5);
        assert_eq!(probs.get(1, 2), 0.25);
        assert_eq!(probs.get(2, 0), 0.25);
        assert!((probs.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_empty_matrix_is_degenerate() {
        let err = CountMatrix::zeros(3).normalize().unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateInput {
                operation: "normalize",
                reason: DegenerateReason::EmptyMatrix
            }
        ));
    }

    #[test]
    fn test_build_transition_matrix_flag() {
        let alphabet = Alphabet::from_chars("ab*").unwrap();
        let sequence = chars("abab*");

        match build_transition_matrix(&sequence, &alphabet, false).unwrap() {
            Transitions::Counts(m) => assert_eq!(m.total_count(), 4),
            other => panic!("expected counts, got {:?}", other),
        }
        match build_transition_matrix(&sequence, &alphabet, true).unwrap() {
            Transitions::Probabilities(m) => assert_eq!(m.get(0, 1), 0.5),
            other => panic!("expected probabilities, got {:?}", other),
        }
        assert!(build_transition_matrix(&['*', 'a'], &alphabet, true).is_err());
    }

    #[test]
    fn test_from_rows_requires_square() {
        assert!(CountMatrix::from_rows(vec![vec![0, 1], vec![0]]).is_err());
        assert!(CountMatrix::from_rows(vec![vec![0, 1], vec![1, 0]]).is_ok());
    }

    proptest! {
        #[test]
        fn prop_terminal_row_is_zero(sequence in "[abcd*x]{0,60}") {
            let alphabet = Alphabet::from_chars("abcd*").unwrap();
            let matrix = CountMatrix::from_sequence(&chars(&sequence), &alphabet);
            prop_assert!(matrix.row(alphabet.terminal_index()).iter().all(|&c| c == 0));
        }

        #[test]
        fn prop_total_matches_valid_pairs(sequence in "[abcd*x]{0,60}") {
            let alphabet = Alphabet::from_chars("abcd*").unwrap();
            let symbols = chars(&sequence);
            let matrix = CountMatrix::from_sequence(&symbols, &alphabet);

            let expected = symbols
                .windows(2)
                .filter(|p| alphabet.contains(&p[0]) && alphabet.contains(&p[1]) && p[0] != '*')
                .count() as u64;
            prop_assert_eq!(matrix.total_count(), expected);
        }
    }
}
