//! Alphabet representation
//!
//! An alphabet is the ordered set of states a sequence is scored against.
//! Position is the canonical state id. The last entry is always the
//! terminal (stop) state: it may be reached but never left.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Role of a symbol in the transition model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Normal,
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphabetEntry<S> {
    pub symbol: S,
    pub kind: SymbolKind,
}

/// Ordered alphabet with a terminal last entry and a first-index lookup table
#[derive(Debug, Clone)]
pub struct Alphabet<S = char> {
    entries: Vec<AlphabetEntry<S>>,

    /// Symbol to index. Duplicated symbols resolve to their first position.
    index: HashMap<S, usize>,
}

impl<S> Alphabet<S>
where
    S: Eq + Hash + Clone,
{
    /// Build an alphabet whose last symbol is the terminal state.
    pub fn new(symbols: impl IntoIterator<Item = S>) -> Result<Self> {
        let symbols: Vec<S> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(Error::EmptyAlphabet);
        }

        let last = symbols.len() - 1;
        let mut index = HashMap::with_capacity(symbols.len());
        let entries = symbols
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| {
                index.entry(symbol.clone()).or_insert(i);
                let kind = if i == last {
                    SymbolKind::Terminal
                } else {
                    SymbolKind::Normal
                };
                AlphabetEntry { symbol, kind }
            })
            .collect();

        Ok(Self { entries, index })
    }

    /// Build an alphabet and check that `terminal` resolves to the last position.
    ///
    /// Fails when the terminal symbol is missing, sits elsewhere, or also
    /// appears earlier (which would make lookups resolve to a non-terminal
    /// index).
    pub fn with_terminal(symbols: impl IntoIterator<Item = S>, terminal: &S) -> Result<Self>
    where
        S: fmt::Display,
    {
        let alphabet = Self::new(symbols)?;
        match alphabet.index_of(terminal) {
            Some(index) if index == alphabet.terminal_index() => Ok(alphabet),
            Some(index) => Err(Error::TerminalNotLast {
                symbol: terminal.to_string(),
                index,
            }),
            None => Err(Error::TerminalMissing(terminal.to_string())),
        }
    }

    /// First index of `symbol`, if it belongs to the alphabet
    pub fn index_of(&self, symbol: &S) -> Option<usize> {
        self.index.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.index.contains_key(symbol)
    }

    /// Symbols that occur more than once, in order of their second occurrence
    pub fn duplicates(&self) -> Vec<S> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, entry)| self.index.get(&entry.symbol) != Some(i))
            .map(|(_, entry)| entry.symbol.clone())
            .collect()
    }
}

impl<S> Alphabet<S> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: construction rejects empty alphabets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn terminal_index(&self) -> usize {
        self.entries.len() - 1
    }

    /// Number of states that may act as a transition source
    pub fn non_terminal_len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == SymbolKind::Normal)
            .count()
    }

    pub fn is_terminal(&self, index: usize) -> bool {
        self.entries
            .get(index)
            .is_some_and(|e| e.kind == SymbolKind::Terminal)
    }

    pub fn symbol(&self, index: usize) -> Option<&S> {
        self.entries.get(index).map(|e| &e.symbol)
    }

    pub fn entries(&self) -> &[AlphabetEntry<S>] {
        &self.entries
    }

    pub fn symbols(&self) -> impl Iterator<Item = &S> {
        self.entries.iter().map(|e| &e.symbol)
    }
}

impl Alphabet<char> {
    /// One state per character, last character terminal
    pub fn from_chars(symbols: &str) -> Result<Self> {
        Self::new(symbols.chars())
    }
}

/// Check raw alphabet symbols before building an [`Alphabet`].
///
/// Empty input is rejected. Duplicates are accepted (first index wins) and
/// returned so callers can report them.
pub fn validate_symbols<S>(symbols: &[S]) -> Result<Vec<S>>
where
    S: Eq + Hash + Clone + fmt::Debug,
{
    let alphabet = Alphabet::new(symbols.iter().cloned())?;
    let duplicates = alphabet.duplicates();
    if !duplicates.is_empty() {
        tracing::warn!(
            "Alphabet contains duplicate symbols {:?}; lookups use the first occurrence",
            duplicates
        );
    }
    Ok(duplicates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_symbol_is_terminal() {
        let alphabet = Alphabet::from_chars("abc*").unwrap();
        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.terminal_index(), 3);
        assert_eq!(alphabet.non_terminal_len(), 3);
        assert!(alphabet.is_terminal(3));
        assert!(!alphabet.is_terminal(0));
        assert_eq!(alphabet.entries()[3].kind, SymbolKind::Terminal);
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        assert!(matches!(Alphabet::<char>::new([]), Err(Error::EmptyAlphabet)));
        assert!(matches!(
            validate_symbols::<char>(&[]),
            Err(Error::EmptyAlphabet)
        ));
    }

    #[test]
    fn test_first_index_wins_on_duplicates() {
        let alphabet = Alphabet::from_chars("abab*").unwrap();
        assert_eq!(alphabet.index_of(&'a'), Some(0));
        assert_eq!(alphabet.index_of(&'b'), Some(1));
        assert_eq!(alphabet.index_of(&'z'), None);
        assert_eq!(alphabet.duplicates(), vec!['a', 'b']);
    }

    #[test]
    fn test_with_terminal_checks_position() {
        let ok = Alphabet::with_terminal("ab*".chars(), &'*');
        assert!(ok.is_ok());

        let misplaced = Alphabet::with_terminal("a*b".chars(), &'*');
        assert!(matches!(
            misplaced,
            Err(Error::TerminalNotLast { index: 1, .. })
        ));

        // Stop symbol repeated earlier would resolve to a non-terminal index
        let shadowed = Alphabet::with_terminal("*a*".chars(), &'*');
        assert!(matches!(shadowed, Err(Error::TerminalNotLast { index: 0, .. })));

        let missing = Alphabet::with_terminal("ab".chars(), &'*').unwrap_err();
        assert!(matches!(&missing, Error::TerminalMissing(symbol) if symbol == "*"));
        assert_eq!(
            missing.to_string(),
            "Terminal symbol * is missing from the alphabet"
        );
    }

    #[test]
    fn test_token_alphabet() {
        let alphabet = Alphabet::new(["intro", "A", "B", "stop"]).unwrap();
        assert_eq!(alphabet.index_of(&"B"), Some(2));
        assert_eq!(alphabet.symbol(3), Some(&"stop"));
    }

    #[test]
    fn test_validate_reports_duplicates() {
        let duplicates = validate_symbols(&['a', 'b', 'a', '*']).unwrap();
        assert_eq!(duplicates, vec!['a']);
    }
}
