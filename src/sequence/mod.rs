//! Sequence module - Alphabets, symbol metadata and sequence helpers

pub mod alphabet;
pub mod colors;

// Re-export key types
pub use alphabet::{Alphabet, AlphabetEntry, SymbolKind, validate_symbols};
pub use colors::{SymbolCategory, SyllableColors};

/// Number of song notes that occur anywhere in a bout.
///
/// Each entry of `song_notes` counts once if the bout contains it, so a
/// repeated song note is counted per repetition in `song_notes`.
pub fn count_song_notes_in_bout(song_notes: &str, bout: &str) -> usize {
    song_notes.chars().filter(|note| bout.contains(*note)).count()
}
