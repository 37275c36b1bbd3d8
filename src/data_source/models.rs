//! Core data models for per-bird syllable records

use crate::Result;
use crate::sequence::{Alphabet, SymbolCategory};
use serde::{Deserialize, Serialize};

/// Annotated syllables of one bird
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirdRecord {
    /// Bird identifier
    pub id: String,

    /// Introductory notes, one character per syllable type
    #[serde(default)]
    pub intro_notes: String,

    /// Song notes (motif syllables)
    pub song_notes: String,

    /// Calls
    #[serde(default)]
    pub calls: String,

    /// Recorded syllable sequence, bouts separated by the stop symbol
    #[serde(default)]
    pub sequence: String,
}

impl BirdRecord {
    /// Intro notes, song notes and calls followed by the stop symbol
    pub fn note_sequence(&self, stop_symbol: char) -> String {
        let mut notes = String::with_capacity(
            self.intro_notes.len() + self.song_notes.len() + self.calls.len() + 1,
        );
        notes.push_str(&self.intro_notes);
        notes.push_str(&self.song_notes);
        notes.push_str(&self.calls);
        notes.push(stop_symbol);
        notes
    }

    /// Alphabet of this bird, terminal state last
    pub fn alphabet(&self, stop_symbol: char) -> Result<Alphabet<char>> {
        Alphabet::with_terminal(self.note_sequence(stop_symbol).chars(), &stop_symbol)
    }

    /// Category of a syllable; song notes take precedence over intro notes and calls
    pub fn category_of(&self, symbol: char) -> SymbolCategory {
        if self.song_notes.contains(symbol) {
            SymbolCategory::SongNote
        } else if self.intro_notes.contains(symbol) {
            SymbolCategory::Intro
        } else if self.calls.contains(symbol) {
            SymbolCategory::Call
        } else {
            SymbolCategory::Intro
        }
    }

    pub fn syllables(&self) -> Vec<char> {
        self.sequence.chars().collect()
    }

    /// Bouts of the recorded sequence, split on the stop symbol
    pub fn bouts(&self, stop_symbol: char) -> impl Iterator<Item = &str> {
        self.sequence
            .split(stop_symbol)
            .filter(|bout| !bout.is_empty())
    }
}

/// On-disk layout of a records file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordsFile {
    #[serde(default, rename = "bird")]
    pub birds: Vec<BirdRecord>,
}
