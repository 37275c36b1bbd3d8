//! Symbol to display colour mapping

use super::Alphabet;
use crate::config::ColorConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

const FALLBACK_COLOR: &str = "gray";

/// Behavioural category of a syllable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolCategory {
    Intro,
    SongNote,
    Call,
    Stop,
}

impl SymbolCategory {
    pub fn name(&self) -> &'static str {
        match self {
            SymbolCategory::Intro => "intro",
            SymbolCategory::SongNote => "song note",
            SymbolCategory::Call => "call",
            SymbolCategory::Stop => "stop",
        }
    }
}

/// One colour per alphabet index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyllableColors {
    colors: Vec<String>,
}

impl SyllableColors {
    /// Assign colours in alphabet order, drawing from the palette of each
    /// symbol's category. The terminal state always gets the stop colour.
    pub fn from_categories<S, F>(alphabet: &Alphabet<S>, palette: &ColorConfig, category_of: F) -> Self
    where
        S: Eq + Hash + Clone + fmt::Display,
        F: Fn(&S) -> SymbolCategory,
    {
        let mut intro = palette.intro.iter();
        let mut song = palette.song_note.iter();
        let mut call = palette.call.iter();

        let colors = alphabet
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let category = if alphabet.is_terminal(index) {
                    SymbolCategory::Stop
                } else {
                    category_of(&entry.symbol)
                };
                let next = match category {
                    SymbolCategory::Stop => return palette.stop.clone(),
                    SymbolCategory::SongNote => song.next(),
                    SymbolCategory::Call => call.next(),
                    SymbolCategory::Intro => intro.next(),
                };
                next.cloned().unwrap_or_else(|| {
                    tracing::warn!(
                        "Palette for {} exhausted at symbol {}, using {}",
                        category.name(),
                        entry.symbol,
                        FALLBACK_COLOR
                    );
                    FALLBACK_COLOR.to_string()
                })
            })
            .collect();

        Self { colors }
    }

    /// Colours for an alphabet without category metadata
    pub fn for_alphabet<S>(alphabet: &Alphabet<S>, palette: &ColorConfig) -> Self
    where
        S: Eq + Hash + Clone + fmt::Display,
    {
        Self::from_categories(alphabet, palette, |_| SymbolCategory::Intro)
    }

    pub fn get(&self, index: usize) -> &str {
        self.colors
            .get(index)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }
}
