use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The 12 chromatic note names, in cyclic order starting at C.
///
/// Serialized as the plain note name ("C", "C#", ...), matching the
/// persisted metadata layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    #[serde(rename = "C#")]
    CSharp,
    D,
    #[serde(rename = "D#")]
    DSharp,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
    #[serde(rename = "G#")]
    GSharp,
    A,
    #[serde(rename = "A#")]
    ASharp,
    B,
}

pub const NOTES: [Note; 12] = [
    Note::C,
    Note::CSharp,
    Note::D,
    Note::DSharp,
    Note::E,
    Note::F,
    Note::FSharp,
    Note::G,
    Note::GSharp,
    Note::A,
    Note::ASharp,
    Note::B,
];

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

impl Note {
    /// Position in the chromatic cycle, 0..12.
    pub fn index(self) -> usize {
        NOTES.iter().position(|n| *n == self).unwrap_or(0)
    }

    /// Note at the given cyclic position. Indices wrap modulo 12.
    pub fn from_index(index: usize) -> Self {
        NOTES[index % 12]
    }

    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }
}

impl Default for Note {
    fn default() -> Self {
        Note::C
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{0}' is not a chromatic note name")]
pub struct ParseNoteError(String);

impl FromStr for Note {
    type Err = ParseNoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .position(|name| *name == s)
            .map(Note::from_index)
            .ok_or_else(|| ParseNoteError(s.to_string()))
    }
}
