//! Upload surface: audio payloads and the MIME filter that stands in for the
//! file picker's `audio/*` restriction

use std::path::Path;

use anyhow::Context;
use mime_guess::mime;

/// A file handed to the deck: original name plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl AudioPayload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads a payload from disk, keeping only the file name for display.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.to_string_lossy()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }
}

/// Whether the name guesses to an `audio/*` MIME type.
pub fn is_audio_name(name: &str) -> bool {
    mime_guess::from_path(name)
        .iter()
        .any(|m| m.type_() == mime::AUDIO)
}

/// Keeps only audio-typed payloads, preserving input order. No validation
/// deeper than the MIME guess is attempted.
pub fn filter_audio(payloads: Vec<AudioPayload>) -> Vec<AudioPayload> {
    payloads
        .into_iter()
        .filter(|p| is_audio_name(&p.name))
        .collect()
}
