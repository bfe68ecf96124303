//! Pure pitch-shift arithmetic: semitone offsets to playback rates and keys

use crate::domain::note::Note;

/// Largest semitone shift the transport accepts in either direction.
pub const MAX_PITCH_OFFSET: i32 = 12;

/// Playback-rate multiplier for a semitone offset: `2^(offset/12)`.
///
/// Defined for any integer; callers are responsible for clamping.
pub fn rate_for_pitch(offset: i32) -> f64 {
    2f64.powf(f64::from(offset) / 12.0)
}

/// Key reached by shifting `base` by `offset` semitones on the chromatic cycle.
///
/// Uses true modulo, so negative offsets and offsets beyond ±12 land on a
/// valid note.
pub fn key_for_offset(base: Note, offset: i32) -> Note {
    // widened so offsets near i32::MAX cannot overflow the sum
    let index = (base.index() as i64 + i64::from(offset)).rem_euclid(12);
    Note::from_index(index as usize)
}

/// A semitone offset saturating at ±[`MAX_PITCH_OFFSET`].
///
/// Deltas pushing past the boundary are silently dropped, not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PitchOffset(i32);

impl PitchOffset {
    pub fn semitones(self) -> i32 {
        self.0
    }

    pub fn saturating_add(self, delta: i32) -> Self {
        Self(
            self.0
                .saturating_add(delta)
                .clamp(-MAX_PITCH_OFFSET, MAX_PITCH_OFFSET),
        )
    }

    pub fn rate(self) -> f64 {
        rate_for_pitch(self.0)
    }
}
