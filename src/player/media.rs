//! Seam to the external media subsystem
//!
//! The controller treats playback as an opaque service. Requests may succeed
//! or fail immediately, and rejections can also arrive later as events; the
//! caller must not assume immediate effect.

use crate::player::error::PlaybackError;

/// Playable-media collaborator (an `<audio>` element in the original
/// environment).
pub trait MediaHandle {
    /// Asks the subsystem to start playback. `Ok` means the request was
    /// accepted, not that audio is guaranteed to keep playing; a deferred
    /// [`MediaEvent::PlayRejected`] can still follow.
    fn request_play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn set_position(&mut self, seconds: f64);

    fn set_playback_rate(&mut self, rate: f64);

    /// Pitch preservation is deliberately forced off: rate changes are
    /// coupled to speed by design.
    fn set_preserves_pitch(&mut self, enabled: bool);
}

/// Asynchronous notifications from the media subsystem, delivered by the host
/// event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// A previously accepted play request was vetoed after the fact.
    PlayRejected(PlaybackError),
    /// Natural end of media.
    Ended,
}
