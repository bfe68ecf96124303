use thiserror::Error;

/// Playback start/stop rejected by the media subsystem.
///
/// These are logged where the request is made and never escape to terminate
/// the process; there is no retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("media source is not ready: {0}")]
    NotReady(String),

    #[error("playback request rejected: {0}")]
    Rejected(String),
}
