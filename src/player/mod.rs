//! Per-track playback transport: the pitch-shift state machine

use crate::{
    domain::{
        note::Note,
        track::TrackId,
        transpose::{PitchOffset, key_for_offset},
    },
    player::media::{MediaEvent, MediaHandle},
};

pub mod error;
pub mod media;

/// User-issued commands consumed by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    /// Shift the current offset by this many semitones, saturating at ±12.
    PitchBy(i32),
    /// Declare a new original key; any applied shift is invalidated.
    SetBaseKey(Note),
}

/// Owns one track's transient playback state and drives its media handle.
///
/// Commands come in through [`TrackController::apply`]; notifications from
/// the media subsystem come in through [`TrackController::on_media_event`].
/// An "ended" event can race a user `pause()`; whichever lands last wins.
pub struct TrackController<M: MediaHandle> {
    track_id: TrackId,
    base_key: Note,
    offset: PitchOffset,
    current_key: Note,
    playing: bool,
    shut_down: bool,
    media: M,
}

impl<M: MediaHandle> TrackController<M> {
    pub fn new(track_id: TrackId, base_key: Note, media: M) -> Self {
        Self {
            track_id,
            base_key,
            offset: PitchOffset::default(),
            current_key: base_key,
            playing: false,
            shut_down: false,
            media,
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::PitchBy(delta) => self.set_pitch(delta),
            Command::SetBaseKey(key) => self.set_base_key(key),
        }
    }

    /// Requests playback start. Rejections are logged and leave the playing
    /// flag false; nothing panics and no error escapes.
    pub fn play(&mut self) {
        match self.media.request_play() {
            Ok(()) => {
                self.playing = true;
            }
            Err(err) => {
                log::warn!("track {}: {err}", self.track_id);
                self.playing = false;
            }
        }
    }

    /// Requests playback stop. Idempotent.
    pub fn pause(&mut self) {
        self.media.pause();
        self.playing = false;
    }

    /// Shifts the offset by `delta` semitones, saturating at ±12, and applies
    /// the resulting rate to the media handle with pitch preservation off.
    pub fn set_pitch(&mut self, delta: i32) {
        self.offset = self.offset.saturating_add(delta);
        self.media.set_preserves_pitch(false);
        self.media.set_playback_rate(self.offset.rate());
        self.current_key = key_for_offset(self.base_key, self.offset.semitones());
        log::debug!(
            "track {}: offset {} key {}",
            self.track_id,
            self.offset.semitones(),
            self.current_key
        );
    }

    /// Declares a new original key, resetting offset to 0 and rate to 1.
    /// The owning deck persists the key change separately.
    pub fn set_base_key(&mut self, key: Note) {
        self.base_key = key;
        self.offset = PitchOffset::default();
        self.current_key = key;
        self.media.set_playback_rate(1.0);
    }

    /// Inbound notification from the media subsystem. Ignored once the
    /// controller has been shut down, so a removed track cannot be revived by
    /// a stale event.
    pub fn on_media_event(&mut self, event: MediaEvent) {
        if self.shut_down {
            return;
        }
        match event {
            MediaEvent::Ended => {
                self.playing = false;
            }
            MediaEvent::PlayRejected(err) => {
                log::warn!("track {}: {err}", self.track_id);
                self.playing = false;
            }
        }
    }

    /// Stops playback, rewinds to the start and detaches from the media
    /// subsystem. Safe to call more than once; also runs on drop.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.media.pause();
        self.media.set_position(0.0);
        self.playing = false;
        log::debug!("track {}: controller shut down", self.track_id);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn pitch_offset(&self) -> i32 {
        self.offset.semitones()
    }

    pub fn playback_rate(&self) -> f64 {
        self.offset.rate()
    }

    pub fn base_key(&self) -> Note {
        self.base_key
    }

    /// Key currently sounding, derived from the base key and offset.
    pub fn current_key(&self) -> Note {
        self.current_key
    }

    pub fn track_id(&self) -> &TrackId {
        &self.track_id
    }
}

impl<M: MediaHandle> Drop for TrackController<M> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::player::error::PlaybackError;

    /// Records every call the controller makes to its media handle.
    #[derive(Debug, Default)]
    struct MediaLog {
        play_requests: u32,
        pause_calls: u32,
        positions: Vec<f64>,
        rates: Vec<f64>,
        preserves_pitch: Option<bool>,
    }

    #[derive(Default)]
    struct MockMedia {
        log: Rc<RefCell<MediaLog>>,
        reject_play: Option<PlaybackError>,
    }

    impl MockMedia {
        fn new() -> (Self, Rc<RefCell<MediaLog>>) {
            let log = Rc::new(RefCell::new(MediaLog::default()));
            (
                Self {
                    log: log.clone(),
                    reject_play: None,
                },
                log,
            )
        }

        fn rejecting(err: PlaybackError) -> Self {
            Self {
                log: Rc::default(),
                reject_play: Some(err),
            }
        }
    }

    impl MediaHandle for MockMedia {
        fn request_play(&mut self) -> Result<(), PlaybackError> {
            self.log.borrow_mut().play_requests += 1;
            match &self.reject_play {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }

        fn pause(&mut self) {
            self.log.borrow_mut().pause_calls += 1;
        }

        fn set_position(&mut self, seconds: f64) {
            self.log.borrow_mut().positions.push(seconds);
        }

        fn set_playback_rate(&mut self, rate: f64) {
            self.log.borrow_mut().rates.push(rate);
        }

        fn set_preserves_pitch(&mut self, enabled: bool) {
            self.log.borrow_mut().preserves_pitch = Some(enabled);
        }
    }

    fn controller(media: MockMedia) -> TrackController<MockMedia> {
        let _ = env_logger::builder().is_test(true).try_init();
        TrackController::new(TrackId::mint(1, "song.mp3"), Note::C, media)
    }

    #[test]
    fn play_sets_flag_on_accepted_request() {
        let (media, log) = MockMedia::new();
        let mut ctl = controller(media);

        ctl.apply(Command::Play);

        assert!(ctl.is_playing());
        assert_eq!(log.borrow().play_requests, 1);
    }

    #[test]
    fn rejected_play_leaves_flag_false() {
        let media = MockMedia::rejecting(PlaybackError::NotReady("no source".into()));
        let mut ctl = controller(media);

        ctl.apply(Command::Play);

        assert!(!ctl.is_playing());
    }

    #[test]
    fn pause_is_idempotent() {
        let (media, log) = MockMedia::new();
        let mut ctl = controller(media);

        ctl.apply(Command::Play);
        ctl.apply(Command::Pause);
        ctl.apply(Command::Pause);

        assert!(!ctl.is_playing());
        assert_eq!(log.borrow().pause_calls, 2);
    }

    #[test]
    fn pitch_saturates_and_updates_rate_and_key() {
        let (media, log) = MockMedia::new();
        let mut ctl = controller(media);

        ctl.apply(Command::PitchBy(5));
        assert_eq!(ctl.pitch_offset(), 5);
        assert_eq!(ctl.current_key(), Note::F);

        ctl.apply(Command::PitchBy(20));
        assert_eq!(ctl.pitch_offset(), 12);
        assert_eq!(ctl.current_key(), Note::C);
        assert_eq!(ctl.playback_rate(), 2.0);

        let log = log.borrow();
        assert_eq!(log.rates.last(), Some(&2.0));
        assert_eq!(log.preserves_pitch, Some(false));
    }

    #[test]
    fn negative_pitch_derives_key_below_base() {
        let (media, _log) = MockMedia::new();
        let mut ctl = controller(media);

        ctl.apply(Command::PitchBy(-1));

        assert_eq!(ctl.pitch_offset(), -1);
        assert_eq!(ctl.current_key(), Note::B);
    }

    #[test]
    fn set_base_key_resets_offset_and_rate() {
        let (media, log) = MockMedia::new();
        let mut ctl = controller(media);

        ctl.apply(Command::PitchBy(7));
        ctl.apply(Command::SetBaseKey(Note::G));

        assert_eq!(ctl.pitch_offset(), 0);
        assert_eq!(ctl.base_key(), Note::G);
        assert_eq!(ctl.current_key(), Note::G);
        assert_eq!(log.borrow().rates.last(), Some(&1.0));

        // next shift starts from the fresh baseline
        ctl.apply(Command::PitchBy(2));
        assert_eq!(ctl.pitch_offset(), 2);
        assert_eq!(ctl.current_key(), Note::A);
    }

    #[test]
    fn ended_event_clears_playing_flag() {
        let (media, _log) = MockMedia::new();
        let mut ctl = controller(media);

        ctl.apply(Command::Play);
        ctl.on_media_event(MediaEvent::Ended);

        assert!(!ctl.is_playing());

        // a second delivery changes nothing
        ctl.on_media_event(MediaEvent::Ended);
        assert!(!ctl.is_playing());
    }

    #[test]
    fn deferred_rejection_clears_playing_flag() {
        let (media, _log) = MockMedia::new();
        let mut ctl = controller(media);

        ctl.apply(Command::Play);
        assert!(ctl.is_playing());

        ctl.on_media_event(MediaEvent::PlayRejected(PlaybackError::Rejected(
            "autoplay blocked".into(),
        )));

        assert!(!ctl.is_playing());
    }

    #[test]
    fn shutdown_pauses_rewinds_and_detaches() {
        let (media, log) = MockMedia::new();
        let mut ctl = controller(media);

        ctl.apply(Command::Play);
        ctl.shutdown();

        assert!(!ctl.is_playing());
        {
            let log = log.borrow();
            assert_eq!(log.pause_calls, 1);
            assert_eq!(log.positions, vec![0.0]);
        }

        // events after shutdown are ignored
        ctl.on_media_event(MediaEvent::Ended);
        assert!(!ctl.is_playing());

        // second shutdown (and the one from drop) must not pause again
        ctl.shutdown();
        drop(ctl);
        assert_eq!(log.borrow().pause_calls, 1);
    }

    #[test]
    fn drop_performs_teardown() {
        let (media, log) = MockMedia::new();
        let mut ctl = controller(media);

        ctl.apply(Command::Play);
        drop(ctl);

        let log = log.borrow();
        assert_eq!(log.pause_calls, 1);
        assert_eq!(log.positions, vec![0.0]);
    }
}
