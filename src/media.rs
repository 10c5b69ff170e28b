//! The media playback primitive driven by the session.
//!
//! Commands go in through `MediaBackend`; outcomes come back later as
//! `MediaEvent`s, which the event loop feeds into the session.

use std::time::Duration;

/// Lifecycle signals emitted by a media backend.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// A new resource started loading.
    LoadStart,
    /// The resource is decoded and can play. Duration is `None` when unknown.
    Ready { duration: Option<Duration> },
    /// Playback started.
    Play,
    /// Playback paused.
    Pause,
    /// The resource played to its end.
    Ended,
    /// Periodic position report while playing, and after seeks.
    TimeUpdate { position: Duration },
    /// A `play` request was refused.
    PlayRejected(String),
    /// Loading or decoding failed.
    Error(String),
}

/// Commands accepted by a media backend. None of them block on playback.
pub trait MediaBackend {
    /// Point the backend at a new resource, dropping the current one.
    fn load(&mut self, uri: &str);
    /// Request playback; answered by `Play` or `PlayRejected`.
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    /// Live output volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
    /// Stop playback and free the output. Later commands are ignored.
    fn release(&mut self);
}
