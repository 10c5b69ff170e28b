//! `PlayerSession`: the playback state machine.
//!
//! All methods run on the event-loop thread. Network and audio work is
//! delegated through `TrackSource` and `MediaBackend`; their results come
//! back through `on_track_loaded` and `handle_media_event`.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{CatalogReply, SongId, Track, TrackSource};
use crate::config::Settings;
use crate::error::PlayerError;
use crate::media::{MediaBackend, MediaEvent};

use super::notify::Notifications;
use super::playlist::{Playlist, PlaylistEntry};
use super::state::{Phase, VolumeIcon, VolumeState};

/// Initial flags and tunables for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub shuffle: bool,
    pub repeat: bool,
    pub volume: f32,
    pub autoplay: bool,
    /// Past this position, "previous" restarts the current track.
    pub restart_threshold: Duration,
    pub notification_lifetime: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat: false,
            volume: 0.8,
            autoplay: true,
            restart_threshold: Duration::from_secs(3),
            notification_lifetime: Duration::from_secs(5),
        }
    }
}

impl SessionOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            shuffle: settings.playback.shuffle,
            repeat: settings.playback.repeat,
            volume: settings.playback.volume,
            autoplay: settings.playback.autoplay,
            restart_threshold: Duration::from_millis(settings.playback.restart_threshold_ms),
            notification_lifetime: Duration::from_millis(settings.ui.notification_ms),
        }
    }
}

/// An in-flight metadata request.
#[derive(Debug, Clone, Copy)]
struct PendingLoad {
    generation: u64,
    id: SongId,
    /// Start playing once the track is loaded.
    resume: bool,
    /// Phase to return to if the request fails.
    prior: Phase,
}

pub struct PlayerSession<M: MediaBackend, S: TrackSource> {
    media: M,
    source: S,
    autoplay: bool,
    restart_threshold: Duration,

    current: Option<Track>,
    playlist: Playlist,
    phase: Phase,
    is_playing: bool,
    shuffle: bool,
    repeat: bool,
    volume: VolumeState,

    buffering: bool,
    position: Duration,
    duration: Option<Duration>,

    generation: u64,
    pending: Option<PendingLoad>,
    notifications: Notifications,
    rng: StdRng,
    closed: bool,
}

impl<M: MediaBackend, S: TrackSource> PlayerSession<M, S> {
    pub fn new(mut media: M, source: S, options: SessionOptions) -> Self {
        let volume = VolumeState::new(options.volume);
        media.set_volume(volume.live());

        Self {
            media,
            source,
            autoplay: options.autoplay,
            restart_threshold: options.restart_threshold,

            current: None,
            playlist: Playlist::default(),
            phase: Phase::Idle,
            is_playing: false,
            shuffle: options.shuffle,
            repeat: options.repeat,
            volume,

            buffering: false,
            position: Duration::ZERO,
            duration: None,

            generation: 0,
            pending: None,
            notifications: Notifications::new(options.notification_lifetime),
            rng: StdRng::from_entropy(),
            closed: false,
        }
    }

    /// Replace the random source used for shuffle picks.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    /// Last explicit volume, independent of mute.
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn live_volume(&self) -> f32 {
        self.volume.live()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.muted()
    }

    pub fn volume_icon(&self) -> VolumeIcon {
        self.volume.icon()
    }

    /// True while metadata is being fetched or the media is buffering.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some() || self.buffering
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// `"<title> - <artist>"` of the current track.
    pub fn window_title(&self) -> Option<String> {
        self.current.as_ref().map(Track::window_title)
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Fetch `id` from the catalog and make it the current track once it arrives.
    pub fn load_track(&mut self, id: SongId) {
        let resume = self.autoplay && self.is_playing;
        self.start_load(id, resume);
    }

    /// Replace the playlist and load the entry at `start`. No-op when `entries` is empty.
    pub fn load_playlist(&mut self, entries: Vec<PlaylistEntry>, start: usize) {
        if entries.is_empty() {
            return;
        }
        self.playlist.replace(entries, start);
        if let Some(id) = self.playlist.current().map(|e| e.id) {
            self.load_track(id);
        }
    }

    /// Start playback as soon as the in-flight load completes, or now if nothing is loading.
    pub fn play_when_ready(&mut self) {
        match self.pending.as_mut() {
            Some(p) => p.resume = true,
            None => self.play(),
        }
    }

    fn start_load(&mut self, id: SongId, resume: bool) {
        if self.closed {
            return;
        }
        self.generation += 1;
        let prior = self.settled_phase();
        self.pending = Some(PendingLoad {
            generation: self.generation,
            id,
            resume,
            prior,
        });
        self.phase = Phase::Loading;
        log::debug!("requesting song {id} (generation {})", self.generation);
        self.source.request_track(id, self.generation);
    }

    /// Apply a catalog reply. Replies from superseded requests are dropped.
    pub fn on_track_loaded(&mut self, reply: CatalogReply) {
        let Some(pending) = self
            .pending
            .take_if(|p| p.generation == reply.generation)
        else {
            log::debug!(
                "discarding stale reply for song {} (generation {}, latest {})",
                reply.id,
                reply.generation,
                self.generation
            );
            return;
        };

        match reply.result {
            Ok(track) => {
                log::info!("loaded song {}: {}", track.id, track.window_title());
                self.media.load(&track.audio_uri);
                self.is_playing = false;
                self.position = Duration::ZERO;
                self.duration = None;
                self.phase = Phase::Ready;
                self.source.record_playback(pending.id);
                self.playlist.set_title(track.id, &track.title);
                self.current = Some(track);
                if pending.resume {
                    self.play();
                }
            }
            Err(e) => {
                self.phase = pending.prior;
                self.report(e);
            }
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Ask the backend to play. Confirmed later by a `Play` or `PlayRejected` event.
    pub fn play(&mut self) {
        if self.closed || self.current.is_none() {
            return;
        }
        self.media.play();
    }

    pub fn pause(&mut self) {
        self.media.pause();
        self.is_playing = false;
        if self.settled_phase() == Phase::Playing {
            self.settle(Phase::Paused);
        }
    }

    pub fn stop(&mut self) {
        self.media.pause();
        self.media.seek(Duration::ZERO);
        self.position = Duration::ZERO;
        self.is_playing = false;
        if self.current.is_some() {
            self.settle(Phase::Ready);
        }
    }

    pub fn play_next(&mut self) {
        let resume = self.autoplay && self.is_playing;
        self.advance(resume);
    }

    fn advance(&mut self, resume: bool) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        let id = if self.shuffle {
            let index = self.rng.gen_range(0..len);
            self.playlist.select(index)
        } else {
            self.playlist.step_forward()
        };
        if let Some(id) = id {
            self.start_load(id, resume);
        }
    }

    /// Restart the current track when past the threshold, otherwise go back one entry.
    pub fn play_previous(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        if self.position > self.restart_threshold {
            self.media.seek(Duration::ZERO);
            self.position = Duration::ZERO;
            return;
        }
        let resume = self.autoplay && self.is_playing;
        if let Some(id) = self.playlist.step_back() {
            self.start_load(id, resume);
        }
    }

    pub fn set_volume(&mut self, v: f32) {
        self.volume.set(v);
        self.media.set_volume(self.volume.live());
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.media.set_volume(self.volume.live());
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
    }

    /// Seek to `fraction` of the known duration. No-op until the duration is known.
    pub fn seek_to(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let Some(duration) = self.duration.filter(|d| !d.is_zero()) else {
            return;
        };
        let target = duration.mul_f64(fraction.clamp(0.0, 1.0));
        self.media.seek(target);
        self.position = target;
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadStart => self.buffering = true,
            MediaEvent::Ready { duration } => {
                self.buffering = false;
                self.duration = duration;
            }
            MediaEvent::Play => {
                self.is_playing = true;
                self.settle(Phase::Playing);
            }
            MediaEvent::Pause => {
                self.is_playing = false;
                if self.settled_phase() == Phase::Playing {
                    self.settle(Phase::Paused);
                }
            }
            MediaEvent::TimeUpdate { position } => self.position = position,
            MediaEvent::Ended => {
                self.is_playing = false;
                self.settle(Phase::Ended);
                if self.repeat {
                    self.media.seek(Duration::ZERO);
                    self.position = Duration::ZERO;
                    self.play();
                } else if let Some(p) = self.pending.as_mut() {
                    // The requested track is already on its way and becomes the next one.
                    p.resume |= self.autoplay;
                } else {
                    self.advance(self.autoplay);
                }
            }
            MediaEvent::PlayRejected(reason) => {
                self.is_playing = false;
                self.report(PlayerError::PlaybackRejected(reason));
            }
            MediaEvent::Error(reason) => {
                self.buffering = false;
                self.is_playing = false;
                let phase = if self.current.is_some() {
                    Phase::Ready
                } else {
                    Phase::Idle
                };
                self.settle(phase);
                self.report(PlayerError::Decode(reason));
            }
        }
    }

    /// Drop notifications that have outlived their lifetime.
    pub fn prune_notifications(&mut self, now: Instant) {
        self.notifications.prune(now);
    }

    /// Stop playback and release the media backend. Safe to call twice.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.pending = None;
        self.is_playing = false;
        self.media.pause();
        self.media.release();
    }

    fn report(&mut self, error: PlayerError) {
        log::warn!("{error}");
        self.notifications.push(error);
    }

    /// Phase the session is in, or will return to, once any load settles.
    fn settled_phase(&self) -> Phase {
        self.pending.map_or(self.phase, |p| p.prior)
    }

    fn settle(&mut self, phase: Phase) {
        match self.pending.as_mut() {
            Some(p) => p.prior = phase,
            None => self.phase = phase,
        }
    }
}

impl<M: MediaBackend, S: TrackSource> Drop for PlayerSession<M, S> {
    fn drop(&mut self) {
        self.close();
    }
}
