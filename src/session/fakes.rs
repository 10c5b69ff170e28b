//! Recording fakes for the session seams, shared by unit tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{PlayerSession, PlaylistEntry, SessionOptions};
use crate::catalog::{CatalogReply, SongId, Track, TrackSource};
use crate::media::MediaBackend;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Load(String),
    Play,
    Pause,
    Seek(Duration),
    Volume(f32),
    Release,
}

#[derive(Clone, Default)]
pub(crate) struct FakeMedia {
    pub(crate) calls: Rc<RefCell<Vec<Call>>>,
}

impl FakeMedia {
    pub(crate) fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }
}

impl MediaBackend for FakeMedia {
    fn load(&mut self, uri: &str) {
        self.calls.borrow_mut().push(Call::Load(uri.to_string()));
    }
    fn play(&mut self) {
        self.calls.borrow_mut().push(Call::Play);
    }
    fn pause(&mut self) {
        self.calls.borrow_mut().push(Call::Pause);
    }
    fn seek(&mut self, position: Duration) {
        self.calls.borrow_mut().push(Call::Seek(position));
    }
    fn set_volume(&mut self, volume: f32) {
        self.calls.borrow_mut().push(Call::Volume(volume));
    }
    fn release(&mut self) {
        self.calls.borrow_mut().push(Call::Release);
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeSource {
    pub(crate) requests: Rc<RefCell<Vec<(SongId, u64)>>>,
    pub(crate) recorded: Rc<RefCell<Vec<SongId>>>,
}

impl FakeSource {
    pub(crate) fn last_request(&self) -> (SongId, u64) {
        *self.requests.borrow().last().expect("no request issued")
    }
}

impl TrackSource for FakeSource {
    fn request_track(&self, id: SongId, generation: u64) {
        self.requests.borrow_mut().push((id, generation));
    }
    fn record_playback(&self, id: SongId) {
        self.recorded.borrow_mut().push(id);
    }
}

pub(crate) type Session = PlayerSession<FakeMedia, FakeSource>;

pub(crate) fn track(id: SongId) -> Track {
    Track {
        id,
        title: format!("Title {id}"),
        artist: format!("Artist {id}"),
        album: None,
        cover: None,
        audio_uri: format!("http://host/audio/{id}.mp3"),
        duration_label: None,
    }
}

pub(crate) fn session_with(options: SessionOptions) -> (Session, FakeMedia, FakeSource) {
    let media = FakeMedia::default();
    let source = FakeSource::default();
    let session = PlayerSession::new(media.clone(), source.clone(), options)
        .with_rng(StdRng::seed_from_u64(7));
    media.take();
    (session, media, source)
}

pub(crate) fn session() -> (Session, FakeMedia, FakeSource) {
    session_with(SessionOptions::default())
}

/// Answer the most recent catalog request successfully.
pub(crate) fn fulfil(session: &mut Session, source: &FakeSource) {
    let (id, generation) = source.last_request();
    session.on_track_loaded(CatalogReply {
        generation,
        id,
        result: Ok(track(id)),
    });
}

pub(crate) fn entries(ids: &[SongId]) -> Vec<PlaylistEntry> {
    ids.iter().copied().map(PlaylistEntry::new).collect()
}
