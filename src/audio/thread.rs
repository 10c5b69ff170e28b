use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::catalog::CatalogClient;
use crate::media::MediaEvent;

use super::clock::PlayClock;
use super::source::{MediaBytes, create_sink_at, fetch, probe};
use super::types::AudioCmd;

/// How often position updates are emitted and end-of-track is checked.
const TICK: Duration = Duration::from_millis(200);

/// State owned by the audio thread.
struct Output {
    stream: Option<OutputStream>,
    events: Sender<MediaEvent>,
    media: Option<MediaBytes>,
    duration: Option<Duration>,
    sink: Option<Sink>,
    clock: PlayClock,
    volume: f32,
}

impl Output {
    fn emit(&self, event: MediaEvent) {
        // Nobody listens once the event loop has exited.
        let _ = self.events.send(event);
    }

    fn stop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    /// Fetch and probe `uri`. Nothing is reported when `superseded` says a
    /// newer load is already queued.
    fn load(&mut self, client: &CatalogClient, uri: &str, superseded: impl FnOnce() -> bool) {
        let was_playing = self.clock.running();
        self.stop_sink();
        self.clock.clear();
        self.media = None;
        self.duration = None;
        if was_playing {
            self.emit(MediaEvent::Pause);
        }

        self.emit(MediaEvent::LoadStart);
        let loaded = fetch(client, uri).and_then(|bytes| probe(&bytes).map(|d| (bytes, d)));
        if superseded() {
            log::debug!("dropping superseded load of {uri}");
            return;
        }
        match loaded {
            Ok((bytes, duration)) => {
                log::info!("loaded {uri} ({} bytes)", bytes.len());
                self.media = Some(bytes);
                self.duration = duration;
                self.emit(MediaEvent::Ready { duration });
                self.emit(MediaEvent::TimeUpdate {
                    position: Duration::ZERO,
                });
            }
            Err(e) => {
                log::warn!("failed to load {uri}: {e}");
                self.emit(MediaEvent::Error(e));
            }
        }
    }

    fn play(&mut self) {
        let Some(stream) = self.stream.as_ref() else {
            self.emit(MediaEvent::PlayRejected("no audio output device".into()));
            return;
        };
        let Some(bytes) = self.media.as_ref() else {
            self.emit(MediaEvent::PlayRejected("no media loaded".into()));
            return;
        };

        let now = Instant::now();
        if self.sink.is_none() {
            match create_sink_at(stream, bytes, self.clock.elapsed(now), self.volume) {
                Ok(s) => self.sink = Some(s),
                Err(e) => {
                    self.emit(MediaEvent::Error(e));
                    return;
                }
            }
        }
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
        self.clock.start(now);
        self.emit(MediaEvent::Play);
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        if self.clock.running() {
            self.clock.pause(Instant::now());
            self.emit(MediaEvent::Pause);
        }
    }

    /// Scrubbing: rebuild the current sink and skip into the media.
    fn seek(&mut self, position: Duration) {
        if self.media.is_none() {
            return;
        }
        let target = self.duration.map_or(position, |d| position.min(d));
        let now = Instant::now();
        self.clock.reset(target, now);

        if self.sink.is_some() {
            self.stop_sink();
            if let (Some(stream), Some(bytes)) = (self.stream.as_ref(), self.media.as_ref()) {
                match create_sink_at(stream, bytes, target, self.volume) {
                    Ok(s) => {
                        if self.clock.running() {
                            s.play();
                        }
                        self.sink = Some(s);
                    }
                    Err(e) => self.emit(MediaEvent::Error(e)),
                }
            }
        }
        self.emit(MediaEvent::TimeUpdate { position: target });
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(volume);
        }
    }

    /// Periodic check for end-of-track plus a position report.
    fn tick(&mut self) {
        if !self.clock.running() {
            return;
        }
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if s.empty() {
            self.stop_sink();
            self.clock.clear();
            self.emit(MediaEvent::Ended);
        } else {
            self.emit(MediaEvent::TimeUpdate {
                position: self.clock.elapsed(Instant::now()),
            });
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(s) = self.sink.as_ref() {
            // Fade out gently before stopping.
            fade_out_sink(s, self.volume, fade_out_ms);
        }
        self.stop_sink();
    }
}

/// Move queued commands into `backlog`. When a `Load` is among them, drop the
/// playback commands queued before the newest one and return `true`.
pub(super) fn skip_to_newest_load(rx: &Receiver<AudioCmd>, backlog: &mut VecDeque<AudioCmd>) -> bool {
    backlog.extend(rx.try_iter());
    let Some(newest) = backlog
        .iter()
        .rposition(|c| matches!(c, AudioCmd::Load(_)))
    else {
        return false;
    };
    let mut index = 0;
    backlog.retain(|c| {
        let keep = index >= newest || matches!(c, AudioCmd::SetVolume(_) | AudioCmd::Quit { .. });
        index += 1;
        keep
    });
    true
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 || sink.is_paused() {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    client: Arc<CatalogClient>,
    rx: Receiver<AudioCmd>,
    events: Sender<MediaEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                log::error!("no audio output device: {e}");
                None
            }
        };

        let mut output = Output {
            stream,
            events,
            media: None,
            duration: None,
            sink: None,
            clock: PlayClock::default(),
            volume: 1.0,
        };

        let mut backlog: VecDeque<AudioCmd> = VecDeque::new();
        loop {
            let next = match backlog.pop_front() {
                Some(cmd) => Ok(cmd),
                None => rx.recv_timeout(TICK),
            };
            match next {
                Ok(cmd) => match cmd {
                    AudioCmd::Load(uri) => {
                        output.load(&client, &uri, || skip_to_newest_load(&rx, &mut backlog))
                    }
                    AudioCmd::Play => output.play(),
                    AudioCmd::Pause => output.pause(),
                    AudioCmd::Seek(position) => output.seek(position),
                    AudioCmd::SetVolume(v) => output.set_volume(v),
                    AudioCmd::Quit { fade_out_ms } => {
                        output.quit(fade_out_ms);
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => output.tick(),
                Err(RecvTimeoutError::Disconnected) => {
                    output.stop_sink();
                    break;
                }
            }
        }
        log::debug!("audio thread finished");
    })
}
