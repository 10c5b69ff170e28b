use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::catalog::CatalogClient;
use crate::config::AudioSettings;
use crate::media::{MediaBackend, MediaEvent};

use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

/// `MediaBackend` backed by a `rodio` output thread.
pub struct RodioBackend {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
    fade_out: Duration,
}

impl RodioBackend {
    /// Spawn the audio thread. Its lifecycle events arrive on the returned receiver.
    pub fn spawn(
        client: Arc<CatalogClient>,
        settings: &AudioSettings,
    ) -> (Self, Receiver<MediaEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<MediaEvent>();
        let join = spawn_audio_thread(client, rx, events_tx);

        let backend = Self {
            tx,
            join: Some(join),
            fade_out: Duration::from_millis(settings.quit_fade_out_ms),
        };
        (backend, events_rx)
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            log::debug!("audio thread is gone, dropping {:?}", e.0);
        }
    }
}

impl MediaBackend for RodioBackend {
    fn load(&mut self, uri: &str) {
        self.send(AudioCmd::Load(uri.to_string()));
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.send(AudioCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCmd::SetVolume(volume));
    }

    fn release(&mut self) {
        let Some(handle) = self.join.take() else {
            return;
        };
        self.send(AudioCmd::Quit {
            fade_out_ms: self.fade_out.as_millis() as u64,
        });
        if handle.join().is_err() {
            log::error!("audio thread panicked");
        }
    }
}
