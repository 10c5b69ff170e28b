use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::error::Result;

use super::TrackSource;
use super::client::{CatalogClient, now_millis};
use super::model::{SongId, Track};

/// Result of a metadata request, tagged with the generation that issued it.
#[derive(Debug)]
pub struct CatalogReply {
    pub generation: u64,
    pub id: SongId,
    pub result: Result<Track>,
}

/// Runs catalog requests on short-lived threads and posts the results back
/// over a channel drained by the event loop.
pub struct CatalogWorker {
    client: Arc<CatalogClient>,
    tx: Sender<CatalogReply>,
}

impl CatalogWorker {
    pub fn new(client: CatalogClient) -> (Self, Receiver<CatalogReply>) {
        let (tx, rx) = mpsc::channel::<CatalogReply>();
        let worker = Self {
            client: Arc::new(client),
            tx,
        };
        (worker, rx)
    }

    pub fn client(&self) -> Arc<CatalogClient> {
        self.client.clone()
    }
}

impl TrackSource for CatalogWorker {
    fn request_track(&self, id: SongId, generation: u64) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = client.fetch_track(id);
            // The receiver is gone once the event loop has exited.
            let _ = tx.send(CatalogReply {
                generation,
                id,
                result,
            });
        });
    }

    fn record_playback(&self, id: SongId) {
        let client = self.client.clone();
        let timestamp_ms = now_millis();
        thread::spawn(move || {
            if let Err(e) = client.record_playback(id, timestamp_ms) {
                log::warn!("failed to record playback of song {id}: {e}");
            }
        });
    }
}
