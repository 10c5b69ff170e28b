use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::blocking::Client;

use crate::config::ServerSettings;
use crate::error::{PlayerError, Result};

use super::model::{PlaybackEvent, SongId, SongPayload, Track};

const CSRF_HEADER: &str = "X-CSRFToken";

/// Blocking HTTP client for the catalog server.
///
/// All calls block the calling thread; the runtime only uses it from
/// worker threads.
pub struct CatalogClient {
    http: Client,
    server: ServerSettings,
}

impl CatalogClient {
    pub fn new(server: &ServerSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(server.timeout_ms))
            .user_agent(concat!("cantor/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            server: server.clone(),
        })
    }

    pub fn song_url(&self, id: SongId) -> String {
        let path = self.server.song_path.replace("{id}", &id.to_string());
        super::model::resolve_uri(&self.server.base_url, &path)
    }

    pub fn playback_url(&self) -> String {
        super::model::resolve_uri(&self.server.base_url, &self.server.playback_path)
    }

    /// Fetch song metadata. Any non-2xx status is reported as `NotFound`.
    pub fn fetch_track(&self, id: SongId) -> Result<Track> {
        let url = self.song_url(id);
        log::debug!("GET {url}");
        let response = self.http.get(&url).send()?;
        if !response.status().is_success() {
            log::warn!("song {id}: server answered {}", response.status());
            return Err(PlayerError::NotFound(id));
        }
        let payload: SongPayload = response.json()?;
        Ok(payload.into_track(&self.server.base_url))
    }

    /// Record that `id` started loading at `timestamp_ms` (Unix epoch).
    pub fn record_playback(&self, id: SongId, timestamp_ms: u64) -> Result<()> {
        let url = self.playback_url();
        let response = self
            .http
            .post(&url)
            .header(CSRF_HEADER, &self.server.csrf_token)
            .json(&PlaybackEvent {
                song_id: id,
                timestamp_ms,
            })
            .send()?;
        let status = response.status();
        if status.is_success() {
            log::debug!("playback of song {id} recorded ({status})");
            Ok(())
        } else {
            Err(PlayerError::Network(format!("{url} answered {status}")))
        }
    }

    /// Download a whole media resource into memory.
    pub fn fetch_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        log::debug!("GET {uri}");
        let response = self.http.get(uri).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlayerError::Network(format!("{uri} answered {status}")));
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
