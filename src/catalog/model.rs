use serde::{Deserialize, Serialize};

/// Server-side identifier of a song.
pub type SongId = u64;

/// Song metadata as returned by the catalog. Immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub cover: Option<String>,
    /// Absolute URI of the audio file.
    pub audio_uri: String,
    /// Preformatted duration label, when the server sends one.
    pub duration_label: Option<String>,
}

impl Track {
    /// `"<title> - <artist>"`, used for the terminal window title.
    pub fn window_title(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

/// Wire format of `GET /api/song/{id}`.
///
/// Accepts both the Spanish field names the catalog server sends and
/// their English equivalents.
#[derive(Debug, Deserialize)]
pub(crate) struct SongPayload {
    pub id: SongId,
    #[serde(alias = "titulo")]
    pub title: String,
    #[serde(alias = "artista")]
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(alias = "archivo")]
    pub audio_uri: String,
    #[serde(default, alias = "duracion")]
    pub duration: Option<String>,
}

impl SongPayload {
    /// Convert into a `Track`, resolving relative URIs against `base_url`.
    pub fn into_track(self, base_url: &str) -> Track {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        Track {
            id: self.id,
            title: self.title,
            artist: self.artist,
            album: non_empty(self.album),
            cover: non_empty(self.cover).map(|c| resolve_uri(base_url, &c)),
            audio_uri: resolve_uri(base_url, &self.audio_uri),
            duration_label: non_empty(self.duration),
        }
    }
}

/// Body of `POST /api/playback`.
#[derive(Debug, Serialize)]
pub(crate) struct PlaybackEvent {
    pub song_id: SongId,
    pub timestamp_ms: u64,
}

/// Join `uri` onto `base_url` unless it is already absolute.
pub fn resolve_uri(base_url: &str, uri: &str) -> String {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        return uri.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if uri.starts_with('/') {
        format!("{base}{uri}")
    } else {
        format!("{base}/{uri}")
    }
}
