//! Fetching media bytes and building `rodio` sinks from them.
//!
//! The whole resource is held in memory so that seeking can rebuild the
//! sink and skip into it without another download.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::catalog::CatalogClient;

pub(crate) type MediaBytes = Arc<[u8]>;

/// Download `uri`, or read it from disk for `file://` URIs.
pub(super) fn fetch(client: &CatalogClient, uri: &str) -> Result<MediaBytes, String> {
    let bytes = match uri.strip_prefix("file://") {
        Some(path) => std::fs::read(path).map_err(|e| format!("{path}: {e}"))?,
        None => client.fetch_bytes(uri).map_err(|e| e.to_string())?,
    };
    if bytes.is_empty() {
        return Err(format!("{uri}: empty response"));
    }
    Ok(bytes.into())
}

fn decode(bytes: &MediaBytes) -> Result<Decoder<Cursor<MediaBytes>>, String> {
    Decoder::new(Cursor::new(bytes.clone())).map_err(|e| e.to_string())
}

/// Check that `bytes` decode and report their duration when the format knows it.
pub(super) fn probe(bytes: &MediaBytes) -> Result<Option<Duration>, String> {
    Ok(decode(bytes)?.total_duration())
}

/// Create a paused `Sink` for `bytes` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    bytes: &MediaBytes,
    start_at: Duration,
    volume: f32,
) -> Result<Sink, String> {
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decode(bytes)?.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}
