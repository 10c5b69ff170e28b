//! Catalog server access: song metadata and playback reporting.
//!
//! `CatalogClient` speaks HTTP, `CatalogWorker` moves those calls off the
//! event-loop thread. The session only sees the `TrackSource` trait.

mod client;
mod model;
mod worker;

pub use client::CatalogClient;
pub use model::{SongId, Track};
pub use worker::{CatalogReply, CatalogWorker};

/// Asynchronous access to the catalog, as seen by the player session.
pub trait TrackSource {
    /// Start fetching metadata for `id`. The reply must carry `generation`.
    fn request_track(&self, id: SongId, generation: u64);
    /// Fire-and-forget record that `id` was loaded. Failures are only logged.
    fn record_playback(&self, id: SongId);
}
