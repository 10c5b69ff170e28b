//! Player session: current track, playlist and transport state.
//!
//! The session is a pure state machine over two seams, `MediaBackend` and
//! `TrackSource`, so it can be driven and inspected without a terminal,
//! an audio device or a server.

mod notify;
mod player;
mod playlist;
mod state;

pub use notify::{Notification, Notifications};
pub use player::{PlayerSession, SessionOptions};
pub use playlist::{Playlist, PlaylistEntry};
pub use state::{Phase, VolumeIcon};

#[cfg(test)]
pub(crate) mod fakes;
