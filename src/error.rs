//! Error taxonomy for the player.
//!
//! Every variant is recoverable: the session surfaces it as a transient
//! notification and keeps running.

use thiserror::Error;

use crate::catalog::SongId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// The catalog answered with a non-success status for this song.
    #[error("song {0} not found")]
    NotFound(SongId),
    /// The request never produced a usable response.
    #[error("network failure: {0}")]
    Network(String),
    /// The audio output refused to start playback.
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),
    /// The audio output could not fetch or decode the media.
    #[error("decode failure: {0}")]
    Decode(String),
}

impl PlayerError {
    /// Short text shown to the user in the notification area.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) | Self::Network(_) => "Could not load the song",
            Self::PlaybackRejected(_) => "Could not start playback",
            Self::Decode(_) => "Could not load the audio file",
        }
    }
}

impl From<reqwest::Error> for PlayerError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;
