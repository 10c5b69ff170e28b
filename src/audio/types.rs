//! Commands understood by the audio thread.

use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Drop the current resource and load the one at this URI.
    Load(String),
    /// Start or resume playback of the loaded resource.
    Play,
    Pause,
    /// Jump to an absolute position in the loaded resource.
    Seek(Duration),
    /// Set the output volume in `[0, 1]`.
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
