use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cantor/config.toml` or `~/.config/cantor/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CANTOR__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Scheme, host and port of the catalog server.
    pub base_url: String,
    /// Path of the song metadata endpoint. `{id}` is replaced by the song id.
    pub song_path: String,
    /// Path of the playback event endpoint.
    pub playback_path: String,
    /// Value sent in the `X-CSRFToken` header when recording playback.
    pub csrf_token: String,
    /// Timeout for every HTTP request (milliseconds).
    pub timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            song_path: "/api/song/{id}".to_string(),
            playback_path: "/api/playback".to_string(),
            csrf_token: String::new(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether repeat-current starts enabled.
    pub repeat: bool,
    /// Initial volume in `[0, 1]`.
    pub volume: f32,
    /// Keep playing across track changes made while playing.
    pub autoplay: bool,
    /// Past this position, "previous" restarts the current track (milliseconds).
    pub restart_threshold_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat: false,
            volume: 0.8,
            autoplay: true,
            restart_threshold_ms: 3_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Volume change applied by the up/down arrow keys.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { volume_step: 0.1 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// How long an error notification stays on screen (milliseconds).
    pub notification_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ cantor ~ ".to_string(),
            notification_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter passed to `env_logger` (overridden by `RUST_LOG`).
    pub level: String,
    /// Log file. Falls back to the XDG state directory when unset.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
