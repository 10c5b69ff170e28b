//! Small state types owned by the session: lifecycle phase and volume.

/// Lifecycle of the current track.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been loaded yet.
    #[default]
    Idle,
    /// Metadata for a new track is being fetched.
    Loading,
    /// A track is loaded and not playing.
    Ready,
    Playing,
    Paused,
    /// The current track played to its end.
    Ended,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Ready => "Ready",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Ended => "Ended",
        }
    }
}

/// Volume bucket shown next to the volume bar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Low,
    High,
}

/// Clamp `v` into `[0, 1]`. NaN maps to silence.
pub fn clamp_volume(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// The last explicit volume, kept apart from the mute flag so that
/// unmuting always restores exactly what the user had chosen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VolumeState {
    level: f32,
    muted: bool,
}

impl VolumeState {
    pub fn new(level: f32) -> Self {
        Self {
            level: clamp_volume(level),
            muted: false,
        }
    }

    /// Last explicit volume, regardless of mute.
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Volume actually applied to the output.
    pub fn live(&self) -> f32 {
        if self.muted { 0.0 } else { self.level }
    }

    /// Set a new explicit level. Setting a level while muted unmutes.
    pub fn set(&mut self, v: f32) {
        self.level = clamp_volume(v);
        self.muted = false;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn icon(&self) -> VolumeIcon {
        let live = self.live();
        if live <= 0.0 {
            VolumeIcon::Muted
        } else if live < 0.5 {
            VolumeIcon::Low
        } else {
            VolumeIcon::High
        }
    }
}
