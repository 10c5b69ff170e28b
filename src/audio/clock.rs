use std::time::{Duration, Instant};

/// Elapsed-time bookkeeping for the current sink.
///
/// `accumulated` holds time played before the last pause (or the seek
/// target); `started_at` is set only while playing.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PlayClock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl PlayClock {
    pub fn running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start counting at `now`. No-op while already running.
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(st);
        }
    }

    /// Jump to `position`, keeping the running/paused state.
    pub fn reset(&mut self, position: Duration, now: Instant) {
        self.accumulated = position;
        if self.started_at.is_some() {
            self.started_at = Some(now);
        }
    }

    /// Stop and rewind to zero.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |st| now.saturating_duration_since(st))
    }
}
