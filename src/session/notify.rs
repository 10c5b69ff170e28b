use std::time::{Duration, Instant};

use crate::error::PlayerError;

/// A transient, self-dismissing error message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub error: PlayerError,
    pub expires_at: Instant,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        self.error.user_message()
    }
}

/// Queue of notifications that expire after a fixed lifetime.
#[derive(Debug)]
pub struct Notifications {
    items: Vec<Notification>,
    lifetime: Duration,
}

impl Notifications {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: Vec::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, error: PlayerError) {
        self.push_at(error, Instant::now());
    }

    pub fn push_at(&mut self, error: PlayerError, now: Instant) {
        self.items.push(Notification {
            error,
            expires_at: now + self.lifetime,
        });
    }

    /// Drop every notification whose lifetime has elapsed at `now`.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| n.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
