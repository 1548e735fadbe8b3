use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::{SWIPE_THRESHOLD, TOAST_LIFETIME};

/// Decoded RGBA pixels waiting to become a texture on the UI thread.
pub struct LoadedImage {
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Resolved,
    Failed(String),
}

impl LoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub created: Instant,
}

#[derive(Debug)]
pub struct Toasts {
    items: VecDeque<Toast>,
    lifetime: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::with_lifetime(TOAST_LIFETIME)
    }
}

impl Toasts {
    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.push_at(message, Instant::now());
    }

    pub fn push_at(&mut self, message: impl Into<String>, now: Instant) {
        self.items.push_back(Toast {
            message: message.into(),
            created: now,
        });
    }

    /// Drops expired toasts and returns the ones still visible.
    pub fn visible(&mut self, now: Instant) -> impl Iterator<Item = &Toast> {
        let lifetime = self.lifetime;
        self.items
            .retain(|toast| now.saturating_duration_since(toast.created) < lifetime);
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Previous,
    Next,
}

/// Horizontal drag tracking over the gallery overlay.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Rightward drag past the threshold goes back, leftward goes forward.
    pub fn end(&mut self, x: f32) -> Option<Swipe> {
        let start = self.start_x.take()?;
        let delta = x - start;
        if delta > SWIPE_THRESHOLD {
            Some(Swipe::Previous)
        } else if -delta > SWIPE_THRESHOLD {
            Some(Swipe::Next)
        } else {
            None
        }
    }
}
