//! Generation tokens for discarding stale responses.
//!
//! A view calls [`RequestTracker::begin`] before each fetch and applies the
//! response only if its ticket is still current. Starting a newer request,
//! or calling [`RequestTracker::cancel_all`] when the view goes away, makes
//! every older ticket stale.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Invalidates every outstanding ticket.
    pub fn cancel_all(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `Some(value)` while the ticket is current, otherwise logs and drops it.
    pub fn accept<T>(&self, value: T) -> Option<T> {
        if self.is_current() {
            Some(value)
        } else {
            tracing::debug!(
                "Discarding stale response (generation {} of {})",
                self.generation,
                self.latest.load(Ordering::SeqCst)
            );
            None
        }
    }
}
