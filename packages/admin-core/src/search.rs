//! Debounced search input
//!
//! Every keystroke replaces the pending timer; only input that stays idle
//! for the debounce window triggers a request. Each issued request carries
//! a sequence number, and a response is applied only if its request is
//! still the latest one issued, so a slow stale response cannot overwrite a
//! newer result.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Issues monotonically increasing request numbers
#[derive(Debug, Clone, Default)]
pub struct SequenceFence {
    latest: Arc<AtomicU64>,
}

impl SequenceFence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            seq,
            latest: self.latest.clone(),
        }
    }
}

/// Handle identifying one issued request
#[derive(Debug, Clone)]
pub struct RequestTicket {
    seq: u64,
    latest: Arc<AtomicU64>,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// No newer request has been issued since this one
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.seq
    }
}

/// Result slot that only accepts responses from the latest request
#[derive(Debug)]
pub struct LatestResult<T> {
    value: Mutex<Option<T>>,
}

impl<T: Clone> Default for LatestResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> LatestResult<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    /// Store `value` if `ticket` is still current. Returns whether it was kept.
    pub fn offer(&self, ticket: &RequestTicket, value: T) -> bool {
        if !ticket.is_current() {
            debug!(seq = ticket.seq(), "Discarding stale search response");
            return false;
        }
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
        true
    }

    pub fn get(&self) -> Option<T> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

/// Keystroke debouncer
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    fence: SequenceFence,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            fence: SequenceFence::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a keystroke
    ///
    /// Cancels the pending timer and schedules `search` to run with `value`
    /// once the window elapses without another keystroke. A request already
    /// sent is not cancelled; use the ticket to drop its response.
    pub fn input<F, Fut>(&mut self, value: impl Into<String>, search: F)
    where
        F: FnOnce(String, RequestTicket) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let value = value.into();
        let delay = self.delay;
        let fence = self.fence.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let ticket = fence.issue();
            debug!(seq = ticket.seq(), "Issuing debounced search");
            // Detached so a later keystroke cannot abort a request already sent
            tokio::spawn(search(value, ticket));
        }));
    }

    /// Drop the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Cancel the timer and invalidate every request issued so far
    pub fn reset(&mut self) {
        self.cancel();
        self.fence.issue();
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
