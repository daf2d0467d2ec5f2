//! Global request-rate limiter.
//!
//! Token-bucket with a bucket size of one: the first permit is available
//! immediately, then one more every `60s / rpm`. Requests are smoothed over
//! the window instead of bursting at its start.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::WordRankError;

/// Issues permits at a configured maximum rate, shared across all fetch
/// attempts.
///
/// Safe for concurrent callers: each caller reserves the next free slot
/// under a lock, then waits for its own deadline without holding the lock.
/// Waiting is cooperative (`sleep_until`), never a busy loop.
#[derive(Debug)]
pub struct RateLimiter {
    period: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Limiter allowing `requests_per_minute` permits per minute.
    pub fn new(requests_per_minute: u32) -> Self {
        Self::with_period(Duration::from_secs(60) / requests_per_minute.max(1))
    }

    /// Limiter with an explicit inter-permit period (tests).
    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            next_slot: Mutex::new(None),
        }
    }

    /// Interval between consecutive permits.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next permit.
    ///
    /// # Errors
    ///
    /// Returns [`WordRankError::Cancelled`] immediately if `cancel` has
    /// already fired, or as soon as it fires while waiting. Never blocks
    /// past the cancellation signal.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), WordRankError> {
        if cancel.is_cancelled() {
            return Err(WordRankError::Cancelled);
        }

        let deadline = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(at) if at > now => at,
                _ => now,
            };
            *next = Some(slot + self.period);
            slot
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(WordRankError::Cancelled),
            _ = sleep_until(deadline) => Ok(()),
        }
    }
}
