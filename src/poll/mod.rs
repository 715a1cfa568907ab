//! Interval polling with an attempt bound and cancellation.
//!
//! A [`Poller`] re-invokes an async check until a predicate accepts its
//! output. Only one wait timer exists at a time, the caller can cancel via
//! the poller's [`CancellationToken`] (e.g. when the owning view is torn
//! down), and running out of attempts is reported as
//! [`PollError::Exhausted`], separate from failures of the check itself.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::PollConfig;
use crate::error::PollError;

/// Bounded, cancellable polling loop.
#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
    max_attempts: u32,
    cancel: CancellationToken,
}

impl Poller {
    /// Poll every `interval`, at most `max_attempts` times.
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            cancel: CancellationToken::new(),
        }
    }

    /// Poller using the configured interval and bound.
    pub fn from_config(config: &PollConfig) -> Self {
        Self::new(config.interval(), config.max_attempts)
    }

    /// Token that stops this poller when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop any running or future poll.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Run `check` until `done` accepts its output.
    ///
    /// The first check runs immediately; later ones follow `interval` after
    /// the previous check finished. An `Err` from `check` ends polling with
    /// [`PollError::Check`].
    pub async fn poll_until<T, E, F, Fut, P>(&self, mut check: F, mut done: P) -> Result<T, PollError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: FnMut(&T) -> bool,
        E: std::error::Error + 'static,
    {
        for attempt in 1..=self.max_attempts {
            if self.cancel.is_cancelled() {
                return Err(PollError::Cancelled);
            }

            let outcome = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(PollError::Cancelled),
                outcome = check() => outcome,
            };
            let value = outcome.map_err(|e| {
                warn!(attempt, error = %e, "Poll check failed");
                PollError::Check(e)
            })?;

            if done(&value) {
                debug!(attempt, "Poll condition satisfied");
                return Ok(value);
            }

            if attempt < self.max_attempts {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => return Err(PollError::Cancelled),
                    _ = tokio::time::sleep(self.interval) => {}
                }
            }
        }

        warn!(attempts = self.max_attempts, "Polling exhausted");
        Err(PollError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
