//! A [`Policy`] that allows a fixed number of inputs per client within a time window.
//!
//! See [`FixedWindowPolicy`].
//!
//! # Examples
//!
//! ```
//! use uapick_core::layer::limit::{ClientKey, LimitLayer, policy::FixedWindowPolicy};
//! use uapick_core::service::{Service, service_fn};
//! use uapick_core::Layer;
//! use std::convert::Infallible;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let policy = FixedWindowPolicy::try_new(1, Duration::from_secs(60)).unwrap();
//! let service = LimitLayer::new(policy)
//!     .layer(service_fn(|_: ClientKey| async { Ok::<_, Infallible>("hello") }));
//!
//! assert!(service.serve(ClientKey::from("10.0.0.1")).await.is_ok());
//! assert!(service.serve(ClientKey::from("10.0.0.1")).await.is_err());
//! assert!(service.serve(ClientKey::from("10.0.0.2")).await.is_ok());
//! # }
//! ```
//!
//! # Memory
//!
//! A record is kept for every distinct client key ever seen. Records are
//! reset in place once their window elapsed, but never removed implicitly.
//! Deployments with an unbounded key space can reclaim memory by calling
//! [`FixedWindowCounter::evict_expired`] periodically.

use super::{Policy, PolicyOutput, PolicyResult};
use crate::layer::limit::key::{ClientKey, ExtractClientKey, FromInput};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A [`Policy`] that limits each client to `max_requests` inputs
/// per fixed time window.
///
/// The client is derived from the input using an [`ExtractClientKey`],
/// by default [`FromInput`]. Clones share the same [`FixedWindowCounter`].
#[derive(Debug, Clone)]
pub struct FixedWindowPolicy<K = FromInput> {
    counter: FixedWindowCounter,
    extractor: K,
}

impl FixedWindowPolicy<FromInput> {
    /// Create a new [`FixedWindowPolicy`] for inputs carrying their own client key.
    ///
    /// Fails if `max_requests` or `window` is zero.
    pub fn try_new(max_requests: usize, window: Duration) -> Result<Self, InvalidLimit> {
        Ok(Self {
            counter: FixedWindowCounter::try_new(max_requests, window)?,
            extractor: FromInput,
        })
    }
}

impl<K> FixedWindowPolicy<K> {
    /// Create a new [`FixedWindowPolicy`] from an existing counter
    /// and a custom client key extractor.
    pub const fn with_extractor(counter: FixedWindowCounter, extractor: K) -> Self {
        Self { counter, extractor }
    }

    /// The counter backing this policy.
    pub fn counter(&self) -> &FixedWindowCounter {
        &self.counter
    }
}

impl<K, Input> Policy<Input> for FixedWindowPolicy<K>
where
    K: ExtractClientKey<Input>,
    Input: Send + 'static,
{
    type Guard = ();
    type Error = RateLimited;

    async fn check(&self, input: Input) -> PolicyResult<Input, Self::Guard, Self::Error> {
        let key = self.extractor.extract_client_key(&input);
        let output = match self.counter.try_access(&key) {
            Ok(()) => PolicyOutput::Ready(()),
            Err(err) => PolicyOutput::Abort(err),
        };
        PolicyResult { input, output }
    }
}

/// Per client request counters, each valid for a fixed window.
///
/// All bookkeeping happens under a single process-wide lock,
/// held only for one constant-time map lookup and update.
#[derive(Clone)]
pub struct FixedWindowCounter {
    max_requests: usize,
    window: Duration,
    records: Arc<Mutex<HashMap<ClientKey, WindowRecord, ahash::RandomState>>>,
}

#[derive(Debug, Clone, Copy)]
struct WindowRecord {
    count: usize,
    window_start: Instant,
}

impl fmt::Debug for FixedWindowCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedWindowCounter")
            .field("max_requests", &self.max_requests)
            .field("window", &self.window)
            .field("tracked_keys", &self.tracked_keys())
            .finish()
    }
}

impl FixedWindowCounter {
    /// Create a new [`FixedWindowCounter`].
    ///
    /// Fails if `max_requests` or `window` is zero.
    pub fn try_new(max_requests: usize, window: Duration) -> Result<Self, InvalidLimit> {
        if max_requests == 0 {
            return Err(InvalidLimit::ZeroMaxRequests);
        }
        if window.is_zero() {
            return Err(InvalidLimit::ZeroWindow);
        }
        Ok(Self {
            max_requests,
            window,
            records: Arc::new(Mutex::new(HashMap::default())),
        })
    }

    /// Maximum number of inputs allowed per client and window.
    #[must_use]
    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Length of a window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Count an access for the given client,
    /// failing with [`RateLimited`] when its window budget is exhausted.
    ///
    /// A rejected access leaves the client's record untouched.
    pub fn try_access(&self, key: &ClientKey) -> Result<(), RateLimited> {
        self.try_access_at(key, Instant::now())
    }

    pub(crate) fn try_access_at(&self, key: &ClientKey, now: Instant) -> Result<(), RateLimited> {
        let result = {
            let mut records = self.records.lock();
            match records.get_mut(key) {
                Some(record) => {
                    let elapsed = now.saturating_duration_since(record.window_start);
                    if elapsed > self.window {
                        *record = WindowRecord {
                            count: 1,
                            window_start: now,
                        };
                        Ok(1)
                    } else if record.count < self.max_requests {
                        record.count += 1;
                        Ok(record.count)
                    } else {
                        Err(self.window.saturating_sub(elapsed))
                    }
                }
                None => {
                    records.insert(
                        key.clone(),
                        WindowRecord {
                            count: 1,
                            window_start: now,
                        },
                    );
                    Ok(1)
                }
            }
        };

        match result {
            Ok(count) => {
                tracing::trace!(client.key = %key, count, "fixed window: access granted");
                Ok(())
            }
            Err(retry_after) => {
                tracing::debug!(
                    client.key = %key,
                    max_requests = self.max_requests,
                    retry_after_ms = retry_after.as_millis(),
                    "fixed window: rate limited",
                );
                Err(RateLimited {
                    client_key: key.clone(),
                    retry_after,
                })
            }
        }
    }

    /// Number of client keys currently tracked.
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.records.lock().len()
    }

    /// Remove the records of all clients whose window has elapsed,
    /// returning how many were removed.
    ///
    /// A removed client starts with a fresh window on its next access,
    /// exactly as it would have without the eviction.
    pub fn evict_expired(&self) -> usize {
        self.evict_expired_at(Instant::now())
    }

    pub(crate) fn evict_expired_at(&self, now: Instant) -> usize {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|_, record| now.saturating_duration_since(record.window_start) <= self.window);
        before - records.len()
    }
}

/// Input aborted because its client exhausted the budget of its current window.
#[derive(Debug, Clone)]
pub struct RateLimited {
    client_key: ClientKey,
    retry_after: Duration,
}

impl RateLimited {
    /// The client that got limited.
    #[must_use]
    pub fn client_key(&self) -> &ClientKey {
        &self.client_key
    }

    /// Time until the current window of the client elapses.
    #[must_use]
    pub fn retry_after(&self) -> Duration {
        self.retry_after
    }
}

impl fmt::Display for RateLimited {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rate limit exceeded: retry after {}ms",
            self.retry_after.as_millis()
        )
    }
}

impl std::error::Error for RateLimited {}

/// Invalid configuration of a [`FixedWindowCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidLimit {
    /// `max_requests` has to be at least 1.
    ZeroMaxRequests,
    /// The window has to be longer than zero.
    ZeroWindow,
}

impl fmt::Display for InvalidLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxRequests => f.write_str("invalid limit: max requests must be greater than 0"),
            Self::ZeroWindow => f.write_str("invalid limit: window must be greater than 0"),
        }
    }
}

impl std::error::Error for InvalidLimit {}
