// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Token bucket owned by a single client.
//!
//! ```text
//! tokens += elapsed * per_second   (capped at capacity)
//! acquire: tokens >= 1 ? take : sleep((1 - tokens) / per_second)
//! ```

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// Async token bucket.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: f64,
    per_second: f64,
    bucket: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last: Instant,
}

impl RateLimiter {
    /// Full bucket of `capacity` tokens refilled at `per_second`.
    ///
    /// A zero capacity is raised to one and a non-positive rate to one
    /// token per minute, so `acquire` always terminates.
    #[must_use]
    pub fn new(capacity: u32, per_second: f64) -> Self {
        let capacity = f64::from(capacity.max(1));
        let per_second = if per_second > 0.0 { per_second } else { 1.0 / 60.0 };
        Self {
            capacity,
            per_second,
            bucket: Mutex::new(Bucket {
                tokens: capacity,
                last: Instant::now(),
            }),
        }
    }

    /// Take a token if one is available right now.
    pub fn try_acquire(&self) -> bool {
        self.take().is_none()
    }

    /// Wait until a token is available and take it.
    pub async fn acquire(&self) {
        while let Some(wait) = self.take() {
            trace!(wait_ms = wait.as_millis(), "rate limited");
            tokio::time::sleep(wait).await;
        }
    }

    /// Tokens currently available, after refill.
    #[must_use]
    pub fn available(&self) -> f64 {
        let mut bucket = self.bucket.lock().unwrap_or_else(PoisonError::into_inner);
        self.refill(&mut bucket);
        bucket.tokens
    }

    /// Take a token, or return how long until one is due.
    fn take(&self) -> Option<Duration> {
        let mut bucket = self.bucket.lock().unwrap_or_else(PoisonError::into_inner);
        self.refill(&mut bucket);
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            None
        } else {
            Some(Duration::from_secs_f64((1.0 - bucket.tokens) / self.per_second))
        }
    }

    fn refill(&self, bucket: &mut Bucket) {
        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last).as_secs_f64();
        bucket.tokens = elapsed.mul_add(self.per_second, bucket.tokens).min(self.capacity);
        bucket.last = now;
    }
}
