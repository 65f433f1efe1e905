//! Token-bucket pacing for upstream calls.
//!
//! Replaces the fixed sleep between operations and days with a
//! configurable bucket while keeping the single-flight ordering guarantee:
//! `acquire` holds the bucket until a token is available, so callers
//! proceed strictly in turn. Not adaptive; the only backpressure is the
//! refill rate.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

struct BucketState {
    tokens: u32,
    last_refill: Instant,
}

pub struct Pacer {
    capacity: u32,
    refill_every: Duration,
    state: Mutex<BucketState>,
}

impl Pacer {
    /// Bucket of `capacity` tokens, starting full, gaining one token every
    /// `refill_every`.
    pub fn new(capacity: u32, refill_every: Duration) -> Self {
        Pacer {
            capacity: capacity.max(1),
            refill_every,
            state: Mutex::new(BucketState { tokens: capacity.max(1), last_refill: Instant::now() }),
        }
    }

    /// A pacer that never waits, for tests and dry runs.
    pub fn unthrottled() -> Self {
        Pacer::new(1, Duration::ZERO)
    }

    /// Take one token, waiting for a refill when the bucket is empty.
    pub async fn acquire(&self) {
        if self.refill_every.is_zero() {
            return;
        }
        let mut state = self.state.lock().await;
        loop {
            let now = Instant::now();
            let elapsed = now.duration_since(state.last_refill);
            let refilled = (elapsed.as_nanos() / self.refill_every.as_nanos()) as u32;
            if refilled > 0 {
                state.tokens = state.tokens.saturating_add(refilled).min(self.capacity);
                state.last_refill = if state.tokens == self.capacity {
                    now
                } else {
                    state.last_refill + self.refill_every * refilled
                };
            }
            if state.tokens > 0 {
                state.tokens -= 1;
                return;
            }
            let wait = self.refill_every.saturating_sub(elapsed);
            tokio::time::sleep(wait.max(Duration::from_millis(1))).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_token_is_immediate() {
        let pacer = Pacer::new(1, Duration::from_millis(100));
        let start = Instant::now();
        pacer.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn refill_paces_subsequent_tokens() {
        let pacer = Pacer::new(1, Duration::from_millis(100));
        let start = Instant::now();
        pacer.acquire().await;
        pacer.acquire().await;
        pacer.acquire().await;
        // Two refills at 100ms each after the initial token.
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn burst_capacity_is_honored() {
        let pacer = Pacer::new(3, Duration::from_millis(100));
        let start = Instant::now();
        pacer.acquire().await;
        pacer.acquire().await;
        pacer.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(1), "burst should not wait");
        pacer.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn unthrottled_never_waits() {
        let pacer = Pacer::unthrottled();
        for _ in 0..100 {
            pacer.acquire().await;
        }
    }
}
