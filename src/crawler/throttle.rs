//! Request pacing
//!
//! A token-paced gate enforcing a minimum wall-clock gap between outbound
//! requests. Built on `tokio::time` so tests can drive it with a paused
//! clock instead of sleeping for real.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Enforces a minimum delay between consecutive operations
///
/// The only state is the monotonic instant of the last release; one value,
/// one owner, no locking. The first call never waits.
#[derive(Debug)]
pub struct Throttle {
    min_gap: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Creates a throttle with the given minimum gap
    pub fn new(min_gap: Duration) -> Self {
        Self { min_gap, last: None }
    }

    /// Waits until at least `min_gap` has passed since the previous release
    ///
    /// Returns immediately on the first call and whenever the gap has
    /// already elapsed.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            sleep_until(last + self.min_gap).await;
        }
        self.last = Some(Instant::now());
    }

    /// The configured minimum gap
    pub fn min_gap(&self) -> Duration {
        self.min_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_wait_is_immediate() {
        let mut throttle = Throttle::new(Duration::from_millis(500));
        let before = Instant::now();
        throttle.wait().await;
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_waits_are_spaced() {
        let mut throttle = Throttle::new(Duration::from_millis(500));
        throttle.wait().await;
        let first = Instant::now();
        throttle.wait().await;
        assert!(Instant::now() - first >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_gap_does_not_wait_again() {
        let mut throttle = Throttle::new(Duration::from_millis(100));
        throttle.wait().await;
        tokio::time::sleep(Duration::from_millis(300)).await;
        let before = Instant::now();
        throttle.wait().await;
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_waits_span_two_gaps() {
        let mut throttle = Throttle::new(Duration::from_millis(200));
        let start = Instant::now();
        throttle.wait().await;
        throttle.wait().await;
        throttle.wait().await;
        assert!(Instant::now() - start >= Duration::from_millis(400));
    }
}
