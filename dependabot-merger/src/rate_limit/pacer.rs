//! Fixed pacing delays.

use std::time::Duration;
use tracing::debug;

/// Sleeps for fixed intervals to keep request volume under the API's limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    request_delay: Duration,
    repo_delay: Duration,
}

impl Pacer {
    /// Creates a pacer with the given delays.
    pub fn new(request_delay: Duration, repo_delay: Duration) -> Self {
        Self {
            request_delay,
            repo_delay,
        }
    }

    /// A pacer that never sleeps.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Delay after each mutating call and between listing pages.
    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// Delay after each repository.
    pub fn repo_delay(&self) -> Duration {
        self.repo_delay
    }

    /// Waits out the request delay.
    pub async fn after_request(&self) {
        pause(self.request_delay).await;
    }

    /// Waits out the repository delay.
    pub async fn after_repository(&self) {
        pause(self.repo_delay).await;
    }
}

async fn pause(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    debug!(delay_ms = delay.as_millis() as u64, "Pausing");
    tokio::time::sleep(delay).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn disabled_pacer_returns_immediately() {
        let pacer = Pacer::disabled();
        let start = Instant::now();

        pacer.after_request().await;
        pacer.after_repository().await;

        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_for_configured_delays() {
        let pacer = Pacer::new(Duration::from_secs(2), Duration::from_secs(3));
        let start = tokio::time::Instant::now();

        pacer.after_request().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));

        pacer.after_repository().await;
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }
}
