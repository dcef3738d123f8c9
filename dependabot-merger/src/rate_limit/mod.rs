//! Rate limiting for the GitHub API.
//!
//! Requests are spaced out by the fixed delays of a [`Pacer`]. On top of
//! that, the runner can check the core rate limit before each repository and
//! wait for the window to reset when it is nearly used up.

mod info;
mod pacer;

pub use info::RateLimitInfo;
pub use pacer::Pacer;

use crate::hosting::{ApiError, HostingApi};
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Returns how long to wait before the next request, if at all.
///
/// `now` is a Unix timestamp in seconds.
pub fn required_wait(info: &RateLimitInfo, now: u64) -> Option<Duration> {
    if info.remaining >= MIN_REMAINING_THRESHOLD || info.reset <= now {
        return None;
    }

    let wait_secs = info.reset - now;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }
    Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
}

/// Waits if the rate limit is low, returning true if we waited.
///
/// Waits when remaining requests fall below `MIN_REMAINING_THRESHOLD` and the
/// reset lies in the future.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait) = required_wait(info, now) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        wait_secs = wait.as_secs(),
        "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(wait).await;
    true
}

/// Checks the core rate limit and waits for a reset if it is nearly used up.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn ensure_core_rate_limit(api: &dyn HostingApi) -> Result<(), ApiError> {
    let info = api.core_rate_limit().await?;
    wait_if_needed(&info).await;
    Ok(())
}
