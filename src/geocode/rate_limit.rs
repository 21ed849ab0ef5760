//! Minimum spacing between outbound geocoding requests.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Public Nominatim usage policy: at most one request per second
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1000);

static GLOBAL: OnceLock<Arc<RateLimiter>> = OnceLock::new();

/// Serializes callers so consecutive `acquire` returns are at least
/// `min_interval` apart.
///
/// The lock is held across the wait, so concurrent callers queue up instead of
/// reading the same stale timestamp.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Process-wide limiter shared by every resolver that does not bring its
    /// own
    pub fn global() -> Arc<RateLimiter> {
        GLOBAL
            .get_or_init(|| Arc::new(RateLimiter::new(DEFAULT_MIN_INTERVAL)))
            .clone()
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a request may be sent, then record it as sent
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(last) = *last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!("Rate limiting geocoder request for {:?}", wait);
                tokio::time::sleep(wait).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}
