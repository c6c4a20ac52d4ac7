use std::num::NonZeroU32;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Token bucket shared by all query requests.
///
/// The bucket starts full with `burst` tokens and refills continuously at `rate`
/// tokens per second.
#[derive(Debug)]
pub struct RateLimiter {
    rate: f64,
    burst: f64,
    bucket: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    refreshed: Instant,
}

impl Bucket {
    fn refill(&mut self, now: Instant, rate: f64, burst: f64) {
        let elapsed = now.saturating_duration_since(self.refreshed).as_secs_f64();
        self.tokens = elapsed.mul_add(rate, self.tokens).min(burst);
        self.refreshed = now;
    }
}

impl RateLimiter {
    #[must_use]
    pub fn new(rate: NonZeroU32, burst: NonZeroU32) -> Self {
        let burst = f64::from(burst.get());
        Self {
            rate: f64::from(rate.get()),
            burst,
            bucket: Mutex::new(Bucket {
                tokens: burst,
                refreshed: Instant::now(),
            }),
        }
    }

    /// One request per second on average, allowing up to `burst` at once.
    #[must_use]
    pub fn with_burst(burst: NonZeroU32) -> Self {
        Self::new(NonZeroU32::MIN, burst)
    }

    /// Waits until a token is available and takes it.
    ///
    /// Dropping the returned future before it completes takes nothing.
    pub async fn acquire(&self) {
        loop {
            let Some(wait) = self.take().await else {
                return;
            };
            tracing::debug!(?wait, "waiting for rate limit");
            tokio::time::sleep(wait).await;
        }
    }

    /// Takes a token if one is available right now.
    pub async fn try_acquire(&self) -> bool {
        self.take().await.is_none()
    }

    /// Takes a token, or returns how long until the next one is due.
    async fn take(&self) -> Option<Duration> {
        let mut bucket = self.bucket.lock().await;
        bucket.refill(Instant::now(), self.rate, self.burst);
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            None
        } else {
            Some(Duration::from_secs_f64((1.0 - bucket.tokens) / self.rate))
        }
    }
}
