#![allow(clippy::unwrap_used)]

use crate::limiter::RateLimiter;
use std::num::NonZeroU32;
use tokio::time::{Duration, Instant};

fn limiter(rate: u32, burst: u32) -> RateLimiter {
    RateLimiter::new(NonZeroU32::new(rate).unwrap(), NonZeroU32::new(burst).unwrap())
}

#[tokio::test(start_paused = true)]
async fn test_burst_is_served_immediately() {
    let limiter = limiter(2, 2);
    let started = Instant::now();
    limiter.acquire().await;
    limiter.acquire().await;
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_acquire_waits_for_refill() {
    let limiter = limiter(2, 2);
    limiter.acquire().await;
    limiter.acquire().await;

    let started = Instant::now();
    limiter.acquire().await;
    let waited = started.elapsed();
    assert!(waited >= Duration::from_millis(499), "{waited:?}");
    assert!(waited <= Duration::from_millis(510), "{waited:?}");
}

#[tokio::test(start_paused = true)]
async fn test_try_acquire() {
    let limiter = limiter(1, 1);
    assert!(limiter.try_acquire().await);
    assert!(!limiter.try_acquire().await);

    tokio::time::advance(Duration::from_millis(500)).await;
    assert!(!limiter.try_acquire().await);

    tokio::time::advance(Duration::from_millis(500)).await;
    assert!(limiter.try_acquire().await);
}

#[tokio::test(start_paused = true)]
async fn test_idle_time_does_not_exceed_burst() {
    let limiter = limiter(10, 3);
    tokio::time::advance(Duration::from_secs(60)).await;

    for _ in 0..3 {
        assert!(limiter.try_acquire().await);
    }
    assert!(!limiter.try_acquire().await);
}

#[tokio::test(start_paused = true)]
async fn test_with_burst_refills_one_per_second() {
    let limiter = RateLimiter::with_burst(NonZeroU32::new(4).unwrap());
    for _ in 0..4 {
        assert!(limiter.try_acquire().await);
    }
    assert!(!limiter.try_acquire().await);

    tokio::time::advance(Duration::from_millis(500)).await;
    assert!(!limiter.try_acquire().await);

    tokio::time::advance(Duration::from_millis(500)).await;
    assert!(limiter.try_acquire().await);
    assert!(!limiter.try_acquire().await);
}

#[tokio::test(start_paused = true)]
async fn test_with_burst_waits_a_second_once_drained() {
    let limiter = RateLimiter::with_burst(NonZeroU32::new(2).unwrap());
    limiter.acquire().await;
    limiter.acquire().await;

    let started = Instant::now();
    limiter.acquire().await;
    let waited = started.elapsed();
    assert!(waited >= Duration::from_millis(999), "{waited:?}");
    assert!(waited <= Duration::from_millis(1010), "{waited:?}");
}
