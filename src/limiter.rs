use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

/// Sliding-window admission controller for oracle invocations.
///
/// Holds the timestamps of recent admitted calls; each admission check trims
/// timestamps that have left the window, denies at capacity, and otherwise
/// records the call. Trim, check and record happen under a single lock so
/// concurrent callers can never admit past capacity. Denial is immediate and
/// terminal for that call — no queuing, no backoff.
pub struct SlidingWindowLimiter {
    window: Duration,
    capacity: usize,
    calls: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            window: Duration::from_millis(config.window_ms),
            capacity: config.max_requests,
            calls: Mutex::new(VecDeque::new()),
        }
    }

    /// Try to admit a call right now. Returns `false` when the window is at
    /// capacity; the caller decides whether (and when) to retry.
    pub fn try_admit(&self) -> bool {
        self.try_admit_at(Instant::now())
    }

    fn try_admit_at(&self, now: Instant) -> bool {
        let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        while let Some(&oldest) = calls.front() {
            if now.duration_since(oldest) >= self.window {
                calls.pop_front();
            } else {
                break;
            }
        }
        if calls.len() >= self.capacity {
            return false;
        }
        calls.push_back(now);
        true
    }

    /// Number of admitted calls still inside the current window.
    pub fn recent_count(&self) -> usize {
        let now = Instant::now();
        let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        while let Some(&oldest) = calls.front() {
            if now.duration_since(oldest) >= self.window {
                calls.pop_front();
            } else {
                break;
            }
        }
        calls.len()
    }

    /// `true` when the next admission check would be denied.
    pub fn at_capacity(&self) -> bool {
        self.recent_count() >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(window_ms: u64, max_requests: usize) -> SlidingWindowLimiter {
        SlidingWindowLimiter::new(&RateLimitConfig {
            window_ms,
            max_requests,
        })
    }

    #[test]
    fn admits_up_to_capacity() {
        let limiter = limiter(60_000, 3);
        assert!(limiter.try_admit());
        assert!(limiter.try_admit());
        assert!(limiter.try_admit());
        assert!(!limiter.try_admit());
    }

    #[test]
    fn denied_call_is_not_recorded() {
        let limiter = limiter(60_000, 1);
        assert!(limiter.try_admit());
        assert!(!limiter.try_admit());
        assert_eq!(limiter.recent_count(), 1);
    }

    #[test]
    fn window_expiry_readmits() {
        let limiter = limiter(50, 2);
        let start = Instant::now();
        assert!(limiter.try_admit_at(start));
        assert!(limiter.try_admit_at(start));
        assert!(!limiter.try_admit_at(start + Duration::from_millis(10)));
        // Past the window from the first call, capacity frees up.
        assert!(limiter.try_admit_at(start + Duration::from_millis(60)));
    }

    #[test]
    fn sliding_not_fixed_window() {
        let limiter = limiter(100, 2);
        let start = Instant::now();
        assert!(limiter.try_admit_at(start));
        assert!(limiter.try_admit_at(start + Duration::from_millis(80)));
        // 110ms: the first call has aged out, the second has not.
        assert!(limiter.try_admit_at(start + Duration::from_millis(110)));
        assert!(!limiter.try_admit_at(start + Duration::from_millis(120)));
    }

    #[test]
    fn at_capacity_reflects_state() {
        let limiter = limiter(60_000, 1);
        assert!(!limiter.at_capacity());
        assert!(limiter.try_admit());
        assert!(limiter.at_capacity());
    }

    #[test]
    fn concurrent_admissions_never_exceed_capacity() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let limiter = Arc::new(limiter(60_000, 10));
        let admitted = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let limiter = limiter.clone();
            let admitted = admitted.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..10 {
                    if limiter.try_admit() {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(admitted.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SlidingWindowLimiter>();
    }
}
