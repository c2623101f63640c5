use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Fixed-window request limiter keyed by caller (host, token, ...).
///
/// Each key gets its own window that resets lazily on first use after it
/// expires. Acquisition is a compare-and-increment, so concurrent callers can
/// never push a window past `max_requests`.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Arc<RequestWindow>>>,
}

#[derive(Debug)]
struct RequestWindow {
    start: Mutex<Instant>,
    count: AtomicU32,
}

impl RequestWindow {
    fn new() -> Self {
        Self {
            start: Mutex::new(Instant::now()),
            count: AtomicU32::new(0),
        }
    }

    fn reset_if_expired(&self, window: Duration) {
        let mut start = lock(&self.start);
        let now = Instant::now();
        if now.duration_since(*start) > window {
            *start = now;
            self.count.store(0, Ordering::SeqCst);
        }
    }
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Records one request for `key`; false once the window is exhausted.
    pub fn try_acquire(&self, key: &str) -> bool {
        let window = {
            let mut windows = lock(&self.windows);
            Arc::clone(
                windows
                    .entry(key.to_string())
                    .or_insert_with(|| Arc::new(RequestWindow::new())),
            )
        };
        window.reset_if_expired(self.window);
        let max = self.max_requests;
        let acquired = window
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                (count < max).then_some(count + 1)
            })
            .is_ok();
        if !acquired {
            tracing::debug!(key, max, "rate limit reached");
        }
        acquired
    }

    /// Whether a request for `key` would currently be accepted, without
    /// consuming it.
    pub fn would_allow(&self, key: &str) -> bool {
        self.remaining_requests(key) > 0
    }

    pub fn remaining_requests(&self, key: &str) -> u32 {
        let Some(window) = self.window_for(key) else {
            return self.max_requests;
        };
        window.reset_if_expired(self.window);
        self.max_requests
            .saturating_sub(window.count.load(Ordering::SeqCst))
    }

    pub fn clear(&self) {
        lock(&self.windows).clear();
    }

    fn window_for(&self, key: &str) -> Option<Arc<RequestWindow>> {
        lock(&self.windows).get(key).cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
