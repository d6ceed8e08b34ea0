use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Fixed-window request counter keyed by client address.
#[derive(Clone)]
pub struct RateLimiter {
    max: u32,
    window: Duration,
    state: Arc<Mutex<HashMap<String, Window>>>,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            max,
            window,
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count one request for `key`. Returns the time until the window resets
    /// when the key is over its budget.
    pub async fn check(&self, key: &str, now: Instant) -> Result<(), Duration> {
        let mut state = self.state.lock().await;
        state.retain(|_, w| now.duration_since(w.started) < self.window);

        let window = state.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if window.count >= self.max {
            let elapsed = now.duration_since(window.started);
            return Err(self.window.saturating_sub(elapsed));
        }
        window.count += 1;
        Ok(())
    }
}
