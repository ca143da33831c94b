use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const MAX_SUBMISSIONS: usize = 5;
const WINDOW_SECS: u64 = 900; // 15 minutes

/// Sliding-window per-client limiter for public feedback submission.
#[derive(Clone)]
pub struct RateLimiter {
    submissions: Arc<Mutex<HashMap<String, Vec<Instant>>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            submissions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if the given client IP is rate-limited. Returns true if blocked.
    /// Also lazily cleans up stale entries for the checked IP.
    pub fn is_blocked(&self, ip: &str) -> bool {
        let mut map = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
        // checked_sub: the monotonic clock may be younger than the window
        let cutoff = Instant::now().checked_sub(Duration::from_secs(WINDOW_SECS));

        if let Some(timestamps) = map.get_mut(ip) {
            if let Some(cutoff) = cutoff {
                timestamps.retain(|t| *t > cutoff);
            }
            timestamps.len() >= MAX_SUBMISSIONS
        } else {
            false
        }
    }

    /// Record a submission attempt for the given client IP.
    pub fn record_submission(&self, ip: &str) {
        let mut map = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(ip.to_string()).or_default().push(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
