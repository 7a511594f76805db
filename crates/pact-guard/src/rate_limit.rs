//! Sliding-window rate limiting (§4.8).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const DEFAULT_WINDOW_MS: i64 = 60_000;
const DEFAULT_CAP: usize = 30;

/// Outcome of a single rate-limit check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitCheck {
    pub ok: bool,
    pub current_count: usize,
    pub limit: usize,
    pub reason: Option<String>,
}

/// Per `(agent, intent_type)` sliding window of recent accepted requests.
/// Rejected requests never enter the window, so a caller hammering past the
/// cap does not extend its own lockout.
pub struct RateLimiter {
    window_ms: i64,
    cap: usize,
    hits: HashMap<(String, String), Vec<i64>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            cap: DEFAULT_CAP,
            hits: HashMap::new(),
        }
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap,
            ..Self::new()
        }
    }

    pub fn check(&mut self, agent: &str, intent_type: &str, now_ms: i64) -> RateLimitCheck {
        let key = (agent.to_string(), intent_type.to_string());
        let entry = self.hits.entry(key).or_default();
        entry.retain(|&ts| now_ms - ts < self.window_ms);

        if entry.len() >= self.cap {
            return RateLimitCheck {
                ok: false,
                current_count: entry.len(),
                limit: self.cap,
                reason: Some("RATE_LIMIT_EXCEEDED".to_string()),
            };
        }

        entry.push(now_ms);
        RateLimitCheck {
            ok: true,
            current_count: entry.len(),
            limit: self.cap,
            reason: None,
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
