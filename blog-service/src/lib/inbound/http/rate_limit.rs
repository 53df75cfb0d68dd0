use std::collections::HashMap;
use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;
use std::time::Instant;

use axum::extract::ConnectInfo;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;

/// Expired windows are pruned once the table grows past this many clients.
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

#[derive(Debug)]
struct Windows {
    clients: HashMap<IpAddr, Window>,
    last_pruned: Instant,
}

/// Fixed-window request counter keyed by client IP.
pub struct FixedWindowRateLimiter {
    max_requests: u32,
    window: Duration,
    prune_threshold: usize,
    windows: Mutex<Windows>,
}

impl FixedWindowRateLimiter {
    /// # Arguments
    /// * `max_requests` - Requests allowed per client per window
    /// * `window` - Window length
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            prune_threshold: PRUNE_THRESHOLD,
            windows: Mutex::new(Windows {
                clients: HashMap::new(),
                last_pruned: Instant::now(),
            }),
        }
    }

    /// Replace the table size above which expired windows are pruned.
    pub fn with_prune_threshold(mut self, prune_threshold: usize) -> Self {
        self.prune_threshold = prune_threshold;
        self
    }

    /// Count a request from `client` and report whether it is allowed.
    pub fn check(&self, client: IpAddr) -> bool {
        self.check_at(client, Instant::now())
    }

    /// Same as `check` with an explicit clock reading.
    ///
    /// The table is swept at most once per window, so a large population of
    /// live clients does not cost a full scan on every request.
    pub fn check_at(&self, client: IpAddr, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        if windows.clients.len() > self.prune_threshold
            && now.saturating_duration_since(windows.last_pruned) >= self.window
        {
            let window = self.window;
            windows
                .clients
                .retain(|_, w| now.saturating_duration_since(w.started_at) < window);
            windows.last_pruned = now;
        }

        let entry = windows.clients.entry(client).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.saturating_duration_since(entry.started_at) >= self.window {
            *entry = Window {
                started_at: now,
                count: 0,
            };
        }

        if entry.count >= self.max_requests {
            return false;
        }

        entry.count += 1;
        true
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clients
            .len()
    }
}

/// Middleware rejecting clients that exceeded their window with 429.
///
/// Requests without connection info (e.g. in-process calls) share one bucket.
pub async fn rate_limit(
    State(limiter): State<Arc<FixedWindowRateLimiter>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if !limiter.check(client) {
        tracing::warn!(client = %client, "Rate limit exceeded");
        return Err(ApiError::TooManyRequests(
            "Too many requests, please try again later".to_string(),
        ));
    }

    Ok(next.run(req).await)
}
