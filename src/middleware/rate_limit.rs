use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header::RETRY_AFTER, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

const WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct Window {
    opened_at: Instant,
    admitted: u32,
}

/// Fixed one-second window shared by every request on the routes it wraps.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    per_second: u32,
    window: Arc<Mutex<Window>>,
}

impl RateLimiter {
    pub fn new(per_second: u32) -> Self {
        Self {
            per_second: per_second.max(1),
            window: Arc::new(Mutex::new(Window {
                opened_at: Instant::now(),
                admitted: 0,
            })),
        }
    }

    fn try_admit(&self, now: Instant) -> bool {
        // A poisoned lock only means another request panicked mid-count.
        let mut window = self.window.lock().unwrap_or_else(|p| p.into_inner());
        if now.duration_since(window.opened_at) >= WINDOW {
            window.opened_at = now;
            window.admitted = 0;
        }
        if window.admitted >= self.per_second {
            return false;
        }
        window.admitted += 1;
        true
    }
}

pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if limiter.try_admit(Instant::now()) {
        return next.run(req).await;
    }
    tracing::warn!(path = %req.uri().path(), "rate limit exceeded");
    (
        StatusCode::TOO_MANY_REQUESTS,
        [(RETRY_AFTER, "1")],
        Json(json!({ "success": false, "error": "Too many requests" })),
    )
        .into_response()
}
