use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared_types::AppError;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

use crate::auth::jwt::Claims;

/// Chat messages allowed per user within [`CHAT_WINDOW`].
pub const CHAT_MAX_MESSAGES: u32 = 20;
pub const CHAT_WINDOW: Duration = Duration::from_secs(60);

/// Sliding window rate limit state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    inner: Arc<Mutex<RateLimitInner>>,
}

struct RateLimitInner {
    /// Map from client key to the request timestamps inside the window.
    requests: HashMap<String, Vec<Instant>>,
    max_requests: u32,
    window: Duration,
    last_sweep: Instant,
}

impl RateLimitInner {
    /// Drop keys whose newest request has left the window. Runs at most
    /// once per window.
    fn sweep(&mut self, now: Instant) {
        if now.saturating_duration_since(self.last_sweep) < self.window {
            return;
        }
        let window = self.window;
        self.requests.retain(|_, timestamps| {
            timestamps
                .last()
                .is_some_and(|t| now.saturating_duration_since(*t) < window)
        });
        self.last_sweep = now;
    }
}

impl RateLimitState {
    /// Create rate limiter allowing `max_requests` per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RateLimitInner {
                requests: HashMap::new(),
                max_requests,
                window,
                last_sweep: Instant::now(),
            })),
        }
    }

    /// Record a request from `key` if it fits in the window.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.sweep(now);
        let window = inner.window;
        let max = inner.max_requests;

        let timestamps = inner.requests.entry(key.to_string()).or_default();
        timestamps.retain(|t| now.saturating_duration_since(*t) < window);

        if timestamps.len() as u32 >= max {
            return false;
        }

        timestamps.push(now);
        true
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        match self.inner.lock() {
            Ok(guard) => guard.requests.len(),
            Err(poisoned) => poisoned.into_inner().requests.len(),
        }
    }
}

/// Limiter for chat sends, shared by the standalone and dashboard chats.
pub fn chat_limiter() -> &'static RateLimitState {
    static CHAT: OnceLock<RateLimitState> = OnceLock::new();
    CHAT.get_or_init(|| RateLimitState::new(CHAT_MAX_MESSAGES, CHAT_WINDOW))
}

/// Reject the chat send when `user_id` has used up its window.
pub fn check_chat_quota(user_id: i64) -> Result<(), AppError> {
    if chat_limiter().check(&format!("chat:{user_id}")) {
        Ok(())
    } else {
        tracing::warn!(user_id, "chat rate limit exceeded");
        Err(AppError::rate_limited(
            "You are sending messages too quickly. Please wait a moment.",
        ))
    }
}

/// Limiter key for a request: the authenticated user, else the peer
/// address of the connection. Client-supplied headers are not trusted.
fn client_key(request: &Request) -> String {
    if let Some(claims) = request.extensions().get::<Claims>() {
        return format!("user:{}", claims.sub);
    }
    match request.extensions().get::<ConnectInfo<SocketAddr>>() {
        Some(ConnectInfo(addr)) => format!("ip:{}", addr.ip()),
        None => "anonymous".to_string(),
    }
}

/// Axum middleware limiting REST calls per authenticated user, falling
/// back to the peer address for anonymous callers.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    if !state.check(&key) {
        return AppError::rate_limited("Rate limit exceeded. Please try again later.")
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_limit_then_blocks() {
        let limiter = RateLimitState::new(3, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.check_at("a", now));
        assert!(limiter.check_at("a", now));
        assert!(limiter.check_at("a", now));
        assert!(!limiter.check_at("a", now));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = RateLimitState::new(1, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.check_at("a", now));
        assert!(limiter.check_at("b", now));
        assert!(!limiter.check_at("a", now));
    }

    #[test]
    fn window_slides() {
        let limiter = RateLimitState::new(2, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.check_at("a", start));
        assert!(limiter.check_at("a", start + Duration::from_secs(30)));
        assert!(!limiter.check_at("a", start + Duration::from_secs(59)));
        // The first request has left the window.
        assert!(limiter.check_at("a", start + Duration::from_secs(61)));
        assert!(!limiter.check_at("a", start + Duration::from_secs(62)));
    }

    #[test]
    fn idle_keys_are_forgotten_after_the_window() {
        let limiter = RateLimitState::new(5, Duration::from_secs(60));
        let start = Instant::now();
        for i in 0..10_000 {
            assert!(limiter.check_at(&format!("ip:{i}"), start));
        }
        assert_eq!(limiter.tracked_keys(), 10_000);

        assert!(limiter.check_at("ip:other", start + Duration::from_secs(3600)));
        assert_eq!(limiter.tracked_keys(), 1);
    }

    #[test]
    fn active_keys_survive_a_sweep() {
        let limiter = RateLimitState::new(5, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.check_at("a", start + Duration::from_secs(100)));
        assert!(limiter.check_at("b", start + Duration::from_secs(130)));
        assert_eq!(limiter.tracked_keys(), 2);
    }

    #[test]
    fn forwarded_header_does_not_pick_the_key() {
        let request = Request::builder()
            .uri("/api/v1/documents")
            .header("x-forwarded-for", "203.0.113.9")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(client_key(&request), "anonymous");
    }

    #[test]
    fn peer_address_keys_anonymous_callers() {
        let mut request = Request::builder()
            .uri("/api/v1/documents")
            .header("x-forwarded-for", "203.0.113.9")
            .body(axum::body::Body::empty())
            .unwrap();
        let addr: SocketAddr = "198.51.100.7:51000".parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        assert_eq!(client_key(&request), "ip:198.51.100.7");
    }

    #[test]
    fn chat_quota_is_twenty_per_user() {
        let user = 9_000_001;
        for _ in 0..CHAT_MAX_MESSAGES {
            assert!(check_chat_quota(user).is_ok());
        }
        let err = check_chat_quota(user).unwrap_err();
        assert_eq!(err.kind, shared_types::AppErrorKind::RateLimited);
        assert!(check_chat_quota(user + 1).is_ok());
    }
}
