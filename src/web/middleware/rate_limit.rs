//! Rate limiting middleware.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::{net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};

use crate::web::error::ApiError;

/// Per-IP rate limiter using Governor.
pub type IpRateLimiter = DefaultKeyedRateLimiter<String>;

/// State for rate limiting.
pub struct RateLimitState {
    /// Per-IP limiter for the login endpoint.
    login: IpRateLimiter,
    /// Per-IP limiter for the rest of the API.
    api: IpRateLimiter,
}

fn per_minute(requests: u32) -> Quota {
    Quota::per_minute(NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN))
}

impl RateLimitState {
    /// Create a new rate limit state (requests per minute).
    pub fn new(login_rate_limit: u32, api_rate_limit: u32) -> Self {
        Self {
            login: RateLimiter::keyed(per_minute(login_rate_limit)),
            api: RateLimiter::keyed(per_minute(api_rate_limit)),
        }
    }

    /// Check if a request is allowed for the login endpoint.
    pub fn check_login(&self, ip: &str) -> bool {
        self.login.check_key(&ip.to_string()).is_ok()
    }

    /// Check if a request is allowed for the general API.
    pub fn check_api(&self, ip: &str) -> bool {
        self.api.check_key(&ip.to_string()).is_ok()
    }

    /// Drop state for clients whose quota has fully replenished.
    pub fn cleanup(&self) {
        self.login.retain_recent();
        self.api.retain_recent();
    }

    /// Start a background task to periodically clean up old entries.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(300));
            interval.tick().await;
            loop {
                interval.tick().await;
                self.cleanup();
            }
        });
    }
}

/// Extract client IP from request.
fn client_ip(req: &Request<Body>) -> String {
    // X-Forwarded-For first (reverse proxy), first hop only
    if let Some(ip) = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
    {
        return ip.trim().to_string();
    }

    if let Some(real_ip) = req
        .headers()
        .get("X-Real-IP")
        .and_then(|v| v.to_str().ok())
    {
        return real_ip.trim().to_string();
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

/// Rate limiting middleware for the login endpoint.
pub async fn login_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&req);

    if !state.check_login(&ip) {
        tracing::warn!(ip = %ip, "Login rate limit exceeded");
        return ApiError::too_many_requests("Too many login attempts. Please try again later.")
            .into_response();
    }

    next.run(req).await
}

/// Rate limiting middleware for the general API.
pub async fn api_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&req);

    if !state.check_api(&ip) {
        tracing::warn!(ip = %ip, "API rate limit exceeded");
        return ApiError::too_many_requests("Too many requests. Please try again later.")
            .into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rate_limit() {
        let state = RateLimitState::new(3, 100);

        assert!(state.check_login("127.0.0.1"));
        assert!(state.check_login("127.0.0.1"));
        assert!(state.check_login("127.0.0.1"));
        assert!(!state.check_login("127.0.0.1"));

        // Different IP has its own quota
        assert!(state.check_login("192.168.1.1"));
    }

    #[test]
    fn test_api_rate_limit_is_separate() {
        let state = RateLimitState::new(1, 2);

        assert!(state.check_login("127.0.0.1"));
        assert!(!state.check_login("127.0.0.1"));

        assert!(state.check_api("127.0.0.1"));
        assert!(state.check_api("127.0.0.1"));
        assert!(!state.check_api("127.0.0.1"));
    }

    #[test]
    fn test_zero_limit_allows_one() {
        let state = RateLimitState::new(0, 0);
        assert!(state.check_login("10.0.0.1"));
        assert!(!state.check_login("10.0.0.1"));
    }

    #[test]
    fn test_client_ip_from_forwarded_header() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&req), "203.0.113.7");

        let req = Request::builder()
            .header("X-Real-IP", "198.51.100.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&req), "198.51.100.2");

        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&req), "unknown");
    }
}
