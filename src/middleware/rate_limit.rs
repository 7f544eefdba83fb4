//! Rate limiting middleware
//!
//! Per-client request quotas for the write endpoints, keyed by IP address.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota};
use tracing::debug;
use crate::config::RateLimitConfig;
use crate::utils::errors::{SalaryBoardError, Result};
use crate::utils::logging;

/// Keyed token bucket shared by all requests
#[derive(Clone, Debug)]
pub struct RateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    clock: DefaultClock,
}

impl RateLimiter {
    /// Create a limiter allowing `requests_per_minute` with bursts of up to `burst`
    pub fn new(config: &RateLimitConfig) -> Result<Self> {
        let per_minute = NonZeroU32::new(config.requests_per_minute).ok_or_else(|| {
            SalaryBoardError::Config("rate_limit.requests_per_minute must be greater than 0".to_string())
        })?;
        let burst = NonZeroU32::new(config.burst)
            .ok_or_else(|| SalaryBoardError::Config("rate_limit.burst must be greater than 0".to_string()))?;

        let quota = Quota::per_minute(per_minute).allow_burst(burst);
        Ok(Self {
            limiter: Arc::new(governor::RateLimiter::keyed(quota)),
            clock: DefaultClock::default(),
        })
    }

    /// Take one cell for `client`, or report how long to wait
    pub fn check(&self, client: IpAddr) -> Result<()> {
        match self.limiter.check_key(&client) {
            Ok(()) => Ok(()),
            Err(not_until) => {
                let wait = not_until.wait_time_from(self.clock.now());
                // Round up so clients never retry too early.
                let retry_after_secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
                Err(SalaryBoardError::RateLimitExceeded {
                    retry_after_secs: retry_after_secs.max(1),
                })
            }
        }
    }

    /// Forget clients whose buckets are full again
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
        debug!(tracked_clients = self.limiter.len(), "Pruned rate limiter state");
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Client address: the peer address when known, else the first `X-Forwarded-For` hop
pub fn client_ip(connect_info: Option<SocketAddr>, headers: &HeaderMap) -> IpAddr {
    let forwarded = || {
        headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|hop| hop.trim().parse::<IpAddr>().ok())
    };

    connect_info
        .map(|addr| addr.ip())
        .or_else(forwarded)
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Reject requests over the client's quota with 429
pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let connect_info = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    let client = client_ip(connect_info, request.headers());

    if let Err(e) = limiter.check(client) {
        logging::log_rejected_request(&client.to_string(), "rate limit exceeded");
        return Err(e);
    }

    Ok(next.run(request).await)
}
