//! Per-endpoint-family rate limiting for the Datadog API
//!
//! Implements reactive rate limiting that only activates after receiving a 429.
//! Datadog reports the quota of the rate-limit bucket in `X-RateLimit-Limit`
//! and `X-RateLimit-Period`; when present those replace the family default.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::header::HeaderMap;
use tokio::sync::RwLock;

/// Families of API endpoints sharing a rate-limit bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointFamily {
    /// /api/v2/security_monitoring/*
    SecurityMonitoring,
    /// /api/v2/logs/events* (search and list)
    LogsQuery,
    /// /api/v2/logs (intake)
    LogsIntake,
    /// /api/v2/rum/*
    Rum,
    /// /api/v2/audit/*
    Audit,
    /// /api/v2/events*
    Events,
    /// /api/v2/incidents*
    Incidents,
    /// /api/v1/validate
    Validate,
    /// Everything else
    Default,
}

impl EndpointFamily {
    /// All endpoint families for initialization.
    pub const ALL: [EndpointFamily; 9] = [
        EndpointFamily::SecurityMonitoring,
        EndpointFamily::LogsQuery,
        EndpointFamily::LogsIntake,
        EndpointFamily::Rum,
        EndpointFamily::Audit,
        EndpointFamily::Events,
        EndpointFamily::Incidents,
        EndpointFamily::Validate,
        EndpointFamily::Default,
    ];

    /// Categorize a request based on its API path and method.
    pub fn from_request(path: &str, method: &reqwest::Method) -> Self {
        let path = path
            .strip_prefix("/api/v1")
            .or_else(|| path.strip_prefix("/api/v2"))
            .unwrap_or(path);

        if path.starts_with("/security_monitoring") {
            return EndpointFamily::SecurityMonitoring;
        }

        if path.starts_with("/logs/events") {
            return EndpointFamily::LogsQuery;
        }

        if path == "/logs" && *method == reqwest::Method::POST {
            return EndpointFamily::LogsIntake;
        }

        if path.starts_with("/rum") {
            return EndpointFamily::Rum;
        }

        if path.starts_with("/audit") {
            return EndpointFamily::Audit;
        }

        if path == "/events" || path.starts_with("/events/") {
            return EndpointFamily::Events;
        }

        if path.starts_with("/incidents") {
            return EndpointFamily::Incidents;
        }

        if path == "/validate" {
            return EndpointFamily::Validate;
        }

        EndpointFamily::Default
    }

    /// Quota applied when a 429 carries no rate-limit headers.
    pub fn default_quota(&self) -> RateQuota {
        match self {
            EndpointFamily::LogsQuery => RateQuota::new(300, Duration::from_secs(3600)),
            EndpointFamily::LogsIntake => RateQuota::new(500, Duration::from_secs(60)),
            EndpointFamily::Validate => RateQuota::new(60, Duration::from_secs(60)),
            _ => RateQuota::new(1000, Duration::from_secs(60)),
        }
    }
}

/// Number of requests allowed per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuota {
    pub limit: u32,
    pub period: Duration,
}

impl RateQuota {
    pub fn new(limit: u32, period: Duration) -> Self {
        Self { limit, period }
    }

    /// Read `X-RateLimit-Limit` and `X-RateLimit-Period` from a response.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_u64(headers, "x-ratelimit-limit")?;
        let period = header_u64(headers, "x-ratelimit-period")?;
        if limit == 0 || period == 0 {
            return None;
        }
        Some(Self::new(
            u32::try_from(limit).unwrap_or(u32::MAX),
            Duration::from_secs(period),
        ))
    }

    fn to_governor(self) -> Quota {
        let burst = NonZeroU32::new(self.limit).unwrap_or(NonZeroU32::MIN);
        let replenish = self.period / burst.get();
        Quota::with_period(replenish)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst)
    }
}

/// Parse a numeric response header.
pub(crate) fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Rate limiter state for a single endpoint family.
pub struct EndpointRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    active: AtomicBool,
    family: EndpointFamily,
    quota: RateQuota,
}

impl EndpointRateLimiter {
    /// Create an inactive limiter with the family's default quota.
    pub fn new(family: EndpointFamily) -> Self {
        Self::with_quota(family, family.default_quota())
    }

    /// Create an inactive limiter with an explicit quota.
    pub fn with_quota(family: EndpointFamily, quota: RateQuota) -> Self {
        Self {
            limiter: RateLimiter::direct(quota.to_governor()),
            active: AtomicBool::new(false),
            family,
            quota,
        }
    }

    /// Activate rate limiting for this family.
    pub fn activate(&self) {
        let was_active = self.active.swap(true, Ordering::SeqCst);
        if !was_active {
            debug!(
                "Rate limiting activated for {:?} ({} per {:?})",
                self.family, self.quota.limit, self.quota.period
            );
        }
    }

    /// Check if rate limiting is active.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn quota(&self) -> RateQuota {
        self.quota
    }

    /// Wait for permission if rate limiting is active.
    pub async fn wait_if_active(&self) {
        if self.is_active() {
            debug!("Waiting for rate limiter {:?}", self.family);
            self.limiter.until_ready().await;
        }
    }
}

/// Collection of rate limiters for all endpoint families.
pub struct RateLimiterSet {
    limiters: RwLock<HashMap<EndpointFamily, Arc<EndpointRateLimiter>>>,
}

impl Default for RateLimiterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterSet {
    /// Create a new set of inactive rate limiters for all families.
    pub fn new() -> Self {
        let map = EndpointFamily::ALL
            .into_iter()
            .map(|family| (family, Arc::new(EndpointRateLimiter::new(family))))
            .collect();

        Self {
            limiters: RwLock::new(map),
        }
    }

    async fn get(&self, family: EndpointFamily) -> Option<Arc<EndpointRateLimiter>> {
        self.limiters.read().await.get(&family).cloned()
    }

    /// Wait for rate limit permission for a family (if active).
    pub async fn wait_for(&self, family: EndpointFamily) {
        if let Some(limiter) = self.get(family).await {
            limiter.wait_if_active().await;
        }
    }

    /// Activate rate limiting for a family (called on 429).
    ///
    /// A server-reported quota different from the current one replaces the
    /// family's limiter.
    pub async fn activate(&self, family: EndpointFamily, quota: Option<RateQuota>) {
        let mut limiters = self.limiters.write().await;
        let current = limiters.get(&family).map(|l| l.quota());

        if let Some(quota) = quota.filter(|q| current != Some(*q)) {
            limiters.insert(
                family,
                Arc::new(EndpointRateLimiter::with_quota(family, quota)),
            );
        }

        if let Some(limiter) = limiters.get(&family) {
            limiter.activate();
        }
    }

    /// Check whether a family is currently throttled.
    pub async fn is_active(&self, family: EndpointFamily) -> bool {
        self.get(family)
            .await
            .map(|l| l.is_active())
            .unwrap_or(false)
    }

    /// Current quota of a family.
    pub async fn quota(&self, family: EndpointFamily) -> Option<RateQuota> {
        self.get(family).await.map(|l| l.quota())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use reqwest::Method;

    #[test]
    fn test_security_monitoring_paths() {
        assert_eq!(
            EndpointFamily::from_request("/api/v2/security_monitoring/signals", &Method::GET),
            EndpointFamily::SecurityMonitoring
        );
        assert_eq!(
            EndpointFamily::from_request(
                "/api/v2/security_monitoring/signals/abc/state",
                &Method::PATCH
            ),
            EndpointFamily::SecurityMonitoring
        );
    }

    #[test]
    fn test_logs_paths() {
        assert_eq!(
            EndpointFamily::from_request("/api/v2/logs/events/search", &Method::POST),
            EndpointFamily::LogsQuery
        );
        assert_eq!(
            EndpointFamily::from_request("/api/v2/logs/events", &Method::GET),
            EndpointFamily::LogsQuery
        );
        assert_eq!(
            EndpointFamily::from_request("/api/v2/logs", &Method::POST),
            EndpointFamily::LogsIntake
        );
        // GET on the intake path is not the intake
        assert_eq!(
            EndpointFamily::from_request("/api/v2/logs", &Method::GET),
            EndpointFamily::Default
        );
    }

    #[test]
    fn test_other_families() {
        assert_eq!(
            EndpointFamily::from_request("/api/v2/rum/events/search", &Method::POST),
            EndpointFamily::Rum
        );
        assert_eq!(
            EndpointFamily::from_request("/api/v2/audit/events", &Method::GET),
            EndpointFamily::Audit
        );
        assert_eq!(
            EndpointFamily::from_request("/api/v2/events", &Method::GET),
            EndpointFamily::Events
        );
        assert_eq!(
            EndpointFamily::from_request("/api/v2/events/search", &Method::POST),
            EndpointFamily::Events
        );
        assert_eq!(
            EndpointFamily::from_request("/api/v2/incidents/123", &Method::GET),
            EndpointFamily::Incidents
        );
        assert_eq!(
            EndpointFamily::from_request("/api/v1/validate", &Method::GET),
            EndpointFamily::Validate
        );
        assert_eq!(
            EndpointFamily::from_request("/api/v2/eventsx", &Method::GET),
            EndpointFamily::Default
        );
        assert_eq!(
            EndpointFamily::from_request("/api/v2/users", &Method::GET),
            EndpointFamily::Default
        );
    }

    #[test]
    fn test_quota_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(RateQuota::from_headers(&headers), None);

        headers.insert("x-ratelimit-limit", HeaderValue::from_static("120"));
        headers.insert("x-ratelimit-period", HeaderValue::from_static("60"));
        assert_eq!(
            RateQuota::from_headers(&headers),
            Some(RateQuota::new(120, Duration::from_secs(60)))
        );

        headers.insert("x-ratelimit-period", HeaderValue::from_static("0"));
        assert_eq!(RateQuota::from_headers(&headers), None);

        headers.insert("x-ratelimit-period", HeaderValue::from_static("soon"));
        assert_eq!(RateQuota::from_headers(&headers), None);
    }

    #[test]
    fn test_endpoint_rate_limiter_activation() {
        let limiter = EndpointRateLimiter::new(EndpointFamily::Rum);
        assert!(!limiter.is_active());

        limiter.activate();
        assert!(limiter.is_active());

        // Second activation should be idempotent
        limiter.activate();
        assert!(limiter.is_active());
    }

    #[tokio::test]
    async fn test_rate_limiter_set_creation() {
        let set = RateLimiterSet::new();
        for family in EndpointFamily::ALL {
            assert!(!set.is_active(family).await);
            assert_eq!(set.quota(family).await, Some(family.default_quota()));
        }
    }

    #[tokio::test]
    async fn test_activate_with_server_quota() {
        let set = RateLimiterSet::new();
        let quota = RateQuota::new(30, Duration::from_secs(10));

        set.activate(EndpointFamily::Events, Some(quota)).await;

        assert!(set.is_active(EndpointFamily::Events).await);
        assert_eq!(set.quota(EndpointFamily::Events).await, Some(quota));
        assert!(!set.is_active(EndpointFamily::Rum).await);
    }

    #[tokio::test]
    async fn test_inactive_limiter_does_not_wait() {
        let set = RateLimiterSet::new();
        let waited = tokio::time::timeout(
            Duration::from_millis(100),
            set.wait_for(EndpointFamily::LogsQuery),
        )
        .await;
        assert!(waited.is_ok());
    }
}
