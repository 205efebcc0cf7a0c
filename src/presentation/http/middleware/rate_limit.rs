// src/presentation/http/middleware/rate_limit.rs
use crate::config::RateLimitConfig;
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::time::Duration;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

pub type AuthRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Time for one request of the quota to be replenished.
fn replenish_period(limit: RateLimitConfig) -> Duration {
    Duration::from_secs(1) / limit.per_second.get()
}

/// Per-client-IP limiter for the auth endpoints: `per_second` requests a
/// second on average with bursts of up to `burst`. `None` when the quota is
/// rejected by the governor builder.
pub fn rate_limit_layer(limit: RateLimitConfig) -> Option<AuthRateLimitLayer> {
    let mut builder = GovernorConfigBuilder::default();
    builder.period(replenish_period(limit));
    builder.burst_size(limit.burst.get());
    let config = builder.key_extractor(SmartIpKeyExtractor).finish()?;

    Some(GovernorLayer::new(config))
}
