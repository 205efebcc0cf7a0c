// src/presentation/http/state.rs
use crate::application::{ports::health::HealthCheck, services::ApplicationServices};
use crate::config::RateLimitConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub health: Arc<dyn HealthCheck>,
    /// CORS origins; empty or a single `*` allows any origin.
    pub allowed_origins: Arc<[String]>,
    pub auth_rate_limit: RateLimitConfig,
}

impl HttpState {
    pub fn new(services: Arc<ApplicationServices>, health: Arc<dyn HealthCheck>) -> Self {
        Self {
            services,
            health,
            allowed_origins: Arc::from(Vec::new()),
            auth_rate_limit: RateLimitConfig::default(),
        }
    }

    #[must_use]
    pub fn with_allowed_origins(mut self, origins: &[String]) -> Self {
        self.allowed_origins = Arc::from(origins.to_vec());
        self
    }

    #[must_use]
    pub fn with_auth_rate_limit(mut self, limit: RateLimitConfig) -> Self {
        self.auth_rate_limit = limit;
        self
    }
}
