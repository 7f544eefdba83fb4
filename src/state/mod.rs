//! Shared application state
//!
//! Everything a request handler needs, cloned cheaply into each request.

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::middleware::RateLimiter;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct AppState {
    pub services: ServiceFactory,
    pub database: DatabaseService,
    /// `None` when rate limiting is disabled
    pub rate_limiter: Option<RateLimiter>,
}

impl AppState {
    pub fn new(database: DatabaseService, settings: &Settings) -> Result<Self> {
        let services = ServiceFactory::new(&database, settings)?;
        let rate_limiter = if settings.rate_limit.enabled {
            Some(RateLimiter::new(&settings.rate_limit)?)
        } else {
            None
        };

        Ok(Self {
            services,
            database,
            rate_limiter,
        })
    }
}
