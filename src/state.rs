//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the pooled HTTP client used to reach the library API and the
//! API base URL.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{ConfigError, HostConfig};

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    /// Library API base URL, without a trailing slash.
    pub upstream: Arc<str>,
}

impl AppState {
    /// Build the state from host config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &HostConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, upstream: Arc::from(config.api_url.as_str()) })
    }
}
