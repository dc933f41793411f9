//! Application State
//!
//! Shared state accessible by all API handlers.
//! Everything in it is immutable, so handlers share it through `Arc` without
//! locking.

use crate::engine::QueryEngine;
use crate::resolver::PersonResolvers;
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable record store
    pub store: Arc<RecordStore>,
    /// Execution engine bound to the person resolvers
    pub engine: Arc<QueryEngine>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Wall-clock start time reported by /health
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state serving the person resolvers over `store`
    pub fn new(store: Arc<RecordStore>, config: ApiConfig) -> Self {
        let resolvers = PersonResolvers::new(Arc::clone(&store));
        let engine = Arc::new(QueryEngine::new(Arc::new(resolvers)));

        Self {
            store,
            engine,
            config: Arc::new(config),
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Indent JSON responses
    pub pretty: bool,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            pretty: true,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<&crate::config::ApiConfig> for ApiConfig {
    fn from(file: &crate::config::ApiConfig) -> Self {
        Self {
            host: file.host.clone(),
            port: file.port,
            pretty: file.pretty,
            max_body_size: file.max_body_size,
        }
    }
}
