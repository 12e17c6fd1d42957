//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MS};
use crate::error_log::DEFAULT_LOG_CAPACITY;
use crate::notice::DEFAULT_DISMISS_MS;
use crate::submission::SimulatedSubmitter;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// JSON file backing the durable storage
    pub storage_path: PathBuf,
    /// Maximum number of entries the cache can hold
    pub cache_max_entries: usize,
    /// Default cache TTL in milliseconds
    pub cache_default_ttl_ms: u64,
    /// Probability that a simulated form submission succeeds
    pub submit_success_rate: f64,
    /// Simulated submission latency in milliseconds
    pub submit_latency_ms: u64,
    /// Simulated order processing time in milliseconds
    pub checkout_delay_ms: u64,
    /// Error log records kept before the oldest are dropped
    pub error_log_capacity: usize,
    /// Auto-dismiss delay of notices in milliseconds
    pub notice_dismiss_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STORAGE_PATH` - Storage file (default: ssaldagi_storage.json)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 100)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `SUBMIT_SUCCESS_RATE` - Simulated success probability (default: 0.9)
    /// - `SUBMIT_LATENCY_MS` - Simulated submission latency (default: 1000)
    /// - `CHECKOUT_DELAY_MS` - Simulated order processing time (default: 2000)
    /// - `ERROR_LOG_CAPACITY` - Error log size (default: 100)
    /// - `NOTICE_DISMISS_MS` - Notice auto-dismiss delay (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: var_or("SERVER_PORT", defaults.server_port),
            storage_path: env::var("STORAGE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            cache_max_entries: var_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_default_ttl_ms: var_or("CACHE_DEFAULT_TTL_MS", defaults.cache_default_ttl_ms),
            submit_success_rate: var_or("SUBMIT_SUCCESS_RATE", defaults.submit_success_rate),
            submit_latency_ms: var_or("SUBMIT_LATENCY_MS", defaults.submit_latency_ms),
            checkout_delay_ms: var_or("CHECKOUT_DELAY_MS", defaults.checkout_delay_ms),
            error_log_capacity: var_or("ERROR_LOG_CAPACITY", defaults.error_log_capacity),
            notice_dismiss_ms: var_or("NOTICE_DISMISS_MS", defaults.notice_dismiss_ms),
        }
    }

    pub fn cache_default_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_default_ttl_ms)
    }

    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }
}

/// Parses `name` from the environment, falling back on absence or garbage.
fn var_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            storage_path: PathBuf::from("ssaldagi_storage.json"),
            cache_max_entries: DEFAULT_MAX_ENTRIES,
            cache_default_ttl_ms: DEFAULT_TTL_MS,
            submit_success_rate: SimulatedSubmitter::DEFAULT_SUCCESS_RATE,
            submit_latency_ms: SimulatedSubmitter::DEFAULT_LATENCY.as_millis() as u64,
            checkout_delay_ms: 2000,
            error_log_capacity: DEFAULT_LOG_CAPACITY,
            notice_dismiss_ms: DEFAULT_DISMISS_MS,
        }
    }
}
