//! Client configuration resolved from an explicit endpoint or the environment.

use std::time::Duration;

use crate::error::ConfigError;
use crate::transport::DEFAULT_TIMEOUT;

/// Environment variable consulted when no endpoint is given explicitly.
pub const ENDPOINT_ENV: &str = "DEVOPS_ENDPOINT";

/// How `get` resolves a single engineer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineerLookup {
    /// List the whole collection and scan for the id. O(n) per lookup; the
    /// production service has no `GET /engineers/{id}`.
    #[default]
    ListScan,
    /// Use `GET /engineers/{id}` directly.
    ItemGet,
}

/// Read-only settings a `DevOpsClient` is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub engineer_lookup: EngineerLookup,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            engineer_lookup: EngineerLookup::default(),
        }
    }

    /// Resolve the endpoint from `explicit`, falling back to `DEVOPS_ENDPOINT`.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ConfigError> {
        let from_env = std::env::var(ENDPOINT_ENV).ok();
        Self::resolve_from(explicit, from_env.as_deref())
    }

    /// Same as `resolve` with the environment value passed in. An explicit
    /// value wins over the environment even when blank, and a blank result is
    /// reported as missing.
    pub fn resolve_from(explicit: Option<&str>, from_env: Option<&str>) -> Result<Self, ConfigError> {
        let endpoint = explicit
            .or(from_env)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingEndpoint(ENDPOINT_ENV))?;

        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
        }
        Ok(Self::new(endpoint))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_engineer_lookup(mut self, lookup: EngineerLookup) -> Self {
        self.engineer_lookup = lookup;
        self
    }
}
