//! # Provider Configuration Module
//!
//! This module defines configuration structures for the recipe provider client,
//! including credentials, endpoint settings, operating mode, and recovery settings.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

// Constants for provider configuration
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_RESULT_COUNT: u32 = 10;
pub const PLACEHOLDER_API_KEY: &str = "YOUR_SPOONACULAR_API_KEY";

// Environment variable names
pub const API_KEY_VAR: &str = "SPOONACULAR_API_KEY";
pub const BASE_URL_VAR: &str = "RECIPE_API_BASE_URL";
pub const RESULT_COUNT_VAR: &str = "RECIPE_RESULT_COUNT";
pub const MODE_VAR: &str = "RECIPE_PROVIDER_MODE";
pub const TIMEOUT_VAR: &str = "RECIPE_REQUEST_TIMEOUT_SECS";

/// How the provider client sources its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderMode {
    /// Call the live provider, falling back to the bundled dataset on failure
    #[default]
    Live,
    /// Serve the bundled dataset without touching the network
    Demo,
}

impl FromStr for ProviderMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(ProviderMode::Live),
            "demo" | "offline" => Ok(ProviderMode::Demo),
            other => Err(anyhow::anyhow!("Unknown provider mode: {other}")),
        }
    }
}

impl fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderMode::Live => write!(f, "live"),
            ProviderMode::Demo => write!(f, "demo"),
        }
    }
}

/// Recovery configuration for provider failures
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Consecutive failures before the circuit opens
    pub circuit_breaker_threshold: u32,
    /// Seconds the circuit stays open before calls are attempted again
    pub circuit_breaker_reset_secs: u64,
    /// Optional per-request timeout in seconds; `None` waits indefinitely
    pub request_timeout_secs: Option<u64>,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            circuit_breaker_threshold: 5,
            circuit_breaker_reset_secs: 60, // 1 minute
            request_timeout_secs: None,
        }
    }
}

/// Configuration structure for the recipe provider client
#[derive(Clone)]
pub struct ProviderConfig {
    /// Access credential; `None` means the fallback dataset is always served
    pub api_key: Option<String>,
    /// Provider base URL without trailing slash
    pub base_url: String,
    /// Number of recipes requested from list endpoints
    pub result_count: u32,
    /// Live or demo operation
    pub mode: ProviderMode,
    /// Recovery and error handling configuration
    pub recovery: RecoveryConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            result_count: DEFAULT_RESULT_COUNT,
            mode: ProviderMode::default(),
            recovery: RecoveryConfig::default(),
        }
    }
}

// The credential is never printed.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("result_count", &self.result_count)
            .field("mode", &self.mode)
            .field("recovery", &self.recovery)
            .finish()
    }
}

impl ProviderConfig {
    /// Build a configuration from environment variables
    ///
    /// Unset variables keep their defaults. An empty or placeholder API key is
    /// treated as absent.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default().with_api_key(lookup(API_KEY_VAR));

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().trim_end_matches('/').to_string();
        }

        if let Some(count) = lookup(RESULT_COUNT_VAR) {
            config.result_count = count
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{RESULT_COUNT_VAR} must be a positive integer, got {count:?}"))?;
        }

        if let Some(mode) = lookup(MODE_VAR) {
            config.mode = mode.parse::<ProviderMode>().with_context(|| format!("Invalid {MODE_VAR}"))?;
        }

        if let Some(timeout) = lookup(TIMEOUT_VAR) {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{TIMEOUT_VAR} must be a number of seconds, got {timeout:?}"))?;
            config.recovery.request_timeout_secs = Some(secs);
        }

        Ok(config)
    }

    /// Set the credential, discarding empty values and the placeholder key
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY);
        self
    }

    /// Whether a usable credential is configured
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}
