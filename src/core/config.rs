//! Client configuration parsing and validation.
//!
//! Configuration is a plain struct, optionally loaded from a TOML file.
//! Validation happens once, before a client is constructed; a bad namespace
//! is a configuration error here, never a per-call failure.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::error::{Error, Result};

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Byte-string prefix confining every key this client touches.
    ///
    /// When absent, keys pass through untranslated (a "plain view").
    #[serde(default)]
    pub namespace: Option<String>,

    /// Default per-call timeout in milliseconds, applied when a call
    /// supplies no explicit timeout.
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    /// Credentials used to authenticate at connection time.
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

/// Initial authentication credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub user: String,
    pub password: String,
}

fn default_timeout_ms() -> u64 {
    120_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            default_timeout_ms: default_timeout_ms(),
            auth: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given namespace and defaults
    /// everywhere else.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::invalid_request(format!(
                "failed to read config {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| Error::invalid_request(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.default_timeout_ms == 0 {
            return Err(Error::invalid_request(
                "default_timeout_ms must be greater than zero",
            ));
        }
        if let Some(ns) = &self.namespace {
            if ns.is_empty() {
                return Err(Error::InvalidNamespace {
                    reason: "namespace must be non-empty when configured".to_string(),
                });
            }
        }
        Ok(())
    }

    /// The default per-call timeout as a duration.
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}
