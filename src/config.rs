//! Process Configuration
//!
//! Configuration is read once at process start. Defaults are overridden by
//! environment variables:
//! - `SHOPIFY_STORE` – storefront hostname, e.g. `my-shop.myshopify.com`
//! - `SHOPIFY_MCP_ENDPOINT` – full upstream URL (takes precedence over the store)
//! - `API_TIMEOUT_IN_SECONDS` – upstream request timeout
//! - `LOG_LEVEL` / `LOG_FORMAT` – tracing level and output format
//!   (`FASTMCP_LOG_LEVEL` is read when `LOG_LEVEL` is unset)
//! - `HOST` / `PORT` – listen address

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    /// Listen address of the MCP server
    pub server: ServerConfig,

    /// Upstream storefront settings
    pub shopify: ShopifyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9300,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

/// Upstream storefront configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ShopifyConfig {
    /// Storefront hostname
    pub store: Option<String>,

    /// Explicit upstream URL; wins over `store` when set
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ShopifyConfig {
    fn default() -> Self {
        Self {
            store: None,
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

impl ShopifyConfig {
    /// Resolves the URL every tool call is POSTed to.
    pub fn endpoint_url(&self) -> Result<String> {
        if let Some(endpoint) = self.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
            return Ok(endpoint.to_string());
        }
        match self.store.as_deref().map(str::trim) {
            Some(store) if !store.is_empty() => Ok(format!("https://{store}/api/mcp")),
            _ => anyhow::bail!("SHOPIFY_STORE or SHOPIFY_MCP_ENDPOINT must be set"),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Config {
    /// Builds the configuration from defaults plus the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration does not validate.
    pub fn from_env() -> Result<Self> {
        let config = Self::default().with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    ///
    /// Numeric values that fail to parse leave the current value in place.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(store) = lookup("SHOPIFY_STORE") {
            self.shopify.store = Some(store);
        }
        if let Some(endpoint) = lookup("SHOPIFY_MCP_ENDPOINT") {
            self.shopify.endpoint = Some(endpoint);
        }
        if let Some(timeout) = lookup("API_TIMEOUT_IN_SECONDS") {
            if let Ok(timeout) = timeout.trim().parse::<u64>() {
                self.shopify.timeout_secs = timeout;
            }
        }

        if let Some(level) = lookup("LOG_LEVEL").or_else(|| lookup("FASTMCP_LOG_LEVEL")) {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            if let Ok(port) = port.trim().parse::<u16>() {
                self.server.port = port;
            }
        }

        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        self.shopify.endpoint_url()?;

        if self.shopify.timeout_secs == 0 {
            anyhow::bail!("API timeout must be > 0 seconds");
        }

        self.log_level()?;

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" | "compact" => {}
            _ => anyhow::bail!(
                "Invalid log format: {}. Must be one of: json, pretty, compact",
                self.logging.format
            ),
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        Ok(())
    }

    /// Convert log level string to tracing::Level
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging.level.to_lowercase().parse().map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            )
        })
    }
}
