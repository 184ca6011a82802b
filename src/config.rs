//! # Configuration
//!
//! Typed settings loaded from a config file and environment variables.
//!
//! Settings are resolved in order: built-in defaults, an optional config
//! file (TOML), then environment variables with the `PARCELGATE__` prefix
//! (double underscore as section separator, e.g.
//! `PARCELGATE__SERVER__PORT=8080`).

use crate::infrastructure::providers::error::ProviderResult;
use crate::infrastructure::providers::letmeship::LetMeShipAdapter;
use crate::infrastructure::providers::packlink::PacklinkAdapter;
use crate::infrastructure::providers::registry::StaticProviderRegistry;
use crate::infrastructure::providers::traits::ProviderAdapter;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::sync::Arc;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Returns the bind address as `host:port`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Rate aggregation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AggregationSettings {
    /// Overall fan-out timeout in milliseconds.
    pub timeout_ms: u64,
    /// Per-provider timeout in milliseconds.
    pub per_provider_timeout_ms: u64,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            per_provider_timeout_ms: 15000,
        }
    }
}

/// Tracking sweep settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackingSettings {
    /// Interval between sweeps in seconds.
    pub sweep_interval_secs: u64,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            // Once a day.
            sweep_interval_secs: 24 * 60 * 60,
        }
    }
}

/// LetMeShip provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LetMeShipSettings {
    /// Whether the provider participates in rate fan-out.
    pub enabled: bool,
    /// API base URL.
    pub base_url: String,
    /// Basic-auth id.
    pub api_id: String,
    /// Basic-auth password.
    pub api_password: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for LetMeShipSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.letmeship.com/v1".to_string(),
            api_id: String::new(),
            api_password: String::new(),
            timeout_ms: 15000,
        }
    }
}

/// Packlink provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacklinkSettings {
    /// Whether the provider participates in rate fan-out.
    pub enabled: bool,
    /// API base URL.
    pub base_url: String,
    /// API key sent in the `Authorization` header.
    pub api_key: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for PacklinkSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.packlink.com/v1".to_string(),
            api_key: String::new(),
            timeout_ms: 15000,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Rate aggregation settings.
    pub aggregation: AggregationSettings,
    /// Tracking sweep settings.
    pub tracking: TrackingSettings,
    /// LetMeShip provider settings.
    pub letmeship: LetMeShipSettings,
    /// Packlink provider settings.
    pub packlink: PacklinkSettings,
}

impl AppConfig {
    /// Loads the configuration.
    ///
    /// The config file is optional; environment variables override file
    /// values.
    ///
    /// # Errors
    ///
    /// Returns a `config::ConfigError` if a source cannot be read or the
    /// resolved values do not deserialize.
    pub fn load(config_file: &str) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(File::with_name(config_file).required(false))
            .add_source(Environment::with_prefix("PARCELGATE").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Builds the provider registry from the enabled provider settings.
    ///
    /// # Errors
    ///
    /// Returns a provider error if an enabled adapter cannot be
    /// constructed.
    pub fn build_registry(&self) -> ProviderResult<StaticProviderRegistry> {
        let mut providers: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

        if self.letmeship.enabled {
            providers.push(Arc::new(LetMeShipAdapter::new(
                self.letmeship.base_url.clone(),
                self.letmeship.api_id.clone(),
                self.letmeship.api_password.clone(),
                self.letmeship.timeout_ms,
            )?));
        }
        if self.packlink.enabled {
            providers.push(Arc::new(PacklinkAdapter::new(
                self.packlink.base_url.clone(),
                self.packlink.api_key.clone(),
                self.packlink.timeout_ms,
            )?));
        }

        Ok(StaticProviderRegistry::new(providers))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_all_providers() {
        let config = AppConfig::default();
        assert!(!config.letmeship.enabled);
        assert!(!config.packlink.enabled);
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.tracking.sweep_interval_secs, 86400);
    }

    #[test]
    fn registry_contains_only_enabled_providers() {
        let mut config = AppConfig::default();
        config.packlink.enabled = true;
        config.packlink.api_key = "key".to_string();

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 8080

                [letmeship]
                enabled = true
                api_id = "id"
                api_password = "secret"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(config.letmeship.enabled);
        assert_eq!(config.letmeship.base_url, "https://api.letmeship.com/v1");
        assert!(!config.packlink.enabled);
    }
}
