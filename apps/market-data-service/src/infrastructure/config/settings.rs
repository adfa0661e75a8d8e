//! Service Configuration Settings
//!
//! Configuration types for the market data service, loaded from environment
//! variables. A `.env` file is read by the binary before this runs.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::infrastructure::telemetry::{
    DEFAULT_OTLP_ENDPOINT, DEFAULT_SERVICE_NAME, LogFormat, TelemetryConfig,
};

/// HTTP server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerSettings {
    /// Bind address.
    pub host: IpAddr,
    /// HTTP port.
    pub port: u16,
}

impl ServerSettings {
    /// Socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Logging and OTLP export settings.
    pub telemetry: TelemetryConfig,
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `HOST` is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `HOST` is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServerSettings::default();
        let server = ServerSettings {
            host: parse_var(&lookup, "HOST", defaults.host)?,
            port: parse_var(&lookup, "PORT", defaults.port)?,
        };

        let telemetry = TelemetryConfig {
            enabled: lookup("ENABLE_TELEMETRY").is_some_and(|v| parse_flag(&v)),
            otlp_endpoint: non_empty(&lookup, "OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_OTLP_ENDPOINT.to_string()),
            service_name: non_empty(&lookup, "OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            log_format: lookup("LOG_FORMAT")
                .map(|s| LogFormat::from_str_case_insensitive(&s))
                .unwrap_or_default(),
        };

        Ok(Self { server, telemetry })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable is set to a value that cannot be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match non_empty(lookup, key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}
