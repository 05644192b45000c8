//! Environment-backed configuration values.
//!
//! Configuration is read once at startup and injected as immutable values;
//! nothing here is consulted again after the server starts.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

const DEFAULT_BASE_URL: &str = "https://www.demonslayer-api.com/api/v1";
const DEFAULT_CHARACTER_ENDPOINT: &str = "/characters";
const DEFAULT_COMBAT_STYLE_ENDPOINT: &str = "/combat-styles";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Failures reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {name}={value:?}: {reason}")]
pub struct ConfigError {
    /// Environment variable name.
    name: &'static str,
    /// Offending value.
    value: String,
    /// Why the value was rejected.
    reason: String,
}

impl ConfigError {
    fn new(name: &'static str, value: &str, reason: impl ToString) -> Self {
        Self {
            name,
            value: value.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Where and how to reach the upstream Demon Slayer API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Upstream base URL, including any path prefix.
    pub base_url: Url,
    /// Paginated character resource path.
    pub character_endpoint: String,
    /// Paginated combat-style resource path.
    pub combat_style_endpoint: String,
    /// Client-wide request timeout. Page 1 of an aggregation inherits only
    /// this; later pages additionally get the aggregator's own deadline.
    pub request_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| {
                // The literal above is a valid URL; parsing it cannot fail.
                unreachable!("default base URL parses")
            }),
            character_endpoint: DEFAULT_CHARACTER_ENDPOINT.to_owned(),
            combat_style_endpoint: DEFAULT_COMBAT_STYLE_ENDPOINT.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl UpstreamConfig {
    /// Read the upstream configuration from the environment, falling back to
    /// the public API defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `DEMONSLAYER_BASE_URL` is not a valid
    /// URL or `DEMONSLAYER_TIMEOUT_SECS` is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_base_url =
            env::var("DEMONSLAYER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let base_url = Url::parse(&raw_base_url)
            .map_err(|error| ConfigError::new("DEMONSLAYER_BASE_URL", &raw_base_url, error))?;

        let character_endpoint = env::var("DEMONSLAYER_CHARACTER_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_CHARACTER_ENDPOINT.to_owned());
        let combat_style_endpoint = env::var("DEMONSLAYER_COMBAT_STYLE_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_COMBAT_STYLE_ENDPOINT.to_owned());

        let raw_timeout = env::var("DEMONSLAYER_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string());
        let timeout_secs: u64 = raw_timeout
            .parse()
            .map_err(|error| ConfigError::new("DEMONSLAYER_TIMEOUT_SECS", &raw_timeout, error))?;
        if timeout_secs == 0 {
            return Err(ConfigError::new(
                "DEMONSLAYER_TIMEOUT_SECS",
                &raw_timeout,
                "timeout must be positive",
            ));
        }

        Ok(Self {
            base_url,
            character_endpoint,
            combat_style_endpoint,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read the server configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `BIND_ADDR` is not a socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw_bind_addr
            .parse()
            .map_err(|error| ConfigError::new("BIND_ADDR", &raw_bind_addr, error))?;
        Ok(Self { bind_addr })
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for default values and rejection paths.

    use super::*;

    #[test]
    fn defaults_point_at_the_public_api() {
        let config = UpstreamConfig::default();
        assert_eq!(
            config.base_url.as_str(),
            "https://www.demonslayer-api.com/api/v1"
        );
        assert_eq!(config.character_endpoint, "/characters");
        assert_eq!(config.combat_style_endpoint, "/combat-styles");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_error_names_the_variable() {
        let error = ConfigError::new("BIND_ADDR", "nonsense", "invalid socket address");
        assert_eq!(
            error.to_string(),
            "invalid BIND_ADDR=\"nonsense\": invalid socket address"
        );
    }
}
