//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `emuhue.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::Path;

use serde::Deserialize;

use emuhue_adapter_emulated_hue::EmulatedHueConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Emulated Hue discovery settings.
    pub emulated_hue: EmulatedHueConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port; also the advertised port unless overridden.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `emuhue.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("emuhue.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("EMUHUE_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("EMUHUE_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("EMUHUE_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(ip) = var("EMUHUE_ADVERTISE_IP").and_then(|val| val.parse().ok()) {
            self.emulated_hue.advertise_ip = Some(ip);
        }
        if let Some(port) = var("EMUHUE_ADVERTISE_PORT").and_then(|val| val.parse().ok()) {
            self.emulated_hue.advertise_port = Some(port);
        }
        if let Some(val) = var("EMUHUE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.emulated_hue.advertise_port == Some(0) {
            return Err(ConfigError::Validation(
                "advertise_port must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8300,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "emuhued=info,emuhue=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8300);
        assert!(config.emulated_hue.enabled);
        assert!(config.emulated_hue.upnp_bind_multicast);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8300);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 80

            [logging]
            filter = 'debug'

            [emulated_hue]
            host_ip = '192.168.1.10'
            advertise_port = 8080
            upnp_bind_multicast = false

            [emulated_hue.bridge]
            name = 'Office'
            serial = '0017880A0B0C0D0E'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 80);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(
            config.emulated_hue.host_ip,
            Some("192.168.1.10".parse().unwrap())
        );
        assert_eq!(config.emulated_hue.advertise_port, Some(8080));
        assert!(!config.emulated_hue.upnp_bind_multicast);
        assert_eq!(config.emulated_hue.bridge.name, "Office");
        assert_eq!(config.emulated_hue.bridge.serial, "0017880A0B0C0D0E");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 8300);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_advertise_port() {
        let mut config = Config::default();
        config.emulated_hue.advertise_port = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_accept_valid_port() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8300");
    }

    #[test]
    fn should_override_bind_from_env() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("EMUHUE_BIND", "127.0.0.1:9090")]));
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn should_override_advertise_from_env() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[
            ("EMUHUE_ADVERTISE_IP", "10.0.0.5"),
            ("EMUHUE_ADVERTISE_PORT", "80"),
        ]));
        assert_eq!(
            config.emulated_hue.advertise_ip,
            Some("10.0.0.5".parse().unwrap())
        );
        assert_eq!(config.emulated_hue.advertise_port, Some(80));
    }

    #[test]
    fn should_ignore_unparsable_env_port() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("EMUHUE_PORT", "eighty")]));
        assert_eq!(config.server.port, 8300);
    }

    #[test]
    fn should_prefer_rust_log_over_emuhue_log() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("EMUHUE_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
