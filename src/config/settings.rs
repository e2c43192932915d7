//! Configuration settings structure
//!
//! Defines the settings tree for the relay and its loading logic. Sources are
//! environment variables, an optional TOML file and built-in defaults; the
//! [`ConfigLoader`](crate::config::ConfigLoader) combines them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// Helper functions for serde defaults
fn default_host() -> String {
    "::".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    120
}

fn default_poll_attempts() -> u32 {
    50
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_user_agent() -> String {
    concat!("graph-page-relay/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// Duration serialization module
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Main configuration settings for the relay
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerSettings,
    /// Graph API configuration
    #[serde(default)]
    pub graph: GraphSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout duration
    #[serde(with = "duration_secs", default = "default_timeout")]
    pub timeout: Duration,
}

/// Outbound Graph API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSettings {
    /// Graph API base URL (overridden in tests to point at a mock server)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Request timeout in seconds; reel uploads push whole videos, keep generous
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// How many times to probe a media container's processing status
    #[serde(default = "default_poll_attempts")]
    pub status_poll_attempts: u32,
    /// Delay before each status probe
    #[serde(with = "duration_secs", default = "default_poll_interval")]
    pub status_poll_interval: Duration,
    /// User agent string for outbound requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout: default_timeout(),
        }
    }
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            status_poll_attempts: default_poll_attempts(),
            status_poll_interval: default_poll_interval(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
        }
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables
    ///
    /// `PORT` is the historical variable for the listen port;
    /// `RELAY_SERVER_PORT` wins when both are set.
    pub fn from_env() -> crate::Result<Self> {
        let mut settings = Self::default();

        // Load server settings
        if let Ok(host) = std::env::var("RELAY_SERVER_HOST") {
            settings.server.host = host;
        }

        if let Ok(port) = std::env::var("PORT") {
            settings.server.port = port
                .parse()
                .map_err(|e| crate::Error::config("PORT", format!("Invalid port: {}", e)))?;
        }

        if let Ok(port) = std::env::var("RELAY_SERVER_PORT") {
            settings.server.port = port.parse().map_err(|e| {
                crate::Error::config("RELAY_SERVER_PORT", format!("Invalid port: {}", e))
            })?;
        }

        // Load Graph API settings
        if let Ok(base_url) = std::env::var("GRAPH_BASE_URL") {
            settings.graph.base_url = base_url;
        }

        if let Ok(attempts) = std::env::var("GRAPH_POLL_ATTEMPTS") {
            settings.graph.status_poll_attempts = attempts.parse().map_err(|e| {
                crate::Error::config("GRAPH_POLL_ATTEMPTS", format!("Invalid attempts: {}", e))
            })?;
        }

        if let Ok(interval) = std::env::var("GRAPH_POLL_INTERVAL") {
            let secs: u64 = interval.parse().map_err(|e| {
                crate::Error::config("GRAPH_POLL_INTERVAL", format!("Invalid interval: {}", e))
            })?;
            settings.graph.status_poll_interval = Duration::from_secs(secs);
        }

        // Load logging settings
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            settings.logging.level = level;
        }

        if let Ok(verbose) = std::env::var("VERBOSE") {
            settings.logging.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(settings)
    }

    /// Load settings from configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge settings with environment variable overrides
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        let env_settings = Self::from_env()?;
        let defaults = Self::default();

        // Merge only non-default values from environment
        if env_settings.server.host != defaults.server.host {
            self.server.host = env_settings.server.host;
        }

        if env_settings.server.port != defaults.server.port {
            self.server.port = env_settings.server.port;
        }

        if env_settings.graph.base_url != defaults.graph.base_url {
            self.graph.base_url = env_settings.graph.base_url;
        }

        if env_settings.graph.status_poll_attempts != defaults.graph.status_poll_attempts {
            self.graph.status_poll_attempts = env_settings.graph.status_poll_attempts;
        }

        if env_settings.graph.status_poll_interval != defaults.graph.status_poll_interval {
            self.graph.status_poll_interval = env_settings.graph.status_poll_interval;
        }

        if env_settings.logging.level != defaults.logging.level {
            self.logging.level = env_settings.logging.level;
        }

        if env_settings.logging.verbose {
            self.logging.verbose = true;
        }

        Ok(self)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(crate::Error::config(
                "port",
                "Invalid server port: cannot be 0",
            ));
        }

        if self.graph.status_poll_attempts == 0 {
            return Err(crate::Error::config(
                "status_poll_attempts",
                "Invalid poll attempts: cannot be 0",
            ));
        }

        if self.graph.request_timeout == 0 {
            return Err(crate::Error::config(
                "request_timeout",
                "Invalid request timeout: cannot be 0",
            ));
        }

        match url::Url::parse(&self.graph.base_url) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
            Ok(parsed) => {
                return Err(crate::Error::config(
                    "base_url",
                    format!("Unsupported URL scheme '{}'", parsed.scheme()),
                ));
            }
            Err(e) => {
                return Err(crate::Error::config(
                    "base_url",
                    format!("Invalid base URL '{}': {}", self.graph.base_url, e),
                ));
            }
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        Ok(())
    }
}
