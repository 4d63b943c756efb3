//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file, applies port
//! overrides from the hosting environment and the command line, and defines
//! the constants shared by the rest of the service. `AppConfig` is the root
//! configuration struct; every key in it has a default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use const_format::formatcp;
use serde::Deserialize;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Config file next to the working directory (development checkouts)
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Config file installed by the deb/rpm packages
pub const SYSTEM_CONFIG_PATH: &str = "/etc/pipeline-demo.toml";

/// Files tried in order when no --config is given; the first that exists wins
pub const CONFIG_SEARCH_PATHS: &[&str] = &[DEFAULT_CONFIG_PATH, SYSTEM_CONFIG_PATH];

/// Tracing target of this crate, used to build the default filter
pub const LOG_TARGET: &str = "pipeline_demo";

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=info", LOG_TARGET);

/// Environment variable through which the hosting platform may pick the port
pub const PORT_ENV_VAR: &str = "SERVER_PORT";

// =============================================================================
// HTTP Listener Defaults
// =============================================================================

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 8080;

/// Grace period for in-flight requests once shutdown starts
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Cache-Control value for the liveness probe
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    /// Must be an IP literal; hostnames fail to parse
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: IpAddr,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Seconds to let in-flight requests finish after a shutdown signal
    #[serde(default = "HttpServerConfig::default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_timeout_seconds: Self::default_shutdown_timeout(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> IpAddr {
        DEFAULT_HOST
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    fn default_shutdown_timeout() -> u64 {
        DEFAULT_SHUTDOWN_TIMEOUT_SECS
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    /// Load a configuration file. The file must exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load the first file in `candidates` that exists.
    ///
    /// Returns the built-in defaults and `None` when none of them exist. A file
    /// that exists but fails to read or parse is an error, not skipped.
    pub fn discover<P: AsRef<Path>>(
        candidates: &[P],
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match candidates.iter().map(AsRef::<Path>::as_ref).find(|p| p.is_file()) {
            Some(path) => Ok((Self::load(path)?, Some(path.to_path_buf()))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Apply port overrides with priority: CLI > environment > file.
    ///
    /// `env_port` is the raw value of [`PORT_ENV_VAR`], if set.
    pub fn apply_port_overrides(
        &mut self,
        env_port: Option<&str>,
        cli_port: Option<u16>,
    ) -> Result<(), ConfigError> {
        if let Some(raw) = env_port {
            self.http.port = raw.trim().parse().map_err(|_| {
                ConfigError::Validation(format!(
                    "{} must be a port number, got '{}'",
                    PORT_ENV_VAR, raw
                ))
            })?;
        }

        if let Some(port) = cli_port {
            self.http.port = port;
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.http.host, DEFAULT_HOST);
        assert_eq!(config.http.port, DEFAULT_PORT);
        assert_eq!(
            config.http.shutdown_timeout(),
            Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS)
        );
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn partial_section_fills_missing_keys() {
        let config = AppConfig::from_toml_str("[http]\nport = 9000\n").unwrap();
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.host, DEFAULT_HOST);
    }

    #[test]
    fn json_log_format() {
        let config = AppConfig::from_toml_str("[logging]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = AppConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn hostname_is_rejected() {
        let err = AppConfig::from_toml_str("[http]\nhost = \"localhost\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn ipv6_host_is_accepted() {
        let config = AppConfig::from_toml_str("[http]\nhost = \"::1\"\nport = 8081\n").unwrap();
        assert_eq!(config.http.socket_addr(), "[::1]:8081".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn discover_prefers_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("local.toml");
        let system = dir.path().join("system.toml");
        std::fs::write(&system, "[http]\nport = 7000\n").unwrap();

        let (config, source) = AppConfig::discover(&[&local, &system]).unwrap();
        assert_eq!(config.http.port, 7000);
        assert_eq!(source.as_deref(), Some(system.as_path()));

        std::fs::write(&local, "[http]\nport = 7001\n").unwrap();
        let (config, source) = AppConfig::discover(&[&local, &system]).unwrap();
        assert_eq!(config.http.port, 7001);
        assert_eq!(source.as_deref(), Some(local.as_path()));
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) =
            AppConfig::discover(&[dir.path().join("a.toml"), dir.path().join("b.toml")]).unwrap();
        assert!(source.is_none());
        assert_eq!(config.http.port, DEFAULT_PORT);
    }

    #[test]
    fn discover_reports_broken_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[http\n").unwrap();

        let err = AppConfig::discover(&[broken]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn packaged_config_path_is_searched() {
        assert_eq!(CONFIG_SEARCH_PATHS.last(), Some(&SYSTEM_CONFIG_PATH));
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config =
            AppConfig::from_toml_str("[http]\nhost = \"127.0.0.1\"\nport = 3000\n").unwrap();
        assert_eq!(
            config.http.socket_addr(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\nport = 4321").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.port, 4321);
    }

    #[test]
    fn load_reports_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http\nport = ").unwrap();

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn shipped_default_config_matches_builtin_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let config = AppConfig::load(path).unwrap();
        assert_eq!(config.http.host, DEFAULT_HOST);
        assert_eq!(config.http.port, DEFAULT_PORT);
        assert_eq!(config.http.shutdown_timeout_seconds, DEFAULT_SHUTDOWN_TIMEOUT_SECS);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn load_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn cli_port_beats_env_port() {
        let mut config = AppConfig::default();
        config.apply_port_overrides(Some("9001"), Some(9002)).unwrap();
        assert_eq!(config.http.port, 9002);
    }

    #[test]
    fn env_port_beats_file_port() {
        let mut config = AppConfig::from_toml_str("[http]\nport = 9000\n").unwrap();
        config.apply_port_overrides(Some(" 9001 "), None).unwrap();
        assert_eq!(config.http.port, 9001);
    }

    #[test]
    fn no_overrides_keep_file_port() {
        let mut config = AppConfig::from_toml_str("[http]\nport = 9000\n").unwrap();
        config.apply_port_overrides(None, None).unwrap();
        assert_eq!(config.http.port, 9000);
    }

    #[test]
    fn invalid_env_port_is_rejected() {
        let mut config = AppConfig::default();
        let err = config.apply_port_overrides(Some("eighty"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
