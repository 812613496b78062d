use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::estimation::{YieldModelConfig, DEFAULT_STORAGE_KEY};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub estimation: EstimationSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let model_path = env::var("APP_YIELD_MODEL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let storage_key = env::var("APP_STORAGE_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            estimation: EstimationSettings {
                model_path,
                storage_key,
            },
        })
    }

    /// Model tables for the estimator: the stock defaults unless a JSON
    /// override is configured.
    pub fn yield_model(&self) -> Result<YieldModelConfig, ConfigError> {
        match &self.estimation.model_path {
            Some(path) => load_model_file(path),
            None => Ok(YieldModelConfig::default()),
        }
    }
}

fn load_model_file(path: &Path) -> Result<YieldModelConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ModelFile {
        path: path.to_path_buf(),
        source,
    })?;
    let model: YieldModelConfig =
        serde_json::from_str(&raw).map_err(|source| ConfigError::ModelFormat {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(model.sanitized())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the yield model comes from and where the last input is cached.
#[derive(Debug, Clone)]
pub struct EstimationSettings {
    pub model_path: Option<PathBuf>,
    pub storage_key: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    ModelFile {
        path: PathBuf,
        source: std::io::Error,
    },
    ModelFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::ModelFile { path, .. } => {
                write!(f, "APP_YIELD_MODEL file {} could not be read", path.display())
            }
            ConfigError::ModelFormat { path, source } => write!(
                f,
                "APP_YIELD_MODEL file {} is not a valid yield model: {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::ModelFile { source, .. } => Some(source),
            ConfigError::ModelFormat { source, .. } => Some(source),
        }
    }
}
