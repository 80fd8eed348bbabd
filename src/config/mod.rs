use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::scoring::ScoringConfig;

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
    pub scoring: ScoringConfig,
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

        let mut scoring = ScoringConfig::default();
        if let Ok(raw) = env::var("SCORING_GRAVE_MULTIPLIER") {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidGraveMultiplier { value: raw.clone() })?;
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidGraveMultiplier { value: raw });
            }
            scoring.grave_multiplier = value;
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring,
        })
    }
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidGraveMultiplier { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidGraveMultiplier { value } => {
                write!(
                    f,
                    "SCORING_GRAVE_MULTIPLIER must be a number in (0, 1], got '{value}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidGraveMultiplier { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("SCORING_GRAVE_MULTIPLIER");
    }

    #[test]
    fn load_uses_defaults_when_env_is_empty() {
        let _lock = env_guard().lock().expect("env guard");
        reset_env();

        let config = AppConfig::load().expect("default config loads");

        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn load_accepts_grave_multiplier_override() {
        let _lock = env_guard().lock().expect("env guard");
        reset_env();
        env::set_var("SCORING_GRAVE_MULTIPLIER", "0.3");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.scoring.grave_multiplier, 0.3);

        reset_env();
    }

    #[test]
    fn load_rejects_out_of_range_grave_multiplier() {
        let _lock = env_guard().lock().expect("env guard");
        reset_env();
        env::set_var("SCORING_GRAVE_MULTIPLIER", "1.5");

        let error = AppConfig::load().expect_err("multiplier above 1.0 rejected");
        assert!(matches!(
            error,
            ConfigError::InvalidGraveMultiplier { .. }
        ));

        reset_env();
    }

    #[test]
    fn socket_addr_resolves_localhost() {
        let server = ServerConfig {
            host: "localhost".to_string(),
            port: 8080,
        };

        let addr = server.socket_addr().expect("localhost resolves");
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn socket_addr_rejects_hostname() {
        let server = ServerConfig {
            host: "not-an-ip".to_string(),
            port: 8080,
        };

        assert!(matches!(
            server.socket_addr(),
            Err(ConfigError::InvalidHost { .. })
        ));
    }
}
