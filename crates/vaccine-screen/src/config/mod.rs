use crate::workflows::assessment::{EligibilityConfig, RuleTable};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub eligibility: EligibilityConfig,
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
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat(raw))?,
            Err(_) => LogFormat::Compact,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            eligibility: load_eligibility()?,
        })
    }
}

fn load_eligibility() -> Result<EligibilityConfig, ConfigError> {
    let defaults = EligibilityConfig::default();

    let rule_table = match env::var("APP_RULE_TABLE") {
        Ok(raw) => RuleTable::parse(&raw).ok_or(ConfigError::InvalidRuleTable(raw))?,
        Err(_) => defaults.rule_table,
    };
    let minimum_age = age_var("APP_MINIMUM_AGE", defaults.minimum_age)?;
    let maximum_age = age_var("APP_MAXIMUM_AGE", defaults.maximum_age)?;

    if minimum_age > maximum_age {
        return Err(ConfigError::InvertedAgeRange {
            minimum: minimum_age,
            maximum: maximum_age,
        });
    }

    Ok(EligibilityConfig {
        rule_table,
        minimum_age,
        maximum_age,
    })
}

fn age_var(name: &'static str, default: u8) -> Result<u8, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u8>()
            .map_err(|_| ConfigError::InvalidAge { name }),
        Err(_) => Ok(default),
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat(String),
    InvalidRuleTable(String),
    InvalidAge { name: &'static str },
    InvertedAgeRange { minimum: u8, maximum: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'pretty', found '{value}'")
            }
            ConfigError::InvalidRuleTable(value) => {
                write!(f, "APP_RULE_TABLE must be 'extended' or 'minimal', found '{value}'")
            }
            ConfigError::InvalidAge { name } => {
                write!(f, "{name} must be a whole number of years between 0 and 255")
            }
            ConfigError::InvertedAgeRange { minimum, maximum } => write!(
                f,
                "APP_MINIMUM_AGE ({minimum}) must not exceed APP_MAXIMUM_AGE ({maximum})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
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
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "APP_RULE_TABLE",
            "APP_MINIMUM_AGE",
            "APP_MAXIMUM_AGE",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert_eq!(config.eligibility, EligibilityConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_eligibility_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_RULE_TABLE", "Minimal");
        env::set_var("APP_MINIMUM_AGE", "6");
        env::set_var("APP_MAXIMUM_AGE", "60");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.eligibility.rule_table, RuleTable::Minimal);
        assert_eq!(config.eligibility.minimum_age, 6);
        assert_eq!(config.eligibility.maximum_age, 60);
        reset_env();
    }

    #[test]
    fn rejects_unknown_rule_table() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_RULE_TABLE", "lenient");
        let err = AppConfig::load().expect_err("unknown rule table rejected");
        assert!(matches!(err, ConfigError::InvalidRuleTable(ref value) if value == "lenient"));
        reset_env();
    }

    #[test]
    fn rejects_inverted_age_range() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_MINIMUM_AGE", "50");
        env::set_var("APP_MAXIMUM_AGE", "45");
        let err = AppConfig::load().expect_err("inverted range rejected");
        assert!(matches!(
            err,
            ConfigError::InvertedAgeRange {
                minimum: 50,
                maximum: 45
            }
        ));
        reset_env();
    }
}
