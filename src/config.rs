use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::logging::LogLevel;

pub const DEFAULT_IMAGE_NAME: &str = "rollout/roxy:latest";
pub const DEFAULT_CONTAINER_NAME: &str = "roxy-integration-test-server";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: LogLevel,
    pub host: String,
    pub port: u16,
    pub image_name: String,
    pub container_name: String,
    pub container_runtime: String,
    pub container_port: u16,
    pub health_max_attempts: u32,
    pub health_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            host: "localhost".to_string(),
            port: 4444,
            image_name: DEFAULT_IMAGE_NAME.to_string(),
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
            container_runtime: "docker".to_string(),
            container_port: 3333,
            health_max_attempts: 10,
            health_interval: Duration::from_secs(1),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv().is_ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source. Missing keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = lookup("LOG_LEVEL")
            .map(|raw| LogLevel::parse(&raw))
            .unwrap_or(defaults.log_level);

        let health_interval = parse_var(&lookup, "HEALTH_INTERVAL_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.health_interval);

        let request_timeout = parse_var(&lookup, "REQUEST_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Ok(Self {
            log_level,
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            image_name: lookup("IMAGE_NAME").unwrap_or(defaults.image_name),
            container_name: lookup("CONTAINER_NAME").unwrap_or(defaults.container_name),
            container_runtime: lookup("CONTAINER_RUNTIME").unwrap_or(defaults.container_runtime),
            container_port: parse_var(&lookup, "ROXY_CONTAINER_PORT")?
                .unwrap_or(defaults.container_port),
            health_max_attempts: parse_var(&lookup, "HEALTH_MAX_ATTEMPTS")?
                .unwrap_or(defaults.health_max_attempts),
            health_interval,
            request_timeout,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{raw:?}: {e}"),
            }),
    }
}
