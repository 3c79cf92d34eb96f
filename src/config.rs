use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DB_NAME: &str = "simple-api-with-mongodb";
/// Bound on every store call made while serving a request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Grace period granted to in-flight requests once shutdown starts.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub timeouts: TimeoutConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("unknown store backend {:?} (expected \"mongodb\" or \"memory\")", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

impl DatabaseConfig {
    /// Connection string; credentials authenticate against the database named after the user.
    pub fn connection_uri(&self) -> String {
        format!(
            "mongodb://{}:{}@{}:{}/?authSource={}",
            self.username, self.password, self.host, self.port, self.username
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub request: Duration,
    pub shutdown: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup, falling back to defaults
    /// for unset keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database: DatabaseConfig {
                backend: parse_var(&lookup, "DB_BACKEND", StoreBackend::MongoDb)?,
                username: var("DB_USERNAME", "admin"),
                password: var("DB_PASSWORD", "secret"),
                host: var("DB_HOST", "localhost"),
                port: parse_var(&lookup, "DB_PORT", 27017)?,
                name: var("DB_NAME", DEFAULT_DB_NAME),
            },
            server: ServerConfig {
                host: var("SERVER_HOST", "0.0.0.0"),
                port: parse_var(&lookup, "SERVER_PORT", 8080)?,
            },
            timeouts: TimeoutConfig {
                request: parse_var(&lookup, "REQUEST_TIMEOUT_SECS", REQUEST_TIMEOUT.as_secs())
                    .map(Duration::from_secs)?,
                shutdown: parse_var(&lookup, "SHUTDOWN_TIMEOUT_SECS", SHUTDOWN_TIMEOUT.as_secs())
                    .map(Duration::from_secs)?,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| anyhow::anyhow!("{}", e))
            .with_context(|| format!("invalid value {:?} for {}", raw, key)),
        None => Ok(default),
    }
}
