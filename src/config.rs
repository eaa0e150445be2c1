use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dotenv::dotenv;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://neonrpm.db";
const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_TEMPLATE_DIR: &str = "templates";
// 100 years. Keeps expiry timestamps and cookie Max-Age representable.
const MAX_SESSION_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_address: String,
    pub template_dir: PathBuf,
    /// `None` keeps sessions until logout.
    pub session_ttl: Option<Duration>,
}

impl Config {
    /// Reads the process environment after loading `.env`, if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            server_address: var("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            template_dir: var("TEMPLATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR)),
            session_ttl: parse_session_ttl(var("SESSION_TTL_SECS"))?,
        })
    }
}

// Unset, `never` and `0` all disable expiry.
fn parse_session_ttl(raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.eq_ignore_ascii_case("never") {
        return Ok(None);
    }

    match value.parse::<u64>() {
        Ok(0) => Ok(None),
        Ok(secs) if secs <= MAX_SESSION_TTL_SECS => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::Invalid {
            key: "SESSION_TTL_SECS",
            value: raw,
        }),
    }
}
