use axum::http::HeaderValue;
use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid SHOWBILL_BIND {value:?}: {source}")]
    InvalidBind {
        value: String,
        source: AddrParseError,
    },
}

/// Server settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Empty means any origin.
    pub cors_origins: Vec<HeaderValue>,
    pub log_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind: parse_bind(env::var("SHOWBILL_BIND").ok().as_deref())?,
            cors_origins: parse_origins(&env::var("CORS_ORIGINS").unwrap_or_default()),
            log_file: env::var("SHOWBILL_LOG_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
}

/// Unset or blank falls back to `0.0.0.0:3000`; anything else must parse.
fn parse_bind(raw: Option<&str>) -> Result<SocketAddr, ConfigError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default_bind()),
        Some(value) => value.parse::<SocketAddr>().map_err(|source| ConfigError::InvalidBind {
            value: value.to_string(),
            source,
        }),
    }
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect()
}
