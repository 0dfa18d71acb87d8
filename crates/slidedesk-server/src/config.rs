//! Server configuration parsed from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_SCREENSHOT_DIR: &str = "screenshots";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub screenshot_dir: PathBuf,
}

impl ServerConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SLIDEDESK_ADDR`: listen address, default `0.0.0.0:5000`
    /// - `SLIDEDESK_SCREENSHOT_DIR`: default `screenshots`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var("SLIDEDESK_ADDR").ok().as_deref(),
            std::env::var("SLIDEDESK_SCREENSHOT_DIR").ok().as_deref(),
        )
    }

    fn from_values(addr: Option<&str>, screenshot_dir: Option<&str>) -> Result<Self, ConfigError> {
        let raw = addr.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_ADDR);
        let addr = raw.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidAddr {
            var: "SLIDEDESK_ADDR",
            value: raw.to_string(),
        })?;
        let screenshot_dir = screenshot_dir
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SCREENSHOT_DIR);

        Ok(Self {
            addr,
            screenshot_dir: PathBuf::from(screenshot_dir),
        })
    }
}
