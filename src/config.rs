use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

use crate::data::loader::DATASET_URL;

pub const DATASET_URL_VAR: &str = "NUTRITION_DATASET_URL";
pub const HOST_VAR: &str = "NUTRITION_HOST";
pub const PORT_VAR: &str = "NUTRITION_PORT";

const DEFAULT_PORT: u16 = 5000;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var}: '{value}' is not a valid IP address")]
    InvalidHost { var: &'static str, value: String },

    #[error("{var}: '{value}' is not a valid port")]
    InvalidPort { var: &'static str, value: String },
}

/// Runtime settings, read from the environment only.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the nutrient workbook is downloaded from.
    pub dataset_url: String,
    /// Web server bind address.
    pub host: IpAddr,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_url: DATASET_URL.to_string(),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset or blank variables keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(url) = get(DATASET_URL_VAR) {
            config.dataset_url = url;
        }
        if let Some(host) = get(HOST_VAR) {
            config.host = host.parse().map_err(|_| ConfigError::InvalidHost {
                var: HOST_VAR,
                value: host.clone(),
            })?;
        }
        if let Some(port) = get(PORT_VAR) {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort {
                var: PORT_VAR,
                value: port.clone(),
            })?;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
