//! Process configuration from environment variables

use crate::summarizer::DEFAULT_SUMMARY_MAX_CHARS;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown transport '{0}' (expected 'stdio' or 'http')")]
    UnknownTransport(String),
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// How requests reach the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// Newline-delimited JSON-RPC over stdin/stdout
    #[default]
    Stdio,
    /// Streamable HTTP at `/mcp`
    Http,
}

impl FromStr for Transport {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Transport::Stdio),
            "http" => Ok(Transport::Http),
            other => Err(ConfigError::UnknownTransport(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub transport: Transport,
    pub bind: IpAddr,
    pub port: u16,
    pub summary_max_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8000,
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            transport: match lookup("TRACKER_TRANSPORT") {
                Some(value) => value.parse()?,
                None => defaults.transport,
            },
            bind: parse_var(&lookup, "TRACKER_BIND")?.unwrap_or(defaults.bind),
            port: parse_var(&lookup, "TRACKER_PORT")?.unwrap_or(defaults.port),
            summary_max_chars: parse_var(&lookup, "TRACKER_SUMMARY_MAX_CHARS")?
                .unwrap_or(defaults.summary_max_chars),
        })
    }

    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name, value })
        })
        .transpose()
}
