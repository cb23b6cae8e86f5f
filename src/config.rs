//! Configuration for kafka-fetch
//!
//! Centralized configuration with sensible defaults.

use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::{FetchError, Result};
use crate::protocol::DEFAULT_MAX_SIZE;

/// Main configuration for a consumer
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Broker address (host:port)
    pub server_addr: String,

    /// Connection read timeout (milliseconds, 0 disables)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 disables).
    /// Also bounds the connect attempt.
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Fetch Configuration
    // -------------------------------------------------------------------------
    /// Upper bound on response payload bytes sent with every fetch request.
    /// The broker may cut the last message of a batch at this boundary.
    pub max_size: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:9092".to_string(),
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Resolve `server_addr` to the first socket address it names
    pub fn resolve_server(&self) -> Result<SocketAddr> {
        self.server_addr
            .to_socket_addrs()
            .map_err(|e| {
                FetchError::Config(format!("Invalid server address '{}': {}", self.server_addr, e))
            })?
            .next()
            .ok_or_else(|| {
                FetchError::Config(format!("Server address '{}' resolved to nothing", self.server_addr))
            })
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the broker address
    pub fn server_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.server_addr = addr.into();
        self
    }

    /// Set the max fetch size (in bytes)
    pub fn max_size(mut self, size: i32) -> Self {
        self.config.max_size = size;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
