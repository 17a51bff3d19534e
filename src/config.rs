use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use dotenvy::Error as DotenvError;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8787;
const PORT_ENV: &str = "PORT";
const CONTAINER_PORT_ENV: &str = "CF_CONTAINER_PORT";
const CONTAINER_ADDR_ENV: &str = "CF_CONTAINER_ADDR";

/// Configuration consumed by the runtime before spinning up Axum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub bind_addr: SocketAddr,
}

impl RuntimeConfig {
    /// Loads configuration from `PORT` / `CF_CONTAINER_PORT` and `CF_CONTAINER_ADDR`.
    ///
    /// Values from a local `.env` file (parsed via [`dotenvy::dotenv_override`]) override whatever is already set in
    /// the process environment, which makes local development workflows predictable.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_env_overrides()?;

        let port = match env_value(PORT_ENV).or_else(|| env_value(CONTAINER_PORT_ENV)) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let addr = match env_value(CONTAINER_ADDR_ENV) {
            Some(value) => value
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidAddr(value))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        Ok(Self {
            bind_addr: SocketAddr::new(addr, port),
        })
    }

    /// Returns a builder for programmatic overrides.
    pub fn builder() -> RuntimeConfigBuilder {
        RuntimeConfigBuilder::default()
    }
}

impl Default for RuntimeConfig {
    /// Binds to `0.0.0.0:8787`, the local Cloudflare containers contract.
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
        }
    }
}

/// Builder type for [`RuntimeConfig`].
#[derive(Default, Clone, Debug)]
pub struct RuntimeConfigBuilder {
    bind_addr: Option<SocketAddr>,
}

impl RuntimeConfigBuilder {
    /// Sets the address for the embedded Axum listener.
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = Some(addr);
        self
    }

    /// Sets only the listening port, keeping the default address.
    pub fn port(mut self, port: u16) -> Self {
        let ip = self
            .bind_addr
            .map(|addr| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        self.bind_addr = Some(SocketAddr::new(ip, port));
        self
    }

    /// Builds the final configuration.
    pub fn build(self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self
                .bind_addr
                .unwrap_or_else(|| RuntimeConfig::default().bind_addr),
        }
    }
}

/// Errors that can occur while building [`RuntimeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen port: {0}")]
    InvalidPort(String),
    #[error("invalid listen address: {0}")]
    InvalidAddr(String),
    #[error("failed to load .env overrides: {0}")]
    Dotenv(#[from] DotenvError),
}

fn load_env_overrides() -> Result<(), ConfigError> {
    match dotenvy::dotenv_override() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::Dotenv(err)),
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> &'static Mutex<()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_env() {
        unsafe {
            std::env::remove_var(PORT_ENV);
            std::env::remove_var(CONTAINER_PORT_ENV);
            std::env::remove_var(CONTAINER_ADDR_ENV);
        }
    }

    #[test]
    fn builder_overrides_defaults() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 8)), 9999);
        let config = RuntimeConfig::builder().bind_addr(addr).build();
        assert_eq!(config.bind_addr, addr);

        let config = RuntimeConfig::builder().port(3000).build();
        assert_eq!(
            config.bind_addr,
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000)
        );

        assert_eq!(RuntimeConfig::builder().build(), RuntimeConfig::default());
    }

    #[test]
    fn reads_env_configuration() {
        let _guard = env_lock().lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var(CONTAINER_PORT_ENV, "9000");
            std::env::set_var(CONTAINER_ADDR_ENV, "127.0.0.2");
        }

        let config = RuntimeConfig::from_env().expect("config");
        assert_eq!(
            config.bind_addr,
            SocketAddr::new("127.0.0.2".parse().unwrap(), 9000)
        );

        clear_env();
    }

    #[test]
    fn port_takes_precedence_over_container_port() {
        let _guard = env_lock().lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var(PORT_ENV, "1234");
            std::env::set_var(CONTAINER_PORT_ENV, "9000");
        }

        let config = RuntimeConfig::from_env().expect("config");
        assert_eq!(
            config.bind_addr,
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 1234)
        );

        clear_env();
    }

    #[test]
    fn rejects_malformed_values() {
        let _guard = env_lock().lock().unwrap();
        clear_env();

        unsafe { std::env::set_var(PORT_ENV, "eighty") };
        assert!(matches!(
            RuntimeConfig::from_env(),
            Err(ConfigError::InvalidPort(value)) if value == "eighty"
        ));

        clear_env();
        unsafe { std::env::set_var(CONTAINER_ADDR_ENV, "not-an-ip") };
        assert!(matches!(
            RuntimeConfig::from_env(),
            Err(ConfigError::InvalidAddr(value)) if value == "not-an-ip"
        ));

        clear_env();
    }
}
