//! Configuration loader for the `facility-insights` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller), so `env::var` calls stay out of the handlers.
//!
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::synth::MAX_DAYS;

/// Parse an optional environment variable of any `FromStr` type with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse an optional environment variable that has no default.
macro_rules! parse_env_opt {
    ($var_name:expr, $ty:ty) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Interface the HTTP server binds to.
    pub bind_addr: IpAddr,

    /// TCP port the HTTP server listens on.
    pub port: u16,

    /// Cosmetic delay before a chat reply is sent.
    pub chat_typing_delay: Duration,

    /// Largest `days` accepted by the series endpoint.
    pub series_max_days: u32,

    /// Fixed RNG seed; `None` draws fresh entropy per request.
    pub series_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            chat_typing_delay: Duration::from_millis(1000),
            series_max_days: 366,
            series_seed: None,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – listen address (default: 0.0.0.0)
/// - `PORT` – listen port (default: 8080)
/// - `CHAT_TYPING_DELAY_MS` – chat reply delay in ms (default: 1000)
/// - `SERIES_MAX_DAYS` – upper bound for requested series length, 1..=36525 (default: 366)
/// - `SERIES_SEED` – u64 seed for reproducible series (default: unset)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let bind_addr = parse_env!("BIND_ADDR", IpAddr, defaults.bind_addr);
    let port = parse_env!("PORT", u16, defaults.port);
    let typing_ms = parse_env!(
        "CHAT_TYPING_DELAY_MS",
        u64,
        u64::try_from(defaults.chat_typing_delay.as_millis()).unwrap_or(u64::MAX)
    );
    let series_max_days = parse_env!("SERIES_MAX_DAYS", u32, defaults.series_max_days);
    let series_seed = parse_env_opt!("SERIES_SEED", u64);

    let cfg = Config {
        bind_addr,
        port,
        chat_typing_delay: Duration::from_millis(typing_ms),
        series_max_days,
        series_seed,
    };
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    // ---
    /// Reject values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        // ---
        if !(1..=MAX_DAYS).contains(&self.series_max_days) {
            return Err(anyhow!(
                "Invalid SERIES_MAX_DAYS: must be between 1 and {}, got {}",
                MAX_DAYS,
                self.series_max_days
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        let seed = match self.series_seed {
            Some(seed) => seed.to_string(),
            None => "<entropy>".to_string(),
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  BIND_ADDR            : {}", self.bind_addr);
        tracing::info!("  PORT                 : {}", self.port);
        tracing::info!(
            "  CHAT_TYPING_DELAY_MS : {}",
            self.chat_typing_delay.as_millis()
        );
        tracing::info!("  SERIES_MAX_DAYS      : {}", self.series_max_days);
        tracing::info!("  SERIES_SEED          : {}", seed);
    }
}
