//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use crate::error::AppError;
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub rebate: RebateConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Comma separated list of allowed CORS origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

/// Database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

/// Rebate calculation settings
#[derive(Debug, Deserialize, Clone)]
pub struct RebateConfig {
    /// IANA timezone operators enter downtime timestamps in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Divisor used to derive the daily rate from the monthly plan rate
    #[serde(default = "default_month_length")]
    pub month_length: u32,

    /// Outages at or below this many seconds are not credited (0 disables)
    #[serde(default)]
    pub min_downtime_secs: i64,

    /// Longest outage, in days, the service will price
    #[serde(default = "default_max_downtime_days")]
    pub max_downtime_days: u32,
}

fn default_timezone() -> String {
    "Asia/Manila".to_string()
}

fn default_month_length() -> u32 {
    30
}

fn default_max_downtime_days() -> u32 {
    366
}

impl RebateConfig {
    /// Parse the configured timezone name
    pub fn tz(&self) -> Result<Tz, AppError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::Config(format!("Unknown timezone: {}", self.timezone)))
    }

    /// Reject settings the calculator cannot work with
    pub fn validate(&self) -> Result<(), AppError> {
        self.tz()?;

        if self.month_length == 0 {
            return Err(AppError::Config(
                "rebate.month_length must be greater than zero".to_string(),
            ));
        }

        if self.min_downtime_secs < 0 {
            return Err(AppError::Config(
                "rebate.min_downtime_secs cannot be negative".to_string(),
            ));
        }

        if self.max_downtime_days == 0 {
            return Err(AppError::Config(
                "rebate.max_downtime_days must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for RebateConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            month_length: default_month_length(),
            min_downtime_secs: 0,
            max_downtime_days: default_max_downtime_days(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("database.max_connections", 10)?
            .set_default("rebate.timezone", "Asia/Manila")?
            .set_default("rebate.month_length", 30)?
            .set_default("rebate.min_downtime_secs", 0)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with KICK_ prefix
            .add_source(
                Environment::with_prefix("KICK")
                    .separator("__")
                    .try_parsing(true),
            );

        // Support the legacy DATABASE_URL variable
        if let Ok(url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
