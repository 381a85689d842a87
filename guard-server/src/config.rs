//! Configuration module

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use guard_core::constants::{
    DEFAULT_AUTHORITY_ADDRESS, DEFAULT_BLOCK_THRESHOLD, DEFAULT_CUSTODY_ADDRESS,
    DEFAULT_EVENT_HISTORY_LIMIT, DEFAULT_MIN_STAKE, DEFAULT_TREASURY_ADDRESS,
};
use guard_core::{Address, CountingMode, GatePolicy, GuardConfig, GuardError};
use thiserror::Error;

const DEV_JWT_SECRET: &str = "transaction-guard-dev-secret-change-in-production";

/// One year
pub const MAX_JWT_EXPIRATION_HOURS: u64 = 24 * 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}='{value}' is invalid: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be set in production")]
    Missing(&'static str),

    #[error("guard settings rejected: {0}")]
    Guard(#[from] GuardError),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// JWT secret key
    pub jwt_secret: String,

    /// JWT expiration in hours
    pub jwt_expiration_hours: u64,

    /// Environment (development, production)
    pub environment: String,

    /// "json" for structured logs, anything else for plain text
    pub log_format: String,

    pub authority: Address,
    pub custody: Address,
    pub treasury: Address,
    pub min_stake: u128,
    pub block_threshold: u8,
    pub gate_policy: GatePolicy,
    pub counting_mode: CountingMode,
    pub event_history_limit: usize,

    /// Journal directory; no journal when unset
    pub journal_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) => secret,
            None if environment == "production" => return Err(ConfigError::Missing("JWT_SECRET")),
            None => DEV_JWT_SECRET.to_string(),
        };

        let config = Self {
            port: parsed(&lookup, "PORT", 8080)?,
            jwt_secret,
            jwt_expiration_hours: parsed(&lookup, "JWT_EXPIRATION_HOURS", 24)?,
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "text".to_string()),
            authority: parsed(&lookup, "AUTHORITY_ADDRESS", DEFAULT_AUTHORITY_ADDRESS)?,
            custody: parsed(&lookup, "CUSTODY_ADDRESS", DEFAULT_CUSTODY_ADDRESS)?,
            treasury: parsed(&lookup, "TREASURY_ADDRESS", DEFAULT_TREASURY_ADDRESS)?,
            min_stake: parsed(&lookup, "MIN_STAKE", DEFAULT_MIN_STAKE)?,
            block_threshold: parsed(&lookup, "BLOCK_THRESHOLD", DEFAULT_BLOCK_THRESHOLD)?,
            gate_policy: parsed(&lookup, "GATE_POLICY", GatePolicy::default())?,
            counting_mode: parsed(&lookup, "STATS_COUNTING", CountingMode::default())?,
            event_history_limit: parsed(&lookup, "EVENT_HISTORY_LIMIT", DEFAULT_EVENT_HISTORY_LIMIT)?,
            journal_dir: lookup("JOURNAL_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            environment,
        };

        if config.jwt_expiration_hours == 0 || config.jwt_expiration_hours > MAX_JWT_EXPIRATION_HOURS {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRATION_HOURS",
                value: config.jwt_expiration_hours.to_string(),
                reason: format!("must be between 1 and {}", MAX_JWT_EXPIRATION_HOURS),
            });
        }
        config.guard_config().validate()?;
        Ok(config)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn guard_config(&self) -> GuardConfig {
        GuardConfig {
            authority: self.authority,
            custody: self.custody,
            treasury: self.treasury,
            min_stake: self.min_stake,
            block_threshold: self.block_threshold,
            gate_policy: self.gate_policy,
            counting_mode: self.counting_mode,
            event_history_limit: self.event_history_limit,
        }
    }
}

fn parsed<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => {
            let result = value.trim().parse::<T>();
            result.map_err(|e| ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value,
            })
        }
    }
}
