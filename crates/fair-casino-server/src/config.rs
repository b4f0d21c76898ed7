//! Service configuration read from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

use fair_casino_core::MAX_BET;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOUSE_BANKROLL: i64 = 1_000_000;
pub const DEFAULT_RECENT_ROUNDS_LIMIT: usize = 20;
pub const DEFAULT_LEDGER_EVENT_CAPACITY: usize = 1024;
pub const DEFAULT_MAX_BET: u64 = 100_000;
pub const DEFAULT_MAX_PENDING_COMMITMENTS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not valid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for the casino service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Starting balance of the house ledger, in bet units
    pub house_bankroll: i64,
    /// Number of rounds returned by the recent rounds endpoint
    pub recent_rounds_limit: usize,
    /// Buffered ledger events per subscriber before it starts lagging
    pub ledger_event_capacity: usize,
    /// Largest stake accepted for a single round
    pub max_bet: u64,
    /// Unplayed commitments kept before the oldest are evicted
    pub max_pending_commitments: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            house_bankroll: DEFAULT_HOUSE_BANKROLL,
            recent_rounds_limit: DEFAULT_RECENT_ROUNDS_LIMIT,
            ledger_event_capacity: DEFAULT_LEDGER_EVENT_CAPACITY,
            max_bet: DEFAULT_MAX_BET,
            max_pending_commitments: DEFAULT_MAX_PENDING_COMMITMENTS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from any variable source. Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let ledger_event_capacity = parse_var(
            &lookup,
            "LEDGER_EVENT_CAPACITY",
            defaults.ledger_event_capacity,
        )?;
        if ledger_event_capacity == 0 {
            return Err(invalid("LEDGER_EVENT_CAPACITY", 0, "must be at least 1"));
        }

        let max_bet = parse_var(&lookup, "MAX_BET", defaults.max_bet)?;
        if max_bet == 0 || max_bet > MAX_BET {
            return Err(invalid(
                "MAX_BET",
                max_bet,
                &format!("must be between 1 and {}", MAX_BET),
            ));
        }

        let max_pending_commitments = parse_var(
            &lookup,
            "MAX_PENDING_COMMITMENTS",
            defaults.max_pending_commitments,
        )?;
        if max_pending_commitments == 0 {
            return Err(invalid("MAX_PENDING_COMMITMENTS", 0, "must be at least 1"));
        }

        Ok(Self {
            bind_addr: parse_var(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            port: parse_var(&lookup, "PORT", defaults.port)?,
            house_bankroll: parse_var(&lookup, "HOUSE_BANKROLL", defaults.house_bankroll)?,
            recent_rounds_limit: parse_var(
                &lookup,
                "RECENT_ROUNDS_LIMIT",
                defaults.recent_rounds_limit,
            )?,
            ledger_event_capacity,
            max_bet,
            max_pending_commitments,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn invalid(var: &'static str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        }
    }
}
