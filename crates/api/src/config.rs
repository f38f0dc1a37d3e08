//! Process configuration read from the environment.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use thiserror::Error;

use warehouse_inventory::StoreLimits;

pub const BIND_ADDR_VAR: &str = "WAREHOUSE_BIND_ADDR";
pub const CATEGORY_CAPACITY_VAR: &str = "WAREHOUSE_CATEGORY_CAPACITY";
pub const LOW_STOCK_THRESHOLD_VAR: &str = "WAREHOUSE_LOW_STOCK_THRESHOLD";

pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid value: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub limits: StoreLimits,
}

impl ApiConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup; unset keys use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = StoreLimits::default();

        let bind_addr = parse_var(&lookup, BIND_ADDR_VAR, DEFAULT_BIND_ADDR)?;
        let category_capacity =
            parse_var(&lookup, CATEGORY_CAPACITY_VAR, defaults.category_capacity)?;
        let low_stock_threshold =
            parse_var(&lookup, LOW_STOCK_THRESHOLD_VAR, defaults.low_stock_threshold)?;

        if low_stock_threshold == 0 {
            return Err(ConfigError::Invalid {
                var: LOW_STOCK_THRESHOLD_VAR,
                value: "0".to_string(),
                reason: "threshold must be positive".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            limits: StoreLimits {
                category_capacity,
                low_stock_threshold,
            },
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            limits: StoreLimits::default(),
        }
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
