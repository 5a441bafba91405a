// Runtime configuration read from the environment.
//
// - Every key has a default. A present but malformed value is an error, never a silent default.
// - `from_lookup` takes any key lookup so tests do not touch the process environment.
// - The log filter loads on its own, so logging is up before the rest of the config is read.

use chrono::{FixedOffset, Offset, Utc};
use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

pub const DISPATCH_QUEUE_CAPACITY: &str = "MEETUP_DISPATCH_QUEUE_CAPACITY";
pub const MAILBOX_CAPACITY: &str = "MEETUP_MAILBOX_CAPACITY";
pub const MAX_QUERY_RESULTS: &str = "MEETUP_MAX_QUERY_RESULTS";
pub const WEEKDAY_UTC_OFFSET_SECS: &str = "MEETUP_WEEKDAY_UTC_OFFSET_SECS";
pub const LOG_FILTER: &str = "MEETUP_LOG_FILTER";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub dispatch_queue_capacity: usize,
    pub mailbox_capacity: usize,
    pub max_query_results: usize,
    /// Offset in which the current weekday of weekly events is reckoned.
    pub weekday_offset: FixedOffset,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn log_filter_from_env() -> String {
        log_filter_from(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let offset_secs: i32 = try_load(&lookup, WEEKDAY_UTC_OFFSET_SECS, 0)?;
        let weekday_offset = FixedOffset::east_opt(offset_secs).ok_or(ConfigError::Invalid {
            key: WEEKDAY_UTC_OFFSET_SECS,
            value: offset_secs.to_string(),
            reason: "must be within one day of UTC".to_string(),
        })?;

        Ok(Self {
            dispatch_queue_capacity: load_capacity(&lookup, DISPATCH_QUEUE_CAPACITY, 1024)?,
            mailbox_capacity: load_capacity(&lookup, MAILBOX_CAPACITY, 64)?,
            max_query_results: load_capacity(&lookup, MAX_QUERY_RESULTS, 100)?,
            weekday_offset,
            log_filter: log_filter_from(&lookup),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dispatch_queue_capacity: 1024,
            mailbox_capacity: 64,
            max_query_results: 100,
            weekday_offset: Utc.fix(),
            log_filter: "info".to_string(),
        }
    }
}

pub fn log_filter_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(LOG_FILTER).unwrap_or_else(|| "info".to_string())
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(key) else {
        info!("{key} not set, using default");
        return Ok(default);
    };
    value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
        value,
    })
}

fn load_capacity<F>(lookup: &F, key: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match try_load(lookup, key, default)? {
        0 => Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        capacity => Ok(capacity),
    }
}
