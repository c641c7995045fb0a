//! Environment configuration readers
//!
//! Every reader takes a lookup function so configuration can be built from
//! the process environment in production and from a fixed map in tests.

use std::fmt::Display;
use std::str::FromStr;

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: String,
        value: String,
        reason: String,
    },
}

/// Lookup into the process environment
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Read a variable, treating blank values as unset
pub fn optional_var<L>(lookup: &L, name: &str) -> Option<String>
where
    L: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a variable, falling back to `default` when unset
///
/// A present but unparsable value is an error, never silently defaulted.
pub fn parse_var<L, T>(lookup: &L, name: &str, default: T) -> Result<T, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match optional_var(lookup, name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name: name.to_string(),
            reason: e.to_string(),
            value,
        }),
    }
}

/// Parse a variable that must be strictly positive
pub fn parse_positive<L>(lookup: &L, name: &str, default: u64) -> Result<u64, ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    let value = parse_var(lookup, name, default)?;
    if value == 0 {
        return Err(ConfigError::Invalid {
            name: name.to_string(),
            value: "0".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}
