//! Runtime configuration, read from `QUICKBITE_*` environment variables.
//!
//! | Variable                        | Default | Meaning                                   |
//! |---------------------------------|---------|-------------------------------------------|
//! | `QUICKBITE_DELIVERY_FEE`        | `50.00` | flat fee added to every order             |
//! | `QUICKBITE_STRICT_TRANSITIONS`  | `false` | only allow one step forward or cancel     |
//! | `QUICKBITE_CHANNEL_CAPACITY`    | `32`    | request queue length of each store actor  |
//! | `QUICKBITE_REQUEST_TIMEOUT_MS`  | `5000`  | deadline for every service call           |
//!
//! Log verbosity is not part of this struct; it comes from `RUST_LOG`.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const ENV_PREFIX: &str = "QUICKBITE_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub delivery_fee: Decimal,
    pub strict_transitions: bool,
    pub channel_capacity: usize,
    pub request_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delivery_fee: Decimal::new(5000, 2),
            strict_transitions: false,
            channel_capacity: 32,
            request_timeout_ms: 5000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Config = envy::prefixed(ENV_PREFIX).from_env()?;
        config.validate()
    }

    /// Like [`Config::from_env`], over explicit `(name, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::prefixed(ENV_PREFIX).from_iter(pairs)?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.delivery_fee.is_sign_negative() {
            return Err(ConfigError::Invalid(format!(
                "delivery_fee must not be negative, got {}",
                self.delivery_fee
            )));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "channel_capacity must be at least 1".into(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_ms must be at least 1".into(),
            ));
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(vars: &[(&str, &str)]) -> Vec<(String, String)> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_apply_when_nothing_is_set() {
        let config = Config::from_pairs(Vec::new()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.delivery_fee, Decimal::new(5000, 2));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_prefixed_variables_override_defaults() {
        let config = Config::from_pairs(pairs(&[
            ("QUICKBITE_DELIVERY_FEE", "35.5"),
            ("QUICKBITE_STRICT_TRANSITIONS", "true"),
            ("QUICKBITE_CHANNEL_CAPACITY", "8"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.delivery_fee, Decimal::new(355, 1));
        assert!(config.strict_transitions);
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.request_timeout_ms, 5000);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = Config::from_pairs(pairs(&[("QUICKBITE_CHANNEL_CAPACITY", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_negative_fee_is_rejected() {
        let config = Config {
            delivery_fee: Decimal::new(-1, 0),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_number_is_an_env_error() {
        let err = Config::from_pairs(pairs(&[("QUICKBITE_REQUEST_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env(_)));
    }
}
