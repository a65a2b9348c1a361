// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Access to configuration values.
//!
//! The engine never reads `std::env` directly. Callers hand it an [`Environment`], which is
//! the process environment in production ([`SystemEnvironment`]) and a [`MapEnvironment`]
//! in tests.

use std::collections::HashMap;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// A strictly positive integer setting.
    fn get_usize(&self, key: &str, default_value: usize) -> Result<usize, EnvError> {
        match self.get(key) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(parsed) if parsed > 0 => Ok(parsed),
                _ => Err(EnvError::InvalidNumber {
                    key: key.to_string(),
                    value,
                }),
            },
            None => Ok(default_value),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("Invalid value for {key}: {value}. Expected a positive integer")]
    InvalidNumber { key: String, value: String },

    #[error("Invalid env value {env_value} for {env_key}: {message}")]
    InvalidSetting {
        env_key: &'static str,
        env_value: String,
        message: String,
    },
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Default)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
}

impl Environment for MapEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnvironment {
    fn from(values: [(&str, &str); N]) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiplatform_test::multiplatform_test;

    #[multiplatform_test]
    fn numbers() {
        let env = MapEnvironment::from([("SIZE", " 25 "), ("ZERO", "0"), ("BAD", "x")]);

        assert_eq!(env.get_usize("SIZE", 10).unwrap(), 25);
        assert_eq!(env.get_usize("MISSING", 10).unwrap(), 10);
        assert!(env.get_usize("ZERO", 10).is_err());
        assert!(env.get_usize("BAD", 10).is_err());
    }
}
