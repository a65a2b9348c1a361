// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use common::env::{EnvError, Environment};
use common::env_const::{
    ADMIN_DEFAULT_PAGE_SIZE, ADMIN_MAX_PAGE_SIZE, DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// Page size for lists that don't declare one
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl QueryConfig {
    pub fn from_env(env: &dyn Environment) -> Result<Self, EnvError> {
        let default_page_size = env.get_usize(ADMIN_DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE)?;
        let max_page_size = env.get_usize(ADMIN_MAX_PAGE_SIZE, DEFAULT_MAX_PAGE_SIZE)?;

        if default_page_size > max_page_size {
            return Err(EnvError::InvalidSetting {
                env_key: ADMIN_DEFAULT_PAGE_SIZE,
                env_value: default_page_size.to_string(),
                message: format!("must not exceed {ADMIN_MAX_PAGE_SIZE} ({max_page_size})"),
            });
        }

        Ok(Self {
            default_page_size,
            max_page_size,
        })
    }
}
