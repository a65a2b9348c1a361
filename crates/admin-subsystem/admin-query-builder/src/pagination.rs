// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_model::ListMeta;
use serde::Serialize;

use crate::config::QueryConfig;
use crate::params::{PAGE_PARAM, PAGE_SIZE_PARAM, QueryParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub skip: usize,
    pub take: usize,
}

fn positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
}

impl Pagination {
    /// Unusable `page`/`pageSize` values fall back to the first page and the list's (or the
    /// configured) page size. The page size never exceeds the configured maximum.
    pub fn from_params(list: &ListMeta, params: &QueryParams, config: &QueryConfig) -> Self {
        let page = positive(params.get(PAGE_PARAM)).unwrap_or(1);
        let page_size = positive(params.get(PAGE_SIZE_PARAM))
            .or(list.page_size)
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size.max(1));

        Self {
            page,
            page_size,
            skip: (page - 1).saturating_mul(page_size),
            take: page_size,
        }
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }
}
