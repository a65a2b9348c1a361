// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_model::{ID_FIELD, ListMeta, SortDirection, SortSpec};
use serde_json::{Map, Value};
use tracing::debug;

use crate::params::{QueryParams, SORT_BY_PARAM};

/// Conventional sort fields, tried in order when neither the URL nor the list picks one.
const PREFERRED_SORT_FIELDS: [&str; 5] = ["createdAt", "updatedAt", "timestamp", "date", ID_FIELD];

/// The sort for the list, first match wins:
///
/// 1. `sortBy=<field>` or `sortBy=-<field>` naming an orderable field
/// 2. the list's initial sort, if its field is still orderable
/// 3. the first orderable preferred field, descending (`id` ascending)
/// 4. the first orderable field, ascending
/// 5. `id` ascending
pub fn build_order_by(list: &ListMeta, params: &QueryParams) -> SortSpec {
    if let Some(sort_by) = params.get(SORT_BY_PARAM) {
        let (field, direction) = match sort_by.strip_prefix('-') {
            Some(field) => (field, SortDirection::Desc),
            None => (sort_by, SortDirection::Asc),
        };
        if list.is_orderable(field) {
            return SortSpec::new(field, direction);
        }
        debug!(list = %list.key, sort_by, "Ignoring sort on a field that isn't orderable");
    }

    if let Some(initial_sort) = &list.initial_sort
        && list.is_orderable(&initial_sort.field)
    {
        return initial_sort.clone();
    }

    if let Some(field) = PREFERRED_SORT_FIELDS
        .into_iter()
        .find(|field| list.is_orderable(field))
    {
        return if field == ID_FIELD {
            SortSpec::asc(field)
        } else {
            SortSpec::desc(field)
        };
    }

    list.orderable_fields()
        .next()
        .map(|field| SortSpec::asc(&field.path))
        .unwrap_or_else(|| SortSpec::asc(ID_FIELD))
}

/// The `orderBy` argument: `[{ "<field>": "asc" | "desc" }]`.
pub fn order_by_argument(sort: &SortSpec) -> Value {
    let mut order = Map::new();
    order.insert(
        sort.field.clone(),
        Value::String(sort.direction.as_graphql().to_string()),
    );
    Value::Array(vec![Value::Object(order)])
}

/// The `sortBy` parameter value that selects `sort`.
pub fn sort_param(sort: &SortSpec) -> String {
    sort.to_string()
}
