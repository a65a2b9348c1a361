// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Where-clause construction from URL parameters.
//!
//! Two sources contribute: the free-text `search` parameter, which becomes an `OR` of per-field
//! clauses, and structured `!<path>_<operator>` parameters, each of which is handed to its
//! field type's filter transform. Parameters from the URL are untrusted, so anything that
//! doesn't resolve to a known filter is dropped rather than reported.

use admin_field_types::get_field;
use admin_model::{FieldTypeKey, ListMeta};
use indexmap::IndexMap;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::params::{FILTER_PREFIX, QueryParams, SEARCH_PARAM};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PossibleFilter {
    pub path: String,
    pub field_type: FieldTypeKey,
    pub operator: &'static str,
    pub label: &'static str,
}

/// An accepted filter parameter, as shown in the filter bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveFilter {
    pub field: String,
    pub field_label: String,
    pub operator: &'static str,
    pub label: &'static str,
    pub value: Value,
}

/// Every filter the list accepts, keyed by its parameter name (`!<path>_<operator>`).
pub fn possible_filters(list: &ListMeta) -> IndexMap<String, PossibleFilter> {
    list.filterable_fields()
        .flat_map(|field| {
            get_field(field.field_type)
                .filter_types(&field.config)
                .into_iter()
                .map(move |(operator, info)| {
                    (
                        format!("{FILTER_PREFIX}{}_{operator}", field.path),
                        PossibleFilter {
                            path: field.path.clone(),
                            field_type: field.field_type,
                            operator,
                            label: info.label,
                        },
                    )
                })
        })
        .collect()
}

/// Filter values are JSON when they parse as JSON, plain strings otherwise.
fn parse_filter_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// The recognized filter parameters, in parameter order.
fn recognized_filters<'a>(
    possible: &'a IndexMap<String, PossibleFilter>,
    params: &'a QueryParams,
) -> impl Iterator<Item = (&'a PossibleFilter, Value)> + 'a {
    params
        .iter()
        .filter(|(key, _)| key.starts_with(FILTER_PREFIX))
        .filter_map(|(key, raw)| match possible.get(key) {
            Some(filter) => Some((filter, parse_filter_value(raw))),
            None => {
                debug!(key, "Dropping unknown filter parameter");
                None
            }
        })
}

fn search_clauses(list: &ListMeta, search: &str) -> Vec<Value> {
    let mut clauses = vec![];

    if list.id_kind().is_valid_id(search) {
        clauses.push(json!({ "id": { "equals": search } }));
    }

    let search_fields = if list.search_fields.is_empty() {
        &list.initial_search_fields
    } else {
        &list.search_fields
    };

    for path in search_fields {
        let clause = list.field(path).and_then(|field| {
            get_field(field.field_type).search_filter(path, search, &field.config)
        });
        match clause {
            Some(clause) => clauses.push(Value::Object(clause)),
            None => debug!(list = %list.key, path = %path, "Field cannot be searched"),
        }
    }

    clauses
}

/// The where clause for the list's current parameters.
///
/// Filter clauses are merged shallowly in parameter order, so two filters producing the same
/// top-level key leave only the later one.
pub fn build_where(list: &ListMeta, params: &QueryParams) -> Map<String, Value> {
    let mut where_clause = Map::new();

    if let Some(search) = params.get(SEARCH_PARAM).map(str::trim)
        && !search.is_empty()
    {
        let clauses = search_clauses(list, search);
        if !clauses.is_empty() {
            where_clause.insert("OR".to_string(), Value::Array(clauses));
        }
    }

    let possible = possible_filters(list);
    for (filter, value) in recognized_filters(&possible, params) {
        let Some(field) = list.field(&filter.path) else {
            continue;
        };

        match get_field(filter.field_type).transform_filter(
            &filter.path,
            filter.operator,
            &value,
            &field.config,
        ) {
            Some(clause) => where_clause.extend(clause),
            None => debug!(
                path = %filter.path,
                operator = filter.operator,
                "Filter produced no clause"
            ),
        }
    }

    where_clause
}

pub fn active_filters(list: &ListMeta, params: &QueryParams) -> Vec<ActiveFilter> {
    let possible = possible_filters(list);
    recognized_filters(&possible, params)
        .map(|(filter, value)| ActiveFilter {
            field: filter.path.clone(),
            field_label: list
                .field(&filter.path)
                .map(|field| field.label.clone())
                .unwrap_or_else(|| filter.path.clone()),
            operator: filter.operator,
            label: filter.label,
            value,
        })
        .collect()
}
