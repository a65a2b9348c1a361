// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub mod checkbox;
pub mod id;
pub mod image;
pub mod json;
pub mod password;
pub mod relationship;
pub mod text;
pub mod timestamp;
pub mod virtual_field;

use serde_json::{Map, Value};

use crate::controller::single;

/// `{ path: { operator: value } }`
pub(crate) fn operator_clause(path: &str, operator: &str, value: Value) -> Map<String, Value> {
    single(path, Value::Object(single(operator, value)))
}

/// `{ path: { not: { operator: value } } }`
pub(crate) fn negated_clause(path: &str, operator: &str, value: Value) -> Map<String, Value> {
    single(
        path,
        Value::Object(single("not", Value::Object(single(operator, value)))),
    )
}

/// Ids from a filter value: an array (of ids or `{ id }` objects) or a comma separated string.
pub(crate) fn parse_id_list(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(_) | Value::Number(_) => Some(item.clone()),
                Value::Object(object) => object.get("id").cloned(),
                _ => None,
            })
            .collect(),
        Value::String(ids) => Some(
            ids.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| Value::String(id.to_string()))
                .collect(),
        ),
        _ => None,
    }
}
