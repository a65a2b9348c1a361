// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_field_types::get_field;
use admin_model::{ID_FIELD, ListMeta};

use crate::params::{FIELDS_PARAM, QueryParams};

/// The selection set for `field_paths`, one selection per line. `id` always comes first.
/// Paths the list doesn't know are selected as-is.
pub fn build_selections<S: AsRef<str>>(list: &ListMeta, field_paths: &[S]) -> String {
    std::iter::once(ID_FIELD.to_string())
        .chain(
            field_paths
                .iter()
                .map(AsRef::as_ref)
                .filter(|path| *path != ID_FIELD)
                .map(|path| field_selection(list, path)),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_selection(list: &ListMeta, path: &str) -> String {
    list.field(path)
        .and_then(|field| get_field(field.field_type).graphql_selection(path, &field.config))
        .unwrap_or_else(|| path.to_string())
}

/// The columns to show: the `fields` parameter restricted to visible fields, else the list's
/// initial columns, else just its label field.
pub fn selected_fields(list: &ListMeta, params: &QueryParams) -> Vec<String> {
    let requested: Vec<String> = params
        .get(FIELDS_PARAM)
        .map(|fields| {
            fields
                .split(',')
                .map(str::trim)
                .filter(|path| {
                    list.field(path)
                        .is_some_and(|field| !field.list_view.is_hidden())
                })
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if !requested.is_empty() {
        requested
    } else if !list.initial_columns.is_empty() {
        list.initial_columns.clone()
    } else {
        vec![list.label_field.clone()]
    }
}
