// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Server-side enhancement: the data a backend needs to answer list queries, with nothing
//! UI-facing attached.

use admin_field_types::get_field;
use admin_model::{AdminMeta, GraphQLNames, ListMeta};

use crate::error::ResolverError;

fn is_searchable(list: &ListMeta, path: &str) -> bool {
    list.field(path)
        .is_some_and(|field| field.is_filterable && get_field(field.field_type).is_searchable())
}

/// Initial search fields that can actually be searched, else the label field if it can.
fn search_fields(list: &ListMeta) -> Vec<String> {
    let declared: Vec<String> = list
        .initial_search_fields
        .iter()
        .filter(|path| is_searchable(list, path))
        .cloned()
        .collect();

    if !declared.is_empty() {
        declared
    } else if is_searchable(list, &list.label_field) {
        vec![list.label_field.clone()]
    } else {
        vec![]
    }
}

/// Attaches search fields and generated names. Enhancing an enhanced list changes nothing.
pub fn enhance_list_for_server(list: &ListMeta) -> Result<ListMeta, ResolverError> {
    let gql_names = match &list.gql_names {
        Some(names) => names.clone(),
        None => GraphQLNames::new(&list.key, &list.graphql_plural)?,
    };

    Ok(ListMeta {
        search_fields: search_fields(list),
        gql_names: Some(gql_names),
        ..list.clone()
    })
}

pub fn enhance_admin_meta_for_server(meta: &AdminMeta) -> Result<AdminMeta, ResolverError> {
    let lists = meta
        .lists
        .values()
        .map(|list| Ok((list.key.clone(), enhance_list_for_server(list)?)))
        .collect::<Result<_, ResolverError>>()?;

    Ok(AdminMeta {
        views: meta.views.clone(),
        lists,
    })
}
