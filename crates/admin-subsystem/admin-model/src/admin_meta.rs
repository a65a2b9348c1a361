// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Loading admin metadata from its JSON form.
//!
//! The serialized form mirrors what schema introspection produces: a `views` table and a list
//! of lists, each field pointing at its implementation through `viewsIndex` and carrying an
//! untyped `fieldMeta` blob. Loading resolves every index and decodes every blob, so any
//! problem surfaces here as a [`SchemaError`].

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::SchemaError;
use crate::field::{FieldConfig, FieldMeta, FieldViewConfig, IdKind};
use crate::field_type::ViewsTable;
use crate::list::{ListMeta, SortSpec};
use crate::naming::GraphQLNames;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminMetaDefinition {
    pub views: Vec<String>,
    pub lists: Vec<ListDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListDefinition {
    pub key: String,
    pub path: Option<String>,
    pub label: Option<String>,
    pub singular: Option<String>,
    pub plural: Option<String>,
    pub graphql_plural: Option<String>,
    pub description: Option<String>,
    pub label_field: Option<String>,
    pub id_kind: IdKind,
    pub initial_columns: Option<Vec<String>>,
    pub initial_search_fields: Option<Vec<String>>,
    pub initial_sort: Option<SortSpec>,
    pub page_size: Option<usize>,
    pub hide_create: bool,
    pub hide_delete: bool,
    pub gql_names: Option<GraphQLNames>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub path: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub views_index: usize,
    #[serde(default)]
    pub field_meta: Option<serde_json::Value>,
    #[serde(default)]
    pub is_filterable: bool,
    #[serde(default)]
    pub is_orderable: bool,
    #[serde(default)]
    pub list_view: Option<FieldViewConfig>,
    #[serde(default)]
    pub create_view: Option<FieldViewConfig>,
    #[serde(default)]
    pub item_view: Option<FieldViewConfig>,
}

impl FieldDefinition {
    pub fn into_field_meta(self, list: &str, views: &ViewsTable) -> Result<FieldMeta, SchemaError> {
        let field_type = views
            .get_field_type_from_views_index(self.views_index)
            .ok_or_else(|| SchemaError::UnknownViewsIndex {
                list: list.to_string(),
                path: self.path.clone(),
                index: self.views_index,
            })?;

        let config = FieldConfig::from_field_meta(field_type, self.field_meta).map_err(|source| {
            SchemaError::InvalidFieldConfig {
                list: list.to_string(),
                path: self.path.clone(),
                source,
            }
        })?;

        let mut field = FieldMeta::new(self.path, config);
        field.views_index = self.views_index;
        field.is_filterable = self.is_filterable;
        field.is_orderable = self.is_orderable;
        if let Some(label) = self.label {
            field.label = label;
        }
        field.description = self.description;
        if let Some(list_view) = self.list_view {
            field.list_view = list_view;
        }
        if let Some(create_view) = self.create_view {
            field.create_view = create_view;
        }
        if let Some(item_view) = self.item_view {
            field.item_view = item_view;
        }
        Ok(field)
    }
}

impl ListDefinition {
    pub fn into_list_meta(self, views: &ViewsTable) -> Result<ListMeta, SchemaError> {
        let key = self.key;
        let fields = self
            .fields
            .into_iter()
            .map(|field| field.into_field_meta(&key, views))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = ListMeta::builder(key.clone())
            .description(self.description)
            .id_kind(self.id_kind)
            .hide_create(self.hide_create)
            .hide_delete(self.hide_delete)
            .fields(fields);

        if let Some(graphql_plural) = self.graphql_plural {
            builder = builder.graphql_plural(graphql_plural);
        }
        if let Some(path) = self.path {
            builder = builder.path(path);
        }
        if let Some(label) = self.label {
            builder = builder.label(label);
        }
        if let Some(singular) = self.singular {
            builder = builder.singular(singular);
        }
        if let Some(plural) = self.plural {
            builder = builder.plural(plural);
        }
        if let Some(label_field) = self.label_field {
            builder = builder.label_field(label_field);
        }
        if let Some(columns) = self.initial_columns {
            builder = builder.initial_columns(columns);
        }
        if let Some(search_fields) = self.initial_search_fields {
            builder = builder.initial_search_fields(search_fields);
        }
        if let Some(sort) = self.initial_sort {
            builder = builder.initial_sort(sort);
        }
        if let Some(page_size) = self.page_size {
            builder = builder.page_size(page_size);
        }
        if let Some(names) = self.gql_names {
            builder = builder.gql_names(names);
        }

        builder.build()
    }
}

/// Every list of an admin schema, keyed by list key in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminMeta {
    pub views: ViewsTable,
    pub lists: IndexMap<String, ListMeta>,
}

impl AdminMeta {
    pub fn from_definition(definition: AdminMetaDefinition) -> Result<Self, SchemaError> {
        let views = if definition.views.is_empty() {
            ViewsTable::default()
        } else {
            ViewsTable::from_names(&definition.views)?
        };

        let mut lists = IndexMap::with_capacity(definition.lists.len());
        for list_definition in definition.lists {
            let list = list_definition.into_list_meta(&views)?;
            if lists.contains_key(&list.key) {
                return Err(SchemaError::DuplicateList(list.key));
            }
            lists.insert(list.key.clone(), list);
        }

        Ok(Self { views, lists })
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Self::from_definition(serde_json::from_str(json)?)
    }

    pub fn list(&self, key: &str) -> Option<&ListMeta> {
        self.lists.get(key)
    }
}
