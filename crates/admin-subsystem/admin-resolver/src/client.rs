// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Client-side enhancement: every field of a list gets its view components and a controller.
//!
//! A field whose controller can't be built is logged and kept without one, so a single bad
//! field declaration leaves the rest of the list usable. Enhanced lists are built once per
//! schema and then only read; [`ClientAdminMeta`] holds them.

use admin_field_types::{FieldController, FieldViews, get_field};
use admin_model::{AdminMeta, FieldMeta, FieldMode, ListMeta};
use indexmap::IndexMap;
use tracing::warn;

use crate::error::{DegradedField, ResolverError};

#[derive(Debug)]
pub struct EnhancedField {
    pub meta: FieldMeta,
    pub views: FieldViews,
    /// `None` for types without a controller and for degraded fields
    pub controller: Option<Box<dyn FieldController>>,
    pub item_view_mode: FieldMode,
}

impl EnhancedField {
    /// The field as declared, with nothing attached.
    pub fn bare(meta: &FieldMeta) -> Self {
        Self {
            meta: meta.clone(),
            views: FieldViews::default(),
            controller: None,
            item_view_mode: meta.item_view.field_mode,
        }
    }

    pub fn path(&self) -> &str {
        &self.meta.path
    }
}

pub fn enhance_field(meta: &FieldMeta) -> Result<EnhancedField, DegradedField> {
    let implementation = get_field(meta.field_type);

    let controller = implementation
        .controller(meta)
        .transpose()
        .map_err(|source| DegradedField {
            fallback: EnhancedField::bare(meta),
            source,
        })?;

    Ok(EnhancedField {
        meta: meta.clone(),
        views: implementation.views(),
        controller,
        item_view_mode: meta.item_view.field_mode,
    })
}

#[derive(Debug)]
pub struct ClientList {
    pub list: ListMeta,
    pub fields: IndexMap<String, EnhancedField>,
    /// Paths of fields that fell back to their bare declaration
    pub degraded: Vec<String>,
}

impl ClientList {
    pub fn field(&self, path: &str) -> Option<&EnhancedField> {
        self.fields.get(path)
    }

    pub fn controller(&self, path: &str) -> Option<&dyn FieldController> {
        self.fields
            .get(path)
            .and_then(|field| field.controller.as_deref())
    }
}

pub fn enhance_list_for_client(list: &ListMeta) -> ClientList {
    let mut degraded = vec![];

    let fields = list
        .fields
        .iter()
        .map(|(path, meta)| {
            let field = enhance_field(meta).unwrap_or_else(|e| {
                warn!(list = %list.key, field = %path, error = %e, "Using the bare field");
                degraded.push(path.clone());
                e.fallback
            });
            (path.clone(), field)
        })
        .collect();

    ClientList {
        list: list.clone(),
        fields,
        degraded,
    }
}

/// One enhanced list per list key.
#[derive(Debug)]
pub struct ClientAdminMeta {
    pub lists: IndexMap<String, ClientList>,
}

impl ClientAdminMeta {
    pub fn new(meta: &AdminMeta) -> Self {
        Self {
            lists: meta
                .lists
                .iter()
                .map(|(key, list)| (key.clone(), enhance_list_for_client(list)))
                .collect(),
        }
    }

    pub fn list(&self, key: &str) -> Result<&ClientList, ResolverError> {
        self.lists
            .get(key)
            .ok_or_else(|| ResolverError::UnknownList(key.to_string()))
    }
}

pub fn enhance_admin_meta_for_client(meta: &AdminMeta) -> ClientAdminMeta {
    ClientAdminMeta::new(meta)
}
