// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The field type registry.
//!
//! Every [`FieldTypeKey`] maps to one static [`FieldImplementation`]. An implementation exposes
//! independent, optional facets: a GraphQL selection, filter operators with their where-clause
//! transform, a controller factory, and view component identifiers. A missing facet means
//! identity behavior: the bare field path as the selection, no filter, no controller.

use admin_model::{FieldConfig, FieldMeta, FieldTypeKey};
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::controller::FieldController;
use crate::error::FieldTypeError;
use crate::types::{
    checkbox::CheckboxFieldType, id::IdFieldType, image::ImageFieldType, json::JsonFieldType,
    password::PasswordFieldType, relationship::RelationshipFieldType, text::TextFieldType,
    timestamp::TimestampFieldType, virtual_field::VirtualFieldType,
};

#[derive(Debug, Clone, PartialEq)]
pub struct FilterTypeInfo {
    pub label: &'static str,
    /// Value a new filter of this type starts with
    pub initial_value: Value,
}

impl FilterTypeInfo {
    pub fn new(label: &'static str, initial_value: Value) -> Self {
        Self {
            label,
            initial_value,
        }
    }
}

/// Filter operators of a field type, in display order.
pub type FilterTypes = IndexMap<&'static str, FilterTypeInfo>;

/// Identifiers of the UI components a field type provides. Rendering happens elsewhere; the
/// engine only carries the names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldViews {
    pub field: Option<&'static str>,
    pub cell: Option<&'static str>,
    pub filter: Option<&'static str>,
    pub card_value: Option<&'static str>,
}

pub trait FieldImplementation: Send + Sync {
    fn key(&self) -> FieldTypeKey;

    fn views(&self) -> FieldViews {
        FieldViews::default()
    }

    /// `None` selects the bare path.
    fn graphql_selection(&self, _path: &str, _config: &FieldConfig) -> Option<String> {
        None
    }

    fn filter_types(&self, _config: &FieldConfig) -> FilterTypes {
        FilterTypes::new()
    }

    /// The partial where clause for `operator` applied to `value`. `None` drops the filter.
    fn transform_filter(
        &self,
        _path: &str,
        _operator: &str,
        _value: &Value,
        _config: &FieldConfig,
    ) -> Option<Map<String, Value>> {
        None
    }

    /// The free-text search clause for this field, for types that support searching.
    fn search_filter(
        &self,
        _path: &str,
        _term: &str,
        _config: &FieldConfig,
    ) -> Option<Map<String, Value>> {
        None
    }

    fn is_searchable(&self) -> bool {
        false
    }

    fn controller(
        &self,
        _field: &FieldMeta,
    ) -> Option<Result<Box<dyn FieldController>, FieldTypeError>> {
        None
    }
}

pub fn get_field(key: FieldTypeKey) -> &'static dyn FieldImplementation {
    match key {
        FieldTypeKey::Id => &IdFieldType,
        FieldTypeKey::Text => &TextFieldType,
        FieldTypeKey::Checkbox => &CheckboxFieldType,
        FieldTypeKey::Timestamp => &TimestampFieldType,
        FieldTypeKey::Relationship => &RelationshipFieldType,
        FieldTypeKey::Virtual => &VirtualFieldType,
        FieldTypeKey::Json => &JsonFieldType,
        FieldTypeKey::Password => &PasswordFieldType,
        FieldTypeKey::Image => &ImageFieldType,
    }
}

/// Component identifiers named `<type>/<Component>`.
macro_rules! field_views {
    ($type_name:literal) => {
        $crate::registry::FieldViews {
            field: Some(concat!($type_name, "/Field")),
            cell: Some(concat!($type_name, "/Cell")),
            filter: Some(concat!($type_name, "/Filter")),
            card_value: Some(concat!($type_name, "/CardValue")),
        }
    };
    ($type_name:literal, no_filter) => {
        $crate::registry::FieldViews {
            filter: None,
            ..$crate::registry::field_views!($type_name)
        }
    };
}

pub(crate) use field_views;

/// Checks that `field` carries the configuration `expected` and hands it to `build`.
pub(crate) fn with_config<'a, C: 'a, T>(
    field: &'a FieldMeta,
    expected: FieldTypeKey,
    extract: impl FnOnce(&'a FieldConfig) -> Option<&'a C>,
    build: impl FnOnce(&'a C) -> Result<T, FieldTypeError>,
) -> Result<T, FieldTypeError> {
    match extract(&field.config) {
        Some(config) if field.field_type == expected => build(config),
        _ => Err(FieldTypeError::ConfigMismatch {
            path: field.path.clone(),
            expected,
            found: field.config.field_type(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiplatform_test::multiplatform_test;

    #[multiplatform_test]
    fn every_key_is_registered() {
        for key in FieldTypeKey::ALL {
            assert_eq!(get_field(key).key(), key);
        }
    }

    #[multiplatform_test]
    fn display_only_types_have_no_filter() {
        let virtual_views = get_field(FieldTypeKey::Virtual).views();
        assert_eq!(virtual_views.filter, None);
        assert_eq!(virtual_views.field, Some("virtual/Field"));

        assert_eq!(get_field(FieldTypeKey::Text).views().filter, Some("text/Filter"));
    }
}
