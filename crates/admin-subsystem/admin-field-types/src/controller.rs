// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The per-field runtime contract.
//!
//! A controller is built from a field's static metadata every time a list is enhanced for
//! client use. It holds no state besides that metadata: every method is a pure function of its
//! arguments.

use std::fmt::Debug;

use admin_model::FieldMeta;
use serde_json::{Map, Value};

use crate::error::DeserializeError;
use crate::registry::{FieldImplementation, FilterTypes, get_field};
use crate::value::FieldValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Invalid, optionally with a message to show next to the field
    Invalid(Option<String>),
}

impl Validation {
    pub fn invalid(message: impl Into<String>) -> Self {
        Validation::Invalid(Some(message.into()))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(message) => message.as_deref(),
        }
    }
}

pub trait FieldController: Debug + Send + Sync {
    fn meta(&self) -> &FieldMeta;

    fn default_value(&self) -> FieldValue;

    /// Read this field out of an item query result.
    fn deserialize(&self, item: &Map<String, Value>) -> Result<FieldValue, DeserializeError>;

    /// The mutation input for this field. An empty map means "send nothing".
    fn serialize(&self, value: &FieldValue) -> Map<String, Value>;

    fn validate(&self, _value: &FieldValue) -> Validation {
        Validation::Valid
    }

    /// `None` defers to deep inequality of the two values.
    fn has_changed(&self, _original: &FieldValue, _current: &FieldValue) -> Option<bool> {
        None
    }

    fn path(&self) -> &str {
        &self.meta().path
    }

    fn label(&self) -> &str {
        &self.meta().label
    }

    fn description(&self) -> Option<&str> {
        self.meta().description.as_deref()
    }

    fn graphql_selection(&self) -> String {
        let meta = self.meta();
        get_field(meta.field_type)
            .graphql_selection(&meta.path, &meta.config)
            .unwrap_or_else(|| meta.path.clone())
    }

    fn filter(&self) -> Option<FieldFilter<'_>> {
        FieldFilter::new(self.meta())
    }
}

/// The filter facet of a filterable field.
pub struct FieldFilter<'a> {
    field: &'a FieldMeta,
    implementation: &'static dyn FieldImplementation,
    types: FilterTypes,
}

impl<'a> FieldFilter<'a> {
    /// `None` when the field isn't filterable or its type has no operators.
    pub fn new(field: &'a FieldMeta) -> Option<Self> {
        if !field.is_filterable {
            return None;
        }

        let implementation = get_field(field.field_type);
        let types = implementation.filter_types(&field.config);
        (!types.is_empty()).then_some(Self {
            field,
            implementation,
            types,
        })
    }

    pub fn types(&self) -> &FilterTypes {
        &self.types
    }

    /// The partial where clause for one operator. `None` for unknown operators or unusable values.
    pub fn graphql(&self, operator: &str, value: &Value) -> Option<Map<String, Value>> {
        if !self.types.contains_key(operator) {
            return None;
        }
        self.implementation
            .transform_filter(&self.field.path, operator, value, &self.field.config)
    }
}

impl Debug for FieldFilter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldFilter")
            .field("path", &self.field.path)
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Shorthand for the single-entry maps most serializers produce.
pub(crate) fn single(path: &str, value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(path.to_string(), value);
    map
}

/// The item's value for `path`, with a missing key read as null.
pub(crate) fn item_value<'a>(item: &'a Map<String, Value>, path: &str) -> &'a Value {
    item.get(path).unwrap_or(&Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_model::FieldConfig;
    use admin_model::field::{
        LengthValidation, PasswordConfig, PasswordValidation, RelationshipConfig,
        RelationshipDisplayMode, TextConfig, TextValidation, TimestampConfig,
    };
    use multiplatform_test::multiplatform_test;
    use serde_json::json;

    fn controller(field: &FieldMeta) -> Box<dyn FieldController> {
        get_field(field.field_type)
            .controller(field)
            .unwrap()
            .unwrap()
    }

    fn relationship(path: &str, many: bool, display_mode: RelationshipDisplayMode) -> FieldMeta {
        FieldMeta::new(
            path,
            FieldConfig::Relationship(RelationshipConfig {
                ref_list_key: "User".to_string(),
                ref_label_field: "name".to_string(),
                many,
                display_mode,
            }),
        )
    }

    #[multiplatform_test]
    fn stored_items_read_back_as_valid() {
        let cases = [
            (
                FieldMeta::new(
                    "title",
                    FieldConfig::Text(TextConfig {
                        validation: TextValidation {
                            is_required: true,
                            length: LengthValidation {
                                min: Some(2),
                                max: Some(20),
                            },
                            match_: None,
                        },
                        ..Default::default()
                    }),
                ),
                json!({ "title": "Hello" }),
            ),
            (
                FieldMeta::new(
                    "publishedAt",
                    FieldConfig::Timestamp(TimestampConfig {
                        is_required: true,
                        ..Default::default()
                    }),
                ),
                json!({ "publishedAt": "2024-05-01T10:00:00.000Z" }),
            ),
            (
                FieldMeta::new("metadata", FieldConfig::Json(Default::default())),
                json!({ "metadata": { "tags": ["a", "b"], "version": 2 } }),
            ),
            (
                FieldMeta::new("metadata", FieldConfig::Json(Default::default())),
                json!({ "metadata": null }),
            ),
            (
                FieldMeta::new(
                    "password",
                    FieldConfig::Password(PasswordConfig {
                        validation: PasswordValidation {
                            is_required: true,
                            ..Default::default()
                        },
                        ..Default::default()
                    }),
                ),
                json!({ "password": { "isSet": true } }),
            ),
            (
                FieldMeta::new("avatar", FieldConfig::Image(Default::default())),
                json!({ "avatar": {
                    "id": "img1",
                    "src": "/images/img1.png",
                    "extension": "png",
                    "width": 10,
                    "height": 20,
                    "filesize": 1024
                } }),
            ),
            (
                relationship("author", false, RelationshipDisplayMode::Select),
                json!({ "author": { "id": "u1", "label": "Ada" } }),
            ),
            (
                relationship("tags", true, RelationshipDisplayMode::Select),
                json!({ "tags": [{ "id": "t1", "label": "Rust" }] }),
            ),
            (
                relationship("tags", true, RelationshipDisplayMode::Count),
                json!({ "tagsCount": 3 }),
            ),
        ];

        for (field, item) in cases {
            let controller = controller(&field);
            let value = controller.deserialize(item.as_object().unwrap()).unwrap();
            assert_eq!(
                controller.validate(&value),
                Validation::Valid,
                "{} read from {item}",
                field.path
            );
        }
    }

    #[multiplatform_test]
    fn text_filter_facet() {
        let field = FieldMeta::new("name", FieldConfig::Text(Default::default())).filterable();
        let controller = controller(&field);
        let filter = controller.filter().unwrap();

        assert_eq!(
            filter.types().keys().copied().collect::<Vec<_>>(),
            [
                "contains_i",
                "not_contains_i",
                "is_i",
                "not_i",
                "starts_with_i",
                "not_starts_with_i",
                "ends_with_i",
                "not_ends_with_i",
            ]
        );

        for operator in filter.types().keys() {
            assert_eq!(
                filter.graphql(operator, &json!("x")),
                get_field(field.field_type).transform_filter(
                    "name",
                    operator,
                    &json!("x"),
                    &field.config
                )
            );
        }
        assert_eq!(filter.graphql("frobnicate", &json!("x")), None);
    }

    #[multiplatform_test]
    fn checkbox_filter_facet() {
        let field =
            FieldMeta::new("isActive", FieldConfig::Checkbox(Default::default())).filterable();
        let controller = controller(&field);
        let filter = controller.filter().unwrap();

        assert_eq!(
            filter.types().keys().copied().collect::<Vec<_>>(),
            ["is", "not"]
        );
        assert_eq!(
            filter.graphql("is", &json!(true)).map(Value::Object),
            Some(json!({ "isActive": { "equals": true } }))
        );
        assert_eq!(
            filter.graphql("not", &json!(false)).map(Value::Object),
            Some(json!({ "isActive": { "not": { "equals": false } } }))
        );
        assert_eq!(filter.graphql("is", &json!("yes")), None);
        assert_eq!(filter.graphql("contains_i", &json!(true)), None);
    }

    #[multiplatform_test]
    fn unfilterable_field_has_no_filter() {
        let field = FieldMeta::new("isActive", FieldConfig::Checkbox(Default::default()));
        assert!(controller(&field).filter().is_none());
    }
}
