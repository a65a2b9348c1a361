// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_model::{FieldConfig, FieldMeta, FieldTypeKey};
use serde_json::{Map, Value};

use crate::controller::{FieldController, item_value};
use crate::error::{DeserializeError, FieldTypeError};
use crate::registry::{FieldImplementation, FieldViews, field_views, with_config};
use crate::value::FieldValue;

/// Computed, read-only fields. Display only: no filters and nothing to send back.
pub struct VirtualFieldType;

impl FieldImplementation for VirtualFieldType {
    fn key(&self) -> FieldTypeKey {
        FieldTypeKey::Virtual
    }

    fn views(&self) -> FieldViews {
        field_views!("virtual", no_filter)
    }

    fn graphql_selection(&self, path: &str, config: &FieldConfig) -> Option<String> {
        match config {
            FieldConfig::Virtual(config) if !config.query.is_empty() => {
                Some(format!("{path}{}", config.query))
            }
            _ => None,
        }
    }

    fn controller(
        &self,
        field: &FieldMeta,
    ) -> Option<Result<Box<dyn FieldController>, FieldTypeError>> {
        Some(with_config(
            field,
            FieldTypeKey::Virtual,
            |config| match config {
                FieldConfig::Virtual(config) => Some(config),
                _ => None,
            },
            |_| {
                Ok(Box::new(VirtualController {
                    meta: field.clone(),
                }) as Box<dyn FieldController>)
            },
        ))
    }
}

#[derive(Debug)]
pub struct VirtualController {
    meta: FieldMeta,
}

impl FieldController for VirtualController {
    fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    fn default_value(&self) -> FieldValue {
        FieldValue::Virtual(Value::Null)
    }

    fn deserialize(&self, item: &Map<String, Value>) -> Result<FieldValue, DeserializeError> {
        Ok(FieldValue::Virtual(
            item_value(item, &self.meta.path).clone(),
        ))
    }

    fn serialize(&self, _value: &FieldValue) -> Map<String, Value> {
        Map::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_model::field::VirtualConfig;
    use multiplatform_test::multiplatform_test;
    use serde_json::json;

    #[multiplatform_test]
    fn appends_configured_query() {
        let field = FieldMeta::new(
            "author",
            FieldConfig::Virtual(VirtualConfig {
                query: " { id name }".to_string(),
            }),
        );
        let controller = VirtualFieldType.controller(&field).unwrap().unwrap();

        assert_eq!(controller.graphql_selection(), "author { id name }");
        assert!(controller.filter().is_none());
        assert!(controller.validate(&FieldValue::Virtual(json!(1))).is_valid());
        assert!(
            controller
                .serialize(&FieldValue::Virtual(json!({ "id": "1" })))
                .is_empty()
        );
    }

    #[multiplatform_test]
    fn bare_path_without_query() {
        let field = FieldMeta::new("wordCount", FieldConfig::Virtual(Default::default()));
        let controller = VirtualFieldType.controller(&field).unwrap().unwrap();

        assert_eq!(controller.graphql_selection(), "wordCount");
        assert_eq!(
            controller
                .deserialize(json!({ "wordCount": 120 }).as_object().unwrap())
                .unwrap(),
            FieldValue::Virtual(json!(120))
        );
    }
}
