// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_model::{FieldConfig, FieldMeta, FieldTypeKey, field::CheckboxConfig};
use serde_json::{Map, Value, json};
use tracing::debug;

use super::{negated_clause, operator_clause};
use crate::controller::{FieldController, item_value, single};
use crate::error::{DeserializeError, FieldTypeError};
use crate::registry::{
    FieldImplementation, FieldViews, FilterTypeInfo, FilterTypes, field_views, with_config,
};
use crate::value::FieldValue;

pub struct CheckboxFieldType;

impl FieldImplementation for CheckboxFieldType {
    fn key(&self) -> FieldTypeKey {
        FieldTypeKey::Checkbox
    }

    fn views(&self) -> FieldViews {
        field_views!("checkbox")
    }

    fn filter_types(&self, _config: &FieldConfig) -> FilterTypes {
        FilterTypes::from([
            ("is", FilterTypeInfo::new("Is", json!(true))),
            ("not", FilterTypeInfo::new("Is not", json!(true))),
        ])
    }

    fn transform_filter(
        &self,
        path: &str,
        operator: &str,
        value: &Value,
        _config: &FieldConfig,
    ) -> Option<Map<String, Value>> {
        let Value::Bool(checked) = value else {
            debug!(path, operator, %value, "Ignoring checkbox filter with a non-boolean value");
            return None;
        };

        match operator {
            "is" => Some(operator_clause(path, "equals", json!(checked))),
            "not" => Some(negated_clause(path, "equals", json!(checked))),
            _ => None,
        }
    }

    fn controller(
        &self,
        field: &FieldMeta,
    ) -> Option<Result<Box<dyn FieldController>, FieldTypeError>> {
        Some(with_config(
            field,
            FieldTypeKey::Checkbox,
            |config| match config {
                FieldConfig::Checkbox(config) => Some(config),
                _ => None,
            },
            |config| {
                Ok(Box::new(CheckboxController {
                    meta: field.clone(),
                    config: *config,
                }) as Box<dyn FieldController>)
            },
        ))
    }
}

#[derive(Debug)]
pub struct CheckboxController {
    meta: FieldMeta,
    config: CheckboxConfig,
}

impl FieldController for CheckboxController {
    fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    fn default_value(&self) -> FieldValue {
        FieldValue::Checkbox(self.config.default_value)
    }

    fn deserialize(&self, item: &Map<String, Value>) -> Result<FieldValue, DeserializeError> {
        match item_value(item, &self.meta.path) {
            Value::Null => Ok(FieldValue::Checkbox(false)),
            Value::Bool(checked) => Ok(FieldValue::Checkbox(*checked)),
            other => Err(DeserializeError::unexpected(&self.meta.path, "a boolean", other)),
        }
    }

    fn serialize(&self, value: &FieldValue) -> Map<String, Value> {
        match value {
            FieldValue::Checkbox(checked) => single(&self.meta.path, json!(checked)),
            _ => Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiplatform_test::multiplatform_test;

    #[multiplatform_test]
    fn filters_need_booleans() {
        let config = FieldConfig::Checkbox(Default::default());
        let filter = |operator: &str, value: Value| {
            CheckboxFieldType
                .transform_filter("isPublished", operator, &value, &config)
                .map(Value::Object)
        };

        assert_eq!(
            filter("is", json!(true)),
            Some(json!({ "isPublished": { "equals": true } }))
        );
        assert_eq!(
            filter("not", json!(false)),
            Some(json!({ "isPublished": { "not": { "equals": false } } }))
        );
        assert_eq!(filter("is", json!("true")), None);
    }

    #[multiplatform_test]
    fn null_reads_as_unchecked() {
        let field = FieldMeta::new(
            "isPublished",
            FieldConfig::Checkbox(CheckboxConfig {
                default_value: true,
            }),
        );
        let controller = CheckboxFieldType.controller(&field).unwrap().unwrap();

        assert_eq!(controller.default_value(), FieldValue::Checkbox(true));
        assert_eq!(
            controller
                .deserialize(json!({ "isPublished": null }).as_object().unwrap())
                .unwrap(),
            FieldValue::Checkbox(false)
        );
        assert_eq!(
            Value::Object(controller.serialize(&FieldValue::Checkbox(true))),
            json!({ "isPublished": true })
        );
    }
}
