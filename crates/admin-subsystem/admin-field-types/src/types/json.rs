// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! JSON fields, edited as text.

use admin_model::{FieldConfig, FieldMeta, FieldTypeKey, field::JsonConfig};
use serde_json::{Map, Value};

use crate::controller::{FieldController, Validation, item_value, single};
use crate::error::{DeserializeError, FieldTypeError};
use crate::registry::{FieldImplementation, FieldViews, field_views, with_config};
use crate::value::FieldValue;

pub struct JsonFieldType;

impl FieldImplementation for JsonFieldType {
    fn key(&self) -> FieldTypeKey {
        FieldTypeKey::Json
    }

    fn views(&self) -> FieldViews {
        field_views!("json", no_filter)
    }

    fn controller(
        &self,
        field: &FieldMeta,
    ) -> Option<Result<Box<dyn FieldController>, FieldTypeError>> {
        Some(with_config(
            field,
            FieldTypeKey::Json,
            |config| match config {
                FieldConfig::Json(config) => Some(config),
                _ => None,
            },
            |config| {
                Ok(Box::new(JsonController {
                    meta: field.clone(),
                    config: config.clone(),
                }) as Box<dyn FieldController>)
            },
        ))
    }
}

fn to_editor_text(value: &Value) -> Result<String, serde_json::Error> {
    match value {
        Value::Null => Ok(String::new()),
        value => serde_json::to_string_pretty(value),
    }
}

#[derive(Debug)]
pub struct JsonController {
    meta: FieldMeta,
    config: JsonConfig,
}

impl FieldController for JsonController {
    fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    fn default_value(&self) -> FieldValue {
        FieldValue::Json(to_editor_text(&self.config.default_value).unwrap_or_default())
    }

    fn deserialize(&self, item: &Map<String, Value>) -> Result<FieldValue, DeserializeError> {
        to_editor_text(item_value(item, &self.meta.path))
            .map(FieldValue::Json)
            .map_err(|e| DeserializeError::Malformed {
                path: self.meta.path.clone(),
                message: e.to_string(),
            })
    }

    /// Empty text clears the field. Text that doesn't parse sends nothing; validation reports it.
    fn serialize(&self, value: &FieldValue) -> Map<String, Value> {
        let FieldValue::Json(text) = value else {
            return Map::new();
        };

        if text.trim().is_empty() {
            return single(&self.meta.path, Value::Null);
        }
        match serde_json::from_str(text) {
            Ok(parsed) => single(&self.meta.path, parsed),
            Err(_) => Map::new(),
        }
    }

    fn validate(&self, value: &FieldValue) -> Validation {
        match value {
            FieldValue::Json(text) if text.trim().is_empty() => Validation::Valid,
            FieldValue::Json(text) => match serde_json::from_str::<Value>(text) {
                Ok(_) => Validation::Valid,
                Err(_) => Validation::invalid(format!("{} must be valid JSON", self.meta.label)),
            },
            _ => Validation::Invalid(None),
        }
    }
}
