// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_model::{FieldConfig, FieldMeta, FieldTypeKey};
use serde_json::{Map, Value, json};
use tracing::debug;

use super::{negated_clause, operator_clause, parse_id_list};
use crate::controller::{FieldController, item_value};
use crate::error::{DeserializeError, FieldTypeError};
use crate::registry::{
    FieldImplementation, FieldViews, FilterTypeInfo, FilterTypes, field_views, with_config,
};
use crate::value::FieldValue;

pub struct IdFieldType;

impl FieldImplementation for IdFieldType {
    fn key(&self) -> FieldTypeKey {
        FieldTypeKey::Id
    }

    fn views(&self) -> FieldViews {
        field_views!("id")
    }

    fn filter_types(&self, _config: &FieldConfig) -> FilterTypes {
        FilterTypes::from([
            ("is", FilterTypeInfo::new("Is exactly", json!(""))),
            ("not", FilterTypeInfo::new("Is not exactly", json!(""))),
            ("gt", FilterTypeInfo::new("Is greater than", json!(""))),
            ("lt", FilterTypeInfo::new("Is less than", json!(""))),
            ("gte", FilterTypeInfo::new("Is greater than or equal to", json!(""))),
            ("lte", FilterTypeInfo::new("Is less than or equal to", json!(""))),
            ("in", FilterTypeInfo::new("Is one of", json!(""))),
            ("not_in", FilterTypeInfo::new("Is not one of", json!(""))),
        ])
    }

    fn transform_filter(
        &self,
        path: &str,
        operator: &str,
        value: &Value,
        _config: &FieldConfig,
    ) -> Option<Map<String, Value>> {
        match operator {
            "is" => Some(operator_clause(path, "equals", value.clone())),
            "not" => Some(negated_clause(path, "equals", value.clone())),
            "lt" | "lte" | "gt" | "gte" => Some(operator_clause(path, operator, value.clone())),
            "in" | "not_in" => {
                let Some(ids) = parse_id_list(value) else {
                    debug!(path, operator, %value, "Ignoring id list filter with unusable value");
                    return None;
                };
                let operator = if operator == "in" { "in" } else { "notIn" };
                Some(operator_clause(path, operator, Value::Array(ids)))
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
            FieldTypeKey::Id,
            |config| match config {
                FieldConfig::Id(config) => Some(config),
                _ => None,
            },
            |_| {
                Ok(Box::new(IdController {
                    meta: field.clone(),
                }) as Box<dyn FieldController>)
            },
        ))
    }
}

#[derive(Debug)]
pub struct IdController {
    meta: FieldMeta,
}

impl FieldController for IdController {
    fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    fn default_value(&self) -> FieldValue {
        FieldValue::Id(None)
    }

    fn deserialize(&self, item: &Map<String, Value>) -> Result<FieldValue, DeserializeError> {
        match item_value(item, &self.meta.path) {
            Value::Null => Ok(FieldValue::Id(None)),
            Value::String(id) => Ok(FieldValue::Id(Some(id.clone()))),
            Value::Number(id) => Ok(FieldValue::Id(Some(id.to_string()))),
            other => Err(DeserializeError::unexpected(
                &self.meta.path,
                "an id",
                other,
            )),
        }
    }

    /// Ids are assigned by the backend and never sent.
    fn serialize(&self, _value: &FieldValue) -> Map<String, Value> {
        Map::new()
    }
}
