// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_model::{
    FieldConfig, FieldMeta, FieldTypeKey,
    field::{TimestampConfig, TimestampDefault},
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

use super::{negated_clause, operator_clause};
use crate::controller::{FieldController, Validation, item_value, single};
use crate::error::{DeserializeError, FieldTypeError};
use crate::registry::{
    FieldImplementation, FieldViews, FilterTypeInfo, FilterTypes, field_views, with_config,
};
use crate::value::FieldValue;

pub struct TimestampFieldType;

impl FieldImplementation for TimestampFieldType {
    fn key(&self) -> FieldTypeKey {
        FieldTypeKey::Timestamp
    }

    fn views(&self) -> FieldViews {
        field_views!("timestamp")
    }

    fn filter_types(&self, _config: &FieldConfig) -> FilterTypes {
        FilterTypes::from([
            ("equals", FilterTypeInfo::new("Is exactly", Value::Null)),
            ("not", FilterTypeInfo::new("Is not exactly", Value::Null)),
            ("lt", FilterTypeInfo::new("Is before", Value::Null)),
            ("lte", FilterTypeInfo::new("Is on or before", Value::Null)),
            ("gt", FilterTypeInfo::new("Is after", Value::Null)),
            ("gte", FilterTypeInfo::new("Is on or after", Value::Null)),
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
            "not" => Some(negated_clause(path, "equals", value.clone())),
            "equals" | "lt" | "lte" | "gt" | "gte" => {
                Some(operator_clause(path, operator, value.clone()))
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
            FieldTypeKey::Timestamp,
            |config| match config {
                FieldConfig::Timestamp(config) => Some(config),
                _ => None,
            },
            |config| {
                Ok(Box::new(TimestampController {
                    meta: field.clone(),
                    config: config.clone(),
                }) as Box<dyn FieldController>)
            },
        ))
    }
}

#[derive(Debug)]
pub struct TimestampController {
    meta: FieldMeta,
    config: TimestampConfig,
}

impl FieldController for TimestampController {
    fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    fn default_value(&self) -> FieldValue {
        FieldValue::Timestamp(match &self.config.default_value {
            None => None,
            Some(TimestampDefault::Now) => Some(Utc::now().to_rfc3339()),
            Some(TimestampDefault::Value { value }) => Some(value.clone()),
        })
    }

    fn deserialize(&self, item: &Map<String, Value>) -> Result<FieldValue, DeserializeError> {
        match item_value(item, &self.meta.path) {
            Value::Null => Ok(FieldValue::Timestamp(None)),
            Value::String(timestamp) => Ok(FieldValue::Timestamp(Some(timestamp.clone()))),
            other => Err(DeserializeError::unexpected(
                &self.meta.path,
                "a timestamp string",
                other,
            )),
        }
    }

    fn serialize(&self, value: &FieldValue) -> Map<String, Value> {
        match value {
            FieldValue::Timestamp(None) => single(&self.meta.path, Value::Null),
            FieldValue::Timestamp(Some(timestamp)) => match DateTime::parse_from_rfc3339(timestamp)
            {
                Ok(parsed) => single(&self.meta.path, json!(parsed.to_rfc3339())),
                Err(_) => Map::new(),
            },
            _ => Map::new(),
        }
    }

    fn validate(&self, value: &FieldValue) -> Validation {
        let label = &self.meta.label;
        match value {
            FieldValue::Timestamp(None) if self.config.is_required => {
                Validation::invalid(format!("{label} is required"))
            }
            FieldValue::Timestamp(None) => Validation::Valid,
            FieldValue::Timestamp(Some(timestamp)) => {
                match DateTime::parse_from_rfc3339(timestamp) {
                    Ok(_) => Validation::Valid,
                    Err(_) => Validation::invalid(format!("{label} must be a valid date and time")),
                }
            }
            _ => Validation::Invalid(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiplatform_test::multiplatform_test;

    fn controller(config: TimestampConfig) -> Box<dyn FieldController> {
        TimestampFieldType
            .controller(&FieldMeta::new(
                "publishedAt",
                FieldConfig::Timestamp(config),
            ))
            .unwrap()
            .unwrap()
    }

    #[multiplatform_test]
    fn filters() {
        let config = FieldConfig::Timestamp(Default::default());
        let value = json!("2024-01-01T00:00:00Z");
        assert_eq!(
            TimestampFieldType
                .transform_filter("publishedAt", "not", &value, &config)
                .map(Value::Object),
            Some(json!({ "publishedAt": { "not": { "equals": "2024-01-01T00:00:00Z" } } }))
        );
        assert_eq!(
            TimestampFieldType
                .transform_filter("publishedAt", "gte", &value, &config)
                .map(Value::Object),
            Some(json!({ "publishedAt": { "gte": "2024-01-01T00:00:00Z" } }))
        );
    }

    #[multiplatform_test]
    fn defaults() {
        assert_eq!(
            controller(TimestampConfig {
                default_value: Some(TimestampDefault::Value {
                    value: "2024-05-01T10:00:00Z".to_string()
                }),
                is_required: false,
            })
            .default_value(),
            FieldValue::Timestamp(Some("2024-05-01T10:00:00Z".to_string()))
        );

        let FieldValue::Timestamp(Some(now)) = controller(TimestampConfig {
            default_value: Some(TimestampDefault::Now),
            is_required: false,
        })
        .default_value() else {
            panic!("expected a timestamp");
        };
        assert!(DateTime::parse_from_rfc3339(&now).is_ok());
    }

    #[multiplatform_test]
    fn validation() {
        let required = controller(TimestampConfig {
            default_value: None,
            is_required: true,
        });

        assert_eq!(
            required.validate(&FieldValue::Timestamp(None)).message(),
            Some("Published At is required")
        );
        assert_eq!(
            required
                .validate(&FieldValue::Timestamp(Some("yesterday".to_string())))
                .message(),
            Some("Published At must be a valid date and time")
        );
        assert!(
            required
                .validate(&FieldValue::Timestamp(Some(
                    "2024-05-01T10:00:00+02:00".to_string()
                )))
                .is_valid()
        );
    }
}
