// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_model::{FieldConfig, FieldMeta, FieldTypeKey, field::PasswordConfig};
use serde_json::{Map, Value, json};
use tracing::debug;

use super::operator_clause;
use crate::controller::{FieldController, Validation, item_value, single};
use crate::error::{DeserializeError, FieldTypeError};
use crate::registry::{
    FieldImplementation, FieldViews, FilterTypeInfo, FilterTypes, field_views, with_config,
};
use crate::value::{FieldValue, PasswordValue};

pub struct PasswordFieldType;

impl FieldImplementation for PasswordFieldType {
    fn key(&self) -> FieldTypeKey {
        FieldTypeKey::Password
    }

    fn views(&self) -> FieldViews {
        field_views!("password")
    }

    fn graphql_selection(&self, path: &str, _config: &FieldConfig) -> Option<String> {
        Some(format!("{path} {{\n  isSet\n}}"))
    }

    fn filter_types(&self, _config: &FieldConfig) -> FilterTypes {
        FilterTypes::from([("is_set", FilterTypeInfo::new("Is set", json!(true)))])
    }

    fn transform_filter(
        &self,
        path: &str,
        operator: &str,
        value: &Value,
        _config: &FieldConfig,
    ) -> Option<Map<String, Value>> {
        match (operator, value) {
            ("is_set", Value::Bool(is_set)) => Some(operator_clause(path, "isSet", json!(is_set))),
            _ => {
                debug!(path, operator, %value, "Ignoring password filter");
                None
            }
        }
    }

    fn controller(
        &self,
        field: &FieldMeta,
    ) -> Option<Result<Box<dyn FieldController>, FieldTypeError>> {
        Some(with_config(
            field,
            FieldTypeKey::Password,
            |config| match config {
                FieldConfig::Password(config) => Some(config),
                _ => None,
            },
            |config| {
                Ok(Box::new(PasswordController {
                    meta: field.clone(),
                    config: config.clone(),
                }) as Box<dyn FieldController>)
            },
        ))
    }
}

#[derive(Debug)]
pub struct PasswordController {
    meta: FieldMeta,
    config: PasswordConfig,
}

impl FieldController for PasswordController {
    fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    fn default_value(&self) -> FieldValue {
        FieldValue::Password(PasswordValue::default())
    }

    fn deserialize(&self, item: &Map<String, Value>) -> Result<FieldValue, DeserializeError> {
        let is_set = match item_value(item, &self.meta.path) {
            Value::Null => false,
            Value::Object(status) => status
                .get("isSet")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            other => {
                return Err(DeserializeError::unexpected(
                    &self.meta.path,
                    "a password status",
                    other,
                ));
            }
        };

        Ok(FieldValue::Password(PasswordValue {
            is_set,
            entry: None,
        }))
    }

    /// Only a newly entered password is sent.
    fn serialize(&self, value: &FieldValue) -> Map<String, Value> {
        match value {
            FieldValue::Password(PasswordValue {
                entry: Some(entry), ..
            }) => single(&self.meta.path, json!(entry.value)),
            _ => Map::new(),
        }
    }

    fn validate(&self, value: &FieldValue) -> Validation {
        let FieldValue::Password(password) = value else {
            return Validation::Invalid(None);
        };
        let label = &self.meta.label;
        let validation = &self.config.validation;

        let Some(entry) = &password.entry else {
            return if validation.is_required && !password.is_set {
                Validation::invalid(format!("{label} is required"))
            } else {
                Validation::Valid
            };
        };

        let length = entry.value.chars().count();
        if validation.is_required && length == 0 {
            return Validation::invalid(format!("{label} is required"));
        }
        if let Some(min) = validation.length.min
            && length < min
        {
            return Validation::invalid(format!("{label} must be at least {min} characters long"));
        }
        if let Some(max) = validation.length.max
            && length > max
        {
            return Validation::invalid(format!("{label} must be no longer than {max} characters"));
        }
        if entry.value != entry.confirm {
            return Validation::invalid("Passwords do not match");
        }

        Validation::Valid
    }

    fn has_changed(&self, _original: &FieldValue, current: &FieldValue) -> Option<bool> {
        match current {
            FieldValue::Password(password) => Some(password.entry.is_some()),
            _ => None,
        }
    }
}
