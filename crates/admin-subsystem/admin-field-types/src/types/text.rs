// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Text fields: case-aware string filters, free-text search, and length/pattern validation.

use admin_model::{FieldConfig, FieldMeta, FieldTypeKey, field::TextConfig};
use heck::ToLowerCamelCase;
use regex::Regex;
use serde_json::{Map, Value, json};

use crate::controller::{FieldController, Validation, item_value, single};
use crate::error::{DeserializeError, FieldTypeError};
use crate::registry::{
    FieldImplementation, FieldViews, FilterTypeInfo, FilterTypes, field_views, with_config,
};
use crate::value::FieldValue;

pub struct TextFieldType;

fn text_config(config: &FieldConfig) -> Option<&TextConfig> {
    match config {
        FieldConfig::Text(config) => Some(config),
        _ => None,
    }
}

fn operator_key(operator: &str) -> String {
    match operator {
        "is_i" | "i" => "equals".to_string(),
        operator => operator
            .strip_suffix("_i")
            .unwrap_or(operator)
            .to_lower_camel_case(),
    }
}

/// The condition for one operator: `contains_i` becomes `{ contains: value }`, `is_i` becomes
/// `{ equals: value }`, `not_*` nests the positive condition under `not`. The insensitive
/// mode always sits at the top level, beside `not`.
fn condition(operator: &str, value: Value, insensitive: bool) -> Map<String, Value> {
    let mut condition = match operator.strip_prefix("not_") {
        Some(positive) => single(
            "not",
            Value::Object(single(&operator_key(positive), value)),
        ),
        None => single(&operator_key(operator), value),
    };

    if insensitive {
        condition.insert("mode".to_string(), json!("insensitive"));
    }
    condition
}

impl FieldImplementation for TextFieldType {
    fn key(&self) -> FieldTypeKey {
        FieldTypeKey::Text
    }

    fn views(&self) -> FieldViews {
        field_views!("text")
    }

    fn filter_types(&self, _config: &FieldConfig) -> FilterTypes {
        FilterTypes::from([
            ("contains_i", FilterTypeInfo::new("Contains", json!(""))),
            ("not_contains_i", FilterTypeInfo::new("Does not contain", json!(""))),
            ("is_i", FilterTypeInfo::new("Is exactly", json!(""))),
            ("not_i", FilterTypeInfo::new("Is not exactly", json!(""))),
            ("starts_with_i", FilterTypeInfo::new("Starts with", json!(""))),
            (
                "not_starts_with_i",
                FilterTypeInfo::new("Does not start with", json!("")),
            ),
            ("ends_with_i", FilterTypeInfo::new("Ends with", json!(""))),
            (
                "not_ends_with_i",
                FilterTypeInfo::new("Does not end with", json!("")),
            ),
        ])
    }

    fn transform_filter(
        &self,
        path: &str,
        operator: &str,
        value: &Value,
        config: &FieldConfig,
    ) -> Option<Map<String, Value>> {
        let insensitive = text_config(config).is_some_and(|c| c.should_use_mode_insensitive);

        Some(single(
            path,
            Value::Object(condition(operator, value.clone(), insensitive)),
        ))
    }

    fn search_filter(
        &self,
        path: &str,
        term: &str,
        config: &FieldConfig,
    ) -> Option<Map<String, Value>> {
        let insensitive = text_config(config).is_some_and(|c| c.should_use_mode_insensitive);
        Some(single(
            path,
            Value::Object(condition("contains_i", json!(term), insensitive)),
        ))
    }

    fn is_searchable(&self) -> bool {
        true
    }

    fn controller(
        &self,
        field: &FieldMeta,
    ) -> Option<Result<Box<dyn FieldController>, FieldTypeError>> {
        Some(with_config(field, FieldTypeKey::Text, text_config, |config| {
            TextController::new(field, config).map(|c| Box::new(c) as Box<dyn FieldController>)
        }))
    }
}

#[derive(Debug)]
pub struct TextController {
    meta: FieldMeta,
    config: TextConfig,
    pattern: Option<Regex>,
}

impl TextController {
    fn new(meta: &FieldMeta, config: &TextConfig) -> Result<Self, FieldTypeError> {
        let pattern = config
            .validation
            .match_
            .as_ref()
            .map(|rule| Regex::new(&rule.regex))
            .transpose()
            .map_err(|source| FieldTypeError::InvalidPattern {
                path: meta.path.clone(),
                source,
            })?;

        Ok(Self {
            meta: meta.clone(),
            config: config.clone(),
            pattern,
        })
    }
}

impl FieldController for TextController {
    fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    fn default_value(&self) -> FieldValue {
        match &self.config.default_value {
            Some(value) => FieldValue::Text(Some(value.clone())),
            None if self.config.is_nullable => FieldValue::Text(None),
            None => FieldValue::Text(Some(String::new())),
        }
    }

    fn deserialize(&self, item: &Map<String, Value>) -> Result<FieldValue, DeserializeError> {
        match item_value(item, &self.meta.path) {
            Value::Null => Ok(FieldValue::Text(None)),
            Value::String(text) => Ok(FieldValue::Text(Some(text.clone()))),
            other => Err(DeserializeError::unexpected(&self.meta.path, "a string", other)),
        }
    }

    fn serialize(&self, value: &FieldValue) -> Map<String, Value> {
        match value {
            FieldValue::Text(text) => single(&self.meta.path, json!(text)),
            _ => Map::new(),
        }
    }

    fn validate(&self, value: &FieldValue) -> Validation {
        let FieldValue::Text(text) = value else {
            return Validation::Invalid(None);
        };
        let validation = &self.config.validation;
        let label = &self.meta.label;

        let Some(text) = text else {
            return if validation.is_required {
                Validation::invalid(format!("{label} is required"))
            } else {
                Validation::Valid
            };
        };

        if validation.is_required && text.is_empty() {
            return Validation::invalid(format!("{label} is required"));
        }

        let length = text.chars().count();
        if let Some(min) = validation.length.min
            && length < min
        {
            return Validation::invalid(format!(
                "{label} must be at least {min} characters long"
            ));
        }
        if let Some(max) = validation.length.max
            && length > max
        {
            return Validation::invalid(format!("{label} must be no longer than {max} characters"));
        }

        if let (Some(pattern), Some(rule)) = (&self.pattern, &validation.match_)
            && !pattern.is_match(text)
        {
            return Validation::invalid(
                rule.explanation
                    .clone()
                    .unwrap_or_else(|| format!("{label} must match {}", rule.regex)),
            );
        }

        Validation::Valid
    }
}
