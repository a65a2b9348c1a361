// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The life of a form value: read from an item query result, edited and validated, and
//! turned back into mutation input.

use std::collections::BTreeSet;

use admin_field_types::{FieldValue, Validation};
use admin_model::FieldMode;
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::EnhancedField;
use crate::error::ResolverError;

pub type EnhancedFields = IndexMap<String, EnhancedField>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<Value>,
}

/// One item from a query response, with the errors the response reported for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemData {
    pub data: Map<String, Value>,
    pub errors: Vec<ItemError>,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    errors: Vec<ItemError>,
}

impl ItemData {
    /// The item under `root_field` of a GraphQL response, with the errors whose path goes
    /// through it.
    pub fn from_response(response: Value, root_field: &str) -> Result<Self, ResolverError> {
        let response: Response = serde_json::from_value(response)
            .map_err(|e| ResolverError::InvalidResponse(e.to_string()))?;

        let data = match response.data.and_then(|mut data| data.remove(root_field)) {
            Some(Value::Object(item)) => item,
            Some(Value::Null) | None => Map::new(),
            Some(other) => {
                return Err(ResolverError::InvalidResponse(format!(
                    "expected an object at '{root_field}', found {other}"
                )));
            }
        };

        let errors = response
            .errors
            .into_iter()
            .filter(|error| error.path.first().and_then(Value::as_str) == Some(root_field))
            .collect();

        Ok(Self { data, errors })
    }

    /// Messages of errors reported at or below `path`.
    pub fn field_errors(&self, path: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|error| error.path.get(1).and_then(Value::as_str) == Some(path))
            .map(|error| error.message.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Value(FieldValue),
    /// The field couldn't be read; it can't be edited or sent
    Error(Vec<String>),
}

/// Reads every field of `item`. A field that fails is an error entry; the others are unaffected.
pub fn deserialize_value(fields: &EnhancedFields, item: &ItemData) -> IndexMap<String, FormValue> {
    fields
        .iter()
        .map(|(path, field)| {
            let errors = item.field_errors(path);
            if !errors.is_empty() {
                return (
                    path.clone(),
                    FormValue::Error(errors.into_iter().map(String::from).collect()),
                );
            }

            let value = match &field.controller {
                Some(controller) => match controller.deserialize(&item.data) {
                    Ok(value) => FormValue::Value(value),
                    Err(e) => {
                        debug!(field = %path, error = %e, "Field value could not be read");
                        FormValue::Error(vec![e.to_string()])
                    }
                },
                None => FormValue::Value(FieldValue::Raw(
                    item.data.get(path).cloned().unwrap_or(Value::Null),
                )),
            };
            (path.clone(), value)
        })
        .collect()
}

fn validate(field: &EnhancedField, value: &FormValue) -> Validation {
    match (value, &field.controller) {
        (FormValue::Error(_), _) => Validation::Invalid(None),
        (FormValue::Value(value), Some(controller)) => controller.validate(value),
        (FormValue::Value(_), None) => Validation::Valid,
    }
}

pub fn invalid_fields(
    fields: &EnhancedFields,
    value: &IndexMap<String, FormValue>,
) -> BTreeSet<String> {
    value
        .iter()
        .filter(|(path, value)| {
            fields
                .get(path.as_str())
                .is_some_and(|field| !validate(field, value).is_valid())
        })
        .map(|(path, _)| path.clone())
        .collect()
}

/// An open form. Validation runs on every change; whether it is shown is up to
/// `force_validation`, which is set on the first submit attempt.
#[derive(Debug)]
pub struct FormState<'a> {
    fields: &'a EnhancedFields,
    value: IndexMap<String, FormValue>,
    invalid: BTreeSet<String>,
    pub force_validation: bool,
}

impl<'a> FormState<'a> {
    pub fn new(fields: &'a EnhancedFields, value: IndexMap<String, FormValue>) -> Self {
        let invalid = invalid_fields(fields, &value);
        Self {
            fields,
            value,
            invalid,
            force_validation: false,
        }
    }

    pub fn value(&self) -> &IndexMap<String, FormValue> {
        &self.value
    }

    pub fn set_field(&mut self, path: &str, value: FieldValue) {
        self.value
            .insert(path.to_string(), FormValue::Value(value));
        self.invalid = invalid_fields(self.fields, &self.value);
    }

    pub fn invalid_fields(&self) -> &BTreeSet<String> {
        &self.invalid
    }

    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn show_validation_for(&self, path: &str) -> bool {
        self.force_validation && self.invalid.contains(path)
    }

    pub fn validation_message(&self, path: &str) -> Option<String> {
        let field = self.fields.get(path)?;
        match self.value.get(path)? {
            FormValue::Error(messages) => Some(messages.join("\n")),
            value => validate(field, value).message().map(String::from),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangedFields {
    pub changed: IndexSet<String>,
    /// Update mutation input for the changed fields only
    pub data: Map<String, Value>,
}

/// Compares the edited `value` with the value read from `item`. Only editable fields that
/// changed are serialized.
pub fn changed_fields_and_data_for_update(
    fields: &EnhancedFields,
    item: &ItemData,
    value: &IndexMap<String, FormValue>,
) -> ChangedFields {
    let original_value = deserialize_value(fields, item);
    let mut result = ChangedFields::default();

    for (path, field) in fields {
        if field.item_view_mode != FieldMode::Edit {
            continue;
        }
        let Some(controller) = &field.controller else {
            continue;
        };
        let (Some(FormValue::Value(original)), Some(FormValue::Value(current))) =
            (original_value.get(path), value.get(path))
        else {
            continue;
        };

        let has_changed = controller
            .has_changed(original, current)
            .unwrap_or_else(|| original != current);
        if has_changed {
            result.changed.insert(path.clone());
            result.data.extend(controller.serialize(current));
        }
    }

    result
}

fn creatable(field: &EnhancedField) -> bool {
    field.meta.create_view.field_mode == FieldMode::Edit
}

/// Initial value of a create form: defaults of the fields the create view edits.
pub fn default_value(fields: &EnhancedFields) -> IndexMap<String, FormValue> {
    fields
        .iter()
        .filter(|(_, field)| creatable(field))
        .filter_map(|(path, field)| {
            let controller = field.controller.as_ref()?;
            Some((path.clone(), FormValue::Value(controller.default_value())))
        })
        .collect()
}

pub fn serialize_value_for_create(
    fields: &EnhancedFields,
    value: &IndexMap<String, FormValue>,
) -> Map<String, Value> {
    let mut data = Map::new();
    for (path, field) in fields.iter().filter(|(_, field)| creatable(field)) {
        if let (Some(controller), Some(FormValue::Value(value))) =
            (&field.controller, value.get(path))
        {
            data.extend(controller.serialize(value));
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::enhance_list_for_client;
    use crate::test_support::posts;
    use admin_field_types::{RelatedItem, RelationshipValue};
    use serde_json::json;
    use test_log::test;

    fn loaded_post() -> ItemData {
        ItemData::from_response(
            json!({
                "data": {
                    "item": {
                        "id": "p1",
                        "title": "Hello",
                        "status": null,
                        "isPublished": true,
                        "author": { "id": "u1", "label": "Ada" },
                        "views": 12
                    }
                }
            }),
            "item",
        )
        .unwrap()
    }

    #[test]
    fn extracts_item_and_its_errors() {
        let item = ItemData::from_response(
            json!({
                "data": { "item": { "id": "p1", "status": null } },
                "errors": [
                    { "message": "Access denied", "path": ["item", "status"] },
                    { "message": "Elsewhere", "path": ["other", "status"] }
                ]
            }),
            "item",
        )
        .unwrap();

        assert_eq!(item.data.get("id"), Some(&json!("p1")));
        assert_eq!(item.field_errors("status"), vec!["Access denied"]);
        assert!(item.field_errors("title").is_empty());

        assert!(ItemData::from_response(json!({ "data": { "item": 3 } }), "item").is_err());
        assert_eq!(
            ItemData::from_response(json!({ "data": { "item": null } }), "item").unwrap(),
            ItemData::default()
        );
    }

    #[test]
    fn per_field_failures_stay_local() {
        let client = enhance_list_for_client(&posts());
        let mut item = loaded_post();
        item.data.insert("isPublished".to_string(), json!("yes"));
        item.errors.push(ItemError {
            message: "Access denied".to_string(),
            path: vec![json!("item"), json!("status")],
        });

        let value = deserialize_value(&client.fields, &item);

        assert_eq!(
            value["title"],
            FormValue::Value(FieldValue::Text(Some("Hello".to_string())))
        );
        assert_eq!(
            value["status"],
            FormValue::Error(vec!["Access denied".to_string()])
        );
        assert!(matches!(value["isPublished"], FormValue::Error(_)));
        assert_eq!(value["views"], FormValue::Value(FieldValue::Virtual(json!(12))));

        assert_eq!(
            invalid_fields(&client.fields, &value),
            BTreeSet::from(["isPublished".to_string(), "status".to_string()])
        );
    }

    #[test]
    fn form_state_revalidates_on_change() {
        let client = enhance_list_for_client(&posts());
        let mut form = FormState::new(&client.fields, deserialize_value(&client.fields, &loaded_post()));
        assert!(form.is_valid());

        form.set_field("title", FieldValue::Text(Some(String::new())));
        assert!(form.invalid_fields().contains("title"));
        assert!(!form.show_validation_for("title"));
        assert_eq!(
            form.validation_message("title").as_deref(),
            Some("Title is required")
        );

        form.force_validation = true;
        assert!(form.show_validation_for("title"));

        form.set_field("title", FieldValue::Text(Some("Fixed".to_string())));
        assert!(form.is_valid());
    }

    #[test]
    fn update_sends_only_changed_fields() {
        let client = enhance_list_for_client(&posts());
        let item = loaded_post();
        let mut value = deserialize_value(&client.fields, &item);

        let unchanged = changed_fields_and_data_for_update(&client.fields, &item, &value);
        assert!(unchanged.changed.is_empty());
        assert!(unchanged.data.is_empty());

        value.insert(
            "title".to_string(),
            FormValue::Value(FieldValue::Text(Some("Hello again".to_string()))),
        );
        value.insert(
            "author".to_string(),
            FormValue::Value(FieldValue::Relationship(RelationshipValue::One {
                initial: Some(RelatedItem::new("u1", Some("Ada".to_string()))),
                value: Some(RelatedItem::new("u2", None)),
            })),
        );
        value.insert(
            "views".to_string(),
            FormValue::Value(FieldValue::Virtual(json!(99))),
        );

        let changed = changed_fields_and_data_for_update(&client.fields, &item, &value);
        assert_eq!(
            changed.changed.iter().collect::<Vec<_>>(),
            ["title", "author"]
        );
        assert_eq!(
            Value::Object(changed.data),
            json!({
                "title": "Hello again",
                "author": { "connect": { "id": "u2" } }
            })
        );
    }

    #[test]
    fn create_form_defaults_and_input() {
        let client = enhance_list_for_client(&posts());
        let mut value = default_value(&client.fields);

        assert_eq!(
            value.keys().collect::<Vec<_>>(),
            ["title", "status", "isPublished", "author"]
        );
        assert_eq!(
            invalid_fields(&client.fields, &value),
            BTreeSet::from(["title".to_string()])
        );

        value.insert(
            "title".to_string(),
            FormValue::Value(FieldValue::Text(Some("New".to_string()))),
        );
        assert_eq!(
            Value::Object(serialize_value_for_create(&client.fields, &value)),
            json!({
                "title": "New",
                "status": "",
                "isPublished": false
            })
        );
    }
}
