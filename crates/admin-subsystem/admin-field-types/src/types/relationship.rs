// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Relationship fields: to-one and to-many references to items of another list.
//!
//! Form values remember the related items that were loaded, so serialization can send only the
//! difference as `connect`/`disconnect` operations.

use admin_model::{
    FieldConfig, FieldMeta, FieldTypeKey,
    field::{RelationshipConfig, RelationshipDisplayMode},
};
use serde_json::{Map, Value, json};
use tracing::debug;

use super::{negated_clause, operator_clause, parse_id_list};
use crate::controller::{FieldController, item_value, single};
use crate::error::{DeserializeError, FieldTypeError};
use crate::registry::{
    FieldImplementation, FieldViews, FilterTypeInfo, FilterTypes, field_views, with_config,
};
use crate::value::{FieldValue, RelatedItem, RelationshipValue};

pub struct RelationshipFieldType;

fn relationship_config(config: &FieldConfig) -> Option<&RelationshipConfig> {
    match config {
        FieldConfig::Relationship(config) => Some(config),
        _ => None,
    }
}

fn is_count(config: &RelationshipConfig) -> bool {
    config.many && config.display_mode == RelationshipDisplayMode::Count
}

impl FieldImplementation for RelationshipFieldType {
    fn key(&self) -> FieldTypeKey {
        FieldTypeKey::Relationship
    }

    fn views(&self) -> FieldViews {
        field_views!("relationship")
    }

    fn graphql_selection(&self, path: &str, config: &FieldConfig) -> Option<String> {
        let config = relationship_config(config)?;
        Some(if is_count(config) {
            format!("{path}Count")
        } else {
            format!(
                "{path} {{\n  id\n  label: {}\n}}",
                config.ref_label_field
            )
        })
    }

    fn filter_types(&self, config: &FieldConfig) -> FilterTypes {
        match relationship_config(config) {
            Some(config) if config.many => FilterTypes::from([
                ("some", FilterTypeInfo::new("Is one of", json!([]))),
                ("none", FilterTypeInfo::new("Is not one of", json!([]))),
            ]),
            Some(_) => FilterTypes::from([
                ("empty", FilterTypeInfo::new("Is empty", Value::Null)),
                ("not_empty", FilterTypeInfo::new("Is not empty", Value::Null)),
                ("is", FilterTypeInfo::new("Is", Value::Null)),
                ("not_is", FilterTypeInfo::new("Is not", Value::Null)),
            ]),
            None => FilterTypes::new(),
        }
    }

    fn transform_filter(
        &self,
        path: &str,
        operator: &str,
        value: &Value,
        _config: &FieldConfig,
    ) -> Option<Map<String, Value>> {
        let related_id = || match value {
            Value::Object(item) => item.get("id").cloned(),
            Value::String(_) | Value::Number(_) => Some(value.clone()),
            _ => None,
        };

        let clause = match operator {
            "empty" => single(path, Value::Null),
            "not_empty" => single(
                "NOT",
                Value::Array(vec![Value::Object(single(path, Value::Null))]),
            ),
            "is" => single(
                path,
                Value::Object(operator_clause("id", "equals", related_id()?)),
            ),
            "not_is" => single(
                path,
                Value::Object(negated_clause("id", "equals", related_id()?)),
            ),
            "some" | "none" => {
                let Some(ids) = parse_id_list(value) else {
                    debug!(path, operator, %value, "Ignoring relationship filter with unusable ids");
                    return None;
                };
                single(
                    path,
                    Value::Object(single(
                        operator,
                        Value::Object(operator_clause("id", "in", Value::Array(ids))),
                    )),
                )
            }
            _ => return None,
        };
        Some(clause)
    }

    fn controller(
        &self,
        field: &FieldMeta,
    ) -> Option<Result<Box<dyn FieldController>, FieldTypeError>> {
        Some(with_config(
            field,
            FieldTypeKey::Relationship,
            relationship_config,
            |config| {
                Ok(Box::new(RelationshipController {
                    meta: field.clone(),
                    config: config.clone(),
                }) as Box<dyn FieldController>)
            },
        ))
    }
}

#[derive(Debug)]
pub struct RelationshipController {
    meta: FieldMeta,
    config: RelationshipConfig,
}

impl RelationshipController {
    fn related_item(&self, value: &Value) -> Result<RelatedItem, DeserializeError> {
        serde_json::from_value(value.clone()).map_err(|e| DeserializeError::Malformed {
            path: self.meta.path.clone(),
            message: e.to_string(),
        })
    }
}

fn ids(items: &[RelatedItem]) -> Vec<&str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

impl FieldController for RelationshipController {
    fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    fn default_value(&self) -> FieldValue {
        FieldValue::Relationship(match (self.config.many, is_count(&self.config)) {
            (_, true) => RelationshipValue::Count(0),
            (true, false) => RelationshipValue::Many {
                initial: vec![],
                value: vec![],
            },
            (false, false) => RelationshipValue::One {
                initial: None,
                value: None,
            },
        })
    }

    fn deserialize(&self, item: &Map<String, Value>) -> Result<FieldValue, DeserializeError> {
        let path = &self.meta.path;

        if is_count(&self.config) {
            let count_path = format!("{path}Count");
            let count = match item_value(item, &count_path) {
                Value::Null => Some(0),
                other => other.as_u64(),
            };
            return count
                .map(|count| FieldValue::Relationship(RelationshipValue::Count(count)))
                .ok_or_else(|| {
                    DeserializeError::unexpected(path, "a count", item_value(item, &count_path))
                });
        }

        let value = match (self.config.many, item_value(item, path)) {
            (false, Value::Null) => RelationshipValue::One {
                initial: None,
                value: None,
            },
            (false, related) => {
                let related = self.related_item(related)?;
                RelationshipValue::One {
                    initial: Some(related.clone()),
                    value: Some(related),
                }
            }
            (true, Value::Null) => RelationshipValue::Many {
                initial: vec![],
                value: vec![],
            },
            (true, Value::Array(related)) => {
                let related = related
                    .iter()
                    .map(|item| self.related_item(item))
                    .collect::<Result<Vec<_>, _>>()?;
                RelationshipValue::Many {
                    initial: related.clone(),
                    value: related,
                }
            }
            (true, other) => return Err(DeserializeError::unexpected(path, "a list", other)),
        };
        Ok(FieldValue::Relationship(value))
    }

    fn serialize(&self, value: &FieldValue) -> Map<String, Value> {
        let path = &self.meta.path;
        match value {
            FieldValue::Relationship(RelationshipValue::One { initial, value }) => {
                match (initial, value) {
                    (Some(initial), Some(value)) if initial.id == value.id => Map::new(),
                    (None, None) => Map::new(),
                    (_, Some(value)) => single(path, json!({ "connect": { "id": value.id } })),
                    (Some(_), None) => single(path, json!({ "disconnect": true })),
                }
            }
            FieldValue::Relationship(RelationshipValue::Many { initial, value }) => {
                let initial_ids = ids(initial);
                let current_ids = ids(value);

                let disconnect = initial_ids
                    .iter()
                    .filter(|id| !current_ids.contains(id))
                    .map(|id| json!({ "id": id }))
                    .collect::<Vec<_>>();
                let connect = current_ids
                    .iter()
                    .filter(|id| !initial_ids.contains(id))
                    .map(|id| json!({ "id": id }))
                    .collect::<Vec<_>>();

                let mut operations = Map::new();
                if !disconnect.is_empty() {
                    operations.insert("disconnect".to_string(), Value::Array(disconnect));
                }
                if !connect.is_empty() {
                    operations.insert("connect".to_string(), Value::Array(connect));
                }

                if operations.is_empty() {
                    Map::new()
                } else {
                    single(path, Value::Object(operations))
                }
            }
            _ => Map::new(),
        }
    }

    fn has_changed(&self, original: &FieldValue, current: &FieldValue) -> Option<bool> {
        let changed = match (original, current) {
            (
                FieldValue::Relationship(RelationshipValue::One { value: original, .. }),
                FieldValue::Relationship(RelationshipValue::One { value: current, .. }),
            ) => original.as_ref().map(|item| &item.id) != current.as_ref().map(|item| &item.id),
            (
                FieldValue::Relationship(RelationshipValue::Many { value: original, .. }),
                FieldValue::Relationship(RelationshipValue::Many { value: current, .. }),
            ) => {
                let (original, current) = (ids(original), ids(current));
                original.len() != current.len() || original.iter().any(|id| !current.contains(id))
            }
            (
                FieldValue::Relationship(RelationshipValue::Count(_)),
                FieldValue::Relationship(RelationshipValue::Count(_)),
            ) => false,
            _ => return None,
        };
        Some(changed)
    }
}
