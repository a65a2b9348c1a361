// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Static field metadata.
//!
//! A [`FieldMeta`] is built once, when the admin schema is loaded, and never mutated afterwards.
//! Its [`FieldConfig`] carries the type-specific configuration. The variant always agrees with
//! [`FieldMeta::field_type`].

use heck::ToTitleCase;
use serde::{Deserialize, Serialize};

use crate::field_type::{FieldTypeKey, ViewsTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
    Read,
    #[default]
    Edit,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldViewConfig {
    pub field_mode: FieldMode,
}

impl FieldViewConfig {
    pub fn new(field_mode: FieldMode) -> Self {
        Self { field_mode }
    }

    pub fn is_hidden(&self) -> bool {
        self.field_mode == FieldMode::Hidden
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldMeta {
    /// Unique within the owning list and a valid GraphQL name
    pub path: String,
    pub label: String,
    pub description: Option<String>,
    pub views_index: usize,
    pub field_type: FieldTypeKey,
    pub config: FieldConfig,
    pub is_filterable: bool,
    pub is_orderable: bool,
    pub list_view: FieldViewConfig,
    pub create_view: FieldViewConfig,
    pub item_view: FieldViewConfig,
}

impl FieldMeta {
    /// A field with a humanized label, default view modes, and no filtering or ordering.
    /// The views index is the type's position in the default [`ViewsTable`].
    pub fn new(path: impl Into<String>, config: FieldConfig) -> Self {
        let path = path.into();
        let field_type = config.field_type();

        Self {
            label: path.to_title_case(),
            path,
            description: None,
            views_index: ViewsTable::default()
                .views_index(field_type)
                .unwrap_or_default(),
            field_type,
            config,
            is_filterable: false,
            is_orderable: false,
            list_view: FieldViewConfig::new(FieldMode::Read),
            create_view: FieldViewConfig::new(FieldMode::Edit),
            item_view: FieldViewConfig::new(FieldMode::Edit),
        }
    }

    /// The implicit identity field every list carries.
    pub fn implicit_id(kind: IdKind) -> Self {
        let mut field = FieldMeta::new("id", FieldConfig::Id(IdConfig { kind }));
        field.label = "ID".to_string();
        field.create_view = FieldViewConfig::new(FieldMode::Hidden);
        field.item_view = FieldViewConfig::new(FieldMode::Read);
        field
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn filterable(mut self) -> Self {
        self.is_filterable = true;
        self
    }

    pub fn orderable(mut self) -> Self {
        self.is_orderable = true;
        self
    }

    pub fn with_list_view(mut self, field_mode: FieldMode) -> Self {
        self.list_view = FieldViewConfig::new(field_mode);
        self
    }

    pub fn with_create_view(mut self, field_mode: FieldMode) -> Self {
        self.create_view = FieldViewConfig::new(field_mode);
        self
    }

    pub fn with_item_view(mut self, field_mode: FieldMode) -> Self {
        self.item_view = FieldViewConfig::new(field_mode);
        self
    }
}

/// Per-type configuration, one variant per field type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldConfig {
    Id(IdConfig),
    Text(TextConfig),
    Checkbox(CheckboxConfig),
    Timestamp(TimestampConfig),
    Relationship(RelationshipConfig),
    Virtual(VirtualConfig),
    Json(JsonConfig),
    Password(PasswordConfig),
    Image(ImageConfig),
}

impl FieldConfig {
    pub fn field_type(&self) -> FieldTypeKey {
        match self {
            FieldConfig::Id(_) => FieldTypeKey::Id,
            FieldConfig::Text(_) => FieldTypeKey::Text,
            FieldConfig::Checkbox(_) => FieldTypeKey::Checkbox,
            FieldConfig::Timestamp(_) => FieldTypeKey::Timestamp,
            FieldConfig::Relationship(_) => FieldTypeKey::Relationship,
            FieldConfig::Virtual(_) => FieldTypeKey::Virtual,
            FieldConfig::Json(_) => FieldTypeKey::Json,
            FieldConfig::Password(_) => FieldTypeKey::Password,
            FieldConfig::Image(_) => FieldTypeKey::Image,
        }
    }

    /// Decode the untyped `fieldMeta` blob of a field whose type is already known.
    /// A missing blob means "all defaults".
    pub fn from_field_meta(
        key: FieldTypeKey,
        field_meta: Option<serde_json::Value>,
    ) -> Result<Self, serde_json::Error> {
        use serde_json::Value;

        let value = match field_meta {
            None | Some(Value::Null) => Value::Object(Default::default()),
            Some(value) => value,
        };

        Ok(match key {
            FieldTypeKey::Id => FieldConfig::Id(serde_json::from_value(value)?),
            FieldTypeKey::Text => FieldConfig::Text(serde_json::from_value(value)?),
            FieldTypeKey::Checkbox => FieldConfig::Checkbox(serde_json::from_value(value)?),
            FieldTypeKey::Timestamp => FieldConfig::Timestamp(serde_json::from_value(value)?),
            FieldTypeKey::Relationship => {
                FieldConfig::Relationship(serde_json::from_value(value)?)
            }
            FieldTypeKey::Virtual => FieldConfig::Virtual(serde_json::from_value(value)?),
            FieldTypeKey::Json => FieldConfig::Json(serde_json::from_value(value)?),
            FieldTypeKey::Password => FieldConfig::Password(serde_json::from_value(value)?),
            FieldTypeKey::Image => FieldConfig::Image(serde_json::from_value(value)?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    Autoincrement,
    #[default]
    Cuid,
    Uuid,
}

impl IdKind {
    /// Whether `value` has the shape of an id of this kind. Used to decide whether a search
    /// term should also be matched against the id.
    pub fn is_valid_id(&self, value: &str) -> bool {
        match self {
            IdKind::Autoincrement => value.parse::<i64>().is_ok(),
            IdKind::Cuid => {
                value.len() == 25
                    && value.starts_with('c')
                    && value
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            }
            IdKind::Uuid => uuid::Uuid::parse_str(value).is_ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdConfig {
    pub kind: IdKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDisplayMode {
    #[default]
    Input,
    Textarea,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LengthValidation {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMatch {
    pub regex: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextValidation {
    pub is_required: bool,
    pub length: LengthValidation,
    #[serde(rename = "match")]
    pub match_: Option<TextMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextConfig {
    pub default_value: Option<String>,
    pub display_mode: TextDisplayMode,
    pub is_nullable: bool,
    /// Whether `contains`/`equals` style filters ask for `mode: "insensitive"`
    pub should_use_mode_insensitive: bool,
    pub validation: TextValidation,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            default_value: None,
            display_mode: TextDisplayMode::default(),
            is_nullable: false,
            should_use_mode_insensitive: true,
            validation: TextValidation::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckboxConfig {
    pub default_value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimestampDefault {
    Now,
    Value { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimestampConfig {
    pub default_value: Option<TimestampDefault>,
    pub is_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipDisplayMode {
    #[default]
    Select,
    Count,
    Cards,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipConfig {
    pub ref_list_key: String,
    #[serde(default = "default_ref_label_field")]
    pub ref_label_field: String,
    #[serde(default)]
    pub many: bool,
    #[serde(default)]
    pub display_mode: RelationshipDisplayMode,
}

fn default_ref_label_field() -> String {
    "id".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualConfig {
    /// Sub-selection appended to the field path, for example `{ id name }`
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsonConfig {
    pub default_value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordValidation {
    pub is_required: bool,
    pub length: LengthValidation,
}

impl Default for PasswordValidation {
    fn default() -> Self {
        Self {
            is_required: false,
            length: LengthValidation {
                min: Some(8),
                max: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordConfig {
    pub is_nullable: bool,
    pub validation: PasswordValidation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageConfig {}
