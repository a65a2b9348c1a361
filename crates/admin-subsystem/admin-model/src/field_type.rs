// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Field type keys and the views table.
//!
//! Admin metadata refers to a field's implementation through a `viewsIndex`: an integer index
//! into the list of view modules the schema was built with (for example
//! `["@keystone-6/core/fields/types/id/views", "@keystone-6/core/fields/types/text/views"]`).
//! We resolve those indices to a [`FieldTypeKey`] once, when the schema is loaded, so that an
//! unknown field type is a load-time error rather than a missing implementation at request time.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTypeKey {
    Id,
    Text,
    Checkbox,
    Timestamp,
    Relationship,
    Virtual,
    Json,
    Password,
    Image,
}

impl FieldTypeKey {
    pub const ALL: [FieldTypeKey; 9] = [
        FieldTypeKey::Id,
        FieldTypeKey::Text,
        FieldTypeKey::Checkbox,
        FieldTypeKey::Timestamp,
        FieldTypeKey::Relationship,
        FieldTypeKey::Virtual,
        FieldTypeKey::Json,
        FieldTypeKey::Password,
        FieldTypeKey::Image,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldTypeKey::Id => "id",
            FieldTypeKey::Text => "text",
            FieldTypeKey::Checkbox => "checkbox",
            FieldTypeKey::Timestamp => "timestamp",
            FieldTypeKey::Relationship => "relationship",
            FieldTypeKey::Virtual => "virtual",
            FieldTypeKey::Json => "json",
            FieldTypeKey::Password => "password",
            FieldTypeKey::Image => "image",
        }
    }
}

impl Display for FieldTypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldTypeKey {
    type Err = SchemaError;

    /// Accepts a bare type name (`text`) or a views module path whose type segment precedes a
    /// trailing `views` segment (`@keystone-6/core/fields/types/text/views`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        let trimmed = trimmed.strip_suffix("/views").unwrap_or(trimmed);
        let name = trimmed.rsplit('/').next().unwrap_or(trimmed);

        FieldTypeKey::ALL
            .into_iter()
            .find(|key| key.name() == name)
            .ok_or_else(|| SchemaError::UnknownFieldType(s.to_string()))
    }
}

/// The resolved views list of an admin schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewsTable(Vec<FieldTypeKey>);

impl ViewsTable {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, SchemaError> {
        names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()
            .map(ViewsTable)
    }

    pub fn get_field_type_from_views_index(&self, views_index: usize) -> Option<FieldTypeKey> {
        self.0.get(views_index).copied()
    }

    pub fn views_index(&self, key: FieldTypeKey) -> Option<usize> {
        self.0.iter().position(|k| *k == key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ViewsTable {
    /// Every field type, in [`FieldTypeKey::ALL`] order.
    fn default() -> Self {
        ViewsTable(FieldTypeKey::ALL.to_vec())
    }
}
