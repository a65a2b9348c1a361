// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Editable form values, one variant per field family.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Id(Option<String>),
    /// `None` is a null value, distinct from the empty string
    Text(Option<String>),
    Checkbox(bool),
    /// RFC 3339 text as entered; validated, not parsed, until serialization
    Timestamp(Option<String>),
    Relationship(RelationshipValue),
    Virtual(Value),
    /// Editor text
    Json(String),
    Password(PasswordValue),
    Image(ImageValue),
    /// Value of a field without a controller, passed through untouched
    Raw(Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedItem {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl RelatedItem {
    pub fn new(id: impl Into<String>, label: Option<String>) -> Self {
        Self {
            id: id.into(),
            label,
        }
    }
}

/// Relationship values remember what was loaded so serialization can compute the
/// connect/disconnect difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipValue {
    One {
        initial: Option<RelatedItem>,
        value: Option<RelatedItem>,
    },
    Many {
        initial: Vec<RelatedItem>,
        value: Vec<RelatedItem>,
    },
    /// Related item count, for to-many fields displayed as a count
    Count(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordEntry {
    pub value: String,
    pub confirm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasswordValue {
    /// Whether a password is currently stored
    pub is_set: bool,
    /// A new password being entered, if any
    pub entry: Option<PasswordEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub id: String,
    pub src: String,
    pub extension: String,
    pub width: u32,
    pub height: u32,
    pub filesize: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageValue {
    #[default]
    Empty,
    FromServer(ImageData),
    Upload {
        /// Reference to the upload in the multipart request
        reference: String,
        previous: Option<ImageData>,
    },
    Remove {
        previous: ImageData,
    },
}
