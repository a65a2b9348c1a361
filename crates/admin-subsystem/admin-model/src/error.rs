// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

/// A problem with the declared admin schema. These are fatal at load time: a schema that
/// produces one of these is never partially accepted.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("The list '{0}' is declared more than once")]
    DuplicateList(String),

    #[error(
        "The list key '{key}' and its plural GraphQL name '{plural}' must differ, otherwise the generated item and list queries would collide"
    )]
    PluralCollision { key: String, plural: String },

    #[error("'{0}' is not a valid list key. List keys must be valid GraphQL names")]
    InvalidListKey(String),

    #[error("Invalid field path '{path}' in list '{list}'. Field paths must be valid GraphQL names")]
    InvalidFieldPath { list: String, path: String },

    #[error("The field '{path}' is declared more than once in list '{list}'")]
    DuplicateField { list: String, path: String },

    #[error("Unknown field type '{0}'")]
    UnknownFieldType(String),

    #[error("The field '{path}' in list '{list}' uses views index {index}, which is not registered")]
    UnknownViewsIndex {
        list: String,
        path: String,
        index: usize,
    },

    #[error("The {context} of list '{list}' refers to an unknown field '{path}'")]
    UnknownField {
        list: String,
        path: String,
        context: &'static str,
    },

    #[error("Invalid configuration for field '{path}' in list '{list}': {source}")]
    InvalidFieldConfig {
        list: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to read admin metadata: {0}")]
    Json(#[from] serde_json::Error),
}
