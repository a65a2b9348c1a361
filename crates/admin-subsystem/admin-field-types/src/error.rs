// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_model::FieldTypeKey;
use thiserror::Error;

/// Building a controller for a field failed. Callers degrade the field instead of failing the
/// whole list.
#[derive(Error, Debug)]
pub enum FieldTypeError {
    #[error("Field '{path}' is registered as {expected} but carries a {found} configuration")]
    ConfigMismatch {
        path: String,
        expected: FieldTypeKey,
        found: FieldTypeKey,
    },

    #[error("Invalid match pattern for field '{path}': {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },
}

/// A single field's value in an item result could not be turned into a form value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeserializeError {
    #[error("Expected {expected} for field '{path}', found {found}")]
    UnexpectedValue {
        path: String,
        expected: &'static str,
        found: String,
    },

    #[error("Invalid value for field '{path}': {message}")]
    Malformed { path: String, message: String },
}

impl DeserializeError {
    pub(crate) fn unexpected(
        path: &str,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        DeserializeError::UnexpectedValue {
            path: path.to_string(),
            expected,
            found: found.to_string(),
        }
    }
}
