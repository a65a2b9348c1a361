// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_field_types::FieldTypeError;
use admin_model::SchemaError;
use thiserror::Error;

use crate::client::EnhancedField;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("Unknown list '{0}'")]
    UnknownList(String),

    #[error("Invalid GraphQL response: {0}")]
    InvalidResponse(String),
}

/// A field whose enhancement failed, with the bare field to use in its place.
#[derive(Error, Debug)]
#[error("Field '{}' could not be enhanced: {source}", .fallback.meta.path)]
pub struct DegradedField {
    pub fallback: EnhancedField,
    #[source]
    pub source: FieldTypeError,
}
