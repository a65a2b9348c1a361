// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Field type implementations and the controllers built from them.

pub mod controller;
pub mod error;
pub mod registry;
pub mod types;
pub mod value;

pub use controller::{FieldController, FieldFilter, Validation};
pub use error::{DeserializeError, FieldTypeError};
pub use registry::{FieldImplementation, FieldViews, FilterTypeInfo, FilterTypes, get_field};
pub use value::{
    FieldValue, ImageData, ImageValue, PasswordEntry, PasswordValue, RelatedItem,
    RelationshipValue,
};
