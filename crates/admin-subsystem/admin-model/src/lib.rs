// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Static admin metadata: lists, their fields, and the names derived from them.

pub mod admin_meta;
pub mod error;
pub mod field;
pub mod field_type;
pub mod list;
pub mod naming;

pub use admin_meta::AdminMeta;
pub use error::SchemaError;
pub use field::{FieldConfig, FieldMeta, FieldMode, IdKind};
pub use field_type::{FieldTypeKey, ViewsTable};
pub use list::{ID_FIELD, ListMeta, SortDirection, SortSpec};
pub use naming::GraphQLNames;
