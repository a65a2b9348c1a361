// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub mod client;
pub mod error;
pub mod form;
pub mod server;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{
    ClientAdminMeta, ClientList, EnhancedField, enhance_admin_meta_for_client, enhance_field,
    enhance_list_for_client,
};
pub use error::{DegradedField, ResolverError};
pub use form::{
    ChangedFields, EnhancedFields, FormState, FormValue, ItemData, ItemError,
    changed_fields_and_data_for_update, default_value, deserialize_value, invalid_fields,
    serialize_value_for_create,
};
pub use server::{enhance_admin_meta_for_server, enhance_list_for_server};
