// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Turns list metadata and URL parameters into GraphQL selections, where clauses, sort
//! arguments, and whole operation documents.

pub mod config;
pub mod document;
pub mod filter;
pub mod order_by;
pub mod pagination;
pub mod params;
pub mod selection;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::QueryConfig;
pub use document::{
    ListQuery, create_mutation, delete_mutation, item_query, list_query, update_mutation,
};
pub use filter::{ActiveFilter, PossibleFilter, active_filters, build_where, possible_filters};
pub use order_by::{build_order_by, order_by_argument, sort_param};
pub use pagination::Pagination;
pub use params::QueryParams;
pub use selection::{build_selections, selected_fields};
