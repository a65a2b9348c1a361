// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! GraphQL operation documents for the list, item, and mutation pages.

use admin_model::{ListMeta, SchemaError, SortSpec};
use serde::Serialize;
use serde_json::{Value, json};

use crate::config::QueryConfig;
use crate::filter::build_where;
use crate::order_by::{build_order_by, order_by_argument};
use crate::pagination::Pagination;
use crate::params::QueryParams;
use crate::selection::{build_selections, selected_fields};

fn indent(text: &str, depth: usize) -> String {
    let prefix = "  ".repeat(depth);
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn item_result(list: &ListMeta) -> String {
    format!("id\nlabel: {}", list.label_field)
}

pub fn list_query<S: AsRef<str>>(list: &ListMeta, fields: &[S]) -> Result<String, SchemaError> {
    let names = list.graphql_names()?;
    Ok(format!(
        "query ($where: {where_input}, $take: Int!, $skip: Int!, $orderBy: [{order_input}!]) {{\n  items: {list_query}(where: $where, take: $take, skip: $skip, orderBy: $orderBy) {{\n{selection}\n  }}\n  count: {count_query}(where: $where)\n}}",
        where_input = names.where_input_name,
        order_input = names.list_order_name,
        list_query = names.list_query_name,
        count_query = names.list_query_count_name,
        selection = indent(&build_selections(list, fields), 2),
    ))
}

pub fn item_query<S: AsRef<str>>(list: &ListMeta, fields: &[S]) -> Result<String, SchemaError> {
    let names = list.graphql_names()?;
    Ok(format!(
        "query ($id: ID!) {{\n  item: {item_query}(where: {{ id: $id }}) {{\n{selection}\n  }}\n}}",
        item_query = names.item_query_name,
        selection = indent(&build_selections(list, fields), 2),
    ))
}

pub fn create_mutation(list: &ListMeta) -> Result<String, SchemaError> {
    let names = list.graphql_names()?;
    Ok(format!(
        "mutation ($data: {input}!) {{\n  item: {mutation}(data: $data) {{\n{result}\n  }}\n}}",
        input = names.create_input_name,
        mutation = names.create_mutation_name,
        result = indent(&item_result(list), 2),
    ))
}

pub fn update_mutation(list: &ListMeta) -> Result<String, SchemaError> {
    let names = list.graphql_names()?;
    Ok(format!(
        "mutation ($data: {input}!, $id: ID!) {{\n  item: {mutation}(where: {{ id: $id }}, data: $data) {{\n{result}\n  }}\n}}",
        input = names.update_input_name,
        mutation = names.update_mutation_name,
        result = indent(&item_result(list), 2),
    ))
}

pub fn delete_mutation(list: &ListMeta) -> Result<String, SchemaError> {
    let names = list.graphql_names()?;
    Ok(format!(
        "mutation ($id: ID!) {{\n  item: {mutation}(where: {{ id: $id }}) {{\n{result}\n  }}\n}}",
        mutation = names.delete_mutation_name,
        result = indent(&item_result(list), 2),
    ))
}

/// Everything needed to fetch one page of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub fields: Vec<String>,
    pub sort: SortSpec,
    pub pagination: Pagination,
    pub document: String,
    pub variables: Value,
}

impl ListQuery {
    pub fn from_params(
        list: &ListMeta,
        params: &QueryParams,
        config: &QueryConfig,
    ) -> Result<Self, SchemaError> {
        let fields = selected_fields(list, params);
        let sort = build_order_by(list, params);
        let pagination = Pagination::from_params(list, params, config);

        let variables = json!({
            "where": build_where(list, params),
            "take": pagination.take,
            "skip": pagination.skip,
            "orderBy": order_by_argument(&sort),
        });

        Ok(Self {
            document: list_query(list, &fields)?,
            fields,
            sort,
            pagination,
            variables,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::posts;
    use multiplatform_test::multiplatform_test;

    #[multiplatform_test]
    fn list_document() {
        insta::assert_snapshot!(list_query(&posts(), &["title", "author"]).unwrap(), @r"
        query ($where: PostWhereInput, $take: Int!, $skip: Int!, $orderBy: [PostOrderByInput!]) {
          items: posts(where: $where, take: $take, skip: $skip, orderBy: $orderBy) {
            id
            title
            author {
              id
              label: name
            }
          }
          count: postsCount(where: $where)
        }
        ");
    }

    #[multiplatform_test]
    fn item_document() {
        insta::assert_snapshot!(item_query(&posts(), &["password"]).unwrap(), @r"
        query ($id: ID!) {
          item: post(where: { id: $id }) {
            id
            password {
              isSet
            }
          }
        }
        ");
    }

    #[multiplatform_test]
    fn mutation_documents() {
        let list = posts();

        insta::assert_snapshot!(create_mutation(&list).unwrap(), @r"
        mutation ($data: PostCreateInput!) {
          item: createPost(data: $data) {
            id
            label: title
          }
        }
        ");
        insta::assert_snapshot!(update_mutation(&list).unwrap(), @r"
        mutation ($data: PostUpdateInput!, $id: ID!) {
          item: updatePost(where: { id: $id }, data: $data) {
            id
            label: title
          }
        }
        ");
        insta::assert_snapshot!(delete_mutation(&list).unwrap(), @r"
        mutation ($id: ID!) {
          item: deletePost(where: { id: $id }) {
            id
            label: title
          }
        }
        ");
    }

    #[multiplatform_test]
    fn list_query_from_params() {
        let params = QueryParams::parse(
            "fields=title&sortBy=-publishedAt&page=2&pageSize=10&%21status_is_i=draft",
        );
        let query = ListQuery::from_params(&posts(), &params, &QueryConfig::default()).unwrap();

        assert_eq!(query.fields, vec!["title"]);
        assert_eq!(query.sort, SortSpec::desc("publishedAt"));
        assert_eq!(
            query.variables,
            json!({
                "where": { "status": { "equals": "draft", "mode": "insensitive" } },
                "take": 10,
                "skip": 10,
                "orderBy": [{ "publishedAt": "desc" }]
            })
        );
        assert!(query.document.contains("items: posts("));
    }
}
