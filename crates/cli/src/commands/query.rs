// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use admin_model::ListMeta;
use admin_query_builder::{
    ListQuery, QueryConfig, QueryParams, create_mutation, delete_mutation, item_query,
    update_mutation,
};
use anyhow::{Result, anyhow};
use clap::{Arg, ArgMatches, Command, builder::PossibleValuesParser};
use common::env::Environment;
use serde_json::{Value, json};

use super::{
    command::{CommandDefinition, get, get_required, list_arg, schema_file_arg},
    util::{find_list, load_admin_meta},
};

const KINDS: [&str; 5] = ["list", "item", "create", "update", "delete"];

pub(crate) struct QueryCommandDefinition {}

impl CommandDefinition for QueryCommandDefinition {
    fn command(&self) -> Command {
        Command::new("query")
            .about("Print the GraphQL document and variables for a list page")
            .arg(schema_file_arg())
            .arg(list_arg(true))
            .arg(
                Arg::new("kind")
                    .help("The operation to print")
                    .long("kind")
                    .required(false)
                    .value_parser(PossibleValuesParser::new(KINDS))
                    .default_value("list"),
            )
            .arg(
                Arg::new("params")
                    .help("The URL query string of the list page")
                    .long_help("The URL query string of the list page, for example `search=foo&sortBy=-title&!status_is=%22draft%22`.")
                    .long("params")
                    .required(false)
                    .num_args(1),
            )
            .arg(
                Arg::new("id")
                    .help("The item id for the item, update, and delete operations")
                    .long("id")
                    .required(false)
                    .num_args(1),
            )
    }

    fn execute(&self, matches: &ArgMatches, env: &dyn Environment) -> Result<()> {
        let schema: PathBuf = get_required(matches, "schema")?;
        let list_key: String = get_required(matches, "list")?;
        let kind: String = get_required(matches, "kind")?;
        let params = get::<String>(matches, "params")
            .map(|query| QueryParams::parse(&query))
            .unwrap_or_default();
        let id: Option<String> = get(matches, "id");

        let config = QueryConfig::from_env(env)?;
        let meta = load_admin_meta(&schema)?;
        let list = find_list(&meta, &list_key)?;

        let output = query_output(list, &kind, &params, id.as_deref(), &config)?;

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

fn item_fields(list: &ListMeta) -> Vec<&str> {
    list.fields
        .values()
        .filter(|field| !field.item_view.is_hidden())
        .map(|field| field.path.as_str())
        .collect()
}

fn query_output(
    list: &ListMeta,
    kind: &str,
    params: &QueryParams,
    id: Option<&str>,
    config: &QueryConfig,
) -> Result<Value> {
    let id = || id.ok_or_else(|| anyhow!("The {kind} operation needs an --id"));

    let (query, variables) = match kind {
        "list" => {
            let list_query = ListQuery::from_params(list, params, config)?;
            (list_query.document, list_query.variables)
        }
        "item" => (
            item_query(list, &item_fields(list))?,
            json!({ "id": id()? }),
        ),
        "create" => (create_mutation(list)?, json!({ "data": {} })),
        "update" => (
            update_mutation(list)?,
            json!({ "id": id()?, "data": {} }),
        ),
        "delete" => (delete_mutation(list)?, json!({ "id": id()? })),
        _ => return Err(anyhow!("Unknown operation kind: {kind}")),
    };

    Ok(json!({ "query": query, "variables": variables }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::util::tests::load_schema;
    use admin_model::AdminMeta;
    use common::env::MapEnvironment;

    fn post(meta: &AdminMeta) -> &ListMeta {
        find_list(meta, "Post").unwrap()
    }

    #[test]
    fn list_variables_follow_the_params() {
        let meta = load_schema();
        let params = QueryParams::parse("?search=rust&sortBy=-title&page=2&pageSize=10");

        let output =
            query_output(post(&meta), "list", &params, None, &QueryConfig::default()).unwrap();

        assert_eq!(
            output["variables"],
            json!({
                "where": { "OR": [{ "title": { "contains": "rust", "mode": "insensitive" } }] },
                "take": 10,
                "skip": 10,
                "orderBy": [{ "title": "desc" }],
            })
        );
        assert!(
            output["query"]
                .as_str()
                .unwrap()
                .contains("items: posts(where: $where")
        );
    }

    #[test]
    fn page_size_is_capped_by_the_environment() {
        let meta = load_schema();
        let env = MapEnvironment::from([
            ("ADMIN_DEFAULT_PAGE_SIZE", "5"),
            ("ADMIN_MAX_PAGE_SIZE", "5"),
        ]);
        let config = QueryConfig::from_env(&env).unwrap();

        let output = query_output(
            post(&meta),
            "list",
            &QueryParams::parse("pageSize=100"),
            None,
            &config,
        )
        .unwrap();

        assert_eq!(output["variables"]["take"], 5);
    }

    #[test]
    fn item_operations_need_an_id() {
        let meta = load_schema();
        let params = QueryParams::new();
        let config = QueryConfig::default();

        let error = query_output(post(&meta), "delete", &params, None, &config).unwrap_err();
        assert_eq!(error.to_string(), "The delete operation needs an --id");

        let output = query_output(post(&meta), "update", &params, Some("p1"), &config).unwrap();
        assert_eq!(output["variables"], json!({ "id": "p1", "data": {} }));
        assert!(
            output["query"]
                .as_str()
                .unwrap()
                .starts_with("mutation ($data: PostUpdateInput!, $id: ID!)")
        );
    }

    #[test]
    fn item_query_selects_visible_fields() {
        let meta = load_schema();

        let output = query_output(
            post(&meta),
            "item",
            &QueryParams::new(),
            Some("p1"),
            &QueryConfig::default(),
        )
        .unwrap();

        let query = output["query"].as_str().unwrap();
        assert!(query.contains("item: post(where: { id: $id })"));
        assert!(query.contains("label: name"));
    }
}
