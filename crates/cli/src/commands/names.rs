// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use admin_model::{AdminMeta, GraphQLNames};
use anyhow::Result;
use clap::{ArgMatches, Command};
use common::env::Environment;
use serde_json::{Map, Value};

use super::{
    command::{CommandDefinition, get, get_required, list_arg, schema_file_arg},
    util::{load_admin_meta, selected_lists},
};

pub(crate) struct NamesCommandDefinition {}

impl CommandDefinition for NamesCommandDefinition {
    fn command(&self) -> Command {
        Command::new("names")
            .about("Print the generated GraphQL names of a list")
            .arg(schema_file_arg())
            .arg(list_arg(false))
    }

    fn execute(&self, matches: &ArgMatches, _env: &dyn Environment) -> Result<()> {
        let schema: PathBuf = get_required(matches, "schema")?;
        let list: Option<String> = get(matches, "list");

        let meta = load_admin_meta(&schema)?;
        let names = names_output(&meta, list.as_deref())?;

        println!("{}", serde_json::to_string_pretty(&names)?);
        Ok(())
    }
}

/// The names of one list, or an object of names keyed by list key.
fn names_output(meta: &AdminMeta, key: Option<&str>) -> Result<Value> {
    let lists = selected_lists(meta, key)?;

    let names = lists
        .into_iter()
        .map(|list| {
            let names: GraphQLNames = list.graphql_names()?.into_owned();
            Ok((list.key.clone(), serde_json::to_value(names)?))
        })
        .collect::<Result<Map<String, Value>>>()?;

    match key {
        Some(key) => Ok(names.get(key).cloned().unwrap_or(Value::Null)),
        None => Ok(Value::Object(names)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::util::tests::load_schema;

    #[test]
    fn names_of_one_list() {
        let names = names_output(&load_schema(), Some("Post")).unwrap();

        assert_eq!(names["listQueryName"], "posts");
        assert_eq!(names["itemQueryName"], "post");
        assert_eq!(names["createMutationName"], "createPost");
        assert_eq!(names["whereInputName"], "PostWhereInput");
    }

    #[test]
    fn names_of_every_list() {
        let names = names_output(&load_schema(), None).unwrap();

        let keys = names.as_object().unwrap().keys().collect::<Vec<_>>();
        assert_eq!(keys, vec!["Post", "User"]);
        assert_eq!(names["User"]["listQueryCountName"], "usersCount");
    }
}
