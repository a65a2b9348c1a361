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
use admin_resolver::enhance_list_for_client;
use anyhow::{Result, bail};
use clap::{ArgMatches, Command};
use common::env::Environment;
use serde::Serialize;
use tracing::info;

use super::{
    command::{CommandDefinition, get, get_required, list_arg, schema_file_arg},
    util::{load_admin_meta, selected_lists},
};

pub(crate) struct CheckCommandDefinition {}

impl CommandDefinition for CheckCommandDefinition {
    fn command(&self) -> Command {
        Command::new("check")
            .about("Enhance every field of a schema and report the ones that fail")
            .arg(schema_file_arg())
            .arg(list_arg(false))
    }

    fn execute(&self, matches: &ArgMatches, _env: &dyn Environment) -> Result<()> {
        let schema: PathBuf = get_required(matches, "schema")?;
        let list: Option<String> = get(matches, "list");

        let meta = load_admin_meta(&schema)?;
        let reports = selected_lists(&meta, list.as_deref())?
            .into_iter()
            .map(check_list)
            .collect::<Vec<_>>();

        println!("{}", serde_json::to_string_pretty(&reports)?);

        let degraded: usize = reports.iter().map(|report| report.degraded.len()).sum();
        if degraded > 0 {
            bail!("{degraded} field(s) could not be enhanced");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListReport {
    list: String,
    label_field: String,
    search_fields: Vec<String>,
    degraded: Vec<String>,
}

fn check_list(list: &ListMeta) -> ListReport {
    let client = enhance_list_for_client(list);
    info!(list = %list.key, fields = client.fields.len(), "Enhanced list");

    ListReport {
        list: list.key.clone(),
        label_field: list.label_field.clone(),
        search_fields: list.search_fields.clone(),
        degraded: client.degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::util::{
        load_admin_meta,
        tests::{load_schema, schema_file},
    };

    #[test]
    fn reports_search_fields() {
        let meta = load_schema();

        let report = check_list(meta.list("Post").unwrap());
        assert_eq!(report.label_field, "title");
        assert_eq!(report.search_fields, vec!["title"]);
        assert!(report.degraded.is_empty());
    }

    #[test]
    fn reports_degraded_fields() {
        let file = schema_file(
            r#"{ "views": ["text"], "lists": [ { "key": "Tag", "fields": [
                { "path": "name", "viewsIndex": 0 },
                { "path": "slug", "viewsIndex": 0,
                  "fieldMeta": { "validation": { "match": { "regex": "[" } } } }
            ] } ] }"#,
        );
        let meta = load_admin_meta(file.path()).unwrap();

        let report = check_list(meta.list("Tag").unwrap());
        assert_eq!(report.degraded, vec!["slug"]);
    }
}
