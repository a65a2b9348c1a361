// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{fs, path::Path};

use admin_model::{AdminMeta, ListMeta};
use admin_resolver::enhance_admin_meta_for_server;
use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Reads a metadata file and enhances every list for query building.
pub(super) fn load_admin_meta(path: &Path) -> Result<AdminMeta> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Could not read the schema file {}", path.display()))?;

    let meta = AdminMeta::from_json(&json)
        .with_context(|| format!("Invalid admin metadata in {}", path.display()))?;

    debug!(lists = meta.lists.len(), "Loaded admin metadata");

    Ok(enhance_admin_meta_for_server(&meta)?)
}

pub(super) fn find_list<'a>(meta: &'a AdminMeta, key: &str) -> Result<&'a ListMeta> {
    meta.list(key).ok_or_else(|| {
        let known = meta.lists.keys().cloned().collect::<Vec<_>>().join(", ");
        anyhow!("Unknown list '{key}'. Available lists: {known}")
    })
}

/// The named list, or every list when no key is given.
pub(super) fn selected_lists<'a>(
    meta: &'a AdminMeta,
    key: Option<&str>,
) -> Result<Vec<&'a ListMeta>> {
    match key {
        Some(key) => Ok(vec![find_list(meta, key)?]),
        None => Ok(meta.lists.values().collect()),
    }
}

#[cfg(test)]
pub(super) mod tests {
    use std::io::Write;

    use super::*;

    pub(crate) const SCHEMA: &str = r#"{
        "views": ["id", "text", "relationship"],
        "lists": [
            {
                "key": "Post",
                "initialColumns": ["title", "author"],
                "initialSearchFields": ["title"],
                "fields": [
                    { "path": "id", "viewsIndex": 0 },
                    { "path": "title", "viewsIndex": 1, "isFilterable": true, "isOrderable": true },
                    { "path": "author", "viewsIndex": 2, "isFilterable": true,
                      "fieldMeta": { "refListKey": "User", "refLabelField": "name", "many": false } }
                ]
            },
            {
                "key": "User",
                "fields": [
                    { "path": "id", "viewsIndex": 0 },
                    { "path": "name", "viewsIndex": 1, "isFilterable": true }
                ]
            }
        ]
    }"#;

    pub(crate) fn schema_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    pub(crate) fn load_schema() -> AdminMeta {
        let file = schema_file(SCHEMA);
        load_admin_meta(file.path()).unwrap()
    }

    #[test]
    fn loads_and_enhances() {
        let meta = load_schema();

        let post = find_list(&meta, "Post").unwrap();
        assert_eq!(post.search_fields, vec!["title"]);
        assert!(post.gql_names.is_some());

        let user = find_list(&meta, "User").unwrap();
        assert_eq!(user.search_fields, vec!["name"]);
    }

    #[test]
    fn unknown_list() {
        let meta = load_schema();

        let error = find_list(&meta, "Comment").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Unknown list 'Comment'. Available lists: Post, User"
        );
    }

    #[test]
    fn selects_every_list_without_a_key() {
        let meta = load_schema();

        let keys = selected_lists(&meta, None)
            .unwrap()
            .iter()
            .map(|list| list.key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["Post", "User"]);
        assert_eq!(selected_lists(&meta, Some("User")).unwrap().len(), 1);
    }

    #[test]
    fn reports_invalid_metadata() {
        let file = schema_file(r#"{ "views": ["color-picker"], "lists": [] }"#);

        let error = load_admin_meta(file.path()).unwrap_err();
        assert!(error.to_string().starts_with("Invalid admin metadata in "));
    }

    #[test]
    fn reports_missing_file() {
        let error = load_admin_meta(Path::new("/nonexistent/admin.json")).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Could not read the schema file /nonexistent/admin.json"
        );
    }
}
