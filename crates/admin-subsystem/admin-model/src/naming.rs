// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Names derived from a list key.
//!
//! The GraphQL names must match what the backend generates bit for bit, so they are plain
//! concatenations of the list key and its plural GraphQL name.

use heck::{ToKebabCase, ToTitleCase};
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// A type with both singular and plural versions of itself.
pub trait ToPlural {
    fn to_plural(&self) -> String;
}

impl ToPlural for str {
    fn to_plural(&self) -> String {
        let plural_name = pluralizer::pluralize(self, 2, false);
        if plural_name == self {
            // Force pluralization if the pluralizer returns the same string
            format!("{self}s")
        } else {
            plural_name
        }
    }
}

/// Human and URL names derived from a GraphQL plural name.
pub trait ToListNames {
    /// Human label (e.g. `Open Source Tools` for `OpenSourceTools`)
    fn list_label(&self) -> String;
    /// URL segment (e.g. `open-source-tools` for `OpenSourceTools`)
    fn list_path(&self) -> String;
}

impl ToListNames for str {
    fn list_label(&self) -> String {
        self.to_title_case()
    }

    fn list_path(&self) -> String {
        self.to_kebab_case()
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `name` can be used as a GraphQL name (`/^[_A-Za-z][_0-9A-Za-z]*$/`).
pub fn is_valid_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLNames {
    pub output_type_name: String,
    pub where_input_name: String,
    pub where_unique_input_name: String,

    pub create_input_name: String,
    pub create_mutation_name: String,
    pub create_many_mutation_name: String,
    pub relate_to_one_for_create_input_name: String,
    pub relate_to_many_for_create_input_name: String,

    pub item_query_name: String,
    pub list_order_name: String,
    pub list_query_count_name: String,
    pub list_query_name: String,

    pub update_input_name: String,
    pub update_mutation_name: String,
    pub update_many_input_name: String,
    pub update_many_mutation_name: String,
    pub relate_to_one_for_update_input_name: String,
    pub relate_to_many_for_update_input_name: String,

    pub delete_mutation_name: String,
    pub delete_many_mutation_name: String,
}

impl GraphQLNames {
    pub fn new(list_key: &str, plural_graphql_name: &str) -> Result<Self, SchemaError> {
        if list_key == plural_graphql_name {
            return Err(SchemaError::PluralCollision {
                key: list_key.to_string(),
                plural: plural_graphql_name.to_string(),
            });
        }

        let lower_plural_name = lower_first(plural_graphql_name);
        let lower_singular_name = lower_first(list_key);

        Ok(Self {
            output_type_name: list_key.to_string(),
            where_input_name: format!("{list_key}WhereInput"),
            where_unique_input_name: format!("{list_key}WhereUniqueInput"),

            create_input_name: format!("{list_key}CreateInput"),
            create_mutation_name: format!("create{list_key}"),
            create_many_mutation_name: format!("create{plural_graphql_name}"),
            relate_to_one_for_create_input_name: format!("{list_key}RelateToOneForCreateInput"),
            relate_to_many_for_create_input_name: format!(
                "{list_key}RelateToManyForCreateInput"
            ),

            item_query_name: lower_singular_name,
            list_order_name: format!("{list_key}OrderByInput"),
            list_query_count_name: format!("{lower_plural_name}Count"),
            list_query_name: lower_plural_name,

            update_input_name: format!("{list_key}UpdateInput"),
            update_mutation_name: format!("update{list_key}"),
            update_many_input_name: format!("{list_key}UpdateArgs"),
            update_many_mutation_name: format!("update{plural_graphql_name}"),
            relate_to_one_for_update_input_name: format!("{list_key}RelateToOneForUpdateInput"),
            relate_to_many_for_update_input_name: format!(
                "{list_key}RelateToManyForUpdateInput"
            ),

            delete_mutation_name: format!("delete{list_key}"),
            delete_many_mutation_name: format!("delete{plural_graphql_name}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiplatform_test::multiplatform_test;

    #[multiplatform_test]
    fn plurals() {
        assert_eq!("Tool".to_plural(), "Tools");
        assert_eq!("Category".to_plural(), "Categories");
        assert_eq!("Alternative".to_plural(), "Alternatives");
    }

    #[multiplatform_test]
    fn list_names() {
        assert_eq!("OpenSourceTools".list_label(), "Open Source Tools");
        assert_eq!("OpenSourceTools".list_path(), "open-source-tools");
    }

    #[multiplatform_test]
    fn graphql_names() {
        let names = GraphQLNames::new("Tool", "Tools").unwrap();

        assert_eq!(names.output_type_name, "Tool");
        assert_eq!(names.item_query_name, "tool");
        assert_eq!(names.list_query_name, "tools");
        assert_eq!(names.list_query_count_name, "toolsCount");
        assert_eq!(names.list_order_name, "ToolOrderByInput");
        assert_eq!(names.where_input_name, "ToolWhereInput");
        assert_eq!(names.where_unique_input_name, "ToolWhereUniqueInput");
        assert_eq!(names.create_input_name, "ToolCreateInput");
        assert_eq!(names.create_mutation_name, "createTool");
        assert_eq!(names.create_many_mutation_name, "createTools");
        assert_eq!(
            names.relate_to_one_for_create_input_name,
            "ToolRelateToOneForCreateInput"
        );
        assert_eq!(
            names.relate_to_many_for_update_input_name,
            "ToolRelateToManyForUpdateInput"
        );
        assert_eq!(names.update_input_name, "ToolUpdateInput");
        assert_eq!(names.update_mutation_name, "updateTool");
        assert_eq!(names.update_many_input_name, "ToolUpdateArgs");
        assert_eq!(names.update_many_mutation_name, "updateTools");
        assert_eq!(names.delete_mutation_name, "deleteTool");
        assert_eq!(names.delete_many_mutation_name, "deleteTools");
    }

    #[multiplatform_test]
    fn lower_first_keeps_the_rest() {
        let names = GraphQLNames::new("URLAlias", "URLAliases").unwrap();
        assert_eq!(names.item_query_name, "uRLAlias");
        assert_eq!(names.list_query_name, "uRLAliases");
    }

    #[multiplatform_test]
    fn key_and_plural_must_differ() {
        assert!(matches!(
            GraphQLNames::new("Sheep", "Sheep"),
            Err(SchemaError::PluralCollision { key, .. }) if key == "Sheep"
        ));
    }

    #[multiplatform_test]
    fn graphql_name_validity() {
        assert!(is_valid_graphql_name("createdAt"));
        assert!(is_valid_graphql_name("_private1"));
        assert!(!is_valid_graphql_name("1st"));
        assert!(!is_valid_graphql_name("has-dash"));
        assert!(!is_valid_graphql_name(""));
    }
}
