// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::field::{FieldConfig, FieldMeta, IdKind};
use crate::field_type::FieldTypeKey;
use crate::naming::{GraphQLNames, ToListNames, ToPlural, is_valid_graphql_name};

pub const ID_FIELD: &str = "id";

/// Label field candidates, in order of preference, when a list doesn't declare one.
const LABEL_FIELD_CANDIDATES: [&str; 3] = ["label", "name", "title"];

/// How many non-label fields are shown by default next to the label field.
const DEFAULT_EXTRA_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[serde(alias = "asc")]
    Asc,
    #[serde(alias = "desc")]
    Desc,
}

impl SortDirection {
    /// The value of a GraphQL `OrderDirection` enum.
    pub fn as_graphql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.field),
            SortDirection::Desc => write!(f, "-{}", self.field),
        }
    }
}

/// Static description of one list (entity type).
#[derive(Debug, Clone, PartialEq)]
pub struct ListMeta {
    pub key: String,
    /// URL segment
    pub path: String,
    pub label: String,
    pub singular: String,
    pub plural: String,
    pub graphql_plural: String,
    pub description: Option<String>,
    pub label_field: String,
    /// Declared schema order. Always contains the `id` field.
    pub fields: IndexMap<String, FieldMeta>,
    pub initial_columns: Vec<String>,
    pub initial_search_fields: Vec<String>,
    pub initial_sort: Option<SortSpec>,
    pub page_size: Option<usize>,
    pub hide_create: bool,
    pub hide_delete: bool,
    pub gql_names: Option<GraphQLNames>,
    /// Filled by server enhancement
    pub search_fields: Vec<String>,
}

impl ListMeta {
    pub fn builder(key: impl Into<String>) -> ListMetaBuilder {
        ListMetaBuilder::new(key)
    }

    pub fn field(&self, path: &str) -> Option<&FieldMeta> {
        self.fields.get(path)
    }

    pub fn id_kind(&self) -> IdKind {
        match self.fields.get(ID_FIELD).map(|field| &field.config) {
            Some(FieldConfig::Id(config)) => config.kind,
            _ => IdKind::default(),
        }
    }

    pub fn is_orderable(&self, path: &str) -> bool {
        self.fields
            .get(path)
            .is_some_and(|field| field.is_orderable)
    }

    pub fn orderable_fields(&self) -> impl Iterator<Item = &FieldMeta> {
        self.fields.values().filter(|field| field.is_orderable)
    }

    pub fn filterable_fields(&self) -> impl Iterator<Item = &FieldMeta> {
        self.fields.values().filter(|field| field.is_filterable)
    }

    /// The generated names, computing them when the list was assembled without them.
    pub fn graphql_names(&self) -> Result<Cow<'_, GraphQLNames>, SchemaError> {
        match &self.gql_names {
            Some(names) => Ok(Cow::Borrowed(names)),
            None => GraphQLNames::new(&self.key, &self.graphql_plural).map(Cow::Owned),
        }
    }
}

/// Assembles a [`ListMeta`], validating the declaration and filling in derived defaults.
#[derive(Debug, Clone)]
pub struct ListMetaBuilder {
    key: String,
    graphql_plural: Option<String>,
    path: Option<String>,
    label: Option<String>,
    singular: Option<String>,
    plural: Option<String>,
    description: Option<String>,
    label_field: Option<String>,
    initial_columns: Option<Vec<String>>,
    initial_search_fields: Option<Vec<String>>,
    initial_sort: Option<SortSpec>,
    page_size: Option<usize>,
    hide_create: bool,
    hide_delete: bool,
    id_kind: IdKind,
    gql_names: Option<GraphQLNames>,
    fields: Vec<FieldMeta>,
}

impl ListMetaBuilder {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            graphql_plural: None,
            path: None,
            label: None,
            singular: None,
            plural: None,
            description: None,
            label_field: None,
            initial_columns: None,
            initial_search_fields: None,
            initial_sort: None,
            page_size: None,
            hide_create: false,
            hide_delete: false,
            id_kind: IdKind::default(),
            gql_names: None,
            fields: vec![],
        }
    }

    pub fn graphql_plural(mut self, plural: impl Into<String>) -> Self {
        self.graphql_plural = Some(plural.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn singular(mut self, singular: impl Into<String>) -> Self {
        self.singular = Some(singular.into());
        self
    }

    pub fn plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn label_field(mut self, label_field: impl Into<String>) -> Self {
        self.label_field = Some(label_field.into());
        self
    }

    pub fn initial_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.initial_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn initial_search_fields<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.initial_search_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn initial_sort(mut self, sort: SortSpec) -> Self {
        self.initial_sort = Some(sort);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn hide_create(mut self, hide: bool) -> Self {
        self.hide_create = hide;
        self
    }

    pub fn hide_delete(mut self, hide: bool) -> Self {
        self.hide_delete = hide;
        self
    }

    /// Id kind of the implicit `id` field. Ignored when an `id` field is declared.
    pub fn id_kind(mut self, kind: IdKind) -> Self {
        self.id_kind = kind;
        self
    }

    pub fn gql_names(mut self, names: GraphQLNames) -> Self {
        self.gql_names = Some(names);
        self
    }

    pub fn field(mut self, field: FieldMeta) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldMeta>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn build(self) -> Result<ListMeta, SchemaError> {
        let key = self.key;
        if !is_valid_graphql_name(&key) {
            return Err(SchemaError::InvalidListKey(key));
        }

        let graphql_plural = self.graphql_plural.unwrap_or_else(|| key.to_plural());
        let gql_names = match self.gql_names {
            Some(names) if key != graphql_plural => names,
            _ => GraphQLNames::new(&key, &graphql_plural)?,
        };

        let fields = collect_fields(&key, self.fields, self.id_kind)?;

        let check_field = |path: &str, context: &'static str| -> Result<(), SchemaError> {
            if fields.contains_key(path) {
                Ok(())
            } else {
                Err(SchemaError::UnknownField {
                    list: key.clone(),
                    path: path.to_string(),
                    context,
                })
            }
        };

        let label_field = match self.label_field {
            Some(label_field) => {
                check_field(&label_field, "label field")?;
                label_field
            }
            None => LABEL_FIELD_CANDIDATES
                .into_iter()
                .find(|candidate| fields.contains_key(*candidate))
                .unwrap_or(ID_FIELD)
                .to_string(),
        };

        let initial_columns = match self.initial_columns {
            Some(columns) => {
                for column in &columns {
                    check_field(column, "initial columns")?;
                }
                columns
            }
            None => std::iter::once(label_field.clone())
                .chain(
                    fields
                        .values()
                        .filter(|field| {
                            field.path != label_field
                                && field.path != ID_FIELD
                                && !field.list_view.is_hidden()
                        })
                        .take(DEFAULT_EXTRA_COLUMNS)
                        .map(|field| field.path.clone()),
                )
                .collect(),
        };

        let initial_search_fields = match self.initial_search_fields {
            Some(search_fields) => {
                for search_field in &search_fields {
                    check_field(search_field, "initial search fields")?;
                }
                search_fields
            }
            None => fields
                .get(&label_field)
                .filter(|field| field.field_type == FieldTypeKey::Text)
                .map(|field| vec![field.path.clone()])
                .unwrap_or_default(),
        };

        if let Some(sort) = &self.initial_sort {
            check_field(&sort.field, "initial sort")?;
        }

        let singular = self.singular.unwrap_or_else(|| key.list_label());
        let plural = self.plural.unwrap_or_else(|| graphql_plural.list_label());

        Ok(ListMeta {
            path: self.path.unwrap_or_else(|| graphql_plural.list_path()),
            label: self.label.unwrap_or_else(|| plural.clone()),
            singular,
            plural,
            graphql_plural,
            description: self.description,
            label_field,
            fields,
            initial_columns,
            initial_search_fields,
            initial_sort: self.initial_sort,
            page_size: self.page_size,
            hide_create: self.hide_create,
            hide_delete: self.hide_delete,
            gql_names: Some(gql_names),
            search_fields: vec![],
            key,
        })
    }
}

fn collect_fields(
    list_key: &str,
    declared: Vec<FieldMeta>,
    id_kind: IdKind,
) -> Result<IndexMap<String, FieldMeta>, SchemaError> {
    let mut fields = IndexMap::with_capacity(declared.len() + 1);

    if !declared.iter().any(|field| field.path == ID_FIELD) {
        fields.insert(ID_FIELD.to_string(), FieldMeta::implicit_id(id_kind));
    }

    for field in declared {
        if !is_valid_graphql_name(&field.path) {
            return Err(SchemaError::InvalidFieldPath {
                list: list_key.to_string(),
                path: field.path,
            });
        }
        if fields.contains_key(&field.path) {
            return Err(SchemaError::DuplicateField {
                list: list_key.to_string(),
                path: field.path,
            });
        }
        fields.insert(field.path.clone(), field);
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{CheckboxConfig, TextConfig, TimestampConfig};
    use multiplatform_test::multiplatform_test;

    fn text(path: &str) -> FieldMeta {
        FieldMeta::new(path, FieldConfig::Text(TextConfig::default()))
    }

    #[multiplatform_test]
    fn derives_defaults() {
        let list = ListMeta::builder("Tool")
            .field(text("name"))
            .field(text("slug"))
            .field(FieldMeta::new(
                "isFeatured",
                FieldConfig::Checkbox(CheckboxConfig::default()),
            ))
            .field(FieldMeta::new(
                "createdAt",
                FieldConfig::Timestamp(TimestampConfig::default()),
            ))
            .build()
            .unwrap();

        assert_eq!(list.graphql_plural, "Tools");
        assert_eq!(list.path, "tools");
        assert_eq!(list.label, "Tools");
        assert_eq!(list.singular, "Tool");
        assert_eq!(list.label_field, "name");
        assert_eq!(list.initial_columns, vec!["name", "slug", "isFeatured"]);
        assert_eq!(list.initial_search_fields, vec!["name"]);
        assert_eq!(
            list.fields.keys().collect::<Vec<_>>(),
            vec!["id", "name", "slug", "isFeatured", "createdAt"]
        );
        assert_eq!(list.id_kind(), IdKind::Cuid);
        assert_eq!(
            list.gql_names.as_ref().map(|n| n.list_query_name.as_str()),
            Some("tools")
        );
    }

    #[multiplatform_test]
    fn declared_id_is_kept() {
        let list = ListMeta::builder("Tool")
            .field(text("name"))
            .field(FieldMeta::new(
                "id",
                FieldConfig::Id(crate::field::IdConfig {
                    kind: IdKind::Autoincrement,
                }),
            ))
            .build()
            .unwrap();

        assert_eq!(list.fields.keys().collect::<Vec<_>>(), vec!["name", "id"]);
        assert_eq!(list.id_kind(), IdKind::Autoincrement);
    }

    #[multiplatform_test]
    fn label_field_candidates_in_order() {
        let label_of = |paths: &[&str]| {
            ListMeta::builder("Thing")
                .fields(paths.iter().map(|path| text(path)))
                .build()
                .unwrap()
                .label_field
        };

        assert_eq!(label_of(&["title", "name", "label"]), "label");
        assert_eq!(label_of(&["title", "name"]), "name");
        assert_eq!(label_of(&["summary", "title"]), "title");
        assert_eq!(label_of(&["summary"]), "id");
    }

    #[multiplatform_test]
    fn label_field_falls_back_to_id() {
        let list = ListMeta::builder("Setting")
            .field(text("value"))
            .build()
            .unwrap();

        assert_eq!(list.label_field, "id");
        assert!(list.initial_search_fields.is_empty());
    }

    #[multiplatform_test]
    fn rejects_bad_declarations() {
        assert!(matches!(
            ListMeta::builder("Tool").field(text("bad-path")).build(),
            Err(SchemaError::InvalidFieldPath { path, .. }) if path == "bad-path"
        ));
        assert!(matches!(
            ListMeta::builder("Tool")
                .field(text("name"))
                .field(text("name"))
                .build(),
            Err(SchemaError::DuplicateField { path, .. }) if path == "name"
        ));
        assert!(matches!(
            ListMeta::builder("Tool")
                .field(text("name"))
                .initial_sort(SortSpec::asc("missing"))
                .build(),
            Err(SchemaError::UnknownField { context: "initial sort", .. })
        ));
        assert!(matches!(
            ListMeta::builder("Fish").graphql_plural("Fish").build(),
            Err(SchemaError::PluralCollision { .. })
        ));
        assert!(matches!(
            ListMeta::builder("2Fast").build(),
            Err(SchemaError::InvalidListKey(_))
        ));
    }

    #[multiplatform_test]
    fn sort_spec_display() {
        assert_eq!(SortSpec::asc("name").to_string(), "name");
        assert_eq!(SortSpec::desc("createdAt").to_string(), "-createdAt");
    }
}
