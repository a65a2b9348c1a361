// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_model::field::{RelationshipConfig, RelationshipDisplayMode};
use admin_model::{FieldConfig, FieldMeta, FieldMode, ListMeta};

pub(crate) fn text(path: &str) -> FieldMeta {
    FieldMeta::new(path, FieldConfig::Text(Default::default()))
}

pub(crate) fn relationship(path: &str, ref_list_key: &str, many: bool) -> FieldMeta {
    FieldMeta::new(
        path,
        FieldConfig::Relationship(RelationshipConfig {
            ref_list_key: ref_list_key.to_string(),
            ref_label_field: "name".to_string(),
            many,
            display_mode: RelationshipDisplayMode::Select,
        }),
    )
}

pub(crate) fn posts() -> ListMeta {
    ListMeta::builder("Post")
        .fields([
            text("title").filterable().orderable(),
            text("status").filterable(),
            text("secret").with_list_view(FieldMode::Hidden),
            FieldMeta::new("isPublished", FieldConfig::Checkbox(Default::default()))
                .filterable(),
            relationship("author", "User", false).filterable(),
            relationship("tags", "Tag", true).filterable(),
            FieldMeta::new("password", FieldConfig::Password(Default::default())),
            FieldMeta::new("publishedAt", FieldConfig::Timestamp(Default::default()))
                .filterable()
                .orderable(),
        ])
        .initial_columns(["title", "status", "author"])
        .build()
        .unwrap()
}
