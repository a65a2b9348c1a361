// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_model::field::{
    RelationshipConfig, RelationshipDisplayMode, TextConfig, TextValidation,
};
use admin_model::{FieldConfig, FieldMeta, FieldMode, ListMeta};

pub(crate) fn text(path: &str) -> FieldMeta {
    FieldMeta::new(path, FieldConfig::Text(Default::default()))
}

pub(crate) fn required_text(path: &str) -> FieldMeta {
    FieldMeta::new(
        path,
        FieldConfig::Text(TextConfig {
            validation: TextValidation {
                is_required: true,
                ..Default::default()
            },
            ..Default::default()
        }),
    )
}

pub(crate) fn posts() -> ListMeta {
    ListMeta::builder("Post")
        .fields([
            required_text("title").filterable().orderable(),
            text("status").filterable(),
            FieldMeta::new("isPublished", FieldConfig::Checkbox(Default::default())),
            FieldMeta::new(
                "author",
                FieldConfig::Relationship(RelationshipConfig {
                    ref_list_key: "User".to_string(),
                    ref_label_field: "name".to_string(),
                    many: false,
                    display_mode: RelationshipDisplayMode::Select,
                }),
            ),
            FieldMeta::new("views", FieldConfig::Virtual(Default::default()))
                .with_create_view(FieldMode::Hidden)
                .with_item_view(FieldMode::Read),
        ])
        .build()
        .unwrap()
}
