// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_model::{FieldConfig, FieldMeta, FieldTypeKey};
use serde_json::{Map, Value, json};

use crate::controller::{FieldController, item_value, single};
use crate::error::{DeserializeError, FieldTypeError};
use crate::registry::{FieldImplementation, FieldViews, field_views, with_config};
use crate::value::{FieldValue, ImageData, ImageValue};

pub struct ImageFieldType;

impl FieldImplementation for ImageFieldType {
    fn key(&self) -> FieldTypeKey {
        FieldTypeKey::Image
    }

    fn views(&self) -> FieldViews {
        field_views!("image", no_filter)
    }

    fn graphql_selection(&self, path: &str, _config: &FieldConfig) -> Option<String> {
        Some(format!(
            "{path} {{\n  src\n  id\n  extension\n  width\n  height\n  filesize\n}}"
        ))
    }

    fn controller(
        &self,
        field: &FieldMeta,
    ) -> Option<Result<Box<dyn FieldController>, FieldTypeError>> {
        Some(with_config(
            field,
            FieldTypeKey::Image,
            |config| match config {
                FieldConfig::Image(config) => Some(config),
                _ => None,
            },
            |_| {
                Ok(Box::new(ImageController {
                    meta: field.clone(),
                }) as Box<dyn FieldController>)
            },
        ))
    }
}

#[derive(Debug)]
pub struct ImageController {
    meta: FieldMeta,
}

impl FieldController for ImageController {
    fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    fn default_value(&self) -> FieldValue {
        FieldValue::Image(ImageValue::Empty)
    }

    fn deserialize(&self, item: &Map<String, Value>) -> Result<FieldValue, DeserializeError> {
        match item_value(item, &self.meta.path) {
            Value::Null => Ok(FieldValue::Image(ImageValue::Empty)),
            value => serde_json::from_value::<ImageData>(value.clone())
                .map(|data| FieldValue::Image(ImageValue::FromServer(data)))
                .map_err(|e| DeserializeError::Malformed {
                    path: self.meta.path.clone(),
                    message: e.to_string(),
                }),
        }
    }

    fn serialize(&self, value: &FieldValue) -> Map<String, Value> {
        match value {
            FieldValue::Image(ImageValue::Upload { reference, .. }) => {
                single(&self.meta.path, json!({ "upload": reference }))
            }
            FieldValue::Image(ImageValue::Remove { .. }) => single(&self.meta.path, Value::Null),
            _ => Map::new(),
        }
    }

    fn has_changed(&self, _original: &FieldValue, current: &FieldValue) -> Option<bool> {
        match current {
            FieldValue::Image(image) => Some(matches!(
                image,
                ImageValue::Upload { .. } | ImageValue::Remove { .. }
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiplatform_test::multiplatform_test;

    fn controller() -> Box<dyn FieldController> {
        ImageFieldType
            .controller(&FieldMeta::new("avatar", FieldConfig::Image(Default::default())))
            .unwrap()
            .unwrap()
    }

    fn stored() -> ImageData {
        ImageData {
            id: "img1".to_string(),
            src: "/images/img1.png".to_string(),
            extension: "png".to_string(),
            width: 64,
            height: 64,
            filesize: 2048,
        }
    }

    #[multiplatform_test]
    fn selection_lists_image_metadata() {
        assert_eq!(
            controller().graphql_selection(),
            "avatar {\n  src\n  id\n  extension\n  width\n  height\n  filesize\n}"
        );
        assert!(controller().filter().is_none());
    }

    #[multiplatform_test]
    fn loads_stored_image() {
        let item = json!({
            "avatar": {
                "id": "img1", "src": "/images/img1.png", "extension": "png",
                "width": 64, "height": 64, "filesize": 2048
            }
        });
        assert_eq!(
            controller().deserialize(item.as_object().unwrap()).unwrap(),
            FieldValue::Image(ImageValue::FromServer(stored()))
        );
    }

    #[multiplatform_test]
    fn uploads_and_removals() {
        let controller = controller();
        let original = FieldValue::Image(ImageValue::FromServer(stored()));
        let upload = FieldValue::Image(ImageValue::Upload {
            reference: "upload-1".to_string(),
            previous: Some(stored()),
        });
        let remove = FieldValue::Image(ImageValue::Remove { previous: stored() });

        assert_eq!(
            Value::Object(controller.serialize(&upload)),
            json!({ "avatar": { "upload": "upload-1" } })
        );
        assert_eq!(
            Value::Object(controller.serialize(&remove)),
            json!({ "avatar": null })
        );
        assert!(controller.serialize(&original).is_empty());

        assert_eq!(controller.has_changed(&original, &original), Some(false));
        assert_eq!(controller.has_changed(&original, &upload), Some(true));
        assert_eq!(controller.has_changed(&original, &remove), Some(true));
    }
}
