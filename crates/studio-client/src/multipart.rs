//! Multipart field assembly for uploads.
//!
//! # Design
//! - Build an ordered, inspectable field list first; convert to a `reqwest`
//!   form only at send time so the payload shape is testable without HTTP.
//! - Partial updates carry only the fields that were provided.

use reqwest::multipart::{Form, Part};
use studio_api_models::{FilePart, ImagePatch, NewImage, NewService, NewSubService};

use crate::error::ApiError;

/// Single multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    /// Plain text value.
    Text {
        /// Field name.
        name: &'static str,
        /// Field value.
        value: String,
    },
    /// File upload.
    File {
        /// Field name.
        name: &'static str,
        /// File content.
        part: FilePart,
    },
}

impl FormField {
    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self::Text {
            name,
            value: value.into(),
        }
    }

    fn file(part: FilePart) -> Self {
        Self::File { name: "file", part }
    }

    /// Field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Fields for a new portfolio image.
#[must_use]
pub fn new_image_fields(image: NewImage) -> Vec<FormField> {
    vec![
        FormField::text("title", image.title),
        FormField::text("caption", image.caption),
        FormField::file(image.file),
    ]
}

/// Fields for a partial image update; absent values are omitted entirely.
#[must_use]
pub fn image_patch_fields(patch: ImagePatch) -> Vec<FormField> {
    let mut fields = Vec::new();
    if let Some(title) = patch.title {
        fields.push(FormField::text("title", title));
    }
    if let Some(tag) = patch.tag {
        fields.push(FormField::text("tag", tag));
    }
    if let Some(caption) = patch.caption {
        fields.push(FormField::text("caption", caption));
    }
    if let Some(file) = patch.file {
        fields.push(FormField::file(file));
    }
    fields
}

/// Fields for a new service.
#[must_use]
pub fn new_service_fields(service: NewService) -> Vec<FormField> {
    vec![
        FormField::text("title", service.title),
        FormField::text("description", service.description),
        FormField::file(service.file),
    ]
}

/// Fields for a new sub-service.
#[must_use]
pub fn new_sub_service_fields(sub: NewSubService) -> Vec<FormField> {
    vec![
        FormField::text("title", sub.title),
        FormField::text("condition", sub.condition),
        FormField::text("addon", sub.addon),
        FormField::text("price", sub.price.to_string()),
        FormField::file(sub.file),
    ]
}

/// Convert the field list into a `reqwest` form.
///
/// # Errors
/// Returns [`ApiError::Transport`] when a file carries an unparseable MIME type.
pub(crate) fn into_form(fields: Vec<FormField>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, part } => {
                let FilePart {
                    file_name,
                    content_type,
                    bytes,
                } = part;
                let mut file = Part::bytes(bytes).file_name(file_name);
                if let Some(mime) = content_type.filter(|mime| !mime.trim().is_empty()) {
                    file = file
                        .mime_str(&mime)
                        .map_err(|err| ApiError::Transport(err.to_string()))?;
                }
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> FilePart {
        FilePart {
            file_name: "photo.jpg".into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    fn names(fields: &[FormField]) -> Vec<&'static str> {
        fields.iter().map(FormField::name).collect()
    }

    #[test]
    fn caption_only_patch_sends_only_caption() {
        let fields = image_patch_fields(ImagePatch {
            caption: Some("Golden hour".into()),
            ..ImagePatch::default()
        });
        assert_eq!(
            fields,
            vec![FormField::Text {
                name: "caption",
                value: "Golden hour".into()
            }]
        );
    }

    #[test]
    fn full_patch_keeps_field_order() {
        let fields = image_patch_fields(ImagePatch {
            title: Some("Beach".into()),
            tag: Some("sunset".into()),
            caption: Some("Warm".into()),
            file: Some(photo()),
        });
        assert_eq!(names(&fields), ["title", "tag", "caption", "file"]);
    }

    #[test]
    fn sub_service_price_is_sent_as_text() {
        let fields = new_sub_service_fields(NewSubService {
            title: "Gold".into(),
            condition: "2 hours, 1 location".into(),
            addon: "Album".into(),
            price: 1_500_000,
            file: photo(),
        });
        assert_eq!(
            names(&fields),
            ["title", "condition", "addon", "price", "file"]
        );
        assert!(fields.contains(&FormField::Text {
            name: "price",
            value: "1500000".into()
        }));
    }

    #[test]
    fn bad_mime_is_rejected() {
        let mut file = photo();
        file.content_type = Some("not a mime".into());
        let result = into_form(vec![FormField::file(file)]);
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[test]
    fn blank_mime_is_ignored() {
        let mut file = photo();
        file.content_type = Some(String::new());
        assert!(into_form(new_service_fields(NewService {
            title: "Wedding".into(),
            description: "Full day".into(),
            file,
        }))
        .is_ok());
    }
}
