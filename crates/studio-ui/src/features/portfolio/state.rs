//! Portfolio feature state.
//!
//! # Design
//! - Keep form inputs as strings for lossless editing.
//! - Convert to shared API types only on submit.
//! - The album of an image is every image sharing its title.

use crate::core::forms::{DialogState, FormErrors, FormModel};
use crate::core::store::DetailStatus;
use studio_api_models::{FilePart, ImagePatch, NewImage, PortfolioImage};

/// Album detail: the image being shown plus its siblings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumDetail {
    /// Image shown large.
    pub primary: PortfolioImage,
    /// All images sharing the primary's title.
    pub album: Vec<PortfolioImage>,
}

impl AlbumDetail {
    /// Show another image of the album as the primary one.
    pub fn select(&mut self, id: &str) -> bool {
        match self.album.iter().find(|image| image.id == id) {
            Some(image) => {
                self.primary = image.clone();
                true
            }
            None => false,
        }
    }
}

/// Portfolio slice of the app store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PortfolioState {
    /// Images in backend order, duplicates included.
    pub images: Vec<PortfolioImage>,
    /// List fetch in flight.
    pub loading: bool,
    /// Shared flag for the list's remove buttons.
    pub remove_busy: bool,
    /// "Add portfolio item" dialog.
    pub add_dialog: DialogState<NewImageForm>,
    /// Album detail page.
    pub detail: DetailStatus<AlbumDetail>,
    /// "Edit portfolio item" dialog on the detail page.
    pub edit_dialog: DialogState<ImagePatchForm>,
    /// Flag for the detail page's remove button.
    pub detail_remove_busy: bool,
}

/// Inputs of the add dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewImageForm {
    /// Album title.
    pub title: String,
    /// Caption.
    pub caption: String,
    /// Selected image file.
    pub file: Option<FilePart>,
}

impl FormModel for NewImageForm {
    type Output = NewImage;

    fn validate(&self) -> Result<NewImage, FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("title", &self.title, "validation.title_required");
        errors.require("caption", &self.caption, "validation.caption_required");
        errors.require_some("file", self.file.as_ref(), "validation.file_required");
        match (errors.is_empty(), &self.file) {
            (true, Some(file)) => Ok(NewImage {
                title: self.title.trim().to_string(),
                caption: self.caption.trim().to_string(),
                file: file.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Inputs of the edit dialog; every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImagePatchForm {
    /// New title.
    pub title: String,
    /// New tag.
    pub tag: String,
    /// New caption.
    pub caption: String,
    /// Replacement file.
    pub file: Option<FilePart>,
}

impl FormModel for ImagePatchForm {
    type Output = ImagePatch;

    fn validate(&self) -> Result<ImagePatch, FormErrors> {
        let patch = ImagePatch {
            title: non_empty(&self.title),
            tag: non_empty(&self.tag),
            caption: non_empty(&self.caption),
            file: self.file.clone(),
        };
        if patch.is_empty() {
            let mut errors = FormErrors::default();
            errors.push("title", "validation.nothing_to_update");
            return Err(errors);
        }
        Ok(patch)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
