//! Service catalog feature state.

use crate::core::forms::{DialogState, FormErrors, FormModel};
use crate::core::store::DetailStatus;
use studio_api_models::{FilePart, NewService, NewSubService, ServiceItem, SubServiceItem};

/// Service detail: the service and its priced packages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceDetail {
    /// Parent service.
    pub service: ServiceItem,
    /// Sub-services in backend order.
    pub subs: Vec<SubServiceItem>,
    /// Sub-service highlighted by the user, if any.
    pub selected: Option<String>,
}

impl ServiceDetail {
    /// Highlight a sub-service; unknown ids clear the selection.
    pub fn select(&mut self, id: &str) {
        self.selected = self
            .subs
            .iter()
            .any(|sub| sub.id == id)
            .then(|| id.to_string());
    }

    /// Highlighted sub-service.
    #[must_use]
    pub fn selected_sub(&self) -> Option<&SubServiceItem> {
        let id = self.selected.as_deref()?;
        self.subs.iter().find(|sub| sub.id == id)
    }
}

/// Services slice of the app store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServicesState {
    /// Services in backend order.
    pub items: Vec<ServiceItem>,
    /// List fetch in flight.
    pub loading: bool,
    /// Shared flag for the list's remove buttons.
    pub remove_busy: bool,
    /// "Add service" dialog.
    pub add_dialog: DialogState<NewServiceForm>,
    /// Service detail page.
    pub detail: DetailStatus<ServiceDetail>,
    /// Flag for removing the service from its detail page.
    pub detail_remove_busy: bool,
    /// "Add sub-service" dialog.
    pub sub_dialog: DialogState<NewSubServiceForm>,
    /// Shared flag for the sub-service remove buttons.
    pub sub_remove_busy: bool,
}

/// Inputs of the add-service dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewServiceForm {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Cover image.
    pub file: Option<FilePart>,
}

impl FormModel for NewServiceForm {
    type Output = NewService;

    fn validate(&self) -> Result<NewService, FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("title", &self.title, "validation.title_required");
        errors.require(
            "description",
            &self.description,
            "validation.description_required",
        );
        errors.require_some("file", self.file.as_ref(), "validation.file_required");
        match (errors.is_empty(), &self.file) {
            (true, Some(file)) => Ok(NewService {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                file: file.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Inputs of the add-sub-service dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewSubServiceForm {
    /// Package title.
    pub title: String,
    /// Comma-separated conditions; may be blank.
    pub condition: String,
    /// Comma-separated add-ons; may be blank.
    pub addon: String,
    /// Price as typed; blank means free.
    pub price: String,
    /// Package image.
    pub file: Option<FilePart>,
}

impl FormModel for NewSubServiceForm {
    type Output = NewSubService;

    fn validate(&self) -> Result<NewSubService, FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("title", &self.title, "validation.title_required");
        let price = parse_price(&self.price, &mut errors);
        errors.require_some("file", self.file.as_ref(), "validation.file_required");
        match (errors.is_empty(), price, &self.file) {
            (true, Some(price), Some(file)) => Ok(NewSubService {
                title: self.title.trim().to_string(),
                condition: self.condition.trim().to_string(),
                addon: self.addon.trim().to_string(),
                price,
                file: file.clone(),
            }),
            _ => Err(errors),
        }
    }
}

fn parse_price(raw: &str, errors: &mut FormErrors) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<u64>().map_or_else(
        |_| {
            errors.push("price", "validation.price_invalid");
            None
        },
        Some,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> FilePart {
        FilePart {
            file_name: "gold.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![0x89, 0x50],
        }
    }

    fn sub(id: &str) -> SubServiceItem {
        SubServiceItem {
            id: id.into(),
            title: format!("Package {id}"),
            price: 100,
            condition: String::new(),
            addon: String::new(),
            img_url: String::new(),
        }
    }

    #[test]
    fn sub_service_price_must_be_a_whole_number() {
        let mut form = NewSubServiceForm {
            title: "Gold".into(),
            condition: "2 hours".into(),
            addon: "Album".into(),
            price: "1.5".into(),
            file: Some(file()),
        };
        let errors = form.validate().expect_err("fractional price");
        assert_eq!(errors.get("price"), Some("validation.price_invalid"));

        form.price = "-3".into();
        assert!(form.validate().is_err());

        form.price = " 1500000 ".into();
        let payload = form.validate().expect("valid form");
        assert_eq!(payload.price, 1_500_000);
    }

    #[test]
    fn empty_sub_service_form_needs_title_and_file() {
        let errors = NewSubServiceForm::default()
            .validate()
            .expect_err("empty form");
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["title", "file"]);
    }

    #[test]
    fn sub_service_extras_are_optional() {
        let payload = NewSubServiceForm {
            title: " Basic ".into(),
            file: Some(file()),
            ..NewSubServiceForm::default()
        }
        .validate()
        .expect("title and file suffice");
        assert_eq!(payload.title, "Basic");
        assert_eq!(payload.condition, "");
        assert_eq!(payload.addon, "");
        assert_eq!(payload.price, 0);
    }

    #[test]
    fn service_form_requires_description() {
        let errors = NewServiceForm {
            title: "Wedding".into(),
            description: " ".into(),
            file: Some(file()),
        }
        .validate()
        .expect_err("blank description");
        assert_eq!(
            errors.get("description"),
            Some("validation.description_required")
        );
    }

    #[test]
    fn selection_ignores_unknown_ids() {
        let mut detail = ServiceDetail {
            service: ServiceItem {
                id: "s1".into(),
                title: "Wedding".into(),
                description: String::new(),
                img_url: String::new(),
            },
            subs: vec![sub("a"), sub("b")],
            selected: None,
        };
        detail.select("b");
        assert_eq!(detail.selected_sub().map(|s| s.id.as_str()), Some("b"));
        detail.select("zzz");
        assert_eq!(detail.selected_sub(), None);
    }
}
