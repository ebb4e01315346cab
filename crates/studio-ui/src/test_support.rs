//! In-memory backend used by command tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use studio_api_models::{
    AuthResponse, AuthTokens, ImagePatch, LoginRequest, NewImage, NewService, NewSubService,
    PortfolioImage, RegisterRequest, ServiceItem, SubServiceItem, TokenGrant,
};
use studio_client::{ApiError, StudioApi};

use crate::core::session::Session;
use crate::core::store::AppStore;

#[derive(Default)]
pub(crate) struct FakeApi {
    pub(crate) images: RefCell<Vec<PortfolioImage>>,
    pub(crate) services: RefCell<Vec<ServiceItem>>,
    pub(crate) subs: RefCell<HashMap<String, Vec<SubServiceItem>>>,
    pub(crate) calls: RefCell<Vec<String>>,
    pub(crate) fail_next_write: RefCell<Option<ApiError>>,
    pub(crate) fail_reads: RefCell<Option<ApiError>>,
    pub(crate) patches: RefCell<Vec<ImagePatch>>,
    pub(crate) empty_album_queries: Cell<bool>,
    /// Runs once, inside the next read, before it answers.
    pub(crate) during_next_read: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl FakeApi {
    pub(crate) fn with_images(images: Vec<PortfolioImage>) -> Self {
        let api = Self::default();
        *api.images.borrow_mut() = images;
        api
    }

    pub(crate) fn calls_to(&self, name: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.as_str() == name)
            .count()
    }

    pub(crate) fn fail_next_write(&self, err: ApiError) {
        *self.fail_next_write.borrow_mut() = Some(err);
    }

    fn record(&self, name: &str) {
        self.calls.borrow_mut().push(name.to_string());
    }

    fn read_guard(&self, name: &str) -> Result<(), ApiError> {
        self.record(name);
        let hook = self.during_next_read.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
        self.fail_reads.borrow().clone().map_or(Ok(()), Err)
    }

    fn write_guard(&self, name: &str, token: Option<&str>) -> Result<(), ApiError> {
        if token.is_none() {
            return Err(ApiError::Unauthenticated);
        }
        self.record(name);
        self.fail_next_write.borrow_mut().take().map_or(Ok(()), Err)
    }

    fn next_id(&self) -> String {
        format!("id-{}", self.calls.borrow().len())
    }
}

#[async_trait(?Send)]
impl StudioApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.record("login");
        if request.password != "secret" {
            return Err(ApiError::Status {
                status: 401,
                message: Some("Incorrect email or password".into()),
            });
        }
        Ok(auth_response(&request.email))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.record("register");
        Ok(auth_response(&request.email))
    }

    async fn list_images(&self, title: Option<&str>) -> Result<Vec<PortfolioImage>, ApiError> {
        self.read_guard("list_images")?;
        if title.is_some() && self.empty_album_queries.get() {
            return Ok(Vec::new());
        }
        Ok(self
            .images
            .borrow()
            .iter()
            .filter(|image| title.is_none_or(|title| image.title == title))
            .cloned()
            .collect())
    }

    async fn get_image(&self, id: &str) -> Result<PortfolioImage, ApiError> {
        self.read_guard("get_image")?;
        self.images
            .borrow()
            .iter()
            .find(|image| image.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_image(&self, token: Option<&str>, image: NewImage) -> Result<(), ApiError> {
        self.write_guard("create_image", token)?;
        let id = self.next_id();
        self.images.borrow_mut().push(PortfolioImage {
            img_url: format!("https://cdn.test/{}", image.file.file_name),
            id,
            title: image.title,
            caption: image.caption,
            tag: None,
        });
        Ok(())
    }

    async fn update_image(
        &self,
        token: Option<&str>,
        id: &str,
        patch: ImagePatch,
    ) -> Result<(), ApiError> {
        self.write_guard("update_image", token)?;
        self.patches.borrow_mut().push(patch.clone());
        let mut images = self.images.borrow_mut();
        let image = images
            .iter_mut()
            .find(|image| image.id == id)
            .ok_or_else(not_found)?;
        if let Some(title) = patch.title {
            image.title = title;
        }
        if let Some(caption) = patch.caption {
            image.caption = caption;
        }
        if patch.tag.is_some() {
            image.tag = patch.tag;
        }
        Ok(())
    }

    async fn delete_image(&self, token: Option<&str>, id: &str) -> Result<(), ApiError> {
        self.write_guard("delete_image", token)?;
        self.images.borrow_mut().retain(|image| image.id != id);
        Ok(())
    }

    async fn delete_album(&self, token: Option<&str>, title: &str) -> Result<(), ApiError> {
        self.write_guard("delete_album", token)?;
        self.images.borrow_mut().retain(|image| image.title != title);
        Ok(())
    }

    async fn list_services(&self) -> Result<Vec<ServiceItem>, ApiError> {
        self.read_guard("list_services")?;
        Ok(self.services.borrow().clone())
    }

    async fn get_service(&self, id: &str) -> Result<ServiceItem, ApiError> {
        self.read_guard("get_service")?;
        self.services
            .borrow()
            .iter()
            .find(|service| service.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_service(
        &self,
        token: Option<&str>,
        service: NewService,
    ) -> Result<(), ApiError> {
        self.write_guard("create_service", token)?;
        let id = self.next_id();
        self.services.borrow_mut().push(ServiceItem {
            id,
            title: service.title,
            description: service.description,
            img_url: String::new(),
        });
        Ok(())
    }

    async fn delete_service(&self, token: Option<&str>, id: &str) -> Result<(), ApiError> {
        self.write_guard("delete_service", token)?;
        self.services.borrow_mut().retain(|service| service.id != id);
        self.subs.borrow_mut().remove(id);
        Ok(())
    }

    async fn list_sub_services(&self, service_id: &str) -> Result<Vec<SubServiceItem>, ApiError> {
        self.read_guard("list_sub_services")?;
        Ok(self
            .subs
            .borrow()
            .get(service_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_sub_service(
        &self,
        token: Option<&str>,
        service_id: &str,
        sub: NewSubService,
    ) -> Result<(), ApiError> {
        self.write_guard("create_sub_service", token)?;
        let id = self.next_id();
        self.subs
            .borrow_mut()
            .entry(service_id.to_string())
            .or_default()
            .push(SubServiceItem {
                id,
                title: sub.title,
                price: sub.price,
                condition: sub.condition,
                addon: sub.addon,
                img_url: String::new(),
            });
        Ok(())
    }

    async fn delete_sub_service(
        &self,
        _token: Option<&str>,
        service_id: &str,
        sub_id: &str,
    ) -> Result<(), ApiError> {
        self.record("delete_sub_service");
        if let Some(err) = self.fail_next_write.borrow_mut().take() {
            return Err(err);
        }
        if let Some(subs) = self.subs.borrow_mut().get_mut(service_id) {
            subs.retain(|sub| sub.id != sub_id);
        }
        Ok(())
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: Some("Not found".into()),
    }
}

fn auth_response(email: &str) -> AuthResponse {
    AuthResponse {
        tokens: AuthTokens {
            access: TokenGrant::bare("access-1"),
            refresh: TokenGrant::bare("refresh-1"),
        },
        user: serde_json::from_value(serde_json::json!({"id": "u1", "email": email}))
            .unwrap_or_default(),
    }
}

pub(crate) fn image(id: &str, title: &str) -> PortfolioImage {
    PortfolioImage {
        id: id.into(),
        title: title.into(),
        caption: format!("caption {id}"),
        tag: None,
        img_url: format!("https://cdn.test/{id}.jpg"),
    }
}

pub(crate) fn service(id: &str, title: &str) -> ServiceItem {
    ServiceItem {
        id: id.into(),
        title: title.into(),
        description: format!("{title} coverage"),
        img_url: String::new(),
    }
}

pub(crate) fn sub_service(id: &str, price: u64) -> SubServiceItem {
    SubServiceItem {
        id: id.into(),
        title: format!("Package {id}"),
        price,
        condition: "2 hours, 1 location".into(),
        addon: "Album".into(),
        img_url: String::new(),
    }
}

pub(crate) fn file() -> studio_api_models::FilePart {
    studio_api_models::FilePart {
        file_name: "photo.jpg".into(),
        content_type: Some("image/jpeg".into()),
        bytes: vec![0xff, 0xd8],
    }
}

/// Store with a signed-in session.
pub(crate) fn signed_in_store() -> Rc<RefCell<AppStore>> {
    Rc::new(RefCell::new(AppStore {
        session: Session {
            access: Some(TokenGrant::bare("access-1")),
            ..Session::default()
        },
        ..AppStore::default()
    }))
}
