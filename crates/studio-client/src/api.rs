//! Backend operations as a trait seam.
//!
//! The UI commands are written against [`StudioApi`] so they can run against
//! an in-memory fake in native tests.

use async_trait::async_trait;
use studio_api_models::{
    AuthResponse, ImagePatch, LoginRequest, NewImage, NewService, NewSubService, PortfolioImage,
    RegisterRequest, ServiceItem, SubServiceItem,
};

use crate::error::ApiError;

/// Every call the dashboard makes against the backend.
///
/// Protected calls take the current access token; `None` (or a blank token)
/// fails with [`ApiError::Unauthenticated`] before any request is sent.
#[async_trait(?Send)]
pub trait StudioApi {
    /// Exchange credentials for tokens and the user profile.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// Create an account.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    /// List portfolio images, optionally only those of one album.
    async fn list_images(&self, title: Option<&str>) -> Result<Vec<PortfolioImage>, ApiError>;

    /// Fetch one image.
    async fn get_image(&self, id: &str) -> Result<PortfolioImage, ApiError>;

    /// Upload a new image.
    async fn create_image(&self, token: Option<&str>, image: NewImage) -> Result<(), ApiError>;

    /// Partially update an image.
    async fn update_image(
        &self,
        token: Option<&str>,
        id: &str,
        patch: ImagePatch,
    ) -> Result<(), ApiError>;

    /// Delete one image.
    async fn delete_image(&self, token: Option<&str>, id: &str) -> Result<(), ApiError>;

    /// Delete every image sharing `title`.
    async fn delete_album(&self, token: Option<&str>, title: &str) -> Result<(), ApiError>;

    /// List services.
    async fn list_services(&self) -> Result<Vec<ServiceItem>, ApiError>;

    /// Fetch one service.
    async fn get_service(&self, id: &str) -> Result<ServiceItem, ApiError>;

    /// Upload a new service.
    async fn create_service(
        &self,
        token: Option<&str>,
        service: NewService,
    ) -> Result<(), ApiError>;

    /// Delete a service.
    async fn delete_service(&self, token: Option<&str>, id: &str) -> Result<(), ApiError>;

    /// List the sub-services of a service.
    async fn list_sub_services(&self, service_id: &str) -> Result<Vec<SubServiceItem>, ApiError>;

    /// Upload a new sub-service under a service.
    async fn create_sub_service(
        &self,
        token: Option<&str>,
        service_id: &str,
        sub: NewSubService,
    ) -> Result<(), ApiError>;

    /// Delete a sub-service. The token is attached when present but not required.
    async fn delete_sub_service(
        &self,
        token: Option<&str>,
        service_id: &str,
        sub_id: &str,
    ) -> Result<(), ApiError>;
}
