//! `reqwest` implementation of [`StudioApi`].
//!
//! # Design
//! - One shared `reqwest::Client`; works natively and on wasm32 (fetch).
//! - Non-success responses are classified from the body's `message` field.
//! - Success bodies are read as bytes and decoded separately so a bad payload
//!   surfaces as [`ApiError::Decode`] rather than a transport failure.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use studio_api_models::{
    AuthResponse, ErrorBody, ImagePatch, ListResponse, LoginRequest, NewImage, NewService,
    NewSubService, PortfolioImage, RegisterRequest, ServiceItem, SubServiceItem,
};
use url::Url;

use crate::api::StudioApi;
use crate::error::ApiError;
use crate::multipart::{self, FormField};
use crate::paths;

/// Production backend, including the API version prefix.
pub const DEFAULT_BASE_URL: &str = "https://studio-foto-backend.vercel.app/v1";

/// Validate a base URL and strip trailing slashes.
///
/// # Errors
/// Returns [`ApiError::InvalidBaseUrl`] for unparseable input or a scheme other
/// than `http`/`https`.
pub fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// HTTP client for the studio backend.
#[derive(Clone, Debug)]
pub struct StudioClient {
    http: Client,
    base_url: String,
}

impl StudioClient {
    /// Build a client rooted at `base_url`.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidBaseUrl`] when the URL is unusable.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_http_client(Client::new(), base_url)
    }

    /// Build a client around an existing `reqwest::Client`.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidBaseUrl`] when the URL is unusable.
    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder, label: &str) -> Result<Response, ApiError> {
        tracing::debug!(request = label, "sending studio api request");
        let response = request.send().await.map_err(|err| {
            tracing::warn!(request = label, error = %err, "studio api request failed");
            ApiError::Transport(err.to_string())
        })?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(classify_failure(response, label).await)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.http.get(self.url(path)), path).await?;
        decode(response).await
    }

    async fn upload(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
        fields: Vec<FormField>,
        label: &str,
    ) -> Result<(), ApiError> {
        let header = bearer(token).ok_or(ApiError::Unauthenticated)?;
        let form = multipart::into_form(fields)?;
        self.send(request.header(AUTHORIZATION, header).multipart(form), label)
            .await
            .map(drop)
    }

    async fn delete(&self, token: Option<&str>, path: &str) -> Result<(), ApiError> {
        let header = bearer(token).ok_or(ApiError::Unauthenticated)?;
        self.send(
            self.http.delete(self.url(path)).header(AUTHORIZATION, header),
            path,
        )
        .await
        .map(drop)
    }
}

fn bearer(token: Option<&str>) -> Option<String> {
    token
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| format!("Bearer {token}"))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

async fn classify_failure(response: Response, label: &str) -> ApiError {
    let status = response.status().as_u16();
    let bytes = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<ErrorBody>(&bytes)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty());
    tracing::warn!(
        request = label,
        status,
        message = message.as_deref().unwrap_or_default(),
        "studio api rejected request"
    );
    ApiError::Status { status, message }
}

#[async_trait(?Send)]
impl StudioApi for StudioClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response = self
            .send(
                self.http.post(self.url(paths::LOGIN)).json(request),
                paths::LOGIN,
            )
            .await?;
        decode(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let response = self
            .send(
                self.http.post(self.url(paths::REGISTER)).json(request),
                paths::REGISTER,
            )
            .await?;
        decode(response).await
    }

    async fn list_images(&self, title: Option<&str>) -> Result<Vec<PortfolioImage>, ApiError> {
        self.get_json::<ListResponse<PortfolioImage>>(&paths::images(title))
            .await
            .map(ListResponse::into_items)
    }

    async fn get_image(&self, id: &str) -> Result<PortfolioImage, ApiError> {
        self.get_json(&paths::image(id)).await
    }

    async fn create_image(&self, token: Option<&str>, image: NewImage) -> Result<(), ApiError> {
        self.upload(
            self.http.post(self.url(paths::IMAGES)),
            token,
            multipart::new_image_fields(image),
            paths::IMAGES,
        )
        .await
    }

    async fn update_image(
        &self,
        token: Option<&str>,
        id: &str,
        patch: ImagePatch,
    ) -> Result<(), ApiError> {
        let path = paths::image(id);
        self.upload(
            self.http.patch(self.url(&path)),
            token,
            multipart::image_patch_fields(patch),
            &path,
        )
        .await
    }

    async fn delete_image(&self, token: Option<&str>, id: &str) -> Result<(), ApiError> {
        self.delete(token, &paths::image(id)).await
    }

    async fn delete_album(&self, token: Option<&str>, title: &str) -> Result<(), ApiError> {
        self.delete(token, &paths::images(Some(title))).await
    }

    async fn list_services(&self) -> Result<Vec<ServiceItem>, ApiError> {
        self.get_json::<ListResponse<ServiceItem>>(paths::SERVICES)
            .await
            .map(ListResponse::into_items)
    }

    async fn get_service(&self, id: &str) -> Result<ServiceItem, ApiError> {
        self.get_json(&paths::service(id)).await
    }

    async fn create_service(
        &self,
        token: Option<&str>,
        service: NewService,
    ) -> Result<(), ApiError> {
        self.upload(
            self.http.post(self.url(paths::SERVICES)),
            token,
            multipart::new_service_fields(service),
            paths::SERVICES,
        )
        .await
    }

    async fn delete_service(&self, token: Option<&str>, id: &str) -> Result<(), ApiError> {
        self.delete(token, &paths::service(id)).await
    }

    async fn list_sub_services(&self, service_id: &str) -> Result<Vec<SubServiceItem>, ApiError> {
        self.get_json::<ListResponse<SubServiceItem>>(&paths::sub_services(service_id))
            .await
            .map(ListResponse::into_items)
    }

    async fn create_sub_service(
        &self,
        token: Option<&str>,
        service_id: &str,
        sub: NewSubService,
    ) -> Result<(), ApiError> {
        let path = paths::sub_services(service_id);
        self.upload(
            self.http.post(self.url(&path)),
            token,
            multipart::new_sub_service_fields(sub),
            &path,
        )
        .await
    }

    async fn delete_sub_service(
        &self,
        token: Option<&str>,
        service_id: &str,
        sub_id: &str,
    ) -> Result<(), ApiError> {
        let path = paths::sub_service(service_id, sub_id);
        let mut request = self.http.delete(self.url(&path));
        if let Some(header) = bearer(token) {
            request = request.header(AUTHORIZATION, header);
        }
        self.send(request, &path).await.map(drop)
    }
}
