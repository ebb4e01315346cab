#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
//! Shared HTTP DTOs for the studio backend API.
//!
//! These types are used by the REST client for response decoding and by the
//! web UI for rendering, so the wire contract lives in exactly one place.
//! Multipart request payloads are plain structs here; the client decides how
//! they become form parts.
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Portfolio image as returned by `/images` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioImage {
    /// Backend identifier.
    pub id: String,
    /// Album title; images sharing a title form one album.
    pub title: String,
    /// Caption shown under the image.
    #[serde(default)]
    pub caption: String,
    /// Optional hashtag-style tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Public URL of the stored image.
    #[serde(default)]
    pub img_url: String,
}

impl PortfolioImage {
    /// Tag value when it carries visible text.
    #[must_use]
    pub fn visible_tag(&self) -> Option<&str> {
        self.tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}

/// Top-level studio service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    /// Backend identifier.
    pub id: String,
    /// Service title. Older backend revisions send this as `name`.
    #[serde(alias = "name")]
    pub title: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Public URL of the cover image.
    #[serde(default)]
    pub img_url: String,
}

/// Priced line item owned by a [`ServiceItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubServiceItem {
    /// Backend identifier.
    pub id: String,
    /// Package title.
    pub title: String,
    /// Price in whole currency units.
    #[serde(default)]
    pub price: u64,
    /// Comma-separated list of conditions.
    #[serde(default)]
    pub condition: String,
    /// Comma-separated list of add-ons.
    #[serde(default)]
    pub addon: String,
    /// Public URL of the package image.
    #[serde(default)]
    pub img_url: String,
}

/// Collection response. The backend wraps lists in `{results: [...]}`, but
/// the sub-service endpoint answers with a bare array.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// `{ "results": [...] }` envelope.
    Envelope {
        /// Items in backend order.
        results: Vec<T>,
    },
    /// Bare JSON array.
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Unwrap the items, preserving backend order.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Envelope { results } | Self::Bare(results) => results,
        }
    }
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable failure message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Credentials posted to `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Account details posted to `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,
    /// Display username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Issued token with its expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenGrant {
    /// Opaque token value.
    pub token: String,
    /// Expiry exactly as the backend reported it. Never consulted by the
    /// client, so its format is not checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<Value>,
}

impl TokenGrant {
    /// Grant without expiry metadata.
    #[must_use]
    pub fn bare(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires: None,
        }
    }
}

/// Access/refresh pair issued on login or registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthTokens {
    /// Short-lived access grant used as the bearer credential.
    pub access: TokenGrant,
    /// Refresh grant, stored but never exchanged by this client.
    pub refresh: TokenGrant,
}

/// Signed-in account profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Backend identifier.
    #[serde(default)]
    pub id: String,
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Display username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Account role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Any additional fields, kept so re-persisting is lossless.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Name to greet the user with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Response body of the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Issued tokens.
    pub tokens: AuthTokens,
    /// Account the tokens belong to.
    pub user: UserProfile,
}

/// File selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Original file name.
    pub file_name: String,
    /// MIME type reported by the browser, if any.
    pub content_type: Option<String>,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Multipart payload for `POST /images`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    /// Album title.
    pub title: String,
    /// Caption text.
    pub caption: String,
    /// Image file.
    pub file: FilePart,
}

/// Multipart payload for `PATCH /images/{id}`; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement tag.
    pub tag: Option<String>,
    /// Replacement caption.
    pub caption: Option<String>,
    /// Replacement image file.
    pub file: Option<FilePart>,
}

impl ImagePatch {
    /// Whether the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.tag.is_none() && self.caption.is_none() && self.file.is_none()
    }
}

/// Multipart payload for `POST /service`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewService {
    /// Service title.
    pub title: String,
    /// Service description.
    pub description: String,
    /// Cover image file.
    pub file: FilePart,
}

/// Multipart payload for `POST /service/{id}/subservice`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubService {
    /// Package title.
    pub title: String,
    /// Comma-separated conditions.
    pub condition: String,
    /// Comma-separated add-ons.
    pub addon: String,
    /// Price in whole currency units.
    pub price: u64,
    /// Package image file.
    pub file: FilePart,
}
