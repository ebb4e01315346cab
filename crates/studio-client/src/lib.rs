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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

//! REST client for the studio backend.
//!
//! Layout:
//! - `api.rs`: the [`StudioApi`] trait, one async method per backend operation
//! - `client.rs`: the `reqwest` implementation used by the web UI
//! - `error.rs`: error taxonomy and user-facing message resolution
//! - `multipart.rs`: multipart field assembly for uploads
//! - `paths.rs`: endpoint path builders

mod api;
mod client;
mod error;
pub mod multipart;
pub mod paths;

pub use api::StudioApi;
pub use client::{DEFAULT_BASE_URL, StudioClient, normalize_base_url};
pub use error::{ApiError, GENERIC_ERROR_MESSAGE};
pub use studio_api_models as models;
