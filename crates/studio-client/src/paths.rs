//! Endpoint path builders.
//!
//! Paths are relative to the configured base URL (which already carries the
//! API version prefix). Identifiers and query values are percent-encoded.

use urlencoding::encode;

/// `POST` target for credential login.
pub const LOGIN: &str = "/auth/login";
/// `POST` target for account registration.
pub const REGISTER: &str = "/auth/register";
/// Image collection.
pub const IMAGES: &str = "/images";
/// Service collection.
pub const SERVICES: &str = "/service";

/// Image collection, optionally filtered to a single album.
#[must_use]
pub fn images(title: Option<&str>) -> String {
    match title {
        Some(title) => format!("{IMAGES}?title={}", encode(title)),
        None => IMAGES.to_string(),
    }
}

/// Single image.
#[must_use]
pub fn image(id: &str) -> String {
    format!("{IMAGES}/{}", encode(id))
}

/// Single service.
#[must_use]
pub fn service(id: &str) -> String {
    format!("{SERVICES}/{}", encode(id))
}

/// Sub-services of a service.
#[must_use]
pub fn sub_services(service_id: &str) -> String {
    format!("{}/subservice", service(service_id))
}

/// Single sub-service of a service.
#[must_use]
pub fn sub_service(service_id: &str, sub_id: &str) -> String {
    format!("{}/{}", sub_services(service_id), encode(sub_id))
}
