//! Runtime configuration for the UI.
//!
//! The API base URL is taken from, in order: the local-storage override, the
//! `STUDIO_API_BASE_URL` value baked in at build time, then the production
//! default. Unusable candidates are skipped and reported.

use studio_client::{DEFAULT_BASE_URL, normalize_base_url};

/// Local-storage key for a runtime base URL override.
pub const API_BASE_URL_KEY: &str = "studio.api_base_url";

/// Base URL captured from the build environment, if any.
pub const BUILD_TIME_BASE_URL: Option<&str> = option_env!("STUDIO_API_BASE_URL");

/// Where the active base URL came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// Local-storage override.
    Stored,
    /// Build-time environment.
    BuildTime,
    /// Compiled-in default.
    Default,
}

/// Resolved UI configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Normalized API base URL including the version prefix.
    pub api_base_url: String,
    /// Which candidate won.
    pub source: ConfigSource,
    /// Candidates that were present but unusable, with the reason.
    pub rejected: Vec<String>,
}

impl UiConfig {
    /// Pick the first usable base URL.
    #[must_use]
    pub fn resolve(stored: Option<&str>, build_time: Option<&str>) -> Self {
        let mut rejected = Vec::new();
        let candidates = [
            (ConfigSource::Stored, stored),
            (ConfigSource::BuildTime, build_time),
        ];
        for (source, candidate) in candidates {
            let Some(raw) = candidate.filter(|raw| !raw.trim().is_empty()) else {
                continue;
            };
            match normalize_base_url(raw) {
                Ok(api_base_url) => {
                    return Self {
                        api_base_url,
                        source,
                        rejected,
                    };
                }
                Err(err) => rejected.push(err.to_string()),
            }
        }
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            source: ConfigSource::Default,
            rejected,
        }
    }
}
