//! Browser persistence for the app shell: session storage, locale and the
//! API base URL override.

use crate::core::config::{API_BASE_URL_KEY, BUILD_TIME_BASE_URL, UiConfig};
use crate::core::session::{
    SessionBackend, SessionError, cookie_assignment, cookie_lookup, cookie_removal,
};
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::{document, window};
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

pub(crate) const LOCALE_KEY: &str = "studio.locale";

/// Session backend over `localStorage` and `document.cookie`.
///
/// Values are stored raw; the session layer already JSON-encodes them.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserSession;

impl SessionBackend for BrowserSession {
    fn read_local(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn write_local(&self, key: &str, value: &str) -> Result<(), SessionError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| SessionError::Storage {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }

    fn remove_local(&self, key: &str) {
        if let Err(err) = LocalStorage::raw().remove_item(key) {
            log_storage_error("remove", key, &format!("{err:?}"));
        }
    }

    fn read_cookie(&self, name: &str) -> Option<String> {
        let cookies = html_document()?.cookie().ok()?;
        cookie_lookup(&cookies, name)
    }

    fn write_cookie(&self, name: &str, value: &str) -> Result<(), SessionError> {
        let storage_error = |reason: String| SessionError::Storage {
            key: name.to_string(),
            reason,
        };
        html_document()
            .ok_or_else(|| storage_error("document is not an HTML document".to_string()))?
            .set_cookie(&cookie_assignment(name, value))
            .map_err(|err| storage_error(format!("{err:?}")))
    }

    fn remove_cookie(&self, name: &str) {
        let removed = html_document().map(|doc| doc.set_cookie(&cookie_removal(name)));
        if let Some(Err(err)) = removed {
            log_storage_error("remove cookie", name, &format!("{err:?}"));
        }
    }
}

fn html_document() -> Option<HtmlDocument> {
    document().dyn_into::<HtmlDocument>().ok()
}

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY)
        && let Some(locale) = LocaleCode::from_lang_tag(&value)
    {
        return locale;
    }
    if let Some(nav) = window().navigator().language()
        && let Some(locale) = LocaleCode::from_lang_tag(&nav)
    {
        return locale;
    }
    DEFAULT_LOCALE
}

pub(crate) fn persist_locale(locale: LocaleCode) {
    set_storage(LOCALE_KEY, locale.code());
}

/// Resolve the API base URL, logging skipped candidates.
pub(crate) fn load_config() -> UiConfig {
    let stored = LocalStorage::raw().get_item(API_BASE_URL_KEY).ok().flatten();
    let config = UiConfig::resolve(stored.as_deref(), BUILD_TIME_BASE_URL);
    for reason in &config.rejected {
        console::warn!("ignoring API base URL", reason.as_str());
    }
    config
}

fn set_storage<T: Serialize>(key: &'static str, value: T) {
    if let Err(err) = LocalStorage::set(key, value) {
        log_storage_error("set", key, &err.to_string());
    }
}

fn log_storage_error(operation: &'static str, key: &str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
