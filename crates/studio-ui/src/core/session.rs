//! Persisted session (tokens and user profile).
//!
//! # Design
//! - The session is an explicit object handed to whoever needs it; nothing reads
//!   browser storage implicitly.
//! - Storage is abstracted behind [`SessionBackend`] so persistence is testable
//!   without a browser.
//! - Unreadable stored values load as absent.

use serde::Serialize;
use serde::de::DeserializeOwned;
use studio_api_models::{AuthResponse, TokenGrant, UserProfile};
use thiserror::Error;

/// Local-storage key for the JSON-encoded access grant.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Local-storage key for the JSON-encoded user profile.
pub const USER_DATA_KEY: &str = "userData";
/// Cookie holding the JSON-encoded refresh grant.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Raw key/value persistence used by [`SessionStore`].
pub trait SessionBackend {
    /// Read a local-storage entry.
    fn read_local(&self, key: &str) -> Option<String>;
    /// Write a local-storage entry.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] when the browser refuses the write.
    fn write_local(&self, key: &str, value: &str) -> Result<(), SessionError>;
    /// Remove a local-storage entry.
    fn remove_local(&self, key: &str);
    /// Read a cookie value (already decoded).
    fn read_cookie(&self, name: &str) -> Option<String>;
    /// Write a session cookie.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] when the cookie cannot be set.
    fn write_cookie(&self, name: &str, value: &str) -> Result<(), SessionError>;
    /// Expire a cookie.
    fn remove_cookie(&self, name: &str);
}

/// Session persistence failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The underlying storage rejected a write.
    #[error("failed to persist '{key}': {reason}")]
    Storage {
        /// Storage key or cookie name.
        key: String,
        /// Backend-provided detail.
        reason: String,
    },
    /// A value could not be serialized.
    #[error("failed to encode '{key}': {reason}")]
    Encode {
        /// Storage key or cookie name.
        key: String,
        /// Serializer detail.
        reason: String,
    },
}

/// In-memory view of the persisted session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Access grant; its token is sent as the bearer credential.
    pub access: Option<TokenGrant>,
    /// Refresh grant, kept for completeness; never used to refresh.
    pub refresh: Option<TokenGrant>,
    /// Signed-in user.
    pub user: Option<UserProfile>,
}

impl Session {
    /// Build a session from a successful auth response.
    #[must_use]
    pub fn from_auth(auth: AuthResponse) -> Self {
        Self {
            access: Some(auth.tokens.access),
            refresh: Some(auth.tokens.refresh),
            user: Some(auth.user),
        }
    }

    /// Bearer token, when a non-blank one is stored.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access
            .as_ref()
            .map(|grant| grant.token.as_str())
            .filter(|token| !token.trim().is_empty())
    }

    /// Whether protected routes may be shown.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

/// Session persistence over a [`SessionBackend`].
#[derive(Clone, Debug)]
pub struct SessionStore<B> {
    backend: B,
}

impl<B: SessionBackend> SessionStore<B> {
    /// Wrap a backend.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Read whatever is currently persisted.
    pub fn load(&self) -> Session {
        Session {
            access: decode(ACCESS_TOKEN_KEY, self.backend.read_local(ACCESS_TOKEN_KEY)),
            refresh: decode(
                REFRESH_TOKEN_COOKIE,
                self.backend.read_cookie(REFRESH_TOKEN_COOKIE),
            ),
            user: decode(USER_DATA_KEY, self.backend.read_local(USER_DATA_KEY)),
        }
    }

    /// Persist `session`; absent parts are removed from storage.
    ///
    /// # Errors
    /// Returns the first encode or storage failure.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        match &session.access {
            Some(grant) => self
                .backend
                .write_local(ACCESS_TOKEN_KEY, &encode(ACCESS_TOKEN_KEY, grant)?)?,
            None => self.backend.remove_local(ACCESS_TOKEN_KEY),
        }
        match &session.user {
            Some(user) => self
                .backend
                .write_local(USER_DATA_KEY, &encode(USER_DATA_KEY, user)?)?,
            None => self.backend.remove_local(USER_DATA_KEY),
        }
        match &session.refresh {
            Some(grant) => self.backend.write_cookie(
                REFRESH_TOKEN_COOKIE,
                &encode(REFRESH_TOKEN_COOKIE, grant)?,
            )?,
            None => self.backend.remove_cookie(REFRESH_TOKEN_COOKIE),
        }
        Ok(())
    }

    /// Stored bearer token.
    pub fn access_token(&self) -> Option<String> {
        self.load().access_token().map(ToString::to_string)
    }

    /// Stored refresh token.
    pub fn refresh_token(&self) -> Option<String> {
        self.load().refresh.map(|grant| grant.token)
    }

    /// Persist a fresh sign-in and return the resulting session.
    ///
    /// # Errors
    /// Returns the first encode or storage failure.
    pub fn set_session(
        &self,
        access: TokenGrant,
        refresh: TokenGrant,
        user: UserProfile,
    ) -> Result<Session, SessionError> {
        let session = Session {
            access: Some(access),
            refresh: Some(refresh),
            user: Some(user),
        };
        self.save(&session)?;
        Ok(session)
    }

    /// Forget everything (sign out).
    pub fn clear(&self) {
        self.backend.remove_local(ACCESS_TOKEN_KEY);
        self.backend.remove_local(USER_DATA_KEY);
        self.backend.remove_cookie(REFRESH_TOKEN_COOKIE);
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<String, SessionError> {
    serde_json::to_string(value).map_err(|err| SessionError::Encode {
        key: key.to_string(),
        reason: err.to_string(),
    })
}

fn decode<T: DeserializeOwned>(key: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            report_unreadable(key, &err);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn report_unreadable(key: &str, err: &serde_json::Error) {
    gloo::console::warn!(format!("ignoring unreadable session value '{key}': {err}"));
}

#[cfg(not(target_arch = "wasm32"))]
const fn report_unreadable(_key: &str, _err: &serde_json::Error) {}

/// `document.cookie` assignment for a session cookie.
#[must_use]
pub fn cookie_assignment(name: &str, value: &str) -> String {
    format!(
        "{name}={}; Path=/; Secure; SameSite=Strict",
        urlencoding::encode(value)
    )
}

/// `document.cookie` assignment that expires a cookie.
#[must_use]
pub fn cookie_removal(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0; Secure; SameSite=Strict")
}

/// Find and decode one cookie in a `document.cookie` string.
#[must_use]
pub fn cookie_lookup(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
        .filter(|value| !value.is_empty())
}
