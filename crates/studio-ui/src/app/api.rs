//! Backend client and session context shared by every view.
//!
//! # Design
//! - Create exactly one client and one session store per app boot.
//! - Views hand both to commands; nothing else touches the network.

use crate::app::preferences::BrowserSession;
use crate::core::session::SessionStore;
use crate::i18n::TranslationBundle;
use std::rc::Rc;
use studio_client::{ApiError, StudioClient};
use yew::prelude::*;

/// Shared client and session persistence.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton backend client.
    pub client: Rc<StudioClient>,
    /// Browser-backed session persistence.
    pub session: Rc<SessionStore<BrowserSession>>,
}

impl ApiCtx {
    /// Build the context for `base_url`.
    pub(crate) fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: Rc::new(StudioClient::new(base_url)?),
            session: Rc::new(SessionStore::new(BrowserSession)),
        })
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}

/// Panel shown when the context could not be built.
pub(crate) fn missing_api(bundle: &TranslationBundle) -> Html {
    html! {
        <div class="panel">
            <p class="text-sm text-error">{bundle.text("error.missing_api", "")}</p>
        </div>
    }
}
