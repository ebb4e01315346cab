//! App shell: contexts, router and toast host.
//!
//! # Design
//! - Build the client and session store once per boot.
//! - Load the persisted session into the store before the first render so the
//!   route guard sees it.
//! - Keep locale in component state and persist every change.

pub(crate) mod api;
mod preferences;
pub(crate) mod routes;

use crate::app::api::{ApiCtx, missing_api};
use crate::app::preferences::{BrowserSession, load_config, load_locale, persist_locale};
use crate::app::routes::{RequireSession, Route};
use crate::components::empty_state::EmptyState;
use crate::components::toast::ToastHost;
use crate::core::session::SessionStore;
use crate::core::store::app_dispatch;
use crate::features::auth::view::{LoginPage, SignUpPage};
use crate::features::dashboard::DashboardPage;
use crate::features::portfolio::view::PortfolioDetailPage;
use crate::features::services::view::ServiceDetailPage;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use gloo::console;
use yew::prelude::*;
use yew_router::prelude::*;

/// Active locale and its setter, shared with the dashboard shell.
#[derive(Clone, PartialEq)]
pub(crate) struct LocaleCtx {
    pub current: LocaleCode,
    pub set: Callback<LocaleCode>,
}

#[function_component(StudioApp)]
fn studio_app() -> Html {
    let locale = use_state(load_locale);
    let api_ctx = use_memo(|_| build_api(), ());
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };
    let locale_ctx = LocaleCtx {
        current: *locale,
        set: {
            let locale = locale.clone();
            Callback::from(move |next: LocaleCode| {
                persist_locale(next);
                locale.set(next);
            })
        },
    };

    let Some(api_ctx) = (*api_ctx).clone() else {
        return missing_api(&bundle);
    };

    html! {
        <ContextProvider<ApiCtx> context={api_ctx}>
            <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                <ContextProvider<LocaleCtx> context={locale_ctx}>
                    <BrowserRouter>
                        <Switch<Route> render={switch} />
                    </BrowserRouter>
                    <ToastHost />
                </ContextProvider<LocaleCtx>>
            </ContextProvider<TranslationBundle>>
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Login} /> },
        Route::Login => html! { <LoginPage /> },
        Route::SignUp => html! { <SignUpPage /> },
        Route::Dashboard => html! { <RequireSession><DashboardPage /></RequireSession> },
        Route::PortfolioDetail { id } => html! {
            <RequireSession><PortfolioDetailPage {id} /></RequireSession>
        },
        Route::ServiceDetail { id } => html! {
            <RequireSession><ServiceDetailPage {id} /></RequireSession>
        },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component(NotFound)]
fn not_found() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    html! {
        <EmptyState
            title={bundle.text("not_found.title", "")}
            description={AttrValue::from(bundle.text("not_found.body", ""))}
        >
            <Link<Route> to={Route::Dashboard} classes="btn btn-ghost btn-sm">
                {bundle.text("detail.back", "")}
            </Link<Route>>
        </EmptyState>
    }
}

fn build_api() -> Option<ApiCtx> {
    let config = load_config();
    match ApiCtx::new(&config.api_base_url) {
        Ok(ctx) => Some(ctx),
        Err(err) => {
            console::error!("api client setup failed", err.to_string());
            None
        }
    }
}

/// Entrypoint for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    let session = SessionStore::new(BrowserSession).load();
    app_dispatch().reduce_mut(|store| store.session = session);
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<StudioApp>::with_root(root).render();
    } else {
        yew::Renderer::<StudioApp>::new().render();
    }
}
