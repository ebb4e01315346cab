//! Routing definitions and the signed-in guard.

use crate::core::store::{AppStore, RedirectReason};
use gloo::console;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/signup")]
    SignUp,
    #[at("/dashboard")]
    Dashboard,
    #[at("/dashboard/portfolio/:id")]
    PortfolioDetail { id: String },
    #[at("/dashboard/service/:id")]
    ServiceDetail { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Properties, PartialEq)]
pub(crate) struct RequireSessionProps {
    pub children: Children,
}

/// Render children only while an access token is stored.
#[function_component(RequireSession)]
pub(crate) fn require_session(props: &RequireSessionProps) -> Html {
    let signed_in = use_selector(|store: &AppStore| store.session.is_authenticated());
    if *signed_in {
        html! { <>{for props.children.iter()}</> }
    } else {
        html! { <Redirect<Route> to={Route::Login} /> }
    }
}

/// Record why a detail page sent the user back to the dashboard.
pub(crate) fn log_redirect(page: &'static str, id: &str, reason: &RedirectReason) {
    let detail = match reason {
        RedirectReason::Failed(err) => err.to_string(),
        RedirectReason::Empty => "no related items".to_string(),
    };
    console::warn!("leaving detail page", page, id, detail);
}
