//! Login and sign-up pages.

use crate::app::api::{ApiCtx, missing_api};
use crate::app::routes::Route;
use crate::components::fields::TextField;
use crate::core::store::{AppStore, app_dispatch};
use crate::features::auth::commands::{submit_login, submit_signup};
use crate::features::auth::state::{LoginForm, SignUpForm};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

fn login_input(apply: fn(&mut LoginForm, String)) -> Callback<String> {
    let dispatch = app_dispatch();
    Callback::from(move |value: String| {
        dispatch.reduce_mut(|store| apply(&mut store.auth.login.form, value));
    })
}

fn signup_input(apply: fn(&mut SignUpForm, String)) -> Callback<String> {
    let dispatch = app_dispatch();
    Callback::from(move |value: String| {
        dispatch.reduce_mut(|store| apply(&mut store.auth.signup.form, value));
    })
}

/// Email and password sign-in; signed-in visitors go straight to the dashboard.
#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let signed_in = use_selector(|store: &AppStore| store.session.is_authenticated());
    let form = use_selector(|store: &AppStore| store.auth.login.clone());
    if *signed_in {
        return html! { <Redirect<Route> to={Route::Dashboard} /> };
    }
    let Some(api_ctx) = api_ctx else {
        return missing_api(&bundle);
    };

    let on_submit = Callback::from(move |event: SubmitEvent| {
        event.prevent_default();
        let api_ctx = api_ctx.clone();
        yew::platform::spawn_local(async move {
            submit_login(&*api_ctx.client, &app_dispatch(), &*api_ctx.session).await;
        });
    });
    let busy = form.submitting;

    html! {
        <main class="auth-page">
            <form class="auth-card" onsubmit={on_submit}>
                <h1>{t("auth.login_title")}</h1>
                <p class="muted">{t("auth.login_body")}</p>
                <TextField
                    label={t("form.email")}
                    value={form.form.email.clone()}
                    error={form.errors.get("email")}
                    disabled={busy}
                    input_type="email"
                    on_input={login_input(|form, value| form.email = value)}
                />
                <TextField
                    label={t("form.password")}
                    value={form.form.password.clone()}
                    error={form.errors.get("password")}
                    disabled={busy}
                    input_type="password"
                    on_input={login_input(|form, value| form.password = value)}
                />
                <button type="submit" class="btn btn-primary" disabled={busy}>
                    {if busy { t("form.submitting") } else { t("auth.login") }}
                </button>
                <p class="auth-switch">
                    {t("auth.no_account")}
                    {" "}
                    <Link<Route> to={Route::SignUp}>{t("auth.signup")}</Link<Route>>
                </p>
            </form>
        </main>
    }
}

#[function_component(SignUpPage)]
pub(crate) fn signup_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let signed_in = use_selector(|store: &AppStore| store.session.is_authenticated());
    let form = use_selector(|store: &AppStore| store.auth.signup.clone());
    if *signed_in {
        return html! { <Redirect<Route> to={Route::Dashboard} /> };
    }
    let Some(api_ctx) = api_ctx else {
        return missing_api(&bundle);
    };

    let on_submit = Callback::from(move |event: SubmitEvent| {
        event.prevent_default();
        let api_ctx = api_ctx.clone();
        yew::platform::spawn_local(async move {
            submit_signup(&*api_ctx.client, &app_dispatch(), &*api_ctx.session).await;
        });
    });
    let busy = form.submitting;

    html! {
        <main class="auth-page">
            <form class="auth-card" onsubmit={on_submit}>
                <h1>{t("auth.signup_title")}</h1>
                <p class="muted">{t("auth.signup_body")}</p>
                <TextField
                    label={t("form.email")}
                    value={form.form.email.clone()}
                    error={form.errors.get("email")}
                    disabled={busy}
                    input_type="email"
                    on_input={signup_input(|form, value| form.email = value)}
                />
                <TextField
                    label={t("form.username")}
                    value={form.form.username.clone()}
                    error={form.errors.get("username")}
                    disabled={busy}
                    on_input={signup_input(|form, value| form.username = value)}
                />
                <TextField
                    label={t("form.password")}
                    value={form.form.password.clone()}
                    error={form.errors.get("password")}
                    disabled={busy}
                    input_type="password"
                    on_input={signup_input(|form, value| form.password = value)}
                />
                <button type="submit" class="btn btn-primary" disabled={busy}>
                    {if busy { t("form.submitting") } else { t("auth.signup") }}
                </button>
                <p class="auth-switch">
                    {t("auth.have_account")}
                    {" "}
                    <Link<Route> to={Route::Login}>{t("auth.login")}</Link<Route>>
                </p>
            </form>
        </main>
    }
}
