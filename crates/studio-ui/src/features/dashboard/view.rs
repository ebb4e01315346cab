use crate::app::LocaleCtx;
use crate::app::api::{ApiCtx, missing_api};
use crate::app::routes::Route;
use crate::components::shell::DashboardShell;
use crate::core::store::{AppStore, Section, app_dispatch};
use crate::features::auth::commands::sign_out;
use crate::features::dashboard::commands::{refresh_section, select_section};
use crate::features::portfolio::view::PortfolioSection;
use crate::features::services::view::ServiceSection;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(DashboardPage)]
pub(crate) fn dashboard_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let locale_ctx = use_context::<LocaleCtx>();
    let navigator = use_navigator();
    let section = use_selector(|store: &AppStore| store.section);
    let user_name = use_selector(|store: &AppStore| {
        store
            .session
            .user
            .as_ref()
            .map(|user| user.display_name().to_string())
    });
    {
        let api_ctx = api_ctx.clone();
        let section = *section;
        use_effect_with_deps(
            move |()| {
                if let Some(api_ctx) = api_ctx {
                    yew::platform::spawn_local(async move {
                        refresh_section(&*api_ctx.client, &app_dispatch(), section).await;
                    });
                }
                || ()
            },
            (),
        );
    }
    let Some(api_ctx) = api_ctx else {
        return missing_api(&bundle);
    };

    let on_select = {
        let api_ctx = api_ctx.clone();
        Callback::from(move |next: Section| {
            let api_ctx = api_ctx.clone();
            yew::platform::spawn_local(async move {
                select_section(&*api_ctx.client, &app_dispatch(), next).await;
            });
        })
    };
    let on_sign_out = Callback::from(move |()| {
        sign_out(&app_dispatch(), &*api_ctx.session);
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Login);
        }
    });
    let (locale, on_locale) = locale_ctx.map_or_else(
        || (bundle.locale, Callback::noop()),
        |ctx| (ctx.current, ctx.set),
    );

    html! {
        <DashboardShell
            section={*section}
            {on_select}
            {on_sign_out}
            user_name={(*user_name).clone().map(AttrValue::from)}
            {locale}
            {on_locale}
        >
            {match *section {
                Section::Portfolio => html! { <PortfolioSection /> },
                Section::Service => html! { <ServiceSection /> },
            }}
        </DashboardShell>
    }
}
