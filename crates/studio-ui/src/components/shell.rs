//! Dashboard frame: sidebar navigation around the active section.

use crate::core::store::Section;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub section: Section,
    pub on_select: Callback<Section>,
    pub on_sign_out: Callback<()>,
    /// Display name of the signed-in user.
    #[prop_or_default]
    pub user_name: Option<AttrValue>,
    pub locale: LocaleCode,
    pub on_locale: Callback<LocaleCode>,
    pub children: Children,
}

#[function_component(DashboardShell)]
pub(crate) fn dashboard_shell(props: &ShellProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let nav_open = use_state(|| false);
    let toggle_nav = {
        let nav_open = nav_open.clone();
        Callback::from(move |_| nav_open.set(!*nav_open))
    };

    let on_locale = {
        let on_locale = props.on_locale.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>()
                && let Some(next) = LocaleCode::from_lang_tag(&select.value())
            {
                on_locale.emit(next);
            }
        })
    };
    let on_sign_out = {
        let on_sign_out = props.on_sign_out.clone();
        Callback::from(move |_| on_sign_out.emit(()))
    };

    html! {
        <div class="app-shell">
            <aside class={classes!("sidebar", if *nav_open { "open" } else { "closed" })}>
                <div class="brand">
                    <button class="ghost mobile-only" onclick={toggle_nav.clone()} aria-label={t("nav.close")}>{"✕"}</button>
                    <strong>{t("nav.brand")}</strong>
                </div>
                <nav>
                    {nav_item(Section::Portfolio, t("nav.portfolio"), props)}
                    {nav_item(Section::Service, t("nav.service"), props)}
                </nav>
                <div class="sidebar-footer">
                    <select aria-label={t("nav.language")} onchange={on_locale}>
                        {for LocaleCode::all().iter().map(|code| html! {
                            <option value={code.code()} selected={*code == props.locale}>{code.label()}</option>
                        })}
                    </select>
                    {props.user_name.clone().map(|name| html! {
                        <span class="user-name">{name}</span>
                    }).unwrap_or_default()}
                    <button class="btn btn-ghost btn-sm" onclick={on_sign_out}>{t("nav.sign_out")}</button>
                </div>
            </aside>
            <main class="main">
                <header class="topbar">
                    <button class="ghost mobile-only" onclick={toggle_nav} aria-label={t("nav.open")}>{"☰"}</button>
                    <h1>{t("nav.dashboard")}</h1>
                </header>
                <section class="content">{for props.children.iter()}</section>
            </main>
        </div>
    }
}

fn nav_item(section: Section, label: String, props: &ShellProps) -> Html {
    let active = props.section == section;
    let onclick = {
        let on_select = props.on_select.clone();
        Callback::from(move |_| on_select.emit(section))
    };
    html! {
        <button class={classes!("nav-item", active.then_some("active"))} aria-current={active.then_some("page")} {onclick}>
            {label}
        </button>
    }
}
