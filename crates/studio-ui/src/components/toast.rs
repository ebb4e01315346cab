//! Toast host fed by the store's toast queue.
//!
//! # Design
//! - Toasts carry translation keys; text is resolved at render time.
//! - Each toast dismisses itself four seconds after it appears; later
//!   arrivals do not restart earlier countdowns.

use crate::core::store::{AppStore, Toast, ToastKind, ToastText, app_dispatch};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::timers::callback::Timeout;
use yew::prelude::*;
use yewdux::prelude::use_selector;

const DISMISS_AFTER_MS: u32 = 4000;

#[function_component(ToastHost)]
pub(crate) fn toast_host() -> Html {
    let toasts = use_selector(|store: &AppStore| store.toasts.items().to_vec());
    let on_dismiss = {
        let dispatch = app_dispatch();
        Callback::from(move |id: u64| dispatch.reduce_mut(|store| store.toasts.dismiss(id)))
    };

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for toasts.iter().map(|toast| html! {
                <ToastCard key={toast.id} toast={toast.clone()} on_dismiss={on_dismiss.clone()} />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastCardProps {
    toast: Toast,
    on_dismiss: Callback<u64>,
}

/// One toast with its own countdown, started when it first appears.
#[function_component(ToastCard)]
fn toast_card(props: &ToastCardProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |id: &u64| {
                let id = *id;
                let timer = Timeout::new(DISMISS_AFTER_MS, move || on_dismiss.emit(id));
                move || drop(timer)
            },
            props.toast.id,
        );
    }

    let toast = &props.toast;
    let class = match toast.kind {
        ToastKind::Success => "success",
        ToastKind::Error => "error",
    };
    let body = match &toast.body {
        ToastText::Key(key) => bundle.text(key, ""),
        ToastText::Raw(text) => text.clone(),
    };
    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        let id = toast.id;
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div class={classes!("toast", class)} role="status">
            <div>
                <strong>{bundle.text(toast.title, "")}</strong>
                <p>{body}</p>
            </div>
            <button class="ghost" aria-label={bundle.text("toast.dismiss", "")} onclick={on_close}>{"✕"}</button>
        </div>
    }
}
