//! Service catalog views: service cards, service detail with its
//! sub-service grid, and the two add dialogs.

use crate::app::api::{ApiCtx, missing_api};
use crate::app::routes::{Route, log_redirect};
use crate::components::empty_state::EmptyState;
use crate::components::fields::{FileField, TextField};
use crate::components::modal::Modal;
use crate::components::remove::RemoveButton;
use crate::core::logic::{dedup_by_key, format_price, initial, split_list};
use crate::core::store::{AppStore, DetailOutcome, DetailStatus, app_dispatch};
use crate::features::services::commands::{
    load_service, remove_detail_service, remove_service, remove_sub_service, select_sub,
    submit_new_service, submit_new_sub_service,
};
use crate::features::services::state::{NewServiceForm, NewSubServiceForm, ServiceDetail};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use studio_api_models::{FilePart, SubServiceItem};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(ServiceSection)]
pub(crate) fn service_section() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let cards = use_selector(|store: &AppStore| {
        dedup_by_key(&store.services.items, |service| service.title.clone())
    });
    let loading = use_selector(|store: &AppStore| store.services.loading);
    let remove_busy = use_selector(|store: &AppStore| store.services.remove_busy);
    let Some(api_ctx) = api_ctx else {
        return missing_api(&bundle);
    };

    let body = if cards.is_empty() && *loading {
        html! { <div class="loading">{t("common.loading")}</div> }
    } else if cards.is_empty() {
        html! { <EmptyState title={t("service.empty")} /> }
    } else {
        html! {
            <div class="card-grid">
                {for cards.iter().map(|service| {
                    let on_edit = {
                        let navigator = navigator.clone();
                        let id = service.id.clone();
                        Callback::from(move |_| {
                            if let Some(navigator) = &navigator {
                                navigator.push(&Route::ServiceDetail { id: id.clone() });
                            }
                        })
                    };
                    let on_remove = {
                        let api_ctx = api_ctx.clone();
                        let id = service.id.clone();
                        Callback::from(move |()| {
                            let api_ctx = api_ctx.clone();
                            let id = id.clone();
                            yew::platform::spawn_local(async move {
                                remove_service(&*api_ctx.client, &app_dispatch(), &id).await;
                            });
                        })
                    };
                    html! {
                        <article class="card">
                            {if service.img_url.is_empty() {
                                html! {}
                            } else {
                                html! { <img src={service.img_url.clone()} alt={service.title.clone()} loading="lazy" /> }
                            }}
                            <div class="card-body">
                                <h3>{service.title.clone()}</h3>
                                <p class="muted">{service.description.clone()}</p>
                                <div class="card-actions">
                                    <button class="btn btn-ghost btn-sm" onclick={on_edit}>{t("common.edit")}</button>
                                    <RemoveButton label={t("common.remove")} busy={*remove_busy} {on_remove} />
                                </div>
                            </div>
                        </article>
                    }
                })}
            </div>
        }
    };

    html! {
        <section class="section">
            <header class="section-head">
                <h2>{t("nav.service")}</h2>
            </header>
            {body}
            <footer class="section-foot">
                <AddServiceDialog />
            </footer>
        </section>
    }
}

fn service_input(apply: fn(&mut NewServiceForm, String)) -> Callback<String> {
    let dispatch = app_dispatch();
    Callback::from(move |value: String| {
        dispatch.reduce_mut(|store| apply(&mut store.services.add_dialog.state.form, value));
    })
}

fn sub_input(apply: fn(&mut NewSubServiceForm, String)) -> Callback<String> {
    let dispatch = app_dispatch();
    Callback::from(move |value: String| {
        dispatch.reduce_mut(|store| apply(&mut store.services.sub_dialog.state.form, value));
    })
}

fn file_label(file: Option<&FilePart>) -> Option<AttrValue> {
    file.map(|part| AttrValue::from(part.file_name.clone()))
}

#[function_component(AddServiceDialog)]
fn add_service_dialog() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let dialog = use_selector(|store: &AppStore| store.services.add_dialog.clone());
    let Some(api_ctx) = api_ctx else {
        return missing_api(&bundle);
    };

    let dispatch = app_dispatch();
    let on_open = {
        let dispatch = dispatch.clone();
        Callback::from(move |_| dispatch.reduce_mut(|store| store.services.add_dialog.open()))
    };
    let on_close = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| dispatch.reduce_mut(|store| store.services.add_dialog.close()))
    };
    let on_file = Callback::from(move |part: FilePart| {
        dispatch.reduce_mut(|store| store.services.add_dialog.state.form.file = Some(part));
    });
    let on_submit = Callback::from(move |event: SubmitEvent| {
        event.prevent_default();
        let api_ctx = api_ctx.clone();
        yew::platform::spawn_local(async move {
            submit_new_service(&*api_ctx.client, &app_dispatch()).await;
        });
    });

    let state = &dialog.state;
    let busy = state.submitting;
    html! {
        <>
            <button class="btn btn-primary" onclick={on_open}>{t("service.add")}</button>
            <Modal
                open={dialog.open}
                title={t("service.add_title")}
                description={AttrValue::from(t("service.add_body"))}
                {on_close}
            >
                <form class="dialog-form" onsubmit={on_submit}>
                    <TextField
                        label={t("form.title")}
                        value={state.form.title.clone()}
                        error={state.errors.get("title")}
                        disabled={busy}
                        on_input={service_input(|form, value| form.title = value)}
                    />
                    <TextField
                        label={t("form.description")}
                        value={state.form.description.clone()}
                        error={state.errors.get("description")}
                        disabled={busy}
                        multiline={true}
                        on_input={service_input(|form, value| form.description = value)}
                    />
                    <FileField
                        label={t("form.image")}
                        selected={file_label(state.form.file.as_ref())}
                        error={state.errors.get("file")}
                        disabled={busy}
                        {on_file}
                    />
                    <button type="submit" class="btn btn-primary" disabled={busy}>
                        {if busy { t("form.submitting") } else { t("form.add") }}
                    </button>
                </form>
            </Modal>
        </>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ServiceDetailProps {
    pub id: String,
}

/// Service page with its priced packages.
#[function_component(ServiceDetailPage)]
pub(crate) fn service_detail_page(props: &ServiceDetailProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let detail = use_selector(|store: &AppStore| store.services.detail.clone());
    {
        let api_ctx = api_ctx.clone();
        use_effect_with_deps(
            move |id: &String| {
                if let Some(api_ctx) = api_ctx {
                    let id = id.clone();
                    let pending = id.clone();
                    app_dispatch()
                        .reduce_mut(|store| store.services.detail = DetailStatus::Loading(pending));
                    yew::platform::spawn_local(async move {
                        let outcome = load_service(&*api_ctx.client, &app_dispatch(), &id).await;
                        if let DetailOutcome::Redirect(reason) = outcome {
                            log_redirect("service", &id, &reason);
                        }
                    });
                }
                || {
                    app_dispatch().reduce_mut(|store| store.services.detail = DetailStatus::Idle);
                }
            },
            props.id.clone(),
        );
    }
    if api_ctx.is_none() {
        return missing_api(&bundle);
    }

    match &*detail {
        DetailStatus::Gone => html! { <Redirect<Route> to={Route::Dashboard} /> },
        DetailStatus::Ready(detail) => html! { <ServiceView detail={detail.clone()} /> },
        _ => html! { <div class="loading">{t("common.loading")}</div> },
    }
}

#[derive(Properties, PartialEq)]
struct ServiceViewProps {
    detail: ServiceDetail,
}

#[function_component(ServiceView)]
fn service_view(props: &ServiceViewProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let remove_busy = use_selector(|store: &AppStore| store.services.detail_remove_busy);
    let sub_remove_busy = use_selector(|store: &AppStore| store.services.sub_remove_busy);
    let Some(api_ctx) = api_ctx else {
        return missing_api(&bundle);
    };

    let service = &props.detail.service;
    let on_remove = {
        let api_ctx = api_ctx.clone();
        Callback::from(move |()| {
            let api_ctx = api_ctx.clone();
            yew::platform::spawn_local(async move {
                remove_detail_service(&*api_ctx.client, &app_dispatch()).await;
            });
        })
    };
    let on_remove_sub = Callback::from(move |sub_id: String| {
        let api_ctx = api_ctx.clone();
        yew::platform::spawn_local(async move {
            remove_sub_service(&*api_ctx.client, &app_dispatch(), &sub_id).await;
        });
    });

    let grid = if props.detail.subs.is_empty() {
        html! { <EmptyState title={t("service.no_subs")} /> }
    } else {
        html! {
            <div class="card-grid">
                {for props.detail.subs.iter().map(|sub| html! {
                    <SubServiceCard
                        sub={sub.clone()}
                        selected={props.detail.selected.as_deref() == Some(sub.id.as_str())}
                        busy={*sub_remove_busy}
                        on_remove={on_remove_sub.clone()}
                    />
                })}
            </div>
        }
    };

    html! {
        <div class="detail-page">
            <Link<Route> to={Route::Dashboard} classes="btn btn-ghost btn-sm">{t("detail.back")}</Link<Route>>
            <div class="detail-hero">
                {if service.img_url.is_empty() {
                    html! {}
                } else {
                    html! { <img src={service.img_url.clone()} alt={service.title.clone()} /> }
                }}
                <div class="detail-body">
                    <h2>{service.title.clone()}</h2>
                    <p>{service.description.clone()}</p>
                    <div class="card-actions">
                        <RemoveButton label={t("common.remove")} busy={*remove_busy} {on_remove} />
                    </div>
                </div>
            </div>
            {grid}
            <footer class="section-foot">
                <AddSubServiceDialog />
            </footer>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SubServiceCardProps {
    sub: SubServiceItem,
    selected: bool,
    busy: bool,
    on_remove: Callback<String>,
}

#[function_component(SubServiceCard)]
fn sub_service_card(props: &SubServiceCardProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let sub = &props.sub;
    let onclick = {
        let id = sub.id.clone();
        Callback::from(move |_| select_sub(&app_dispatch(), &id))
    };
    let on_remove = {
        let on_remove = props.on_remove.clone();
        let id = sub.id.clone();
        Callback::from(move |()| on_remove.emit(id.clone()))
    };

    html! {
        <article class={classes!("card", props.selected.then_some("selected"))} {onclick}>
            <div class="card-head">
                <div class="avatar placeholder">
                    {if sub.img_url.is_empty() {
                        html! { <span>{initial(&sub.title)}</span> }
                    } else {
                        html! { <img src={sub.img_url.clone()} alt={sub.title.clone()} /> }
                    }}
                </div>
                <h3>{sub.title.clone()}</h3>
            </div>
            <div class="card-body">
                <p class="price">{format_price(sub.price, bundle.locale)}</p>
                {entry_list(&t("service.condition"), &sub.condition)}
                {entry_list(&t("service.addon"), &sub.addon)}
                <div class="card-actions">
                    <RemoveButton label={t("common.remove")} busy={props.busy} {on_remove} />
                </div>
            </div>
        </article>
    }
}

fn entry_list(heading: &str, raw: &str) -> Html {
    let entries = split_list(raw);
    if entries.is_empty() {
        return html! {};
    }
    html! {
        <>
            <h4>{heading.to_string()}</h4>
            <ul>{for entries.into_iter().map(|entry| html! { <li>{entry}</li> })}</ul>
        </>
    }
}

#[function_component(AddSubServiceDialog)]
fn add_sub_service_dialog() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let dialog = use_selector(|store: &AppStore| store.services.sub_dialog.clone());
    let Some(api_ctx) = api_ctx else {
        return missing_api(&bundle);
    };

    let dispatch = app_dispatch();
    let on_open = {
        let dispatch = dispatch.clone();
        Callback::from(move |_| dispatch.reduce_mut(|store| store.services.sub_dialog.open()))
    };
    let on_close = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| dispatch.reduce_mut(|store| store.services.sub_dialog.close()))
    };
    let on_file = Callback::from(move |part: FilePart| {
        dispatch.reduce_mut(|store| store.services.sub_dialog.state.form.file = Some(part));
    });
    let on_submit = Callback::from(move |event: SubmitEvent| {
        event.prevent_default();
        let api_ctx = api_ctx.clone();
        yew::platform::spawn_local(async move {
            submit_new_sub_service(&*api_ctx.client, &app_dispatch()).await;
        });
    });

    let state = &dialog.state;
    let busy = state.submitting;
    html! {
        <>
            <button class="btn btn-primary" onclick={on_open}>{t("service.add_sub")}</button>
            <Modal
                open={dialog.open}
                title={t("service.add_sub_title")}
                description={AttrValue::from(t("service.add_sub_body"))}
                {on_close}
            >
                <form class="dialog-form" onsubmit={on_submit}>
                    <TextField
                        label={t("form.title")}
                        value={state.form.title.clone()}
                        error={state.errors.get("title")}
                        disabled={busy}
                        on_input={sub_input(|form, value| form.title = value)}
                    />
                    <TextField
                        label={t("form.condition")}
                        value={state.form.condition.clone()}
                        error={state.errors.get("condition")}
                        disabled={busy}
                        placeholder={AttrValue::from(t("form.list_hint"))}
                        on_input={sub_input(|form, value| form.condition = value)}
                    />
                    <TextField
                        label={t("form.addon")}
                        value={state.form.addon.clone()}
                        error={state.errors.get("addon")}
                        disabled={busy}
                        placeholder={AttrValue::from(t("form.list_hint"))}
                        on_input={sub_input(|form, value| form.addon = value)}
                    />
                    <TextField
                        label={t("form.price")}
                        value={state.form.price.clone()}
                        error={state.errors.get("price")}
                        disabled={busy}
                        input_type="number"
                        on_input={sub_input(|form, value| form.price = value)}
                    />
                    <FileField
                        label={t("form.image")}
                        selected={file_label(state.form.file.as_ref())}
                        error={state.errors.get("file")}
                        disabled={busy}
                        {on_file}
                    />
                    <button type="submit" class="btn btn-primary" disabled={busy}>
                        {if busy { t("form.submitting") } else { t("form.add") }}
                    </button>
                </form>
            </Modal>
        </>
    }
}
