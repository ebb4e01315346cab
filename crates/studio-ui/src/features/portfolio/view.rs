//! Portfolio views: album cards, album detail and the add/edit dialogs.
//!
//! # Design
//! - Read everything from the `portfolio` slice; write only through commands.
//! - A detail page leaves for the dashboard once its album is gone.

use crate::app::api::{ApiCtx, missing_api};
use crate::app::routes::{Route, log_redirect};
use crate::components::empty_state::EmptyState;
use crate::components::fields::{FileField, TextField};
use crate::components::modal::Modal;
use crate::components::remove::RemoveButton;
use crate::core::logic::dedup_by_key;
use crate::core::store::{AppStore, DetailOutcome, DetailStatus, app_dispatch};
use crate::features::portfolio::commands::{
    load_album, remove_album, remove_primary, select_image, submit_image_patch, submit_new_image,
};
use crate::features::portfolio::state::{AlbumDetail, ImagePatchForm, NewImageForm};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use studio_api_models::{FilePart, PortfolioImage};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// One card per album, in backend order.
#[function_component(PortfolioSection)]
pub(crate) fn portfolio_section() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let cards = use_selector(|store: &AppStore| {
        dedup_by_key(&store.portfolio.images, |image| image.title.clone())
    });
    let loading = use_selector(|store: &AppStore| store.portfolio.loading);
    let remove_busy = use_selector(|store: &AppStore| store.portfolio.remove_busy);
    let Some(api_ctx) = api_ctx else {
        return missing_api(&bundle);
    };

    let body = if cards.is_empty() && *loading {
        html! { <div class="loading">{t("common.loading")}</div> }
    } else if cards.is_empty() {
        html! { <EmptyState title={t("portfolio.empty")} /> }
    } else {
        html! {
            <div class="card-grid">
                {for cards.iter().map(|image| {
                    let on_edit = {
                        let navigator = navigator.clone();
                        let id = image.id.clone();
                        Callback::from(move |_| {
                            if let Some(navigator) = &navigator {
                                navigator.push(&Route::PortfolioDetail { id: id.clone() });
                            }
                        })
                    };
                    let on_remove = {
                        let api_ctx = api_ctx.clone();
                        let title = image.title.clone();
                        Callback::from(move |()| {
                            let api_ctx = api_ctx.clone();
                            let title = title.clone();
                            yew::platform::spawn_local(async move {
                                remove_album(&*api_ctx.client, &app_dispatch(), &title).await;
                            });
                        })
                    };
                    html! {
                        <article class="card">
                            <img src={image.img_url.clone()} alt={image.title.clone()} loading="lazy" />
                            <div class="card-body">
                                <h3>{image.title.clone()}</h3>
                                <p class="muted">{image.caption.clone()}</p>
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
                <h2>{t("nav.portfolio")}</h2>
            </header>
            {body}
            <footer class="section-foot">
                <AddPortfolioDialog />
            </footer>
        </section>
    }
}

fn add_input(apply: fn(&mut NewImageForm, String)) -> Callback<String> {
    let dispatch = app_dispatch();
    Callback::from(move |value: String| {
        dispatch.reduce_mut(|store| apply(&mut store.portfolio.add_dialog.state.form, value));
    })
}

fn edit_input(apply: fn(&mut ImagePatchForm, String)) -> Callback<String> {
    let dispatch = app_dispatch();
    Callback::from(move |value: String| {
        dispatch.reduce_mut(|store| apply(&mut store.portfolio.edit_dialog.state.form, value));
    })
}

fn file_label(file: Option<&FilePart>) -> Option<AttrValue> {
    file.map(|part| AttrValue::from(part.file_name.clone()))
}

#[function_component(AddPortfolioDialog)]
fn add_portfolio_dialog() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let dialog = use_selector(|store: &AppStore| store.portfolio.add_dialog.clone());
    let Some(api_ctx) = api_ctx else {
        return missing_api(&bundle);
    };

    let dispatch = app_dispatch();
    let on_open = {
        let dispatch = dispatch.clone();
        Callback::from(move |_| dispatch.reduce_mut(|store| store.portfolio.add_dialog.open()))
    };
    let on_close = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| dispatch.reduce_mut(|store| store.portfolio.add_dialog.close()))
    };
    let on_file = Callback::from(move |part: FilePart| {
        dispatch.reduce_mut(|store| store.portfolio.add_dialog.state.form.file = Some(part));
    });
    let on_submit = Callback::from(move |event: SubmitEvent| {
        event.prevent_default();
        let api_ctx = api_ctx.clone();
        yew::platform::spawn_local(async move {
            submit_new_image(&*api_ctx.client, &app_dispatch()).await;
        });
    });

    let state = &dialog.state;
    let busy = state.submitting;
    html! {
        <>
            <button class="btn btn-primary" onclick={on_open}>{t("portfolio.add")}</button>
            <Modal
                open={dialog.open}
                title={t("portfolio.add_title")}
                description={AttrValue::from(t("portfolio.add_body"))}
                {on_close}
            >
                <form class="dialog-form" onsubmit={on_submit}>
                    <TextField
                        label={t("form.title")}
                        value={state.form.title.clone()}
                        error={state.errors.get("title")}
                        disabled={busy}
                        on_input={add_input(|form, value| form.title = value)}
                    />
                    <TextField
                        label={t("form.caption")}
                        value={state.form.caption.clone()}
                        error={state.errors.get("caption")}
                        disabled={busy}
                        multiline={true}
                        on_input={add_input(|form, value| form.caption = value)}
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
pub(crate) struct PortfolioDetailProps {
    pub id: String,
}

/// Album page for one image id.
#[function_component(PortfolioDetailPage)]
pub(crate) fn portfolio_detail_page(props: &PortfolioDetailProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let detail = use_selector(|store: &AppStore| store.portfolio.detail.clone());
    {
        let api_ctx = api_ctx.clone();
        use_effect_with_deps(
            move |id: &String| {
                if let Some(api_ctx) = api_ctx {
                    let id = id.clone();
                    let pending = id.clone();
                    app_dispatch()
                        .reduce_mut(|store| store.portfolio.detail = DetailStatus::Loading(pending));
                    yew::platform::spawn_local(async move {
                        let outcome = load_album(&*api_ctx.client, &app_dispatch(), &id).await;
                        if let DetailOutcome::Redirect(reason) = outcome {
                            log_redirect("portfolio", &id, &reason);
                        }
                    });
                }
                || {
                    app_dispatch().reduce_mut(|store| store.portfolio.detail = DetailStatus::Idle);
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
        DetailStatus::Ready(album) => html! { <AlbumView album={album.clone()} /> },
        _ => html! { <div class="loading">{t("common.loading")}</div> },
    }
}

#[derive(Properties, PartialEq)]
struct AlbumViewProps {
    album: AlbumDetail,
}

#[function_component(AlbumView)]
fn album_view(props: &AlbumViewProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let remove_busy = use_selector(|store: &AppStore| store.portfolio.detail_remove_busy);
    let Some(api_ctx) = api_ctx else {
        return missing_api(&bundle);
    };

    let primary = &props.album.primary;
    let on_remove = Callback::from(move |()| {
        let api_ctx = api_ctx.clone();
        yew::platform::spawn_local(async move {
            remove_primary(&*api_ctx.client, &app_dispatch()).await;
        });
    });

    html! {
        <div class="detail-page">
            <Link<Route> to={Route::Dashboard} classes="btn btn-ghost btn-sm">{t("detail.back")}</Link<Route>>
            <div class="detail-hero">
                <img src={primary.img_url.clone()} alt={primary.title.clone()} />
                <div class="detail-body">
                    <h2>{primary.title.clone()}</h2>
                    <p>{primary.caption.clone()}</p>
                    {primary.visible_tag().map(|tag| html! {
                        <span class="badge">{format!("#{tag}")}</span>
                    }).unwrap_or_default()}
                    <div class="card-actions">
                        <EditPortfolioDialog />
                        <RemoveButton label={t("common.remove")} busy={*remove_busy} {on_remove} />
                    </div>
                </div>
            </div>
            <div class="thumb-grid">
                {for props.album.album.iter().map(|image| thumbnail(image, primary.id == image.id))}
            </div>
        </div>
    }
}

fn thumbnail(image: &PortfolioImage, active: bool) -> Html {
    let onclick = {
        let id = image.id.clone();
        Callback::from(move |_| select_image(&app_dispatch(), &id))
    };
    html! {
        <button class={classes!("thumb", active.then_some("active"))} {onclick}>
            <img src={image.img_url.clone()} alt={image.caption.clone()} loading="lazy" />
        </button>
    }
}

#[function_component(EditPortfolioDialog)]
fn edit_portfolio_dialog() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let api_ctx = use_context::<ApiCtx>();
    let dialog = use_selector(|store: &AppStore| store.portfolio.edit_dialog.clone());
    let Some(api_ctx) = api_ctx else {
        return missing_api(&bundle);
    };

    let dispatch = app_dispatch();
    let on_open = {
        let dispatch = dispatch.clone();
        Callback::from(move |_| dispatch.reduce_mut(|store| store.portfolio.edit_dialog.open()))
    };
    let on_close = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| dispatch.reduce_mut(|store| store.portfolio.edit_dialog.close()))
    };
    let on_file = Callback::from(move |part: FilePart| {
        dispatch.reduce_mut(|store| store.portfolio.edit_dialog.state.form.file = Some(part));
    });
    let on_submit = Callback::from(move |event: SubmitEvent| {
        event.prevent_default();
        let api_ctx = api_ctx.clone();
        yew::platform::spawn_local(async move {
            submit_image_patch(&*api_ctx.client, &app_dispatch()).await;
        });
    });

    let state = &dialog.state;
    let busy = state.submitting;
    html! {
        <>
            <button class="btn btn-ghost btn-sm" onclick={on_open}>{t("common.edit")}</button>
            <Modal
                open={dialog.open}
                title={t("portfolio.edit_title")}
                description={AttrValue::from(t("portfolio.edit_body"))}
                {on_close}
            >
                <form class="dialog-form" onsubmit={on_submit}>
                    <TextField
                        label={t("form.title")}
                        value={state.form.title.clone()}
                        error={state.errors.get("title")}
                        disabled={busy}
                        on_input={edit_input(|form, value| form.title = value)}
                    />
                    <TextField
                        label={t("form.tag")}
                        value={state.form.tag.clone()}
                        disabled={busy}
                        on_input={edit_input(|form, value| form.tag = value)}
                    />
                    <TextField
                        label={t("form.caption")}
                        value={state.form.caption.clone()}
                        disabled={busy}
                        multiline={true}
                        on_input={edit_input(|form, value| form.caption = value)}
                    />
                    <FileField
                        label={t("form.image")}
                        selected={file_label(state.form.file.as_ref())}
                        disabled={busy}
                        {on_file}
                    />
                    <button type="submit" class="btn btn-primary" disabled={busy}>
                        {if busy { t("form.submitting") } else { t("form.update") }}
                    </button>
                </form>
            </Modal>
        </>
    }
}
