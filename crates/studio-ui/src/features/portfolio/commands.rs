//! Portfolio commands: backend calls and the store updates around them.
//!
//! # Design
//! - Successful mutations are the only trigger for a re-query.
//! - Dialogs settle and busy flags clear whatever the outcome.
//! - Detail loads that fail or find an empty album mark the page as gone.

use studio_client::StudioApi;

use crate::core::forms::SubmitOutcome;
use crate::core::store::{
    DetailOutcome, DetailStatus, RedirectReason, StoreSink, access_token, claim, submit_failed,
    toast_failure,
};
use crate::features::portfolio::state::AlbumDetail;

/// Re-query the image list.
pub async fn refresh_images(api: &impl StudioApi, sink: &impl StoreSink) {
    sink.reduce(|store| store.portfolio.loading = true);
    let result = api.list_images(None).await;
    sink.reduce(|store| store.portfolio.loading = false);
    match result {
        Ok(images) => sink.reduce(|store| store.portfolio.images = images),
        Err(err) => toast_failure(sink, "toast.error", &err),
    }
}

/// Submit the add dialog.
pub async fn submit_new_image(api: &impl StudioApi, sink: &impl StoreSink) -> SubmitOutcome {
    let Some(payload) = sink.reduce(|store| store.portfolio.add_dialog.state.begin_submit()) else {
        return SubmitOutcome::blocked(
            sink.read(|store| store.portfolio.add_dialog.state.submitting),
        );
    };
    let token = access_token(sink);
    let outcome = match api.create_image(token.as_deref(), payload).await {
        Ok(()) => {
            refresh_images(api, sink).await;
            sink.reduce(|store| {
                store
                    .toasts
                    .success("toast.item_added", "toast.portfolio_added");
            });
            SubmitOutcome::Saved
        }
        Err(err) => submit_failed(sink, "toast.error", &err),
    };
    sink.reduce(|store| store.portfolio.add_dialog.settle());
    outcome
}

/// Remove every image of an album (list card action).
pub async fn remove_album(api: &impl StudioApi, sink: &impl StoreSink, title: &str) -> bool {
    if !sink.reduce(|store| claim(&mut store.portfolio.remove_busy)) {
        return false;
    }
    let token = access_token(sink);
    let removed = match api.delete_album(token.as_deref(), title).await {
        Ok(()) => {
            refresh_images(api, sink).await;
            true
        }
        Err(err) => {
            toast_failure(sink, "toast.error", &err);
            false
        }
    };
    sink.reduce(|store| store.portfolio.remove_busy = false);
    removed
}

/// Load an image and its album for the detail page.
pub async fn load_album(
    api: &impl StudioApi,
    sink: &impl StoreSink,
    id: &str,
) -> DetailOutcome {
    sink.reduce(|store| store.portfolio.detail = DetailStatus::Loading(id.to_string()));
    let (next, outcome) = match fetch_album(api, id).await {
        Ok(detail) => (DetailStatus::Ready(detail), DetailOutcome::Loaded),
        Err(reason) => (DetailStatus::Gone, DetailOutcome::Redirect(reason)),
    };
    if sink.reduce(|store| store.portfolio.detail.resolve(id, next)) {
        outcome
    } else {
        DetailOutcome::Superseded
    }
}

/// Show another image of the loaded album.
pub fn select_image(sink: &impl StoreSink, id: &str) {
    sink.reduce(|store| {
        if let Some(detail) = store.portfolio.detail.ready_mut() {
            detail.select(id);
        }
    });
}

/// Submit the edit dialog against the primary image.
pub async fn submit_image_patch(api: &impl StudioApi, sink: &impl StoreSink) -> SubmitOutcome {
    let Some(id) = sink.read(|store| {
        store
            .portfolio
            .detail
            .ready()
            .map(|detail| detail.primary.id.clone())
    }) else {
        return SubmitOutcome::Invalid;
    };
    let Some(patch) = sink.reduce(|store| store.portfolio.edit_dialog.state.begin_submit()) else {
        return SubmitOutcome::blocked(
            sink.read(|store| store.portfolio.edit_dialog.state.submitting),
        );
    };
    let token = access_token(sink);
    let outcome = match api.update_image(token.as_deref(), &id, patch).await {
        Ok(()) => {
            apply_album(sink, fetch_album(api, &id).await);
            sink.reduce(|store| {
                store
                    .toasts
                    .success("toast.item_updated", "toast.portfolio_updated");
            });
            SubmitOutcome::Saved
        }
        Err(err) => submit_failed(sink, "toast.error", &err),
    };
    sink.reduce(|store| store.portfolio.edit_dialog.settle());
    outcome
}

/// Delete the primary image from the detail page.
pub async fn remove_primary(api: &impl StudioApi, sink: &impl StoreSink) -> bool {
    let Some((id, title)) = sink.read(|store| {
        store
            .portfolio
            .detail
            .ready()
            .map(|detail| (detail.primary.id.clone(), detail.primary.title.clone()))
    }) else {
        return false;
    };
    if !sink.reduce(|store| claim(&mut store.portfolio.detail_remove_busy)) {
        return false;
    }
    let token = access_token(sink);
    let removed = match api.delete_image(token.as_deref(), &id).await {
        Ok(()) => {
            let remaining = api.list_images(Some(&title)).await;
            let next = remaining.map_err(RedirectReason::Failed).and_then(|album| {
                album
                    .first()
                    .cloned()
                    .map(|primary| AlbumDetail { primary, album })
                    .ok_or(RedirectReason::Empty)
            });
            apply_album(sink, next);
            true
        }
        Err(err) => {
            toast_failure(sink, "toast.error", &err);
            false
        }
    };
    sink.reduce(|store| store.portfolio.detail_remove_busy = false);
    removed
}

async fn fetch_album(api: &impl StudioApi, id: &str) -> Result<AlbumDetail, RedirectReason> {
    let primary = api.get_image(id).await.map_err(RedirectReason::Failed)?;
    let album = api
        .list_images(Some(&primary.title))
        .await
        .map_err(RedirectReason::Failed)?;
    if album.is_empty() {
        return Err(RedirectReason::Empty);
    }
    Ok(AlbumDetail { primary, album })
}

fn apply_album(
    sink: &impl StoreSink,
    result: Result<AlbumDetail, RedirectReason>,
) -> DetailOutcome {
    match result {
        Ok(detail) => {
            sink.reduce(|store| store.portfolio.detail = DetailStatus::Ready(detail));
            DetailOutcome::Loaded
        }
        Err(reason) => {
            sink.reduce(|store| store.portfolio.detail = DetailStatus::Gone);
            DetailOutcome::Redirect(reason)
        }
    }
}
