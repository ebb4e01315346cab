//! Service catalog commands.
//!
//! # Design
//! - A service detail needs the service and its sub-services; either failing
//!   sends the page back to the dashboard.
//! - A service without sub-services is a valid page with an empty grid.

use studio_client::{ApiError, StudioApi};

use crate::core::forms::SubmitOutcome;
use crate::core::store::{
    DetailOutcome, DetailStatus, RedirectReason, StoreSink, access_token, claim, submit_failed,
    toast_failure,
};
use crate::features::services::state::ServiceDetail;

/// Re-query the service list.
pub async fn refresh_services(api: &impl StudioApi, sink: &impl StoreSink) {
    sink.reduce(|store| store.services.loading = true);
    let result = api.list_services().await;
    sink.reduce(|store| store.services.loading = false);
    match result {
        Ok(items) => sink.reduce(|store| store.services.items = items),
        Err(err) => toast_failure(sink, "toast.error", &err),
    }
}

/// Submit the add-service dialog.
pub async fn submit_new_service(api: &impl StudioApi, sink: &impl StoreSink) -> SubmitOutcome {
    let Some(payload) = sink.reduce(|store| store.services.add_dialog.state.begin_submit()) else {
        return SubmitOutcome::blocked(
            sink.read(|store| store.services.add_dialog.state.submitting),
        );
    };
    let token = access_token(sink);
    let outcome = match api.create_service(token.as_deref(), payload).await {
        Ok(()) => {
            refresh_services(api, sink).await;
            sink.reduce(|store| {
                store
                    .toasts
                    .success("toast.item_added", "toast.service_added");
            });
            SubmitOutcome::Saved
        }
        Err(err) => submit_failed(sink, "toast.error", &err),
    };
    sink.reduce(|store| store.services.add_dialog.settle());
    outcome
}

/// Delete a service from the list.
pub async fn remove_service(api: &impl StudioApi, sink: &impl StoreSink, id: &str) -> bool {
    if !sink.reduce(|store| claim(&mut store.services.remove_busy)) {
        return false;
    }
    let token = access_token(sink);
    let removed = match api.delete_service(token.as_deref(), id).await {
        Ok(()) => {
            refresh_services(api, sink).await;
            true
        }
        Err(err) => {
            toast_failure(sink, "toast.error", &err);
            false
        }
    };
    sink.reduce(|store| store.services.remove_busy = false);
    removed
}

/// Load a service and its sub-services for the detail page.
pub async fn load_service(
    api: &impl StudioApi,
    sink: &impl StoreSink,
    id: &str,
) -> DetailOutcome {
    sink.reduce(|store| store.services.detail = DetailStatus::Loading(id.to_string()));
    let (next, outcome) = match fetch_service(api, id).await {
        Ok(detail) => (DetailStatus::Ready(detail), DetailOutcome::Loaded),
        Err(err) => (
            DetailStatus::Gone,
            DetailOutcome::Redirect(RedirectReason::Failed(err)),
        ),
    };
    if sink.reduce(|store| store.services.detail.resolve(id, next)) {
        outcome
    } else {
        DetailOutcome::Superseded
    }
}

/// Highlight a sub-service card.
pub fn select_sub(sink: &impl StoreSink, id: &str) {
    sink.reduce(|store| {
        if let Some(detail) = store.services.detail.ready_mut() {
            detail.select(id);
        }
    });
}

/// Submit the add-sub-service dialog for the loaded service.
pub async fn submit_new_sub_service(
    api: &impl StudioApi,
    sink: &impl StoreSink,
) -> SubmitOutcome {
    let Some(service_id) = loaded_service_id(sink) else {
        return SubmitOutcome::Invalid;
    };
    let Some(payload) = sink.reduce(|store| store.services.sub_dialog.state.begin_submit()) else {
        return SubmitOutcome::blocked(
            sink.read(|store| store.services.sub_dialog.state.submitting),
        );
    };
    let token = access_token(sink);
    let outcome = match api
        .create_sub_service(token.as_deref(), &service_id, payload)
        .await
    {
        Ok(()) => {
            refresh_subs(api, sink, &service_id).await;
            sink.reduce(|store| {
                store
                    .toasts
                    .success("toast.item_added", "toast.sub_service_added");
            });
            SubmitOutcome::Saved
        }
        Err(err) => submit_failed(sink, "toast.error", &err),
    };
    sink.reduce(|store| store.services.sub_dialog.settle());
    outcome
}

/// Delete one sub-service of the loaded service.
pub async fn remove_sub_service(
    api: &impl StudioApi,
    sink: &impl StoreSink,
    sub_id: &str,
) -> bool {
    let Some(service_id) = loaded_service_id(sink) else {
        return false;
    };
    if !sink.reduce(|store| claim(&mut store.services.sub_remove_busy)) {
        return false;
    }
    let token = access_token(sink);
    let removed = match api
        .delete_sub_service(token.as_deref(), &service_id, sub_id)
        .await
    {
        Ok(()) => {
            refresh_subs(api, sink, &service_id).await;
            true
        }
        Err(err) => {
            toast_failure(sink, "toast.error", &err);
            false
        }
    };
    sink.reduce(|store| store.services.sub_remove_busy = false);
    removed
}

/// Delete the loaded service from its detail page.
///
/// On success the detail becomes [`DetailStatus::Gone`] and the list is
/// re-queried so the dashboard is current when the page leaves.
pub async fn remove_detail_service(api: &impl StudioApi, sink: &impl StoreSink) -> bool {
    let Some(service_id) = loaded_service_id(sink) else {
        return false;
    };
    if !sink.reduce(|store| claim(&mut store.services.detail_remove_busy)) {
        return false;
    }
    let token = access_token(sink);
    let removed = match api.delete_service(token.as_deref(), &service_id).await {
        Ok(()) => {
            sink.reduce(|store| store.services.detail = DetailStatus::Gone);
            refresh_services(api, sink).await;
            true
        }
        Err(err) => {
            toast_failure(sink, "toast.error", &err);
            false
        }
    };
    sink.reduce(|store| store.services.detail_remove_busy = false);
    removed
}

async fn fetch_service(api: &impl StudioApi, id: &str) -> Result<ServiceDetail, ApiError> {
    let service = api.get_service(id).await?;
    let subs = api.list_sub_services(id).await?;
    Ok(ServiceDetail {
        service,
        subs,
        selected: None,
    })
}

async fn refresh_subs(api: &impl StudioApi, sink: &impl StoreSink, service_id: &str) {
    match api.list_sub_services(service_id).await {
        Ok(subs) => sink.reduce(|store| {
            if let Some(detail) = store.services.detail.ready_mut()
                && detail.service.id == service_id
            {
                detail.subs = subs;
                if detail.selected_sub().is_none() {
                    detail.selected = None;
                }
            }
        }),
        Err(err) => toast_failure(sink, "toast.error", &err),
    }
}

fn loaded_service_id(sink: &impl StoreSink) -> Option<String> {
    sink.read(|store| {
        store
            .services
            .detail
            .ready()
            .map(|detail| detail.service.id.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::ToastText;
    use crate::test_support::{FakeApi, file, service, signed_in_store, sub_service};

    fn catalog() -> FakeApi {
        let api = FakeApi::default();
        *api.services.borrow_mut() = vec![
            service("s1", "Wedding"),
            service("s2", "Prewedding"),
        ];
        api.subs.borrow_mut().insert(
            "s1".into(),
            vec![sub_service("a", 1_500_000), sub_service("b", 900_000)],
        );
        api
    }

    fn fill_sub_form(sink: &impl StoreSink, price: &str) {
        sink.reduce(|store| {
            let dialog = &mut store.services.sub_dialog;
            dialog.open();
            dialog.state.form.title = "Gold".into();
            dialog.state.form.condition = "2 hours, 1 location".into();
            dialog.state.form.addon = "Album, Frame".into();
            dialog.state.form.price = price.into();
            dialog.state.form.file = Some(file());
        });
    }

    #[tokio::test]
    async fn create_service_requeries_and_toasts() {
        let api = FakeApi::default();
        let sink = signed_in_store();
        sink.reduce(|store| {
            let dialog = &mut store.services.add_dialog;
            dialog.open();
            dialog.state.form.title = "Family".into();
            dialog.state.form.description = "Portraits at home".into();
            dialog.state.form.file = Some(file());
        });

        assert_eq!(submit_new_service(&api, &sink).await, SubmitOutcome::Saved);
        assert_eq!(api.calls_to("list_services"), 1);
        sink.read(|store| {
            assert_eq!(store.services.items.len(), 1);
            assert!(!store.services.add_dialog.open);
            assert_eq!(
                store.toasts.items()[0].body,
                ToastText::Key("toast.service_added")
            );
        });
    }

    #[tokio::test]
    async fn remove_service_requeries_only_on_success() {
        let api = catalog();
        let sink = signed_in_store();
        refresh_services(&api, &sink).await;

        assert!(remove_service(&api, &sink, "s2").await);
        assert_eq!(sink.read(|store| store.services.items.len()), 1);
        assert_eq!(api.calls_to("list_services"), 2);

        api.fail_next_write(ApiError::Status {
            status: 403,
            message: Some("Forbidden".into()),
        });
        assert!(!remove_service(&api, &sink, "s1").await);
        assert_eq!(api.calls_to("list_services"), 2);
        assert!(!sink.read(|store| store.services.remove_busy));
    }

    #[tokio::test]
    async fn detail_loads_subs_and_selects_one() {
        let api = catalog();
        let sink = signed_in_store();

        assert_eq!(load_service(&api, &sink, "s1").await, DetailOutcome::Loaded);
        select_sub(&sink, "b");
        sink.read(|store| {
            let detail = store.services.detail.ready().expect("loaded");
            assert_eq!(detail.subs.len(), 2);
            assert_eq!(detail.selected_sub().map(|sub| sub.price), Some(900_000));
        });
    }

    #[tokio::test]
    async fn service_without_subs_still_renders() {
        let api = catalog();
        let sink = signed_in_store();
        assert_eq!(load_service(&api, &sink, "s2").await, DetailOutcome::Loaded);
        sink.read(|store| {
            let detail = store.services.detail.ready().expect("loaded");
            assert!(detail.subs.is_empty());
        });
    }

    #[tokio::test]
    async fn unreachable_service_redirects() {
        let api = catalog();
        *api.fail_reads.borrow_mut() = Some(ApiError::Transport("offline".into()));
        let sink = signed_in_store();
        assert!(matches!(
            load_service(&api, &sink, "s1").await,
            DetailOutcome::Redirect(RedirectReason::Failed(ApiError::Transport(_)))
        ));
        assert_eq!(
            sink.read(|store| store.services.detail.clone()),
            DetailStatus::Gone
        );
    }

    #[tokio::test]
    async fn failure_after_leaving_the_page_is_ignored() {
        let api = catalog();
        *api.fail_reads.borrow_mut() = Some(ApiError::Transport("offline".into()));
        let sink = signed_in_store();
        let left = sink.clone();
        *api.during_next_read.borrow_mut() = Some(Box::new(move || {
            left.reduce(|store| store.services.detail = DetailStatus::Idle);
        }));

        assert_eq!(
            load_service(&api, &sink, "s1").await,
            DetailOutcome::Superseded
        );
        assert_eq!(
            sink.read(|store| store.services.detail.clone()),
            DetailStatus::Idle
        );
    }

    #[tokio::test]
    async fn invalid_price_never_reaches_backend() {
        let api = catalog();
        let sink = signed_in_store();
        load_service(&api, &sink, "s1").await;
        fill_sub_form(&sink, "lots");

        assert_eq!(
            submit_new_sub_service(&api, &sink).await,
            SubmitOutcome::Invalid
        );
        assert_eq!(api.calls_to("create_sub_service"), 0);
        assert_eq!(
            sink.read(|store| store.services.sub_dialog.state.errors.get("price")),
            Some("validation.price_invalid")
        );
    }

    #[tokio::test]
    async fn new_sub_service_refreshes_the_grid() {
        let api = catalog();
        let sink = signed_in_store();
        load_service(&api, &sink, "s1").await;
        fill_sub_form(&sink, "2500000");

        assert_eq!(
            submit_new_sub_service(&api, &sink).await,
            SubmitOutcome::Saved
        );
        sink.read(|store| {
            let detail = store.services.detail.ready().expect("loaded");
            assert_eq!(detail.subs.len(), 3);
            assert_eq!(detail.subs[2].price, 2_500_000);
            assert!(!store.services.sub_dialog.open);
        });
    }

    #[tokio::test]
    async fn bare_sub_service_is_created_as_free_package() {
        let api = catalog();
        let sink = signed_in_store();
        load_service(&api, &sink, "s1").await;
        sink.reduce(|store| {
            let dialog = &mut store.services.sub_dialog;
            dialog.open();
            dialog.state.form.title = "Basic".into();
            dialog.state.form.file = Some(file());
        });

        assert_eq!(
            submit_new_sub_service(&api, &sink).await,
            SubmitOutcome::Saved
        );
        assert_eq!(api.calls_to("create_sub_service"), 1);
        sink.read(|store| {
            let detail = store.services.detail.ready().expect("loaded");
            let created = &detail.subs[2];
            assert_eq!(created.title, "Basic");
            assert_eq!(created.price, 0);
            assert!(created.condition.is_empty() && created.addon.is_empty());
        });
    }

    #[tokio::test]
    async fn removing_selected_sub_clears_selection() {
        let api = catalog();
        let sink = signed_in_store();
        load_service(&api, &sink, "s1").await;
        select_sub(&sink, "a");

        assert!(remove_sub_service(&api, &sink, "a").await);
        sink.read(|store| {
            let detail = store.services.detail.ready().expect("loaded");
            assert_eq!(detail.subs.len(), 1);
            assert_eq!(detail.selected, None);
            assert!(!store.services.sub_remove_busy);
        });
    }

    #[tokio::test]
    async fn removing_the_service_from_detail_marks_it_gone() {
        let api = catalog();
        let sink = signed_in_store();
        load_service(&api, &sink, "s1").await;

        assert!(remove_detail_service(&api, &sink).await);
        sink.read(|store| {
            assert_eq!(store.services.detail, DetailStatus::Gone);
            assert!(!store.services.detail_remove_busy);
            assert!(store.services.items.iter().all(|item| item.id != "s1"));
        });
    }
}
