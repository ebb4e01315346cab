//! Sidebar section switching.

use studio_client::StudioApi;

use crate::core::store::{Section, StoreSink};
use crate::features::portfolio::commands::refresh_images;
use crate::features::services::commands::refresh_services;

/// Show a dashboard section and re-query its list.
pub async fn select_section(api: &impl StudioApi, sink: &impl StoreSink, section: Section) {
    sink.reduce(|store| store.section = section);
    refresh_section(api, sink, section).await;
}

/// Re-query the list behind `section`.
pub async fn refresh_section(api: &impl StudioApi, sink: &impl StoreSink, section: Section) {
    match section {
        Section::Portfolio => refresh_images(api, sink).await,
        Section::Service => refresh_services(api, sink).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeApi, image, service, signed_in_store};

    #[tokio::test]
    async fn switching_sections_fetches_the_matching_list() {
        let api = FakeApi::with_images(vec![image("1", "Beach")]);
        *api.services.borrow_mut() = vec![service("s1", "Wedding")];
        let sink = signed_in_store();

        select_section(&api, &sink, Section::Service).await;
        assert_eq!(api.calls_to("list_services"), 1);
        assert_eq!(api.calls_to("list_images"), 0);
        sink.read(|store| {
            assert_eq!(store.section, Section::Service);
            assert_eq!(store.services.items.len(), 1);
        });

        select_section(&api, &sink, Section::Portfolio).await;
        assert_eq!(api.calls_to("list_images"), 1);
        assert_eq!(sink.read(|store| store.portfolio.images.len()), 1);
    }

    #[tokio::test]
    async fn failed_list_keeps_previous_rows() {
        let api = FakeApi::with_images(vec![image("1", "Beach")]);
        let sink = signed_in_store();
        refresh_section(&api, &sink, Section::Portfolio).await;

        *api.fail_reads.borrow_mut() =
            Some(studio_client::ApiError::Transport("offline".into()));
        refresh_section(&api, &sink, Section::Portfolio).await;
        sink.read(|store| {
            assert_eq!(store.portfolio.images.len(), 1);
            assert!(!store.portfolio.loading);
            assert_eq!(store.toasts.items().len(), 1);
        });
    }
}
