//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Use small, focused slices so reducers stay predictable.
//! - Commands write through [`StoreSink`] so they run against a plain
//!   `RefCell` in tests and against the yewdux dispatch in the browser.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::forms::SubmitOutcome;
use crate::core::session::Session;
use crate::features::auth::state::AuthState;
use crate::features::portfolio::state::PortfolioState;
use crate::features::services::state::ServicesState;
use studio_client::ApiError;
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Signed-in session mirror.
    pub session: Session,
    /// Active dashboard section.
    pub section: Section,
    /// Portfolio list, detail and dialogs.
    pub portfolio: PortfolioState,
    /// Services list, detail and dialogs.
    pub services: ServicesState,
    /// Login and sign-up forms.
    pub auth: AuthState,
    /// Pending notifications.
    pub toasts: ToastQueue,
}

/// Dashboard section selected in the sidebar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Section {
    /// Portfolio albums.
    #[default]
    Portfolio,
    /// Service catalog.
    Service,
}

/// Loading status of a detail page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DetailStatus<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Fetch in flight for the given id.
    Loading(String),
    /// Entity and related items are available.
    Ready(T),
    /// Entity is missing or unreachable; the page should leave.
    Gone,
}

impl<T> DetailStatus<T> {
    /// Loaded data, if any.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Mutable loaded data, if any.
    pub const fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Settle the pending load for `id`.
    ///
    /// Returns `false` and leaves the slot alone when it no longer waits for
    /// `id`: the page moved to another entity or unmounted meanwhile.
    pub fn resolve(&mut self, id: &str, next: Self) -> bool {
        if matches!(self, Self::Loading(pending) if pending == id) {
            *self = next;
            true
        } else {
            false
        }
    }
}

/// Why a detail page gave up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectReason {
    /// The entity or its related items could not be fetched.
    Failed(ApiError),
    /// The related collection came back empty.
    Empty,
}

/// Result of loading a detail page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailOutcome {
    /// Data is in the store.
    Loaded,
    /// The page should navigate back to the dashboard.
    Redirect(RedirectReason),
    /// A newer request owns the page; the result was dropped.
    Superseded,
}

/// Toast severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Confirmation.
    Success,
    /// Destructive failure.
    Error,
}

/// Toast body: a translation key or text taken verbatim from the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastText {
    /// Translation key.
    Key(&'static str),
    /// Literal text.
    Raw(String),
}

/// Single toast notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Identifier used for dismissal.
    pub id: u64,
    /// Severity.
    pub kind: ToastKind,
    /// Title translation key.
    pub title: &'static str,
    /// Description.
    pub body: ToastText,
}

/// Maximum number of toasts kept on screen.
pub const MAX_TOASTS: usize = 4;

/// Bounded, ordered toast queue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    /// Append a toast, dropping the oldest past [`MAX_TOASTS`].
    pub fn push(&mut self, kind: ToastKind, title: &'static str, body: ToastText) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            kind,
            title,
            body,
        });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    /// Success toast with translated title and description.
    pub fn success(&mut self, title: &'static str, body: &'static str) -> u64 {
        self.push(ToastKind::Success, title, ToastText::Key(body))
    }

    /// Destructive toast with a resolved error message.
    pub fn error(&mut self, title: &'static str, message: String) -> u64 {
        self.push(ToastKind::Error, title, ToastText::Raw(message))
    }

    /// Remove a toast by id.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    /// Toasts in display order.
    #[must_use]
    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Anything that can read and mutate the [`AppStore`].
pub trait StoreSink {
    /// Read the current state.
    fn read<R>(&self, f: impl FnOnce(&AppStore) -> R) -> R;
    /// Apply a reducer and notify subscribers.
    fn reduce<R>(&self, f: impl FnOnce(&mut AppStore) -> R) -> R;
}

impl StoreSink for Dispatch<AppStore> {
    fn read<R>(&self, f: impl FnOnce(&AppStore) -> R) -> R {
        f(&self.get())
    }

    fn reduce<R>(&self, f: impl FnOnce(&mut AppStore) -> R) -> R {
        let mut next = (*self.get()).clone();
        let out = f(&mut next);
        self.set(next);
        out
    }
}

impl StoreSink for Rc<RefCell<AppStore>> {
    fn read<R>(&self, f: impl FnOnce(&AppStore) -> R) -> R {
        f(&self.borrow())
    }

    fn reduce<R>(&self, f: impl FnOnce(&mut AppStore) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Shared store dispatch for views and commands.
#[must_use]
pub fn app_dispatch() -> Dispatch<AppStore> {
    Dispatch::<AppStore>::new()
}

/// Current bearer token, copied out so no borrow spans an await.
#[must_use]
pub fn access_token(sink: &impl StoreSink) -> Option<String> {
    sink.read(|store| store.session.access_token().map(ToString::to_string))
}

/// Set a busy flag; `false` when it was already set.
pub const fn claim(flag: &mut bool) -> bool {
    if *flag {
        false
    } else {
        *flag = true;
        true
    }
}

/// Toast the user-facing message of a failed call.
pub fn toast_failure(sink: &impl StoreSink, title: &'static str, err: &ApiError) {
    let message = err.user_message();
    sink.reduce(|store| store.toasts.error(title, message));
}

/// Toast a failed submission and report it.
#[must_use]
pub fn submit_failed(
    sink: &impl StoreSink,
    title: &'static str,
    err: &ApiError,
) -> SubmitOutcome {
    toast_failure(sink, title, err);
    SubmitOutcome::Failed(err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_queue_keeps_latest_four() {
        let mut queue = ToastQueue::default();
        for _ in 0..6 {
            queue.success("toast.item_added", "toast.portfolio_added");
        }
        let ids: Vec<u64> = queue.items().iter().map(|toast| toast.id).collect();
        assert_eq!(ids, vec![3, 4, 5, 6]);

        queue.dismiss(4);
        assert_eq!(queue.items().len(), 3);
        assert!(queue.items().iter().all(|toast| toast.id != 4));
    }

    #[test]
    fn new_toast_leaves_earlier_entries_untouched() {
        let mut queue = ToastQueue::default();
        let first = queue.success("toast.item_added", "toast.portfolio_added");
        let before = queue.items()[0].clone();
        let second = queue.error("toast.error", "boom".into());

        assert_ne!(first, second);
        assert_eq!(queue.items()[0], before);
        queue.dismiss(first);
        assert_eq!(
            queue.items().iter().map(|toast| toast.id).collect::<Vec<_>>(),
            [second]
        );
    }

    #[test]
    fn pending_load_only_settles_for_its_own_id() {
        let mut slot: DetailStatus<u8> = DetailStatus::Loading("b".into());
        assert!(!slot.resolve("a", DetailStatus::Gone));
        assert_eq!(slot, DetailStatus::Loading("b".into()));
        assert!(slot.resolve("b", DetailStatus::Ready(7)));
        assert_eq!(slot.ready(), Some(&7));

        let mut unmounted: DetailStatus<u8> = DetailStatus::Idle;
        assert!(!unmounted.resolve("b", DetailStatus::Gone));
        assert_eq!(unmounted, DetailStatus::Idle);
    }

    #[test]
    fn refcell_sink_applies_reducers() {
        let sink = Rc::new(RefCell::new(AppStore::default()));
        let id = sink.reduce(|store| store.toasts.error("toast.error", "boom".into()));
        assert_eq!(id, 1);
        assert_eq!(
            sink.read(|store| store.toasts.items()[0].body.clone()),
            ToastText::Raw("boom".into())
        );
        assert_eq!(access_token(&sink), None);
    }
}
