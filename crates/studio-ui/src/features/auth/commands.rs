//! Sign-in, sign-up and sign-out.
//!
//! # Design
//! - A successful auth response is persisted before the store sees it, so a
//!   reload after navigation finds the same session.
//! - Failed attempts keep the typed inputs for correction.

use studio_api_models::AuthResponse;
use studio_client::{ApiError, StudioApi};

use crate::core::forms::SubmitOutcome;
use crate::core::session::{SessionBackend, SessionStore};
use crate::core::store::{AppStore, StoreSink, submit_failed};

/// Submit the login form.
pub async fn submit_login<B: SessionBackend>(
    api: &impl StudioApi,
    sink: &impl StoreSink,
    session: &SessionStore<B>,
) -> SubmitOutcome {
    let Some(request) = sink.reduce(|store| store.auth.login.begin_submit()) else {
        return SubmitOutcome::blocked(sink.read(|store| store.auth.login.submitting));
    };
    let result = api.login(&request).await;
    let outcome = finish_auth(sink, session, result, "toast.login_failed");
    sink.reduce(|store| {
        if outcome == SubmitOutcome::Saved {
            store.auth.login.reset();
        } else {
            store.auth.login.submitting = false;
        }
    });
    outcome
}

/// Submit the sign-up form.
pub async fn submit_signup<B: SessionBackend>(
    api: &impl StudioApi,
    sink: &impl StoreSink,
    session: &SessionStore<B>,
) -> SubmitOutcome {
    let Some(request) = sink.reduce(|store| store.auth.signup.begin_submit()) else {
        return SubmitOutcome::blocked(sink.read(|store| store.auth.signup.submitting));
    };
    let result = api.register(&request).await;
    let outcome = finish_auth(sink, session, result, "toast.signup_failed");
    sink.reduce(|store| {
        if outcome == SubmitOutcome::Saved {
            store.auth.signup.reset();
        } else {
            store.auth.signup.submitting = false;
        }
    });
    outcome
}

/// Forget the session and every loaded slice; pending toasts survive.
pub fn sign_out<B: SessionBackend>(sink: &impl StoreSink, session: &SessionStore<B>) {
    session.clear();
    sink.reduce(|store| {
        let toasts = std::mem::take(&mut store.toasts);
        *store = AppStore {
            toasts,
            ..AppStore::default()
        };
    });
}

fn finish_auth<B: SessionBackend>(
    sink: &impl StoreSink,
    session: &SessionStore<B>,
    result: Result<AuthResponse, ApiError>,
    failure_title: &'static str,
) -> SubmitOutcome {
    let auth = match result {
        Ok(auth) => auth,
        Err(err) => return submit_failed(sink, failure_title, &err),
    };
    match session.set_session(auth.tokens.access, auth.tokens.refresh, auth.user) {
        Ok(saved) => {
            sink.reduce(|store| store.session = saved);
            SubmitOutcome::Saved
        }
        Err(err) => {
            let message = err.to_string();
            let toasted = message.clone();
            sink.reduce(|store| store.toasts.error(failure_title, toasted));
            SubmitOutcome::Failed(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::tests::MemoryBackend;
    use crate::core::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_COOKIE, Session};
    use crate::core::store::{Section, ToastText};
    use crate::test_support::{FakeApi, image};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fill_login(sink: &impl StoreSink, password: &str) {
        sink.reduce(|store| {
            store.auth.login.form.email = "owner@studio.test".into();
            store.auth.login.form.password = password.into();
        });
    }

    #[tokio::test]
    async fn login_persists_session_and_resets_form() {
        let api = FakeApi::default();
        let backend = MemoryBackend::default();
        let session = SessionStore::new(&backend);
        let sink = Rc::new(RefCell::new(AppStore::default()));
        fill_login(&sink, "secret");

        assert_eq!(
            submit_login(&api, &sink, &session).await,
            SubmitOutcome::Saved
        );
        assert_eq!(session.access_token().as_deref(), Some("access-1"));
        assert!(backend.cookies.borrow().contains_key(REFRESH_TOKEN_COOKIE));
        sink.read(|store| {
            assert!(store.session.is_authenticated());
            assert_eq!(store.auth.login.form.email, "");
        });
    }

    #[tokio::test]
    async fn rejected_login_toasts_and_keeps_inputs() {
        let api = FakeApi::default();
        let backend = MemoryBackend::default();
        let session = SessionStore::new(&backend);
        let sink = Rc::new(RefCell::new(AppStore::default()));
        fill_login(&sink, "wrong");

        assert_eq!(
            submit_login(&api, &sink, &session).await,
            SubmitOutcome::Failed("Incorrect email or password".into())
        );
        assert!(backend.local.borrow().get(ACCESS_TOKEN_KEY).is_none());
        sink.read(|store| {
            let toast = &store.toasts.items()[0];
            assert_eq!(toast.title, "toast.login_failed");
            assert_eq!(
                toast.body,
                ToastText::Raw("Incorrect email or password".into())
            );
            assert_eq!(store.auth.login.form.password, "wrong");
            assert!(!store.auth.login.submitting);
            assert!(!store.session.is_authenticated());
        });
    }

    #[tokio::test]
    async fn empty_signup_never_calls_backend() {
        let api = FakeApi::default();
        let backend = MemoryBackend::default();
        let session = SessionStore::new(&backend);
        let sink = Rc::new(RefCell::new(AppStore::default()));
        sink.reduce(|store| store.auth.signup.form.email = "new@studio.test".into());

        assert_eq!(
            submit_signup(&api, &sink, &session).await,
            SubmitOutcome::Invalid
        );
        assert_eq!(api.calls_to("register"), 0);
        assert_eq!(
            sink.read(|store| store.auth.signup.errors.fields().collect::<Vec<_>>()),
            ["username", "password"]
        );
    }

    #[tokio::test]
    async fn signup_signs_the_user_in() {
        let api = FakeApi::default();
        let backend = MemoryBackend::default();
        let session = SessionStore::new(&backend);
        let sink = Rc::new(RefCell::new(AppStore::default()));
        sink.reduce(|store| {
            let form = &mut store.auth.signup.form;
            form.email = "new@studio.test".into();
            form.username = "new".into();
            form.password = "pw".into();
        });

        assert_eq!(
            submit_signup(&api, &sink, &session).await,
            SubmitOutcome::Saved
        );
        assert_eq!(
            session.load().user.map(|user| user.email),
            Some("new@studio.test".to_string())
        );
    }

    #[tokio::test]
    async fn sign_out_clears_state_but_keeps_toasts() {
        let api = FakeApi::with_images(vec![image("1", "Beach")]);
        let backend = MemoryBackend::default();
        let session = SessionStore::new(&backend);
        let sink = Rc::new(RefCell::new(AppStore::default()));
        fill_login(&sink, "secret");
        submit_login(&api, &sink, &session).await;
        sink.reduce(|store| {
            store.section = Section::Service;
            store.toasts.success("toast.item_added", "toast.portfolio_added");
        });

        sign_out(&sink, &session);
        assert_eq!(session.load(), Session::default());
        sink.read(|store| {
            assert_eq!(store.session, Session::default());
            assert_eq!(store.section, Section::Portfolio);
            assert_eq!(store.toasts.items().len(), 1);
        });
    }
}
