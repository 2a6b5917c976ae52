use std::rc::Rc;

use client::{
    auth::{AuthBackend, SessionValidity, check_session},
    session_store::SessionStore,
};
use dioxus::{logger::tracing::info, prelude::*};
use shared::{Session, StoredUser};

/// Session collaborators handed down the component tree.
///
/// Components read the session through [`SessionContext::session`], which
/// subscribes them to `changes`; anything that writes the store must call
/// [`SessionContext::notify`] so those components render again.
#[derive(Clone)]
pub struct SessionContext {
    store: Rc<dyn SessionStore>,
    backend: Rc<dyn AuthBackend>,
    changes: Signal<u64>,
}

impl SessionContext {
    pub fn new(
        store: Rc<dyn SessionStore>,
        backend: Rc<dyn AuthBackend>,
        changes: Signal<u64>,
    ) -> Self {
        Self {
            store,
            backend,
            changes,
        }
    }

    pub fn session(&self) -> Session {
        // Subscribes the calling component to `notify`.
        self.changes.read();
        self.store.session()
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    pub fn backend(&self) -> &dyn AuthBackend {
        self.backend.as_ref()
    }

    pub fn sign_in(&self, user: &StoredUser) -> bool {
        let saved = self.store.save_user(user);
        self.notify();
        saved
    }

    pub fn notify(&self) {
        let mut changes = self.changes;
        *changes.write() += 1;
    }

    /// Removes `user` if the backend called it stale and nobody has logged in
    /// again since it was read.
    pub fn forget_if_stale(&self, user: &StoredUser, validity: SessionValidity) -> bool {
        if validity != SessionValidity::Stale || self.store.load_user().as_ref() != Some(user) {
            return false;
        }
        self.store.remove_user();
        self.notify();
        true
    }
}

pub fn use_session_context() -> SessionContext {
    use_context::<SessionContext>()
}

/// Asks the backend once per mount whether the stored login is still alive
/// and forgets it if not.
pub fn use_session_check(session: SessionContext) {
    use_future(move || {
        let session = session.clone();
        async move {
            let Some(user) = session.store().load_user() else {
                return;
            };
            let validity = check_session(&user).await;
            if session.forget_if_stale(&user, validity) {
                info!("Session of {:?} ended on the backend, forgot it locally", user.login);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use client::session_store::MemorySessionStore;
    use shared::SessionToken;

    use super::*;
    use crate::{Navigate, Route, end_session};

    struct NoBackend;

    impl AuthBackend for NoBackend {
        fn logout(&self, _user: &StoredUser) {}
    }

    #[derive(Default)]
    struct LastRoute(RefCell<Option<Route>>);

    impl Navigate for LastRoute {
        fn navigate(&self, route: Route) {
            *self.0.borrow_mut() = Some(route);
        }
    }

    thread_local! {
        static SEEN: RefCell<Vec<(u64, Session)>> = const { RefCell::new(Vec::new()) };
        static FORGOTTEN: RefCell<Vec<bool>> = const { RefCell::new(Vec::new()) };
    }

    fn alice() -> StoredUser {
        StoredUser {
            login: "alice".to_owned(),
            token: SessionToken([4; 32]),
        }
    }

    fn record(context: &SessionContext) {
        let seen = (*context.changes.peek(), context.session());
        SEEN.with(|log| log.borrow_mut().push(seen));
    }

    fn render(app: fn() -> Element) {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
    }

    fn context_over(store: MemorySessionStore) -> SessionContext {
        let changes = use_signal(|| 0u64);
        SessionContext::new(Rc::new(store), Rc::new(NoBackend), changes)
    }

    #[test]
    fn sign_in_and_logout_notify_and_flip_the_session() {
        fn app() -> Element {
            let context = context_over(MemorySessionStore::default());
            record(&context);
            assert!(context.sign_in(&alice()));
            record(&context);
            let nav = LastRoute::default();
            end_session(context.store(), context.backend(), &nav);
            context.notify();
            record(&context);
            assert_eq!(*nav.0.borrow(), Some(Route::Home {}));
            rsx! {}
        }

        render(app);

        let seen = SEEN.with(RefCell::take);
        assert_eq!(
            seen,
            vec![
                (0, Session::Anonymous),
                (
                    1,
                    Session::Authenticated {
                        username: "alice".to_owned()
                    }
                ),
                (2, Session::Anonymous),
            ]
        );
    }

    #[test]
    fn only_a_stale_and_unchanged_login_is_forgotten() {
        fn app() -> Element {
            let context = context_over(MemorySessionStore::with_user(alice()));
            let bob = StoredUser {
                login: "bob".to_owned(),
                token: SessionToken([8; 32]),
            };
            let outcomes = [
                context.forget_if_stale(&alice(), SessionValidity::Valid),
                context.forget_if_stale(&alice(), SessionValidity::Unknown),
                context.forget_if_stale(&bob, SessionValidity::Stale),
                context.forget_if_stale(&alice(), SessionValidity::Stale),
            ];
            FORGOTTEN.with(|log| log.borrow_mut().extend(outcomes));
            record(&context);
            rsx! {}
        }

        render(app);

        assert_eq!(FORGOTTEN.with(RefCell::take), vec![false, false, false, true]);
        assert_eq!(SEEN.with(RefCell::take), vec![(1, Session::Anonymous)]);
    }
}
