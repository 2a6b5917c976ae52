use client::{auth::AuthBackend, session_store::SessionStore};
use dioxus::{
    logger::tracing::{debug, warn},
    prelude::*,
};
use dioxus::router::Navigator;
use dioxus_free_icons::{
    Icon,
    icons::go_icons::{GoHome, GoPerson},
};
use shared::Session;

use crate::{Route, session::use_session_context};

/// Imperative navigation, so the logout flow can run without a router.
pub trait Navigate {
    fn navigate(&self, route: Route);
}

impl Navigate for Navigator {
    fn navigate(&self, route: Route) {
        self.push(route);
    }
}

/// The login/logout control. Exactly one is shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Affordance {
    Login { to: Route },
    Logout,
}

/// What the navigation bar shows for a given session.
#[derive(Debug, Clone, PartialEq)]
pub struct NavBarModel {
    pub display_name: Option<String>,
    pub affordance: Affordance,
}

impl NavBarModel {
    pub fn for_session(session: &Session) -> Self {
        match session {
            Session::Anonymous => Self {
                display_name: None,
                affordance: Affordance::Login { to: Route::Login {} },
            },
            Session::Authenticated { username } => Self {
                display_name: Some(username.clone()),
                affordance: Affordance::Logout,
            },
        }
    }
}

pub fn go_home(nav: &dyn Navigate) {
    nav.navigate(Route::Home {});
}

/// Logs the user out: the backend is asked first, then the local identity is
/// dropped, then we go home. The backend call is not awaited, so the last two
/// steps happen whatever it ends up returning.
pub fn end_session(store: &dyn SessionStore, backend: &dyn AuthBackend, nav: &dyn Navigate) {
    match store.load_user() {
        Some(user) => backend.logout(&user),
        None => debug!("Logout without a stored user, skipping the backend"),
    }
    if !store.remove_user() {
        warn!("Stored user could not be removed on logout");
    }
    go_home(nav);
}

#[component]
pub fn NavigationBar() -> Element {
    let session = use_session_context();
    let NavBarModel {
        display_name,
        affordance,
    } = NavBarModel::for_session(&session.session());
    let display_name = display_name.unwrap_or_default();

    let affordance = match affordance {
        Affordance::Logout => rsx! {
            button {
                class: "nav-link",
                onclick: move |_| {
                    end_session(session.store(), session.backend(), &navigator());
                    session.notify();
                },
                Icon { width: 16, height: 16, icon: GoPerson }
                " Logout"
            }
        },
        Affordance::Login { to } => rsx! {
            Link {
                class: "nav-link",
                to: to,
                Icon { width: 16, height: 16, icon: GoPerson }
                " Login"
            }
        },
    };

    rsx! {
        nav {
            class: "navbar",
            Link {
                class: "navbar-brand",
                to: Route::Home {},
                Icon { width: 16, height: 16, icon: GoHome }
                " My RPO"
            }
            div {
                class: "navbar-nav",
                Link {
                    class: "nav-link",
                    to: Route::Home {},
                    "Home"
                }
                button {
                    class: "nav-link",
                    onclick: |_| go_home(&navigator()),
                    "Another Home"
                }
            }
            span {
                class: "navbar-text",
                "{display_name}"
            }
            {affordance}
        }
    }
}
