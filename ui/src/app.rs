use std::rc::Rc;

use client::{auth::ServerAuthBackend, config::ClientConfig, session_store::platform_store};
use dioxus::prelude::*;

use crate::{NavigationBar, Route, SessionContext, session::use_session_check};

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let changes = use_signal(|| 0u64);
    let session = use_context_provider(|| {
        let store = platform_store(&ClientConfig::default());
        SessionContext::new(store, Rc::new(ServerAuthBackend), changes)
    });
    use_session_check(session);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

/// Layout around every route: the navigation bar on top, the routed view
/// below it.
#[component]
pub fn Shell() -> Element {
    rsx! {
        div {
            class: "app",
            NavigationBar {}
            div {
                class: "container-fluid",
                Outlet::<Route> {}
            }
        }
    }
}
