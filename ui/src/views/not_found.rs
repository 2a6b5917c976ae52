use dioxus::{logger::tracing::debug, prelude::*};

use crate::Route;

/// Anything without a route of its own is sent home.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = navigator();
    debug!("No route for /{}, redirecting home", segments.join("/"));
    nav.replace(Route::Home {});

    rsx! {}
}
