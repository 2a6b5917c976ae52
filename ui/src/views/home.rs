use dioxus::prelude::*;

use crate::session::use_session_context;

#[component]
pub fn Home() -> Element {
    let session = use_session_context().session();
    let greeting = match session.username() {
        Some(username) => format!("Welcome back, {username}."),
        None => "You are not logged in.".to_owned(),
    };

    rsx! {
        h1 { "Home" }
        p { "{greeting}" }
    }
}
