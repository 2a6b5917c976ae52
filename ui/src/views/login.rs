use dioxus::{logger::tracing::warn, prelude::*};

use crate::{Route, session::use_session_context};

#[component]
pub fn Login() -> Element {
    let session = use_session_context();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error: Signal<Option<String>> = use_signal(|| None);

    rsx! {
        div {
            class: "login",

            h3 { "Login" }
            input {
                value: "{username}",
                placeholder: "Login",
                oninput: move |event| username.set(event.value()),
            }
            input {
                r#type: "password",
                value: "{password}",
                placeholder: "Password",
                oninput: move |event| password.set(event.value()),
            }
            {error().map(|error| rsx! { p { class: "error", "{error}" } })}
            button {
                onclick: move |_| {
                    let session = session.clone();
                    let nav = navigator();
                    async move {
                        match client::auth::login(username(), password()).await {
                            Ok(user) => {
                                if !session.sign_in(&user) {
                                    warn!("Logged in as {:?} but the session was not saved", user.login);
                                }
                                error.set(None);
                                nav.replace(Route::Home {});
                            }
                            Err(err) => error.set(Some(err)),
                        }
                    }
                },
                "Login"
            }
        }
    }
}
