use dioxus::prelude::*;

use crate::{
    app::Shell,
    views::{Home, Login, NotFound},
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/home")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}
