//! Components shared by every platform: the root shell, the navigation bar
//! and the routed views.

mod app;
mod navbar;
mod route;
mod session;
mod views;

pub use app::{App, Shell};
pub use navbar::{Affordance, NavBarModel, Navigate, NavigationBar, end_session, go_home};
pub use route::Route;
pub use session::SessionContext;
pub use views::{Home, Login, NotFound};
