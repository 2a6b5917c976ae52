use dioxus::logger::tracing::Level;

fn main() {
    #[cfg(debug_assertions)]
    let level = Level::DEBUG;
    #[cfg(not(debug_assertions))]
    let level = Level::INFO;
    if let Err(err) = dioxus::logger::init(level) {
        eprintln!("Logger was not initialized: {err}");
    }

    #[cfg(feature = "server")]
    {
        server::init_server();
    }

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, WindowBuilder};

        dioxus::LaunchBuilder::new()
            .with_cfg(
                Config::default()
                    .with_menu(None)
                    .with_window(WindowBuilder::new().with_title("My RPO")),
            )
            .launch(ui::App);
    }
    #[cfg(not(feature = "desktop"))]
    dioxus::launch(ui::App);
}
