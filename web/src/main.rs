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

    dioxus::launch(ui::App);
}
