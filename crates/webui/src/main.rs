use testtools_webui::{
    api::ApiConfig,
    app::{App, AppProps},
};

fn main() {
    init_logging();
    yew::Renderer::<App>::with_props(AppProps {
        api_config: ApiConfig::default(),
    })
    .render();
}

fn init_logging() {
    use log::Level;
    use wasm_logger::Config;

    // use debug level for debug builds, warn level for production builds.
    #[cfg(debug_assertions)]
    let level = Level::Trace;
    #[cfg(not(debug_assertions))]
    let level = Level::Warn;

    wasm_logger::init(Config::new(level));
}
