use yew::prelude::*;

mod components;
pub mod api_client;
pub mod common;
pub mod hooks;
pub mod settings;

use components::dashboard::Dashboard;

#[derive(Properties, PartialEq, Default)]
pub struct AppProps {
    /// Repositories offered in the sidebar
    #[prop_or_default]
    pub catalog: ::common::RepositoryCatalog,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    html! { <Dashboard catalog={props.catalog.clone()} /> }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Forecast Dashboard Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("Debug mode: {}", settings.debug_mode);

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
