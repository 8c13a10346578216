use dioxus_logger::tracing::{error, info};
use ui::injection::{Component, InjectionRegistry};

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");

    let mut registry: InjectionRegistry<Component> = InjectionRegistry::new();
    for anchor in ui::ITEM_INFO_ANCHORS {
        registry.register_continuous_injection(anchor, ui::SelectedItemInfo);
    }

    let settings = api::settings::Settings::default();
    info!(
        "registered {} injection(s), polling selection every {}ms",
        registry.len(),
        settings.poll_interval_ms
    );

    if let Err(e) = start(registry) {
        error!("injection not started: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn start(registry: InjectionRegistry<Component>) -> Result<(), ui::injection::InjectionError> {
    ui::injection::web::start(registry)
}

#[cfg(not(target_arch = "wasm32"))]
fn start(_registry: InjectionRegistry<Component>) -> Result<(), ui::injection::InjectionError> {
    Err(ui::injection::InjectionError::NoDocument)
}
