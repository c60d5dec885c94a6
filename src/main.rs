#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
// Entry point: logger, settings, localization, then the window.

use eframe::egui;

mod app;
mod features;
mod localization;
mod logger;
mod types;
mod ui_constants;
mod url_hash;
mod views;

fn main() -> eframe::Result<()> {
    logger::init();
    app::settings::load_settings_from_disk();
    let preferred_lang = app::settings::with_settings(|st| st.language);
    if let Err(e) = localization::initialize_localization(preferred_lang) {
        log::error!("Localization initialization failed: {e}");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(ui_constants::WINDOW_SIZE)
            .with_resizable(true),
        ..Default::default()
    };

    let res = eframe::run_native(
        localization::translate("app.window_title").as_str(),
        native_options,
        Box::new(|cc| Box::new(app::MapDataApp::new(cc))),
    );
    if let Err(ref e) = res {
        log::error!("eframe::run_native failed: {e}");
    }
    res
}
