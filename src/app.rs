// Application state and top-level drawing: map data panel on the right,
// status of the active filters and the location in the center.

use eframe::egui::{self, RichText};
use eframe::App;

use crate::features::{FeatureFilters, FeatureStore};
use crate::localization::{self, translate, translate_with};
use crate::types::YearBounds;
use crate::ui_constants::{colors, spacing};
use crate::views::map_data::draw_map_data_panel;
use crate::views::map_data::items::date_range::DateRangeSection;

pub mod environment;
mod logs_ui;
pub mod settings;

use environment::{Environment, MemoryLocation};

pub struct MapDataApp {
    store: FeatureStore,
    location: MemoryLocation,
    // Location field text; follows the location while not being edited.
    location_draft: String,
    date_range: DateRangeSection,
}

impl MapDataApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_location(MemoryLocation::from_process())
            .with_redraw(cc.egui_ctx.clone())
    }

    pub fn with_location(location: MemoryLocation) -> Self {
        Self {
            store: FeatureStore::new(),
            location_draft: location.hash(),
            location,
            date_range: DateRangeSection::new(YearBounds::current()),
        }
    }

    fn with_redraw(mut self, ctx: egui::Context) -> Self {
        self.store = self.store.with_redraw(ctx);
        self
    }

    /// Jumps to another location; the date range section re-reads it next frame.
    fn navigate(&mut self, hash: String) {
        log::info!("navigating to {hash:?}");
        self.location.replace_hash(hash);
        self.location_draft = self.location.hash();
        self.date_range.rerender();
    }

    fn draw_status(&mut self, ui: &mut egui::Ui) {
        ui.heading(translate("status.active_range"));
        ui.add_space(spacing::SMALL);
        let range_text = match self.store.applied_range() {
            Some(_) => self.store.describe(),
            None => translate("status.no_range"),
        };
        ui.label(RichText::new(range_text).size(20.0).color(colors::ACCENT));
        ui.label(
            RichText::new(translate_with(
                "status.revision",
                &[("revision", self.store.revision().to_string())],
            ))
            .weak(),
        );

        ui.add_space(spacing::LARGE);
        ui.label(RichText::new(translate("status.location")).weak());
        let edit = ui.add(
            egui::TextEdit::singleline(&mut self.location_draft)
                .font(egui::TextStyle::Monospace)
                .desired_width(f32::INFINITY),
        );
        if edit.lost_focus() {
            if self.location_draft != self.location.hash() {
                let hash = self.location_draft.clone();
                self.navigate(hash);
            }
        } else if !edit.has_focus() {
            self.location_draft = self.location.hash();
        }

        ui.add_space(spacing::MEDIUM);
        let can_reset = self.store.date_range().is_some();
        if ui
            .add_enabled(can_reset, egui::Button::new(translate("map_data.reset")))
            .clicked()
        {
            log::info!("date filter cleared");
            self.store.clear_date_range();
            self.date_range.sync_url(&self.store, &mut self.location);
        }
    }
}

impl App for MapDataApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if crate::logger::take_new_flag() {
            ctx.request_repaint();
        }

        let actions = draw_map_data_panel(
            ctx,
            &mut self.date_range,
            &mut self.store,
            &mut self.location,
        );
        if actions.open_logs {
            logs_ui::open_logs();
        }
        if let Some(lang) = actions.language_changed {
            match localization::set_current_language(lang) {
                Ok(()) => {
                    settings::with_settings_mut(|st| st.language = Some(lang));
                    log::info!("UI language set to {}", lang);
                }
                Err(e) => log::error!("Cannot switch language: {e}"),
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(spacing::MEDIUM);
            self.draw_status(ui);
        });

        logs_ui::draw_logs_viewport(ctx);
    }
}
