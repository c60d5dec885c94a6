use eframe::egui::{self, Layout, RichText};
use strum::IntoEnumIterator;

use crate::app::environment::Environment;
use crate::features::FeatureFilters;
use crate::localization::{self, translate, SupportedLang};
use crate::ui_constants::{colors, spacing, PANEL_WIDTH};
use crate::views::map_data::items::date_range::DateRangeSection;

/// Buttons at the bottom of the panel that the app reacts to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelActions {
    pub open_logs: bool,
    pub language_changed: Option<SupportedLang>,
}

/// Draws the right-side map data panel.
pub fn draw_map_data_panel(
    ctx: &egui::Context,
    date_range: &mut DateRangeSection,
    store: &mut dyn FeatureFilters,
    env: &mut dyn Environment,
) -> PanelActions {
    let mut actions = PanelActions::default();
    egui::SidePanel::right("map_data_panel")
        .frame(
            egui::Frame::none()
                .fill(colors::PANEL_FILL)
                .inner_margin(10.0),
        )
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new(translate("map_data.title")).strong());
            ui.separator();

            // DATE RANGE
            date_range.show(ui, store, env);

            ui.add_space(spacing::MEDIUM);
            ui.with_layout(Layout::bottom_up(egui::Align::LEFT), |ui| {
                ui.horizontal(|ui| {
                    if ui.button(translate("map_data.logs")).clicked() {
                        actions.open_logs = true;
                    }
                    let current = localization::get_current_language();
                    let mut selected = current;
                    egui::ComboBox::from_id_source("language_picker")
                        .selected_text(selected.native_name())
                        .show_ui(ui, |ui| {
                            for lang in SupportedLang::iter() {
                                ui.selectable_value(&mut selected, lang, lang.native_name());
                            }
                        })
                        .response
                        .on_hover_text(translate("map_data.language"));
                    if selected != current {
                        actions.language_changed = Some(selected);
                    }
                });
                ui.separator();
            });
        });
    actions
}
