use eframe::egui::{self, RichText, Rounding, Stroke};

use crate::ui_constants::colors;

/// Hover text for a control: optional bold heading plus a body line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    heading: Option<String>,
    title: String,
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn heading(mut self, heading: impl Into<String>) -> Self {
        let heading = heading.into();
        self.heading = (!heading.is_empty()).then_some(heading);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.heading.is_none()
    }

    /// Attaches the tooltip to `response`. Empty tooltips attach nothing.
    pub fn attach(&self, response: egui::Response) -> egui::Response {
        if self.is_empty() {
            return response;
        }
        response.on_hover_ui(|ui| {
            egui::Frame::default()
                .fill(colors::TOOLTIP_FILL)
                .stroke(Stroke::new(1.0, colors::TOOLTIP_BORDER))
                .rounding(Rounding::same(4.0))
                .inner_margin(6.0)
                .show(ui, |ui| {
                    if let Some(h) = &self.heading {
                        ui.label(RichText::new(h).strong());
                    }
                    if !self.title.is_empty() {
                        ui.label(&self.title);
                    }
                });
        })
    }
}
