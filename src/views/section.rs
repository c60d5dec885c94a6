use eframe::egui::{self, RichText, Ui};

use crate::app::settings::{with_settings, with_settings_mut};
use crate::localization::translate;

/// Collapsible titled section whose expansion survives restarts
/// (stored in settings as `disclosure.<id>.expanded`).
pub struct Section {
    id: &'static str,
    title_key: &'static str,
    expanded_by_default: bool,
    // None until first drawn.
    was_expanded: Option<bool>,
}

/// What happened to a section this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionResponse<R> {
    pub expanded: bool,
    /// First frame drawn since creation.
    pub mounted: bool,
    /// Switched from collapsed to expanded this frame; the body appears next frame.
    pub just_expanded: bool,
    pub inner: Option<R>,
}

impl Section {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            title_key: id,
            expanded_by_default: true,
            was_expanded: None,
        }
    }

    /// Localization key of the header text.
    pub fn title(mut self, key: &'static str) -> Self {
        self.title_key = key;
        self
    }

    pub fn expanded_by_default(mut self, expanded: bool) -> Self {
        self.expanded_by_default = expanded;
        self
    }

    pub fn is_expanded(&self) -> bool {
        with_settings(|st| st.disclosure_expanded(self.id)).unwrap_or(self.expanded_by_default)
    }

    pub fn set_expanded(&self, expanded: bool) {
        log::debug!("section {} expanded: {}", self.id, expanded);
        with_settings_mut(|st| st.set_disclosure_expanded(self.id, expanded));
    }

    /// Draws the header and, while expanded, the body via `content`.
    pub fn show<R>(&mut self, ui: &mut Ui, content: impl FnOnce(&mut Ui) -> R) -> SectionResponse<R> {
        let expanded = self.is_expanded();
        let header = RichText::new(translate(self.title_key)).strong();
        let resp = egui::CollapsingHeader::new(header)
            .id_source(("section", self.id))
            .open(Some(expanded))
            .show(ui, content);

        let mut now_expanded = expanded;
        if resp.header_response.clicked() {
            now_expanded = !expanded;
            self.set_expanded(now_expanded);
        }

        let mounted = self.was_expanded.is_none();
        let just_expanded = !mounted && now_expanded && self.was_expanded == Some(false);
        self.was_expanded = Some(now_expanded);

        SectionResponse {
            expanded: now_expanded,
            mounted,
            just_expanded,
            inner: resp.body_returned,
        }
    }
}
