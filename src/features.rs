// Active map-data filters. Only the date range is held here; applying it to
// rendered map data happens downstream of `flush`.

use eframe::egui;

use crate::types::DateRange;

/// What the map data panel needs from the filter store.
pub trait FeatureFilters {
    fn date_range(&self) -> Option<DateRange>;
    /// Overwrites the whole range; takes effect on the next `flush`.
    fn set_date_range(&mut self, range: Option<DateRange>);
    fn flush(&mut self);
}

#[derive(Default)]
pub struct FeatureStore {
    date_range: Option<DateRange>,
    // Range as of the last flush; what the map actually shows.
    applied: Option<DateRange>,
    revision: u64,
    redraw: Option<egui::Context>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repaint hook invoked on every flush.
    pub fn with_redraw(mut self, ctx: egui::Context) -> Self {
        self.redraw = Some(ctx);
        self
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn applied_range(&self) -> Option<DateRange> {
        self.applied
    }

    pub fn clear_date_range(&mut self) {
        self.set_date_range(None);
        self.flush();
    }

    pub fn describe(&self) -> String {
        match self.applied {
            Some(r) => format!("{} – {}", r.min_year(), r.max_year()),
            None => "—".to_string(),
        }
    }
}

impl FeatureFilters for FeatureStore {
    fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    fn set_date_range(&mut self, range: Option<DateRange>) {
        self.date_range = range;
    }

    fn flush(&mut self) {
        self.applied = self.date_range;
        self.revision += 1;
        log::debug!(
            "feature filters flushed (rev {}): date range {}",
            self.revision,
            self.describe()
        );
        if let Some(ctx) = &self.redraw {
            ctx.request_repaint();
        }
    }
}
