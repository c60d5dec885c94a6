//! Date range section of the map data panel.
//!
//! Two year inputs (start, end), each between "−"/"+" buttons. The committed
//! range lives in the feature filter store and is mirrored into the location
//! hash as `daterange=<min>,<max>`.

use eframe::egui::{RichText, Ui};
use strum::IntoEnumIterator;

use super::year_stepper::{year_stepper, StepAction, StepperLabels, YearInput};
use crate::app::environment::Environment;
use crate::features::FeatureFilters;
use crate::localization::translate;
use crate::types::{parse_year_pair, Bound, DateRange, YearBounds};
use crate::ui_constants::spacing;
use crate::url_hash;
use crate::views::map_data::LocalizableName;
use crate::views::section::Section;
use crate::views::ui_helpers::Tooltip;

#[cfg(test)]
mod tests;

/// Location hash key holding the committed range.
pub const DATERANGE_PARAM: &str = "daterange";

/// Parses a year typed by the user; `None` if blank, not an integer, or outside `bounds`.
pub fn parse_year(text: &str, bounds: YearBounds) -> Option<i32> {
    text.trim()
        .parse::<i32>()
        .ok()
        .filter(|y| bounds.contains(*y))
}

/// Normalizes both inputs into a range. Invalid sides fall back to their
/// defaults; a start after the end drags the end up to the start.
pub fn validate(start: &str, end: &str, bounds: YearBounds) -> DateRange {
    let min = parse_year(start, bounds).unwrap_or(bounds.default_for(Bound::Start));
    let max = parse_year(end, bounds).unwrap_or(bounds.default_for(Bound::End));
    DateRange::spanning(min, max)
}

/// Value after a "+" (`delta = 1`) or "−" (`delta = -1`) click, or `None` when it would leave `bounds`.
/// Unparseable text steps from the side default.
pub fn step(text: &str, side: Bound, delta: i32, bounds: YearBounds) -> Option<i32> {
    let current = parse_year(text, bounds).unwrap_or(bounds.default_for(side));
    current
        .checked_add(delta)
        .filter(|y| bounds.contains(*y))
}

/// Years to seed the inputs with, read from the `daterange` hash parameter.
/// Only the outer limits are checked here; ordering is fixed by [`validate`].
pub fn range_from_hash(hash: &str, bounds: YearBounds) -> Option<(i32, i32)> {
    let params = url_hash::parse(hash);
    let (min, max) = parse_year_pair(params.get(DATERANGE_PARAM)?)?;
    (min >= bounds.min && max <= bounds.max).then_some((min, max))
}

/// `hash` with the `daterange` parameter set to `range`, or removed when `None`.
pub fn hash_with_range(hash: &str, range: Option<DateRange>) -> String {
    let mut params = url_hash::parse(hash);
    match range {
        Some(r) => {
            params.insert(DATERANGE_PARAM.to_string(), r.to_string());
        }
        None => {
            params.remove(DATERANGE_PARAM);
        }
    }
    if params.is_empty() {
        String::new()
    } else {
        url_hash::to_hash(&params, true)
    }
}

pub struct DateRangeSection {
    section: Section,
    bounds: YearBounds,
    start: YearInput,
    end: YearInput,
    rerender: bool,
}

impl DateRangeSection {
    pub fn new(bounds: YearBounds) -> Self {
        Self::with_section_id(bounds, "date_ranges")
    }

    /// `id` keys the persisted expanded state.
    pub fn with_section_id(bounds: YearBounds, id: &'static str) -> Self {
        Self {
            section: Section::new(id)
                .title("date_ranges.title")
                .expanded_by_default(false),
            bounds,
            start: YearInput::new(bounds.default_for(Bound::Start)),
            end: YearInput::new(bounds.default_for(Bound::End)),
            rerender: false,
        }
    }

    pub fn input(&self, side: Bound) -> &YearInput {
        match side {
            Bound::Start => &self.start,
            Bound::End => &self.end,
        }
    }

    fn input_mut(&mut self, side: Bound) -> &mut YearInput {
        match side {
            Bound::Start => &mut self.start,
            Bound::End => &mut self.end,
        }
    }

    /// Current text of one side's input.
    pub fn value(&self, side: Bound) -> &str {
        &self.input(side).text
    }

    /// Runs the initialization protocol on the next drawn frame, e.g. after
    /// the location changed underneath the panel.
    pub fn rerender(&mut self) {
        self.rerender = true;
    }

    /// Seeds the inputs from the location hash and commits once.
    pub fn render_pass(&mut self, store: &mut dyn FeatureFilters, env: &mut dyn Environment) {
        self.rerender = false;
        for side in Bound::iter() {
            let default = self.bounds.default_for(side);
            self.input_mut(side).set(default);
        }
        match range_from_hash(&env.hash(), self.bounds) {
            Some((min, max)) => {
                log::debug!("seeding date range from location: {min},{max}");
                self.start.set(min);
                self.end.set(max);
            }
            None => log::debug!("no usable {DATERANGE_PARAM} in location; using defaults"),
        }
        self.apply(store, env);
    }

    /// Validates both inputs, commits the range to the store and mirrors it into the hash.
    pub fn apply(&mut self, store: &mut dyn FeatureFilters, env: &mut dyn Environment) {
        let range = validate(&self.start.text, &self.end.text, self.bounds);
        for (side, year) in [(Bound::Start, range.min_year()), (Bound::End, range.max_year())] {
            let input = self.input_mut(side);
            if input.text != year.to_string() {
                log::debug!("{side} year {:?} normalized to {year}", input.text);
            }
            input.set(year);
        }

        store.set_date_range(Some(range));
        store.flush();
        self.sync_url(store, env);
    }

    /// Writes the store's current range into the hash, dropping the key when there is none.
    /// No-op under a test harness.
    pub fn sync_url(&self, store: &dyn FeatureFilters, env: &mut dyn Environment) {
        if env.is_test_harness() {
            return;
        }
        let hash = hash_with_range(&env.hash(), store.date_range());
        env.replace_hash(hash);
    }

    /// Handles a text edit on one side (the input's change event).
    pub fn change(&mut self, store: &mut dyn FeatureFilters, env: &mut dyn Environment) {
        self.apply(store, env);
    }

    /// "+" on one side. Returns false when the step would exceed the upper bound.
    pub fn increment(&mut self, side: Bound, store: &mut dyn FeatureFilters, env: &mut dyn Environment) -> bool {
        self.step_by(side, 1, store, env)
    }

    /// "−" on one side. Returns false when the step would go below the lower bound.
    pub fn decrement(&mut self, side: Bound, store: &mut dyn FeatureFilters, env: &mut dyn Environment) -> bool {
        self.step_by(side, -1, store, env)
    }

    /// Routes one stepper event from the controls.
    pub fn dispatch(
        &mut self,
        side: Bound,
        action: StepAction,
        store: &mut dyn FeatureFilters,
        env: &mut dyn Environment,
    ) {
        match action {
            StepAction::Changed => self.change(store, env),
            StepAction::Increment => {
                self.increment(side, store, env);
            }
            StepAction::Decrement => {
                self.decrement(side, store, env);
            }
        }
    }

    fn step_by(&mut self, side: Bound, delta: i32, store: &mut dyn FeatureFilters, env: &mut dyn Environment) -> bool {
        let Some(year) = step(self.value(side), side, delta, self.bounds) else {
            return false;
        };
        self.input_mut(side).set(year);
        self.change(store, env);
        true
    }

    /// Draws the section. Runs the initialization protocol when the section
    /// mounts, expands, or was asked to rerender.
    pub fn show(&mut self, ui: &mut Ui, store: &mut dyn FeatureFilters, env: &mut dyn Environment) {
        let Self {
            section,
            start,
            end,
            ..
        } = self;
        let resp = section.show(ui, |ui| draw_controls(ui, start, end));

        if resp.mounted || resp.just_expanded || self.rerender {
            self.render_pass(store, env);
            ui.ctx().request_repaint();
        }
        if let Some(Some((side, action))) = resp.inner {
            self.dispatch(side, action, store, env);
        }
    }
}

// Same control set every frame: per side a description label and a stepper row.
fn draw_controls(ui: &mut Ui, start: &mut YearInput, end: &mut YearInput) -> Option<(Bound, StepAction)> {
    let decrement = translate("date_ranges.decrement");
    let increment = translate("date_ranges.increment");
    let mut result = None;

    for (side, input) in [(Bound::Start, start), (Bound::End, end)] {
        let prefix = side.loc_key();
        let description = translate(&format!("{prefix}.description"));
        let tooltip = Tooltip::new()
            .heading(description.clone())
            .title(translate(&format!("{prefix}.tooltip")));
        let placeholder = translate(&format!("{prefix}.placeholder"));

        ui.label(RichText::new(description).weak());
        let labels = StepperLabels {
            placeholder: &placeholder,
            tooltip: &tooltip,
            decrement: &decrement,
            increment: &increment,
        };
        if let Some(action) = year_stepper(ui, &side.to_string(), input, &labels) {
            result = Some((side, action));
        }
        ui.add_space(spacing::SMALL);
    }

    result
}
