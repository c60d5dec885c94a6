use eframe::egui::{self, RichText, Ui, Vec2};

use crate::ui_constants::{STEP_BUTTON_SIZE, YEAR_INPUT_WIDTH};
use crate::views::ui_helpers::Tooltip;

/// Raw text of a year input. Holds whatever the user typed until the
/// next commit normalizes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearInput {
    pub text: String,
    // Edited since the last commit.
    pub dirty: bool,
}

impl YearInput {
    pub fn new(year: i32) -> Self {
        Self {
            text: year.to_string(),
            dirty: false,
        }
    }

    pub fn set(&mut self, year: i32) {
        self.text = year.to_string();
        self.dirty = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Decrement,
    Increment,
    /// Text edited and focus left (or Enter pressed).
    Changed,
}

/// Labels for one control pair.
pub struct StepperLabels<'a> {
    pub placeholder: &'a str,
    pub tooltip: &'a Tooltip,
    pub decrement: &'a str,
    pub increment: &'a str,
}

/// "−" [ year ] "+" row. Returns Some(action) on user interaction this frame.
pub fn year_stepper(ui: &mut Ui, id_salt: &str, input: &mut YearInput, labels: &StepperLabels<'_>) -> Option<StepAction> {
    let mut action: Option<StepAction> = None;
    let button_size = Vec2::splat(STEP_BUTTON_SIZE);

    ui.horizontal(|ui| {
        let minus = ui
            .add_sized(button_size, egui::Button::new(RichText::new("−").strong()))
            .on_hover_text(labels.decrement);
        if minus.clicked() {
            action = Some(StepAction::Decrement);
        }

        let edit = egui::TextEdit::singleline(&mut input.text)
            .id(ui.id().with(("year_input", id_salt)))
            .hint_text(labels.placeholder)
            .desired_width(YEAR_INPUT_WIDTH);
        let resp = labels.tooltip.attach(ui.add(edit));
        if resp.changed() {
            input.dirty = true;
        }
        if resp.lost_focus() && input.dirty {
            action = Some(StepAction::Changed);
        }

        let plus = ui
            .add_sized(button_size, egui::Button::new(RichText::new("+").strong()))
            .on_hover_text(labels.increment);
        if plus.clicked() {
            action = Some(StepAction::Increment);
        }
    });

    action
}
