// Layout constants for the map data panel.

/// Width of the right-hand map data panel
pub const PANEL_WIDTH: f32 = 280.0;

/// Width of a year text input between its step buttons
pub const YEAR_INPUT_WIDTH: f32 = 96.0;

/// Side of the square "−" / "+" buttons
pub const STEP_BUTTON_SIZE: f32 = 22.0;

/// Initial window size
pub const WINDOW_SIZE: [f32; 2] = [900.0, 600.0];

/// UI spacing constants
pub mod spacing {
    /// Small spacing (4px)
    pub const SMALL: f32 = 4.0;

    /// Medium spacing (8px)
    pub const MEDIUM: f32 = 8.0;

    /// Large spacing (16px)
    pub const LARGE: f32 = 16.0;
}

pub mod colors {
    use eframe::egui::Color32;

    pub const PANEL_FILL: Color32 = Color32::from_rgb(30, 30, 30);
    pub const ACCENT: Color32 = Color32::from_rgb(210, 85, 85);
    pub const TOOLTIP_FILL: Color32 = Color32::from_rgb(28, 28, 28);
    pub const TOOLTIP_BORDER: Color32 = Color32::from_gray(60);
}
