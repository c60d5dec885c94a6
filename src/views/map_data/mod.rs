pub mod items;
pub mod render;
pub use render::draw_map_data_panel;

/// Types whose UI strings live under a localization key prefix.
pub trait LocalizableName {
    fn loc_key(&self) -> &'static str;
}
