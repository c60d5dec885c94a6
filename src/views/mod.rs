pub mod map_data;
pub mod section;
pub mod ui_helpers;
