// Building blocks of the map data panel.
pub mod date_range;
pub mod year_stepper;
