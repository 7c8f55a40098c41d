pub mod layer_panel;
pub mod points_panel;
pub mod status_bar;
pub mod toolbar;
