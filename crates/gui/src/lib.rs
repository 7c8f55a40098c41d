// Library crate: exposes testable modules for integration tests.
// GUI-specific modules (app shell, ui panels, painting) remain in the binary crate.

pub mod api;
pub mod export;
pub mod fixtures;
pub mod harness;
pub mod helpers;
pub mod state;

/// Egui-free subset of the viewport: transform math, marker picking,
/// classification, and the pure draw-list builder. Input routing and the
/// actual painting stay in the binary crate.
pub mod viewport {
    pub mod classify;
    pub mod picking;
    pub mod scene_list;
    pub mod view;
}
