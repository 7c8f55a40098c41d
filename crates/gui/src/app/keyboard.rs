//! Keyboard shortcut handling

use eframe::egui;

use crate::state::tool::Tool;
use crate::state::AppState;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // P / M / L — tool selection
        if i.key_pressed(egui::Key::P) {
            state.tools.set_tool(Tool::Pan);
        }
        if i.key_pressed(egui::Key::M) {
            state.tools.set_tool(Tool::MovePoint);
        }
        if i.key_pressed(egui::Key::L) {
            state.tools.set_tool(Tool::DrawLine);
        }
        // Escape — cancel drawing anchor, then fall back to pan
        if i.key_pressed(egui::Key::Escape) {
            handle_escape(state);
        }
        // F — fit view to the point cloud
        if i.key_pressed(egui::Key::F) {
            state.fit_view();
        }
        // +/- — zoom about the canvas center
        if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
            state.zoom_step(true);
        }
        if i.key_pressed(egui::Key::Minus) {
            state.zoom_step(false);
        }
    });
}

fn handle_escape(state: &mut AppState) {
    if state.tools.anchor.is_some() {
        // Abandon the drawing gesture but stay in the tool.
        state.tools.clear_anchor();
    } else if state.tools.active != Tool::Pan {
        state.tools.set_tool(Tool::Pan);
    }
}
