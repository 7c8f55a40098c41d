//! Toolbar: tool selection, zoom actions, panel toggles, export.

use egui::Ui;

use crate::export;
use crate::i18n::{self, t};
use crate::state::tool::Tool;
use crate::state::{AppState, Notice};

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        tool_button(ui, state, Tool::Pan, t("tool.pan"), "P");
        tool_button(ui, state, Tool::MovePoint, t("tool.move_point"), "M");
        tool_button(ui, state, Tool::DrawLine, t("tool.draw_line"), "L");

        ui.separator();

        if ui.button("−").on_hover_text(t("toolbar.zoom_out")).clicked() {
            state.zoom_step(false);
        }
        if ui.button("+").on_hover_text(t("toolbar.zoom_in")).clicked() {
            state.zoom_step(true);
        }
        if ui.button(t("toolbar.fit")).on_hover_text("F").clicked() {
            state.fit_view();
        }

        ui.separator();

        if ui
            .selectable_label(state.panels.layers, t("toolbar.layers"))
            .clicked()
        {
            state.panels.layers = !state.panels.layers;
        }
        if ui
            .selectable_label(state.panels.points, t("toolbar.points"))
            .clicked()
        {
            state.panels.points = !state.panels.points;
        }

        let mut show_elevations = state.settings.viewport.show_elevations;
        if ui
            .checkbox(&mut show_elevations, t("toolbar.elevations"))
            .changed()
        {
            state.settings.viewport.show_elevations = show_elevations;
            state.settings.save();
        }

        ui.separator();

        if ui.button(t("toolbar.export")).clicked() {
            export_points(state);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let current = i18n::lang();
            if ui.selectable_label(current == i18n::Lang::En, "EN").clicked() {
                i18n::set_lang(i18n::Lang::En);
            }
            if ui.selectable_label(current == i18n::Lang::Es, "ES").clicked() {
                i18n::set_lang(i18n::Lang::Es);
            }
        });
    });
}

fn tool_button(ui: &mut Ui, state: &mut AppState, tool: Tool, label: &str, shortcut: &str) {
    let selected = state.tools.active == tool;
    if ui
        .selectable_label(selected, label)
        .on_hover_text(shortcut)
        .clicked()
    {
        state.tools.set_tool(tool);
    }
}

/// Save the current point cloud as CSV via a file dialog
fn export_points(state: &mut AppState) {
    let points = state.scene.loaded_points().to_vec();
    if points.is_empty() {
        state.notices.push(Notice::warn(t("notice.no_points")));
        return;
    }

    let Some(path) = rfd::FileDialog::new()
        .set_file_name("puntos.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    let result = std::fs::File::create(&path)
        .and_then(|file| export::write_points_csv(&points, file));
    match result {
        Ok(()) => {
            tracing::info!(?path, count = points.len(), "points exported");
            state.notices.push(Notice::info(t("notice.export_done")));
        }
        Err(e) => {
            tracing::error!(?path, %e, "CSV export failed");
            state
                .notices
                .push(Notice::error(format!("{}: {e}", t("notice.export_failed"))));
        }
    }
}
