//! Point cloud table.

use egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    let points = state.scene.loaded_points();

    ui.heading(format!("{} ({})", t("points.title"), points.len()));
    ui.add_space(4.0);

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().resizable(true))
        .column(Column::auto().resizable(true))
        .column(Column::auto().resizable(true))
        .column(Column::auto().resizable(true))
        .column(Column::remainder())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong(t("points.name"));
            });
            header.col(|ui| {
                ui.strong(t("points.east"));
            });
            header.col(|ui| {
                ui.strong(t("points.north"));
            });
            header.col(|ui| {
                ui.strong(t("points.elevation"));
            });
            header.col(|ui| {
                ui.strong(t("points.code"));
            });
        })
        .body(|body| {
            body.rows(16.0, points.len(), |mut row| {
                let point = &points[row.index()];
                row.col(|ui| {
                    if point.is_fixed {
                        ui.colored_label(egui::Color32::from_rgb(239, 68, 68), &point.name);
                    } else {
                        ui.label(&point.name);
                    }
                });
                row.col(|ui| {
                    ui.monospace(format!("{:.3}", point.x));
                });
                row.col(|ui| {
                    ui.monospace(format!("{:.3}", point.y));
                });
                row.col(|ui| {
                    ui.monospace(format!("{:.3}", point.z));
                });
                row.col(|ui| {
                    ui.label(&point.code);
                });
            });
        });
}
