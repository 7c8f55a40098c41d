use egui::Ui;

use crate::helpers::format_coord;
use crate::i18n::t;
use crate::state::tool::Tool;
use crate::state::{AppState, NoticeLevel, Remote};

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        // Connection / project header
        match state.scene.project() {
            Remote::Loaded(project) => {
                ui.colored_label(egui::Color32::from_rgb(52, 211, 153), "●");
                ui.label(&project.name);
            }
            Remote::Idle | Remote::Loading => {
                ui.colored_label(egui::Color32::GRAY, "●");
                ui.weak(t("status.connecting"));
            }
            Remote::Failed(_) => {
                ui.colored_label(egui::Color32::from_rgb(239, 68, 68), "●");
                ui.weak(t("status.offline"));
            }
        }

        ui.separator();
        ui.weak(format!(
            "{}: {}",
            t("status.points"),
            state.scene.loaded_points().len()
        ));

        ui.separator();
        let tool_label = match state.tools.active {
            Tool::Pan => t("tool.pan"),
            Tool::MovePoint => t("tool.move_point"),
            Tool::DrawLine => t("tool.draw_line"),
        };
        ui.weak(format!("{}: {tool_label}", t("status.tool")));

        if state.tools.active == Tool::DrawLine && state.tools.anchor.is_none() {
            ui.separator();
            ui.weak(t("status.draw_hint"));
        }

        // Live grid coordinate under the cursor
        if let Some(world) = state.hover_world {
            ui.separator();
            ui.monospace(format!(
                "E {}  N {}",
                format_coord(world.x),
                format_coord(world.y)
            ));
        }

        // Right-aligned: latest notice, or the version tag
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(notice) = state.notices.latest() {
                let color = match notice.level {
                    NoticeLevel::Info => egui::Color32::from_rgb(147, 197, 253),
                    NoticeLevel::Warn => egui::Color32::from_rgb(251, 191, 36),
                    NoticeLevel::Error => egui::Color32::from_rgb(248, 113, 113),
                };
                ui.colored_label(color, &notice.message);
            } else {
                ui.weak("TopoCAD v0.1");
            }
        });
    });
}
