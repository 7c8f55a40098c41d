//! Layer management panel: visibility, active-layer selection, creation.

use egui::Ui;

use shared::drawing::DrawingData;
use shared::{LayerUpdate, NewLayer};

use crate::api::{ApiClient, MutationRequest};
use crate::i18n::t;
use crate::state::{AppState, Remote};
use crate::viewport::classify;

/// Transient new-layer form state
pub struct LayerForm {
    pub name: String,
    pub color: String,
}

impl Default for LayerForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: "#facc15".to_string(),
        }
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState, api: &ApiClient, form: &mut LayerForm) {
    ui.heading(t("layers.title"));
    ui.add_space(4.0);

    match state.scene.layers() {
        Remote::Idle | Remote::Loading => {
            ui.spinner();
            return;
        }
        Remote::Failed(_) | Remote::Loaded(_) => {}
    }

    let layers = state.scene.loaded_layers().to_vec();
    if layers.is_empty() {
        ui.weak(t("layers.empty"));
    }

    for layer in &layers {
        ui.horizontal(|ui| {
            // Color swatch
            let (swatch, _) =
                ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            let color = classify::parse_hex_color(&layer.color).unwrap_or(classify::DEFAULT_COLOR);
            ui.painter().rect_filled(
                swatch,
                2.0,
                egui::Color32::from_rgb(color[0], color[1], color[2]),
            );

            // Visibility toggle sends only the changed field
            let mut visible = layer.visible;
            if ui
                .checkbox(&mut visible, "")
                .on_hover_text(t("layers.visible"))
                .changed()
            {
                api.dispatch(MutationRequest::UpdateLayer {
                    id: layer.id,
                    update: LayerUpdate {
                        visible: Some(visible),
                        ..Default::default()
                    },
                });
            }

            let active = state.scene.active_layer_id == Some(layer.id);
            if ui
                .selectable_label(active, &layer.name)
                .on_hover_text(t("layers.set_active"))
                .clicked()
            {
                state.scene.active_layer_id = if active { None } else { Some(layer.id) };
            }

            let segment_count = DrawingData::decode(layer.drawing_data.as_ref()).lines.len();
            ui.weak(format!("{segment_count} {}", t("layers.segments")));
        });
    }

    ui.add_space(8.0);
    ui.separator();
    ui.strong(t("layers.new"));

    ui.horizontal(|ui| {
        ui.label(t("layers.name"));
        ui.text_edit_singleline(&mut form.name);
    });
    ui.horizontal(|ui| {
        ui.label(t("layers.color"));
        ui.text_edit_singleline(&mut form.color);
    });

    let valid = !form.name.trim().is_empty();
    if ui
        .add_enabled(valid, egui::Button::new(t("layers.create")))
        .clicked()
    {
        api.dispatch(MutationRequest::CreateLayer(NewLayer {
            project_id: state.scene.project_id,
            name: form.name.trim().to_string(),
            color: form.color.trim().to_string(),
            visible: true,
        }));
        form.name.clear();
    }
}
