//! Canvas panel: routes pointer input per tool and paints the scene.

mod renderer;

pub use topocad_gui_lib::viewport::{classify, picking, scene_list, view};

use eframe::egui;
use glam::DVec2;

use shared::PointId;

use crate::api::ApiClient;
use crate::helpers;
use crate::i18n::t;
use crate::state::tool::{self, DrawAction, Tool};
use crate::state::{AppState, Notice, Remote};
use picking::PICK_RADIUS;
use scene_list::SceneView;

/// Canvas panel. Viewport math lives in [`view::Viewport`] inside the app
/// state; this struct only keeps per-gesture transients.
pub struct ViewportPanel {
    /// Point being dragged with the move tool
    drag_point: Option<PointId>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self { drag_point: None }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, api: &ApiClient) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        state.viewport_px = DVec2::new(rect.width() as f64, rect.height() as f64);
        state.maybe_fit_view();

        // Positions are canvas-relative: (0,0) is the canvas top-left.
        let to_canvas =
            |p: egui::Pos2| DVec2::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64);
        let hover = response.hover_pos().map(to_canvas);
        let pointer = response.interact_pointer_pos().map(to_canvas).or(hover);

        state.hover_world = hover.map(|c| state.view.screen_to_world(c));
        state.hover_point = hover.and_then(|c| {
            picking::pick_point(state.scene.loaded_points(), &state.view, c, PICK_RADIUS)
        });

        self.set_cursor_icon(ui, state, &response);

        // ── Scroll zoom (anchored to the cursor) ─────────────
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll.abs() > 0.1 {
            if let Some(cursor) = hover {
                state.view = state.view.zoom_at(cursor, scroll > 0.0);
                state.user_navigated = true;
            }
        }

        self.handle_drag(&response, pointer, state, api);
        self.handle_click(&response, pointer, state, api);

        if !ui.is_rect_visible(rect) {
            return;
        }
        self.paint(ui, rect, hover, state);
    }

    fn set_cursor_icon(&self, ui: &egui::Ui, state: &AppState, response: &egui::Response) {
        if !response.hovered() && !response.dragged() {
            return;
        }
        let icon = match state.tools.active {
            Tool::Pan => {
                if response.dragged() {
                    egui::CursorIcon::Grabbing
                } else {
                    egui::CursorIcon::Grab
                }
            }
            Tool::MovePoint => egui::CursorIcon::Move,
            Tool::DrawLine => egui::CursorIcon::Crosshair,
        };
        ui.ctx().set_cursor_icon(icon);
    }

    fn handle_drag(
        &mut self,
        response: &egui::Response,
        pointer: Option<DVec2>,
        state: &mut AppState,
        api: &ApiClient,
    ) {
        match state.tools.active {
            // The canvas itself is draggable
            Tool::Pan => {
                if response.dragged_by(egui::PointerButton::Primary) {
                    let delta = response.drag_delta();
                    state.view = state.view.pan(DVec2::new(delta.x as f64, delta.y as f64));
                    state.user_navigated = true;
                }
            }
            // Individual markers are draggable; the canvas is not
            Tool::MovePoint => {
                if response.drag_started_by(egui::PointerButton::Primary) {
                    self.drag_point = pointer.and_then(|c| {
                        picking::pick_point(state.scene.loaded_points(), &state.view, c, PICK_RADIUS)
                    });
                }
                if let Some(id) = self.drag_point {
                    if response.dragged_by(egui::PointerButton::Primary) {
                        if let Some(cursor) = pointer {
                            // Local echo: the marker follows the cursor.
                            let world = state.view.screen_to_world(cursor);
                            state.scene.set_point_xy(id, world.x, world.y);
                        }
                    }
                    if response.drag_stopped() {
                        // Persist the echoed position; the refetch triggered
                        // by the ack is the authoritative correction.
                        if let Some(point) =
                            state.scene.loaded_points().iter().find(|p| p.id == id)
                        {
                            tracing::info!(point = id, x = point.x, y = point.y, "point move");
                            api.dispatch(helpers::move_point_mutation(id, helpers::point_xy(point)));
                        }
                        self.drag_point = None;
                    }
                }
            }
            Tool::DrawLine => {}
        }
    }

    fn handle_click(
        &mut self,
        response: &egui::Response,
        pointer: Option<DVec2>,
        state: &mut AppState,
        api: &ApiClient,
    ) {
        if state.tools.active != Tool::DrawLine || !response.clicked() {
            return;
        }
        let Some(cursor) = pointer else {
            return;
        };
        let Some(point_id) =
            picking::pick_point(state.scene.loaded_points(), &state.view, cursor, PICK_RADIUS)
        else {
            return;
        };

        let layer = state.scene.active_layer().cloned();
        let action = state.tools.click_point(point_id, layer.as_ref());
        if action == DrawAction::NeedsLayer {
            state.panels.layers = true;
            state.notices.push(Notice::warn(t("notice.need_layer")));
        }
        if let Some(mutation) = tool::mutation_for(&action) {
            api.dispatch(mutation);
        }
    }

    fn paint(
        &self,
        ui: &egui::Ui,
        rect: egui::Rect,
        hover: Option<DVec2>,
        state: &AppState,
    ) {
        let painter = ui.painter_at(rect);
        let bg = state.settings.viewport.background_color;
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(bg[0], bg[1], bg[2]));

        // Points are required: no partial scene without them.
        match state.scene.points() {
            Remote::Idle | Remote::Loading => {
                renderer::paint_center_message(&painter, rect, t("status.loading"));
                return;
            }
            Remote::Failed(_) => {
                renderer::paint_center_message(&painter, rect, t("status.load_error"));
                return;
            }
            Remote::Loaded(_) => {}
        }

        let scene = SceneView {
            points: state.scene.loaded_points(),
            stations: state.scene.loaded_stations(),
            layers: state.scene.loaded_layers(),
        };
        let list = scene_list::build_draw_list(
            &scene,
            &state.view,
            &state.tools,
            hover,
            state.settings.viewport.show_elevations,
        );
        renderer::paint_scene(
            &painter,
            rect,
            &list,
            state.settings.viewport.label_font_size,
        );
    }
}
