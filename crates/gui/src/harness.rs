//! Headless test harness for the viewer.
//!
//! Drives the same state transitions the panels do — loading collections,
//! switching tools, clicking and dragging points — without a window or a
//! backend. Mutations are captured in a list instead of being dispatched,
//! and fetch completions are applied directly as [`ApiEvent`]s.

use glam::DVec2;

use shared::{Layer, LayerId, Point, PointId, Project, Station};

use crate::api::{ApiError, ApiEvent, FetchPayload, MutationAck, MutationRequest};
use crate::state::scene::EntityKind;
use crate::state::tool::{self, DrawAction, Tool};
use crate::state::{AppSettings, AppState};
use crate::viewport::scene_list::{self, DrawList, SceneView};
use crate::{fixtures, helpers};

/// Headless harness — owns the full app state minus the window
pub struct ViewerHarness {
    pub state: AppState,
    /// Mutations captured instead of sent over the wire
    pub mutations: Vec<MutationRequest>,
    /// The drawing tool was used with no active layer
    pub layer_panel_surfaced: bool,
}

impl ViewerHarness {
    /// Create a harness for project 1 with an 800x600 canvas
    pub fn new() -> Self {
        Self {
            state: AppState::new(1, AppSettings::default()),
            mutations: Vec::new(),
            layer_panel_surfaced: false,
        }
    }

    // ── Data loading ──────────────────────────────────────────

    /// Issue any pending fetches and return the in-flight seq for `kind`.
    /// If the collection is already settled, invalidates it first so a
    /// reload always has a request to complete.
    fn fetch_seq(&mut self, kind: EntityKind) -> u64 {
        self.state.scene.pending_fetches();
        if let Some(seq) = self.state.scene.in_flight_seq(kind) {
            return seq;
        }
        self.state.scene.invalidate(kind);
        self.state.scene.pending_fetches();
        self.state
            .scene
            .in_flight_seq(kind)
            .expect("invalidated collection must have a fetch in flight")
    }

    pub fn load_project(&mut self, project: Project) {
        let seq = self.fetch_seq(EntityKind::Project);
        self.apply(ApiEvent::Fetched {
            kind: EntityKind::Project,
            seq,
            result: Ok(FetchPayload::Project(project)),
        });
    }

    /// Load points and run the once-only auto-fit, like a fresh page load
    pub fn load_points(&mut self, points: Vec<Point>) {
        let seq = self.fetch_seq(EntityKind::Points);
        self.apply(ApiEvent::Fetched {
            kind: EntityKind::Points,
            seq,
            result: Ok(FetchPayload::Points(points)),
        });
        self.state.maybe_fit_view();
    }

    pub fn load_stations(&mut self, stations: Vec<Station>) {
        let seq = self.fetch_seq(EntityKind::Stations);
        self.apply(ApiEvent::Fetched {
            kind: EntityKind::Stations,
            seq,
            result: Ok(FetchPayload::Stations(stations)),
        });
    }

    pub fn load_layers(&mut self, layers: Vec<Layer>) {
        let seq = self.fetch_seq(EntityKind::Layers);
        self.apply(ApiEvent::Fetched {
            kind: EntityKind::Layers,
            seq,
            result: Ok(FetchPayload::Layers(layers)),
        });
    }

    /// Simulate a failed stations fetch (optional collection)
    pub fn fail_stations(&mut self, err: ApiError) {
        let seq = self.fetch_seq(EntityKind::Stations);
        self.apply(ApiEvent::Fetched {
            kind: EntityKind::Stations,
            seq,
            result: Err(err),
        });
    }

    /// Load the whole sample scene from [`fixtures::sample_scene`]
    pub fn load_sample_scene(&mut self) {
        let (points, stations, layers) = fixtures::sample_scene();
        self.load_project(fixtures::project(1, "Levantamiento Finca Norte"));
        self.load_points(points);
        self.load_stations(stations);
        self.load_layers(layers);
    }

    fn apply(&mut self, event: ApiEvent) {
        if let Some(notice) = self.state.scene.apply(event) {
            self.state.notices.push(notice);
        }
    }

    // ── Gestures ──────────────────────────────────────────────

    pub fn set_tool(&mut self, tool: Tool) {
        self.state.tools.set_tool(tool);
    }

    pub fn set_active_layer(&mut self, id: Option<LayerId>) {
        self.state.scene.active_layer_id = id;
    }

    /// Click a point marker, routing the outcome exactly like the canvas
    /// panel: appends become captured mutations, a missing active layer
    /// surfaces the layer panel.
    pub fn click_point(&mut self, id: PointId) -> DrawAction {
        let layer = self.state.scene.active_layer().cloned();
        let action = self.state.tools.click_point(id, layer.as_ref());
        if action == DrawAction::NeedsLayer {
            self.layer_panel_surfaced = true;
            self.state.panels.layers = true;
        }
        if let Some(mutation) = tool::mutation_for(&action) {
            self.mutations.push(mutation);
        }
        action
    }

    /// Finish a drag of a point marker at a new world position.
    /// Returns false when the active tool does not move points.
    pub fn drag_point_to(&mut self, id: PointId, world: DVec2) -> bool {
        if self.state.tools.active != Tool::MovePoint {
            return false;
        }
        self.state.scene.set_point_xy(id, world.x, world.y);
        self.mutations.push(helpers::move_point_mutation(id, world));
        true
    }

    pub fn wheel_zoom(&mut self, cursor: DVec2, zoom_in: bool) {
        self.state.view = self.state.view.zoom_at(cursor, zoom_in);
        self.state.user_navigated = true;
    }

    pub fn pan(&mut self, delta: DVec2) {
        self.state.view = self.state.view.pan(delta);
        self.state.user_navigated = true;
    }

    // ── Completions ───────────────────────────────────────────

    /// Acknowledge the most recent captured mutation as saved
    pub fn ack_last_mutation(&mut self) {
        let Some(last) = self.mutations.last().cloned() else {
            return;
        };
        let ack = match last {
            MutationRequest::UpdatePoint { id, update } => {
                let mut point = fixtures::point(id, "P", 0.0, 0.0, 0.0);
                point.x = update.x.unwrap_or(0.0);
                point.y = update.y.unwrap_or(0.0);
                MutationAck::PointSaved(point)
            }
            MutationRequest::UpdateLayer { id, update } => {
                let mut layer = fixtures::layer(id, "Capa", "#ff0000");
                layer.drawing_data = update.drawing_data;
                MutationAck::LayerSaved(layer)
            }
            MutationRequest::CreateLayer(new_layer) => MutationAck::LayerCreated(Layer {
                id: 1000,
                name: new_layer.name,
                color: new_layer.color,
                visible: new_layer.visible,
                drawing_data: None,
            }),
        };
        self.apply(ApiEvent::Mutated { result: Ok(ack) });
    }

    /// Fail the most recent captured mutation
    pub fn fail_last_mutation(&mut self, err: ApiError) {
        self.apply(ApiEvent::Mutated { result: Err(err) });
    }

    // ── Inspection ────────────────────────────────────────────

    /// Build the current frame's draw list
    pub fn draw_list(&self, cursor: Option<DVec2>) -> DrawList {
        let scene = SceneView {
            points: self.state.scene.loaded_points(),
            stations: self.state.scene.loaded_stations(),
            layers: self.state.scene.loaded_layers(),
        };
        scene_list::build_draw_list(
            &scene,
            &self.state.view,
            &self.state.tools,
            cursor,
            self.state.settings.viewport.show_elevations,
        )
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.len()
    }
}

impl Default for ViewerHarness {
    fn default() -> Self {
        Self::new()
    }
}
