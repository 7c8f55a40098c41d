pub mod notices;
pub mod scene;
pub mod settings;
pub mod tool;

use glam::DVec2;
use shared::{PointId, ProjectId};

pub use notices::{Notice, NoticeLevel, NoticeLog};
pub use scene::{EntityKind, Remote, SceneCache};
pub use settings::AppSettings;
pub use tool::{DrawAction, Tool, ToolState};

use crate::viewport::view::Viewport;

/// Margin around the data extent when fitting, in pixels
pub const FIT_PADDING: f64 = 50.0;

/// Panel visibility flags
#[derive(Debug, Default)]
pub struct PanelVisibility {
    pub layers: bool,
    pub points: bool,
}

/// Combined application state
pub struct AppState {
    pub scene: SceneCache,
    pub tools: ToolState,
    pub notices: NoticeLog,
    pub panels: PanelVisibility,
    pub settings: AppSettings,
    pub view: Viewport,
    /// Auto-fit already ran for this session's data
    pub view_fitted: bool,
    /// The user has zoomed or panned; reloads must not reset the view
    pub user_navigated: bool,
    /// Canvas size from the last frame, for toolbar zoom/fit actions
    pub viewport_px: DVec2,
    /// World coordinate under the cursor (status bar readout)
    pub hover_world: Option<DVec2>,
    /// Point marker under the cursor
    pub hover_point: Option<PointId>,
}

impl AppState {
    pub fn new(project_id: ProjectId, settings: AppSettings) -> Self {
        Self {
            scene: SceneCache::new(project_id),
            tools: ToolState::default(),
            notices: NoticeLog::default(),
            panels: PanelVisibility::default(),
            settings,
            view: Viewport::default(),
            view_fitted: false,
            user_navigated: false,
            viewport_px: DVec2::new(800.0, 600.0),
            hover_world: None,
            hover_point: None,
        }
    }

    /// Auto-fit exactly once per fresh data load. A refetch after a mutation
    /// lands here again, but the guard flags keep the view untouched.
    pub fn maybe_fit_view(&mut self) {
        if self.view_fitted || self.user_navigated {
            return;
        }
        if let Some(points) = self.scene.points().loaded() {
            self.view = Viewport::fit(
                points.iter().map(|p| DVec2::new(p.x, p.y)),
                self.viewport_px.x,
                self.viewport_px.y,
                FIT_PADDING,
            );
            self.view_fitted = true;
        }
    }

    /// Explicit fit request (toolbar button / F key)
    pub fn fit_view(&mut self) {
        self.view = Viewport::fit(
            self.scene.loaded_points().iter().map(|p| DVec2::new(p.x, p.y)),
            self.viewport_px.x,
            self.viewport_px.y,
            FIT_PADDING,
        );
        self.view_fitted = true;
    }

    /// Toolbar zoom buttons zoom about the canvas center
    pub fn zoom_step(&mut self, zoom_in: bool) {
        self.view = self.view.zoom_at(self.viewport_px / 2.0, zoom_in);
        self.user_navigated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiEvent, FetchPayload};
    use crate::fixtures;

    fn state_with_points(points: Vec<shared::Point>) -> AppState {
        let mut state = AppState::new(1, AppSettings::default());
        let reqs = state.scene.pending_fetches();
        let seq = reqs.iter().find(|r| r.kind == EntityKind::Points).unwrap().seq;
        state.scene.apply(ApiEvent::Fetched {
            kind: EntityKind::Points,
            seq,
            result: Ok(FetchPayload::Points(points)),
        });
        state
    }

    #[test]
    fn test_auto_fit_runs_once() {
        let mut state = state_with_points(vec![
            fixtures::point(1, "A", 0.0, 0.0, 0.0),
            fixtures::point(2, "B", 10.0, 10.0, 0.0),
        ]);
        state.maybe_fit_view();
        assert!(state.view_fitted);
        let fitted = state.view;

        // A later pass (e.g. after a refetch) leaves the view alone.
        state.view = state.view.pan(glam::DVec2::new(100.0, 0.0));
        state.maybe_fit_view();
        assert_ne!(state.view, fitted);
    }

    #[test]
    fn test_no_fit_after_user_navigation() {
        let mut state = state_with_points(vec![fixtures::point(1, "A", 0.0, 0.0, 0.0)]);
        state.user_navigated = true;
        let before = state.view;
        state.maybe_fit_view();
        assert_eq!(state.view, before);
        assert!(!state.view_fitted);
    }

    #[test]
    fn test_zoom_step_marks_navigation() {
        let mut state = AppState::new(1, AppSettings::default());
        state.zoom_step(true);
        assert!(state.user_navigated);
        assert!(state.view.scale > Viewport::default().scale);
    }
}
