//! Main application module

mod keyboard;
mod styles;

use eframe::egui;
use shared::ProjectId;

use crate::api::ApiClient;
use crate::state::{AppSettings, AppState};
use crate::ui::layer_panel::{self, LayerForm};
use crate::ui::{points_panel, status_bar, toolbar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct TopoApp {
    state: AppState,
    viewport: ViewportPanel,
    api: ApiClient,
    layer_form: LayerForm,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl TopoApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        mut api: ApiClient,
        settings: AppSettings,
        project_id: ProjectId,
    ) -> Self {
        styles::configure_styles(&cc.egui_ctx, settings.ui.font_size);

        // Completions arrive on a background thread; wake the UI so they
        // are folded in promptly even when the app is idle.
        let ctx = cc.egui_ctx.clone();
        api.set_waker(move || ctx.request_repaint());

        let last_font_size = settings.ui.font_size;
        Self {
            state: AppState::new(project_id, settings),
            viewport: ViewportPanel::new(),
            api,
            layer_form: LayerForm::default(),
            last_font_size,
        }
    }
}

impl eframe::App for TopoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        // Fold in backend completions, then issue whatever the cache wants
        // refreshed. Mutation completions mark collections stale, so their
        // refetches go out on this same frame.
        for event in self.api.poll() {
            if let Some(notice) = self.state.scene.apply(event) {
                self.state.notices.push(notice);
            }
        }
        for req in self.state.scene.pending_fetches() {
            self.api.fetch(req);
        }
        self.state.notices.prune();

        keyboard::handle_keyboard(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Right panel: layers ──────────────────────────────
        if self.state.panels.layers {
            egui::SidePanel::right("layer_panel")
                .default_width(250.0)
                .width_range(200.0..=400.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    layer_panel::show(ui, &mut self.state, &self.api, &mut self.layer_form);
                });
        }

        // ── Left panel: point table ──────────────────────────
        if self.state.panels.points {
            egui::SidePanel::left("points_panel")
                .default_width(330.0)
                .width_range(240.0..=500.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    points_panel::show(ui, &self.state);
                });
        }

        // ── Central panel: canvas ────────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state, &self.api);
            });
    }
}
