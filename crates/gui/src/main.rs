mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::api`, `crate::state`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use topocad_gui_lib::api;
pub use topocad_gui_lib::export;
pub use topocad_gui_lib::helpers;
pub use topocad_gui_lib::state;

use app::TopoApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "topocad_gui=info".into()),
        )
        .init();

    let args = parse_args();

    let settings = state::AppSettings::load();
    let base_url = args.server.unwrap_or(settings.server.base_url.clone());

    let api = match api::ApiClient::new(&base_url) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("Failed to start API runtime: {e}");
            return;
        }
    };
    tracing::info!(project = args.project, %base_url, "starting viewer");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TopoCAD — Visor Topográfico")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "topocad-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(TopoApp::new(cc, api, settings, args.project)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

struct Args {
    project: shared::ProjectId,
    server: Option<String>,
}

/// Parse `--project <id>` and `--server <url>` arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        project: 1,
        server: None,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--project" if i + 1 < args.len() => {
                match args[i + 1].parse() {
                    Ok(id) => parsed.project = id,
                    Err(_) => tracing::warn!("Invalid --project value {:?}", args[i + 1]),
                }
                i += 1;
            }
            "--server" if i + 1 < args.len() => {
                parsed.server = Some(args[i + 1].clone());
                i += 1;
            }
            other => tracing::warn!("Ignoring unknown argument {other:?}"),
        }
        i += 1;
    }
    parsed
}
