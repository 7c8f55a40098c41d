use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Es,
    En,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Es (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Es,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Es => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let es = lang() == Lang::Es;
    match key {
        // ── Tools ───────────────────────────────────────────
        "tool.pan" => if es { "Mover vista" } else { "Pan" },
        "tool.move_point" => if es { "Mover punto" } else { "Move point" },
        "tool.draw_line" => if es { "Dibujar línea" } else { "Draw line" },

        // ── Toolbar ─────────────────────────────────────────
        "toolbar.zoom_in" => if es { "Acercar" } else { "Zoom in" },
        "toolbar.zoom_out" => if es { "Alejar" } else { "Zoom out" },
        "toolbar.fit" => if es { "Encuadrar" } else { "Fit view" },
        "toolbar.layers" => if es { "Capas" } else { "Layers" },
        "toolbar.points" => if es { "Puntos" } else { "Points" },
        "toolbar.elevations" => if es { "Cotas" } else { "Elevations" },
        "toolbar.export" => if es { "Exportar CSV" } else { "Export CSV" },

        // ── Status bar ──────────────────────────────────────
        "status.connected" => if es { "Conectado" } else { "Connected" },
        "status.connecting" => if es { "Conectando..." } else { "Connecting..." },
        "status.offline" => if es { "Sin conexión" } else { "Offline" },
        "status.points" => if es { "Puntos" } else { "Points" },
        "status.tool" => if es { "Herramienta" } else { "Tool" },
        "status.loading" => if es { "Cargando datos..." } else { "Loading data..." },
        "status.load_error" => if es { "No se pudieron cargar los puntos" } else { "Could not load points" },
        "status.draw_hint" => if es { "Clic en un punto para anclar; clic en otro para trazar" } else { "Click a point to anchor; click another to draw" },

        // ── Layer panel ─────────────────────────────────────
        "layers.title" => if es { "Capas de dibujo" } else { "Drawing layers" },
        "layers.empty" => if es { "Este proyecto aún no tiene capas" } else { "This project has no layers yet" },
        "layers.visible" => if es { "Visible" } else { "Visible" },
        "layers.set_active" => if es { "Usar como capa activa" } else { "Use as active layer" },
        "layers.segments" => if es { "líneas" } else { "lines" },
        "layers.new" => if es { "Nueva capa" } else { "New layer" },
        "layers.name" => if es { "Nombre" } else { "Name" },
        "layers.color" => if es { "Color" } else { "Color" },
        "layers.create" => if es { "Crear" } else { "Create" },

        // ── Point table ─────────────────────────────────────
        "points.title" => if es { "Nube de puntos" } else { "Point cloud" },
        "points.name" => if es { "Nombre" } else { "Name" },
        "points.east" => if es { "Este (X)" } else { "East (X)" },
        "points.north" => if es { "Norte (Y)" } else { "North (Y)" },
        "points.elevation" => if es { "Cota (Z)" } else { "Elev (Z)" },
        "points.code" => if es { "Código" } else { "Code" },

        // ── Notices ─────────────────────────────────────────
        "notice.need_layer" => if es { "Selecciona una capa activa antes de dibujar" } else { "Choose an active layer before drawing" },
        "notice.no_points" => if es { "No hay puntos para exportar" } else { "No points to export" },
        "notice.export_done" => if es { "Puntos exportados" } else { "Points exported" },
        "notice.export_failed" => if es { "No se pudo exportar" } else { "Export failed" },

        _ => {
            tracing::debug!("missing i18n key: {key}");
            ""
        }
    }
}
