//! Painting: maps a [`DrawList`](super::scene_list::DrawList) to egui
//! painter calls.
//!
//! The draw list is already in canvas-relative screen space with constant
//! pixel sizes, so painting is a straight translation by the canvas origin,
//! in list order: radiations, layer lines, drawing feedback, markers,
//! labels.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Stroke};
use glam::DVec2;

use super::scene_list::{DrawList, LabelKind, ANCHOR_FILL, ANCHOR_RING_RADIUS, RADIATION_COLOR};

const DASH_LEN: f32 = 4.0;
const GAP_LEN: f32 = 4.0;

pub fn paint_scene(painter: &egui::Painter, rect: Rect, list: &DrawList, label_font: f32) {
    let origin = rect.min;
    let to_pos = |v: DVec2| Pos2::new(origin.x + v.x as f32, origin.y + v.y as f32);

    // Sight-line radiations (dashed, background)
    let radiation_stroke = Stroke::new(1.0, rgb(RADIATION_COLOR));
    for seg in &list.radiations {
        painter.extend(egui::Shape::dashed_line(
            &[to_pos(seg.a), to_pos(seg.b)],
            radiation_stroke,
            DASH_LEN,
            GAP_LEN,
        ));
    }

    // Manual layer segments (solid, layer color)
    for line in &list.layer_lines {
        painter.line_segment(
            [to_pos(line.a), to_pos(line.b)],
            Stroke::new(1.5, rgb(line.color)),
        );
    }

    // Drawing-in-progress feedback
    if let Some(band) = &list.rubber_band {
        painter.extend(egui::Shape::dashed_line(
            &[to_pos(band.a), to_pos(band.b)],
            Stroke::new(1.0, rgb(ANCHOR_FILL)),
            DASH_LEN,
            GAP_LEN,
        ));
    }
    if let Some(ring) = list.anchor_ring {
        painter.circle_stroke(
            to_pos(ring),
            ANCHOR_RING_RADIUS as f32,
            Stroke::new(2.0, rgb(ANCHOR_FILL)),
        );
    }

    // Point markers (foreground)
    for marker in &list.markers {
        painter.circle_filled(to_pos(marker.at), marker.radius as f32, rgb(marker.fill));
    }

    // Labels
    for label in &list.labels {
        let (size, color, align) = match label.kind {
            LabelKind::Name => (label_font, Color32::from_rgb(226, 232, 240), Align2::LEFT_BOTTOM),
            LabelKind::Elevation => (
                label_font * 0.85,
                Color32::from_rgb(148, 163, 184),
                Align2::LEFT_TOP,
            ),
        };
        painter.text(
            to_pos(label.at),
            align,
            &label.text,
            FontId::proportional(size),
            color,
        );
    }
}

/// Centered loading / blocked-state message
pub fn paint_center_message(painter: &egui::Painter, rect: Rect, message: &str) {
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        message,
        FontId::proportional(13.0),
        Color32::from_rgb(100, 116, 139),
    );
}

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}
