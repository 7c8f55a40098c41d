//! Pure draw-list builder: scene data + viewport + tool state in, a flat
//! list of screen-space shapes out.
//!
//! Painting happens in screen space, so stroke widths, marker radii, and
//! font sizes are constant in pixels and stay visually identical at every
//! zoom level. The painter draws the lists in struct order: radiations at
//! the back, then layer lines, then markers and labels on top.

use glam::DVec2;
use shared::drawing::{self, DrawingData};
use shared::{Layer, Point, PointId, Station};

use super::classify;
use super::view::Viewport;
use crate::helpers;
use crate::state::tool::{Tool, ToolState};

pub const MARKER_RADIUS: f64 = 4.0;
pub const FIXED_MARKER_RADIUS: f64 = 6.0;
pub const ANCHOR_RING_RADIUS: f64 = 9.0;

/// Fill for the marker currently anchoring a drawing gesture
pub const ANCHOR_FILL: [u8; 3] = [250, 204, 21];
/// Dashed sight-line color
pub const RADIATION_COLOR: [u8; 3] = [100, 116, 139];

/// Borrowed view of the loaded scene collections
#[derive(Clone, Copy)]
pub struct SceneView<'a> {
    pub points: &'a [Point],
    pub stations: &'a [Station],
    pub layers: &'a [Layer],
}

/// A plain screen-space segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
}

/// A manual layer segment in the layer's color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerLine {
    pub a: DVec2,
    pub b: DVec2,
    pub color: [u8; 3],
}

/// A point marker
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub point_id: PointId,
    pub at: DVec2,
    pub radius: f64,
    pub fill: [u8; 3],
    pub is_anchor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Name,
    Elevation,
}

/// A text label anchored near a marker
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub at: DVec2,
    pub text: String,
    pub kind: LabelKind,
}

/// Everything one frame draws, in paint order
#[derive(Debug, Default)]
pub struct DrawList {
    pub radiations: Vec<Segment>,
    pub layer_lines: Vec<LayerLine>,
    pub rubber_band: Option<Segment>,
    pub anchor_ring: Option<DVec2>,
    pub markers: Vec<Marker>,
    pub labels: Vec<Label>,
}

/// Build the frame's draw list.
///
/// `cursor` is the pointer position in screen space, used only for the
/// rubber-band preview while a drawing anchor is armed.
pub fn build_draw_list(
    scene: &SceneView<'_>,
    view: &Viewport,
    tools: &ToolState,
    cursor: Option<DVec2>,
    show_elevations: bool,
) -> DrawList {
    let mut list = DrawList::default();

    // Sight-line radiations (background)
    for (from, to) in helpers::station_sights(scene.stations) {
        list.radiations.push(Segment {
            a: view.world_to_screen(from),
            b: view.world_to_screen(to),
        });
    }

    // Manual layer segments; dangling references are skipped silently
    let by_id = drawing::index_points(scene.points);
    for layer in scene.layers {
        if !layer.visible {
            continue;
        }
        let color = classify::parse_hex_color(&layer.color).unwrap_or(classify::DEFAULT_COLOR);
        let data = DrawingData::decode(layer.drawing_data.as_ref());
        for line in &data.lines {
            if let Some((p1, p2)) = drawing::resolve_segment(line, &by_id) {
                list.layer_lines.push(LayerLine {
                    a: view.world_to_screen(helpers::point_xy(p1)),
                    b: view.world_to_screen(helpers::point_xy(p2)),
                    color,
                });
            }
        }
    }

    // Drawing-in-progress feedback
    let anchor = (tools.active == Tool::DrawLine)
        .then_some(tools.anchor)
        .flatten();
    if let Some(anchor_id) = anchor {
        if let Some(point) = scene.points.iter().find(|p| p.id == anchor_id) {
            let at = view.world_to_screen(helpers::point_xy(point));
            list.anchor_ring = Some(at);
            if let Some(cursor) = cursor {
                list.rubber_band = Some(Segment { a: at, b: cursor });
            }
        }
    }

    // Markers + labels (foreground, never obscured by lines)
    for point in scene.points {
        let at = view.world_to_screen(helpers::point_xy(point));
        let is_anchor = anchor == Some(point.id);
        let radius = if point.is_fixed {
            FIXED_MARKER_RADIUS
        } else {
            MARKER_RADIUS
        };
        let fill = if is_anchor {
            ANCHOR_FILL
        } else {
            classify::point_color(&point.code)
        };
        list.markers.push(Marker {
            point_id: point.id,
            at,
            radius,
            fill,
            is_anchor,
        });

        list.labels.push(Label {
            at: at + DVec2::new(radius + 3.0, -(radius + 3.0)),
            text: point.name.clone(),
            kind: LabelKind::Name,
        });
        if show_elevations {
            list.labels.push(Label {
                at: at + DVec2::new(radius + 3.0, 3.0),
                text: format!("{:.2}", point.z),
                kind: LabelKind::Elevation,
            });
        }
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn draw(
        points: &[Point],
        stations: &[Station],
        layers: &[Layer],
        tools: &ToolState,
    ) -> DrawList {
        let scene = SceneView {
            points,
            stations,
            layers,
        };
        build_draw_list(&scene, &Viewport::default(), tools, None, true)
    }

    #[test]
    fn test_sample_scene_shapes() {
        let (points, stations, layers) = fixtures::sample_scene();
        let list = draw(&points, &stations, &layers, &ToolState::default());

        assert_eq!(list.radiations.len(), 2);
        assert_eq!(list.layer_lines.len(), 1);
        assert_eq!(list.markers.len(), 3);
        // One name label per point plus one elevation label per point.
        assert_eq!(list.labels.len(), 6);
        assert!(list.anchor_ring.is_none());
        assert!(list.rubber_band.is_none());
    }

    #[test]
    fn test_elevation_labels_can_be_disabled() {
        let (points, stations, layers) = fixtures::sample_scene();
        let scene = SceneView {
            points: &points,
            stations: &stations,
            layers: &layers,
        };
        let list = build_draw_list(&scene, &Viewport::default(), &ToolState::default(), None, false);
        assert!(list.labels.iter().all(|l| l.kind == LabelKind::Name));
        assert_eq!(list.labels.len(), 3);
    }

    #[test]
    fn test_dangling_segment_is_skipped_not_fatal() {
        // Layer references point 2, which is gone from the point set.
        let points = vec![fixtures::point(1, "A", 0.0, 0.0, 0.0)];
        let layers = vec![fixtures::layer_with_lines(1, "Cercas", &[(1, 2)])];
        let list = draw(&points, &[], &layers, &ToolState::default());
        assert!(list.layer_lines.is_empty());
        assert_eq!(list.markers.len(), 1);
    }

    #[test]
    fn test_hidden_layer_not_drawn() {
        let points = vec![
            fixtures::point(1, "A", 0.0, 0.0, 0.0),
            fixtures::point(2, "B", 5.0, 5.0, 0.0),
        ];
        let mut layer = fixtures::layer_with_lines(1, "Cercas", &[(1, 2)]);
        layer.visible = false;
        let list = draw(&points, &[], &[layer], &ToolState::default());
        assert!(list.layer_lines.is_empty());
    }

    #[test]
    fn test_unresolved_observations_draw_no_radiation() {
        let occupied = fixtures::fixed_point(1, "E1", 0.0, 0.0, 100.0);
        let stations = vec![fixtures::station(1, occupied.clone(), vec![None, None])];
        let list = draw(&[occupied], &stations, &[], &ToolState::default());
        assert!(list.radiations.is_empty());
    }

    #[test]
    fn test_fixed_points_get_bigger_markers() {
        let points = vec![
            fixtures::fixed_point(1, "BM", 0.0, 0.0, 0.0),
            fixtures::point(2, "P", 1.0, 1.0, 0.0),
        ];
        let list = draw(&points, &[], &[], &ToolState::default());
        assert_eq!(list.markers[0].radius, FIXED_MARKER_RADIUS);
        assert_eq!(list.markers[1].radius, MARKER_RADIUS);
    }

    #[test]
    fn test_code_drives_marker_color() {
        let points = vec![fixtures::coded_point(1, "T1", 0.0, 0.0, "arbol")];
        let list = draw(&points, &[], &[], &ToolState::default());
        assert_eq!(list.markers[0].fill, classify::point_color("ARBOL"));
    }

    #[test]
    fn test_anchor_ring_and_highlight_while_drawing() {
        let points = vec![
            fixtures::point(1, "A", 0.0, 0.0, 0.0),
            fixtures::point(2, "B", 5.0, 5.0, 0.0),
        ];
        let layer = fixtures::layer(1, "Cercas", "#ff0000");
        let mut tools = ToolState::default();
        tools.set_tool(Tool::DrawLine);
        tools.click_point(1, Some(&layer));

        let scene = SceneView {
            points: &points,
            stations: &[],
            layers: &[],
        };
        let cursor = DVec2::new(40.0, 40.0);
        let list = build_draw_list(&scene, &Viewport::default(), &tools, Some(cursor), true);

        let ring = list.anchor_ring.expect("anchor ring");
        let band = list.rubber_band.expect("rubber band");
        assert_eq!(band.a, ring);
        assert_eq!(band.b, cursor);
        let anchor_marker = list.markers.iter().find(|m| m.point_id == 1).unwrap();
        assert!(anchor_marker.is_anchor);
        assert_eq!(anchor_marker.fill, ANCHOR_FILL);
    }

    #[test]
    fn test_anchor_for_missing_point_is_harmless() {
        let layer = fixtures::layer(1, "Cercas", "#ff0000");
        let mut tools = ToolState::default();
        tools.set_tool(Tool::DrawLine);
        tools.click_point(42, Some(&layer));

        let list = draw(&[], &[], &[], &tools);
        assert!(list.anchor_ring.is_none());
        assert!(list.rubber_band.is_none());
    }
}
