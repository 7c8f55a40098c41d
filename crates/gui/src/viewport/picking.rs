//! Screen-space hit testing for point markers.

use glam::DVec2;
use shared::{Point, PointId};

use super::view::Viewport;

/// Pick radius in pixels around a marker center
pub const PICK_RADIUS: f64 = 10.0;

/// Find the point whose marker is nearest the cursor, within `radius_px`.
///
/// Distance is measured in screen space so picking feels the same at every
/// zoom level.
pub fn pick_point(
    points: &[Point],
    view: &Viewport,
    cursor: DVec2,
    radius_px: f64,
) -> Option<PointId> {
    let mut best: Option<(PointId, f64)> = None;
    for point in points {
        let screen = view.world_to_screen(DVec2::new(point.x, point.y));
        let dist = screen.distance(cursor);
        if dist <= radius_px && best.map_or(true, |(_, d)| dist < d) {
            best = Some((point.id, dist));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_pick_nearest_within_radius() {
        let points = vec![
            fixtures::point(1, "A", 0.0, 0.0, 0.0),
            fixtures::point(2, "B", 3.0, 0.0, 0.0),
        ];
        let view = Viewport {
            scale: 10.0,
            offset: DVec2::ZERO,
        };
        // Point 1 at (0,0), point 2 at (30,0). Cursor near point 2.
        let picked = pick_point(&points, &view, DVec2::new(28.0, 1.0), PICK_RADIUS);
        assert_eq!(picked, Some(2));
    }

    #[test]
    fn test_pick_nothing_outside_radius() {
        let points = vec![fixtures::point(1, "A", 0.0, 0.0, 0.0)];
        let view = Viewport {
            scale: 10.0,
            offset: DVec2::ZERO,
        };
        assert_eq!(pick_point(&points, &view, DVec2::new(50.0, 50.0), PICK_RADIUS), None);
    }

    #[test]
    fn test_pick_ties_resolve_to_closest() {
        let points = vec![
            fixtures::point(1, "A", 0.0, 0.0, 0.0),
            fixtures::point(2, "B", 1.0, 0.0, 0.0),
        ];
        let view = Viewport {
            scale: 10.0,
            offset: DVec2::ZERO,
        };
        // Markers at x=0px and x=10px; cursor at x=6px is inside both pick
        // circles but closer to point 2.
        assert_eq!(pick_point(&points, &view, DVec2::new(6.0, 0.0), PICK_RADIUS), Some(2));
    }

    #[test]
    fn test_pick_empty_set() {
        let view = Viewport::default();
        assert_eq!(pick_point(&[], &view, DVec2::ZERO, PICK_RADIUS), None);
    }
}
