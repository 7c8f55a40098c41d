//! Small shared helpers for the viewer.

use glam::DVec2;
use shared::{Point, PointUpdate, Station};

use crate::api::MutationRequest;

/// World-plane position of a point
pub fn point_xy(point: &Point) -> DVec2 {
    DVec2::new(point.x, point.y)
}

/// Sight lines (radiations): one world-space segment per observation with a
/// resolved target, from the station's occupied point to the target.
pub fn station_sights(stations: &[Station]) -> Vec<(DVec2, DVec2)> {
    let mut sights = Vec::new();
    for station in stations {
        let from = point_xy(&station.occupied_point);
        for obs in &station.observations {
            if let Some(target) = &obs.target_point {
                sights.push((from, point_xy(target)));
            }
        }
    }
    sights
}

/// Mutation for a drag-to-move gesture: x/y only, elevation untouched
pub fn move_point_mutation(point_id: shared::PointId, world: DVec2) -> MutationRequest {
    MutationRequest::UpdatePoint {
        id: point_id,
        update: PointUpdate {
            x: Some(world.x),
            y: Some(world.y),
            ..Default::default()
        },
    }
}

/// Grid coordinate formatting for the status bar readout
pub fn format_coord(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_station_sights_skip_unresolved_targets() {
        let occupied = fixtures::fixed_point(1, "E1", 0.0, 0.0, 100.0);
        let target = fixtures::point(2, "P2", 10.0, 10.0, 99.0);
        let st = fixtures::station(1, occupied, vec![Some(target), None, None]);

        let sights = station_sights(&[st]);
        assert_eq!(sights.len(), 1);
        assert_eq!(sights[0].0, DVec2::new(0.0, 0.0));
        assert_eq!(sights[0].1, DVec2::new(10.0, 10.0));
    }

    #[test]
    fn test_move_mutation_leaves_elevation_alone() {
        match move_point_mutation(3, DVec2::new(7.5, -2.25)) {
            MutationRequest::UpdatePoint { id, update } => {
                assert_eq!(id, 3);
                assert_eq!(update.x, Some(7.5));
                assert_eq!(update.y, Some(-2.25));
                assert!(update.z.is_none());
                assert!(update.name.is_none());
            }
            other => panic!("unexpected mutation {other:?}"),
        }
    }

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(1000.0), "1000.00");
        assert_eq!(format_coord(-3.456), "-3.46");
    }
}
