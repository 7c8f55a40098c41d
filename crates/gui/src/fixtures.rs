//! Factory functions for creating test data.
//!
//! Convenient helpers to construct points, stations, layers, and projects
//! used by unit tests and the headless harness.

use serde_json::json;
use shared::drawing::DrawingData;
use shared::{Layer, Observation, Point, PointId, Project, Station};

/// Create a free point with a blank code
pub fn point(id: PointId, name: &str, x: f64, y: f64, z: f64) -> Point {
    Point {
        id,
        name: name.to_string(),
        x,
        y,
        z,
        code: String::new(),
        is_fixed: false,
    }
}

/// Create a fixed (benchmark) point
pub fn fixed_point(id: PointId, name: &str, x: f64, y: f64, z: f64) -> Point {
    Point {
        is_fixed: true,
        ..point(id, name, x, y, z)
    }
}

/// Create a point with a classification code
pub fn coded_point(id: PointId, name: &str, x: f64, y: f64, code: &str) -> Point {
    Point {
        code: code.to_string(),
        ..point(id, name, x, y, 0.0)
    }
}

/// Create a station occupying `occupied`, with one resolved observation per
/// target point.
pub fn station(id: i64, occupied: Point, targets: Vec<Option<Point>>) -> Station {
    let observations = targets
        .into_iter()
        .enumerate()
        .map(|(i, target)| Observation {
            id: id * 100 + i as i64,
            target_point: target,
            angle_horizontal: 0.0,
            angle_vertical: 90.0,
            is_stadia: false,
            stadia_top: None,
            stadia_middle: None,
            stadia_bottom: None,
            distance_slope: Some(10.0),
            height_target: Some(1.5),
        })
        .collect();
    Station {
        id,
        occupied_point: occupied,
        instrument_id: None,
        height_instrument: 1.5,
        backsight_angle: 0.0,
        observations,
    }
}

/// Create an empty visible layer
pub fn layer(id: i64, name: &str, color: &str) -> Layer {
    Layer {
        id,
        name: name.to_string(),
        color: color.to_string(),
        visible: true,
        drawing_data: Some(json!({"lines": []})),
    }
}

/// Create a visible layer with pre-drawn segments
pub fn layer_with_lines(id: i64, name: &str, segments: &[(PointId, PointId)]) -> Layer {
    let mut drawing = DrawingData::default();
    for &(from, to) in segments {
        drawing = drawing.append_segment(from, to);
    }
    Layer {
        id,
        name: name.to_string(),
        color: "#facc15".to_string(),
        visible: true,
        drawing_data: Some(drawing.encode()),
    }
}

/// Create a project header
pub fn project(id: i64, name: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
        location: None,
    }
}

/// A small realistic scene: a benchmark, two detail points, one station
/// sighting both, and a fence layer joining the detail points.
pub fn sample_scene() -> (Vec<Point>, Vec<Station>, Vec<Layer>) {
    let bm = fixed_point(1, "BM1", 0.0, 0.0, 100.0);
    let p2 = coded_point(2, "P2", 10.0, 10.0, "ARBOL");
    let p3 = coded_point(3, "P3", 20.0, 5.0, "POSTE");
    let st = station(1, bm.clone(), vec![Some(p2.clone()), Some(p3.clone())]);
    let fence = layer_with_lines(1, "Cercas", &[(2, 3)]);
    (vec![bm, p2, p3], vec![st], vec![fence])
}
