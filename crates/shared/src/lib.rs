//! Wire data model shared between the viewer and the topography backend.
//!
//! Field names follow the backend JSON (camelCase). Every entity id is
//! backend-issued; the client never fabricates identifiers.

pub mod drawing;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backend-issued entity identifiers
pub type PointId = i64;
pub type StationId = i64;
pub type LayerId = i64;
pub type ProjectId = i64;

/// A surveying project (header data only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// A surveyed or computed 3D location with a classification code.
///
/// `y` is grid north; the viewport layer negates it for screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub id: PointId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub code: String,
    /// Benchmark / control points are protected from adjustment
    #[serde(default)]
    pub is_fixed: bool,
}

/// An instrument setup at an occupied point.
///
/// The backend resolves `occupiedPoint` (and each observation's
/// `targetPoint`) to full point values, so sight lines can be drawn without
/// a second lookup. Stations are immutable in this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: StationId,
    pub occupied_point: Point,
    #[serde(default)]
    pub instrument_id: Option<i64>,
    pub height_instrument: f64,
    /// Reference azimuth in degrees
    pub backsight_angle: f64,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

/// A single angle/distance measurement from a station toward a target.
///
/// Either the stadia triple or `distanceSlope` + `heightTarget` is present,
/// depending on `isStadia`. `targetPoint` stays null until the backend has
/// computed the target coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: i64,
    #[serde(default)]
    pub target_point: Option<Point>,
    pub angle_horizontal: f64,
    pub angle_vertical: f64,
    #[serde(default)]
    pub is_stadia: bool,
    #[serde(default)]
    pub stadia_top: Option<f64>,
    #[serde(default)]
    pub stadia_middle: Option<f64>,
    #[serde(default)]
    pub stadia_bottom: Option<f64>,
    #[serde(default)]
    pub distance_slope: Option<f64>,
    #[serde(default)]
    pub height_target: Option<f64>,
}

/// A named, colored, visibility-toggleable collection of drawn segments.
///
/// `drawingData` is an opaque payload on the wire: either a structured JSON
/// object or its serialized-text form. [`drawing::DrawingData::decode`]
/// normalizes both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub color: String,
    pub visible: bool,
    #[serde(default)]
    pub drawing_data: Option<Value>,
}

/// An ordered leveling field book (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelingRun {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub readings: Vec<Reading>,
}

/// One leveling sight. `calculatedAi` and `calculatedZ` are server-derived
/// and read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: i64,
    #[serde(default)]
    pub point_id: Option<PointId>,
    #[serde(default)]
    pub backsight: Option<f64>,
    #[serde(default)]
    pub intermediate: Option<f64>,
    #[serde(default)]
    pub foresight: Option<f64>,
    #[serde(default)]
    pub calculated_ai: Option<f64>,
    #[serde(default)]
    pub calculated_z: Option<f64>,
}

/// Terrain surface role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SurfaceType {
    Initial,
    Final,
}

/// A terrain model built from a subset of points. Point membership is set
/// once at creation; contouring happens server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub surface_type: SurfaceType,
    #[serde(default)]
    pub contour_interval: Option<f64>,
    #[serde(default)]
    pub point_ids: Vec<PointId>,
}

// ── Write payloads ──────────────────────────────────────────────
//
// Partial updates: a `None` field is omitted from the JSON body, so the
// backend only touches the fields actually sent. Toggling a layer's
// visibility must never clobber its drawing payload.

/// Partial point update (`PATCH /points/{id}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

/// Partial layer update (`PATCH /layers/{id}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawing_data: Option<Value>,
}

/// New layer payload (`POST /layers`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLayer {
    pub project_id: ProjectId,
    pub name: String,
    pub color: String,
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_wire_names() {
        let json = r#"{"id":7,"name":"BM1","x":1000.0,"y":2000.5,"z":98.3,"code":"BASE","isFixed":true}"#;
        let p: Point = serde_json::from_str(json).unwrap();
        assert_eq!(p.name, "BM1");
        assert!(p.is_fixed);
        assert_eq!(p.y, 2000.5);

        let out = serde_json::to_value(&p).unwrap();
        assert_eq!(out["isFixed"], serde_json::json!(true));
    }

    #[test]
    fn test_point_defaults_for_missing_fields() {
        let json = r#"{"id":1,"name":"P1","x":0.0,"y":0.0,"z":0.0}"#;
        let p: Point = serde_json::from_str(json).unwrap();
        assert_eq!(p.code, "");
        assert!(!p.is_fixed);
    }

    #[test]
    fn test_station_with_nested_observations() {
        let json = r#"{
            "id": 3,
            "occupiedPoint": {"id":1,"name":"E1","x":0.0,"y":0.0,"z":100.0,"code":"","isFixed":true},
            "heightInstrument": 1.52,
            "backsightAngle": 45.0,
            "observations": [
                {"id":10,"targetPoint":null,"angleHorizontal":12.5,"angleVertical":91.0,
                 "isStadia":true,"stadiaTop":1.4,"stadiaMiddle":1.2,"stadiaBottom":1.0},
                {"id":11,
                 "targetPoint":{"id":2,"name":"P2","x":10.0,"y":10.0,"z":99.0,"code":"ARBOL","isFixed":false},
                 "angleHorizontal":200.0,"angleVertical":88.0,"isStadia":false,
                 "distanceSlope":25.3,"heightTarget":1.5}
            ]
        }"#;
        let st: Station = serde_json::from_str(json).unwrap();
        assert_eq!(st.occupied_point.name, "E1");
        assert_eq!(st.observations.len(), 2);
        assert!(st.observations[0].target_point.is_none());
        assert!(st.observations[0].is_stadia);
        assert_eq!(st.observations[1].target_point.as_ref().unwrap().id, 2);
        assert_eq!(st.observations[1].distance_slope, Some(25.3));
    }

    #[test]
    fn test_layer_drawing_data_as_object_or_text() {
        let structured = r##"{"id":1,"name":"Cercas","color":"#ff0000","visible":true,
                             "drawingData":{"lines":[{"from":1,"to":2}]}}"##;
        let l: Layer = serde_json::from_str(structured).unwrap();
        assert!(l.drawing_data.as_ref().unwrap().is_object());

        let text = r##"{"id":1,"name":"Cercas","color":"#ff0000","visible":true,
                       "drawingData":"{\"lines\":[{\"from\":1,\"to\":2}]}"}"##;
        let l: Layer = serde_json::from_str(text).unwrap();
        assert!(l.drawing_data.as_ref().unwrap().is_string());
    }

    #[test]
    fn test_surface_type_wire_format() {
        let json = r#"{"id":1,"name":"Terreno natural","type":"INITIAL","pointIds":[1,2,3]}"#;
        let s: Surface = serde_json::from_str(json).unwrap();
        assert_eq!(s.surface_type, SurfaceType::Initial);
        assert_eq!(s.point_ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_leveling_run_readings() {
        let json = r#"{"id":4,"name":"Libreta 1","readings":[
            {"id":1,"pointId":9,"backsight":1.25,"calculatedAi":101.25,"calculatedZ":100.0},
            {"id":2,"foresight":0.85}
        ]}"#;
        let run: LevelingRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.readings.len(), 2);
        assert_eq!(run.readings[0].calculated_ai, Some(101.25));
        assert_eq!(run.readings[1].foresight, Some(0.85));
        assert!(run.readings[1].point_id.is_none());
    }

    #[test]
    fn test_point_update_skips_unset_fields() {
        let update = PointUpdate {
            x: Some(12.0),
            y: Some(-3.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"x":12.0,"y":-3.0}"#);
    }

    #[test]
    fn test_layer_update_visibility_only_does_not_clobber_drawing() {
        let update = LayerUpdate {
            visible: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"visible":false}"#);
    }
}
