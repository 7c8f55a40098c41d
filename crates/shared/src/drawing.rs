//! Layer drawing payload: decode/encode at the wire boundary, plus the pure
//! append/resolve operations the drawing tool is built on.
//!
//! The backend stores a layer's payload opaquely and may hand it back either
//! as a structured JSON object or as serialized text. Everything past
//! [`DrawingData::decode`] only ever sees the structured form.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Point, PointId};

/// A drawn segment referencing two points by id.
///
/// References may dangle after a point is deleted; resolution skips those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRef {
    pub from: PointId,
    pub to: PointId,
}

/// Structured form of a layer's `drawingData` payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingData {
    #[serde(default)]
    pub lines: Vec<SegmentRef>,
}

impl DrawingData {
    /// Normalize a raw payload into the structured form.
    ///
    /// Tolerates an absent payload, a JSON object, or a serialized-text
    /// encoding of the same object. Malformed payloads decode to empty
    /// rather than failing the whole layer.
    pub fn decode(raw: Option<&Value>) -> Self {
        match raw {
            None | Some(Value::Null) => Self::default(),
            Some(Value::String(text)) => serde_json::from_str(text).unwrap_or_default(),
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_default(),
        }
    }

    /// Structured value the backend can re-serialize
    pub fn encode(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Return a copy with one more segment appended.
    ///
    /// Duplicates are permitted: repeated appends of the same pair (or its
    /// reverse) all land in `lines`.
    pub fn append_segment(&self, from: PointId, to: PointId) -> Self {
        let mut lines = self.lines.clone();
        lines.push(SegmentRef { from, to });
        Self { lines }
    }
}

/// Index a point slice by id for segment resolution
pub fn index_points(points: &[Point]) -> HashMap<PointId, &Point> {
    points.iter().map(|p| (p.id, p)).collect()
}

/// Look up a segment's endpoints in the current point set.
///
/// Returns `None` when either reference dangles; the renderer skips the
/// segment silently.
pub fn resolve_segment<'a>(
    line: &SegmentRef,
    points_by_id: &HashMap<PointId, &'a Point>,
) -> Option<(&'a Point, &'a Point)> {
    let p1 = points_by_id.get(&line.from).copied()?;
    let p2 = points_by_id.get(&line.to).copied()?;
    Some((p1, p2))
}
