//! Interaction tool state machine: pan, point relocation, line drawing.
//!
//! Transitions are pure so the two-phase drawing gesture is testable without
//! a canvas or a backend. No writes happen here: the caller maps the
//! returned [`DrawAction`] to a mutation (or to surfacing the layer panel).

use shared::drawing::DrawingData;
use shared::{Layer, LayerId, LayerUpdate, PointId};

use crate::api::MutationRequest;

/// Active interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Drag the canvas to pan; points are inert
    #[default]
    Pan,
    /// Drag individual point markers to relocate them
    MovePoint,
    /// Two-phase point-to-point segment drawing on the active layer
    DrawLine,
}

/// Result of a point click while a tool is active
#[derive(Debug, Clone, PartialEq)]
pub enum DrawAction {
    /// Click has no tool-specific meaning (not in DRAW_LINE)
    Ignored,
    /// First click: point becomes the segment anchor
    AnchorSet(PointId),
    /// Second click on the anchor itself: gesture cancelled
    AnchorCleared,
    /// Second click on another point: persist the new segment
    Append {
        layer_id: LayerId,
        drawing: DrawingData,
    },
    /// No active layer to draw on; surface the layer panel instead
    NeedsLayer,
}

/// Tool selection plus the drawing anchor
#[derive(Debug, Default)]
pub struct ToolState {
    pub active: Tool,
    /// Anchor point of a drawing gesture in progress
    pub anchor: Option<PointId>,
}

impl ToolState {
    /// Switch tools. Any drawing-in-progress is abandoned, never persisted.
    pub fn set_tool(&mut self, tool: Tool) {
        self.active = tool;
        self.anchor = None;
    }

    /// Abandon the current drawing anchor
    pub fn clear_anchor(&mut self) {
        self.anchor = None;
    }

    /// Handle a click on a point marker.
    ///
    /// In `DRAW_LINE` this advances the two-phase gesture: first click
    /// anchors, second click appends `{from: anchor, to: clicked}` to the
    /// active layer's decoded payload and chains the anchor forward so a
    /// polyline can be entered click by click.
    pub fn click_point(&mut self, point_id: PointId, active_layer: Option<&Layer>) -> DrawAction {
        if self.active != Tool::DrawLine {
            return DrawAction::Ignored;
        }
        let Some(layer) = active_layer else {
            return DrawAction::NeedsLayer;
        };

        match self.anchor {
            None => {
                self.anchor = Some(point_id);
                DrawAction::AnchorSet(point_id)
            }
            Some(anchor) if anchor == point_id => {
                self.anchor = None;
                DrawAction::AnchorCleared
            }
            Some(anchor) => {
                let drawing = DrawingData::decode(layer.drawing_data.as_ref())
                    .append_segment(anchor, point_id);
                self.anchor = Some(point_id);
                DrawAction::Append {
                    layer_id: layer.id,
                    drawing,
                }
            }
        }
    }
}

/// Map a completed draw action to the mutation it requires, if any
pub fn mutation_for(action: &DrawAction) -> Option<MutationRequest> {
    match action {
        DrawAction::Append { layer_id, drawing } => Some(MutationRequest::UpdateLayer {
            id: *layer_id,
            update: LayerUpdate {
                drawing_data: Some(drawing.encode()),
                ..Default::default()
            },
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_default_tool_is_pan() {
        let tools = ToolState::default();
        assert_eq!(tools.active, Tool::Pan);
        assert!(tools.anchor.is_none());
    }

    #[test]
    fn test_click_ignored_outside_draw_line() {
        let layer = fixtures::layer(1, "Cercas", "#ff0000");
        for tool in [Tool::Pan, Tool::MovePoint] {
            let mut tools = ToolState::default();
            tools.set_tool(tool);
            assert_eq!(tools.click_point(1, Some(&layer)), DrawAction::Ignored);
            assert!(tools.anchor.is_none());
        }
    }

    #[test]
    fn test_first_click_sets_anchor() {
        let layer = fixtures::layer(1, "Cercas", "#ff0000");
        let mut tools = ToolState::default();
        tools.set_tool(Tool::DrawLine);
        assert_eq!(tools.click_point(7, Some(&layer)), DrawAction::AnchorSet(7));
        assert_eq!(tools.anchor, Some(7));
    }

    #[test]
    fn test_same_point_twice_cancels_without_mutation() {
        let layer = fixtures::layer(1, "Cercas", "#ff0000");
        let mut tools = ToolState::default();
        tools.set_tool(Tool::DrawLine);
        tools.click_point(7, Some(&layer));

        let action = tools.click_point(7, Some(&layer));
        assert_eq!(action, DrawAction::AnchorCleared);
        assert!(tools.anchor.is_none());
        assert!(mutation_for(&action).is_none());
    }

    #[test]
    fn test_second_click_appends_and_chains_anchor() {
        let layer = fixtures::layer_with_lines(1, "Cercas", &[(5, 6)]);
        let mut tools = ToolState::default();
        tools.set_tool(Tool::DrawLine);
        tools.click_point(1, Some(&layer));

        let action = tools.click_point(2, Some(&layer));
        match &action {
            DrawAction::Append { layer_id, drawing } => {
                assert_eq!(*layer_id, 1);
                assert_eq!(drawing.lines.len(), 2);
                assert_eq!(drawing.lines[1].from, 1);
                assert_eq!(drawing.lines[1].to, 2);
            }
            other => panic!("expected Append, got {other:?}"),
        }
        // Anchor chains to the last point for rapid polyline entry.
        assert_eq!(tools.anchor, Some(2));
        assert!(mutation_for(&action).is_some());
    }

    #[test]
    fn test_no_active_layer_rejects_before_anchor() {
        let mut tools = ToolState::default();
        tools.set_tool(Tool::DrawLine);
        assert_eq!(tools.click_point(1, None), DrawAction::NeedsLayer);
        assert!(tools.anchor.is_none());
    }

    #[test]
    fn test_tool_switch_clears_anchor() {
        let layer = fixtures::layer(1, "Cercas", "#ff0000");
        let mut tools = ToolState::default();
        tools.set_tool(Tool::DrawLine);
        tools.click_point(3, Some(&layer));
        assert!(tools.anchor.is_some());

        tools.set_tool(Tool::Pan);
        assert!(tools.anchor.is_none());
    }

    #[test]
    fn test_append_mutation_carries_full_payload() {
        let action = DrawAction::Append {
            layer_id: 4,
            drawing: DrawingData::default().append_segment(1, 2),
        };
        match mutation_for(&action) {
            Some(MutationRequest::UpdateLayer { id, update }) => {
                assert_eq!(id, 4);
                assert!(update.visible.is_none());
                let value = update.drawing_data.unwrap();
                assert_eq!(value["lines"][0]["from"], 1);
            }
            other => panic!("expected UpdateLayer, got {other:?}"),
        }
    }
}
