//! The `"data-points"` overlay.

use serde::Deserialize;

use vizkit_core::{draw::ViewElement, identifier::Id};

use super::{OverlayContext, OverlayRenderer};

#[derive(Debug, Deserialize)]
struct DataPointsParams {
    points: Vec<DataPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataPoint {
    id: String,
    current_node_id: String,
}

/// Small markers for data samples sitting on scene nodes.
///
/// Params: `{ "points": [{ "id": "p-7", "currentNodeId": node, ... }] }`.
/// Extra fields on a point are ignored. Markers of points on the same node
/// are spread out by a jitter derived from the numeric suffix of the point
/// id; points on missing nodes are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataPointsOverlay;

impl DataPointsOverlay {
    pub const KIND: &'static str = "data-points";
    pub const CLASS: &'static str = "viz-data-point";
    const RADIUS: f64 = 6.0;

    /// Offset of a marker from its node center, from the digits following
    /// the first `-` of the point id (`0` when there are none).
    pub fn jitter(point_id: &str) -> (f64, f64) {
        let n = point_id
            .split('-')
            .nth(1)
            .map(leading_number)
            .unwrap_or_default();
        let dx = ((n % 5) as f64 - 2.0) * 10.0;
        let dy = ((n % 3) as f64 - 1.0) * 10.0;
        (dx, dy)
    }
}

fn leading_number(text: &str) -> u64 {
    let digits = text
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text, |end| &text[..end]);
    digits.parse().unwrap_or_default()
}

impl OverlayRenderer for DataPointsOverlay {
    fn render(&self, ctx: &OverlayContext<'_>) -> Vec<ViewElement> {
        let Some(params) = ctx.params::<DataPointsParams>() else {
            return Vec::new();
        };
        let class = ctx.class_or(Self::CLASS);

        params
            .points
            .iter()
            .filter_map(|point| {
                let node = ctx.nodes_by_id.get(&Id::new(&point.current_node_id))?;
                let (dx, dy) = Self::jitter(&point.id);
                let position = node.position().offset(dx, dy);
                Some(
                    ViewElement::circle()
                        .set("cx", position.x())
                        .set("cy", position.y())
                        .set("r", Self::RADIUS)
                        .set("class", class),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use serde_json::json;

    use vizkit_core::{
        geometry::{Point, ViewBox},
        scene::{Node, OverlaySpec, Scene},
    };

    use super::*;

    #[test]
    fn test_jitter() {
        assert_eq!(DataPointsOverlay::jitter("p-0"), (-20.0, -10.0));
        assert_eq!(DataPointsOverlay::jitter("p-7"), (0.0, 0.0));
        assert_eq!(DataPointsOverlay::jitter("p-13"), (10.0, 0.0));
        assert_eq!(DataPointsOverlay::jitter("sample"), (-20.0, -10.0));
        assert_eq!(DataPointsOverlay::jitter("p-4b"), (20.0, 0.0));
        assert_eq!(DataPointsOverlay::jitter("p-x"), (-20.0, -10.0));
    }

    #[test]
    fn test_points_on_nodes() {
        let id = Id::new("leaf1");
        let mut node = Node::new(id);
        node.set_position(Point::new(100.0, 400.0));
        let nodes = IndexMap::from([(id, node)]);
        let scene = Scene::new(ViewBox::default(), None, nodes, IndexMap::new(), Vec::new());

        let spec = OverlaySpec::new(
            "data-points",
            json!({"points": [
                {"id": "p-7", "currentNodeId": "leaf1", "x": 0.3, "y": 0.9},
                {"id": "p-8", "currentNodeId": "gone"},
            ]}),
        );
        let out = DataPointsOverlay.render(&OverlayContext::new(&spec, &scene));

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].number("cx"), Some(100.0));
        assert_eq!(out[0].number("cy"), Some(400.0));
        assert_eq!(out[0].number("r"), Some(6.0));
        assert_eq!(out[0].attr("class"), Some("viz-data-point"));
    }
}
