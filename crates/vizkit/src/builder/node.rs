//! Node handles.

use log::warn;
use serde::Serialize;

use vizkit_core::{
    geometry::Point,
    grid::Align,
    identifier::Id,
    scene::{AnimationTag, ClickHandler, Node, NodeLabel, Scene, Shape},
};

use super::{EdgeBuilder, SceneBuilder, to_value};
use crate::VizError;

/// A handle to one node of a [`SceneBuilder`].
///
/// Every setter returns the handle for chaining; [`NodeBuilder::done`] gives
/// the scene builder back.
#[derive(Debug)]
pub struct NodeBuilder<'a> {
    builder: &'a mut SceneBuilder,
    id: Id,
}

impl<'a> NodeBuilder<'a> {
    pub(super) fn new(builder: &'a mut SceneBuilder, id: Id) -> Self {
        Self { builder, id }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    fn update(self, f: impl FnOnce(&mut Node)) -> Self {
        if let Some(node) = self.builder.nodes.get_mut(&self.id) {
            f(node);
        }
        self
    }

    /// Places the node at absolute coordinates.
    pub fn set_position(self, x: f64, y: f64) -> Self {
        self.update(|node| node.set_position(Point::new(x, y)))
    }

    /// Places the node in a cell of the scene grid.
    ///
    /// Fractional and out-of-range cells are allowed. Without a grid the call
    /// is logged and leaves the position unchanged.
    pub fn set_cell(self, column: f64, row: f64, align: Align) -> Self {
        let Some(grid) = self.builder.grid else {
            warn!(node_id:% = self.id, column, row; "Grid placement requested but no grid is configured");
            return self;
        };
        let position = grid.cell_position(self.builder.view_box, column, row, align);
        self.update(|node| node.set_position(position))
    }

    pub fn set_shape_circle(self, radius: f64) -> Self {
        self.update(|node| node.set_shape(Shape::Circle { radius }))
    }

    pub fn set_shape_rect(self, width: f64, height: f64, corner_radius: Option<f64>) -> Self {
        self.update(|node| {
            node.set_shape(Shape::Rect {
                width,
                height,
                corner_radius,
            })
        })
    }

    pub fn set_shape_diamond(self, width: f64, height: f64) -> Self {
        self.update(|node| node.set_shape(Shape::Diamond { width, height }))
    }

    /// Replaces the label.
    pub fn set_label(self, label: impl Into<NodeLabel>) -> Self {
        let label = label.into();
        self.update(|node| node.set_label(label))
    }

    /// Appends a class. Classes accumulate and are not deduplicated.
    pub fn add_class(self, name: &str) -> Self {
        self.update(|node| node.add_class(name))
    }

    /// Appends an animation tag; params that fail to serialize are dropped.
    pub fn add_animation(self, kind: &str, params: impl Serialize) -> Self {
        let Some(params) = to_value(&params, kind) else {
            return self;
        };
        self.update(|node| node.add_animation(AnimationTag::new(kind, params)))
    }

    /// Attaches an opaque payload, replacing any previous one.
    pub fn set_data(self, data: impl Serialize) -> Self {
        let Some(data) = to_value(&data, "data") else {
            return self;
        };
        self.update(|node| node.set_data(data))
    }

    pub fn set_on_click(self, handler: impl Fn(Id, &Node) + 'static) -> Self {
        self.update(|node| node.set_on_click(ClickHandler::new(handler)))
    }

    /// Returns the scene builder.
    pub fn done(self) -> &'a mut SceneBuilder {
        self.builder
    }

    pub fn node(self, id: &str) -> NodeBuilder<'a> {
        self.done().node(id)
    }

    pub fn edge(self, from: &str, to: &str, id: Option<&str>) -> EdgeBuilder<'a> {
        self.done().edge(from, to, id)
    }

    pub fn overlay(self, kind: &str, params: impl Serialize, key: Option<&str>) -> &'a mut SceneBuilder {
        self.done().overlay(kind, params, key)
    }

    pub fn build(self) -> Scene {
        self.done().build()
    }

    pub fn render_svg(self) -> Result<String, VizError> {
        self.done().render_svg()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    use vizkit_core::geometry::Padding;

    use super::*;

    #[test]
    fn test_set_cell_without_grid_is_noop() {
        let scene = SceneBuilder::new()
            .node("a")
            .set_position(5.0, 6.0)
            .set_cell(1.0, 1.0, Align::Center)
            .build();
        assert_eq!(scene.node(Id::new("a")).unwrap().position(), Point::new(5.0, 6.0));
    }

    #[test]
    fn test_set_cell_uses_current_view_box() {
        let mut builder = SceneBuilder::new();
        builder
            .set_view_box(400.0, 400.0)
            .set_grid(2, 2, Padding::new(0.0, 0.0));
        let scene = builder.node("a").set_cell(1.0, 1.0, Align::Start).build();
        let position = scene.node(Id::new("a")).unwrap().position();
        assert_approx_eq!(f64, position.x(), 200.0, epsilon = 1e-9);
        assert_approx_eq!(f64, position.y(), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shapes_and_data() {
        let scene = SceneBuilder::new()
            .node("r")
            .set_shape_rect(80.0, 40.0, Some(5.0))
            .set_data(json!({"bias": 0.1}))
            .node("d")
            .set_shape_diamond(20.0, 10.0)
            .build();

        let rect = scene.node(Id::new("r")).unwrap();
        assert_eq!(rect.shape().name(), "rect");
        assert_eq!(rect.data(), Some(&json!({"bias": 0.1})));
        assert_eq!(scene.node(Id::new("d")).unwrap().shape().name(), "diamond");
    }

    #[test]
    fn test_animation_params_default_to_null() {
        let scene = SceneBuilder::new()
            .node("a")
            .add_animation("pulse", ())
            .build();
        let tags = scene.node(Id::new("a")).unwrap().animations();
        assert_eq!(tags.len(), 1);
        assert!(tags[0].params().is_null());
    }
}
