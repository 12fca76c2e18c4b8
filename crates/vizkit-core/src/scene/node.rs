//! Scene nodes.

use serde_json::Value;

use crate::{
    geometry::Point,
    identifier::Id,
    scene::{AnimationTag, ClickHandler, NodeLabel, Shape},
};

/// A positioned shape in a scene.
///
/// New nodes sit at the origin with [`Shape::default`]. The mutators are used
/// by scene builders; once a [`Scene`](crate::scene::Scene) is built its
/// nodes are only reachable through shared references.
#[derive(Debug, Clone)]
pub struct Node {
    id: Id,
    position: Point,
    shape: Shape,
    label: Option<NodeLabel>,
    class: Option<String>,
    data: Option<Value>,
    on_click: Option<ClickHandler<Node>>,
    animations: Vec<AnimationTag>,
}

impl Node {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            position: Point::default(),
            shape: Shape::default(),
            label: None,
            class: None,
            data: None,
            on_click: None,
            animations: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn label(&self) -> Option<&NodeLabel> {
        self.label.as_ref()
    }

    /// Space-joined classes in the order they were added.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn on_click(&self) -> Option<&ClickHandler<Node>> {
        self.on_click.as_ref()
    }

    pub fn animations(&self) -> &[AnimationTag] {
        &self.animations
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    /// Replaces any previous label.
    pub fn set_label(&mut self, label: NodeLabel) {
        self.label = Some(label);
    }

    /// Appends a class; repeated names are kept.
    pub fn add_class(&mut self, name: &str) {
        append_class(&mut self.class, name);
    }

    pub fn set_data(&mut self, data: Value) {
        self.data = Some(data);
    }

    pub fn set_on_click(&mut self, handler: ClickHandler<Node>) {
        self.on_click = Some(handler);
    }

    pub fn add_animation(&mut self, tag: AnimationTag) {
        self.animations.push(tag);
    }
}

/// Appends `name` to a space-joined class list.
pub(crate) fn append_class(classes: &mut Option<String>, name: &str) {
    match classes {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(name);
        }
        None => *classes = Some(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_defaults() {
        let node = Node::new(Id::new("a"));
        assert_eq!(node.position(), Point::new(0.0, 0.0));
        assert_eq!(node.shape(), &Shape::Circle { radius: 10.0 });
        assert!(node.label().is_none());
        assert!(node.class().is_none());
        assert!(node.animations().is_empty());
    }

    #[test]
    fn test_add_class_keeps_order_and_duplicates() {
        let mut node = Node::new(Id::new("a"));
        node.add_class("neuron");
        node.add_class("active");
        node.add_class("neuron");
        assert_eq!(node.class(), Some("neuron active neuron"));
    }

    #[test]
    fn test_label_replaces() {
        let mut node = Node::new(Id::new("a"));
        node.set_label(NodeLabel::new("first"));
        node.set_label(NodeLabel::new("second"));
        assert_eq!(node.label().map(NodeLabel::text), Some("second"));
    }
}
