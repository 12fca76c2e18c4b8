//! Scene edges.

use serde_json::Value;

use crate::{
    identifier::Id,
    scene::{AnimationTag, ClickHandler, EdgeLabel, node::append_class},
};

/// Decoration drawn at the target end of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkerEnd {
    Arrow,
    #[default]
    None,
}

/// A line between two nodes.
///
/// Endpoints are weak references by id: they are resolved when the scene is
/// rendered and an edge whose endpoint is missing is skipped.
#[derive(Debug, Clone)]
pub struct Edge {
    id: Id,
    from: Id,
    to: Id,
    label: Option<EdgeLabel>,
    marker_end: Option<MarkerEnd>,
    class: Option<String>,
    hit_area: Option<f64>,
    data: Option<Value>,
    on_click: Option<ClickHandler<Edge>>,
    animations: Vec<AnimationTag>,
}

impl Edge {
    pub fn new(id: Id, from: Id, to: Id) -> Self {
        Self {
            id,
            from,
            to,
            label: None,
            marker_end: None,
            class: None,
            hit_area: None,
            data: None,
            on_click: None,
            animations: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }

    pub fn label(&self) -> Option<&EdgeLabel> {
        self.label.as_ref()
    }

    pub fn marker_end(&self) -> Option<MarkerEnd> {
        self.marker_end
    }

    /// Space-joined classes in the order they were added.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Width in pixels of the invisible interaction line, if configured.
    pub fn hit_area(&self) -> Option<f64> {
        self.hit_area
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn on_click(&self) -> Option<&ClickHandler<Edge>> {
        self.on_click.as_ref()
    }

    pub fn animations(&self) -> &[AnimationTag] {
        &self.animations
    }

    /// Replaces any previous label.
    pub fn set_label(&mut self, label: EdgeLabel) {
        self.label = Some(label);
    }

    pub fn set_marker_end(&mut self, marker: MarkerEnd) {
        self.marker_end = Some(marker);
    }

    /// Appends a class; repeated names are kept.
    pub fn add_class(&mut self, name: &str) {
        append_class(&mut self.class, name);
    }

    pub fn set_hit_area(&mut self, width: f64) {
        self.hit_area = Some(width);
    }

    pub fn set_data(&mut self, data: Value) {
        self.data = Some(data);
    }

    pub fn set_on_click(&mut self, handler: ClickHandler<Edge>) {
        self.on_click = Some(handler);
    }

    pub fn add_animation(&mut self, tag: AnimationTag) {
        self.animations.push(tag);
    }
}
