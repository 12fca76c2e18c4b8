//! Edge handles.

use serde::Serialize;

use vizkit_core::{
    identifier::Id,
    scene::{AnimationTag, ClickHandler, Edge, EdgeLabel, MarkerEnd, Scene},
};

use super::{NodeBuilder, SceneBuilder, to_value};
use crate::VizError;

/// A handle to one edge of a [`SceneBuilder`].
#[derive(Debug)]
pub struct EdgeBuilder<'a> {
    builder: &'a mut SceneBuilder,
    id: Id,
}

impl<'a> EdgeBuilder<'a> {
    pub(super) fn new(builder: &'a mut SceneBuilder, id: Id) -> Self {
        Self { builder, id }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    fn update(self, f: impl FnOnce(&mut Edge)) -> Self {
        if let Some(edge) = self.builder.edges.get_mut(&self.id) {
            f(edge);
        }
        self
    }

    /// Replaces the label.
    pub fn set_label(self, label: impl Into<EdgeLabel>) -> Self {
        let label = label.into();
        self.update(|edge| edge.set_label(label))
    }

    /// Appends a class. Classes accumulate and are not deduplicated.
    pub fn add_class(self, name: &str) -> Self {
        self.update(|edge| edge.add_class(name))
    }

    /// Sets the stroke width of an invisible line that widens the clickable area.
    pub fn set_hit_area(self, width: f64) -> Self {
        self.update(|edge| edge.set_hit_area(width))
    }

    /// Draws an arrow head at the target end, or explicitly none.
    pub fn set_arrow(self, enabled: bool) -> Self {
        let marker = if enabled {
            MarkerEnd::Arrow
        } else {
            MarkerEnd::None
        };
        self.update(|edge| edge.set_marker_end(marker))
    }

    /// Appends an animation tag; params that fail to serialize are dropped.
    pub fn add_animation(self, kind: &str, params: impl Serialize) -> Self {
        let Some(params) = to_value(&params, kind) else {
            return self;
        };
        self.update(|edge| edge.add_animation(AnimationTag::new(kind, params)))
    }

    /// Attaches an opaque payload, replacing any previous one.
    pub fn set_data(self, data: impl Serialize) -> Self {
        let Some(data) = to_value(&data, "data") else {
            return self;
        };
        self.update(|edge| edge.set_data(data))
    }

    pub fn set_on_click(self, handler: impl Fn(Id, &Edge) + 'static) -> Self {
        self.update(|edge| edge.set_on_click(ClickHandler::new(handler)))
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
