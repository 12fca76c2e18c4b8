//! Retained view binding.
//!
//! A [`ViewTree`] is the retained form of a rendered scene: the layer groups
//! produced by the [`Renderer`], plus an optional container class and extra
//! caller-supplied children. A GUI binding walks [`ViewTree::elements`] to
//! build its widgets and forwards pointer input through [`ViewTree::click`],
//! which is the only place scene click handlers are invoked.

use log::debug;

use vizkit_core::{
    draw::{ClickTarget, ViewElement},
    geometry::ViewBox,
    scene::Scene,
};

use crate::{VizError, render::Renderer};

#[derive(Debug, Clone)]
pub struct ViewTree<'s> {
    scene: &'s Scene,
    container_class: Option<String>,
    layers: Vec<ViewElement>,
    extra_children: Vec<ViewElement>,
}

impl<'s> ViewTree<'s> {
    /// Renders `scene` and retains the result.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error if the scene holds non-finite coordinates.
    pub fn bind(scene: &'s Scene, renderer: &Renderer<'_>) -> Result<Self, VizError> {
        let layers = renderer.layers(scene)?.render();
        Ok(Self {
            scene,
            container_class: None,
            layers,
            extra_children: Vec::new(),
        })
    }

    /// Sets the class of the container element (builder style).
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = Some(class.into());
        self
    }

    /// Appends caller-drawn elements rendered above every layer (builder style).
    pub fn with_extra_children(mut self, children: impl IntoIterator<Item = ViewElement>) -> Self {
        self.extra_children.extend(children);
        self
    }

    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    pub fn view_box(&self) -> ViewBox {
        self.scene.view_box()
    }

    pub fn container_class(&self) -> Option<&str> {
        self.container_class.as_deref()
    }

    /// The layer groups, bottom to top.
    pub fn layers(&self) -> &[ViewElement] {
        &self.layers
    }

    pub fn extra_children(&self) -> &[ViewElement] {
        &self.extra_children
    }

    /// All top-level elements in paint order: layer groups, then extra children.
    pub fn elements(&self) -> impl Iterator<Item = &ViewElement> {
        self.layers.iter().chain(self.extra_children.iter())
    }

    /// The first element, in document order, that forwards input to `target`.
    pub fn find(&self, target: ClickTarget) -> Option<&ViewElement> {
        self.layers
            .iter()
            .flat_map(ViewElement::descendants)
            .find(|element| element.target() == Some(target))
    }

    /// Invokes the click handler of the node or edge behind `target`.
    ///
    /// Returns `false` when the element does not exist or has no handler.
    pub fn click(&self, target: &ClickTarget) -> bool {
        match *target {
            ClickTarget::Node(id) => {
                let Some(node) = self.scene.node(id) else {
                    debug!(node_id:% = id; "Click on unknown node");
                    return false;
                };
                let Some(handler) = node.on_click() else {
                    return false;
                };
                handler.call(id, node);
                true
            }
            ClickTarget::Edge(id) => {
                let Some(edge) = self.scene.edge(id) else {
                    debug!(edge_id:% = id; "Click on unknown edge");
                    return false;
                };
                let Some(handler) = edge.on_click() else {
                    return false;
                };
                handler.call(id, edge);
                true
            }
        }
    }
}
