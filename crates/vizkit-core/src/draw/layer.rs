//! Layer-based z-ordering of rendered view elements.
//!
//! # Overview
//!
//! - [`RenderLayer`]: the fixed stack of layers a scene renders into
//! - [`LayeredOutput`]: view elements collected by layer
//!
//! # Example
//!
//! ```
//! # use vizkit_core::draw::{LayeredOutput, RenderLayer, ViewElement};
//! let mut output = LayeredOutput::new();
//!
//! // Overlays are added first but still render on top
//! output.add_to_layer(RenderLayer::Overlays, ViewElement::circle());
//! output.add_to_layer(RenderLayer::Edges, ViewElement::line());
//!
//! let groups = output.render();
//! assert_eq!(groups.len(), 3);
//! assert_eq!(groups[0].attr("class"), Some("viz-layer-edges"));
//! assert_eq!(groups[2].children().len(), 1);
//! ```

use crate::draw::ViewElement;

/// Defines the rendering layers of a scene.
///
/// Layers are rendered from bottom to top in the order defined by variant
/// declaration. The `Ord` derive uses declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Edge lines, hit areas and edge labels - renders first
    Edges,
    /// Node shapes and node labels
    Nodes,
    /// Overlay output and caller-supplied extra children
    Overlays,
}

impl RenderLayer {
    /// All layers, bottom to top.
    pub const ALL: [RenderLayer; 3] = [Self::Edges, Self::Nodes, Self::Overlays];

    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Edges => "edges",
            Self::Nodes => "nodes",
            Self::Overlays => "overlays",
        }
    }

    /// The CSS class of the group wrapping this layer.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Edges => "viz-layer-edges",
            Self::Nodes => "viz-layer-nodes",
            Self::Overlays => "viz-layer-overlays",
        }
    }
}

/// View elements grouped by rendering layer.
///
/// Elements keep their insertion order within a layer; when rendered, layers
/// are emitted bottom to top.
#[derive(Debug, Clone, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, ViewElement)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, element: ViewElement) {
        self.items.push((layer, element));
    }

    /// Returns `true` if there are no elements in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements of one layer in insertion order.
    pub fn layer(&self, layer: RenderLayer) -> impl Iterator<Item = &ViewElement> {
        self.items
            .iter()
            .filter(move |(l, _)| *l == layer)
            .map(|(_, element)| element)
    }

    /// Renders every layer to a group element, consuming the output.
    ///
    /// Each group carries the layer's class and a `data-layer` attribute.
    /// All layers are emitted, empty ones included, so bindings can rely on
    /// a fixed structure.
    pub fn render(mut self) -> Vec<ViewElement> {
        // Stable sort keeps insertion order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut groups: Vec<ViewElement> = RenderLayer::ALL
            .iter()
            .map(|layer| {
                ViewElement::group()
                    .set("class", layer.class())
                    .set("data-layer", layer.name())
            })
            .collect();

        for (layer, element) in self.items {
            groups[layer as usize].push_child(element);
        }

        groups
    }
}
