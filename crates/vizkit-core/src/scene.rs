//! The immutable scene model.
//!
//! A [`Scene`] is the frozen output of a scene builder: a view box, an
//! optional grid, nodes and edges keyed by [`Id`] in first-insertion order,
//! and the overlay specifications to resolve at render time. Insertion order
//! is render order.

mod decoration;
mod edge;
mod label;
mod node;
mod shape;

use std::fmt;

use indexmap::IndexMap;

pub use decoration::{AnimationTag, ClickHandler, OverlaySpec};
pub use edge::{Edge, MarkerEnd};
pub use label::{EdgeLabel, LabelPosition, NodeLabel};
pub use node::Node;
pub use shape::Shape;

use crate::{geometry::ViewBox, grid::GridConfig, identifier::Id};

/// Which end of an edge a reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    Source,
    Target,
}

impl fmt::Display for EdgeEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// An edge endpoint that names a node the scene does not contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DanglingReference {
    pub edge: Id,
    pub end: EdgeEnd,
    pub node: Id,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    view_box: ViewBox,
    grid: Option<GridConfig>,
    nodes: IndexMap<Id, Node>,
    edges: IndexMap<Id, Edge>,
    overlays: Vec<OverlaySpec>,
}

impl Scene {
    pub fn new(
        view_box: ViewBox,
        grid: Option<GridConfig>,
        nodes: IndexMap<Id, Node>,
        edges: IndexMap<Id, Edge>,
        overlays: Vec<OverlaySpec>,
    ) -> Self {
        Self {
            view_box,
            grid,
            nodes,
            edges,
            overlays,
        }
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    pub fn grid(&self) -> Option<&GridConfig> {
        self.grid.as_ref()
    }

    /// Nodes in first-insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in first-insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn overlays(&self) -> &[OverlaySpec] {
        &self.overlays
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: Id) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn nodes_by_id(&self) -> &IndexMap<Id, Node> {
        &self.nodes
    }

    pub fn edges_by_id(&self) -> &IndexMap<Id, Edge> {
        &self.edges
    }

    /// Returns every edge endpoint that does not resolve to a node, source
    /// before target, in edge order.
    pub fn dangling_edges(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for edge in self.edges.values() {
            for (end, node) in [(EdgeEnd::Source, edge.from()), (EdgeEnd::Target, edge.to())] {
                if !self.nodes.contains_key(&node) {
                    dangling.push(DanglingReference {
                        edge: edge.id(),
                        end,
                        node,
                    });
                }
            }
        }
        dangling
    }

    /// Resolves both endpoints of `edge`, or `None` if either is missing.
    pub fn endpoints(&self, edge: &Edge) -> Option<(&Node, &Node)> {
        Some((self.nodes.get(&edge.from())?, self.nodes.get(&edge.to())?))
    }
}
