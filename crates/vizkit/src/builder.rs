//! Fluent scene construction.
//!
//! A [`SceneBuilder`] is created per render cycle, accumulates nodes, edges
//! and overlays, and is frozen into an immutable [`Scene`] by
//! [`SceneBuilder::build`]. Node and edge handles ([`NodeBuilder`],
//! [`EdgeBuilder`]) borrow the builder mutably and hand it back through
//! `done()`; they also forward `node`, `edge`, `overlay` and `build` so whole
//! scenes can be written as one chain.
//!
//! The builder never fails: dangling edge endpoints, grid placement without a
//! grid and invalid grids are logged and tolerated.
//!
//! # Example
//!
//! ```
//! # use vizkit::{SceneBuilder, geometry::Padding, grid::Align};
//! let mut builder = SceneBuilder::new();
//! builder.set_grid(4, 1, Padding::new(50.0, 50.0));
//!
//! let scene = builder
//!     .node("input")
//!     .set_cell(0.0, 0.0, Align::Center)
//!     .set_label("in")
//!     .node("output")
//!     .set_cell(3.0, 0.0, Align::Center)
//!     .edge("input", "output", None)
//!     .set_arrow(true)
//!     .build();
//!
//! assert_eq!(scene.nodes().count(), 2);
//! assert_eq!(scene.edges().count(), 1);
//! ```

mod edge;
mod node;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use vizkit_core::{
    geometry::{Padding, ViewBox},
    grid::GridConfig,
    identifier::Id,
    scene::{Edge, Node, OverlaySpec, Scene},
};

pub use edge::EdgeBuilder;
pub use node::NodeBuilder;

use crate::{
    VizError,
    animation::AnimationRegistry,
    config::{SceneConfig, StyleConfig},
    export::SvgExporter,
    overlay::OverlayRegistry,
    render::Renderer,
    view::ViewTree,
};

/// Accumulates a scene.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    view_box: ViewBox,
    grid: Option<GridConfig>,
    default_padding: Padding,
    nodes: IndexMap<Id, Node>,
    edges: IndexMap<Id, Edge>,
    overlays: Vec<OverlaySpec>,
}

impl SceneBuilder {
    /// Creates an empty builder with an `800×600` view box and no grid.
    pub fn new() -> Self {
        Self::with_config(&SceneConfig::default())
    }

    /// Creates an empty builder using the view box and default grid padding
    /// of `config`.
    pub fn with_config(config: &SceneConfig) -> Self {
        Self {
            view_box: config.view_box(),
            grid: None,
            default_padding: config.grid_padding(),
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            overlays: Vec::new(),
        }
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    pub fn grid(&self) -> Option<&GridConfig> {
        self.grid.as_ref()
    }

    /// Replaces the view box.
    pub fn set_view_box(&mut self, width: f64, height: f64) -> &mut Self {
        self.view_box = ViewBox::new(width, height);
        self
    }

    /// Replaces the grid used by [`NodeBuilder::set_cell`].
    ///
    /// An invalid grid is logged and ignored, keeping any previous grid.
    pub fn set_grid(&mut self, columns: u32, rows: u32, padding: Padding) -> &mut Self {
        match GridConfig::new(columns, rows, padding) {
            Ok(grid) => self.grid = Some(grid),
            Err(err) => warn!(columns, rows, err:%; "Ignoring invalid grid"),
        }
        self
    }

    /// Replaces the grid, using the configured default padding.
    pub fn set_grid_default_padding(&mut self, columns: u32, rows: u32) -> &mut Self {
        let padding = self.default_padding;
        self.set_grid(columns, rows, padding)
    }

    /// Returns a handle to the node `id`, creating it at the origin with the
    /// default shape if it does not exist yet.
    pub fn node(&mut self, id: &str) -> NodeBuilder<'_> {
        let id = Id::new(id);
        self.nodes.entry(id).or_insert_with(|| Node::new(id));
        NodeBuilder::new(self, id)
    }

    /// Returns a handle to the edge from `from` to `to`, creating it if needed.
    ///
    /// Without an explicit `id` (or with an empty one) the edge is keyed
    /// `"{from}->{to}"`. An existing edge keeps its original endpoints.
    pub fn edge(&mut self, from: &str, to: &str, id: Option<&str>) -> EdgeBuilder<'_> {
        let (from, to) = (Id::new(from), Id::new(to));
        let id = id
            .filter(|id| !id.is_empty())
            .map_or_else(|| Id::edge_between(from, to), Id::new);
        self.edges
            .entry(id)
            .or_insert_with(|| Edge::new(id, from, to));
        EdgeBuilder::new(self, id)
    }

    /// Appends an overlay of `kind`. Overlays are never deduplicated.
    pub fn overlay(&mut self, kind: &str, params: impl Serialize, key: Option<&str>) -> &mut Self {
        let Some(params) = to_value(&params, kind) else {
            return self;
        };
        let mut spec = OverlaySpec::new(kind, params);
        if let Some(key) = key {
            spec = spec.with_key(key);
        }
        self.add_overlay(spec)
    }

    /// Appends a fully specified overlay.
    pub fn add_overlay(&mut self, spec: OverlaySpec) -> &mut Self {
        self.overlays.push(spec);
        self
    }

    /// Snapshots the accumulated state into a [`Scene`].
    ///
    /// Every edge endpoint that names a missing node is logged; such edges
    /// are kept and skipped at render time.
    pub fn build(&self) -> Scene {
        let scene = Scene::new(
            self.view_box,
            self.grid,
            self.nodes.clone(),
            self.edges.clone(),
            self.overlays.clone(),
        );

        for dangling in scene.dangling_edges() {
            warn!(
                edge_id:% = dangling.edge,
                node_id:% = dangling.node;
                "Edge references missing {} node",
                dangling.end
            );
        }

        debug!(
            nodes = scene.nodes_by_id().len(),
            edges = scene.edges_by_id().len(),
            overlays = scene.overlays().len();
            "Scene built"
        );
        scene
    }

    /// Builds the scene and renders it to SVG markup with the default
    /// registries and style.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::NonFiniteCoordinate`] if the scene holds NaN or
    /// infinite coordinates.
    pub fn render_svg(&self) -> Result<String, VizError> {
        let animations = AnimationRegistry::default();
        let overlays = OverlayRegistry::default();
        self.render_svg_with(&Renderer::new(&animations, &overlays), &StyleConfig::default())
    }

    /// Builds the scene and renders it to SVG markup with custom registries
    /// and style.
    ///
    /// # Errors
    ///
    /// Returns [`VizError`] for non-finite coordinates or an invalid style.
    pub fn render_svg_with(
        &self,
        renderer: &Renderer<'_>,
        style: &StyleConfig,
    ) -> Result<String, VizError> {
        let scene = self.build();
        let tree = ViewTree::bind(&scene, renderer)?;
        SvgExporter::new(style).export(&tree)
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes builder params to JSON, logging and returning `None` on failure.
fn to_value(params: &impl Serialize, kind: &str) -> Option<Value> {
    match serde_json::to_value(params) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(kind, err:%; "Dropping params that cannot be serialized");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_invalid_grid_is_ignored() {
        let mut builder = SceneBuilder::new();
        builder.set_grid(2, 2, Padding::default());
        builder.set_grid(0, 3, Padding::default());
        let grid = builder.grid().unwrap();
        assert_eq!((grid.columns(), grid.rows()), (2, 2));
    }

    #[test]
    fn test_default_padding_from_config() {
        let config = SceneConfig::new(ViewBox::new(400.0, 200.0), Padding::new(5.0, 10.0));
        let mut builder = SceneBuilder::with_config(&config);
        builder.set_grid_default_padding(2, 1);
        assert_eq!(builder.view_box(), ViewBox::new(400.0, 200.0));
        assert_eq!(builder.grid().unwrap().padding(), Padding::new(5.0, 10.0));
    }

    #[test]
    fn test_overlays_are_appended() {
        let mut builder = SceneBuilder::new();
        builder
            .overlay("signal", json!({"from": "a", "to": "b", "progress": 0.1}), Some("s1"))
            .overlay("signal", json!({"from": "a", "to": "b", "progress": 0.1}), Some("s1"))
            .add_overlay(OverlaySpec::new("grid-labels", json!({})).with_class("caption"));

        let scene = builder.build();
        assert_eq!(scene.overlays().len(), 3);
        assert_eq!(scene.overlays()[0].key(), Some("s1"));
        assert_eq!(scene.overlays()[2].class(), Some("caption"));
    }

    #[test]
    fn test_empty_edge_id_falls_back_to_derived_id() {
        let mut builder = SceneBuilder::new();
        builder.node("a");
        builder.node("b");
        builder.edge("a", "b", Some(""));
        builder.edge("a", "b", Some("ab"));

        let scene = builder.build();
        assert!(scene.edge(Id::new("a->b")).is_some());
        assert!(scene.edge(Id::new("")).is_none());
        assert!(scene.edge(Id::new("ab")).is_some());
        assert_eq!(scene.edges().count(), 2);
    }

    #[test]
    fn test_build_is_a_snapshot() {
        let mut builder = SceneBuilder::new();
        builder.node("a");
        let first = builder.build();
        builder.node("b");
        assert_eq!(first.nodes().count(), 1);
        assert_eq!(builder.build().nodes().count(), 2);
    }
}
