//! Overlay registry.
//!
//! Overlays are deferred-render instructions recorded on a scene as
//! [`OverlaySpec`]s. They are resolved against the final scene when it is
//! rendered, so they can reference nodes by id regardless of the order in
//! which the scene was built. Output goes to the overlays layer, above nodes.
//!
//! Built-in kinds:
//!
//! - `"signal"` ([`SignalOverlay`]): a dot travelling between two nodes
//! - `"grid-labels"` ([`GridLabelsOverlay`]): column and row captions of the scene grid
//! - `"data-points"` ([`DataPointsOverlay`]): markers jittered around the nodes they sit on

mod data_points;
mod grid_labels;
mod signal;

use std::{collections::HashMap, fmt};

use indexmap::IndexMap;
use log::warn;
use serde::de::DeserializeOwned;

use vizkit_core::{
    draw::ViewElement,
    identifier::Id,
    scene::{Edge, Node, OverlaySpec, Scene},
};

pub use data_points::DataPointsOverlay;
pub use grid_labels::GridLabelsOverlay;
pub use signal::SignalOverlay;

/// Input to an [`OverlayRenderer`].
#[derive(Debug, Clone, Copy)]
pub struct OverlayContext<'a> {
    pub spec: &'a OverlaySpec,
    pub nodes_by_id: &'a IndexMap<Id, Node>,
    pub edges_by_id: &'a IndexMap<Id, Edge>,
    pub scene: &'a Scene,
}

impl<'a> OverlayContext<'a> {
    pub fn new(spec: &'a OverlaySpec, scene: &'a Scene) -> Self {
        Self {
            spec,
            nodes_by_id: scene.nodes_by_id(),
            edges_by_id: scene.edges_by_id(),
            scene,
        }
    }

    /// The overlay's class, or `default` when the spec sets none.
    pub fn class_or<'s>(&'s self, default: &'s str) -> &'s str {
        self.spec.class().unwrap_or(default)
    }

    /// Deserializes the spec params, logging and returning `None` when they
    /// do not match `T`.
    pub fn params<T: DeserializeOwned>(&self) -> Option<T> {
        match serde_json::from_value(self.spec.params().clone()) {
            Ok(params) => Some(params),
            Err(err) => {
                warn!(
                    kind = self.spec.kind(),
                    key:? = self.spec.key(),
                    err:%;
                    "Ignoring overlay with invalid params"
                );
                None
            }
        }
    }
}

/// Renders one overlay spec to view elements.
pub trait OverlayRenderer {
    fn render(&self, ctx: &OverlayContext<'_>) -> Vec<ViewElement>;
}

/// Overlay renderers keyed by kind.
///
/// [`OverlayRegistry::default`] carries the built-in renderers;
/// [`OverlayRegistry::new`] starts empty.
pub struct OverlayRegistry {
    renderers: HashMap<String, Box<dyn OverlayRenderer>>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registers a renderer, replacing any earlier one of the same kind.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        renderer: impl OverlayRenderer + 'static,
    ) -> &mut Self {
        self.renderers.insert(kind.into(), Box::new(renderer));
        self
    }

    pub fn lookup(&self, kind: &str) -> Option<&dyn OverlayRenderer> {
        self.renderers.get(kind).map(|renderer| renderer.as_ref())
    }
}

impl Default for OverlayRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry
            .register(SignalOverlay::KIND, SignalOverlay)
            .register(GridLabelsOverlay::KIND, GridLabelsOverlay)
            .register(DataPointsOverlay::KIND, DataPointsOverlay);
        registry
    }
}

impl fmt::Debug for OverlayRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayRegistry")
            .field("kinds", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}
