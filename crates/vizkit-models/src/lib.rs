//! Vizkit Models - Step-by-step models rendered with vizkit.
//!
//! Every model implements [`Model`]: it exposes an ordered list of
//! [`ModelStep`]s, reacts to entering and completing a step, and describes
//! its current state as a scene through [`Model::build_scene`]. The step and
//! pass counters live outside the model in a [`Simulation`], so the caller
//! owns scheduling.
//!
//! Two models are provided:
//!
//! - [`NetworkModel`]: a small feedforward neural network whose forward pass
//!   alternates between weighted sums and signals travelling along connections
//! - [`DecisionTreeModel`]: a fixed decision tree that routes random data points
//!   from the root to the leaves
//!
//! # Example
//!
//! ```
//! use vizkit::config::SceneConfig;
//! use vizkit_models::{Model, NetworkModel, Simulation};
//!
//! let mut model = NetworkModel::new(vec![2, 3, 1], 7).unwrap();
//! let mut simulation = Simulation::new();
//!
//! simulation.run_to(&mut model, 2);
//! model.complete_step();
//!
//! let svg = model
//!     .build_scene(&SceneConfig::default())
//!     .render_svg()
//!     .unwrap();
//! assert!(svg.contains("neuron"));
//! ```

mod decision_tree;
mod error;
mod network;
mod simulation;

use serde::Serialize;

use vizkit::{SceneBuilder, config::SceneConfig};

pub use decision_tree::{
    DEFAULT_POINT_COUNT, DataPoint, DecisionTreeModel, Feature, TreeNode, TreeNodeKind,
};
pub use error::ModelError;
pub use network::{
    Connection, DEFAULT_LAYER_SIZES, NetworkModel, Neuron, NeuronDetail, NeuronState, NeuronValue,
    Signal,
};
pub use simulation::Simulation;

/// One entry of a model's step list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelStep {
    label: String,
    auto_advance: bool,
}

impl ModelStep {
    /// A step that waits for the user once its work is complete.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            auto_advance: false,
        }
    }

    /// A step that moves on by itself once its work is complete.
    pub fn auto(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            auto_advance: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }
}

/// A visualized model driven step by step.
///
/// The driver calls [`Model::enter_step`] when the current step changes and
/// [`Model::complete_step`] once the step's animation has finished. Entering
/// a step again discards whatever the previous step left pending.
pub trait Model {
    /// Stable identifier, used on the command line.
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn steps(&self) -> Vec<ModelStep>;

    /// Discards all progress and draws fresh random inputs for a new pass.
    fn reset(&mut self);

    fn enter_step(&mut self, step: usize);

    fn complete_step(&mut self);

    /// Describes the current state as a scene.
    fn build_scene(&self, config: &SceneConfig) -> SceneBuilder;

    /// Model specific CSS appended to the default stylesheet.
    fn stylesheet(&self) -> &'static str {
        ""
    }
}
