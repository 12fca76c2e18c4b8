//! Decision tree model.
//!
//! A fixed two level tree classifies random points of the unit square:
//! the root splits on `x > 0.5`, both children split on `y > 0.5`, and the
//! four leaves predict an XOR-like pattern. Points start at the root; every
//! odd step moves each unfinished point one level down, taking the left
//! ("Yes") branch when the condition holds.

use std::fmt;

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use serde_json::json;

use vizkit::{
    SceneBuilder,
    config::SceneConfig,
    geometry::Point,
    scene::{EdgeLabel, NodeLabel},
};

use crate::{Model, ModelStep};

/// Number of points drawn for each pass when none is given.
pub const DEFAULT_POINT_COUNT: usize = 10;

const ROOT_ID: &str = "root";
const INTERNAL_WIDTH: f64 = 80.0;
const INTERNAL_HEIGHT: f64 = 40.0;
const INTERNAL_CORNER_RADIUS: f64 = 5.0;
const LEAF_RADIUS: f64 = 30.0;
const NODE_LABEL_DY: f64 = 5.0;
const BRANCH_LABEL_DY: f64 = -5.0;

const TREE_STYLESHEET: &str = r#"
.tree-node.internal .viz-node-shape { fill: #eff6ff; stroke: #3b82f6; }
.tree-node.leaf .viz-node-shape { fill: #f0fdf4; stroke: #22c55e; }
.node-label { font-size: 12px; font-weight: 600; }
.tree-link .viz-edge { stroke: #cbd5e1; stroke-width: 2; opacity: 1; }
.link-label { font-size: 11px; fill: #64748b; }
"#;

/// The input feature a node splits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    X,
    Y,
}

impl Feature {
    pub fn value_of(self, point: &DataPoint) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreeNodeKind {
    /// Sends a point to `left` when its feature is above `threshold`,
    /// otherwise to `right`.
    Internal {
        feature: Feature,
        threshold: f64,
        left: String,
        right: String,
    },
    Leaf {
        prediction: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    id: String,
    label: String,
    position: Point,
    kind: TreeNodeKind,
}

impl TreeNode {
    fn internal(id: &str, feature: Feature, left: &str, right: &str, position: Point) -> Self {
        Self {
            id: id.to_string(),
            label: format!("{feature} > 0.5?"),
            position,
            kind: TreeNodeKind::Internal {
                feature,
                threshold: 0.5,
                left: left.to_string(),
                right: right.to_string(),
            },
        }
    }

    fn leaf(id: &str, prediction: &str, position: Point) -> Self {
        Self {
            id: id.to_string(),
            label: format!("Class {prediction}"),
            position,
            kind: TreeNodeKind::Leaf {
                prediction: prediction.to_string(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn kind(&self) -> &TreeNodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, TreeNodeKind::Leaf { .. })
    }
}

/// A point travelling through the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    id: String,
    x: f64,
    y: f64,
    current_node_id: String,
    is_finished: bool,
    history: Vec<String>,
}

impl DataPoint {
    fn at_root(id: String, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            current_node_id: ROOT_ID.to_string(),
            is_finished: false,
            history: vec![ROOT_ID.to_string()],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn current_node_id(&self) -> &str {
        &self.current_node_id
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// Ids of the nodes visited so far, root first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

/// Routes random points through a fixed decision tree.
#[derive(Debug, Clone)]
pub struct DecisionTreeModel {
    tree: Vec<TreeNode>,
    points: Vec<DataPoint>,
    point_count: usize,
    rng: StdRng,
    current_step: usize,
}

impl DecisionTreeModel {
    pub fn new(point_count: usize, seed: u64) -> Self {
        let mut model = Self {
            tree: default_tree(),
            points: Vec::new(),
            point_count,
            rng: StdRng::seed_from_u64(seed),
            current_step: 0,
        };
        model.draw_points();
        model
    }

    /// Nodes in layout order, root first.
    pub fn tree(&self) -> &[TreeNode] {
        &self.tree
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.tree.iter().find(|node| node.id == id)
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn all_finished(&self) -> bool {
        self.points.iter().all(DataPoint::is_finished)
    }

    /// Moves every unfinished point one level down.
    ///
    /// A point that reaches a leaf, or sits on a node the tree does not
    /// know, is finished.
    pub fn step_points(&mut self) {
        let tree = &self.tree;
        let find = |id: &str| tree.iter().find(|node| node.id == id);

        for point in self.points.iter_mut().filter(|point| !point.is_finished) {
            let Some(node) = find(point.current_node_id.as_str()) else {
                point.is_finished = true;
                continue;
            };
            let TreeNodeKind::Internal {
                feature,
                threshold,
                left,
                right,
            } = &node.kind
            else {
                point.is_finished = true;
                continue;
            };

            let next = if feature.value_of(point) > *threshold {
                left
            } else {
                right
            };
            let Some(next) = find(next.as_str()) else {
                continue;
            };

            point.current_node_id = next.id.clone();
            point.history.push(next.id.clone());
            point.is_finished = next.is_leaf();
        }

        debug!(
            finished = self.points.iter().filter(|point| point.is_finished).count(),
            total = self.points.len();
            "Points stepped"
        );
    }

    fn draw_points(&mut self) {
        self.points = (0..self.point_count)
            .map(|i| {
                let x = self.rng.random::<f64>();
                let y = self.rng.random::<f64>();
                DataPoint::at_root(format!("p-{i}"), x, y)
            })
            .collect();
    }
}

impl Default for DecisionTreeModel {
    fn default() -> Self {
        Self::new(DEFAULT_POINT_COUNT, 0)
    }
}

impl Model for DecisionTreeModel {
    fn id(&self) -> &str {
        "tree"
    }

    fn name(&self) -> &str {
        "Decision Tree"
    }

    fn description(&self) -> &str {
        "Data points routed through a small decision tree."
    }

    fn steps(&self) -> Vec<ModelStep> {
        vec![
            ModelStep::new("Points at the root"),
            ModelStep::new("Split on x"),
            ModelStep::new("First split done"),
            ModelStep::new("Split on y"),
            ModelStep::new("Points classified"),
        ]
    }

    fn reset(&mut self) {
        self.draw_points();
        self.current_step = 0;
    }

    fn enter_step(&mut self, step: usize) {
        self.current_step = step;
        if step % 2 == 0 {
            return;
        }
        if self.all_finished() {
            debug!(step; "All points already classified");
        } else {
            self.step_points();
        }
    }

    fn complete_step(&mut self) {}

    fn build_scene(&self, config: &SceneConfig) -> SceneBuilder {
        let mut builder = SceneBuilder::with_config(config);

        for node in &self.tree {
            let TreeNodeKind::Internal { left, right, .. } = &node.kind else {
                continue;
            };
            for (child, answer) in [(left, "Yes"), (right, "No")] {
                builder
                    .edge(&node.id, child, None)
                    .add_class("tree-link")
                    .set_label(
                        EdgeLabel::new(answer)
                            .with_offset(0.0, BRANCH_LABEL_DY)
                            .with_class("link-label"),
                    );
            }
        }

        for node in &self.tree {
            let handle = builder
                .node(&node.id)
                .set_position(node.position.x(), node.position.y())
                .add_class("tree-node");

            let handle = match &node.kind {
                TreeNodeKind::Internal {
                    feature, threshold, ..
                } => handle
                    .set_shape_rect(
                        INTERNAL_WIDTH,
                        INTERNAL_HEIGHT,
                        Some(INTERNAL_CORNER_RADIUS),
                    )
                    .add_class("internal")
                    .set_data(json!({ "feature": feature, "threshold": threshold })),
                TreeNodeKind::Leaf { prediction } => handle
                    .set_shape_circle(LEAF_RADIUS)
                    .add_class("leaf")
                    .set_data(json!({ "prediction": prediction })),
            };

            handle.set_label(
                NodeLabel::new(&node.label)
                    .with_offset(0.0, NODE_LABEL_DY)
                    .with_class("node-label"),
            );
        }

        builder.overlay(
            "data-points",
            json!({ "points": self.points }),
            Some("data-points"),
        );

        builder
    }

    fn stylesheet(&self) -> &'static str {
        TREE_STYLESHEET
    }
}

fn default_tree() -> Vec<TreeNode> {
    vec![
        TreeNode::internal(ROOT_ID, Feature::X, "n1", "n2", Point::new(400.0, 50.0)),
        TreeNode::internal("n1", Feature::Y, "leaf1", "leaf2", Point::new(200.0, 200.0)),
        TreeNode::internal("n2", Feature::Y, "leaf3", "leaf4", Point::new(600.0, 200.0)),
        TreeNode::leaf("leaf1", "A", Point::new(100.0, 400.0)),
        TreeNode::leaf("leaf2", "B", Point::new(300.0, 400.0)),
        TreeNode::leaf("leaf3", "B", Point::new(500.0, 400.0)),
        TreeNode::leaf("leaf4", "A", Point::new(700.0, 400.0)),
    ]
}

#[cfg(test)]
mod tests {
    use vizkit::{identifier::Id, scene::LabelPosition};

    use super::*;

    fn model_with(points: Vec<DataPoint>) -> DecisionTreeModel {
        let mut model = DecisionTreeModel::new(0, 0);
        model.points = points;
        model
    }

    #[test]
    fn test_default_tree() {
        let model = DecisionTreeModel::default();
        assert_eq!(model.tree().len(), 7);
        assert_eq!(model.points().len(), DEFAULT_POINT_COUNT);

        let root = model.node("root").unwrap();
        assert_eq!(root.label(), "x > 0.5?");
        assert_eq!(root.position(), Point::new(400.0, 50.0));
        assert_eq!(model.node("leaf4").unwrap().label(), "Class A");
    }

    #[test]
    fn test_points_follow_the_conditions() {
        let mut model = model_with(vec![
            DataPoint::at_root("p-0".to_string(), 0.8, 0.2),
            DataPoint::at_root("p-1".to_string(), 0.2, 0.9),
            DataPoint::at_root("p-2".to_string(), 0.5, 0.5),
        ]);

        model.step_points();
        let at: Vec<_> = model.points().iter().map(DataPoint::current_node_id).collect();
        assert_eq!(at, ["n1", "n2", "n2"]);
        assert!(!model.all_finished());

        model.step_points();
        let at: Vec<_> = model.points().iter().map(DataPoint::current_node_id).collect();
        assert_eq!(at, ["leaf2", "leaf3", "leaf4"]);
        assert!(model.all_finished());
        assert_eq!(model.points()[0].history(), ["root", "n1", "leaf2"]);

        model.step_points();
        assert_eq!(model.points()[0].history().len(), 3);
    }

    #[test]
    fn test_only_odd_steps_move_points() {
        let mut model = DecisionTreeModel::new(4, 3);
        model.enter_step(0);
        assert!(model.points().iter().all(|p| p.current_node_id() == "root"));

        model.enter_step(1);
        assert!(model.points().iter().all(|p| p.history().len() == 2));

        model.enter_step(2);
        assert!(model.points().iter().all(|p| p.history().len() == 2));

        model.enter_step(3);
        assert!(model.all_finished());
    }

    #[test]
    fn test_reset_draws_new_points() {
        let mut model = DecisionTreeModel::new(5, 11);
        model.enter_step(1);
        model.reset();
        assert!(model.points().iter().all(|p| p.current_node_id() == "root"));
        assert_eq!(model.points()[4].id(), "p-4");
    }

    #[test]
    fn test_scene() {
        let model = DecisionTreeModel::new(3, 5);
        let scene = model.build_scene(&SceneConfig::default()).build();

        assert_eq!(scene.nodes().count(), 7);
        assert_eq!(scene.edges().count(), 6);
        assert!(scene.dangling_edges().is_empty());

        let root = scene.node(Id::new("root")).unwrap();
        assert_eq!(root.class(), Some("tree-node internal"));
        assert_eq!(root.shape().name(), "rect");
        assert_eq!(root.label().unwrap().offset_y(), 5.0);

        let leaf = scene.node(Id::new("leaf1")).unwrap();
        assert_eq!(leaf.class(), Some("tree-node leaf"));
        assert_eq!(leaf.shape().name(), "circle");

        let yes = scene.edge(Id::new("root->n1")).unwrap();
        let label = yes.label().unwrap();
        assert_eq!(label.text(), "Yes");
        assert_eq!(label.position(), LabelPosition::Mid);
        assert_eq!(label.offset_y(), -5.0);
        assert_eq!(scene.edge(Id::new("root->n2")).unwrap().label().unwrap().text(), "No");

        let overlay = &scene.overlays()[0];
        assert_eq!(overlay.kind(), "data-points");
        assert_eq!(overlay.params()["points"][2]["currentNodeId"], "root");
    }
}
