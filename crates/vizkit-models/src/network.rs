//! Feedforward neural network model.
//!
//! The forward pass is split into steps so every stage can be shown:
//!
//! - step 0 draws random input values for the input layer
//! - odd step `2k + 1` sends signals along the connections leaving layer `k`,
//!   from input neurons and from neurons whose output exceeds `0.01`
//! - even step `2k` computes the weighted sums of layer `k`; completing the
//!   step applies ReLU to them
//!
//! The arithmetic is illustrative only.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use serde_json::{Map, Value, json};

use vizkit::{
    SceneBuilder,
    config::SceneConfig,
    geometry::Padding,
    grid::Align,
    scene::{EdgeLabel, NodeLabel},
};

use crate::{Model, ModelError, ModelStep};

/// Layer sizes used when none are given.
pub const DEFAULT_LAYER_SIZES: [usize; 4] = [3, 5, 5, 2];

const GRID_PADDING: f64 = 50.0;
const NEURON_RADIUS: f64 = 15.0;
const HIT_AREA: f64 = 10.0;
const ACTIVE_THRESHOLD: f64 = 0.01;
const BIAS_RANGE: f64 = 0.2;
const WEIGHT_SHIFT: f64 = 0.25;
const FLOW_DURATION: &str = "2s";
const GRID_LABEL_OFFSET: f64 = 20.0;

const NETWORK_STYLESHEET: &str = r#"
.neuron .viz-node-shape { fill: #f8fafc; stroke: #94a3b8; }
.neuron.active .viz-node-shape { stroke: #2563eb; stroke-width: 3; }
.neuron.positive .viz-node-shape { fill: #dcfce7; }
.neuron.negative .viz-node-shape { fill: #fee2e2; }
.neuron.inactive .viz-node-shape { fill: #e2e8f0; }
.neuron-value { font-size: 9px; opacity: 0; }
.neuron-value.visible { opacity: 1; }
.connection .viz-edge { stroke: #94a3b8; }
.weight-label { font-size: 8px; fill: #64748b; }
"#;

/// A neuron and its bias.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neuron {
    layer: usize,
    index: usize,
    bias: f64,
}

impl Neuron {
    /// Node id, `"{layer}-{index}"`.
    pub fn id(&self) -> String {
        neuron_id(self.layer, self.index)
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

/// A weighted connection from layer `source_layer` to the next layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connection {
    source_layer: usize,
    source_index: usize,
    target_index: usize,
    weight: f64,
}

impl Connection {
    /// Edge id, `"l{layer}-n{source}-to-l{layer + 1}-n{target}"`.
    pub fn id(&self) -> String {
        format!(
            "l{}-n{}-to-l{}-n{}",
            self.source_layer,
            self.source_index,
            self.source_layer + 1,
            self.target_index
        )
    }

    pub fn source_id(&self) -> String {
        neuron_id(self.source_layer, self.source_index)
    }

    pub fn target_id(&self) -> String {
        neuron_id(self.source_layer + 1, self.target_index)
    }

    pub fn source_layer(&self) -> usize {
        self.source_layer
    }

    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NeuronState {
    /// The weighted sum is known; activation is pending.
    Sum,
    Active,
}

/// The value shown on a neuron.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NeuronValue {
    pub sum: f64,
    pub output: f64,
    pub state: NeuronState,
}

impl NeuronValue {
    fn input(value: f64) -> Self {
        Self {
            sum: value,
            output: value,
            state: NeuronState::Active,
        }
    }

    fn summed(sum: f64) -> Self {
        Self {
            sum,
            output: sum,
            state: NeuronState::Sum,
        }
    }

    fn activated(self) -> Self {
        Self {
            output: self.sum.max(0.0),
            state: NeuronState::Active,
            ..self
        }
    }

    /// The label text and the state class of a neuron showing this value.
    fn display(&self) -> (String, &'static str) {
        match self.state {
            NeuronState::Sum => {
                let class = if self.sum < 0.0 { "negative" } else { "positive" };
                (format!("{:.2}", self.sum), class)
            }
            NeuronState::Active if self.output == 0.0 => ("0.00".to_string(), "inactive"),
            NeuronState::Active => (format!("{:.2}", self.output), "positive"),
        }
    }
}

/// A signal travelling along one connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    id: String,
    source_layer: usize,
    source_index: usize,
    target_index: usize,
    magnitude: f64,
    progress: f64,
}

impl Signal {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from_id(&self) -> String {
        neuron_id(self.source_layer, self.source_index)
    }

    pub fn to_id(&self) -> String {
        neuron_id(self.source_layer + 1, self.target_index)
    }

    /// The output of the source neuron.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }
}

/// What a click on a neuron reveals; attached to the node as its data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeuronDetail {
    pub layer_index: usize,
    pub neuron_index: usize,
    pub bias: f64,
    pub output: f64,
    pub inputs: Vec<f64>,
    pub weights: Vec<f64>,
}

/// A feedforward network stepped through its forward pass.
#[derive(Debug, Clone)]
pub struct NetworkModel {
    layer_sizes: Vec<usize>,
    rng: StdRng,
    neurons: Vec<Neuron>,
    connections: Vec<Connection>,
    values: BTreeMap<(usize, usize), NeuronValue>,
    active_layer: Option<usize>,
    signals: Vec<Signal>,
    current_step: usize,
}

impl NetworkModel {
    /// Creates a network with random biases and weights drawn from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TooFewLayers`] for fewer than two layers and
    /// [`ModelError::EmptyNetwork`] when every layer is empty.
    pub fn new(layer_sizes: Vec<usize>, seed: u64) -> Result<Self, ModelError> {
        if layer_sizes.len() < 2 {
            return Err(ModelError::TooFewLayers(layer_sizes.len()));
        }
        if layer_sizes.iter().all(|&size| size == 0) {
            return Err(ModelError::EmptyNetwork);
        }
        Ok(Self::generate(layer_sizes, seed))
    }

    fn generate(layer_sizes: Vec<usize>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut neurons = Vec::new();
        for (layer, &size) in layer_sizes.iter().enumerate() {
            for index in 0..size {
                neurons.push(Neuron {
                    layer,
                    index,
                    bias: rng.random_range(-BIAS_RANGE..BIAS_RANGE),
                });
            }
        }

        let mut connections = Vec::new();
        for (source_layer, pair) in layer_sizes.windows(2).enumerate() {
            for source_index in 0..pair[0] {
                for target_index in 0..pair[1] {
                    let base = rng.random::<f64>() * 2.0 - 1.0;
                    connections.push(Connection {
                        source_layer,
                        source_index,
                        target_index,
                        weight: (base + WEIGHT_SHIFT).clamp(-1.0, 1.0),
                    });
                }
            }
        }

        info!(
            layers:? = layer_sizes,
            neurons = neurons.len(),
            connections = connections.len(),
            seed;
            "Network initialized"
        );

        Self {
            layer_sizes,
            rng,
            neurons,
            connections,
            values: BTreeMap::new(),
            active_layer: None,
            signals: Vec::new(),
            current_step: 0,
        }
    }

    /// Creates a network with [`DEFAULT_LAYER_SIZES`].
    pub fn with_default_layers(seed: u64) -> Self {
        Self::generate(DEFAULT_LAYER_SIZES.to_vec(), seed)
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn value(&self, layer: usize, index: usize) -> Option<&NeuronValue> {
        self.values.get(&(layer, index))
    }

    /// The layer currently highlighted, if any.
    pub fn active_layer(&self) -> Option<usize> {
        self.active_layer
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Moves every signal to `progress` along its connection, clamped to `0..=1`.
    pub fn advance_signals(&mut self, progress: f64) {
        let progress = progress.clamp(0.0, 1.0);
        for signal in &mut self.signals {
            signal.progress = progress;
        }
    }

    /// Collects the inputs and weights feeding the neuron `index` of `layer`.
    pub fn neuron_detail(&self, layer: usize, index: usize) -> Option<NeuronDetail> {
        let neuron = self.neuron(layer, index)?;
        let incoming: Vec<&Connection> = self
            .connections
            .iter()
            .filter(|c| c.source_layer + 1 == layer && c.target_index == index)
            .collect();

        Some(NeuronDetail {
            layer_index: layer,
            neuron_index: index,
            bias: neuron.bias,
            output: self.output(layer, index),
            inputs: incoming
                .iter()
                .map(|c| self.output(c.source_layer, c.source_index))
                .collect(),
            weights: incoming.iter().map(|c| c.weight).collect(),
        })
    }

    /// Captions for the grid columns; empty layers are skipped.
    pub fn layer_labels(&self) -> Vec<(usize, &'static str)> {
        let populated: Vec<usize> = self
            .layer_sizes
            .iter()
            .enumerate()
            .filter(|&(_, &size)| size > 0)
            .map(|(layer, _)| layer)
            .collect();

        populated
            .iter()
            .enumerate()
            .map(|(position, &layer)| {
                let label = if position == 0 {
                    "Input Layer"
                } else if position == populated.len() - 1 {
                    "Output Layer"
                } else {
                    "Hidden Layer"
                };
                (layer, label)
            })
            .collect()
    }

    fn neuron(&self, layer: usize, index: usize) -> Option<&Neuron> {
        self.neurons
            .iter()
            .find(|neuron| neuron.layer == layer && neuron.index == index)
    }

    fn output(&self, layer: usize, index: usize) -> f64 {
        self.value(layer, index).map_or(0.0, |value| value.output)
    }

    fn seed_inputs(&mut self) {
        self.values.clear();
        let size = self.layer_sizes.first().copied().unwrap_or_default();
        for index in 0..size {
            let value = self.rng.random::<f64>();
            self.values.insert((0, index), NeuronValue::input(value));
        }
        debug!(inputs = size; "Input values drawn");
    }

    fn compute_sums(&mut self, layer: usize) {
        let size = self.layer_sizes[layer];
        for index in 0..size {
            let bias = self.neuron(layer, index).map_or(0.0, |neuron| neuron.bias);
            let weighted: f64 = self
                .connections
                .iter()
                .filter(|c| c.source_layer + 1 == layer && c.target_index == index)
                .map(|c| self.output(c.source_layer, c.source_index) * c.weight)
                .sum();
            self.values
                .insert((layer, index), NeuronValue::summed(weighted + bias));
        }
        debug!(layer, neurons = size; "Weighted sums computed");
    }

    fn activate(&mut self, layer: usize) {
        for value in self.values.range_mut((layer, 0)..(layer + 1, 0)).map(|(_, v)| v) {
            if value.state == NeuronState::Sum {
                *value = value.activated();
            }
        }
        debug!(layer; "Layer activated");
    }

    fn create_signals(&mut self, source_layer: usize) {
        let signals: Vec<Signal> = self
            .connections
            .iter()
            .filter(|c| c.source_layer == source_layer)
            .filter_map(|c| {
                let value = self.value(c.source_layer, c.source_index);
                let is_input = c.source_layer == 0;
                let is_active = value.is_some_and(|value| value.output > ACTIVE_THRESHOLD);
                (is_input || is_active).then(|| Signal {
                    id: format!("sig-{}", c.id()),
                    source_layer: c.source_layer,
                    source_index: c.source_index,
                    target_index: c.target_index,
                    magnitude: value.map_or(0.0, |value| value.output),
                    progress: 0.0,
                })
            })
            .collect();

        debug!(source_layer, signals = signals.len(); "Signals created");
        self.signals = signals;
    }
}

impl Model for NetworkModel {
    fn id(&self) -> &str {
        "network"
    }

    fn name(&self) -> &str {
        "Artificial Neural Network"
    }

    fn description(&self) -> &str {
        "A classic feedforward neural network visualization."
    }

    fn steps(&self) -> Vec<ModelStep> {
        let mut steps = vec![ModelStep::new("Input values")];
        for layer in 1..self.layer_sizes.len() {
            steps.push(ModelStep::auto(format!("Signals to layer {layer}")));
            steps.push(ModelStep::new(format!("Activate layer {layer}")));
        }
        steps
    }

    fn reset(&mut self) {
        self.values.clear();
        self.signals.clear();
        self.active_layer = None;
        self.current_step = 0;
    }

    fn enter_step(&mut self, step: usize) {
        self.current_step = step;
        self.signals.clear();

        if step == 0 {
            self.seed_inputs();
            self.active_layer = Some(0);
        } else if step % 2 == 0 {
            let layer = step / 2;
            if layer >= self.layer_sizes.len() {
                warn!(step; "Step is past the output layer");
                self.active_layer = None;
                return;
            }
            self.active_layer = Some(layer);
            self.compute_sums(layer);
        } else {
            self.active_layer = None;
            self.create_signals((step - 1) / 2);
        }
    }

    fn complete_step(&mut self) {
        match self.current_step {
            0 => {}
            step if step % 2 == 0 => self.activate(step / 2),
            _ => self.advance_signals(1.0),
        }
    }

    fn build_scene(&self, config: &SceneConfig) -> SceneBuilder {
        let mut builder = SceneBuilder::with_config(config);

        let rows = self.layer_sizes.iter().copied().max().unwrap_or_default();
        builder.set_grid(
            self.layer_sizes.len() as u32,
            rows as u32,
            Padding::new(GRID_PADDING, GRID_PADDING),
        );

        for neuron in &self.neurons {
            let value = self.value(neuron.layer, neuron.index);
            let size = self.layer_sizes[neuron.layer];
            let row = neuron.index as f64 + (rows - size) as f64 / 2.0;

            let mut node = builder
                .node(&neuron.id())
                .set_cell(neuron.layer as f64, row, Align::Center)
                .set_shape_circle(NEURON_RADIUS)
                .add_class("neuron");
            if self.active_layer == Some(neuron.layer) {
                node = node.add_class("active");
            }

            let label = match value {
                Some(value) => {
                    let (text, state) = value.display();
                    node = node.add_class(state);
                    NodeLabel::new(text).with_class("neuron-value visible")
                }
                None => NodeLabel::new("").with_class("neuron-value"),
            };
            node = node.set_label(label);

            if let Some(detail) = self.neuron_detail(neuron.layer, neuron.index) {
                node.set_data(&detail).set_on_click(move |id, _node| {
                    info!(
                        neuron:% = id,
                        bias = detail.bias,
                        output = detail.output,
                        inputs = detail.inputs.len();
                        "Neuron selected"
                    );
                });
            }
        }

        for connection in &self.connections {
            let edge = builder
                .edge(
                    &connection.source_id(),
                    &connection.target_id(),
                    Some(&connection.id()),
                )
                .set_label(
                    EdgeLabel::new(format!("{:.2}", connection.weight)).with_class("weight-label"),
                )
                .add_class("connection")
                .set_hit_area(HIT_AREA)
                .set_data(connection);

            let flowing = self.active_layer == Some(connection.source_layer)
                && self
                    .value(connection.source_layer, connection.source_index)
                    .is_some_and(|value| value.sum > 0.0)
                && connection.weight > 0.0;
            if flowing {
                edge.add_animation("flow", json!({ "duration": FLOW_DURATION }));
            }
        }

        for signal in &self.signals {
            builder.overlay(
                "signal",
                json!({
                    "from": signal.from_id(),
                    "to": signal.to_id(),
                    "progress": signal.progress,
                    "magnitude": signal.magnitude,
                }),
                Some(&signal.id),
            );
        }

        let col_labels: Map<String, Value> = self
            .layer_labels()
            .into_iter()
            .map(|(layer, label)| (layer.to_string(), Value::from(label)))
            .collect();
        builder.overlay(
            "grid-labels",
            json!({ "colLabels": col_labels, "yOffset": GRID_LABEL_OFFSET }),
            None,
        );

        builder
    }

    fn stylesheet(&self) -> &'static str {
        NETWORK_STYLESHEET
    }
}

fn neuron_id(layer: usize, index: usize) -> String {
    format!("{layer}-{index}")
}
