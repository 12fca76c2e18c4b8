//! Animation registry.
//!
//! Nodes and edges carry [`AnimationTag`]s: a kind plus opaque params. At
//! render time each tag is looked up in an [`AnimationRegistry`] and turned
//! into CSS classes and inline style properties on the element's group.
//! Kinds without a renderer are ignored.
//!
//! # Example
//!
//! ```
//! # use serde_json::json;
//! # use vizkit::animation::{AnimationRegistry, Element};
//! # use vizkit::scene::{AnimationTag, Edge};
//! # use vizkit::identifier::Id;
//! let registry = AnimationRegistry::default();
//! let edge = Edge::new(Id::new("a->b"), Id::new("a"), Id::new("b"));
//! let tags = [AnimationTag::new("flow", json!({"duration": "1s"}))];
//!
//! let resolved = registry.resolve(&tags, Element::Edge(&edge));
//! assert_eq!(resolved.class_string(), "viz-anim-flow");
//! assert_eq!(resolved.style_string(), "--viz-anim-duration: 1s; ");
//! ```

use std::{collections::HashMap, fmt, rc::Rc};

use indexmap::IndexMap;
use log::trace;
use serde_json::Value;

use vizkit_core::{
    identifier::Id,
    scene::{AnimationTag, Edge, Node},
};

/// The scene element an animation is applied to.
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    Node(&'a Node),
    Edge(&'a Edge),
}

impl Element<'_> {
    pub fn id(&self) -> Id {
        match self {
            Self::Node(node) => node.id(),
            Self::Edge(edge) => edge.id(),
        }
    }

    pub fn target(&self) -> AnimationTarget {
        match self {
            Self::Node(_) => AnimationTarget::Node,
            Self::Edge(_) => AnimationTarget::Edge,
        }
    }
}

/// Which kind of element a renderer is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    Node,
    Edge,
}

/// Input to an [`AnimationRenderer`].
#[derive(Debug, Clone, Copy)]
pub struct AnimationContext<'a> {
    pub tag: &'a AnimationTag,
    pub element: Element<'a>,
}

/// An inline style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for StyleValue {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

/// Maps an animation tag to CSS classes and inline style.
///
/// Both methods default to contributing nothing.
pub trait AnimationRenderer {
    fn class(&self, _ctx: &AnimationContext<'_>) -> Option<String> {
        None
    }

    fn style(&self, _ctx: &AnimationContext<'_>) -> Vec<(String, StyleValue)> {
        Vec::new()
    }
}

/// The combined effect of all animation tags on one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedAnimation {
    classes: Vec<String>,
    style: IndexMap<String, StyleValue>,
}

impl ResolvedAnimation {
    /// Classes in tag order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Style properties in first-set order; later tags override values.
    pub fn style(&self) -> &IndexMap<String, StyleValue> {
        &self.style
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.style.is_empty()
    }

    pub fn class_string(&self) -> String {
        self.classes.join(" ")
    }

    /// Inline style text, each property written as `name: value; `.
    pub fn style_string(&self) -> String {
        self.style
            .iter()
            .map(|(name, value)| format!("{name}: {value}; "))
            .collect()
    }
}

/// Animation renderers keyed by kind, separately for nodes and edges.
///
/// [`AnimationRegistry::default`] carries the built-in renderers;
/// [`AnimationRegistry::new`] starts empty.
#[derive(Clone)]
pub struct AnimationRegistry {
    node: HashMap<String, Rc<dyn AnimationRenderer>>,
    edge: HashMap<String, Rc<dyn AnimationRenderer>>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self {
            node: HashMap::new(),
            edge: HashMap::new(),
        }
    }

    /// Registers a renderer for both nodes and edges, replacing earlier ones.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        renderer: impl AnimationRenderer + 'static,
    ) -> &mut Self {
        let kind = kind.into();
        let renderer: Rc<dyn AnimationRenderer> = Rc::new(renderer);
        self.node.insert(kind.clone(), Rc::clone(&renderer));
        self.edge.insert(kind, renderer);
        self
    }

    pub fn register_node(
        &mut self,
        kind: impl Into<String>,
        renderer: impl AnimationRenderer + 'static,
    ) -> &mut Self {
        self.node.insert(kind.into(), Rc::new(renderer));
        self
    }

    pub fn register_edge(
        &mut self,
        kind: impl Into<String>,
        renderer: impl AnimationRenderer + 'static,
    ) -> &mut Self {
        self.edge.insert(kind.into(), Rc::new(renderer));
        self
    }

    pub fn lookup(&self, kind: &str, target: AnimationTarget) -> Option<&dyn AnimationRenderer> {
        let map = match target {
            AnimationTarget::Node => &self.node,
            AnimationTarget::Edge => &self.edge,
        };
        map.get(kind).map(|renderer| renderer.as_ref())
    }

    /// Resolves `tags` in order against the renderers registered for `element`.
    pub fn resolve(&self, tags: &[AnimationTag], element: Element<'_>) -> ResolvedAnimation {
        let mut resolved = ResolvedAnimation::default();

        for tag in tags {
            let Some(renderer) = self.lookup(tag.kind(), element.target()) else {
                trace!(kind = tag.kind(), element:% = element.id(); "No animation renderer registered");
                continue;
            };

            let ctx = AnimationContext { tag, element };
            if let Some(class) = renderer.class(&ctx) {
                resolved.classes.push(class);
            }
            for (name, value) in renderer.style(&ctx) {
                resolved.style.insert(name, value);
            }
        }

        resolved
    }
}

impl Default for AnimationRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register_edge(FlowAnimation::KIND, FlowAnimation);
        registry
    }
}

impl fmt::Debug for AnimationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRegistry")
            .field("node", &self.node.keys().collect::<Vec<_>>())
            .field("edge", &self.edge.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Moves a dashed stroke along an edge.
///
/// Params: `{ "duration": "<css time>" }` or a number of seconds, default `"2s"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowAnimation;

impl FlowAnimation {
    pub const KIND: &'static str = "flow";
    pub const CLASS: &'static str = "viz-anim-flow";
    pub const DEFAULT_DURATION: &'static str = "2s";
}

impl AnimationRenderer for FlowAnimation {
    fn class(&self, _ctx: &AnimationContext<'_>) -> Option<String> {
        Some(Self::CLASS.to_string())
    }

    fn style(&self, ctx: &AnimationContext<'_>) -> Vec<(String, StyleValue)> {
        let duration = match ctx.tag.params().get("duration") {
            Some(Value::String(duration)) => StyleValue::from(duration.as_str()),
            Some(Value::Number(seconds)) => StyleValue::Text(format!("{seconds}s")),
            _ => StyleValue::from(Self::DEFAULT_DURATION),
        };
        vec![("--viz-anim-duration".to_string(), duration)]
    }
}
