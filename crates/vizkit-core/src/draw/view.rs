//! Retained view elements.
//!
//! A [`ViewElement`] is a backend-neutral description of one SVG-like
//! element: a tag, ordered attributes, children and optional text. The
//! renderer produces trees of them; a GUI binding retains them and a markup
//! exporter serializes them.

use std::fmt;

use indexmap::IndexMap;

use crate::identifier::Id;

/// The element types a scene renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Group,
    Line,
    Circle,
    Rect,
    Polygon,
    Text,
}

impl ElementKind {
    /// The SVG tag name of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Group => "g",
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Rect => "rect",
            Self::Polygon => "polygon",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Attributes holding coordinates or lengths.
const GEOMETRY_ATTRIBUTES: [&str; 15] = [
    "x",
    "y",
    "x1",
    "y1",
    "x2",
    "y2",
    "cx",
    "cy",
    "r",
    "width",
    "height",
    "rx",
    "stroke-width",
    "points",
    "transform",
];

/// The scene element a view element forwards pointer input to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    Node(Id),
    Edge(Id),
}

/// A retained element with ordered attributes and children.
///
/// Construction follows the `svg` crate's consuming-builder style:
///
/// ```
/// # use vizkit_core::draw::{ElementKind, ViewElement};
/// let dot = ViewElement::circle()
///     .set("cx", 10.5)
///     .set("cy", 20)
///     .set("class", "viz-signal-shape");
///
/// assert_eq!(dot.kind(), ElementKind::Circle);
/// assert_eq!(dot.attr("cx"), Some("10.5"));
/// assert_eq!(dot.number("cy"), Some(20.0));
/// assert!(dot.has_class("viz-signal-shape"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ViewElement {
    kind: ElementKind,
    attributes: IndexMap<String, String>,
    children: Vec<ViewElement>,
    text: Option<String>,
    target: Option<ClickTarget>,
}

impl ViewElement {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: IndexMap::new(),
            children: Vec::new(),
            text: None,
            target: None,
        }
    }

    pub fn group() -> Self {
        Self::new(ElementKind::Group)
    }

    pub fn line() -> Self {
        Self::new(ElementKind::Line)
    }

    pub fn circle() -> Self {
        Self::new(ElementKind::Circle)
    }

    pub fn rect() -> Self {
        Self::new(ElementKind::Rect)
    }

    pub fn polygon() -> Self {
        Self::new(ElementKind::Polygon)
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            ..Self::new(ElementKind::Text)
        }
    }

    /// Sets an attribute, replacing an earlier value but keeping its position.
    pub fn set(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    /// Appends a child element.
    pub fn add(mut self, child: ViewElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_target(mut self, target: ClickTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn push_child(&mut self, child: ViewElement) {
        self.children.push(child);
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Parses a numeric attribute.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.attr(name)?.parse().ok()
    }

    /// Attributes in the order they were first set.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[ViewElement] {
        &self.children
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn target(&self) -> Option<ClickTarget> {
        self.target
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// This element and all of its descendants, depth-first in document order.
    pub fn descendants(&self) -> Vec<&ViewElement> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    /// The first geometry attribute of this element or a descendant that
    /// holds a NaN or infinite number.
    pub fn non_finite_attribute(&self) -> Option<&'static str> {
        self.descendants().into_iter().find_map(|element| {
            GEOMETRY_ATTRIBUTES
                .into_iter()
                .find(|name| element.attr(name).is_some_and(has_non_finite_number))
        })
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a ViewElement>) {
        out.push(self);
        for child in &self.children {
            child.collect_into(out);
        }
    }
}

/// Scans list and transform values such as `"1,2 3,4"` or `"translate(5, NaN)"`.
fn has_non_finite_number(value: &str) -> bool {
    value
        .split(|c: char| c == ',' || c == '(' || c == ')' || c.is_whitespace())
        .filter_map(|token| token.parse::<f64>().ok())
        .any(|number| !number.is_finite())
}
