//! Text labels attached to nodes and edges.

/// A text label drawn at the node position plus an offset.
///
/// # Examples
///
/// ```
/// # use vizkit_core::scene::NodeLabel;
/// let label = NodeLabel::new("0.42").with_offset(0.0, 5.0).with_class("neuron-value");
/// assert_eq!(label.text(), "0.42");
/// assert_eq!(label.offset_y(), 5.0);
/// assert_eq!(label.class(), Some("neuron-value"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    text: String,
    offset_x: f64,
    offset_y: f64,
    class: Option<String>,
}

impl NodeLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the offset from the node position (builder style).
    pub fn with_offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset_x = dx;
        self.offset_y = dy;
        self
    }

    /// Sets the CSS class of the label text (builder style).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }
}

impl From<&str> for NodeLabel {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for NodeLabel {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Anchor of an edge label along the edge line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelPosition {
    /// At the source node
    Start,
    /// Halfway between source and target (default)
    #[default]
    Mid,
    /// At the target node
    End,
}

/// A text label placed along an edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeLabel {
    text: String,
    position: LabelPosition,
    offset_x: f64,
    offset_y: f64,
    class: Option<String>,
}

impl EdgeLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets where along the edge the label is anchored (builder style).
    pub fn with_position(mut self, position: LabelPosition) -> Self {
        self.position = position;
        self
    }

    /// Sets the offset from the anchor point (builder style).
    pub fn with_offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset_x = dx;
        self.offset_y = dy;
        self
    }

    /// Sets the CSS class of the label text (builder style).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> LabelPosition {
        self.position
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }
}

impl From<&str> for EdgeLabel {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for EdgeLabel {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_label_defaults() {
        let label = NodeLabel::from("x > 0.5?");
        assert_eq!(label.text(), "x > 0.5?");
        assert_eq!(label.offset_x(), 0.0);
        assert_eq!(label.offset_y(), 0.0);
        assert_eq!(label.class(), None);
    }

    #[test]
    fn test_edge_label_defaults_to_mid() {
        let label = EdgeLabel::new("Yes");
        assert_eq!(label.position(), LabelPosition::Mid);
        assert_eq!(label.class(), None);
    }

    #[test]
    fn test_edge_label_builder() {
        let label = EdgeLabel::new("0.25")
            .with_position(LabelPosition::End)
            .with_offset(2.0, -5.0)
            .with_class("weight-label");
        assert_eq!(label.position(), LabelPosition::End);
        assert_eq!(label.offset_x(), 2.0);
        assert_eq!(label.offset_y(), -5.0);
        assert_eq!(label.class(), Some("weight-label"));
    }
}
