//! Error types for vizkit operations.
//!
//! The builder itself never fails: referential and configuration problems
//! are logged and tolerated. [`VizError`] covers what cannot be tolerated at
//! render time.

use thiserror::Error;

use vizkit_core::identifier::Id;

/// The main error type for vizkit rendering.
#[derive(Debug, Error)]
pub enum VizError {
    /// A node, edge, overlay or the view box resolved to a NaN or infinite coordinate.
    #[error("non-finite {what} on {element}")]
    NonFiniteCoordinate { element: String, what: &'static str },

    #[error("Style error: {0}")]
    Style(String),
}

impl VizError {
    pub(crate) fn non_finite_node(id: Id, what: &'static str) -> Self {
        Self::NonFiniteCoordinate {
            element: format!("node `{id}`"),
            what,
        }
    }

    pub(crate) fn non_finite_edge(id: Id, what: &'static str) -> Self {
        Self::NonFiniteCoordinate {
            element: format!("edge `{id}`"),
            what,
        }
    }

    pub(crate) fn non_finite_overlay(kind: &str, what: &'static str) -> Self {
        Self::NonFiniteCoordinate {
            element: format!("overlay `{kind}`"),
            what,
        }
    }

    pub(crate) fn non_finite_view_box() -> Self {
        Self::NonFiniteCoordinate {
            element: "scene".to_string(),
            what: "view box",
        }
    }
}
