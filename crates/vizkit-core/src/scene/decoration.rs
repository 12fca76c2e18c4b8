//! Animation tags, overlay specifications and click handlers.
//!
//! These are the parts of a scene whose meaning is resolved outside of the
//! scene model: animation tags and overlays by their registries at render
//! time, click handlers by the view binding that receives user input.

use std::{fmt, rc::Rc};

use serde_json::Value;

use crate::identifier::Id;

/// A `(kind, params)` pair attached to a node or an edge.
///
/// The kind selects an animation renderer; `params` are opaque to the scene
/// and interpreted by that renderer. Absent params are [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTag {
    kind: String,
    params: Value,
}

impl AnimationTag {
    pub fn new(kind: impl Into<String>, params: Value) -> Self {
        Self {
            kind: kind.into(),
            params,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn params(&self) -> &Value {
        &self.params
    }
}

/// A deferred-render instruction, resolved against the final scene.
///
/// Overlays are not deduplicated: several overlays of the same kind (one per
/// in-flight signal, for instance) are expected.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySpec {
    kind: String,
    params: Value,
    key: Option<String>,
    class: Option<String>,
}

impl OverlaySpec {
    pub fn new(kind: impl Into<String>, params: Value) -> Self {
        Self {
            kind: kind.into(),
            params,
            key: None,
            class: None,
        }
    }

    /// Sets a stable key identifying this overlay across rebuilds (builder style).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Overrides the CSS class used by the overlay renderer (builder style).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn params(&self) -> &Value {
        &self.params
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }
}

/// A shared click callback for a scene element of type `T`.
///
/// The scene only stores handlers; invoking them is the job of the view
/// binding that receives pointer input.
pub struct ClickHandler<T>(Rc<dyn Fn(Id, &T)>);

impl<T> ClickHandler<T> {
    pub fn new(handler: impl Fn(Id, &T) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    /// Invokes the handler for `element` identified by `id`.
    pub fn call(&self, id: Id, element: &T) {
        (self.0)(id, element)
    }
}

impl<T> Clone for ClickHandler<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for ClickHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickHandler(..)")
    }
}
