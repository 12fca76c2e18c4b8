//! Node shapes.

/// The outline drawn for a node, centered on the node position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle {
        radius: f64,
    },
    Rect {
        width: f64,
        height: f64,
        corner_radius: Option<f64>,
    },
    Diamond {
        width: f64,
        height: f64,
    },
}

impl Shape {
    /// Radius of the shape every new node starts with.
    pub const DEFAULT_RADIUS: f64 = 10.0;

    /// Returns true if every dimension of the shape is a finite number.
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Circle { radius } => radius.is_finite(),
            Self::Rect {
                width,
                height,
                corner_radius,
            } => width.is_finite() && height.is_finite() && corner_radius.is_none_or(f64::is_finite),
            Self::Diamond { width, height } => width.is_finite() && height.is_finite(),
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Rect { .. } => "rect",
            Self::Diamond { .. } => "diamond",
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::Circle {
            radius: Self::DEFAULT_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_small_circle() {
        assert_eq!(Shape::default(), Shape::Circle { radius: 10.0 });
        assert_eq!(Shape::default().name(), "circle");
    }

    #[test]
    fn test_is_finite() {
        assert!(
            Shape::Rect {
                width: 80.0,
                height: 40.0,
                corner_radius: None
            }
            .is_finite()
        );
        assert!(
            !Shape::Rect {
                width: 80.0,
                height: 40.0,
                corner_radius: Some(f64::NAN)
            }
            .is_finite()
        );
        assert!(
            !Shape::Diamond {
                width: f64::INFINITY,
                height: 1.0
            }
            .is_finite()
        );
    }
}
