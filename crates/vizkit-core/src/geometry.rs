//! Geometric primitives for scene layout and positioning.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in scene space
//! - [`Size`] - Width and height dimensions
//! - [`ViewBox`] - The coordinate extent of a scene
//! - [`Padding`] - Horizontal and vertical padding of a grid
//!
//! # Coordinate System
//!
//! Vizkit uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Coordinates are `f64` so that grid placement can be asserted exactly.

/// A 2D point representing a position in scene coordinate space.
///
/// # Examples
///
/// ```
/// # use vizkit_core::geometry::Point;
/// let from = Point::new(0.0, 0.0);
/// let to = Point::new(100.0, 40.0);
///
/// let halfway = from.lerp(to, 0.5);
/// assert_eq!(halfway.x(), 50.0);
/// assert_eq!(halfway.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Moves the point by the given offsets.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        self.lerp(other, 0.5)
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    ///
    /// `t` is not clamped.
    pub fn lerp(self, other: Point, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Returns true if both coordinates are finite numbers.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }
}

/// The coordinate extent of a scene. All positions are expressed in its space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    width: f64,
    height: f64,
}

impl ViewBox {
    /// Default width used when no view box is set.
    pub const DEFAULT_WIDTH: f64 = 800.0;
    /// Default height used when no view box is set.
    pub const DEFAULT_HEIGHT: f64 = 600.0;

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns true if both dimensions are finite numbers.
    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

/// Padding applied on both sides of each axis of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    x: f64,
    y: f64,
}

impl Padding {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same padding on both axes.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Horizontal padding, applied on the left and on the right.
    pub fn x(self) -> f64 {
        self.x
    }

    /// Vertical padding, applied at the top and at the bottom.
    pub fn y(self) -> f64 {
        self.y
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::new(20.0, 20.0)
    }
}
