//! Grid layout resolution.
//!
//! A [`GridConfig`] divides the view box into a fixed `columns × rows` matrix
//! inset by padding. Nodes are placed at (possibly fractional) cell
//! coordinates instead of raw pixels:
//!
//! ```text
//!  pad.x   cell_w    cell_w
//!  ├──┼─────────┼─────────┼──┤
//!     │ (0,0)   │ (1,0)   │      start ─ top-left corner of the cell
//!     │    ●    │    ●    │      center ─ middle of the cell
//!     ├─────────┼─────────┤      end ─ bottom-right corner of the cell
//! ```
//!
//! Out-of-range cells are not rejected; callers may place nodes at
//! `row = 1.5` to center a short layer within a taller grid.

use std::{fmt, str::FromStr};

use log::warn;
use thiserror::Error;

use crate::geometry::{Padding, Point, Size, ViewBox};

/// Errors raised when constructing a [`GridConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid must have at least one column and one row, got {columns}x{rows}")]
    EmptyGrid { columns: u32, rows: u32 },

    #[error("grid padding must be finite and non-negative, got ({x}, {y})")]
    InvalidPadding { x: f64, y: f64 },
}

/// Where inside a cell a node is anchored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    /// Top-left corner of the cell
    Start,
    /// Middle of the cell (default)
    #[default]
    Center,
    /// Bottom-right corner of the cell
    End,
}

impl Align {
    /// Fraction of a cell added to the base position.
    fn inset(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
        }
    }
}

impl FromStr for Align {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            _ => Err(format!("unknown alignment `{s}`, expected start, center or end")),
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        };
        f.write_str(name)
    }
}

/// Scene-scoped grid layout configuration.
///
/// # Examples
///
/// ```
/// # use vizkit_core::geometry::{Padding, ViewBox};
/// # use vizkit_core::grid::{Align, GridConfig};
/// let grid = GridConfig::new(4, 1, Padding::uniform(50.0)).unwrap();
/// let position = grid.cell_position(ViewBox::default(), 0.0, 0.0, Align::Center);
///
/// // cell width is (800 - 100) / 4 = 175, cell height is (600 - 100) / 1 = 500
/// assert_eq!(position.x(), 137.5);
/// assert_eq!(position.y(), 300.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    columns: u32,
    rows: u32,
    padding: Padding,
}

impl GridConfig {
    /// Creates a grid configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] when `columns` or `rows` is zero, and
    /// [`GridError::InvalidPadding`] for negative or non-finite padding.
    pub fn new(columns: u32, rows: u32, padding: Padding) -> Result<Self, GridError> {
        if columns == 0 || rows == 0 {
            return Err(GridError::EmptyGrid { columns, rows });
        }
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(padding.x()) || !valid(padding.y()) {
            return Err(GridError::InvalidPadding {
                x: padding.x(),
                y: padding.y(),
            });
        }

        Ok(Self {
            columns,
            rows,
            padding,
        })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Size of a single cell within `view_box`.
    ///
    /// When the padding consumes the whole extent of an axis, the available
    /// extent on that axis is clamped to zero and a warning is logged, so cell
    /// coordinates stay finite.
    pub fn cell_size(&self, view_box: ViewBox) -> Size {
        let available_w = view_box.width() - self.padding.x() * 2.0;
        let available_h = view_box.height() - self.padding.y() * 2.0;

        if available_w < 0.0 || available_h < 0.0 {
            warn!(
                view_width = view_box.width(),
                view_height = view_box.height(),
                padding_x = self.padding.x(),
                padding_y = self.padding.y();
                "Grid padding exceeds the view box, clamping cell size to zero"
            );
        }

        Size::new(
            available_w.max(0.0) / f64::from(self.columns),
            available_h.max(0.0) / f64::from(self.rows),
        )
    }

    /// Pixel position of `(column, row)` anchored by `align`.
    pub fn cell_position(&self, view_box: ViewBox, column: f64, row: f64, align: Align) -> Point {
        let cell = self.cell_size(view_box);
        let inset = align.inset();

        Point::new(
            self.padding.x() + column * cell.width() + cell.width() * inset,
            self.padding.y() + row * cell.height() + cell.height() * inset,
        )
    }

    /// Center of `(column, row)`; shorthand for [`Align::Center`] placement.
    pub fn cell_center(&self, view_box: ViewBox, column: f64, row: f64) -> Point {
        self.cell_position(view_box, column, row, Align::Center)
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn grid_strategy() -> impl Strategy<Value = GridConfig> {
        (1u32..20, 1u32..20, 0.0f64..100.0, 0.0f64..100.0).prop_map(|(columns, rows, x, y)| {
            GridConfig::new(columns, rows, Padding::new(x, y)).expect("strategy yields valid grids")
        })
    }

    fn view_box_strategy() -> impl Strategy<Value = ViewBox> {
        (300.0f64..2000.0, 300.0f64..2000.0).prop_map(|(w, h)| ViewBox::new(w, h))
    }

    /// Centered in-range cells never leave the padded area.
    fn check_centers_stay_inside_padding(
        grid: GridConfig,
        view_box: ViewBox,
    ) -> Result<(), TestCaseError> {
        let padding = grid.padding();
        for column in 0..grid.columns() {
            for row in 0..grid.rows() {
                let center = grid.cell_center(view_box, f64::from(column), f64::from(row));
                prop_assert!(center.x() >= padding.x() - 1e-9);
                prop_assert!(center.x() <= view_box.width() - padding.x() + 1e-9);
                prop_assert!(center.y() >= padding.y() - 1e-9);
                prop_assert!(center.y() <= view_box.height() - padding.y() + 1e-9);
            }
        }
        Ok(())
    }

    /// Adjacent cells are exactly one cell size apart.
    fn check_adjacent_cells_are_one_cell_apart(
        grid: GridConfig,
        view_box: ViewBox,
        column: f64,
        row: f64,
    ) -> Result<(), TestCaseError> {
        let cell = grid.cell_size(view_box);
        let here = grid.cell_position(view_box, column, row, Align::Start);
        let right = grid.cell_position(view_box, column + 1.0, row, Align::Start);
        let below = grid.cell_position(view_box, column, row + 1.0, Align::Start);

        prop_assert!(approx_eq!(f64, right.x() - here.x(), cell.width(), epsilon = 1e-6));
        prop_assert!(approx_eq!(f64, below.y() - here.y(), cell.height(), epsilon = 1e-6));
        Ok(())
    }

    proptest! {
        #[test]
        fn centers_stay_inside_padding(grid in grid_strategy(), view_box in view_box_strategy()) {
            check_centers_stay_inside_padding(grid, view_box)?;
        }

        #[test]
        fn adjacent_cells_are_one_cell_apart(
            grid in grid_strategy(),
            view_box in view_box_strategy(),
            column in -5.0f64..25.0,
            row in -5.0f64..25.0,
        ) {
            check_adjacent_cells_are_one_cell_apart(grid, view_box, column, row)?;
        }
    }
}
