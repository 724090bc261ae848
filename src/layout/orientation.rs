//! Orientation: mapping abstract (row, column) space onto (x, y).
//!
//! Every pass upstream works in row/column space. This is the only place
//! that decides which screen axis carries depth.

use serde::{Deserialize, Serialize};

/// A final position in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which screen axis the tree grows along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// Depth grows downward: x = column, y = row.
    #[default]
    Vertical,
    /// Depth grows rightward: x = row, y = column.
    Horizontal,
}

impl Orientation {
    /// Orientation for the `horizontal` option flag.
    #[inline]
    pub fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    /// Map a (row, column) pair to screen space.
    #[inline]
    pub fn project(self, row: f64, column: f64) -> Position {
        match self {
            Self::Vertical => Position::new(column, row),
            Self::Horizontal => Position::new(row, column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_projection() {
        let orientation = Orientation::from_horizontal(false);
        assert_eq!(orientation, Orientation::Vertical);
        assert_eq!(orientation.project(100.0, 25.0), Position::new(25.0, 100.0));
    }

    #[test]
    fn test_horizontal_projection_swaps_axes() {
        let orientation = Orientation::from_horizontal(true);
        assert_eq!(orientation, Orientation::Horizontal);
        assert_eq!(orientation.project(100.0, 25.0), Position::new(100.0, 25.0));
    }
}
