//! Grid state space: cells, shapes and touch frames
//!
//! States of the grid model are cells of an H×W grid, numbered row-major:
//! `index = row * width + col`. Frames are `DMatrix<f64>` of the same shape
//! holding a single active cell (value `1.0`) or none at all.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::filter::FilterError;

/// A cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Row (0 at the top)
    pub row: usize,
    /// Column (0 at the left)
    pub col: usize,
}

impl Cell {
    /// Create a new cell
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Chebyshev (king-move) distance to `other`
    #[inline]
    pub fn chebyshev(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Euclidean distance to `other`
    #[inline]
    pub fn euclidean(&self, other: &Cell) -> f64 {
        let dr = self.row.abs_diff(other.row) as f64;
        let dc = self.col.abs_diff(other.col) as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

/// Cells of one Moore neighborhood (at most 9)
pub type Neighborhood = SmallVec<[Cell; 9]>;

/// Dimensions of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of rows (H)
    pub height: usize,
    /// Number of columns (W)
    pub width: usize,
}

impl GridShape {
    /// Create a shape, rejecting empty grids
    pub fn new(height: usize, width: usize) -> Result<Self, FilterError> {
        if height == 0 || width == 0 {
            return Err(FilterError::invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                height, width
            )));
        }
        Ok(Self { height, width })
    }

    /// Number of cells (N = H·W)
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.height * self.width
    }

    /// Whether `cell` lies inside the grid
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Flat state index of `cell`
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.width + cell.col)
    }

    /// Cell of flat state index `index`
    #[inline]
    pub fn cell(&self, index: usize) -> Option<Cell> {
        (index < self.num_cells()).then(|| Cell::new(index / self.width, index % self.width))
    }

    /// Whether `cell` is on any of the four borders
    #[inline]
    pub fn is_border(&self, cell: Cell) -> bool {
        cell.row == 0 || cell.col == 0 || cell.row + 1 == self.height || cell.col + 1 == self.width
    }

    /// Moore neighborhood of `cell`, clipped to the grid
    ///
    /// Includes `cell` itself. Cells are listed row-major.
    pub fn moore_neighborhood(&self, cell: Cell) -> Neighborhood {
        let rows = cell.row.saturating_sub(1)..=(cell.row + 1).min(self.height - 1);
        let mut out = Neighborhood::new();
        for r in rows {
            for c in cell.col.saturating_sub(1)..=(cell.col + 1).min(self.width - 1) {
                out.push(Cell::new(r, c));
            }
        }
        out
    }

    /// Check that `frame` has this shape
    pub fn check_frame(&self, frame: &DMatrix<f64>) -> Result<(), FilterError> {
        if frame.nrows() != self.height {
            return Err(FilterError::DimensionMismatch {
                expected: self.height,
                actual: frame.nrows(),
                context: "frame rows".to_string(),
            });
        }
        if frame.ncols() != self.width {
            return Err(FilterError::DimensionMismatch {
                expected: self.width,
                actual: frame.ncols(),
                context: "frame columns".to_string(),
            });
        }
        Ok(())
    }

    /// Flatten a frame into a row-major state vector
    pub fn flatten(&self, frame: &DMatrix<f64>) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.num_cells());
        for r in 0..frame.nrows() {
            for c in 0..frame.ncols() {
                out.push(frame[(r, c)]);
            }
        }
        out
    }

    /// Reshape a row-major state vector into an H×W grid
    pub fn to_grid(&self, values: &[f64]) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.height, self.width, values)
    }

    /// Frame with a single active cell
    ///
    /// Returns an all-zero frame when `cell` lies outside the grid.
    pub fn one_hot(&self, cell: Cell) -> DMatrix<f64> {
        let mut frame = DMatrix::zeros(self.height, self.width);
        if self.contains(cell) {
            frame[(cell.row, cell.col)] = 1.0;
        }
        frame
    }
}

/// First active cell of a frame in row-major order
///
/// A cell is active when its value is exactly `1.0`. Returns `None` for a
/// frame without signal.
pub fn active_cell(frame: &DMatrix<f64>) -> Option<Cell> {
    (0..frame.nrows())
        .flat_map(|r| (0..frame.ncols()).map(move |c| Cell::new(r, c)))
        .find(|cell| frame[(cell.row, cell.col)] == 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_rejects_empty() {
        assert!(GridShape::new(0, 3).is_err());
        assert!(GridShape::new(3, 0).is_err());
        assert!(GridShape::new(1, 1).is_ok());
    }

    #[test]
    fn test_index_bijection() {
        let shape = GridShape::new(3, 4).unwrap();
        for i in 0..shape.num_cells() {
            let cell = shape.cell(i).unwrap();
            assert_eq!(shape.index(cell), Some(i));
        }
        assert_eq!(shape.cell(12), None);
        assert_eq!(shape.index(Cell::new(3, 0)), None);
        assert_eq!(shape.index(Cell::new(1, 2)), Some(6));
    }

    #[test]
    fn test_border() {
        let shape = GridShape::new(5, 5).unwrap();
        assert!(shape.is_border(Cell::new(0, 2)));
        assert!(shape.is_border(Cell::new(4, 2)));
        assert!(shape.is_border(Cell::new(2, 0)));
        assert!(shape.is_border(Cell::new(2, 4)));
        assert!(!shape.is_border(Cell::new(2, 1)));
        assert!(!shape.is_border(Cell::new(3, 3)));
    }

    #[test]
    fn test_moore_neighborhood_clipping() {
        let shape = GridShape::new(5, 5).unwrap();
        assert_eq!(shape.moore_neighborhood(Cell::new(2, 2)).len(), 9);
        assert_eq!(shape.moore_neighborhood(Cell::new(0, 2)).len(), 6);
        let corner = shape.moore_neighborhood(Cell::new(0, 0));
        assert_eq!(
            corner.to_vec(),
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 1)
            ]
        );

        let single = GridShape::new(1, 1).unwrap();
        assert_eq!(single.moore_neighborhood(Cell::new(0, 0)).len(), 1);
    }

    #[test]
    fn test_distances() {
        let a = Cell::new(1, 1);
        assert_eq!(a.chebyshev(&Cell::new(3, 2)), 2);
        assert!((a.euclidean(&Cell::new(4, 5)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_active_cell_row_major() {
        let shape = GridShape::new(3, 3).unwrap();
        let mut frame = shape.one_hot(Cell::new(2, 0));
        assert_eq!(active_cell(&frame), Some(Cell::new(2, 0)));

        frame[(1, 2)] = 1.0;
        assert_eq!(active_cell(&frame), Some(Cell::new(1, 2)));

        assert_eq!(active_cell(&DMatrix::zeros(3, 3)), None);
        assert_eq!(shape.one_hot(Cell::new(5, 5)), DMatrix::zeros(3, 3));
    }

    #[test]
    fn test_flatten_round_trip_is_row_major() {
        let shape = GridShape::new(2, 3).unwrap();
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let grid = shape.to_grid(&values);
        assert_eq!(grid[(0, 2)], 2.0);
        assert_eq!(grid[(1, 0)], 3.0);
        assert_eq!(shape.flatten(&grid), values.to_vec());
    }

    #[test]
    fn test_check_frame() {
        let shape = GridShape::new(2, 3).unwrap();
        assert!(shape.check_frame(&DMatrix::zeros(2, 3)).is_ok());
        assert!(matches!(
            shape.check_frame(&DMatrix::zeros(3, 3)),
            Err(FilterError::DimensionMismatch { expected: 2, actual: 3, .. })
        ));
        assert!(matches!(
            shape.check_frame(&DMatrix::zeros(2, 2)),
            Err(FilterError::DimensionMismatch { expected: 3, actual: 2, .. })
        ));
    }
}
