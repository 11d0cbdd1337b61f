//! Touchscreen sensor and transition models
//!
//! Both models work on single-active-cell markers. A marker without an
//! active cell (`None`) carries no information and has probability 0
//! against everything.
//!
//! Sensor model `O(obs | state)`:
//! - same cell, on the border: `1/7`
//! - same cell, interior: `1/9`
//! - otherwise: `1/9 × 1/d` where `d` is the Euclidean distance
//!
//! Transition model `T(old, new)`:
//! - same cell, on the border: `1/7`
//! - Chebyshev distance ≤ 1: `1/9`
//! - otherwise: `0`
//!
//! Rows of `T` do not sum to one at the border (fewer neighbors, each still
//! weighted `1/9` or `1/7`). The filter propagates this mass as-is.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::common::constants::{BORDER_SELF_PROBABILITY, NEIGHBOR_PROBABILITY};
use crate::filter::{SensorModel, Support, TransitionModel};

use super::types::{active_cell, Cell, GridShape};

/// Sensor probability between two markers
pub fn sensor_probability(shape: &GridShape, observation: Option<Cell>, state: Option<Cell>) -> f64 {
    let (obs, state) = match (observation, state) {
        (Some(o), Some(s)) => (o, s),
        _ => return 0.0,
    };

    if obs == state {
        return if shape.is_border(obs) {
            BORDER_SELF_PROBABILITY
        } else {
            NEIGHBOR_PROBABILITY
        };
    }

    NEIGHBOR_PROBABILITY * (1.0 / obs.euclidean(&state))
}

/// Transition probability between two markers
pub fn transition_probability(shape: &GridShape, old: Option<Cell>, new: Option<Cell>) -> f64 {
    let (old, new) = match (old, new) {
        (Some(o), Some(n)) => (o, n),
        _ => return 0.0,
    };

    if old == new && shape.is_border(old) {
        BORDER_SELF_PROBABILITY
    } else if old.chebyshev(&new) <= 1 {
        NEIGHBOR_PROBABILITY
    } else {
        0.0
    }
}

/// Distance-decaying touch sensor over an H×W grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSensorModel {
    shape: GridShape,
}

impl GridSensorModel {
    /// Create a sensor model for `shape`
    pub fn new(shape: GridShape) -> Self {
        Self { shape }
    }

    /// Grid shape
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Sensor probability between two marker frames
    pub fn frame_likelihood(&self, observation: &DMatrix<f64>, state: &DMatrix<f64>) -> f64 {
        sensor_probability(&self.shape, active_cell(observation), active_cell(state))
    }
}

impl SensorModel<Option<Cell>> for GridSensorModel {
    #[inline]
    fn likelihood(&self, observation: &Option<Cell>, state: usize) -> f64 {
        sensor_probability(&self.shape, *observation, self.shape.cell(state))
    }
}

/// Moore-neighborhood random walk over an H×W grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTransitionModel {
    shape: GridShape,
}

impl GridTransitionModel {
    /// Create a transition model for `shape`
    pub fn new(shape: GridShape) -> Self {
        Self { shape }
    }

    /// Grid shape
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Transition probability between two marker frames
    pub fn frame_probability(&self, old: &DMatrix<f64>, new: &DMatrix<f64>) -> f64 {
        transition_probability(&self.shape, active_cell(old), active_cell(new))
    }
}

impl TransitionModel for GridTransitionModel {
    #[inline]
    fn probability(&self, from: usize, to: usize) -> f64 {
        transition_probability(&self.shape, self.shape.cell(from), self.shape.cell(to))
    }

    /// Only the clipped Moore neighborhood of `to` can reach it
    fn support(&self, to: usize) -> Option<Support> {
        let cell = self.shape.cell(to)?;
        Some(
            self.shape
                .moore_neighborhood(cell)
                .into_iter()
                .filter_map(|c| self.shape.index(c))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(h: usize, w: usize) -> GridShape {
        GridShape::new(h, w).unwrap()
    }

    #[test]
    fn test_sensor_self_probabilities() {
        let s = shape(5, 5);
        let border = Some(Cell::new(0, 3));
        let interior = Some(Cell::new(2, 2));
        assert_eq!(sensor_probability(&s, border, border), 1.0 / 7.0);
        assert_eq!(sensor_probability(&s, interior, interior), 1.0 / 9.0);
    }

    #[test]
    fn test_sensor_distance_decay() {
        let s = shape(10, 10);
        let obs = Some(Cell::new(2, 2));
        let p1 = sensor_probability(&s, obs, Some(Cell::new(2, 3)));
        let p5 = sensor_probability(&s, obs, Some(Cell::new(5, 6)));
        assert!((p1 - 1.0 / 9.0).abs() < 1e-15);
        assert!((p5 - 1.0 / 45.0).abs() < 1e-15);
        assert!(p5 > 0.0);
    }

    #[test]
    fn test_no_signal_is_zero() {
        let s = shape(4, 4);
        let c = Some(Cell::new(1, 1));
        assert_eq!(sensor_probability(&s, None, c), 0.0);
        assert_eq!(sensor_probability(&s, c, None), 0.0);
        assert_eq!(transition_probability(&s, None, c), 0.0);
        assert_eq!(transition_probability(&s, c, None), 0.0);
    }

    #[test]
    fn test_transition_cases() {
        let s = shape(5, 5);
        let corner = Some(Cell::new(0, 0));
        let mid = Some(Cell::new(2, 2));
        assert_eq!(transition_probability(&s, corner, corner), 1.0 / 7.0);
        assert_eq!(transition_probability(&s, mid, mid), 1.0 / 9.0);
        assert_eq!(transition_probability(&s, mid, Some(Cell::new(1, 3))), 1.0 / 9.0);
        assert_eq!(transition_probability(&s, corner, Some(Cell::new(1, 1))), 1.0 / 9.0);
        assert_eq!(transition_probability(&s, mid, Some(Cell::new(0, 2))), 0.0);
    }

    #[test]
    fn test_border_rows_are_not_stochastic() {
        let t = GridTransitionModel::new(shape(5, 5));
        let corner = 0;
        let row_sum: f64 = (0..25).map(|to| t.probability(corner, to)).sum();
        assert!((row_sum - (1.0 / 7.0 + 3.0 / 9.0)).abs() < 1e-15);

        let interior = 12;
        let row_sum: f64 = (0..25).map(|to| t.probability(interior, to)).sum();
        assert!((row_sum - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_support_covers_every_nonzero_source() {
        let s = shape(4, 6);
        let t = GridTransitionModel::new(s);
        for to in 0..s.num_cells() {
            let support = t.support(to).unwrap();
            for from in 0..s.num_cells() {
                if t.probability(from, to) > 0.0 {
                    assert!(support.contains(&from), "{} -> {} missing", from, to);
                }
            }
        }
        assert!(t.support(s.num_cells()).is_none());
    }

    #[test]
    fn test_model_traits_use_flat_indices() {
        let s = shape(3, 3);
        let sensor = GridSensorModel::new(s);
        let obs = Some(Cell::new(1, 1));
        assert_eq!(sensor.likelihood(&obs, 4), 1.0 / 9.0);
        assert_eq!(sensor.likelihood(&obs, 9), 0.0);
        assert_eq!(sensor.likelihood(&None, 4), 0.0);
    }

    #[test]
    fn test_frame_level_wrappers() {
        let s = shape(3, 3);
        let a = s.one_hot(Cell::new(0, 0));
        let b = s.one_hot(Cell::new(2, 2));
        let empty = DMatrix::zeros(3, 3);

        assert_eq!(GridSensorModel::new(s).frame_likelihood(&a, &a), 1.0 / 7.0);
        assert_eq!(GridSensorModel::new(s).frame_likelihood(&empty, &a), 0.0);
        assert_eq!(GridTransitionModel::new(s).frame_probability(&a, &b), 0.0);
        assert_eq!(GridTransitionModel::new(s).frame_probability(&b, &b), 1.0 / 7.0);
    }
}
