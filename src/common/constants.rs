//! Numerical constants used throughout the filters
//!
//! These are intentionally separate from the model parameters, which are
//! fixed by the sensor and transition models themselves.

/// Tolerance used when checking that a belief sums to one
///
/// Beliefs are renormalized on every update, so accumulated rounding stays
/// many orders of magnitude below this value for any realistic grid.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Self-probability of a cell lying on the grid border
///
/// Border cells have fewer neighbors, so both the sensor and the transition
/// model give the "stay" case a larger share.
pub const BORDER_SELF_PROBABILITY: f64 = 1.0 / 7.0;

/// Probability of each move inside the Moore neighborhood
pub const NEIGHBOR_PROBABILITY: f64 = 1.0 / 9.0;

/// Default grid height (rows)
pub const DEFAULT_GRID_HEIGHT: usize = 20;

/// Default grid width (columns)
pub const DEFAULT_GRID_WIDTH: usize = 20;
