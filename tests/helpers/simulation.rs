//! Seeded noisy-touch simulation for integration tests
//!
//! A finger performs a Moore-neighborhood random walk over the grid; each
//! frame reports the true cell, a nearby cell, or (rarely) nothing at all.

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use touch_hmm_filters_rs::{Cell, GridShape};

/// One simulated timestep
#[derive(Debug, Clone)]
pub struct SimulatedFrame {
    /// Where the finger really is
    pub truth: Cell,
    /// What the sensor reported
    pub frame: DMatrix<f64>,
}

/// Noise settings for [`simulate`]
#[derive(Debug, Clone, Copy)]
pub struct NoiseConfig {
    /// Probability that the reported cell is displaced from the truth
    pub displacement_probability: f64,
    /// Maximum displacement (Chebyshev) when displaced
    pub max_displacement: usize,
    /// Probability that a frame carries no active cell
    pub dropout_probability: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            displacement_probability: 0.5,
            max_displacement: 2,
            dropout_probability: 0.0,
        }
    }
}

fn offset<R: Rng>(rng: &mut R, value: usize, max: usize, limit: usize) -> usize {
    let delta = rng.gen_range(-(max as i64)..=max as i64);
    (value as i64 + delta).clamp(0, limit as i64 - 1) as usize
}

/// Simulate `steps` frames starting from `start`
pub fn simulate(
    shape: GridShape,
    start: Cell,
    steps: usize,
    noise: NoiseConfig,
    seed: u64,
) -> Vec<SimulatedFrame> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut truth = start;
    let mut out = Vec::with_capacity(steps);

    for _ in 0..steps {
        let moves = shape.moore_neighborhood(truth);
        truth = moves[rng.gen_range(0..moves.len())];

        let frame = if rng.gen_bool(noise.dropout_probability) {
            DMatrix::zeros(shape.height, shape.width)
        } else if rng.gen_bool(noise.displacement_probability) {
            let reported = Cell::new(
                offset(&mut rng, truth.row, noise.max_displacement, shape.height),
                offset(&mut rng, truth.col, noise.max_displacement, shape.width),
            );
            shape.one_hot(reported)
        } else {
            shape.one_hot(truth)
        };

        out.push(SimulatedFrame { truth, frame });
    }
    out
}
