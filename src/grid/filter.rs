//! Touchscreen filter: the generic engine over grid cells.
//!
//! [`TouchscreenFilter`] adapts frames (H×W matrices with one active cell)
//! to the flat state space of [`ForwardFilter`]. The 3×3 neighborhood
//! restriction comes from [`GridTransitionModel::support`], so the grid uses
//! the same recursion as every other model instead of a separate loop.

use nalgebra::DMatrix;

use crate::common::utils::argmax;
use crate::filter::{Filter, FilterError, ForwardFilter};
use crate::reporter::{NoOpReporter, StepReporter};

use super::config::{GridFilterConfig, PriorMode};
use super::model::{GridSensorModel, GridTransitionModel};
use super::types::{active_cell, Cell, GridShape};

type GridEngine = ForwardFilter<Option<Cell>, GridSensorModel, GridTransitionModel>;

/// Single-touch forward filter over an H×W touchscreen.
///
/// # Example
///
/// ```
/// use touch_hmm_filters_rs::{Cell, GridShape, TouchscreenFilter};
///
/// let mut filter = TouchscreenFilter::new(5, 5).unwrap();
/// let frame = GridShape::new(5, 5).unwrap().one_hot(Cell::new(2, 1));
///
/// filter.filter_frame(&frame).unwrap();
/// let belief = filter.filter_frame(&frame).unwrap();
///
/// assert_eq!(belief.shape(), (5, 5));
/// assert_eq!(filter.most_likely_cell(), Some(Cell::new(2, 1)));
/// ```
#[derive(Debug, Clone)]
pub struct TouchscreenFilter {
    config: GridFilterConfig,
    shape: GridShape,
    engine: GridEngine,
}

impl TouchscreenFilter {
    /// Create a filter for an H×W grid with the default first-frame prior.
    pub fn new(height: usize, width: usize) -> Result<Self, FilterError> {
        Self::from_config(GridFilterConfig::new(height, width))
    }

    /// Create a filter from a configuration.
    pub fn from_config(config: GridFilterConfig) -> Result<Self, FilterError> {
        let shape = config.shape()?;
        let engine = ForwardFilter::new(
            GridSensorModel::new(shape),
            GridTransitionModel::new(shape),
            shape.num_cells(),
        )?;
        log::debug!(
            "Touchscreen filter created: {}x{} grid, prior={:?}",
            shape.height,
            shape.width,
            config.prior
        );
        Ok(Self {
            config,
            shape,
            engine,
        })
    }

    /// Ingest one frame and return the belief as an H×W grid.
    ///
    /// With [`PriorMode::FirstFrame`], the first frame itself serves as the
    /// previous belief. A frame without an active cell has zero likelihood
    /// everywhere and fails with [`FilterError::DegenerateDistribution`];
    /// the filter is left unchanged, so the next frame proceeds normally.
    pub fn filter_frame(&mut self, frame: &DMatrix<f64>) -> Result<DMatrix<f64>, FilterError> {
        self.filter_frame_with_reporter(frame, &mut NoOpReporter)
    }

    /// [`Self::filter_frame`], emitting events to `reporter`.
    pub fn filter_frame_with_reporter<R: StepReporter + ?Sized>(
        &mut self,
        frame: &DMatrix<f64>,
        reporter: &mut R,
    ) -> Result<DMatrix<f64>, FilterError> {
        self.shape.check_frame(frame)?;
        let observation = active_cell(frame);
        if observation.is_none() {
            log::debug!("Frame t={} has no active cell", self.engine.timestep() + 1);
        }

        match self.config.prior {
            PriorMode::FirstFrame if self.engine.timestep() == 0 => {
                let prior = self.shape.flatten(frame);
                self.engine
                    .ingest_with_prior(&prior, &observation, reporter)?;
            }
            _ => self.engine.ingest_with_reporter(&observation, reporter)?,
        }

        Ok(self.belief())
    }

    /// Distribution over cells at `time`, as an H×W grid.
    ///
    /// Same contract as [`ForwardFilter::query`].
    pub fn query(&self, time: usize) -> Result<DMatrix<f64>, FilterError> {
        let flat = self.engine.query(time)?;
        Ok(self.shape.to_grid(&flat))
    }

    /// Current belief as an H×W grid.
    pub fn belief(&self) -> DMatrix<f64> {
        self.shape.to_grid(self.engine.belief())
    }

    /// Most probable touch cell (first in row-major order on ties).
    pub fn most_likely_cell(&self) -> Option<Cell> {
        argmax(self.engine.belief()).and_then(|i| self.shape.cell(i))
    }

    /// Probability-weighted mean `(row, col)` of the belief.
    ///
    /// `None` when the belief carries no mass.
    pub fn expected_position(&self) -> Option<(f64, f64)> {
        let belief = self.engine.belief();
        let mass: f64 = belief.iter().sum();
        if mass <= 0.0 {
            return None;
        }
        let (row, col) = belief
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(r, c), (i, &p)| {
                let cell = Cell::new(i / self.shape.width, i % self.shape.width);
                (r + p * cell.row as f64, c + p * cell.col as f64)
            });
        Some((row / mass, col / mass))
    }

    /// Number of frames ingested so far.
    #[inline]
    pub fn timestep(&self) -> usize {
        self.engine.timestep()
    }

    /// Grid shape.
    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Configuration this filter was built from.
    pub fn config(&self) -> &GridFilterConfig {
        &self.config
    }

    /// Underlying flat-state engine (read-only).
    pub fn engine(&self) -> &ForwardFilter<Option<Cell>, GridSensorModel, GridTransitionModel> {
        &self.engine
    }

    /// Reset to timestep 0; the next frame is treated as the first again.
    pub fn reset(&mut self) {
        self.engine.reset();
    }
}

impl Filter for TouchscreenFilter {
    type Observation = DMatrix<f64>;
    type Belief = DMatrix<f64>;

    fn step(&mut self, observation: &DMatrix<f64>) -> Result<DMatrix<f64>, FilterError> {
        self.filter_frame(observation)
    }

    fn state(&self) -> &[f64] {
        self.engine.belief()
    }

    fn timestep(&self) -> usize {
        self.engine.timestep()
    }

    fn num_states(&self) -> usize {
        self.shape.num_cells()
    }

    fn reset(&mut self) {
        TouchscreenFilter::reset(self);
    }
}
