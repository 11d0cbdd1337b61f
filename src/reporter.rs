//! Observability for filter execution.
//!
//! This module provides the [`StepReporter`] trait for debugging and research
//! instrumentation. Reporters receive callbacks at key points of each
//! forward-filtering step without polluting the core recursion.
//!
//! # Zero-Cost Abstraction
//!
//! The default [`NoOpReporter`] compiles to zero overhead - all callback
//! methods are empty and will be optimized away by the compiler.
//!
//! # Example
//!
//! ```
//! use touch_hmm_filters_rs::{DebugReporter, FnSensorModel, FnTransitionModel, ForwardFilter};
//!
//! let sensor = FnSensorModel::new(|_: &(), s: usize| if s == 0 { 1.0 } else { 0.5 });
//! let transition = FnTransitionModel::new(|_: usize, _: usize| 0.5);
//! let mut filter = ForwardFilter::new(sensor, transition, 2).unwrap();
//!
//! let mut reporter = DebugReporter::new();
//! filter.ingest_with_reporter(&(), &mut reporter).unwrap();
//!
//! assert_eq!(reporter.prediction_events().len(), 1);
//! assert_eq!(reporter.update_events().len(), 1);
//! ```

// ============================================================================
// StepReporter Trait
// ============================================================================

/// Observability trait for filter step execution.
///
/// All methods have default empty implementations, so you only need
/// to override the events you care about.
///
/// The `timestep` passed to each callback is the timestep the step
/// produces, i.e. the filter's timestep after a successful commit.
pub trait StepReporter {
    /// Called after the transition-only prediction, before the sensor update.
    fn on_prediction(&mut self, _timestep: usize, _predicted: &[f64]) {}

    /// Called after the normalized posterior has been committed.
    fn on_update(&mut self, _timestep: usize, _belief: &[f64]) {}

    /// Called when the normalization total was zero and the step was rejected.
    fn on_degenerate(&mut self, _timestep: usize, _total: f64) {}

    /// Called when the filter is reset to its initial state.
    fn on_reset(&mut self) {}
}

// ============================================================================
// NoOpReporter
// ============================================================================

/// Zero-cost reporter that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReporter;

impl NoOpReporter {
    /// Create a new no-op reporter.
    pub fn new() -> Self {
        Self
    }
}

impl StepReporter for NoOpReporter {}

// ============================================================================
// DebugReporter
// ============================================================================

/// Reporter that captures all events for debugging.
///
/// Stores clones of every distribution passed to it, so memory grows with
/// `steps × num_states`.
#[derive(Debug, Clone, Default)]
pub struct DebugReporter {
    predictions: Vec<(usize, Vec<f64>)>,
    updates: Vec<(usize, Vec<f64>)>,
    degenerates: Vec<(usize, f64)>,
    resets: usize,
}

impl DebugReporter {
    /// Create a new debug reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all captured events.
    pub fn clear(&mut self) {
        self.predictions.clear();
        self.updates.clear();
        self.degenerates.clear();
        self.resets = 0;
    }

    /// Captured prediction events `(timestep, predicted)`.
    pub fn prediction_events(&self) -> &[(usize, Vec<f64>)] {
        &self.predictions
    }

    /// Captured update events `(timestep, belief)`.
    pub fn update_events(&self) -> &[(usize, Vec<f64>)] {
        &self.updates
    }

    /// Captured degenerate events `(timestep, total)`.
    pub fn degenerate_events(&self) -> &[(usize, f64)] {
        &self.degenerates
    }

    /// Number of resets observed.
    pub fn reset_count(&self) -> usize {
        self.resets
    }

    /// Total number of captured events across all types.
    pub fn total_events(&self) -> usize {
        self.predictions.len() + self.updates.len() + self.degenerates.len() + self.resets
    }
}

impl StepReporter for DebugReporter {
    fn on_prediction(&mut self, timestep: usize, predicted: &[f64]) {
        self.predictions.push((timestep, predicted.to_vec()));
    }

    fn on_update(&mut self, timestep: usize, belief: &[f64]) {
        self.updates.push((timestep, belief.to_vec()));
    }

    fn on_degenerate(&mut self, timestep: usize, total: f64) {
        self.degenerates.push((timestep, total));
    }

    fn on_reset(&mut self) {
        self.resets += 1;
    }
}

// ============================================================================
// LoggingReporter
// ============================================================================

/// Reporter that emits events through the `log` crate.
///
/// # Log Levels
///
/// - `on_update`, `on_reset`: DEBUG
/// - `on_prediction`: TRACE
/// - `on_degenerate`: WARN
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReporter {
    /// Whether to include the MAP state and its probability in update logs
    verbose: bool,
}

impl LoggingReporter {
    /// Create a new logging reporter.
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Create a verbose logging reporter that includes the MAP state.
    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl StepReporter for LoggingReporter {
    fn on_prediction(&mut self, timestep: usize, predicted: &[f64]) {
        log::trace!(
            "Prediction for t={}: {} states, mass={:.6}",
            timestep,
            predicted.len(),
            predicted.iter().sum::<f64>()
        );
    }

    fn on_update(&mut self, timestep: usize, belief: &[f64]) {
        if self.verbose {
            match crate::common::utils::argmax(belief) {
                Some(map) => log::debug!(
                    "Update complete t={}: MAP state {} (p={:.4})",
                    timestep,
                    map,
                    belief[map]
                ),
                None => log::debug!("Update complete t={}: empty belief", timestep),
            }
        } else {
            log::debug!("Update complete t={}: {} states", timestep, belief.len());
        }
    }

    fn on_degenerate(&mut self, timestep: usize, total: f64) {
        log::warn!(
            "Degenerate update rejected at t={}: normalization total {}",
            timestep,
            total
        );
    }

    fn on_reset(&mut self) {
        log::debug!("Filter reset");
    }
}

// ============================================================================
// CompositeReporter
// ============================================================================

/// Reporter that forwards events to two child reporters.
#[derive(Debug, Clone)]
pub struct CompositeReporter<A: StepReporter, B: StepReporter> {
    first: A,
    second: B,
}

impl<A: StepReporter, B: StepReporter> CompositeReporter<A, B> {
    /// Create a new composite reporter.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Get a reference to the first reporter.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Get a reference to the second reporter.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Consume and return both reporters.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: StepReporter, B: StepReporter> StepReporter for CompositeReporter<A, B> {
    fn on_prediction(&mut self, timestep: usize, predicted: &[f64]) {
        self.first.on_prediction(timestep, predicted);
        self.second.on_prediction(timestep, predicted);
    }

    fn on_update(&mut self, timestep: usize, belief: &[f64]) {
        self.first.on_update(timestep, belief);
        self.second.on_update(timestep, belief);
    }

    fn on_degenerate(&mut self, timestep: usize, total: f64) {
        self.first.on_degenerate(timestep, total);
        self.second.on_degenerate(timestep, total);
    }

    fn on_reset(&mut self) {
        self.first.on_reset();
        self.second.on_reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_reporter_captures() {
        let mut r = DebugReporter::new();
        r.on_prediction(1, &[0.5, 0.5]);
        r.on_update(1, &[1.0, 0.0]);
        r.on_degenerate(2, 0.0);
        r.on_reset();

        assert_eq!(r.prediction_events(), &[(1, vec![0.5, 0.5])]);
        assert_eq!(r.update_events(), &[(1, vec![1.0, 0.0])]);
        assert_eq!(r.degenerate_events(), &[(2, 0.0)]);
        assert_eq!(r.total_events(), 4);

        r.clear();
        assert_eq!(r.total_events(), 0);
    }

    #[test]
    fn test_composite_forwards_to_both() {
        let mut c = CompositeReporter::new(DebugReporter::new(), DebugReporter::new());
        c.on_update(3, &[1.0]);
        let (a, b) = c.into_parts();
        assert_eq!(a.update_events().len(), 1);
        assert_eq!(b.update_events().len(), 1);
    }

    #[test]
    fn test_logging_reporter_does_not_panic() {
        let mut r = LoggingReporter::verbose();
        r.on_prediction(1, &[]);
        r.on_update(1, &[]);
        r.on_update(1, &[0.2, 0.8]);
        r.on_degenerate(1, 0.0);
        r.on_reset();
    }
}
