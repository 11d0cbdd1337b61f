//! Generic forward-filtering engine.
//!
//! [`ForwardFilter`] maintains a belief over a finite state space `0..N` and
//! updates it recursively from a stream of observations:
//!
//! 1. predict: `p(s) = Σ_{s'} T(s', s) × b(s')`
//! 2. weight: `u(s) = O(e | s) × p(s)`
//! 3. normalize: `b'(s) = u(s) / Σ u`
//!
//! The belief starts uniform. Each successful [`ForwardFilter::ingest`]
//! advances the timestep by one; a failed one leaves the filter untouched.

use std::marker::PhantomData;

use crate::common::utils::{argmax, uniform};
use crate::reporter::{NoOpReporter, StepReporter};

use super::errors::FilterError;
use super::prediction::{correct, predict, predict_n};
use super::traits::{Filter, SensorModel, TransitionModel};

/// Forward filter over `num_states` hidden states.
///
/// # Type Parameters
///
/// * `O` - Observation type consumed by the sensor model
/// * `S` - Sensor model, must implement [`SensorModel<O>`]
/// * `T` - Transition model, must implement [`TransitionModel`]
///
/// Pass `&model` for either model to keep ownership on the caller side.
#[derive(Debug, Clone)]
pub struct ForwardFilter<O: ?Sized, S, T> {
    sensor: S,
    transition: T,
    num_states: usize,
    /// Current belief, one entry per state
    belief: Vec<f64>,
    /// Number of observations ingested so far
    timestep: usize,
    _observation: PhantomData<fn(&O)>,
}

impl<O, S, T> ForwardFilter<O, S, T>
where
    O: ?Sized,
    S: SensorModel<O>,
    T: TransitionModel,
{
    /// Create a new filter with a uniform initial belief.
    ///
    /// Fails with [`FilterError::InvalidArgument`] when `num_states == 0`.
    pub fn new(sensor: S, transition: T, num_states: usize) -> Result<Self, FilterError> {
        if num_states == 0 {
            return Err(FilterError::invalid("num_states must be positive"));
        }
        Ok(Self {
            sensor,
            transition,
            num_states,
            belief: uniform(num_states),
            timestep: 0,
            _observation: PhantomData,
        })
    }

    /// Ingest one observation.
    ///
    /// Fails with [`FilterError::DegenerateDistribution`] when the
    /// observation has zero likelihood under every predicted state.
    pub fn ingest(&mut self, observation: &O) -> Result<(), FilterError> {
        self.ingest_with_reporter(observation, &mut NoOpReporter)
    }

    /// Ingest one observation, emitting events to `reporter`.
    pub fn ingest_with_reporter<R: StepReporter + ?Sized>(
        &mut self,
        observation: &O,
        reporter: &mut R,
    ) -> Result<(), FilterError> {
        let posterior = self.posterior_from(&self.belief, observation, reporter)?;
        self.commit(posterior, reporter);
        Ok(())
    }

    /// Ingest the first observation against an explicit prior.
    ///
    /// This replaces the uniform start for this one step: the prior is
    /// propagated and weighted exactly like a stored belief would be. It need
    /// not be normalized, which lets a raw one-hot observation act as the
    /// prior. On failure the filter is unchanged.
    pub fn ingest_with_prior<R: StepReporter + ?Sized>(
        &mut self,
        prior: &[f64],
        observation: &O,
        reporter: &mut R,
    ) -> Result<(), FilterError> {
        self.check_prior(prior)?;
        let posterior = self.posterior_from(prior, observation, reporter)?;
        self.commit(posterior, reporter);
        Ok(())
    }

    /// Replace the belief before the first observation.
    ///
    /// Fails when the filter has already ingested observations, when the
    /// length differs from `num_states`, or when an entry is negative or not
    /// finite.
    pub fn seed(&mut self, prior: Vec<f64>) -> Result<(), FilterError> {
        self.check_prior(&prior)?;
        self.belief = prior;
        Ok(())
    }

    /// Distribution over states at `time`.
    ///
    /// - `0`: the uniform prior, regardless of history
    /// - current timestep: a copy of the stored belief
    /// - later: the belief propagated through the transition model
    ///   `time - timestep` times, without renormalization
    ///
    /// Retrodiction (`0 < time < timestep`) is unsupported and fails with
    /// [`FilterError::InvalidArgument`]. Querying never mutates the filter.
    pub fn query(&self, time: usize) -> Result<Vec<f64>, FilterError> {
        if time == 0 {
            return Ok(uniform(self.num_states));
        }
        if time < self.timestep {
            return Err(FilterError::invalid(format!(
                "cannot query past timestep {} (current timestep is {})",
                time, self.timestep
            )));
        }
        Ok(predict_n(
            &self.transition,
            &self.belief,
            time - self.timestep,
        ))
    }

    /// Current belief (read-only).
    #[inline]
    pub fn belief(&self) -> &[f64] {
        &self.belief
    }

    /// Number of observations ingested so far.
    #[inline]
    pub fn timestep(&self) -> usize {
        self.timestep
    }

    /// Number of hidden states.
    #[inline]
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Most probable state under the current belief (lowest index on ties).
    pub fn most_likely_state(&self) -> Option<usize> {
        argmax(&self.belief)
    }

    /// Sensor model.
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Transition model.
    pub fn transition(&self) -> &T {
        &self.transition
    }

    /// Reset to the uniform belief at timestep 0.
    pub fn reset(&mut self) {
        self.belief = uniform(self.num_states);
        self.timestep = 0;
    }

    /// Reset, emitting an event to `reporter`.
    pub fn reset_with_reporter<R: StepReporter + ?Sized>(&mut self, reporter: &mut R) {
        self.reset();
        reporter.on_reset();
    }

    fn posterior_from<R: StepReporter + ?Sized>(
        &self,
        prior: &[f64],
        observation: &O,
        reporter: &mut R,
    ) -> Result<Vec<f64>, FilterError> {
        let next = self.timestep + 1;
        let predicted = predict(&self.transition, prior);
        reporter.on_prediction(next, &predicted);

        correct(&self.sensor, observation, &predicted, next).map_err(|e| {
            if let FilterError::DegenerateDistribution { timestep, total } = e {
                reporter.on_degenerate(timestep, total);
            }
            e
        })
    }

    fn commit<R: StepReporter + ?Sized>(&mut self, posterior: Vec<f64>, reporter: &mut R) {
        self.belief = posterior;
        self.timestep += 1;
        log::trace!(
            "Forward step committed: t={}, states={}",
            self.timestep,
            self.num_states
        );
        reporter.on_update(self.timestep, &self.belief);
    }

    fn check_prior(&self, prior: &[f64]) -> Result<(), FilterError> {
        if self.timestep != 0 {
            return Err(FilterError::invalid(format!(
                "a prior can only be supplied before the first observation (timestep is {})",
                self.timestep
            )));
        }
        if prior.len() != self.num_states {
            return Err(FilterError::DimensionMismatch {
                expected: self.num_states,
                actual: prior.len(),
                context: "prior length".to_string(),
            });
        }
        if let Some(bad) = prior.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(FilterError::invalid(format!(
                "prior entries must be finite and non-negative, got {}",
                bad
            )));
        }
        Ok(())
    }
}

impl<O, S, T> Filter for ForwardFilter<O, S, T>
where
    O: ?Sized,
    S: SensorModel<O>,
    T: TransitionModel,
{
    type Observation = O;
    type Belief = Vec<f64>;

    fn step(&mut self, observation: &O) -> Result<Vec<f64>, FilterError> {
        self.ingest(observation)?;
        Ok(self.belief.clone())
    }

    fn state(&self) -> &[f64] {
        &self.belief
    }

    fn timestep(&self) -> usize {
        self.timestep
    }

    fn num_states(&self) -> usize {
        self.num_states
    }

    fn reset(&mut self) {
        ForwardFilter::reset(self);
    }
}
