//! Core traits for filters and models
//!
//! This module defines the model seams (sensor and transition probabilities)
//! and the [`Filter`] trait implemented by every filter in the crate.

use smallvec::SmallVec;

use super::errors::FilterError;

/// States that may transition into a given target state
///
/// Inline capacity covers a full Moore neighborhood without allocating.
pub type Support = SmallVec<[usize; 9]>;

/// Sensor (emission) model: probability of an observation given a state
///
/// Implementations must be pure: the same inputs always give the same
/// probability in `[0, 1]`, and querying has no side effects.
pub trait SensorModel<O: ?Sized>: Send + Sync {
    /// Probability of observing `observation` while in `state`
    fn likelihood(&self, observation: &O, state: usize) -> f64;
}

/// Transition model: probability of moving between two states in one step
///
/// Rows need not sum to one; the engine propagates whatever mass the model
/// assigns.
pub trait TransitionModel: Send + Sync {
    /// Probability of moving from state `from` to state `to`
    fn probability(&self, from: usize, to: usize) -> f64;

    /// States with a possibly nonzero transition into `to`
    ///
    /// `None` (the default) means every state must be considered. Sparse
    /// models return their neighborhood so the prediction sum skips states
    /// that can never contribute.
    fn support(&self, to: usize) -> Option<Support> {
        let _ = to;
        None
    }
}

impl<O: ?Sized, M: SensorModel<O> + ?Sized> SensorModel<O> for &M {
    #[inline]
    fn likelihood(&self, observation: &O, state: usize) -> f64 {
        (**self).likelihood(observation, state)
    }
}

impl<M: TransitionModel + ?Sized> TransitionModel for &M {
    #[inline]
    fn probability(&self, from: usize, to: usize) -> f64 {
        (**self).probability(from, to)
    }

    #[inline]
    fn support(&self, to: usize) -> Option<Support> {
        (**self).support(to)
    }
}

/// Sensor model backed by a closure `Fn(&O, state) -> f64`
///
/// # Example
///
/// ```
/// use touch_hmm_filters_rs::{FnSensorModel, SensorModel};
///
/// let sensor = FnSensorModel::new(|obs: &char, s: usize| {
///     if *obs == 'e' && s == 0 { 1.0 } else { 0.0 }
/// });
/// assert_eq!(sensor.likelihood(&'e', 0), 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnSensorModel<F>(F);

impl<F> FnSensorModel<F> {
    /// Wrap a closure as a sensor model
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<O: ?Sized, F> SensorModel<O> for FnSensorModel<F>
where
    F: Fn(&O, usize) -> f64 + Send + Sync,
{
    #[inline]
    fn likelihood(&self, observation: &O, state: usize) -> f64 {
        (self.0)(observation, state)
    }
}

/// Dense transition model backed by a closure `Fn(from, to) -> f64`
#[derive(Debug, Clone, Copy)]
pub struct FnTransitionModel<F>(F);

impl<F> FnTransitionModel<F> {
    /// Wrap a closure as a transition model
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> TransitionModel for FnTransitionModel<F>
where
    F: Fn(usize, usize) -> f64 + Send + Sync,
{
    #[inline]
    fn probability(&self, from: usize, to: usize) -> f64 {
        (self.0)(from, to)
    }
}

/// Core filter trait implemented by all filters
///
/// This provides a unified interface for feeding observations regardless of
/// how the state space is represented (flat indices or grid cells).
pub trait Filter {
    /// Type of observation consumed per timestep
    type Observation: ?Sized;

    /// Representation of the belief returned after each step
    type Belief;

    /// Ingest one observation and return the updated belief
    fn step(&mut self, observation: &Self::Observation) -> Result<Self::Belief, FilterError>;

    /// Current belief, indexed by flat state index (read-only)
    fn state(&self) -> &[f64];

    /// Number of observations ingested so far
    fn timestep(&self) -> usize;

    /// Number of hidden states
    fn num_states(&self) -> usize;

    /// Reset filter to its initial state
    fn reset(&mut self);
}
