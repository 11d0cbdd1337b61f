//! Prediction and correction steps of the forward recursion
//!
//! The filter alternates two pure operations:
//! - prediction (Chapman-Kolmogorov): `p(s) = Σ_{s'} T(s', s) × b(s')`
//! - correction (Bayes): `b'(s) ∝ O(e | s) × p(s)`
//!
//! Both write into a fresh buffer; the input belief is never aliased.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::common::utils::normalize_in_place;

use super::errors::FilterError;
use super::traits::{SensorModel, TransitionModel};

/// Predicted mass of a single target state
///
/// Sums over the model's support when it reports one, otherwise over every
/// state. Support indices outside the belief are ignored.
#[inline]
pub fn predicted_mass<T: TransitionModel + ?Sized>(
    transition: &T,
    belief: &[f64],
    target: usize,
) -> f64 {
    match transition.support(target) {
        Some(sources) => sources
            .iter()
            .filter(|&&src| src < belief.len())
            .map(|&src| transition.probability(src, target) * belief[src])
            .sum(),
        None => belief
            .iter()
            .enumerate()
            .map(|(src, &b)| transition.probability(src, target) * b)
            .sum(),
    }
}

/// Transition-only prediction step
///
/// Applies the transition model once to `belief`. The result is NOT
/// renormalized: it carries exactly the mass the model propagates.
#[cfg(not(feature = "rayon"))]
pub fn predict<T: TransitionModel + ?Sized>(transition: &T, belief: &[f64]) -> Vec<f64> {
    (0..belief.len())
        .map(|target| predicted_mass(transition, belief, target))
        .collect()
}

/// Transition-only prediction step (parallel over target states)
///
/// Each target reads only the previous belief, so the targets are
/// independent; the collect is the barrier before any normalization.
#[cfg(feature = "rayon")]
pub fn predict<T: TransitionModel + ?Sized>(transition: &T, belief: &[f64]) -> Vec<f64> {
    (0..belief.len())
        .into_par_iter()
        .map(|target| predicted_mass(transition, belief, target))
        .collect()
}

/// Apply the prediction step `steps` times
pub fn predict_n<T: TransitionModel + ?Sized>(
    transition: &T,
    belief: &[f64],
    steps: usize,
) -> Vec<f64> {
    let mut current = belief.to_vec();
    for _ in 0..steps {
        current = predict(transition, &current);
    }
    current
}

/// Weight a predicted distribution by the observation likelihood
///
/// Returns the unnormalized posterior.
pub fn weight_by_likelihood<O, S>(sensor: &S, observation: &O, predicted: &[f64]) -> Vec<f64>
where
    O: ?Sized,
    S: SensorModel<O> + ?Sized,
{
    predicted
        .iter()
        .enumerate()
        .map(|(state, &p)| sensor.likelihood(observation, state) * p)
        .collect()
}

/// Correction step: weight by likelihood and normalize
///
/// `timestep` is only used to label a [`FilterError::DegenerateDistribution`].
pub fn correct<O, S>(
    sensor: &S,
    observation: &O,
    predicted: &[f64],
    timestep: usize,
) -> Result<Vec<f64>, FilterError>
where
    O: ?Sized,
    S: SensorModel<O> + ?Sized,
{
    let mut posterior = weight_by_likelihood(sensor, observation, predicted);
    match normalize_in_place(&mut posterior) {
        Some(_) => Ok(posterior),
        None => Err(FilterError::DegenerateDistribution {
            timestep,
            total: posterior.iter().sum(),
        }),
    }
}
