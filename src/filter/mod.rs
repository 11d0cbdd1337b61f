//! Generic forward-filtering engine
//!
//! This module provides the domain-agnostic filter and its seams:
//!
//! - [`Filter`] - Core trait implemented by all filters
//! - [`SensorModel`] - Emission probabilities `O(e | s)`
//! - [`TransitionModel`] - Transition probabilities `T(s, s')`, optionally sparse
//! - [`ForwardFilter`] - The recursive Bayesian update over `0..N`

pub mod errors;
pub mod forward;
pub mod prediction;
pub mod traits;

pub use errors::FilterError;
pub use forward::ForwardFilter;
pub use traits::{
    Filter, FnSensorModel, FnTransitionModel, SensorModel, Support, TransitionModel,
};
