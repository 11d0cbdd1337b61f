//! Error types for filters and models
//!
//! Every fallible operation returns a [`FilterError`] instead of panicking.

use std::fmt;

/// Errors that can occur while constructing or running a filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// An argument was outside the supported domain
    InvalidArgument {
        /// Description of the offending argument
        description: String,
    },

    /// The normalization total of an update was zero (or not finite)
    ///
    /// The observation has zero likelihood under every state given the
    /// current belief, so no posterior exists.
    DegenerateDistribution {
        /// Timestep the failed observation would have produced
        timestep: usize,
        /// The offending normalization total
        total: f64,
    },

    /// Dimension mismatch between expected and actual
    DimensionMismatch {
        /// What was expected
        expected: usize,
        /// What was received
        actual: usize,
        /// Context (e.g., "prior length", "frame rows")
        context: String,
    },
}

impl FilterError {
    /// Shorthand for [`FilterError::InvalidArgument`]
    pub fn invalid(description: impl Into<String>) -> Self {
        FilterError::InvalidArgument {
            description: description.into(),
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidArgument { description } => {
                write!(f, "Invalid argument: {}", description)
            }
            FilterError::DegenerateDistribution { timestep, total } => {
                write!(
                    f,
                    "Degenerate distribution at timestep {}: normalization total is {}",
                    timestep, total
                )
            }
            FilterError::DimensionMismatch {
                expected,
                actual,
                context,
            } => {
                write!(
                    f,
                    "Dimension mismatch for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for FilterError {}
