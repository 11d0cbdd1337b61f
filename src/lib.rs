/*!
# Touch HMM filters

Forward filtering for Hidden Markov Models, with a touchscreen instantiation
that tracks a single noisy touch point over an H×W grid.

## Features

- Generic forward filter over `N` states driven by caller-supplied sensor and
  transition models, with predictive queries at future timesteps
- Sparse transition support: models can report which states reach a target,
  turning the O(N²) prediction into O(N·k)
- Touchscreen grid model: distance-decaying sensor noise and a Moore
  neighborhood random walk with border corrections
- Step reporters for logging and debugging

## Modules

- [`filter`] - Generic engine, model traits and errors
- [`grid`] - Touchscreen grid models and filter
- [`reporter`] - Observability hooks
- [`common`] - Constants and probability-vector utilities

## Example

```rust
use touch_hmm_filters_rs::{FnSensorModel, FnTransitionModel, ForwardFilter};

let sensor = FnSensorModel::new(|_: &str, s: usize| if s == 0 { 1.0 } else { 0.0 });
let transition = FnTransitionModel::new(|_: usize, _: usize| 0.5);
let mut filter = ForwardFilter::new(sensor, transition, 2).unwrap();

filter.ingest("e").unwrap();
assert_eq!(filter.belief(), &[1.0, 0.0]);
assert_eq!(filter.query(2).unwrap(), vec![0.5, 0.5]);
```
*/

// ============================================================================
// Core modules
// ============================================================================

/// Generic forward-filtering engine
pub mod filter;

/// Touchscreen grid instantiation
pub mod grid;

/// Step reporters (logging, debugging)
pub mod reporter;

/// Low-level utilities (constants, normalization)
pub mod common;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// Engine and traits
pub use filter::{
    Filter, FilterError, FnSensorModel, FnTransitionModel, ForwardFilter, SensorModel, Support,
    TransitionModel,
};

// Grid model
pub use grid::{
    active_cell, Cell, GridFilterConfig, GridSensorModel, GridShape, GridTransitionModel,
    PriorMode, TouchscreenFilter,
};

// Reporters
pub use reporter::{CompositeReporter, DebugReporter, LoggingReporter, NoOpReporter, StepReporter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
