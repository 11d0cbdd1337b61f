//! Touchscreen grid instantiation of the forward filter
//!
//! - [`types`] - cells, grid shapes and frame helpers
//! - [`model`] - distance-decaying sensor and Moore-neighborhood transition models
//! - [`config`] - serializable filter configuration
//! - [`filter`] - [`TouchscreenFilter`], the frame-in / grid-out entry point

pub mod config;
pub mod filter;
pub mod model;
pub mod types;

pub use config::{GridFilterConfig, PriorMode};
pub use filter::TouchscreenFilter;
pub use model::{sensor_probability, transition_probability, GridSensorModel, GridTransitionModel};
pub use types::{active_cell, Cell, GridShape, Neighborhood};
