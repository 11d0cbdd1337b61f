//! Common utilities shared by the generic engine and the grid model.
//!
//! This module contains numerical constants and the small probability-vector
//! helpers (normalization, uniform construction, argmax) used by filters.

pub mod constants;
pub mod utils;
