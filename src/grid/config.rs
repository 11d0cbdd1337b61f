//! Configuration for the touchscreen filter
//!
//! A [`GridFilterConfig`] fully describes a [`super::TouchscreenFilter`]: the
//! grid dimensions and how the very first frame is treated. Configs
//! serialize to JSON so runs can be recorded and compared.

use serde::{Deserialize, Serialize};

use crate::common::constants::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
use crate::filter::FilterError;

use super::types::GridShape;

/// Belief used before the first frame is ingested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorMode {
    /// The first raw frame is the prior: the filter trusts the first touch
    #[default]
    FirstFrame,
    /// Uniform over all cells, like the generic engine
    Uniform,
}

/// Touchscreen filter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridFilterConfig {
    /// Number of rows (H)
    pub height: usize,
    /// Number of columns (W)
    pub width: usize,
    /// Prior used for the first frame
    #[serde(default)]
    pub prior: PriorMode,
}

impl Default for GridFilterConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_GRID_HEIGHT,
            width: DEFAULT_GRID_WIDTH,
            prior: PriorMode::default(),
        }
    }
}

impl GridFilterConfig {
    /// Create a config with the default prior mode
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            prior: PriorMode::default(),
        }
    }

    /// Set the prior mode
    pub fn with_prior(mut self, prior: PriorMode) -> Self {
        self.prior = prior;
        self
    }

    /// Validate and return the grid shape
    pub fn shape(&self) -> Result<GridShape, FilterError> {
        GridShape::new(self.height, self.width)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), FilterError> {
        self.shape().map(|_| ())
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Serialize to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| FilterError::invalid(format!("malformed config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let c = GridFilterConfig::default();
        assert_eq!((c.height, c.width), (20, 20));
        assert_eq!(c.prior, PriorMode::FirstFrame);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let c = GridFilterConfig::new(5, 7).with_prior(PriorMode::Uniform);
        let json = c.to_json();
        assert!(json.contains("\"uniform\""));
        assert_eq!(GridFilterConfig::from_json(&json).unwrap(), c);
    }

    #[test]
    fn test_prior_defaults_when_missing() {
        let c = GridFilterConfig::from_json(r#"{"height": 3, "width": 4}"#).unwrap();
        assert_eq!(c.prior, PriorMode::FirstFrame);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(GridFilterConfig::from_json(r#"{"height": 0, "width": 4}"#).is_err());
        assert!(GridFilterConfig::from_json("not json").is_err());
    }
}
