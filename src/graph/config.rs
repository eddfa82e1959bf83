//! Plane view configuration.

use serde::Deserialize;

use super::error::ConfigError;
use super::layout::GridLayout;
use super::strategy::Strategy;

/// Startup settings of the plane view.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaneConfig {
	/// Strategy selected at startup.
	pub strategy: Strategy,
	/// Minimum pair score kept by the H-index strategy.
	pub threshold: f64,
	/// Lowest threshold the slider offers.
	pub threshold_min: f64,
	/// Highest threshold the slider offers.
	pub threshold_max: f64,
	/// Slider increment.
	pub threshold_step: f64,
	/// Auto-placement grid.
	pub layout: GridLayout,
}

impl Default for PlaneConfig {
	fn default() -> Self {
		Self {
			strategy: Strategy::default(),
			threshold: 1.0,
			threshold_min: 0.0,
			threshold_max: 10.0,
			threshold_step: 0.5,
			layout: GridLayout::default(),
		}
	}
}

impl PlaneConfig {
	/// Read a config document; missing fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: PlaneConfig = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Reject an empty slider range or a non-positive step.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.threshold_min > self.threshold_max {
			return Err(ConfigError::EmptyThresholdRange {
				min: self.threshold_min,
				max: self.threshold_max,
			});
		}
		if self.threshold_step <= 0.0 {
			return Err(ConfigError::NonPositiveStep(self.threshold_step));
		}
		Ok(())
	}

	/// Clamp a requested threshold into the slider range.
	pub fn clamp_threshold(&self, threshold: f64) -> f64 {
		threshold.clamp(self.threshold_min, self.threshold_max)
	}
}
