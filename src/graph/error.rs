//! Errors raised while ingesting narratives and plane configuration.
//!
//! The graph engine itself never fails; only the JSON boundary does.

/// Failure to read a narrative dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
	/// The document is not valid JSON
	#[error("invalid narrative JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// The top-level value is valid JSON but not a list of narratives
	#[error("expected a JSON array of narratives, found {found}")]
	NotAnArray {
		/// Kind of JSON value found instead
		found: &'static str,
	},
}

/// Failure to read a plane configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The document is not valid JSON or has mistyped fields
	#[error("invalid plane config: {0}")]
	Json(#[from] serde_json::Error),

	/// Threshold slider bounds are inverted
	#[error("threshold range is empty: min {min} > max {max}")]
	EmptyThresholdRange {
		/// Lower bound
		min: f64,
		/// Upper bound
		max: f64,
	},

	/// Threshold slider step is zero or negative
	#[error("threshold step must be positive, got {0}")]
	NonPositiveStep(f64),
}
