//! Tunables for type inference.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, InferenceResult};

/// Default multiplier passed to [`super::threshold::logarithmic_threshold`].
pub const DEFAULT_THRESHOLD_MULTIPLIER: f64 = 3.0;

/// Default divisor for the low-cardinality categorical signal.
pub const DEFAULT_CATEGORICAL_DIVISOR: f64 = 1.1;

/// Options controlling classification and conversion.
///
/// Every field has a default, so a JSON options file only needs the keys it overrides:
///
/// ```
/// use rust_type_inference::inference::InferenceOptions;
///
/// let opts: InferenceOptions = serde_json::from_str(r#"{ "prefer_boolean": true }"#).unwrap();
/// assert!(opts.prefer_boolean);
/// assert_eq!(opts.threshold_multiplier, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceOptions {
    /// Multiplier for the numeric noise threshold. Must be finite and > 1.
    pub threshold_multiplier: f64,
    /// A column is low-cardinality when `distinct < rows / categorical_divisor`.
    /// Must be finite and > 0.
    pub categorical_divisor: f64,
    /// Let a boolean verdict pre-empt every other representation. Off by default: the
    /// boolean verdict is then informational only.
    pub prefer_boolean: bool,
    /// Classify columns on the rayon thread pool.
    pub parallel: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            threshold_multiplier: DEFAULT_THRESHOLD_MULTIPLIER,
            categorical_divisor: DEFAULT_CATEGORICAL_DIVISOR,
            prefer_boolean: false,
            parallel: true,
        }
    }
}

impl InferenceOptions {
    /// Check option ranges.
    pub fn validate(&self) -> InferenceResult<()> {
        if !self.threshold_multiplier.is_finite() || self.threshold_multiplier <= 1.0 {
            return Err(InferenceError::InvalidOptions {
                message: format!(
                    "threshold_multiplier must be finite and > 1 (got {})",
                    self.threshold_multiplier
                ),
            });
        }
        if !self.categorical_divisor.is_finite() || self.categorical_divisor <= 0.0 {
            return Err(InferenceError::InvalidOptions {
                message: format!(
                    "categorical_divisor must be finite and > 0 (got {})",
                    self.categorical_divisor
                ),
            });
        }
        Ok(())
    }

    /// Read and validate options from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> InferenceResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let opts: Self = serde_json::from_reader(reader)?;
        opts.validate()?;
        Ok(opts)
    }
}
