//! Numeric tolerances shared by the motor operations and the estimator.

use crate::{Error, Result};

/// Tolerances for numeric coefficients. Symbolic coefficients only compare
/// against them once they reduce to constants.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Precision {
    /// Divisors and `1 + s` at or below this magnitude count as zero
    pub epsilon: f64,
    /// Angles below this use Taylor expansions in `exp` and `log`
    pub series_threshold: f64,
}

impl Default for Precision {
    fn default() -> Self {
        Precision {
            epsilon: 1e-12,
            series_threshold: 1e-4,
        }
    }
}

impl Precision {
    pub fn new(epsilon: f64, series_threshold: f64) -> Result<Self> {
        let precision = Precision {
            epsilon,
            series_threshold,
        };
        precision.validate()?;
        Ok(precision)
    }

    /// Only exact zeros are treated as zero
    pub fn strict() -> Self {
        Precision {
            epsilon: 0.,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_epsilon(self, epsilon: f64) -> Self {
        Precision { epsilon, ..self }
    }

    #[must_use]
    pub fn with_series_threshold(self, series_threshold: f64) -> Self {
        Precision {
            series_threshold,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("epsilon", self.epsilon),
            ("series_threshold", self.series_threshold),
        ] {
            if !value.is_finite() || value < 0. {
                return Err(Error::InvalidPrecision(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
