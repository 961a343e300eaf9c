//! Error types for motor algebra and estimation.

use thiserror::Error;

use crate::estimate::Step;

/// Main error type for motor operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Inverse or reciprocal of a null or degenerate element.
    #[error("division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    /// Square root of a half-turn, or the logarithm outside its branch.
    #[error("degenerate motor in {operation}")]
    DegenerateMotor { operation: &'static str },

    /// A step of the three-point estimator failed.
    #[error("degenerate correspondence at the {step} step")]
    DegenerateCorrespondence {
        step: Step,
        #[source]
        source: Box<Error>,
    },

    /// Tolerances must be finite and non-negative.
    #[error("invalid precision: {0}")]
    InvalidPrecision(String),

    #[error("unknown blade: {0}")]
    UnknownBlade(String),

    #[error("unbound variable: {0}")]
    UnboundVariable(String),
}

/// Result type alias for motor operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    #[must_use]
    pub const fn division_by_zero(operation: &'static str) -> Self {
        Self::DivisionByZero { operation }
    }

    #[must_use]
    pub const fn degenerate_motor(operation: &'static str) -> Self {
        Self::DegenerateMotor { operation }
    }

    #[must_use]
    pub fn degenerate_correspondence(step: Step, source: Error) -> Self {
        Self::DegenerateCorrespondence {
            step,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages() {
        assert_eq!(
            "division by zero in inverse",
            Error::division_by_zero("inverse").to_string()
        );
        assert_eq!(
            "degenerate motor in sqrt",
            Error::degenerate_motor("sqrt").to_string()
        );
    }

    #[test]
    fn correspondence_keeps_source() {
        let err = Error::degenerate_correspondence(Step::Line, Error::division_by_zero("inverse"));
        assert_eq!("degenerate correspondence at the line step", err.to_string());
        let source = err.source().map(ToString::to_string);
        assert_eq!(Some("division by zero in inverse".to_string()), source);
    }
}
