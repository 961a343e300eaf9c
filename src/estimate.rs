//! Motor from three point correspondences.
//!
//! The motor is built in three steps, each a square root of the ratio between
//! a target element and the current image of its source: first the points `a`,
//! then the lines through `a` and `b`, then the planes through `a`, `b` and `c`.
//! Each step keeps what the earlier ones aligned, so the result is exact for
//! correspondences related by one rigid motion. It is not a least-squares fit.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::{Error, Multivector, Precision, Real, Result};

/// Stage of the estimator, named after the elements it aligns
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Step {
    Point,
    Line,
    Plane,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Point => "point",
            Step::Line => "line",
            Step::Plane => "plane",
        })
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct MotorEstimator {
    precision: Precision,
}

impl MotorEstimator {
    pub fn new(precision: Precision) -> Result<Self> {
        precision.validate()?;
        Ok(MotorEstimator { precision })
    }

    pub fn precision(&self) -> &Precision {
        &self.precision
    }

    /// Motor `V` with `V x ~V == x'` for the pairs `(a, a')`, `(b, b')` and `(c, c')`
    #[allow(clippy::too_many_arguments)]
    pub fn estimate<T: Real>(
        &self,
        a: &Multivector<T>,
        a_prime: &Multivector<T>,
        b: &Multivector<T>,
        b_prime: &Multivector<T>,
        c: &Multivector<T>,
        c_prime: &Multivector<T>,
    ) -> Result<Multivector<T>> {
        let va = self.step(Step::Point, a, a_prime)?;

        let ba = &va >> b;
        let line = a_prime & b_prime;
        let vb = self.step(Step::Line, &(a_prime & &ba), &line)?;

        let vba = &vb * &va;
        let cba = &vba >> c;
        let vc = self.step(Step::Plane, &(&line & &cba), &(&line & c_prime))?;

        let motor = &vc * &vba;
        debug!(motor = %motor, "estimated motor");
        Ok(motor)
    }

    /// Pairs of `(source, target)` points
    pub fn from_point_correspondences<T: Real>(
        &self,
        [(a, a_prime), (b, b_prime), (c, c_prime)]: &[(Multivector<T>, Multivector<T>); 3],
    ) -> Result<Multivector<T>> {
        self.estimate(a, a_prime, b, b_prime, c, c_prime)
    }

    fn step<T: Real>(
        &self,
        step: Step,
        from: &Multivector<T>,
        to: &Multivector<T>,
    ) -> Result<Multivector<T>> {
        debug!(%step, "aligning");
        match Multivector::motor_between(from, to, &self.precision) {
            Ok(motor) => {
                trace!(%step, motor = %motor, "partial motor");
                Ok(motor)
            }
            Err(source) => {
                warn!(%step, error = %source, "degenerate correspondence");
                Err(Error::degenerate_correspondence(step, source))
            }
        }
    }
}
