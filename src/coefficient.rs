use std::fmt::{Debug, Display};
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{Float, One, Zero};

/// Ring operations a multivector needs from its coefficients.
///
/// Implemented for `f32`, `f64` and the symbolic [`Expr`](crate::symbolic::Expr),
/// so the same product and motor code serves numbers and derived formulas.
pub trait Coefficient:
    Clone
    + PartialEq
    + Debug
    + Display
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    fn from_f64(value: f64) -> Self;

    /// Treated as zero when dividing by it. Only known constants can be negligible.
    fn is_negligible(&self, epsilon: f64) -> bool;

    fn simplify(self) -> Self {
        self
    }
}

/// Transcendental functions used by the square root, exponential and logarithm
pub trait Real: Coefficient {
    fn recip(self) -> Self;
    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn atan(self) -> Self;
    fn atan2(self, x: Self) -> Self;

    /// The numeric value, if known
    fn to_f64(&self) -> Option<f64>;

    fn divide(self, rhs: Self) -> Self {
        self * rhs.recip()
    }

    fn half(self) -> Self {
        self * Self::from_f64(0.5)
    }
}

macro_rules! impl_float {
    ($($float:ty),*) => {
        $(
            impl Coefficient for $float {
                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $float
                }

                #[inline]
                fn is_negligible(&self, epsilon: f64) -> bool {
                    (<$float as Float>::abs(*self) as f64) <= epsilon
                }
            }

            impl Real for $float {
                #[inline]
                fn recip(self) -> Self {
                    <$float as Float>::recip(self)
                }

                #[inline]
                fn sqrt(self) -> Self {
                    <$float as Float>::sqrt(self)
                }

                #[inline]
                fn sin(self) -> Self {
                    <$float as Float>::sin(self)
                }

                #[inline]
                fn cos(self) -> Self {
                    <$float as Float>::cos(self)
                }

                #[inline]
                fn atan(self) -> Self {
                    <$float as Float>::atan(self)
                }

                #[inline]
                fn atan2(self, x: Self) -> Self {
                    <$float as Float>::atan2(self, x)
                }

                #[inline]
                fn to_f64(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negligible() {
        assert!(1e-13f64.is_negligible(1e-12));
        assert!((-1e-13f64).is_negligible(1e-12));
        assert!(!1e-11f64.is_negligible(1e-12));
        assert!(0f64.is_negligible(0.));
        assert!(!f64::MIN_POSITIVE.is_negligible(0.));
        assert!(!f64::NAN.is_negligible(1.));
    }

    #[test]
    fn real_functions_match_std() {
        fn check<T: Real>(x: T, y: T) -> [Option<f64>; 4] {
            [
                x.clone().divide(y.clone()).to_f64(),
                x.clone().atan2(y).to_f64(),
                x.clone().half().to_f64(),
                x.sqrt().to_f64(),
            ]
        }

        let [quotient, atan2, half, sqrt] = check(2f64, 4f64);
        assert_eq!(Some(0.5), quotient);
        assert_eq!(Some(2f64.atan2(4.)), atan2);
        assert_eq!(Some(1.), half);
        assert_eq!(Some(2f64.sqrt()), sqrt);

        let [quotient, ..] = check(2f32, 4f32);
        assert_eq!(Some(0.5), quotient);
    }
}
