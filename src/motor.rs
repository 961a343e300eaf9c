//! Motor operations: inverse, normalization, square root, exponential and logarithm.
//!
//! A motor is an even multivector `M` with `M ~M = 1`. Norms and angles of
//! motors are dual numbers `a + b e0123`, so several operations below multiply
//! by a dual number through [`Multivector::mul_dual`].

use num_traits::Zero;
use strum::EnumIter;
use tracing::trace;

use crate::{Error, Multivector, Precision, Real, Result, Reverse};

/// Closed form used for the exponential and logarithm of bivectors
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, EnumIter)]
pub enum Convention {
    /// Expanded closed form from the SIGGRAPH course notes of Gunn and De Keninck
    #[default]
    Gunn,
    /// Split into commuting Euclidean and vanishing parts, from Dorst's PGA4CS guide
    Pga4cs,
}

/// `cos u`, `sin u / u` and `(sin u - u cos u) / u^3`, from `u^2`
struct Trig<T> {
    cos: T,
    sinc: T,
    k: T,
}

impl<T: Real> Trig<T> {
    fn new(u2: T, precision: &Precision) -> Self {
        let u = u2.clone().sqrt();
        if is_below(&u, precision.series_threshold) {
            trace!(u = ?u.to_f64(), "series expansion");
            let u4 = u2.clone() * u2.clone();
            let c = T::from_f64;
            return Trig {
                cos: T::one() - u2.clone() * c(1. / 2.) + u4.clone() * c(1. / 24.),
                sinc: T::one() - u2.clone() * c(1. / 6.) + u4.clone() * c(1. / 120.),
                k: c(1. / 3.) - u2 * c(1. / 30.) + u4 * c(1. / 840.),
            };
        }

        let (sin, cos) = (u.clone().sin(), u.clone().cos());
        let inv = u.clone().recip();
        let inv3 = inv.clone() * inv.clone() * inv.clone();
        Trig {
            sinc: sin.clone() * inv,
            k: (sin - u * cos.clone()) * inv3,
            cos,
        }
    }
}

/// `(a + b e0123)^-1 = 1 / a - b / a^2 e0123`
fn dual_recip<T: Real>(a: T, b: T) -> (T, T) {
    let inv = a.recip();
    let dual = -(b * inv.clone() * inv.clone());
    (inv, dual)
}

/// Known to be below `threshold` in magnitude. Unknown symbolic values are not.
fn is_below<T: Real>(value: &T, threshold: f64) -> bool {
    value.to_f64().map_or(false, |v| v.abs() < threshold)
}

impl<T: Real> Multivector<T> {
    /// Inverse of a normalized motor
    pub fn normalized_inverse(&self) -> Self {
        self.rev()
    }

    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(&Precision::default())
    }

    /// `~a / <a ~a>`.
    ///
    /// Only an inverse when `a ~a` is a scalar, as for versors and normalized
    /// motors times a weight. The pseudoscalar part of `a ~a` is ignored, so
    /// normalize general even elements first.
    pub fn inverse_with(&self, precision: &Precision) -> Result<Self> {
        let rev = self.rev();
        let norm = (self * &rev).scalar_part();
        if norm.is_negligible(precision.epsilon) {
            return Err(Error::division_by_zero("inverse"));
        }
        Ok(rev.scale(&norm.recip()))
    }

    /// Scalar and pseudoscalar parts of `M ~M`
    pub fn norm_squared(&self) -> (T, T) {
        let norm = self * &self.rev();
        (norm.scalar_part(), norm.pseudoscalar_part())
    }

    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self * &self.rev()).approx_eq(&Multivector::one(), tolerance)
    }

    pub fn normalized(&self) -> Result<Self> {
        self.normalized_with(&Precision::default())
    }

    /// Divides by the dual-number norm, `M / sqrt(M ~M)`
    pub fn normalized_with(&self, precision: &Precision) -> Result<Self> {
        let (s, p) = self.norm_squared();
        if s.is_negligible(precision.epsilon) {
            return Err(Error::division_by_zero("normalize"));
        }
        let inv_sqrt = s.clone().sqrt().recip();
        let dual = -(p * inv_sqrt.clone() * s.recip()).half();
        Ok(self.mul_dual(&inv_sqrt, &dual))
    }

    pub fn sqrt(&self) -> Result<Self> {
        self.sqrt_with(&Precision::default())
    }

    /// Square root of a normalized motor,
    /// `(1 + M) / sqrt(2 (1 + s)) * (1 - p e0123 / (2 (1 + s)))`
    pub fn sqrt_with(&self, precision: &Precision) -> Result<Self> {
        let one_plus = self.scalar_part() + T::one();
        let non_positive = one_plus.to_f64().map_or(false, |v| v <= precision.epsilon);
        if non_positive || one_plus.is_negligible(precision.epsilon) {
            return Err(Error::degenerate_motor("sqrt"));
        }
        let two = T::from_f64(2.);
        let scale = (one_plus.clone() * two.clone()).sqrt().recip();
        let dual = -self.pseudoscalar_part().divide(one_plus * two) * scale.clone();
        Ok(self.add_scalar(T::one()).mul_dual(&scale, &dual))
    }

    pub fn simple_sqrt(&self) -> Result<Self> {
        self.simple_sqrt_with(&Precision::default())
    }

    /// `(1 + M)` normalized, the square root of a motor with no pseudoscalar part
    pub fn simple_sqrt_with(&self, precision: &Precision) -> Result<Self> {
        self.add_scalar(T::one())
            .normalized_with(precision)
            .map_err(|_| Error::degenerate_motor("simple_sqrt"))
    }

    /// Cayley map of the bivector part, `(1 + B) / (1 - B)`.
    ///
    /// A rational alternative to [`Multivector::exp`]: `tan(u / 2) L` maps to
    /// `exp(u L)` for a unit Euclidean line `L`.
    pub fn cayley(&self) -> Self {
        let b = self.grade(2);
        let denominator = (-&b).add_scalar(T::one());
        // (1 - B)(1 + B) has scalar part 1 + |B|^2
        let (a, p) = denominator.norm_squared();
        let (real, dual) = dual_recip(a, p);
        &b.add_scalar(T::one()) * &denominator.rev().mul_dual(&real, &dual)
    }

    pub fn inverse_cayley(&self) -> Result<Self> {
        self.inverse_cayley_with(&Precision::default())
    }

    /// Bivector `(M - 1) / (M + 1)` whose Cayley map is the motor `M`
    pub fn inverse_cayley_with(&self, precision: &Precision) -> Result<Self> {
        let denominator = self.add_scalar(T::one());
        let (a, p) = denominator.norm_squared();
        if a.is_negligible(precision.epsilon) {
            return Err(Error::division_by_zero("cayley"));
        }
        let (real, dual) = dual_recip(a, p);
        let inverse = denominator.rev().mul_dual(&real, &dual);
        Ok((&self.add_scalar(-T::one()) * &inverse).grade(2))
    }

    pub fn exp(&self) -> Self {
        self.exp_with(Convention::default(), &Precision::default())
    }

    /// Motor generated by the bivector part
    pub fn exp_with(&self, convention: Convention, precision: &Precision) -> Self {
        let b = self.grade(2);
        match convention {
            Convention::Gunn => b.exp_gunn(precision),
            Convention::Pga4cs => b.exp_4cs(precision),
        }
    }

    pub fn log(&self) -> Result<Self> {
        self.log_with(Convention::default(), &Precision::default())
    }

    /// Bivector generating a normalized motor
    pub fn log_with(&self, convention: Convention, precision: &Precision) -> Result<Self> {
        match convention {
            Convention::Gunn => self.log_gunn(precision),
            Convention::Pga4cs => self.log_4cs(precision),
        }
    }

    /// Splits a bivector into a simple Euclidean line and a commuting ideal line
    pub fn decompose(&self, precision: &Precision) -> (Self, Self) {
        let bdb = (&self.rev() * self).scalar_part();
        if bdb.is_negligible(precision.epsilon) {
            return (Multivector::zero(), self.clone());
        }
        let ratio = (self ^ &self.rev()).pseudoscalar_part().divide(bdb).half();
        let eucl = self.mul_dual(&T::one(), &-ratio.clone());
        let van = self.mul_pseudoscalar().scale(&ratio);
        (eucl, van)
    }

    /// The motor taking `from` to `to`, `sqrt(to / from)`, for elements of the same grade
    pub fn motor_between(from: &Self, to: &Self, precision: &Precision) -> Result<Self> {
        let ratio = to * &from.inverse_with(precision)?;
        ratio.normalized_with(precision)?.sqrt_with(precision)
    }

    fn exp_gunn(&self, precision: &Precision) -> Self {
        let u2 = (&self.rev() * self).scalar_part();
        let mbb = (self ^ self).pseudoscalar_part();
        let Trig { cos, sinc, k } = Trig::new(u2, precision);
        let half_mbb = mbb.half();
        let pseudoscalar = half_mbb.clone() * sinc.clone();
        self.mul_dual(&sinc, &(half_mbb * k))
            + Multivector::scalar(cos)
            + Multivector::pseudoscalar(pseudoscalar)
    }

    fn exp_4cs(&self, precision: &Precision) -> Self {
        let (eucl, van) = self.decompose(precision);
        let u2 = (&eucl.rev() * &eucl).scalar_part();
        let Trig { cos, sinc, .. } = Trig::new(u2, precision);
        let rotor = eucl.scale(&sinc).add_scalar(cos);
        &rotor * &van.add_scalar(T::one())
    }

    fn log_gunn(&self, precision: &Precision) -> Result<Self> {
        let (s, p) = (self.scalar_part(), self.pseudoscalar_part());
        let b = self.grade(2);
        let bdb = (&b.rev() * &b).scalar_part();

        if bdb.is_negligible(precision.epsilon) {
            trace!("logarithm of a translation");
            if s.is_negligible(precision.epsilon) {
                return Err(Error::division_by_zero("log"));
            }
            return Ok(b.scale(&s.recip()));
        }

        let mbb = (&b ^ &b).pseudoscalar_part();
        let s2 = bdb.sqrt();
        let p2 = -mbb.divide(s2.clone()).half();
        let u = s2.clone().atan2(s.clone());
        let v = match (s.to_f64(), s2.to_f64()) {
            (Some(scalar), Some(norm)) if scalar.abs() < norm => -p.divide(s2.clone()),
            _ => p2.clone().divide(s),
        };

        let inv_s2 = s2.clone().recip();
        let real = u.clone() * inv_s2.clone();
        let dual = (v * s2 - u * p2) * inv_s2.clone() * inv_s2;
        Ok(b.mul_dual(&real, &dual))
    }

    fn log_4cs(&self, precision: &Precision) -> Result<Self> {
        let (s, p) = (self.scalar_part(), self.pseudoscalar_part());
        if s.is_negligible(precision.epsilon) {
            return Err(Error::degenerate_motor("log"));
        }

        // B / (s + p e0123)
        let inv_s = s.recip();
        let w = self
            .grade(2)
            .mul_dual(&inv_s, &-(p * inv_s.clone() * inv_s.clone()));

        let t2 = (&w.rev() * &w).scalar_part();
        if t2.is_negligible(precision.epsilon) {
            trace!("logarithm of a translation");
            return Ok(w);
        }

        let t = t2.clone().sqrt();
        let t_prime = -(&w ^ &w).pseudoscalar_part().divide(t.clone()).half();
        let u = t.clone().atan();
        let v = t_prime.clone().divide(T::one() + t2);

        let inv_t = t.clone().recip();
        let real = u.clone() * inv_t.clone();
        let dual = (v * t - u * t_prime) * inv_t.clone() * inv_t;
        Ok(w.mul_dual(&real, &dual))
    }
}
