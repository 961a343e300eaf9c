//! Points, planes and lines of plane-based PGA.
//!
//! Planes are vectors, lines are bivectors and points are trivectors. Joining
//! two points with `&` gives the line through them; meeting two planes with `^`
//! gives their line of intersection.

use tracing::warn;

use crate::{
    Blade, Coefficient, Error, MotorEstimator, Multivector, Precision, Real, Result, Reverse,
};

/// `e123 - x e032 - y e013 - z e021`
pub fn point<T: Coefficient>(x: T, y: T, z: T) -> Multivector<T> {
    Multivector::from_terms([
        (Blade::E123, T::one()),
        (Blade::E032, -x),
        (Blade::E013, -y),
        (Blade::E021, -z),
    ])
}

/// Ideal point, a point at infinity in direction `(x, y, z)`
pub fn direction<T: Coefficient>(x: T, y: T, z: T) -> Multivector<T> {
    Multivector::from_terms([(Blade::E032, -x), (Blade::E013, -y), (Blade::E021, -z)])
}

/// The plane `a x + b y + c z + d = 0`, so that `plane ^ point` vanishes
/// exactly for the points on it
pub fn plane<T: Coefficient>(a: T, b: T, c: T, d: T) -> Multivector<T> {
    Multivector::from_terms([
        (Blade::E1, a),
        (Blade::E2, b),
        (Blade::E3, c),
        (Blade::E0, -d),
    ])
}

/// Line through `point` along `direction`
pub fn line<T: Coefficient>(point: &Multivector<T>, direction: &Multivector<T>) -> Multivector<T> {
    point & direction
}

/// Rotation by `angle` about `line`, `cos(angle / 2) + sin(angle / 2) L` for the unit line `L`
pub fn rotor<T: Real>(angle: T, line: &Multivector<T>) -> Result<Multivector<T>> {
    let norm = (line * &line.rev()).scalar_part();
    if norm.is_negligible(Precision::default().epsilon) {
        return Err(Error::division_by_zero("rotor"));
    }
    let half = angle.half();
    let scale = half.clone().sin() * norm.sqrt().recip();
    Ok(line.grade(2).scale(&scale).add_scalar(half.cos()))
}

/// Translation by `distance` along the ideal line `line`, `1 + distance / 2 L`
pub fn translator<T: Real>(distance: T, line: &Multivector<T>) -> Multivector<T> {
    line.grade(2).scale(&distance.half()).add_scalar(T::one())
}

/// Rotor taking the x, y and z axes onto the columns `x`, `y` and `z`.
///
/// The columns must be orthonormal and right-handed. Otherwise the result is
/// not a rotation, and a warning is logged when that is known numerically.
pub fn rotor_from_basis<T: Real>(x: [T; 3], y: [T; 3], z: [T; 3]) -> Result<Multivector<T>> {
    let columns = [&x, &y, &z];
    for (i, u) in columns.iter().enumerate() {
        for (j, v) in columns.iter().enumerate().skip(i) {
            let dot = u
                .iter()
                .zip(v.iter())
                .fold(T::zero(), |sum, (a, b)| sum + a.clone() * b.clone());
            let expected = if i == j { T::one() } else { T::zero() };
            if let Some(residual) = (dot - expected).to_f64() {
                if residual.abs() > 1e-6 {
                    warn!(i, j, residual, "basis is not orthonormal");
                }
            }
        }
    }

    let axis = |[a, b, c]: [T; 3]| point(a, b, c);
    let (o, l) = (T::zero, T::one);
    let motor = MotorEstimator::default().estimate(
        &point(l(), o(), o()),
        &axis(x),
        &point(o(), l(), o()),
        &axis(y),
        &point(o(), o(), l()),
        &axis(z),
    )?;
    // a rotation about the origin has no ideal part
    Ok(Multivector::from_fn(|b| {
        if b.is_ideal() {
            T::zero()
        } else {
            motor[b].clone()
        }
    }))
}

impl<T: Real> Multivector<T> {
    /// Euclidean coordinates of a finite point
    pub fn coordinates(&self) -> Result<[T; 3]> {
        self.coordinates_with(&Precision::default())
    }

    pub fn coordinates_with(&self, precision: &Precision) -> Result<[T; 3]> {
        let weight = self[Blade::E123].clone();
        if weight.is_negligible(precision.epsilon) {
            return Err(Error::division_by_zero("coordinates"));
        }
        let inv = weight.recip();
        Ok([Blade::E032, Blade::E013, Blade::E021].map(|b| -(self[b].clone() * inv.clone())))
    }
}
