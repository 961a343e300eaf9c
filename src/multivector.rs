use std::fmt;
use std::ops::{Add, BitAnd, BitXor, Index, Mul, Neg, Shr, Sub};

use bytemuck::{Pod, Zeroable};
use num_traits::Zero;
use strum::IntoEnumIterator;

use crate::blade::{
    Blade, ANTIWEDGE, BLADE_COUNT, GEOMETRIC, LEFT_COMPLEMENT, RIGHT_COMPLEMENT, WEDGE,
};
use crate::{
    Antiwedge, Coefficient, Geometric, LeftComplement, Reverse, RightComplement, Sandwich, Wedge,
};

type ProductTable = [[(usize, i8); BLADE_COUNT]; BLADE_COUNT];
type ComplementMap = [(usize, i8); BLADE_COUNT];

/// Element of 3D PGA with one coefficient per blade in canonical order
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Multivector<T> {
    coefficients: [T; BLADE_COUNT],
}

unsafe impl<T: Zeroable> Zeroable for Multivector<T> {}
unsafe impl<T: Pod> Pod for Multivector<T> {}

impl<T> Multivector<T> {
    pub fn from_fn(mut f: impl FnMut(Blade) -> T) -> Self {
        Multivector {
            coefficients: std::array::from_fn(|i| f(Blade::ALL[i])),
        }
    }

    pub fn coefficients(&self) -> &[T; BLADE_COUNT] {
        &self.coefficients
    }

    pub fn iter(&self) -> impl Iterator<Item = (Blade, &T)> + '_ {
        Blade::iter().zip(&self.coefficients)
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Multivector<U> {
        Multivector::from_fn(|b| f(&self[b]))
    }

    /// Replaces one coefficient
    pub fn with(mut self, blade: Blade, value: T) -> Self {
        self.coefficients[blade.index()] = value;
        self
    }
}

impl<T> Index<Blade> for Multivector<T> {
    type Output = T;
    fn index(&self, blade: Blade) -> &T {
        &self.coefficients[blade.index()]
    }
}

impl<T: Coefficient> Multivector<T> {
    pub fn blade(blade: Blade, value: T) -> Self {
        Self::zero().with(blade, value)
    }

    pub fn scalar(value: T) -> Self {
        Self::blade(Blade::Scalar, value)
    }

    pub fn pseudoscalar(value: T) -> Self {
        Self::blade(Blade::E0123, value)
    }

    pub fn one() -> Self {
        Self::scalar(T::one())
    }

    /// Sum of the given terms
    pub fn from_terms(terms: impl IntoIterator<Item = (Blade, T)>) -> Self {
        terms
            .into_iter()
            .fold(Self::zero(), |mv, (blade, value)| {
                let sum = mv[blade].clone() + value;
                mv.with(blade, sum)
            })
    }

    /// Nonzero coefficients
    pub fn terms(&self) -> impl Iterator<Item = (Blade, &T)> + '_ {
        self.iter().filter(|(_, c)| !c.is_zero())
    }

    pub fn scalar_part(&self) -> T {
        self[Blade::Scalar].clone()
    }

    pub fn pseudoscalar_part(&self) -> T {
        self[Blade::E0123].clone()
    }

    pub fn scale(&self, k: &T) -> Self {
        self.map(|c| c.clone() * k.clone())
    }

    pub fn add_scalar(&self, k: T) -> Self {
        let sum = self.scalar_part() + k;
        self.clone().with(Blade::Scalar, sum)
    }

    /// Keeps the blades of grade `g`
    pub fn grade(&self, g: u32) -> Self {
        self.filter(|b| b.grade() == g)
    }

    pub fn even(&self) -> Self {
        self.filter(|b| b.grade() % 2 == 0)
    }

    pub fn odd(&self) -> Self {
        self.filter(|b| b.grade() % 2 == 1)
    }

    pub fn dual(&self) -> Self {
        self.right_comp()
    }

    /// `self * e0123`
    pub fn mul_pseudoscalar(&self) -> Self {
        self * &Self::pseudoscalar(T::one())
    }

    /// `self * (real + dual * e0123)`
    pub fn mul_dual(&self, real: &T, dual: &T) -> Self {
        self.scale(real) + self.mul_pseudoscalar().scale(dual)
    }

    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.coefficients
            .iter()
            .zip(&other.coefficients)
            .all(|(a, b)| (a.clone() - b.clone()).is_negligible(tolerance))
    }

    pub fn simplify(self) -> Self {
        Multivector {
            coefficients: self.coefficients.map(Coefficient::simplify),
        }
    }

    fn filter(&self, keep: impl Fn(Blade) -> bool) -> Self {
        Self::from_fn(|b| if keep(b) { self[b].clone() } else { T::zero() })
    }

    fn product(&self, rhs: &Self, table: &ProductTable) -> Self {
        let mut output = Self::zero();
        for (i, lhs) in self.coefficients.iter().enumerate() {
            if lhs.is_zero() {
                continue;
            }
            for (j, r) in rhs.coefficients.iter().enumerate() {
                let (k, sign) = table[i][j];
                if sign == 0 || r.is_zero() {
                    continue;
                }
                let term = lhs.clone() * r.clone();
                let acc = std::mem::replace(&mut output.coefficients[k], T::zero());
                output.coefficients[k] = if sign > 0 { acc + term } else { acc - term };
            }
        }
        output
    }

    fn complement(&self, map: &ComplementMap) -> Self {
        let mut output = Self::zero();
        for (i, c) in self.coefficients.iter().enumerate() {
            let (k, sign) = map[i];
            output.coefficients[k] = if sign > 0 { c.clone() } else { -c.clone() };
        }
        output
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        Self::from_fn(|b| f(self[b].clone(), rhs[b].clone()))
    }
}

impl<T: Coefficient> Default for Multivector<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Coefficient> Zero for Multivector<T> {
    fn zero() -> Self {
        Self::from_fn(|_| T::zero())
    }

    fn is_zero(&self) -> bool {
        self.coefficients.iter().all(Zero::is_zero)
    }
}

impl<T: Coefficient> Geometric<&Multivector<T>> for &Multivector<T> {
    type Output = Multivector<T>;
    fn geo(self, rhs: &Multivector<T>) -> Multivector<T> {
        self.product(rhs, &GEOMETRIC)
    }
}

impl<T: Coefficient> Wedge<&Multivector<T>> for &Multivector<T> {
    type Output = Multivector<T>;
    fn wedge(self, rhs: &Multivector<T>) -> Multivector<T> {
        self.product(rhs, &WEDGE)
    }
}

impl<T: Coefficient> Antiwedge<&Multivector<T>> for &Multivector<T> {
    type Output = Multivector<T>;
    fn antiwedge(self, rhs: &Multivector<T>) -> Multivector<T> {
        self.product(rhs, &ANTIWEDGE)
    }
}

impl<T: Coefficient> Reverse for &Multivector<T> {
    type Output = Multivector<T>;
    fn rev(self) -> Multivector<T> {
        Multivector::from_fn(|b| {
            if Blade::reverse_sign(b.grade()) > 0 {
                self[b].clone()
            } else {
                -self[b].clone()
            }
        })
    }
}

impl<T: Coefficient> RightComplement for &Multivector<T> {
    type Output = Multivector<T>;
    fn right_comp(self) -> Multivector<T> {
        self.complement(&RIGHT_COMPLEMENT)
    }
}

impl<T: Coefficient> LeftComplement for &Multivector<T> {
    type Output = Multivector<T>;
    fn left_comp(self) -> Multivector<T> {
        self.complement(&LEFT_COMPLEMENT)
    }
}

impl<T: Coefficient> Sandwich<&Multivector<T>> for &Multivector<T> {
    type Output = Multivector<T>;
    fn sandwich(self, rhs: &Multivector<T>) -> Multivector<T> {
        &(self * rhs) * &self.rev()
    }
}

macro_rules! impl_binary_op {
    ($op:ident, $fn:ident, $ga_trait:ident, $ga_fn:ident) => {
        impl<T: Coefficient> $op<&Multivector<T>> for &Multivector<T> {
            type Output = Multivector<T>;
            #[inline]
            fn $fn(self, rhs: &Multivector<T>) -> Multivector<T> {
                $ga_trait::$ga_fn(self, rhs)
            }
        }

        impl<T: Coefficient> $op<Multivector<T>> for Multivector<T> {
            type Output = Multivector<T>;
            #[inline]
            fn $fn(self, rhs: Multivector<T>) -> Multivector<T> {
                $ga_trait::$ga_fn(&self, &rhs)
            }
        }

        impl<T: Coefficient> $op<&Multivector<T>> for Multivector<T> {
            type Output = Multivector<T>;
            #[inline]
            fn $fn(self, rhs: &Multivector<T>) -> Multivector<T> {
                $ga_trait::$ga_fn(&self, rhs)
            }
        }

        impl<T: Coefficient> $op<Multivector<T>> for &Multivector<T> {
            type Output = Multivector<T>;
            #[inline]
            fn $fn(self, rhs: Multivector<T>) -> Multivector<T> {
                $ga_trait::$ga_fn(self, &rhs)
            }
        }
    };
}

impl_binary_op!(Mul, mul, Geometric, geo);
impl_binary_op!(BitXor, bitxor, Wedge, wedge);
impl_binary_op!(BitAnd, bitand, Antiwedge, antiwedge);
impl_binary_op!(Shr, shr, Sandwich, sandwich);

impl<T: Coefficient> Add for Multivector<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip_with(&rhs, Add::add)
    }
}

impl<T: Coefficient> Add<&Multivector<T>> for &Multivector<T> {
    type Output = Multivector<T>;
    fn add(self, rhs: &Multivector<T>) -> Multivector<T> {
        self.zip_with(rhs, Add::add)
    }
}

impl<T: Coefficient> Sub for Multivector<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(&rhs, Sub::sub)
    }
}

impl<T: Coefficient> Sub<&Multivector<T>> for &Multivector<T> {
    type Output = Multivector<T>;
    fn sub(self, rhs: &Multivector<T>) -> Multivector<T> {
        self.zip_with(rhs, Sub::sub)
    }
}

impl<T: Coefficient> Neg for Multivector<T> {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|c| -c.clone())
    }
}

impl<T: Coefficient> Neg for &Multivector<T> {
    type Output = Multivector<T>;
    fn neg(self) -> Multivector<T> {
        self.map(|c| -c.clone())
    }
}

impl<T: Coefficient> fmt::Display for Multivector<T> {
    /// Signed sum of the nonzero terms, `1 + 0.5e01 - 2e23`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for (blade, c) in self.terms() {
            let c = c.to_string();
            let (negative, magnitude) = match c.strip_prefix('-') {
                Some(rest) if !rest.contains(' ') => (true, rest),
                _ => (false, c.as_str()),
            };

            match (written, negative) {
                (false, true) => f.write_str("-")?,
                (true, true) => f.write_str(" - ")?,
                (true, false) => f.write_str(" + ")?,
                (false, false) => {}
            }
            written = true;

            let compound = magnitude.contains(' ');
            let numeric = magnitude.parse::<f64>().is_ok();
            match (blade, magnitude) {
                (Blade::Scalar, _) if compound => write!(f, "({magnitude})")?,
                (Blade::Scalar, _) => f.write_str(magnitude)?,
                (_, "1") => write!(f, "{blade}")?,
                _ if numeric => write!(f, "{magnitude}{blade}")?,
                _ if compound => write!(f, "({magnitude})*{blade}")?,
                _ => write!(f, "{magnitude}*{blade}")?,
            }
        }
        if !written {
            f.write_str("0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Join;

    fn e(blade: Blade) -> Multivector<f64> {
        Multivector::blade(blade, 1.)
    }

    #[test]
    fn missing_blades_are_zero() {
        let m = Multivector::scalar(2.);
        for blade in Blade::iter().skip(1) {
            assert_eq!(0., m[blade]);
        }
        assert_eq!(2., m.scalar_part());
    }

    #[test]
    fn geometric_product_of_blades() {
        assert_eq!(-e(Blade::E31), e(Blade::E12) * e(Blade::E23));
        assert_eq!(Multivector::zero(), e(Blade::E0) * e(Blade::E0));
        assert_eq!(Multivector::scalar(-1.), e(Blade::E123) * e(Blade::E123));
    }

    #[test]
    fn geometric_product_is_associative() {
        let a = Multivector::from_fn(|b| b.index() as f64 + 1.);
        let b = Multivector::from_fn(|b| 2. - b.index() as f64 * 0.5);
        let c = Multivector::from_fn(|b| (b.index() % 3) as f64 - 1.);
        assert!(((&a * &b) * &c).approx_eq(&(&a * &(&b * &c)), 1e-9));
    }

    #[test]
    fn wedge_of_vectors_is_antisymmetric() {
        let a = Multivector::from_terms([(Blade::E1, 1.), (Blade::E2, 2.), (Blade::E0, 3.)]);
        let b = Multivector::from_terms([(Blade::E2, -1.), (Blade::E3, 4.), (Blade::E0, 0.5)]);
        assert_eq!(&a ^ &b, -(&b ^ &a));
        assert!((&a ^ &a).is_zero());
    }

    #[test]
    fn wedge_is_top_grade_part_of_product() {
        let a = Multivector::from_terms([(Blade::E1, 1.), (Blade::E2, 2.)]);
        let b = Multivector::from_terms([(Blade::E23, 3.), (Blade::E01, -1.)]);
        assert_eq!((&a * &b).grade(3), &a ^ &b);
    }

    #[test]
    fn join_of_points() {
        let origin = Multivector::blade(Blade::E123, 1.);
        let x = origin.clone().with(Blade::E032, -1.);
        let y = origin.clone().with(Blade::E013, -1.);

        let line = Join::join(&origin, &x);
        assert_eq!(-e(Blade::E23), line);

        let plane = Join::join(&line, &y);
        assert_eq!(e(Blade::E3), plane);
    }

    #[test]
    fn reverse_signs() {
        let m = Multivector::from_fn(|_| 1.);
        let rev = m.rev();
        for blade in Blade::iter() {
            assert_eq!(Blade::reverse_sign(blade.grade()) as f64, rev[blade]);
        }
        assert_eq!(m, rev.rev());
    }

    #[test]
    fn reverse_of_product() {
        let a = Multivector::from_fn(|b| b.index() as f64 - 7.);
        let b = Multivector::from_fn(|b| (b.index() * b.index()) as f64 * 0.1);
        assert!((&a * &b).rev().approx_eq(&(b.rev() * a.rev()), 1e-9));
    }

    #[test]
    fn complements_are_inverse() {
        let m = Multivector::from_fn(|b| b.index() as f64 + 0.5);
        assert_eq!(m, m.right_comp().left_comp());
        assert_eq!(m, m.left_comp().right_comp());
        assert_eq!(m.dual(), m.right_comp());
    }

    #[test]
    fn pseudoscalar_annihilates_ideal_blades() {
        assert!(e(Blade::E01).mul_pseudoscalar().is_zero());
        assert_eq!(-e(Blade::E01), e(Blade::E23).mul_pseudoscalar());
    }

    #[test]
    fn grade_selection() {
        let m = Multivector::from_fn(|_| 1.);
        assert_eq!(m, m.even() + m.odd());
        assert_eq!(6, m.grade(2).terms().count());
        assert_eq!(1, m.grade(4).terms().count());
    }

    #[test]
    fn scalar_helpers() {
        let m = Multivector::from_terms([(Blade::E12, 2.), (Blade::Scalar, 1.)]);
        assert_eq!(3., m.add_scalar(2.).scalar_part());
        assert_eq!(Multivector::from_terms([(Blade::E12, 4.), (Blade::Scalar, 2.)]), m.scale(&2.));
        assert_eq!(m.clone() + m.clone(), &m + &m);
        assert!((&m - &m).is_zero());
    }

    #[test]
    fn display() {
        let m = Multivector::from_terms([
            (Blade::Scalar, 1.),
            (Blade::E01, 0.5),
            (Blade::E23, -2.),
        ]);
        assert_eq!("1 + 0.5e01 - 2e23", m.to_string());
        assert_eq!("-e12", (-e(Blade::E12)).to_string());
        assert_eq!("0", Multivector::<f64>::zero().to_string());
    }

    #[test]
    fn bytemuck_cast() {
        let motors = [Multivector::from_fn(|b| b.index() as f64); 2];
        let floats: &[f64] = bytemuck::cast_slice(&motors[..]);
        assert_eq!(32, floats.len());
        assert_eq!(15., floats[15]);
        assert_eq!(0., floats[16]);

        let m: &Multivector<f64> = bytemuck::from_bytes(bytemuck::bytes_of(&motors[1]));
        assert_eq!(&motors[1], m);
    }
}
