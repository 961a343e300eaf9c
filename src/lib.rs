//! Motors of 3D projective geometric algebra, R(3,0,1)
//!
//! Multivectors hold one coefficient per basis blade, in the order
//! `1, e0, e1, e2, e3, e01, e02, e03, e23, e31, e12, e032, e013, e021, e123, e0123`,
//! with `e0 * e0 = 0` and `ei * ei = 1` for the Euclidean generators. The product
//! tables are generated at compile time by [`macros::blade_tables`].
//!
//! Operators:
//! - `*` geometric product
//! - `^` outer product, the meet of planes and lines
//! - `&` regressive product, the join of points and lines
//! - `>>` sandwich, `a >> x == a * x * ~a`
//!
//! Motor operations:
//! - [x] Inverse
//! - [x] Normalize
//! - [x] Square root
//! - [x] Exponential, two conventions
//! - [x] Logarithm, two conventions
//! - [x] Motor from three point correspondences
//!
//! Coefficients are either floats or [`symbolic::Expr`], so the same code that
//! computes a motor also prints its closed form.

pub mod blade;
pub mod coefficient;
pub mod config;
pub mod error;
pub mod estimate;
pub mod geometry;
pub mod motor;
pub mod multivector;
pub mod symbolic;

pub use blade::Blade;
pub use coefficient::{Coefficient, Real};
pub use config::Precision;
pub use error::{Error, Result};
pub use estimate::{MotorEstimator, Step};
pub use motor::Convention;
pub use multivector::Multivector;

pub trait Geometric<Rhs> {
    type Output;
    fn geo(self, rhs: Rhs) -> Self::Output;
}

pub trait Wedge<Rhs> {
    type Output;
    fn wedge(self, rhs: Rhs) -> Self::Output;
}

pub trait Antiwedge<Rhs> {
    type Output;
    fn antiwedge(self, rhs: Rhs) -> Self::Output;
}

pub trait Reverse {
    type Output;
    fn rev(self) -> Self::Output;
}

pub trait LeftComplement {
    type Output;
    fn left_comp(self) -> Self::Output;
}

pub trait RightComplement {
    type Output;
    fn right_comp(self) -> Self::Output;
}

/// `self * rhs * ~self`
pub trait Sandwich<Rhs> {
    type Output;
    fn sandwich(self, rhs: Rhs) -> Self::Output;
}

/// Smallest element containing both, e.g. the line through two points
pub trait Join<Rhs> {
    type Output;
    fn join(self, rhs: Rhs) -> Self::Output;
}

impl<Lhs, Rhs> Join<Rhs> for Lhs
where
    Lhs: Antiwedge<Rhs>,
{
    type Output = Lhs::Output;

    fn join(self, rhs: Rhs) -> Self::Output {
        self.antiwedge(rhs)
    }
}

/// Largest element contained in both, e.g. the line where two planes cross
pub trait Meet<Rhs> {
    type Output;
    fn meet(self, rhs: Rhs) -> Self::Output;
}

impl<Lhs, Rhs> Meet<Rhs> for Lhs
where
    Lhs: Wedge<Rhs>,
{
    type Output = Lhs::Output;

    fn meet(self, rhs: Rhs) -> Self::Output {
        self.wedge(rhs)
    }
}
