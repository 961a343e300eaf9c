use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use itertools::Itertools;
use num_traits::{One, Zero};

use crate::{Coefficient, Error, Real, Result};

/// Coefficients smaller than this are dropped by `simplify`
const ROUNDING: f64 = 1e-12;

/// An indivisible factor of a monomial
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Atom {
    Var(String),
    Sqrt(Box<Expr>),
    /// Reciprocal of a sum, which cannot be folded into exponents
    Recip(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Atan(Box<Expr>),
    Atan2(Box<Expr>, Box<Expr>),
}

/// Product of atoms raised to nonzero integer powers
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(BTreeMap<Atom, i32>);

/// Symbolic real number kept as a sum of monomials with numeric coefficients.
///
/// Functions of constants are evaluated eagerly, so an `Expr` with no variables
/// is always a single constant.
#[derive(Debug, Clone, Default)]
pub struct Expr {
    terms: BTreeMap<Monomial, f64>,
}

impl Monomial {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn powers(&self) -> impl Iterator<Item = (&Atom, i32)> + '_ {
        self.0.iter().map(|(atom, power)| (atom, *power))
    }

    fn of(atom: Atom) -> Self {
        Monomial(BTreeMap::from([(atom, 1)]))
    }

    fn inverse(&self) -> Self {
        Monomial(self.0.iter().map(|(a, p)| (a.clone(), -p)).collect())
    }

    fn eval<F: Fn(&str) -> Option<f64>>(&self, lookup: &F) -> Result<f64> {
        self.0.iter().try_fold(1., |product, (atom, power)| {
            Ok(product * atom.eval(lookup)?.powi(*power))
        })
    }
}

impl Atom {
    fn eval<F: Fn(&str) -> Option<f64>>(&self, lookup: &F) -> Result<f64> {
        Ok(match self {
            Atom::Var(name) => lookup(name.as_str())
                .ok_or_else(|| Error::UnboundVariable(name.clone()))?,
            Atom::Sqrt(x) => x.eval(lookup)?.sqrt(),
            Atom::Recip(x) => x.eval(lookup)?.recip(),
            Atom::Sin(x) => x.eval(lookup)?.sin(),
            Atom::Cos(x) => x.eval(lookup)?.cos(),
            Atom::Atan(x) => x.eval(lookup)?.atan(),
            Atom::Atan2(y, x) => y.eval(lookup)?.atan2(x.eval(lookup)?),
        })
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Atom::Var(name) => {
                names.insert(name.as_str());
            }
            Atom::Sqrt(x) | Atom::Recip(x) | Atom::Sin(x) | Atom::Cos(x) | Atom::Atan(x) => {
                x.collect_variables(names)
            }
            Atom::Atan2(y, x) => {
                y.collect_variables(names);
                x.collect_variables(names);
            }
        }
    }
}

impl Expr {
    pub fn constant(value: f64) -> Self {
        Self::term(Monomial::default(), value)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::atom(Atom::Var(name.into()))
    }

    fn atom(atom: Atom) -> Self {
        Self::term(Monomial::of(atom), 1.)
    }

    fn term(monomial: Monomial, coefficient: f64) -> Self {
        let mut terms = BTreeMap::new();
        if coefficient != 0. {
            terms.insert(monomial, coefficient);
        }
        Expr { terms }
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, f64)> + '_ {
        self.terms.iter().map(|(m, c)| (m, *c))
    }

    pub fn as_constant(&self) -> Option<f64> {
        match self.single_term() {
            None if self.terms.is_empty() => Some(0.),
            Some((monomial, c)) if monomial.is_empty() => Some(c),
            _ => None,
        }
    }

    fn single_term(&self) -> Option<(&Monomial, f64)> {
        self.terms().exactly_one().ok()
    }

    pub fn variables(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        for (monomial, _) in &self.terms {
            for (atom, _) in monomial.powers() {
                atom.collect_variables(names);
            }
        }
    }

    /// Evaluates with each variable bound by `lookup`
    pub fn eval<F: Fn(&str) -> Option<f64>>(&self, lookup: &F) -> Result<f64> {
        self.terms.iter().try_fold(0., |sum, (monomial, c)| {
            Ok(sum + c * monomial.eval(lookup)?)
        })
    }

    fn map_constant(self, f: impl FnOnce(f64) -> f64, atom: impl FnOnce(Box<Expr>) -> Atom) -> Self {
        match self.as_constant() {
            Some(c) => Expr::constant(f(c)),
            None => Expr::atom(atom(Box::new(self))),
        }
    }

    fn mul_monomials(lhs: &Monomial, rhs: &Monomial, coefficient: f64) -> Self {
        let mut powers = lhs.0.clone();
        for (atom, power) in &rhs.0 {
            *powers.entry(atom.clone()).or_insert(0) += power;
        }
        powers.retain(|_, power| *power != 0);

        // sqrt(x)^2 -> x
        let squares = powers
            .iter()
            .filter_map(|(atom, power)| match atom {
                Atom::Sqrt(radicand) if power.abs() >= 2 => {
                    Some((atom.clone(), (**radicand).clone(), *power))
                }
                _ => None,
            })
            .collect_vec();

        if squares.is_empty() {
            return Expr::term(Monomial(powers), coefficient);
        }

        let mut output = Expr::constant(coefficient);
        for (atom, radicand, power) in squares {
            let factor = if power > 0 { radicand } else { radicand.recip() };
            for _ in 0..(power / 2).abs() {
                output = output * factor.clone();
            }
            match power % 2 {
                0 => powers.remove(&atom),
                rem => powers.insert(atom, rem),
            };
        }

        output * Expr::term(Monomial(powers), 1.)
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Expr {}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        for ((m1, c1), (m2, c2)) in self.terms.iter().zip(&other.terms) {
            match m1.cmp(m2).then(c1.total_cmp(c2)) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        self.terms.len().cmp(&other.terms.len())
    }
}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (monomial, c) in &self.terms {
            monomial.hash(state);
            c.to_bits().hash(state);
        }
    }
}

impl Zero for Expr {
    fn zero() -> Self {
        Expr::default()
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl One for Expr {
    fn one() -> Self {
        Expr::constant(1.)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::constant(value)
    }
}

impl Add for Expr {
    type Output = Expr;
    fn add(mut self, rhs: Expr) -> Expr {
        for (monomial, c) in rhs.terms {
            let sum = self.terms.get(&monomial).copied().unwrap_or(0.) + c;
            if sum == 0. {
                self.terms.remove(&monomial);
            } else {
                self.terms.insert(monomial, sum);
            }
        }
        self
    }
}

impl Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        self + -rhs
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(mut self) -> Expr {
        self.terms.values_mut().for_each(|c| *c = -*c);
        self
    }
}

impl Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        self.terms
            .iter()
            .cartesian_product(rhs.terms.iter())
            .map(|((m1, c1), (m2, c2))| Expr::mul_monomials(m1, m2, c1 * c2))
            .fold(Expr::zero(), Add::add)
    }
}

impl Coefficient for Expr {
    fn from_f64(value: f64) -> Self {
        Expr::constant(value)
    }

    fn is_negligible(&self, epsilon: f64) -> bool {
        self.as_constant().map_or(false, |c| c.abs() <= epsilon)
    }

    fn simplify(mut self) -> Self {
        self.terms.retain(|_, c| c.abs() > ROUNDING);
        self
    }
}

impl Real for Expr {
    fn recip(self) -> Self {
        match self.single_term() {
            Some((monomial, c)) => Expr::term(monomial.inverse(), c.recip()),
            None => self.map_constant(f64::recip, Atom::Recip),
        }
    }

    fn sqrt(self) -> Self {
        if let Some((monomial, c)) = self.single_term() {
            let even = monomial.powers().all(|(_, power)| power % 2 == 0);
            if c > 0. && even && !monomial.is_empty() {
                let root = monomial.powers().map(|(a, p)| (a.clone(), p / 2)).collect();
                return Expr::term(Monomial(root), c.sqrt());
            }
        }
        self.map_constant(f64::sqrt, Atom::Sqrt)
    }

    fn sin(self) -> Self {
        self.map_constant(f64::sin, Atom::Sin)
    }

    fn cos(self) -> Self {
        self.map_constant(f64::cos, Atom::Cos)
    }

    fn atan(self) -> Self {
        self.map_constant(f64::atan, Atom::Atan)
    }

    fn atan2(self, x: Self) -> Self {
        match (self.as_constant(), x.as_constant()) {
            (Some(y), Some(x)) => Expr::constant(y.atan2(x)),
            _ => Expr::atom(Atom::Atan2(Box::new(self), Box::new(x))),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        self.as_constant()
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Var(name) => write!(f, "{name}"),
            Atom::Sqrt(x) => write!(f, "sqrt({x})"),
            Atom::Recip(x) => write!(f, "1/({x})"),
            Atom::Sin(x) => write!(f, "sin({x})"),
            Atom::Cos(x) => write!(f, "cos({x})"),
            Atom::Atan(x) => write!(f, "atan({x})"),
            Atom::Atan2(y, x) => write!(f, "atan2({y}, {x})"),
        }
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factors = self.0.iter().format_with("*", |(atom, power), f| match power {
            1 => f(atom),
            p => f(&format_args!("{atom}^{p}")),
        });
        write!(f, "{factors}")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (monomial, c)) in self.terms.iter().enumerate() {
            match (i, c.is_sign_negative()) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            let c = c.abs();
            match (monomial.is_empty(), c == 1.) {
                (true, _) => write!(f, "{c}")?,
                (false, true) => write!(f, "{monomial}")?,
                (false, false) => write!(f, "{c}*{monomial}")?,
            }
        }
        Ok(())
    }
}
