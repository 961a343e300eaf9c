//! Symbolic coefficients and builders for multivectors of named placeholders.
//!
//! Builders name their placeholders after a base name and a bracketed index,
//! so `point("p")` holds `p[1]`, `p[2]` and `p[3]`. Deriving a formula is then
//! running the numeric algorithm on these multivectors and printing the result.

mod expr;

pub use expr::{Atom, Expr, Monomial};

use crate::{Blade, Multivector};

/// Placeholder `name[index]`
pub fn indexed(name: &str, index: usize) -> Expr {
    Expr::var(format!("{name}[{index}]"))
}

fn placeholders(name: &str, blades: &[(usize, Blade)]) -> Multivector<Expr> {
    Multivector::from_terms(blades.iter().map(|&(i, b)| (b, indexed(name, i))))
}

/// Unit-weight point `e123 - p[1] e032 - p[2] e013 - p[3] e021`
pub fn point(name: &str) -> Multivector<Expr> {
    let ideal = placeholders(name, &[(1, Blade::E032), (2, Blade::E013), (3, Blade::E021)]);
    -ideal + Multivector::blade(Blade::E123, Expr::constant(1.))
}

/// Weighted point with `p[0]` on `e123`
pub fn trivector(name: &str) -> Multivector<Expr> {
    placeholders(
        name,
        &[
            (0, Blade::E123),
            (1, Blade::E032),
            (2, Blade::E013),
            (3, Blade::E021),
        ],
    )
}

/// Ideal point `-d[1] e032 - d[2] e013 - d[3] e021`
pub fn direction(name: &str) -> Multivector<Expr> {
    -placeholders(name, &[(1, Blade::E032), (2, Blade::E013), (3, Blade::E021)])
}

/// Plane `n[0] e0 + n[1] e1 + n[2] e2 + n[3] e3`
pub fn vector(name: &str) -> Multivector<Expr> {
    placeholders(
        name,
        &[(0, Blade::E0), (1, Blade::E1), (2, Blade::E2), (3, Blade::E3)],
    )
}

pub fn euclidean_bivector(name: &str) -> Multivector<Expr> {
    placeholders(name, &[(0, Blade::E23), (1, Blade::E31), (2, Blade::E12)])
}

pub fn ideal_bivector(name: &str) -> Multivector<Expr> {
    placeholders(name, &[(0, Blade::E01), (1, Blade::E02), (2, Blade::E03)])
}

pub fn line(e: &str, v: &str) -> Multivector<Expr> {
    euclidean_bivector(e) + ideal_bivector(v)
}

pub fn scalar(name: &str) -> Multivector<Expr> {
    Multivector::scalar(Expr::var(name))
}

pub fn pseudoscalar(name: &str) -> Multivector<Expr> {
    Multivector::pseudoscalar(Expr::var(name))
}

pub fn motor(s: &str, ps: &str, e: &str, v: &str) -> Multivector<Expr> {
    scalar(s) + line(e, v) + pseudoscalar(ps)
}

/// Motor without pseudoscalar part
pub fn simple_motor(s: &str, e: &str, v: &str) -> Multivector<Expr> {
    scalar(s) + line(e, v)
}

pub fn rotor(s: &str, e: &str) -> Multivector<Expr> {
    scalar(s) + euclidean_bivector(e)
}

pub fn translator(s: &str, v: &str) -> Multivector<Expr> {
    scalar(s) + ideal_bivector(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry, Reverse};
    use std::collections::HashMap;

    fn bindings(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn eval(mv: &Multivector<Expr>, env: &HashMap<String, f64>) -> Multivector<f64> {
        let lookup = |name: &str| env.get(name).copied();
        mv.map(|c| c.eval(&lookup).unwrap())
    }

    #[test]
    fn point_naming() {
        let p = point("p");
        assert_eq!("-p[1]*e032 - p[2]*e013 - p[3]*e021 + e123", p.to_string());

        let env = bindings(&[("p[1]", 2.), ("p[2]", 3.), ("p[3]", 5.)]);
        assert_eq!(geometry::point(2., 3., 5.), eval(&p, &env));
    }

    #[test]
    fn builders_use_expected_blades() {
        let blades = |mv: Multivector<Expr>| mv.terms().map(|(b, _)| b).collect::<Vec<_>>();
        assert_eq!(
            vec![Blade::E0, Blade::E1, Blade::E2, Blade::E3],
            blades(vector("n"))
        );
        assert_eq!(
            vec![Blade::E01, Blade::E02, Blade::E03, Blade::E23, Blade::E31, Blade::E12],
            blades(line("e", "v"))
        );
        assert_eq!(
            vec![
                Blade::Scalar,
                Blade::E01,
                Blade::E02,
                Blade::E03,
                Blade::E23,
                Blade::E31,
                Blade::E12,
                Blade::E0123
            ],
            blades(motor("s", "ps", "e", "v"))
        );
        assert_eq!(4, blades(trivector("t")).len());
        assert_eq!(3, blades(direction("d")).len());
        assert_eq!(4, blades(rotor("s", "e")).len());
        assert_eq!(4, blades(translator("s", "v")).len());
        assert_eq!(7, blades(simple_motor("s", "e", "v")).len());
    }

    #[test]
    fn symbolic_product_matches_numeric() {
        let m = motor("s", "ps", "e", "v");
        let p = point("p");
        let moved = &(&m * &p) * &m.rev();

        let env = bindings(&[
            ("s", 0.8),
            ("ps", 0.1),
            ("e[0]", 0.3),
            ("e[1]", -0.2),
            ("e[2]", 0.4),
            ("v[0]", 1.0),
            ("v[1]", -0.5),
            ("v[2]", 0.25),
            ("p[1]", 2.),
            ("p[2]", 3.),
            ("p[3]", 5.),
        ]);
        let numeric = eval(&m, &env) >> eval(&p, &env);
        assert!(eval(&moved, &env).approx_eq(&numeric, 1e-12));
    }

    #[test]
    fn symbolic_rotor_norm() {
        let r = rotor("s", "e");
        let norm = (&r * &r.rev()).simplify();
        let expected = Expr::var("s") * Expr::var("s")
            + indexed("e", 0) * indexed("e", 0)
            + indexed("e", 1) * indexed("e", 1)
            + indexed("e", 2) * indexed("e", 2);
        assert_eq!(Multivector::scalar(expected), norm);
    }
}
