use std::collections::HashMap;

use pga_motor::geometry::{point, rotor, translator};
use pga_motor::symbolic::{self, Expr};
use pga_motor::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use strum::IntoEnumIterator;

const TOL: f64 = 1e-9;

fn random(rng: &mut StdRng, keep: impl Fn(Blade) -> bool) -> Multivector<f64> {
    Multivector::from_fn(|b| if keep(b) { rng.gen_range(-1.0..1.0) } else { 0. })
}

#[test]
fn rotor_sqrt() {
    let rot_180 = Multivector::blade(Blade::E12, -1.);
    let v = point(2., 3., 5.);
    let v_90 = point(-3., 2., 5.);

    let rot_90 = rot_180.sqrt().unwrap();

    assert!((rot_90 >> v).approx_eq(&v_90, TOL));
}

#[test]
fn reverse_is_involution() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        let x = random(&mut rng, |_| true);
        assert_eq!(x, x.rev().rev());
    }
}

#[test]
fn blade_squares_match_reverse_sign() {
    for blade in Blade::iter() {
        let (square, sign) = blade.multiply(blade);
        if blade.is_ideal() {
            assert_eq!(0, sign);
        } else {
            // b ~b == 1 for every non-null blade
            assert_eq!(Blade::Scalar, square);
            assert_eq!(Blade::reverse_sign(blade.grade()), sign);
        }
    }
}

#[test]
fn inverse_of_even_elements() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..50 {
        let m = random(&mut rng, |b| b.grade() % 2 == 0).add_scalar(2.);
        // versors have a scalar norm, so normalize the pseudoscalar residue away
        let m = m.normalized().unwrap().scale(&3.);
        let inv = m.inverse().unwrap();
        assert!((&m * &inv).approx_eq(&Multivector::one(), TOL));
    }
}

#[test]
fn outer_product_antisymmetry() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let u = random(&mut rng, |b| b.grade() == 1);
        let v = random(&mut rng, |b| b.grade() == 1);
        assert!((&u ^ &v).approx_eq(&-(&v ^ &u), TOL));
    }
}

#[test]
fn sqrt_round_trip() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..50 {
        let m = random(&mut rng, |b| b.grade() == 2).exp();
        let root = m.sqrt().unwrap();
        assert!((&root * &root).approx_eq(&m, TOL));
    }
}

#[test]
fn exp_log_round_trip_in_both_conventions() {
    let mut rng = StdRng::seed_from_u64(5);
    let precision = Precision::default();
    for convention in Convention::iter() {
        for _ in 0..50 {
            let b = random(&mut rng, |b| b.grade() == 2).scale(&0.7);
            let m = b.exp_with(convention, &precision);
            let log = m.log_with(convention, &precision).unwrap();
            assert!(log.approx_eq(&b, 1e-8), "{convention:?}: {b} vs {log}");
            assert!(log.exp_with(convention, &precision).approx_eq(&m, 1e-8));
        }
    }
}

#[test]
fn screw_motion_from_rotor_and_translator() {
    // quarter turn about the z axis followed by a lift of 2 along it
    let axis = Multivector::blade(Blade::E12, -1.);
    let r = rotor(std::f64::consts::FRAC_PI_2, &axis).unwrap();
    let t = translator(2., &Multivector::blade(Blade::E03, 1.));
    let screw = &t * &r;

    assert!(screw.is_normalized(TOL));
    assert!((&t * &r).approx_eq(&(&r * &t), TOL));
    assert!((&screw >> &point(1., 0., 0.)).approx_eq(&point(0., 1., 2.), TOL));

    let log = screw.log().unwrap();
    assert!(log.exp().approx_eq(&screw, TOL));
    assert!(screw.sqrt().unwrap().approx_eq(&log.scale(&0.5).exp(), TOL));
}

#[test]
fn symbolic_sqrt_evaluates_like_numeric() {
    let m = symbolic::motor("s", "ps", "e", "v");
    let root = m.sqrt().unwrap();

    let numeric = Multivector::from_terms([
        (Blade::E23, 0.3),
        (Blade::E01, 0.2),
        (Blade::E12, -0.6),
    ])
    .exp();

    let mut env = HashMap::new();
    env.insert("s".to_string(), numeric.scalar_part());
    env.insert("ps".to_string(), numeric.pseudoscalar_part());
    for (i, blade) in [Blade::E23, Blade::E31, Blade::E12].into_iter().enumerate() {
        env.insert(format!("e[{i}]"), numeric[blade]);
    }
    for (i, blade) in [Blade::E01, Blade::E02, Blade::E03].into_iter().enumerate() {
        env.insert(format!("v[{i}]"), numeric[blade]);
    }

    let lookup = |name: &str| env.get(name).copied();
    let evaluated = root.map(|c| c.eval(&lookup).unwrap());
    assert!(evaluated.approx_eq(&numeric.sqrt().unwrap(), TOL));
}

#[test]
fn unbound_variables_are_reported() {
    let x = Expr::var("x") + Expr::constant(1.);
    let err = x.eval(&|_: &str| None).unwrap_err();
    assert_eq!(Error::UnboundVariable("x".to_string()), err);
}
