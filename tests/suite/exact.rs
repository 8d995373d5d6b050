//! Exact value tests

use moebius_engine::{
    EvalSettings, Evaluator, Expr, Matrix, NullSink, Numeral, Sefp, SignRegion, Uefp, Vector,
    ediv, epi, erational, esqrtrat,
};
use proptest::prelude::*;

use crate::common::{assert_renders, render_str};

#[test]
fn perfect_squares_are_exact() {
    for precision in [0, 1, 5, 20] {
        assert_eq!(render_str(esqrtrat(4, 1).unwrap(), precision), "2");
        assert_eq!(render_str(esqrtrat(0, 1).unwrap(), precision), "0");
        assert_eq!(render_str(esqrtrat(9, 4).unwrap(), precision), "3/2");
        assert_eq!(render_str(esqrtrat(1, 100).unwrap(), precision), "1/10");
    }
}

#[test]
fn rationals_render_reduced() {
    assert_renders(|| erational(3, 7).unwrap(), &[(0, "3/7"), (10, "3/7")]);
    assert_renders(|| erational(-3, 7).unwrap(), &[(0, "-3/7"), (10, "-3/7")]);
    assert_renders(|| erational(6, -4).unwrap(), &[(5, "-3/2")]);
}

#[test]
fn matrix_over_rational_collapses_after_one_step() {
    let third = || Expr::matrix_over(Matrix::new(1, 0, 0, 3), Expr::vector(Vector::new(1, 1)));
    // sign placement alone cannot see through the matrix
    assert_renders(third, &[(0, "unbounded"), (1, "1/3"), (10, "1/3")]);
}

#[test]
fn identity_node_is_transparent() {
    let wrapped = Expr::matrix_over(Matrix::identity(), epi());
    assert_eq!(render_str(wrapped, 10), render_str(epi(), 10));
}

#[test]
fn division_by_exact_one() {
    assert_eq!(
        render_str(ediv(epi(), erational(1, 1).unwrap()), 5),
        "031416e1"
    );
}

#[test]
fn reciprocal_of_a_digit_run() {
    let mut sink = NullSink;
    let mut evaluator = Evaluator::new(&EvalSettings::default(), &mut sink);
    let sefp = evaluator.sign_emission(esqrtrat(2, 1).unwrap(), 12).unwrap();
    assert_eq!(sefp.sign(), SignRegion::Positive);

    let (sign, uefp) = sefp.into_parts();
    let reciprocal: Uefp = uefp.reciprocal();
    let m = Sefp::new(sign, reciprocal).to_matrix();
    assert_eq!(Numeral::from_matrix(&m).to_string(), "0707e0");
}

#[test]
fn signed_reciprocal_swaps_zero_and_infinity() {
    let sqrt2 = || esqrtrat(2, 1).unwrap();
    let cases = [
        // √2 - 1.4142 ≈ 1.356e-5
        (
            Matrix::new(10_000, 0, -14_142, 10_000),
            SignRegion::Zero,
            "07373e5",
        ),
        // 1/(√2 - 1.4142) ≈ 73733.4
        (
            Matrix::new(0, 10_000, 10_000, -14_142),
            SignRegion::Infinity,
            "01356e-4",
        ),
    ];
    for (head, region, reciprocal) in cases {
        let mut sink = NullSink;
        let mut evaluator = Evaluator::new(&EvalSettings::default(), &mut sink);
        let sefp = evaluator.sign_emission(Expr::matrix_over(head, sqrt2()), 30).unwrap();
        assert_eq!(sefp.sign(), region);

        let flipped = sefp.reciprocal();
        assert_eq!(flipped.sign(), region.reciprocal());
        assert_eq!(Numeral::from_matrix(&flipped.to_matrix()).to_string(), reciprocal);
    }
}

#[test]
fn signed_reciprocal_keeps_half_lines() {
    let mut sink = NullSink;
    let mut evaluator = Evaluator::new(&EvalSettings::default(), &mut sink);
    let sefp = evaluator.sign_emission(esqrtrat(2, 1).unwrap(), 12).unwrap();
    let flipped = sefp.reciprocal();
    assert_eq!(flipped.sign(), SignRegion::Positive);
    assert_eq!(Numeral::from_matrix(&flipped.to_matrix()).to_string(), "0707e0");
}

#[test]
fn invalid_rationals_are_rejected() {
    assert!(erational(0, 0).is_err());
    assert!(esqrtrat(1, 0).is_err());
    assert!(esqrtrat(-2, 1).is_err());
    assert_eq!(render_str(esqrtrat(-9, -4).unwrap(), 3), "3/2");
}

fn reduced(p: i64, q: i64) -> String {
    let (mut a, mut b) = (p.abs(), q.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    let (mut p, mut q) = (p / a, q / a);
    if q < 0 {
        p = -p;
        q = -q;
    }
    if q == 1 {
        p.to_string()
    } else {
        format!("{p}/{q}")
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exact_rationals_render_in_lowest_terms(
        p in -10_000i64..10_000,
        q in (1i64..10_000).prop_flat_map(|q| prop_oneof![Just(q), Just(-q)]),
        precision in 0u32..8,
    ) {
        let rendered = render_str(erational(p, q).unwrap(), precision);
        prop_assert_eq!(rendered, reduced(p, q));
    }
}
