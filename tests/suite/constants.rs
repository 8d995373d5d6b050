//! Transcendental and irrational constant tests

use moebius_engine::{ee, elogpos, epi, erational, esqrtrat};

use crate::common::assert_renders;

#[test]
fn pi_digits() {
    assert_renders(
        epi,
        &[
            (0, "unbounded"),
            (1, "031e1"),
            (5, "031416e1"),
            (10, "03141592653e1"),
            (20, "0314159265358979323846e1"),
        ],
    );
}

#[test]
fn e_digits() {
    assert_renders(
        ee,
        &[
            (0, "unbounded"),
            (1, "027e1"),
            (5, "0271828e1"),
            (10, "027182818284e1"),
        ],
    );
}

#[test]
fn square_roots() {
    assert_renders(
        || esqrtrat(2, 1).unwrap(),
        &[
            (0, "unbounded"),
            (1, "014e1"),
            (5, "0141421e1"),
            (10, "014142135623e1"),
        ],
    );
    assert_renders(
        || esqrtrat(1, 2).unwrap(),
        &[(1, "07e0"), (5, "070710e0"), (10, "07071067811e0")],
    );
    assert_renders(
        || esqrtrat(3, 1).unwrap(),
        &[(1, "017e1"), (5, "0173205e1"), (10, "017320508075e1")],
    );
}

#[test]
fn square_roots_of_scaled_rationals() {
    assert_renders(
        || esqrtrat(2_000_000, 1).unwrap(),
        &[(1, "02e4"), (5, "014143e4"), (10, "01414213562e4")],
    );
    assert_renders(
        || esqrtrat(2, 100).unwrap(),
        &[(1, "014e0"), (5, "0141421e0"), (10, "014142135624e0")],
    );
    assert_renders(
        || esqrtrat(10_005, 1).unwrap(),
        &[(1, "01e3"), (5, "010002e3"), (10, "01000249969e3")],
    );
}

#[test]
fn natural_logarithm() {
    assert_renders(
        || elogpos(erational(2, 1).unwrap()),
        &[(1, "07e0"), (5, "069314e0"), (10, "06931471805e0")],
    );
}

#[test]
fn log_of_one_narrows_around_zero() {
    assert_renders(
        || elogpos(erational(1, 1).unwrap()),
        &[
            (0, "unbounded"),
            (1, "0e-2"),
            (5, "0e-6"),
            (10, "0e-11"),
        ],
    );
}
