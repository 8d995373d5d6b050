//! Two-argument arithmetic and composed stream tests

use moebius_engine::{ediv, ee, elogpos, emul, epi, esqrtrat, esqrtspos, esub, render};

use crate::common::{assert_renders, render_str};

#[test]
fn e_minus_pi() {
    assert_renders(
        || esub(ee(), epi()),
        &[
            (0, "unbounded"),
            (1, "-042e0"),
            (5, "-042331e0"),
            (10, "-042331082513e0"),
        ],
    );
}

#[test]
fn e_times_pi() {
    assert_renders(
        || emul(ee(), epi()),
        &[(1, "08e1"), (5, "085397e1"), (10, "08539734223e1")],
    );
}

#[test]
fn e_over_pi() {
    assert_renders(
        || ediv(ee(), epi()),
        &[(1, "08e0"), (5, "086525e0"), (10, "08652559794e0")],
    );
}

#[test]
fn sqrt2_squared_never_becomes_exact() {
    // the product is 2, but no finite prefix of either factor proves it
    assert_renders(
        || emul(esqrtrat(2, 1).unwrap(), esqrtrat(2, 1).unwrap()),
        &[(1, "020e1"), (5, "0200000e1"), (10, "020000000000e1")],
    );
}

#[test]
fn fourth_root_of_two() {
    assert_renders(
        || esqrtspos(esqrtrat(2, 1).unwrap()),
        &[(1, "012e1"), (5, "0118921e1")],
    );
}

#[test]
fn log_of_e_is_one() {
    assert_renders(|| elogpos(ee()), &[(1, "010e1"), (5, "0100000e1")]);
}

#[test]
fn traced_render_matches_quiet_render() {
    assert_eq!(render(epi(), 5).unwrap(), render_str(epi(), 5));
}
