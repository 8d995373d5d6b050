//! Canonical sign, digit and arithmetic transformations.
//!
//! Sign matrices split the projective line into four overlapping regions;
//! digit matrices split `[0, ∞]` into three overlapping intervals. The
//! overlap is what lets emission always make progress on a value that sits
//! near a boundary.

use std::fmt;
use std::sync::LazyLock;

use crate::lft::{Matrix, Tensor};

/// `[0, ∞]`.
pub static SPOS: LazyLock<Matrix> = LazyLock::new(|| Matrix::new(1, 0, 0, 1));
/// `[-∞, 0]`.
pub static SNEG: LazyLock<Matrix> = LazyLock::new(|| Matrix::new(0, 1, -1, 0));
/// `[-1, 1]`.
pub static SZER: LazyLock<Matrix> = LazyLock::new(|| Matrix::new(1, 1, -1, 1));
/// `[1, -1]` through ∞.
pub static SINF: LazyLock<Matrix> = LazyLock::new(|| Matrix::new(1, -1, 1, 1));

pub static SPOS_INV: LazyLock<Matrix> = LazyLock::new(|| SPOS.inverse());
pub static SNEG_INV: LazyLock<Matrix> = LazyLock::new(|| SNEG.inverse());
pub static SZER_INV: LazyLock<Matrix> = LazyLock::new(|| SZER.inverse());
pub static SINF_INV: LazyLock<Matrix> = LazyLock::new(|| SINF.inverse());

/// `[0, 1]`.
pub static DNEG: LazyLock<Matrix> = LazyLock::new(|| Matrix::new(1, 1, 0, 2));
/// `[1/3, 3]`.
pub static DZER: LazyLock<Matrix> = LazyLock::new(|| Matrix::new(3, 1, 1, 3));
/// `[1, ∞]`.
pub static DPOS: LazyLock<Matrix> = LazyLock::new(|| Matrix::new(2, 0, 1, 1));

pub static DNEG_INV: LazyLock<Matrix> = LazyLock::new(|| DNEG.inverse());
pub static DZER_INV: LazyLock<Matrix> = LazyLock::new(|| DZER.inverse());
pub static DPOS_INV: LazyLock<Matrix> = LazyLock::new(|| DPOS.inverse());

/// `(x, y) ↦ x + y`.
pub static TADD: LazyLock<Tensor> =
    LazyLock::new(|| Tensor::new(Matrix::new(0, 0, 1, 0), Matrix::new(1, 0, 0, 1)));
/// `(x, y) ↦ x - y`.
pub static TSUB: LazyLock<Tensor> =
    LazyLock::new(|| Tensor::new(Matrix::new(0, 0, 1, 0), Matrix::new(-1, 0, 0, 1)));
/// `(x, y) ↦ x · y`.
pub static TMUL: LazyLock<Tensor> =
    LazyLock::new(|| Tensor::new(Matrix::new(1, 0, 0, 0), Matrix::new(0, 0, 0, 1)));
/// `(x, y) ↦ x / y`.
pub static TDIV: LazyLock<Tensor> =
    LazyLock::new(|| Tensor::new(Matrix::new(0, 0, 1, 0), Matrix::new(0, 1, 0, 0)));

/// One of the four sign regions a real can be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignRegion {
    Positive,
    Negative,
    Zero,
    Infinity,
}

impl SignRegion {
    /// Order in which regions are tried during sign emission.
    pub const EMISSION_ORDER: [SignRegion; 4] = [
        SignRegion::Positive,
        SignRegion::Negative,
        SignRegion::Zero,
        SignRegion::Infinity,
    ];

    #[must_use]
    pub fn matrix(self) -> &'static Matrix {
        match self {
            SignRegion::Positive => &SPOS,
            SignRegion::Negative => &SNEG,
            SignRegion::Zero => &SZER,
            SignRegion::Infinity => &SINF,
        }
    }

    #[must_use]
    pub fn inverse(self) -> &'static Matrix {
        match self {
            SignRegion::Positive => &SPOS_INV,
            SignRegion::Negative => &SNEG_INV,
            SignRegion::Zero => &SZER_INV,
            SignRegion::Infinity => &SINF_INV,
        }
    }

    /// The region holding `1/x` for every `x` in this one.
    ///
    /// Both half-lines are closed under reciprocals; `[-1, 1]` and its
    /// complement through ∞ swap.
    #[must_use]
    pub const fn reciprocal(self) -> SignRegion {
        match self {
            SignRegion::Positive => SignRegion::Positive,
            SignRegion::Negative => SignRegion::Negative,
            SignRegion::Zero => SignRegion::Infinity,
            SignRegion::Infinity => SignRegion::Zero,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SignRegion::Positive => "positive",
            SignRegion::Negative => "negative",
            SignRegion::Zero => "zero",
            SignRegion::Infinity => "infinity",
        }
    }
}

impl fmt::Display for SignRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signed binary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Digit {
    Negative,
    Zero,
    Positive,
}

impl Digit {
    /// Order in which digits are tried during digit emission.
    pub const EMISSION_ORDER: [Digit; 3] = [Digit::Negative, Digit::Positive, Digit::Zero];

    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Digit::Negative => -1,
            Digit::Zero => 0,
            Digit::Positive => 1,
        }
    }

    #[must_use]
    pub fn matrix(self) -> &'static Matrix {
        match self {
            Digit::Negative => &DNEG,
            Digit::Zero => &DZER,
            Digit::Positive => &DPOS,
        }
    }

    #[must_use]
    pub fn inverse(self) -> &'static Matrix {
        match self {
            Digit::Negative => &DNEG_INV,
            Digit::Zero => &DZER_INV,
            Digit::Positive => &DPOS_INV,
        }
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lft::Vector;

    #[test]
    fn sign_regions_cover_their_endpoints() {
        // positive region maps 0 and ∞ to themselves
        assert_eq!(SPOS.apply(&Vector::new(0, 1)), Vector::new(0, 1));
        // zero region maps 0 to -1 and ∞ to 1
        assert_eq!(SZER.apply(&Vector::new(0, 1)), Vector::new(-1, 1));
        assert_eq!(SZER.apply(&Vector::new(1, 0)), Vector::new(1, 1));
        // infinity region maps 0 to 1 and ∞ to -1
        assert_eq!(SINF.apply(&Vector::new(0, 1)), Vector::new(1, 1));
        assert_eq!(SINF.apply(&Vector::new(1, 0)), Vector::new(1, -1));
    }

    #[test]
    fn digit_intervals() {
        // dneg spans [0, 1]
        assert_eq!(DNEG.apply(&Vector::new(0, 1)), Vector::new(0, 2));
        assert_eq!(DNEG.apply(&Vector::new(1, 0)), Vector::new(1, 1));
        // dpos spans [1, ∞]
        assert_eq!(DPOS.apply(&Vector::new(0, 1)), Vector::new(1, 1));
        assert_eq!(DPOS.apply(&Vector::new(1, 0)), Vector::new(2, 0));
        // dzer spans [1/3, 3]
        assert_eq!(DZER.apply(&Vector::new(0, 1)), Vector::new(1, 3));
        assert_eq!(DZER.apply(&Vector::new(1, 0)), Vector::new(3, 1));
    }

    #[test]
    fn inverses_compose_to_determinant_multiple() {
        for digit in Digit::EMISSION_ORDER {
            let det = digit.matrix().determinant();
            let product = digit.matrix().compose(digit.inverse());
            assert_eq!(product, Matrix::new(det.clone(), 0, 0, det));
        }
        for region in SignRegion::EMISSION_ORDER {
            let det = region.matrix().determinant();
            let product = region.matrix().compose(region.inverse());
            assert_eq!(product, Matrix::new(det.clone(), 0, 0, det));
        }
    }

    #[test]
    fn reciprocal_regions_commute_with_inversion() {
        // S'(1/y) = 1/S(y) as projective maps
        let flip = Matrix::new(0, 1, 1, 0);
        for region in SignRegion::EMISSION_ORDER {
            let lhs = region.reciprocal().matrix().compose(&flip);
            let rhs = flip.compose(region.matrix());
            let scaled = |m: &Matrix, k: i64| {
                Matrix::new(
                    m.v0().v0() * k,
                    m.v0().v1() * k,
                    m.v1().v0() * k,
                    m.v1().v1() * k,
                )
            };
            assert!(
                lhs == rhs || lhs == scaled(&rhs, -1),
                "{region}: {lhs} vs {rhs}"
            );
        }
        assert_eq!(SignRegion::Zero.reciprocal(), SignRegion::Infinity);
        assert_eq!(SignRegion::Infinity.reciprocal(), SignRegion::Zero);
    }

    #[test]
    fn emission_orders() {
        let values: Vec<i8> = Digit::EMISSION_ORDER.into_iter().map(Digit::value).collect();
        assert_eq!(values, vec![-1, 1, 0]);
        assert_eq!(SignRegion::EMISSION_ORDER[0], SignRegion::Positive);
        assert_eq!(SignRegion::EMISSION_ORDER[3], SignRegion::Infinity);
    }

    #[test]
    fn arithmetic_tensors() {
        let x = Vector::new(3, 1);
        let y = Vector::new(2, 1);
        let add = TADD.fix_second(&y).apply(&x);
        let mul = TMUL.fix_second(&y).apply(&x);
        assert_eq!(add, Vector::new(5, 1));
        assert_eq!(mul, Vector::new(6, 1));
    }
}
