//! Partially normalised reals.
//!
//! A [`Uefp`] is a run of emitted digits in front of the unconsumed rest of a
//! stream; a [`Sefp`] additionally carries the sign region the value was
//! placed in. Both can be resumed to emit more digits.

use moebius_types::{Digits, Matrix, SignRegion};

use crate::expr::Expr;
use crate::generators::ereciprocal;

/// Unsigned exact floating point: `D_{n,c}(rest)`.
#[derive(Debug, Clone)]
pub struct Uefp {
    digits: Digits,
    rest: Expr,
}

impl Uefp {
    #[must_use]
    pub fn new(digits: Digits, rest: Expr) -> Self {
        Self { digits, rest }
    }

    #[must_use]
    pub fn digits(&self) -> &Digits {
        &self.digits
    }

    #[must_use]
    pub fn rest(&self) -> &Expr {
        &self.rest
    }

    #[must_use]
    pub fn into_parts(self) -> (Digits, Expr) {
        (self.digits, self.rest)
    }

    /// The digit run as a matrix node over the rest of the stream.
    #[must_use]
    pub fn into_expr(self) -> Expr {
        Expr::matrix_over(self.digits.to_matrix().scale(), self.rest)
    }

    /// `1/x`: the mirrored digit run over the reciprocal of the rest.
    #[must_use]
    pub fn reciprocal(self) -> Self {
        let digits = Digits::new(self.digits.exponent(), -self.digits.mantissa());
        Self::new(digits, ereciprocal(self.rest))
    }
}

/// Signed exact floating point: `S(D_{n,c}(rest))`.
#[derive(Debug, Clone)]
pub struct Sefp {
    sign: SignRegion,
    uefp: Uefp,
}

impl Sefp {
    #[must_use]
    pub fn new(sign: SignRegion, uefp: Uefp) -> Self {
        Self { sign, uefp }
    }

    #[must_use]
    pub fn sign(&self) -> SignRegion {
        self.sign
    }

    #[must_use]
    pub fn uefp(&self) -> &Uefp {
        &self.uefp
    }

    #[must_use]
    pub fn into_parts(self) -> (SignRegion, Uefp) {
        (self.sign, self.uefp)
    }

    /// The rest of the stream has collapsed to a terminal vector.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.uefp.rest().is_terminal()
    }

    /// `1/x`. The half-lines keep their region; `Zero` and `Infinity` swap.
    #[must_use]
    pub fn reciprocal(self) -> Self {
        Self::new(self.sign.reciprocal(), self.uefp.reciprocal())
    }

    /// The interval `S · D_{n,c}` known to contain the value.
    ///
    /// An exact value yields the degenerate matrix whose rows are both the
    /// value itself, so its determinant is zero.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix {
        let m = self.sign.matrix().compose(&self.uefp.digits.to_matrix());
        match self.uefp.rest().head().as_vector() {
            Some(v) => {
                let w = m.apply(v);
                Matrix::from_rows(w.clone(), w)
            }
            None => m,
        }
    }
}
