//! Accumulated signed binary digits.

use num_bigint::BigInt;
use num_traits::One;

use crate::canon::Digit;
use crate::lft::Matrix;

/// A run of `exponent` signed binary digits folded into one integer.
///
/// Appending digit `k` maps `(n, c)` to `(n + 1, 2c + k)`, so the whole run
/// collapses into a single matrix instead of a product of `n` digit matrices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Digits {
    exponent: u32,
    mantissa: BigInt,
}

impl Digits {
    /// The empty run, whose matrix is a multiple of the identity.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(exponent: u32, mantissa: impl Into<BigInt>) -> Self {
        Self {
            exponent,
            mantissa: mantissa.into(),
        }
    }

    #[must_use]
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    #[must_use]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    #[must_use]
    pub fn push(&self, digit: Digit) -> Self {
        Self {
            exponent: self.exponent + 1,
            mantissa: &self.mantissa * BigInt::from(2) + BigInt::from(digit.value()),
        }
    }

    /// `(2^n + c + 1, 2^n - c - 1, 2^n + c - 1, 2^n - c + 1)`.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix {
        let p: BigInt = num_traits::pow(BigInt::from(2), self.exponent as usize);
        let c = &self.mantissa;
        let one = BigInt::one();
        Matrix::new(
            &p + c + &one,
            &p - c - &one,
            &p + c - &one,
            &p - c + &one,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_is_identity_after_scaling() {
        assert!(Digits::zero().to_matrix().scale().is_identity());
    }

    #[test]
    fn single_digit_matches_digit_matrix() {
        for digit in Digit::EMISSION_ORDER {
            let run = Digits::zero().push(digit).to_matrix();
            let det = run.determinant();
            // equal up to a projective factor: run ∘ D⁻¹ is diagonal
            let product = run.compose(digit.inverse());
            assert_eq!(product.v0().v1(), &BigInt::from(0));
            assert_eq!(product.v1().v0(), &BigInt::from(0));
            assert_eq!(product.v0().v0(), product.v1().v1());
            assert_ne!(det, BigInt::from(0));
        }
    }

    #[test]
    fn push_accumulates_mantissa() {
        let run = Digits::zero()
            .push(Digit::Positive)
            .push(Digit::Negative)
            .push(Digit::Zero);
        assert_eq!(run, Digits::new(3, 2));
    }

    #[test]
    fn run_matches_product_of_digits() {
        let digits = [Digit::Positive, Digit::Zero, Digit::Negative, Digit::Negative];
        let run = digits.iter().fold(Digits::zero(), |acc, d| acc.push(*d));
        let product = digits
            .iter()
            .fold(Matrix::identity(), |acc, d| acc.compose(d.matrix()));
        // same interval endpoints up to a common factor
        let lhs = run.to_matrix();
        assert_eq!(
            lhs.v0().v0() * product.v0().v1(),
            lhs.v0().v1() * product.v0().v0()
        );
        assert_eq!(
            lhs.v1().v0() * product.v1().v1(),
            lhs.v1().v1() * product.v1().v0()
        );
    }
}
