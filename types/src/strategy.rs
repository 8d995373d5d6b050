//! Branch selection for two-argument absorption.
//!
//! When a tensor needs more input, exactly one of its arguments is absorbed
//! per step. The policies here only pick which one; they never consume input.

use crate::lft::{Lft, Tensor, disjoint};
use crate::ExactError;

/// Alternates by the parity of the tensor's absorption counter.
#[must_use]
pub fn fair(t: &Tensor) -> usize {
    (t.counter() % 2) as usize + 1
}

/// Absorbs the second argument once the images of the first argument's
/// endpoints no longer overlap; otherwise the first.
#[must_use]
pub fn refine_guided(t: &Tensor) -> usize {
    let swapped = t.transpose();
    if disjoint(swapped.m0(), swapped.m1()) { 2 } else { 1 }
}

/// `refine_guided` for refining tensors, `fair` otherwise.
#[must_use]
pub fn overlap(t: &Tensor) -> usize {
    if t.refine() { refine_guided(t) } else { fair(t) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    Fair,
    Refine,
    #[default]
    Overlap,
}

impl Strategy {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fair" => Some(Self::Fair),
            "refine" | "refine-guided" => Some(Self::Refine),
            "overlap" => Some(Self::Overlap),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fair => "fair",
            Self::Refine => "refine",
            Self::Overlap => "overlap",
        }
    }

    /// The argument slot (1 or 2) to absorb next.
    #[must_use]
    pub fn choose(self, t: &Tensor) -> usize {
        match self {
            Self::Fair => fair(t),
            Self::Refine => refine_guided(t),
            Self::Overlap => overlap(t),
        }
    }

    /// Whether argument `index` of `lft` should be absorbed this step.
    ///
    /// A matrix always absorbs its only argument.
    pub fn decision(self, index: usize, lft: &Lft) -> Result<bool, ExactError> {
        match lft {
            Lft::Vector(_) => Err(ExactError::UnsupportedOperation(
                "a terminal vector has no argument to absorb",
            )),
            Lft::Matrix(_) if index == 1 => Ok(true),
            Lft::Tensor(t) if index == 1 || index == 2 => Ok(self.choose(t) == index),
            _ => Err(ExactError::ArityMismatch {
                index,
                arity: lft.branch(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::{DPOS, TADD, TMUL};
    use crate::lft::Matrix;

    #[test]
    fn fair_alternates_with_counter() {
        let t = TMUL.clone();
        assert_eq!(fair(&t), 1);
        let t = t.bumped();
        assert_eq!(fair(&t), 2);
        let t = t.bumped();
        assert_eq!(fair(&t), 1);
    }

    #[test]
    fn refine_guided_prefers_second_once_first_is_separated() {
        // T(x, y) = x + y: the endpoints of x never separate, absorb x first
        assert_eq!(refine_guided(&TADD), 1);
        // slot-1 endpoints map y to disjoint intervals
        let t = Tensor::new(Matrix::identity(), Matrix::new(1, 1, 1, 2));
        assert!(t.refine());
        assert_eq!(refine_guided(&t), 2);
        assert_eq!(overlap(&t), 2);
    }

    #[test]
    fn overlap_falls_back_to_fair() {
        assert!(!TADD.refine());
        assert_eq!(overlap(&TADD), fair(&TADD));
    }

    #[test]
    fn decision_for_matrix_is_always_first_slot() {
        let lft = Lft::Matrix(DPOS.clone());
        assert_eq!(Strategy::Overlap.decision(1, &lft), Ok(true));
        assert_eq!(
            Strategy::Overlap.decision(2, &lft),
            Err(ExactError::ArityMismatch { index: 2, arity: 1 })
        );
    }

    #[test]
    fn decision_for_tensor_picks_exactly_one_slot() {
        let lft = Lft::Tensor(TMUL.clone());
        for strategy in [Strategy::Fair, Strategy::Refine, Strategy::Overlap] {
            let first = strategy.decision(1, &lft).unwrap();
            let second = strategy.decision(2, &lft).unwrap();
            assert_ne!(first, second);
        }
        assert!(Strategy::Fair.decision(3, &lft).is_err());
    }

    #[test]
    fn parse_round_trips() {
        for strategy in [Strategy::Fair, Strategy::Refine, Strategy::Overlap] {
            assert_eq!(Strategy::parse(strategy.as_str()), Some(strategy));
        }
        assert_eq!(Strategy::parse(" Overlap "), Some(Strategy::Overlap));
        assert_eq!(Strategy::parse("greedy"), None);
    }
}
