//! Evaluation budget types.
//!
//! Emission is semi-decidable: a value sitting exactly on a digit boundary
//! can absorb input forever. These types bound the work by construction.

/// Absorption steps an evaluation may still take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepBudget {
    #[default]
    Unlimited,
    Limited(u64),
}

impl StepBudget {
    #[must_use]
    pub const fn limited(steps: u64) -> Self {
        Self::Limited(steps)
    }

    /// `None` for an unlimited budget.
    #[must_use]
    pub const fn remaining(self) -> Option<u64> {
        match self {
            Self::Unlimited => None,
            Self::Limited(steps) => Some(steps),
        }
    }

    /// Consume one step. Returns the decremented budget, or `None` if exhausted.
    #[must_use]
    pub const fn take_one(self) -> Option<StepBudget> {
        match self {
            Self::Unlimited => Some(Self::Unlimited),
            Self::Limited(0) => None,
            Self::Limited(steps) => Some(Self::Limited(steps - 1)),
        }
    }
}

/// Maximum number of nested one-digit lookaheads.
///
/// Each lookahead runs a nested digit emission on a tensor argument, so the
/// limit bounds native stack use. It is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestingLimit(u32);

impl NestingLimit {
    pub const DEFAULT: u32 = 256;

    /// Clamped to at least one level.
    #[must_use]
    pub fn new(depth: u32) -> Self {
        Self(depth.max(1))
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn permits(self, depth: u32) -> bool {
        depth <= self.0
    }
}

impl Default for NestingLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
