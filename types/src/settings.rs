//! Resolved evaluation settings shared across crates.
//!
//! Raw TOML structs (with `Option` fields) stay private in `moebius-config`.
//! The config loader resolves them into these types at the parse boundary.

use crate::budget::{NestingLimit, StepBudget};
use crate::strategy::Strategy;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("step_budget must be greater than zero")]
    ZeroStepBudget,
    #[error("max_nesting must be greater than zero")]
    ZeroNesting,
}

/// How an evaluation picks branches and how much work it may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalSettings {
    strategy: Strategy,
    steps: StepBudget,
    nesting: NestingLimit,
}

impl EvalSettings {
    #[must_use]
    pub fn new(strategy: Strategy, steps: StepBudget, nesting: NestingLimit) -> Self {
        Self {
            strategy,
            steps,
            nesting,
        }
    }

    /// Validates optional raw values; absent values keep their defaults.
    pub fn resolve(
        strategy: Strategy,
        step_budget: Option<u64>,
        max_nesting: Option<u32>,
    ) -> Result<Self, SettingsError> {
        let steps = match step_budget {
            Some(0) => return Err(SettingsError::ZeroStepBudget),
            Some(steps) => StepBudget::limited(steps),
            None => StepBudget::Unlimited,
        };
        let nesting = match max_nesting {
            Some(0) => return Err(SettingsError::ZeroNesting),
            Some(depth) => NestingLimit::new(depth),
            None => NestingLimit::default(),
        };
        Ok(Self::new(strategy, steps, nesting))
    }

    #[must_use]
    pub fn with_steps(mut self, steps: StepBudget) -> Self {
        self.steps = steps;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_nesting(mut self, nesting: NestingLimit) -> Self {
        self.nesting = nesting;
        self
    }

    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub const fn steps(&self) -> StepBudget {
        self.steps
    }

    #[must_use]
    pub const fn nesting(&self) -> NestingLimit {
        self.nesting
    }
}
