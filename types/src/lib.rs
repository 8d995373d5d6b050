//! Core value types for Moebius.
//!
//! Pure integer algebra with no IO and no laziness: linear fractional
//! transformations, the canonical sign and digit matrices, digit runs,
//! branch strategies, budgets and resolved settings.

mod budget;
pub mod canon;
mod digits;
mod error;
mod lft;
mod settings;
mod strategy;

pub use budget::{NestingLimit, StepBudget};
pub use canon::{Digit, SignRegion};
pub use digits::Digits;
pub use error::ExactError;
pub use lft::{Lft, Matrix, Tensor, Vector, disjoint};
pub use settings::{EvalSettings, SettingsError};
pub use strategy::{Strategy, fair, overlap, refine_guided};

pub use num_bigint::BigInt;
