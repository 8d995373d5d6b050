use thiserror::Error;

/// Recoverable failures of exact evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExactError {
    /// A tail, slot or decision index outside an LFT's arity.
    #[error("index {index} is outside arity {arity}")]
    ArityMismatch { index: usize, arity: usize },
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    /// The step budget or the nesting limit ran out before the requested
    /// output was certified.
    #[error("unresolved after {steps} absorption steps (nesting depth {depth})")]
    UnresolvedWithinBudget { steps: u64, depth: u32 },
}
