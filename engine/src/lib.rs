//! Lazy exact real arithmetic for Moebius.
//!
//! A real is an infinite composition of linear fractional transformations,
//! produced on demand by a generator ([`epi`], [`esqrtrat`], [`elogpos`], …)
//! and normalised into a sign, signed binary digits and, finally, decimal
//! digits by [`render`].
//!
//! Everything here is single-threaded: streams share nodes through `Rc`
//! and memoise their tails in place.

mod expr;
mod generators;
mod normalize;
mod render;
mod sefp;
mod sink;

pub use expr::{Expr, app, cons};
pub use generators::{
    Iterate, IterateWith, Rollover, eadd, earctanszer, ediv, ee, eiterate, eiteratex, elogpos,
    emul, epi, erational, ereciprocal, esqrtrat, esqrtspos, esub, etanszer, rollover,
};
pub use normalize::Evaluator;
pub use render::{Decimal, Numeral, render, render_with, scientific};
pub use sefp::{Sefp, Uefp};
pub use sink::{Event, NullSink, Sink, TraceSink};

pub use moebius_types::{
    BigInt, Digit, Digits, EvalSettings, ExactError, Lft, Matrix, NestingLimit, SignRegion,
    StepBudget, Strategy, Tensor, Vector,
};
