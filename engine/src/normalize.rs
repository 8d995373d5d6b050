//! Absorption and emission.
//!
//! Normalisation pulls information out of a stream in two phases:
//!
//! 1. **Sign seeking**: find a sign region `S` such that `S⁻¹ ∘ head` refines,
//!    i.e. the value is certainly inside `S`. Emit it and continue on
//!    `S⁻¹(stream)`.
//! 2. **Digit emission**: repeatedly find a digit `D` such that `D⁻¹ ∘ head`
//!    refines, append it to the digit run and continue on `D⁻¹(stream)`.
//!
//! When nothing can be emitted the head absorbs one argument (or one of two,
//! as chosen by the [`Strategy`]) and the test is retried. Both phases are
//! loops; the only nesting is the one-digit lookahead taken when a tensor
//! absorbs another tensor, which is bounded by the [`NestingLimit`].

use moebius_types::{
    Digit, Digits, EvalSettings, ExactError, Lft, Matrix, NestingLimit, SignRegion, StepBudget,
    Strategy, Tensor,
};

use crate::expr::{Expr, app};
use crate::sefp::{Sefp, Uefp};
use crate::sink::{Event, Sink};

/// `app(inverse, e)` when `inverse ∘ head(e)` refines.
fn emit_through(inverse: &Matrix, e: &Expr) -> Result<Option<Expr>, ExactError> {
    let inverse = Lft::Matrix(inverse.clone());
    if !Lft::dot(1, &inverse, e.head())?.refine() {
        return Ok(None);
    }
    app(&inverse, |_| Ok(e.clone())).map(Some)
}

pub struct Evaluator<'s> {
    strategy: Strategy,
    budget: StepBudget,
    nesting: NestingLimit,
    steps: u64,
    depth: u32,
    sink: &'s mut dyn Sink,
}

impl<'s> Evaluator<'s> {
    pub fn new(settings: &EvalSettings, sink: &'s mut dyn Sink) -> Self {
        Self {
            strategy: settings.strategy(),
            budget: settings.steps(),
            nesting: settings.nesting(),
            steps: 0,
            depth: 0,
            sink,
        }
    }

    /// Absorption steps taken so far.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn unresolved(&self, depth: u32) -> ExactError {
        ExactError::UnresolvedWithinBudget {
            steps: self.steps,
            depth,
        }
    }

    /// Places `e` in a sign region, then emits up to `digits` digits.
    pub fn sign_emission(&mut self, mut e: Expr, digits: u32) -> Result<Sefp, ExactError> {
        loop {
            for region in SignRegion::EMISSION_ORDER {
                if let Some(rest) = emit_through(region.inverse(), &e)? {
                    self.sink.record(&Event::Sign(region));
                    let uefp = self.digit_emission(Digits::zero(), rest, digits)?;
                    return Ok(Sefp::new(region, uefp));
                }
            }
            e = self.step(&e)?;
        }
    }

    /// Appends up to `count` digits to `digits`, consuming `e`.
    ///
    /// Stops early when the stream collapses to a terminal vector: the value
    /// is then exact and no further digits carry information.
    pub fn digit_emission(
        &mut self,
        mut digits: Digits,
        mut e: Expr,
        count: u32,
    ) -> Result<Uefp, ExactError> {
        let mut remaining = count;
        'emit: while remaining > 0 && !e.is_terminal() {
            for digit in Digit::EMISSION_ORDER {
                if let Some(rest) = emit_through(digit.inverse(), &e)? {
                    self.sink.record(&Event::Digit {
                        digit,
                        depth: self.depth,
                    });
                    digits = digits.push(digit);
                    e = rest;
                    remaining -= 1;
                    continue 'emit;
                }
            }
            e = self.step(&e)?;
        }
        Ok(Uefp::new(digits, e))
    }

    /// Resumes digit emission on an already signed value.
    pub fn extend(&mut self, sefp: Sefp, count: u32) -> Result<Sefp, ExactError> {
        let (sign, uefp) = sefp.into_parts();
        let (digits, rest) = uefp.into_parts();
        Ok(Sefp::new(sign, self.digit_emission(digits, rest, count)?))
    }

    /// Prepares argument `e` of head `k` for absorption.
    ///
    /// An argument that is not absorbed this step is wrapped in the neutral
    /// digit run, so the head sees the identity and stays unchanged. A tensor
    /// argument of a tensor head is first reduced by a one-digit lookahead,
    /// because the algebra cannot absorb a tensor into a tensor.
    pub fn absorb(&mut self, k: &Lft, e: Expr, decided: bool) -> Result<Expr, ExactError> {
        if !decided {
            return Ok(Uefp::new(Digits::zero(), e).into_expr());
        }
        if !(k.is_tensor() && e.head().is_tensor()) {
            return Ok(e);
        }
        let depth = self.depth + 1;
        if !self.nesting.permits(depth) {
            return Err(self.unresolved(depth));
        }
        self.sink.record(&Event::Lookahead { depth });
        let _span = tracing::trace_span!("lookahead", depth).entered();
        self.depth = depth;
        let lookahead = self.digit_emission(Digits::zero(), e, 1);
        self.depth -= 1;
        Ok(lookahead?.into_expr())
    }

    /// One absorption step on the head of `e`.
    fn step(&mut self, e: &Expr) -> Result<Expr, ExactError> {
        self.budget = match self.budget.take_one() {
            Some(budget) => budget,
            None => return Err(self.unresolved(self.depth)),
        };
        self.steps += 1;
        let head = e.head();
        self.sink.record(&Event::Absorb {
            arity: head.branch(),
            counter: head.as_tensor().map(Tensor::counter),
            depth: self.depth,
        });
        let strategy = self.strategy;
        app(head, |index| {
            let arg = e.tail(index)?;
            let decided = strategy.decision(index, head)?;
            self.absorb(head, arg, decided)
        })
    }
}
