//! Stream generators for constants and elementary functions.
//!
//! Each recurrence is an explicit state value: it can be iterated directly
//! (yielding its LFTs or digits) or turned into a lazy [`Expr`] that
//! restarts from that state.

use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use moebius_types::canon::{TADD, TDIV, TMUL, TSUB};
use moebius_types::{Digit, ExactError, Matrix, Tensor, Vector};

use crate::expr::Expr;

// ============================================================================
// Recurrences
// ============================================================================

/// `f(n), f(n + 1), …` as a chain of matrices.
#[derive(Clone)]
pub struct Iterate {
    term: Rc<dyn Fn(u64) -> Matrix>,
    n: u64,
}

impl Iterate {
    pub fn new(term: impl Fn(u64) -> Matrix + 'static, start: u64) -> Self {
        Self {
            term: Rc::new(term),
            n: start,
        }
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.n
    }

    #[must_use]
    pub fn into_expr(self) -> Expr {
        let head = (self.term)(self.n);
        let next = Self {
            term: self.term,
            n: self.n + 1,
        };
        Expr::matrix(head, move || Ok(next.into_expr()))
    }
}

impl Iterator for Iterate {
    type Item = Matrix;

    fn next(&mut self) -> Option<Matrix> {
        let m = (self.term)(self.n);
        self.n += 1;
        Some(m)
    }
}

/// `f(n), f(n + 1), …` as a chain of tensors, each taking the same `x` in
/// slot 1 and the rest of the chain in slot 2.
#[derive(Clone)]
pub struct IterateWith {
    term: Rc<dyn Fn(u64) -> Tensor>,
    n: u64,
    x: Expr,
}

impl IterateWith {
    pub fn new(term: impl Fn(u64) -> Tensor + 'static, start: u64, x: Expr) -> Self {
        Self {
            term: Rc::new(term),
            n: start,
            x,
        }
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.n
    }

    #[must_use]
    pub fn into_expr(self) -> Expr {
        let head = (self.term)(self.n);
        let x = self.x.clone();
        let next = Self {
            term: self.term,
            n: self.n + 1,
            x: self.x,
        };
        Expr::tensor_with(head, x, move || Ok(next.into_expr()))
    }
}

impl Iterator for IterateWith {
    type Item = Tensor;

    fn next(&mut self) -> Option<Tensor> {
        let t = (self.term)(self.n);
        self.n += 1;
        Some(t)
    }
}

/// Digit-by-digit square root of `p/q`, driven by the invariant
/// `c = a - b` scaled along with `a` and `b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollover {
    a: BigInt,
    b: BigInt,
    c: BigInt,
}

impl Rollover {
    pub fn new(a: impl Into<BigInt>, b: impl Into<BigInt>, c: impl Into<BigInt>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        }
    }

    /// The next digit and the state after it.
    #[must_use]
    pub fn step(&self) -> (Digit, Rollover) {
        let four = BigInt::from(4);
        let d = (&self.b - &self.a) * BigInt::from(2) + &self.c;
        if d.is_negative() {
            let next = Self {
                a: -d,
                b: &self.b * &four,
                c: self.c.clone(),
            };
            (Digit::Positive, next)
        } else {
            let next = Self {
                a: &self.a * &four,
                b: d,
                c: self.c.clone(),
            };
            (Digit::Negative, next)
        }
    }

    #[must_use]
    pub fn into_expr(self) -> Expr {
        let (digit, next) = self.step();
        Expr::matrix(digit.matrix().clone(), move || Ok(next.into_expr()))
    }
}

impl Iterator for Rollover {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        let (digit, next) = self.step();
        *self = next;
        Some(digit)
    }
}

// ============================================================================
// Generators
// ============================================================================

pub fn eiterate(term: impl Fn(u64) -> Matrix + 'static, start: u64) -> Expr {
    Iterate::new(term, start).into_expr()
}

pub fn eiteratex(term: impl Fn(u64) -> Tensor + 'static, start: u64, x: Expr) -> Expr {
    IterateWith::new(term, start, x).into_expr()
}

pub fn rollover(a: impl Into<BigInt>, b: impl Into<BigInt>, c: impl Into<BigInt>) -> Expr {
    Rollover::new(a, b, c).into_expr()
}

/// The exact rational `p/q` as a terminal stream.
pub fn erational(p: impl Into<BigInt>, q: impl Into<BigInt>) -> Result<Expr, ExactError> {
    let (p, q) = (p.into(), q.into());
    if p.is_zero() && q.is_zero() {
        return Err(ExactError::UnsupportedOperation("0/0 is not a real number"));
    }
    Ok(Expr::vector(Vector::new(p, q)))
}

/// `√(p/q)`. Perfect squares are detected and returned as exact values.
pub fn esqrtrat(p: impl Into<BigInt>, q: impl Into<BigInt>) -> Result<Expr, ExactError> {
    let (p, q) = (p.into(), q.into());
    if q.is_zero() {
        return Err(ExactError::UnsupportedOperation(
            "square root of a rational with zero denominator",
        ));
    }
    let v = Vector::new(p, q).reduced();
    if v.v0().is_negative() {
        return Err(ExactError::UnsupportedOperation(
            "square root of a negative rational",
        ));
    }
    let (p, q) = (v.v0().clone(), v.v1().clone());
    let (rp, rq) = (p.sqrt(), q.sqrt());
    if &rp * &rp == p && &rq * &rq == q {
        return Ok(Expr::vector(Vector::new(rp, rq)));
    }
    let c = &p - &q;
    Ok(rollover(p, q, c))
}

/// `√x` for `x ∈ [0, ∞]`.
pub fn esqrtspos(x: Expr) -> Expr {
    eiteratex(
        |_| Tensor::new(Matrix::new(1, 0, 2, 1), Matrix::new(1, 2, 0, 1)),
        0,
        x,
    )
}

fn log_term(n: u64) -> Tensor {
    if n == 0 {
        return Tensor::new(Matrix::new(1, 0, 1, 1), Matrix::new(-1, 1, -1, 0));
    }
    let n = n as i64;
    Tensor::new(
        Matrix::new(n, 0, 2 * n + 1, n + 1),
        Matrix::new(n + 1, 2 * n + 1, 0, n),
    )
}

/// `ln x` for `x ∈ [0, ∞]`.
pub fn elogpos(x: Expr) -> Expr {
    eiteratex(log_term, 0, x)
}

/// Euler's number.
pub fn ee() -> Expr {
    eiterate(
        |n| {
            let n = n as i64;
            Matrix::new(2 * n + 2, 2 * n + 1, 2 * n + 1, 2 * n)
        },
        0,
    )
}

const CHUDNOVSKY_A: i64 = 13_591_409;
const CHUDNOVSKY_B: i64 = 545_140_134;
const CHUDNOVSKY_E: i64 = 10_939_058_860_032_000;

/// Partial-sum matrix of the Chudnovsky series for `426880 / Σ`, so that
/// `π = √10005 / ω`.
fn chudnovsky_term(n: u64) -> Matrix {
    let a = BigInt::from(CHUDNOVSKY_A);
    let b = BigInt::from(CHUDNOVSKY_B);
    if n == 0 {
        return Matrix::new(&a * 2u32, 426_880, a, 853_760);
    }
    let j = BigInt::from(n);
    let k = BigInt::from(n - 1);
    let bj = (&j * 2u32 - 1u32) * (&j * 6u32 - 5u32) * (&j * 6u32 - 1u32);
    let p = -(bj * (&a + &b * &j));
    let q = &j * &j * &j * BigInt::from(CHUDNOVSKY_E) * (&a + &b * &k);
    Matrix::new(
        &q + &p * 4u32,
        &q - &p * 2u32,
        &q * 2u32 + &p * 2u32,
        &q * 2u32 - &p,
    )
}

/// π.
pub fn epi() -> Expr {
    Expr::tensor_over(
        TDIV.clone(),
        rollover(10_005, 1, 10_004),
        eiterate(chudnovsky_term, 0),
    )
}

/// `1/x` for `x ∈ [0, ∞]`.
pub fn ereciprocal(x: Expr) -> Expr {
    Expr::matrix_over(Matrix::new(0, 1, 1, 0), x)
}

pub fn eadd(x: Expr, y: Expr) -> Expr {
    Expr::tensor_over(TADD.clone(), x, y)
}

pub fn esub(x: Expr, y: Expr) -> Expr {
    Expr::tensor_over(TSUB.clone(), x, y)
}

pub fn emul(x: Expr, y: Expr) -> Expr {
    Expr::tensor_over(TMUL.clone(), x, y)
}

pub fn ediv(x: Expr, y: Expr) -> Expr {
    Expr::tensor_over(TDIV.clone(), x, y)
}

/// Tangent on the zero region has no stream definition yet.
pub fn etanszer(_x: Expr) -> Result<Expr, ExactError> {
    Err(ExactError::UnsupportedOperation("tangent is not defined"))
}

/// Arctangent on the zero region has no stream definition yet.
pub fn earctanszer(_x: Expr) -> Result<Expr, ExactError> {
    Err(ExactError::UnsupportedOperation("arctangent is not defined"))
}
