//! Linear fractional transformations over the projective line.
//!
//! Three shapes share one algebra:
//!
//! - [`Vector`]: the projective point `v0/v1`.
//! - [`Matrix`]: the map `x ↦ (a·x + c)/(b·x + d)`, stored as two row vectors.
//!   Row `v0` is the image of ∞ and row `v1` the image of 0.
//! - [`Tensor`]: the bilinear map `T(x, y) = x0·m0(y) + x1·m1(y)`. Slot 1 is
//!   `x`, slot 2 is `y`.
//!
//! Entries are arbitrary-precision integers and are never reduced by gcd;
//! `scale` only strips a common factor of two.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::ExactError;

fn is_even(x: &BigInt) -> bool {
    (x % BigInt::from(2)).is_zero()
}

fn halve(x: &BigInt) -> BigInt {
    x / BigInt::from(2)
}

fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let (mut a, mut b) = (a.abs(), b.abs());
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

// ============================================================================
// Vector
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vector {
    v0: BigInt,
    v1: BigInt,
}

impl Vector {
    #[must_use]
    pub fn new(v0: impl Into<BigInt>, v1: impl Into<BigInt>) -> Self {
        Self {
            v0: v0.into(),
            v1: v1.into(),
        }
    }

    #[must_use]
    pub fn v0(&self) -> &BigInt {
        &self.v0
    }

    #[must_use]
    pub fn v1(&self) -> &BigInt {
        &self.v1
    }

    /// Which half of the projective line the point lies on.
    ///
    /// `1` when both components are non-negative, `-1` when both are
    /// non-positive, `0` for strictly mixed signs and for the zero vector.
    #[must_use]
    pub fn sign(&self) -> i8 {
        if self.v0.is_negative() {
            if self.v1.is_positive() { 0 } else { -1 }
        } else if self.v0.is_zero() {
            if self.v1.is_negative() {
                -1
            } else if self.v1.is_zero() {
                0
            } else {
                1
            }
        } else if self.v1.is_negative() {
            0
        } else {
            1
        }
    }

    #[must_use]
    pub fn refine(&self) -> bool {
        self.sign() != 0
    }

    #[must_use]
    pub fn scale(&self) -> Self {
        if is_even(&self.v0) && is_even(&self.v1) {
            Self {
                v0: halve(&self.v0),
                v1: halve(&self.v1),
            }
        } else {
            self.clone()
        }
    }

    /// Strict projective order: `det(self ; other) < 0`.
    #[must_use]
    pub fn precedes(&self, other: &Vector) -> bool {
        (&self.v0 * &other.v1 - &self.v1 * &other.v0).is_negative()
    }

    /// Lowest terms with a non-negative `v1`. The zero vector is unchanged.
    #[must_use]
    pub fn reduced(&self) -> Self {
        let (mut v0, mut v1) = (self.v0.clone(), self.v1.clone());
        if v1.is_negative() || (v1.is_zero() && v0.is_negative()) {
            v0 = -v0;
            v1 = -v1;
        }
        let g = gcd(&v0, &v1);
        if g.is_zero() || g.is_one() {
            return Self { v0, v1 };
        }
        Self {
            v0: v0 / &g,
            v1: v1 / &g,
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v({} {})", self.v0, self.v1)
    }
}

// ============================================================================
// Matrix
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    v0: Vector,
    v1: Vector,
}

impl Matrix {
    /// The map `x ↦ (a·x + c)/(b·x + d)`.
    #[must_use]
    pub fn new(
        a: impl Into<BigInt>,
        b: impl Into<BigInt>,
        c: impl Into<BigInt>,
        d: impl Into<BigInt>,
    ) -> Self {
        Self {
            v0: Vector::new(a, b),
            v1: Vector::new(c, d),
        }
    }

    #[must_use]
    pub fn from_rows(v0: Vector, v1: Vector) -> Self {
        Self { v0, v1 }
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::new(1, 0, 0, 1)
    }

    #[must_use]
    pub fn v0(&self) -> &Vector {
        &self.v0
    }

    #[must_use]
    pub fn v1(&self) -> &Vector {
        &self.v1
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.v0.v0.is_one() && self.v0.v1.is_zero() && self.v1.v0.is_zero() && self.v1.v1.is_one()
    }

    #[must_use]
    pub fn determinant(&self) -> BigInt {
        &self.v0.v0 * &self.v1.v1 - &self.v0.v1 * &self.v1.v0
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::new(
            self.v0.v0.clone(),
            self.v1.v0.clone(),
            self.v0.v1.clone(),
            self.v1.v1.clone(),
        )
    }

    /// Tame inverse: the adjugate, which is the inverse up to the
    /// (projectively irrelevant) factor `det`.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self::new(
            self.v1.v1.clone(),
            -&self.v0.v1,
            -&self.v1.v0,
            self.v0.v0.clone(),
        )
    }

    #[must_use]
    pub fn scale(&self) -> Self {
        if self.all_even() {
            Self::from_rows(self.v0.scale(), self.v1.scale())
        } else {
            self.clone()
        }
    }

    fn all_even(&self) -> bool {
        is_even(&self.v0.v0) && is_even(&self.v0.v1) && is_even(&self.v1.v0) && is_even(&self.v1.v1)
    }

    #[must_use]
    pub fn apply(&self, v: &Vector) -> Vector {
        Vector {
            v0: &self.v0.v0 * &v.v0 + &self.v1.v0 * &v.v1,
            v1: &self.v0.v1 * &v.v0 + &self.v1.v1 * &v.v1,
        }
    }

    /// `self ∘ other`.
    #[must_use]
    pub fn compose(&self, other: &Matrix) -> Matrix {
        Self::from_rows(self.apply(&other.v0), self.apply(&other.v1))
    }

    /// `self ∘ T`, keeping the tensor's counter.
    #[must_use]
    pub fn compose_tensor(&self, t: &Tensor) -> Tensor {
        Tensor {
            m0: self.compose(&t.m0),
            m1: self.compose(&t.m1),
            n: t.n,
        }
    }

    /// Both rows share a nonzero sign, so `[0, ∞]` maps into `[0, ∞]`.
    #[must_use]
    pub fn refine(&self) -> bool {
        let sign = self.v0.sign();
        sign != 0 && sign == self.v1.sign()
    }

    #[must_use]
    pub fn precedes_vector(&self, x: &Vector) -> bool {
        self.v0.precedes(x) && self.v1.precedes(x)
    }

    #[must_use]
    pub fn precedes(&self, other: &Matrix) -> bool {
        self.precedes_vector(&other.v0) && self.precedes_vector(&other.v1)
    }
}

/// The intervals spanned by `m` and `n` do not overlap.
#[must_use]
pub fn disjoint(m: &Matrix, n: &Matrix) -> bool {
    m.precedes(n) || n.precedes(m)
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m({} {})", self.v0, self.v1)
    }
}

// ============================================================================
// Tensor
// ============================================================================

/// Bilinear map with an absorption counter.
///
/// The counter `n` survives transposition, scaling and composition, and
/// grows by one each time a non-identity argument is absorbed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tensor {
    m0: Matrix,
    m1: Matrix,
    n: u64,
}

impl Tensor {
    #[must_use]
    pub fn new(m0: Matrix, m1: Matrix) -> Self {
        Self { m0, m1, n: 0 }
    }

    #[must_use]
    pub fn m0(&self) -> &Matrix {
        &self.m0
    }

    #[must_use]
    pub fn m1(&self) -> &Matrix {
        &self.m1
    }

    #[must_use]
    pub fn counter(&self) -> u64 {
        self.n
    }

    #[must_use]
    pub fn bumped(mut self) -> Self {
        self.n += 1;
        self
    }

    fn rows(&self) -> [&Vector; 4] {
        [&self.m0.v0, &self.m0.v1, &self.m1.v0, &self.m1.v1]
    }

    /// Swaps the roles of the two arguments.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self {
            m0: Matrix::from_rows(self.m0.v0.clone(), self.m1.v0.clone()),
            m1: Matrix::from_rows(self.m0.v1.clone(), self.m1.v1.clone()),
            n: self.n,
        }
    }

    /// `y ↦ T(x, y)` with slot 1 fixed to `x`.
    #[must_use]
    pub fn fix_first(&self, x: &Vector) -> Matrix {
        self.transpose().fix_second(x)
    }

    /// `x ↦ T(x, y)` with slot 2 fixed to `y`.
    #[must_use]
    pub fn fix_second(&self, y: &Vector) -> Matrix {
        Matrix::from_rows(self.m0.apply(y), self.m1.apply(y))
    }

    /// `(x, y) ↦ T(m(x), y)`.
    #[must_use]
    pub fn compose_first(&self, m: &Matrix) -> Self {
        self.transpose().compose_second(m).transpose()
    }

    /// `(x, y) ↦ T(x, m(y))`.
    #[must_use]
    pub fn compose_second(&self, m: &Matrix) -> Self {
        Self {
            m0: self.m0.compose(m),
            m1: self.m1.compose(m),
            n: self.n,
        }
    }

    #[must_use]
    pub fn scale(&self) -> Self {
        if self.m0.all_even() && self.m1.all_even() {
            Self {
                m0: self.m0.scale(),
                m1: self.m1.scale(),
                n: self.n,
            }
        } else {
            self.clone()
        }
    }

    /// Tensors have no adjugate; the inverse only strips a common factor of two.
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.scale()
    }

    /// All four rows share a nonzero sign.
    #[must_use]
    pub fn refine(&self) -> bool {
        let [first, rest @ ..] = self.rows();
        let sign = first.sign();
        sign != 0 && rest.iter().all(|row| row.sign() == sign)
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t({} {})", self.m0, self.m1)
    }
}

// ============================================================================
// Lft
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lft {
    Vector(Vector),
    Matrix(Matrix),
    Tensor(Tensor),
}

impl Lft {
    /// Number of arguments: 0, 1 or 2.
    #[must_use]
    pub fn branch(&self) -> usize {
        match self {
            Lft::Vector(_) => 0,
            Lft::Matrix(_) => 1,
            Lft::Tensor(_) => 2,
        }
    }

    #[must_use]
    pub fn refine(&self) -> bool {
        match self {
            Lft::Vector(v) => v.refine(),
            Lft::Matrix(m) => m.refine(),
            Lft::Tensor(t) => t.refine(),
        }
    }

    #[must_use]
    pub fn scale(&self) -> Self {
        match self {
            Lft::Vector(v) => Lft::Vector(v.scale()),
            Lft::Matrix(m) => Lft::Matrix(m.scale()),
            Lft::Tensor(t) => Lft::Tensor(t.scale()),
        }
    }

    #[must_use]
    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Lft::Vector(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Lft::Tensor(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_tensor(&self) -> bool {
        matches!(self, Lft::Tensor(_))
    }

    /// Substitutes `right` into argument slot `index` of `left`, then scales.
    ///
    /// Absorbing the identity matrix into a tensor returns the tensor
    /// untouched; absorbing any other matrix bumps its counter.
    pub fn dot(index: usize, left: &Lft, right: &Lft) -> Result<Lft, ExactError> {
        match (index, left, right) {
            (_, Lft::Vector(_), _) => Err(ExactError::UnsupportedOperation(
                "a vector has no argument slot",
            )),
            (_, Lft::Tensor(_), Lft::Tensor(_)) => Err(ExactError::UnsupportedOperation(
                "a tensor cannot absorb another tensor",
            )),
            (1, Lft::Matrix(m), Lft::Vector(v)) => Ok(Lft::Vector(m.apply(v).scale())),
            (1, Lft::Matrix(m), Lft::Matrix(r)) => Ok(Lft::Matrix(m.compose(r).scale())),
            (1, Lft::Matrix(m), Lft::Tensor(t)) => Ok(Lft::Tensor(m.compose_tensor(t).scale())),
            (1, Lft::Tensor(t), Lft::Vector(v)) => Ok(Lft::Matrix(t.fix_first(v).scale())),
            (2, Lft::Tensor(t), Lft::Vector(v)) => Ok(Lft::Matrix(t.fix_second(v).scale())),
            (1 | 2, Lft::Tensor(_), Lft::Matrix(r)) if r.is_identity() => Ok(left.clone()),
            (1, Lft::Tensor(t), Lft::Matrix(r)) => {
                Ok(Lft::Tensor(t.compose_first(r).scale().bumped()))
            }
            (2, Lft::Tensor(t), Lft::Matrix(r)) => {
                Ok(Lft::Tensor(t.compose_second(r).scale().bumped()))
            }
            (index, left, _) => Err(ExactError::ArityMismatch {
                index,
                arity: left.branch(),
            }),
        }
    }
}

impl From<Vector> for Lft {
    fn from(v: Vector) -> Self {
        Lft::Vector(v)
    }
}

impl From<Matrix> for Lft {
    fn from(m: Matrix) -> Self {
        Lft::Matrix(m)
    }
}

impl From<Tensor> for Lft {
    fn from(t: Tensor) -> Self {
        Lft::Tensor(t)
    }
}

impl fmt::Display for Lft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lft::Vector(v) => v.fmt(f),
            Lft::Matrix(m) => m.fmt(f),
            Lft::Tensor(t) => t.fmt(f),
        }
    }
}
