//! Decimal rendering of certified intervals.
//!
//! A [`Sefp`] pins a real inside the interval spanned by its matrix. The
//! renderer turns that interval into the decimal digits it certifies:
//!
//! - A degenerate matrix (determinant 0) is an exact rational `p/q`.
//! - An interval containing ∞ certifies nothing and renders as `unbounded`.
//! - Otherwise the interval is scaled by powers of ten into `[-1, 1]`, and
//!   signed decimal digits are read off while the interval fits inside one
//!   of the overlapping digit buckets.
//!
//! Scientific output is `[-]0<digits>e<exponent>`, meaning `0.<digits> × 10^exponent`.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use moebius_types::canon::SZER_INV;
use moebius_types::{EvalSettings, ExactError, Matrix, Vector};

use crate::expr::Expr;
use crate::normalize::Evaluator;
use crate::sefp::Sefp;
use crate::sink::{Sink, TraceSink};

/// Binary digits emitted per round when more decimal digits are needed.
const EXTEND_BITS: u32 = 4;

/// Raw signed decimal digits, most significant first, of `0.d1d2… × 10^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    pub exponent: i64,
    pub digits: Vec<i8>,
}

/// Reads the decimal digits certified by a non-degenerate interval.
///
/// Returns `None` when the interval contains ∞.
#[must_use]
pub fn scientific(m: &Matrix) -> Option<Decimal> {
    let mut m = m.clone();
    let mut exponent = 0i64;
    let shrink = Matrix::new(1, 0, 0, 10);
    loop {
        if m.inverse().apply(&Vector::new(1, 0)).refine() {
            return None;
        }
        if SZER_INV.compose(&m).refine() {
            break;
        }
        m = shrink.compose(&m);
        exponent += 1;
    }
    Some(Decimal {
        exponent,
        digits: mantissa(m),
    })
}

/// Signed decimal digits of an interval inside `[-1, 1]`.
///
/// Bucket `i` is `[(i - 1)/10, (i + 1)/10]`; buckets overlap so that a value
/// on a bucket boundary still has a digit.
fn mantissa(mut m: Matrix) -> Vec<i8> {
    let mut digits = Vec::new();
    loop {
        let found = (-9i64..=9).find(|&i| {
            let bucket = Matrix::new(i + 1, 10, i - 1, 10);
            bucket.inverse().compose(&m).refine()
        });
        let Some(i) = found else {
            return digits;
        };
        digits.push(i as i8);
        m = Matrix::new(10, 0, -i, 1).compose(&m);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Numeral {
    /// `numerator/denominator` in lowest terms, denominator positive.
    Exact {
        numerator: BigInt,
        denominator: BigInt,
    },
    /// `0.<value> × 10^exponent` with `digits` significant digits.
    Scientific {
        value: BigInt,
        digits: usize,
        exponent: i64,
    },
    Unbounded,
}

impl Numeral {
    #[must_use]
    pub fn from_matrix(m: &Matrix) -> Self {
        if m.determinant().is_zero() {
            return Self::exact(m.v0());
        }
        match scientific(m) {
            Some(decimal) => Self::from_decimal(&decimal),
            None => Self::Unbounded,
        }
    }

    /// The rational `v0/v1`, or `Unbounded` for ∞.
    #[must_use]
    pub fn exact(v: &Vector) -> Self {
        let v = v.reduced();
        if v.v1().is_zero() {
            return Self::Unbounded;
        }
        Self::Exact {
            numerator: v.v0().clone(),
            denominator: v.v1().clone(),
        }
    }

    /// Folds signed digits into one integer and strips leading zeros.
    #[must_use]
    pub fn from_decimal(decimal: &Decimal) -> Self {
        if decimal.digits.is_empty() {
            return Self::Unbounded;
        }
        let ten = BigInt::from(10);
        let value = decimal
            .digits
            .iter()
            .fold(BigInt::zero(), |acc, &d| acc * &ten + BigInt::from(d));
        let mut digits = decimal.digits.len();
        let mut exponent = decimal.exponent;
        let magnitude = value.abs();
        while digits > 0 && magnitude < num_traits::pow(ten.clone(), digits - 1) {
            exponent -= 1;
            digits -= 1;
        }
        Self::Scientific {
            value,
            digits,
            exponent,
        }
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact { .. })
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact {
                numerator,
                denominator,
            } => {
                if denominator == &BigInt::from(1) {
                    write!(f, "{numerator}")
                } else {
                    write!(f, "{numerator}/{denominator}")
                }
            }
            Self::Scientific {
                value, exponent, ..
            } => {
                if value.is_zero() {
                    write!(f, "0e{exponent}")
                } else if value.is_negative() {
                    write!(f, "-0{}e{exponent}", value.abs())
                } else {
                    write!(f, "0{value}e{exponent}")
                }
            }
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Renders `x` with at least `precision` certified decimal digits.
///
/// Digits are counted from the first decimal place of `0.d1d2… × 10^e` with
/// `e` fixed by the magnitude bound of the sign interval, before leading
/// zeros are stripped. For `|x| < 1` the leading zeros count towards
/// `precision`, so fewer significant digits are shown: `0.001·√2` at
/// precision 5 renders `01414e-2`.
///
/// `precision == 0` places the value in a sign region only, which renders as
/// `unbounded` unless the value is exact.
pub fn render(x: Expr, precision: u32) -> Result<String, ExactError> {
    let mut sink = TraceSink;
    render_with(x, precision, &EvalSettings::default(), &mut sink)
}

pub fn render_with(
    x: Expr,
    precision: u32,
    settings: &EvalSettings,
    sink: &mut dyn Sink,
) -> Result<String, ExactError> {
    let mut evaluator = Evaluator::new(settings, sink);
    if precision == 0 {
        let sefp = evaluator.sign_emission(x, 0)?;
        return Ok(Numeral::from_matrix(&sefp.to_matrix()).to_string());
    }
    // 10/3 binary digits per decimal digit, plus slack for the sign interval
    let bits = precision.saturating_mul(10) / 3 + EXTEND_BITS;
    tracing::debug!(precision, bits, "Rendering");
    let mut sefp: Sefp = evaluator.sign_emission(x, bits)?;
    loop {
        let m = sefp.to_matrix();
        if m.determinant().is_zero() {
            return Ok(Numeral::exact(m.v0()).to_string());
        }
        if let Some(decimal) = scientific(&m)
            && decimal.digits.len() >= precision as usize
        {
            tracing::debug!(
                steps = evaluator.steps(),
                bits = sefp.uefp().digits().exponent(),
                "Rendered"
            );
            return Ok(Numeral::from_decimal(&decimal).to_string());
        }
        sefp = evaluator.extend(sefp, EXTEND_BITS)?;
    }
}
