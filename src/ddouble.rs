//! Double-double extended precision arithmetic.
//!
//! A [`DoubleDouble`] is the unevaluated sum `hi + lo` of two `f64` values
//! with `|lo| ≤ ulp(hi)/2`, giving a 106-bit significand (about 32 decimal
//! digits) while keeping the exponent range of `f64`.
//!
//! # Algorithms
//!
//! - **Error-free transformations**: Knuth's two-sum and the FMA-based
//!   two-product. Every operation is built from these.
//! - **Division / square root**: long division with three quotient limbs;
//!   one Newton step on the `f64` square root.
//! - **Exponential**: reduction `x = m·ln2 + r`, further scaling of `r` by
//!   2⁻⁹, Taylor series, then nine squarings.
//! - **Logarithm**: one Newton step `y ← y + x·e⁻ʸ − 1` from the `f64`
//!   logarithm.
//! - **Sine / cosine**: reduction modulo π/2, Taylor series on |r| ≤ π/4.
//!
//! References:
//! - Dekker (1971), "A Floating-Point Technique for Extending the Available
//!   Precision", *Numerische Mathematik* 18(3).
//! - Hida, Li & Bailey (2001), "Algorithms for Quad-Double Precision
//!   Floating Point Arithmetic", *ARITH-15*.
//!
//! # Non-finite values
//!
//! As soon as the leading limb of a result is NaN or ±∞, the result is that
//! value with a zero low limb, so irregular values propagate the same way
//! they do for `f64`.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use thiserror::Error;

/// Error returned when parsing a decimal literal into a [`DoubleDouble`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDoubleDoubleError {
    /// The literal contains no digits.
    #[error("cannot parse double-double from a literal without digits")]
    Empty,
    /// A character that is not part of a decimal literal.
    #[error("invalid character {0:?} in decimal literal")]
    InvalidDigit(char),
    /// The exponent after `e`/`E` is not a valid integer.
    #[error("invalid exponent in decimal literal {0:?}")]
    InvalidExponent(String),
}

/// Extended precision floating-point value (double-double).
///
/// # Examples
/// ```
/// use u_ddstat::ddouble::DoubleDouble;
/// let tenth: DoubleDouble = "0.1".parse().unwrap();
/// let one = tenth * 10.0;
/// assert!((one - 1.0).abs() < DoubleDouble::EPSILON * 4.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleDouble {
    hi: f64,
    lo: f64,
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

/// Requires `|a| ≥ |b|`.
#[inline]
fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let err = b - (s - a);
    (s, err)
}

#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = a.mul_add(b, -p);
    (p, err)
}

impl DoubleDouble {
    pub const ZERO: Self = Self { hi: 0.0, lo: 0.0 };
    pub const ONE: Self = Self { hi: 1.0, lo: 0.0 };

    /// π
    pub const PI: Self = Self {
        hi: 3.141592653589793116e+00,
        lo: 1.224646799147353207e-16,
    };
    /// π/2
    pub const FRAC_PI_2: Self = Self {
        hi: 1.570796326794896558e+00,
        lo: 6.123233995736766036e-17,
    };
    /// 2π
    pub const TAU: Self = Self {
        hi: 6.283185307179586232e+00,
        lo: 2.449293598294706414e-16,
    };
    /// Euler's number e.
    pub const E: Self = Self {
        hi: 2.718281828459045091e+00,
        lo: 1.445646891729250158e-16,
    };
    /// ln 2
    pub const LN_2: Self = Self {
        hi: 6.931471805599452862e-01,
        lo: 2.319046813846299558e-17,
    };

    /// Unit roundoff of the 106-bit significand, 2⁻¹⁰⁴.
    pub const EPSILON: Self = Self {
        hi: 4.930380657631324e-32,
        lo: 0.0,
    };

    pub const INFINITY: Self = Self {
        hi: f64::INFINITY,
        lo: 0.0,
    };
    pub const NEG_INFINITY: Self = Self {
        hi: f64::NEG_INFINITY,
        lo: 0.0,
    };
    pub const NAN: Self = Self {
        hi: f64::NAN,
        lo: 0.0,
    };

    /// Builds a value from two limbs, renormalizing so that `|lo| ≤ ulp(hi)/2`.
    pub fn new(hi: f64, lo: f64) -> Self {
        let (s, e) = two_sum(hi, lo);
        if !s.is_finite() {
            return Self::from(s);
        }
        Self { hi: s, lo: e }
    }

    /// Leading limb.
    pub fn hi(self) -> f64 {
        self.hi
    }

    /// Trailing limb.
    pub fn lo(self) -> f64 {
        self.lo
    }

    /// Nearest `f64`.
    pub fn to_f64(self) -> f64 {
        self.hi + self.lo
    }

    pub fn is_nan(self) -> bool {
        self.hi.is_nan() || self.lo.is_nan()
    }

    pub fn is_finite(self) -> bool {
        self.hi.is_finite() && self.lo.is_finite()
    }

    pub fn is_infinite(self) -> bool {
        self.hi.is_infinite()
    }

    pub fn is_zero(self) -> bool {
        self.hi == 0.0
    }

    pub fn is_sign_negative(self) -> bool {
        self.hi < 0.0 || (self.hi == 0.0 && self.lo < 0.0)
    }

    pub fn abs(self) -> Self {
        if self.is_sign_negative() { -self } else { self }
    }

    /// Maximum of two values, ignoring NaN like `f64::max`.
    pub fn max(self, other: Self) -> Self {
        if self.is_nan() || other > self { other } else { self }
    }

    /// Minimum of two values, ignoring NaN like `f64::min`.
    pub fn min(self, other: Self) -> Self {
        if self.is_nan() || other < self { other } else { self }
    }

    /// Exact multiplication by a power of two `factor`.
    #[inline]
    pub fn mul_pow2(self, factor: f64) -> Self {
        Self {
            hi: self.hi * factor,
            lo: self.lo * factor,
        }
    }

    /// Multiplies by 2ᵏ, in two steps so that |k| up to ~2000 does not
    /// overflow the intermediate power.
    pub fn ldexp(self, k: i32) -> Self {
        let k1 = k / 2;
        let k2 = k - k1;
        self.mul_pow2(2.0_f64.powi(k1)).mul_pow2(2.0_f64.powi(k2))
    }

    /// Largest integer value not greater than `self`.
    pub fn floor(self) -> Self {
        let hi = self.hi.floor();
        if hi == self.hi {
            let (s, e) = quick_two_sum(hi, self.lo.floor());
            Self { hi: s, lo: e }
        } else {
            Self { hi, lo: 0.0 }
        }
    }

    pub fn sqr(self) -> Self {
        self * self
    }

    pub fn recip(self) -> Self {
        Self::ONE / self
    }

    /// Square root; NaN for negative input.
    pub fn sqrt(self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        if self.is_nan() || self.hi < 0.0 {
            return Self::NAN;
        }
        if self.is_infinite() {
            return self;
        }
        let y = Self::from(self.hi.sqrt());
        y + (self - y.sqr()) / y.mul_pow2(2.0)
    }

    /// Natural exponential eˣ.
    pub fn exp(self) -> Self {
        // 2^9; r is scaled by 1/SCALE before the series and squared back.
        const SCALE: f64 = 512.0;
        const SQUARINGS: usize = 9;
        const MAX_TERMS: usize = 40;

        if self.is_nan() {
            return Self::NAN;
        }
        if self.hi > 709.78 {
            return Self::INFINITY;
        }
        if self.hi < -745.2 {
            return Self::ZERO;
        }
        if self.is_zero() {
            return Self::ONE;
        }

        let m = (self.hi / Self::LN_2.hi).round();
        let r = (self - Self::LN_2 * m).mul_pow2(1.0 / SCALE);

        // expm1(r) by Taylor series
        let threshold = r.hi.abs() * Self::EPSILON.hi * 1e-3;
        let mut term = r;
        let mut sum = r;
        for n in 2..MAX_TERMS {
            term = term * r / n as f64;
            sum += term;
            if term.hi.abs() <= threshold {
                break;
            }
        }

        // (1 + s)² − 1 = 2s + s²
        for _ in 0..SQUARINGS {
            sum = sum.mul_pow2(2.0) + sum.sqr();
        }
        (sum + Self::ONE).ldexp(m as i32)
    }

    /// Natural logarithm; `-inf` at zero, NaN for negative input.
    pub fn ln(self) -> Self {
        if self.is_nan() || self.is_sign_negative() && !self.is_zero() {
            return Self::NAN;
        }
        if self.is_zero() {
            return Self::NEG_INFINITY;
        }
        if self.is_infinite() {
            return Self::INFINITY;
        }
        if self.hi == 1.0 && self.lo == 0.0 {
            return Self::ZERO;
        }

        // Keep e^(−y) inside the f64 range for very large or tiny inputs.
        let k = self.hi.log2().floor();
        if k.abs() > 600.0 {
            let k = k as i32;
            return self.ldexp(-k).ln() + Self::LN_2 * f64::from(k);
        }

        let y = Self::from(self.hi.ln());
        y + (self * (-y).exp() - Self::ONE)
    }

    /// `self` raised to an integer power, by repeated squaring.
    pub fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Self::ONE;
        }
        let mut base = self;
        let mut e = n.unsigned_abs();
        let mut acc = Self::ONE;
        while e > 0 {
            if e & 1 == 1 {
                acc *= base;
            }
            e >>= 1;
            if e > 0 {
                base = base.sqr();
            }
        }
        if n < 0 { acc.recip() } else { acc }
    }

    /// `self` raised to a real power, `exp(y · ln self)`.
    ///
    /// Negative bases give NaN.
    pub fn powf(self, y: Self) -> Self {
        if self.is_zero() {
            return if y.is_zero() {
                Self::ONE
            } else if y.is_sign_negative() {
                Self::INFINITY
            } else {
                Self::ZERO
            };
        }
        (y * self.ln()).exp()
    }

    pub fn sin(self) -> Self {
        self.sin_cos().0
    }

    pub fn cos(self) -> Self {
        self.sin_cos().1
    }

    /// Sine and cosine computed together.
    pub fn sin_cos(self) -> (Self, Self) {
        if !self.is_finite() {
            return (Self::NAN, Self::NAN);
        }
        let j = (self.hi / Self::FRAC_PI_2.hi).round();
        let r = self - Self::FRAC_PI_2 * j;
        let (s, c) = taylor_sin_cos(r);
        match (j as i64).rem_euclid(4) {
            0 => (s, c),
            1 => (c, -s),
            2 => (-s, -c),
            _ => (-c, s),
        }
    }
}

/// Taylor series for sin and cos, `|r| ≤ π/4`.
fn taylor_sin_cos(r: DoubleDouble) -> (DoubleDouble, DoubleDouble) {
    const MAX_TERMS: usize = 30;

    if r.is_zero() {
        return (DoubleDouble::ZERO, DoubleDouble::ONE);
    }
    let threshold = DoubleDouble::EPSILON.hi * 1e-3;
    let r2 = r.sqr();

    let mut s_term = r;
    let mut sin = r;
    let mut c_term = DoubleDouble::ONE;
    let mut cos = DoubleDouble::ONE;
    for k in 1..MAX_TERMS {
        let k2 = (2 * k) as f64;
        c_term = -(c_term * r2) / ((k2 - 1.0) * k2);
        s_term = -(s_term * r2) / (k2 * (k2 + 1.0));
        cos += c_term;
        sin += s_term;
        if c_term.hi.abs() <= threshold && s_term.hi.abs() <= threshold * r.hi.abs() {
            break;
        }
    }
    (sin, cos)
}

// ============================================================================
// Conversions
// ============================================================================

impl From<f64> for DoubleDouble {
    fn from(hi: f64) -> Self {
        Self { hi, lo: 0.0 }
    }
}

impl From<i32> for DoubleDouble {
    fn from(v: i32) -> Self {
        Self::from(f64::from(v))
    }
}

impl From<DoubleDouble> for f64 {
    fn from(v: DoubleDouble) -> Self {
        v.to_f64()
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

impl Neg for DoubleDouble {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

impl Add for DoubleDouble {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let (s1, s2) = two_sum(self.hi, rhs.hi);
        if !s1.is_finite() {
            return Self::from(s1);
        }
        let (t1, t2) = two_sum(self.lo, rhs.lo);
        let (s1, s2) = quick_two_sum(s1, s2 + t1);
        let (hi, lo) = quick_two_sum(s1, s2 + t2);
        Self { hi, lo }
    }
}

impl Sub for DoubleDouble {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for DoubleDouble {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (p1, p2) = two_prod(self.hi, rhs.hi);
        if !p1.is_finite() {
            return Self::from(p1);
        }
        let p2 = p2 + (self.hi * rhs.lo + self.lo * rhs.hi);
        let (hi, lo) = quick_two_sum(p1, p2);
        Self { hi, lo }
    }
}

impl Div for DoubleDouble {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let q1 = self.hi / rhs.hi;
        if !q1.is_finite() || !rhs.hi.is_finite() {
            return Self::from(q1);
        }
        let r = self - rhs * q1;
        let q2 = r.hi / rhs.hi;
        let r = r - rhs * q2;
        let q3 = r.hi / rhs.hi;
        let (hi, lo) = quick_two_sum(q1, q2);
        Self { hi, lo } + q3
    }
}

macro_rules! forward_binop {
    ($Trait:ident, $method:ident, $AssignTrait:ident, $assign:ident) => {
        impl $Trait<f64> for DoubleDouble {
            type Output = DoubleDouble;

            fn $method(self, rhs: f64) -> DoubleDouble {
                $Trait::$method(self, DoubleDouble::from(rhs))
            }
        }

        impl $Trait<DoubleDouble> for f64 {
            type Output = DoubleDouble;

            fn $method(self, rhs: DoubleDouble) -> DoubleDouble {
                $Trait::$method(DoubleDouble::from(self), rhs)
            }
        }

        impl $AssignTrait for DoubleDouble {
            fn $assign(&mut self, rhs: DoubleDouble) {
                *self = $Trait::$method(*self, rhs);
            }
        }

        impl $AssignTrait<f64> for DoubleDouble {
            fn $assign(&mut self, rhs: f64) {
                *self = $Trait::$method(*self, DoubleDouble::from(rhs));
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);

// ============================================================================
// Comparison
// ============================================================================

impl PartialEq for DoubleDouble {
    fn eq(&self, other: &Self) -> bool {
        self.hi == other.hi && self.lo == other.lo
    }
}

impl PartialOrd for DoubleDouble {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.hi.partial_cmp(&other.hi) {
            Some(Ordering::Equal) => self.lo.partial_cmp(&other.lo),
            ord => ord,
        }
    }
}

impl PartialEq<f64> for DoubleDouble {
    fn eq(&self, other: &f64) -> bool {
        *self == DoubleDouble::from(*other)
    }
}

impl PartialOrd<f64> for DoubleDouble {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.partial_cmp(&DoubleDouble::from(*other))
    }
}

// ============================================================================
// Decimal parsing and formatting
// ============================================================================

impl FromStr for DoubleDouble {
    type Err = ParseDoubleDoubleError;

    /// Parses `[+-]digits[.digits][(e|E)[+-]digits]`, `inf`, `infinity`
    /// or `nan` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let lowered = body.to_ascii_lowercase();
        if lowered == "inf" || lowered == "infinity" {
            return Ok(if negative {
                Self::NEG_INFINITY
            } else {
                Self::INFINITY
            });
        }
        if lowered == "nan" {
            return Ok(Self::NAN);
        }

        let (mantissa, exponent) = match body.find(|c| c == 'e' || c == 'E') {
            Some(i) => {
                let exponent = body[i + 1..]
                    .parse::<i32>()
                    .map_err(|_| ParseDoubleDoubleError::InvalidExponent(s.to_string()))?;
                (&body[..i], exponent)
            }
            None => (body, 0),
        };

        let mut value = Self::ZERO;
        let mut frac_digits = 0_i32;
        let mut seen_point = false;
        let mut seen_digit = false;
        for c in mantissa.chars() {
            match c {
                '0'..='9' => {
                    value = value * 10.0 + f64::from(c as u8 - b'0');
                    seen_digit = true;
                    if seen_point {
                        frac_digits += 1;
                    }
                }
                '.' if !seen_point => seen_point = true,
                _ => return Err(ParseDoubleDoubleError::InvalidDigit(c)),
            }
        }
        if !seen_digit {
            return Err(ParseDoubleDoubleError::Empty);
        }

        // An all-zero mantissa stays zero whatever the exponent; 0·10⁴⁰⁰
        // would otherwise be 0·∞.
        if value.is_zero() {
            return Ok(if negative { -Self::ZERO } else { Self::ZERO });
        }

        let ten = Self::from(10.0);
        let scale = exponent.saturating_sub(frac_digits);
        let value = if scale >= 0 {
            value * ten.powi(scale)
        } else {
            value / ten.powi(scale.saturating_neg())
        };
        Ok(if negative { -value } else { value })
    }
}

impl fmt::Display for DoubleDouble {
    /// Scientific notation. The formatter precision selects the number of
    /// digits after the point (default 31, i.e. 32 significant digits).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nan() {
            return f.write_str("NaN");
        }
        if self.is_infinite() {
            return f.write_str(if self.hi > 0.0 { "inf" } else { "-inf" });
        }

        let digits = f.precision().map_or(32, |p| p + 1).clamp(1, 34);
        let mut out = String::with_capacity(digits + 8);
        if self.is_sign_negative() {
            out.push('-');
        }
        if self.is_zero() {
            out.push('0');
            if digits > 1 {
                out.push('.');
                out.push_str(&"0".repeat(digits - 1));
            }
            out.push_str("e0");
            return f.write_str(&out);
        }

        let ten = Self::from(10.0);
        let mut v = self.abs();
        let mut shift = 0;
        if v.hi < 1e-290 {
            v *= ten.powi(300);
            shift = -300;
        }
        let mut exponent = v.hi.log10().floor() as i32;
        let mut scaled = if exponent >= 0 {
            v / ten.powi(exponent)
        } else {
            v * ten.powi(-exponent)
        };
        if scaled.hi >= 10.0 {
            scaled /= 10.0;
            exponent += 1;
        } else if scaled.hi < 1.0 {
            scaled *= 10.0;
            exponent -= 1;
        }

        // One guard digit for rounding.
        let mut mantissa = Vec::with_capacity(digits + 1);
        for _ in 0..=digits {
            let d = scaled.floor().hi.clamp(0.0, 9.0);
            mantissa.push(d as u8);
            scaled = (scaled - d) * 10.0;
        }
        let guard = mantissa.pop().unwrap_or(0);
        if guard >= 5 {
            let mut i = mantissa.len();
            loop {
                if i == 0 {
                    mantissa.insert(0, 1);
                    mantissa.pop();
                    exponent += 1;
                    break;
                }
                i -= 1;
                if mantissa[i] == 9 {
                    mantissa[i] = 0;
                } else {
                    mantissa[i] += 1;
                    break;
                }
            }
        }

        for (i, d) in mantissa.iter().enumerate() {
            if i == 1 {
                out.push('.');
            }
            out.push(char::from(b'0' + d));
        }
        out.push('e');
        out.push_str(&(exponent + shift).to_string());
        f.write_str(&out)
    }
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn add_sub_roundtrip(a in -1e10_f64..1e10, b in -1e10_f64..1e10) {
            let x = DoubleDouble::from(a) + b;
            prop_assert!((x - b - a).abs() <= 1e-30 * a.abs().max(1.0));
        }

        #[test]
        fn mul_div_roundtrip(a in -1e10_f64..1e10, b in 1e-5_f64..1e5) {
            let x = DoubleDouble::from(a) / 3.0;
            let y = x * b / b;
            let tol = 1e-30 * x.abs().hi().max(1e-300);
            prop_assert!((y - x).abs() <= tol, "x={x} y={y}");
        }

        #[test]
        fn sqrt_squares_back(a in 1e-20_f64..1e20) {
            let x = DoubleDouble::from(a) / 7.0;
            let r = x.sqrt();
            prop_assert!(((r * r - x) / x).abs() < 1e-30);
        }

        #[test]
        fn exp_is_additive(a in -20.0_f64..20.0, b in -20.0_f64..20.0) {
            let (a, b) = (DoubleDouble::from(a), DoubleDouble::from(b));
            let lhs = (a + b).exp();
            let rhs = a.exp() * b.exp();
            prop_assert!(((lhs - rhs) / rhs).abs() < 1e-29);
        }

        #[test]
        fn sin_cos_pythagorean(a in -10.0_f64..10.0) {
            let (s, c) = DoubleDouble::from(a).sin_cos();
            prop_assert!((s * s + c * c - 1.0).abs() < 1e-30);
        }

        #[test]
        fn display_parse_roundtrip(a in -1e6_f64..1e6) {
            let x = DoubleDouble::from(a) / 7.0;
            let back: DoubleDouble = x.to_string().parse().unwrap();
            let tol = 1e-29 * x.abs().hi().max(1e-300);
            prop_assert!((back - x).abs() <= tol, "x={x} back={back}");
        }
    }
}
