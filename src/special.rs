//! Special mathematical functions in double-double precision.
//!
//! Evaluated to roughly 30 significant digits so that reference densities
//! built on them do not limit the accuracy of the quadrature checks.

use crate::ddouble::DoubleDouble;

/// Arguments below this are shifted up by recurrence before the asymptotic
/// series is applied.
const ASYMPTOTIC_THRESHOLD: f64 = 40.0;

/// Stirling series coefficients B₂ₖ / (2k(2k−1)) as exact rationals.
const STIRLING: [(f64, f64); 12] = [
    (1.0, 12.0),
    (-1.0, 360.0),
    (1.0, 1260.0),
    (-1.0, 1680.0),
    (1.0, 1188.0),
    (-691.0, 360360.0),
    (1.0, 156.0),
    (-3617.0, 122400.0),
    (43867.0, 244188.0),
    (-174611.0, 125400.0),
    (854513.0, 63756.0),
    (-236364091.0, 1506960.0),
];

/// Digamma asymptotic coefficients B₂ₖ / (2k) as exact rationals.
const DIGAMMA: [(f64, f64); 12] = [
    (1.0, 12.0),
    (-1.0, 120.0),
    (1.0, 252.0),
    (-1.0, 240.0),
    (1.0, 132.0),
    (-691.0, 32760.0),
    (1.0, 12.0),
    (-3617.0, 8160.0),
    (43867.0, 14364.0),
    (-174611.0, 6600.0),
    (854513.0, 6072.0),
    (-236364091.0, 65520.0),
];

/// 1/√(2π)
pub fn frac_1_sqrt_2pi() -> DoubleDouble {
    DoubleDouble::TAU.sqrt().recip()
}

/// Standard normal density φ(z) = exp(−z²/2)/√(2π).
///
/// Returns NaN for NaN input and 0 for ±∞.
///
/// # Examples
/// ```
/// use u_ddstat::ddouble::DoubleDouble;
/// use u_ddstat::special::{frac_1_sqrt_2pi, standard_normal_pdf};
/// assert_eq!(standard_normal_pdf(DoubleDouble::ZERO), frac_1_sqrt_2pi());
/// ```
pub fn standard_normal_pdf(z: DoubleDouble) -> DoubleDouble {
    if z.is_nan() {
        return DoubleDouble::NAN;
    }
    (-(z.sqr().mul_pow2(0.5))).exp() * frac_1_sqrt_2pi()
}

/// Natural logarithm of the gamma function, ln Γ(x), for x > 0.
///
/// # Algorithm
/// Shifts the argument above 40 with Γ(x+1) = x·Γ(x), then sums the
/// Stirling series
/// ```text
/// ln Γ(z) ≈ (z − ½) ln z − z + ½ ln(2π) + Σₖ B₂ₖ / (2k(2k−1) z^(2k−1))
/// ```
/// with twelve correction terms.
///
/// # Returns
/// - NaN if `x ≤ 0` or `x` is NaN.
/// - `+∞` for `x = +∞`.
pub fn ln_gamma(x: DoubleDouble) -> DoubleDouble {
    if x.is_nan() || x <= DoubleDouble::ZERO {
        return DoubleDouble::NAN;
    }
    if x.is_infinite() {
        return DoubleDouble::INFINITY;
    }

    let mut z = x;
    let mut shift_product = DoubleDouble::ONE;
    while z < ASYMPTOTIC_THRESHOLD {
        shift_product *= z;
        z += 1.0;
    }

    let inv = z.recip();
    let inv2 = inv.sqr();
    let mut power = inv;
    let mut series = DoubleDouble::ZERO;
    for &(num, den) in &STIRLING {
        series += power * num / den;
        power *= inv2;
    }

    let half_ln_2pi = DoubleDouble::TAU.ln().mul_pow2(0.5);
    (z - 0.5) * z.ln() - z + half_ln_2pi + series - shift_product.ln()
}

/// Gamma function Γ(x) for x > 0, as `exp(ln Γ(x))`.
pub fn gamma(x: DoubleDouble) -> DoubleDouble {
    ln_gamma(x).exp()
}

/// Digamma function ψ(x) = d/dx ln Γ(x), for x > 0.
///
/// # Algorithm
/// Recurrence ψ(x) = ψ(x+1) − 1/x up to x ≥ 40, then
/// ```text
/// ψ(z) ≈ ln z − 1/(2z) − Σₖ B₂ₖ / (2k z^(2k))
/// ```
///
/// # Returns
/// - NaN if `x ≤ 0` or `x` is NaN.
pub fn digamma(x: DoubleDouble) -> DoubleDouble {
    if x.is_nan() || x <= DoubleDouble::ZERO {
        return DoubleDouble::NAN;
    }
    if x.is_infinite() {
        return DoubleDouble::INFINITY;
    }

    let mut z = x;
    let mut shift_sum = DoubleDouble::ZERO;
    while z < ASYMPTOTIC_THRESHOLD {
        shift_sum += z.recip();
        z += 1.0;
    }

    let inv2 = z.sqr().recip();
    let mut power = inv2;
    let mut series = DoubleDouble::ZERO;
    for &(num, den) in &DIGAMMA {
        series += power * num / den;
        power *= inv2;
    }

    z.ln() - z.recip().mul_pow2(0.5) - series - shift_sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dd(s: &str) -> DoubleDouble {
        s.parse().unwrap()
    }

    fn close(a: DoubleDouble, b: DoubleDouble, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_normal_pdf_at_zero() {
        let expected = dd("0.398942280401432677939946059934381868");
        assert!(close(standard_normal_pdf(DoubleDouble::ZERO), expected, 1e-30));
    }

    #[test]
    fn test_normal_pdf_symmetric() {
        let z = DoubleDouble::from(1.25);
        assert_eq!(standard_normal_pdf(z), standard_normal_pdf(-z));
    }

    #[test]
    fn test_normal_pdf_tails() {
        assert_eq!(standard_normal_pdf(DoubleDouble::from(100.0)), 0.0);
        assert_eq!(standard_normal_pdf(DoubleDouble::INFINITY), 0.0);
        assert!(standard_normal_pdf(DoubleDouble::NAN).is_nan());
    }

    #[test]
    fn test_ln_gamma_integers() {
        // Γ(n) = (n−1)!
        let mut factorial = DoubleDouble::ONE;
        for n in 1..=20 {
            if n > 1 {
                factorial *= f64::from(n - 1);
            }
            let got = ln_gamma(DoubleDouble::from(n));
            assert!(
                close(got, factorial.ln(), 1e-28),
                "ln Γ({n}) = {got}, expected {}",
                factorial.ln()
            );
        }
    }

    #[test]
    fn test_gamma_half() {
        // Γ(1/2) = √π
        let got = gamma(DoubleDouble::from(0.5));
        assert!(close(got, DoubleDouble::PI.sqrt(), 1e-28), "Γ(0.5) = {got}");
    }

    #[test]
    fn test_gamma_large_argument() {
        // No shift is applied above the threshold.
        let x = DoubleDouble::from(52.25);
        let lhs = ln_gamma(x + 1.0);
        let rhs = ln_gamma(x) + x.ln();
        assert!(close(lhs, rhs, 1e-27));
    }

    #[test]
    fn test_ln_gamma_invalid() {
        assert!(ln_gamma(DoubleDouble::ZERO).is_nan());
        assert!(ln_gamma(DoubleDouble::from(-1.5)).is_nan());
        assert!(ln_gamma(DoubleDouble::NAN).is_nan());
    }

    #[test]
    fn test_digamma_one() {
        let euler_gamma = dd("0.577215664901532860606512090082402431");
        assert!(close(digamma(DoubleDouble::ONE), -euler_gamma, 1e-28));
    }

    #[test]
    fn test_digamma_recurrence() {
        let x = DoubleDouble::from(2.75);
        let lhs = digamma(x + 1.0);
        let rhs = digamma(x) + x.recip();
        assert!(close(lhs, rhs, 1e-28));
    }

    #[test]
    fn test_digamma_invalid() {
        assert!(digamma(DoubleDouble::ZERO).is_nan());
        assert!(digamma(DoubleDouble::from(-2.0)).is_nan());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn ln_gamma_recurrence(x in 0.05_f64..60.0) {
            let x = DoubleDouble::from(x);
            let lhs = ln_gamma(x + 1.0);
            let rhs = ln_gamma(x) + x.ln();
            prop_assert!((lhs - rhs).abs() < 1e-27, "x={x}");
        }

        #[test]
        fn normal_pdf_bounded(z in -50.0_f64..50.0) {
            let p = standard_normal_pdf(DoubleDouble::from(z));
            prop_assert!(p >= DoubleDouble::ZERO);
            prop_assert!(p <= frac_1_sqrt_2pi());
        }
    }
}
